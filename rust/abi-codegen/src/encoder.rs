//! In-memory encoders.
//!
//! These are what generation produces before anything is rendered to text.
//! A [`MethodEncoder`] is directly callable; the text targets render the same
//! value as source for callers that want inspectable code.

use std::collections::HashMap;

use abi_schema::{MethodDescriptor, Param};
use abi_wire::{AbiEncoder, StandardEncoder, Token};

use crate::CallError;

/// Encoder for calls to one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEncoder {
    name: String,
    callable_name: Option<String>,
    parameters: Vec<Param>,
    parameter_types: Vec<String>,
}

impl MethodEncoder {
    pub(crate) fn new(method: &MethodDescriptor, callable_name: Option<String>) -> Self {
        Self {
            name: method.name.clone(),
            callable_name,
            parameters: method.parameters.clone(),
            parameter_types: method.parameter_types(),
        }
    }

    /// Name of the method this encoder calls.
    pub fn method_name(&self) -> &str {
        &self.name
    }

    /// `prefix + method name`, or `None` for the anonymous encoders that
    /// live in an object keyed by method name.
    pub fn callable_name(&self) -> Option<&str> {
        self.callable_name.as_deref()
    }

    pub fn parameters(&self) -> &[Param] {
        &self.parameters
    }

    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Encode a call with the standard encoder.
    pub fn call(&self, args: &[Token]) -> Result<Vec<u8>, CallError> {
        self.call_with(&StandardEncoder, args)
    }

    /// Encode a call: method identifier followed by the encoded arguments.
    ///
    /// Only the argument count is checked here. Anything wrong with the
    /// argument values is reported by `encoder`.
    pub fn call_with<E: AbiEncoder + ?Sized>(
        &self,
        encoder: &E,
        args: &[Token],
    ) -> Result<Vec<u8>, CallError> {
        if args.len() != self.arity() {
            return Err(CallError::ArityMismatch {
                method: self.name.clone(),
                expected: self.arity(),
                actual: args.len(),
            });
        }
        let mut payload = encoder
            .derive_identifier(&self.name, &self.parameter_types)?
            .to_vec();
        payload.extend(encoder.encode_arguments(&self.parameter_types, args)?);
        Ok(payload)
    }
}

/// Signature of the functions rendered by the Rust target.
pub type EncodeFn = fn(&[Token]) -> Result<Vec<u8>, CallError>;

/// Ordered name → value definitions where a later definition of a name
/// shadows earlier ones.
///
/// Every definition is kept in source order, so rendering a `FieldMap`
/// reproduces one block per definition; lookups see the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap<V> {
    entries: Vec<(String, V)>,
    /// Distinct keys, in the position of their first definition.
    keys: Vec<String>,
    /// Index into `entries` of the visible definition of each key.
    visible: HashMap<String, usize>,
}

/// Encoders keyed by callable name (`prefix + method name`).
pub type EncoderSet = FieldMap<MethodEncoder>;

/// Anonymous encoders keyed by bare method name.
pub type EncoderObject = FieldMap<MethodEncoder>;

/// Rendered Rust object mode: bare method name → function.
pub type FnTable = FieldMap<EncodeFn>;

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            keys: Vec::new(),
            visible: HashMap::new(),
        }
    }
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in entries {
            map.push(key, value);
        }
        map
    }

    /// Append a definition. An existing definition of `key` stays in
    /// [`entries`](Self::entries) but is no longer visible to lookups.
    pub fn push(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let index = self.entries.len();
        if self.visible.insert(key.clone(), index).is_none() {
            self.keys.push(key.clone());
        }
        self.entries.push((key, value));
    }

    /// The last definition of `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.visible.get(key).map(|&index| &self.entries[index].1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.visible.contains_key(key)
    }

    /// Distinct keys, in the position of their first definition.
    pub fn keys(&self) -> Vec<&str> {
        self.keys.iter().map(String::as_str).collect()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every definition, shadowed ones included, in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the definition at `index` in [`entries`](Self::entries) is
    /// hidden by a later definition of the same key.
    pub fn is_shadowed(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .is_some_and(|(key, _)| self.visible.get(key) != Some(&index))
    }
}

impl FieldMap<MethodEncoder> {
    /// Call the visible encoder named `key`.
    pub fn call(&self, key: &str, args: &[Token]) -> Result<Vec<u8>, CallError> {
        self.get(key)
            .ok_or_else(|| CallError::NotDefined {
                name: key.to_string(),
            })?
            .call(args)
    }
}

impl FieldMap<EncodeFn> {
    /// Call the visible function named `key`.
    pub fn call(&self, key: &str, args: &[Token]) -> Result<Vec<u8>, CallError> {
        let encode = self.get(key).ok_or_else(|| CallError::NotDefined {
            name: key.to_string(),
        })?;
        encode(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use abi_wire::{Selector, WireError};

    fn method() -> MethodDescriptor {
        MethodDescriptor::function("Method", vec![Param::new("x", "uint256")])
    }

    #[test]
    fn arity_is_checked_before_encoding() {
        let encoder = MethodEncoder::new(&method(), Some("encode_Method".into()));
        for args in [vec![], vec![Token::uint(1u8), Token::uint(2u8)]] {
            assert_eq!(
                encoder.call(&args),
                Err(CallError::ArityMismatch {
                    method: "Method".into(),
                    expected: 1,
                    actual: args.len(),
                })
            );
        }
    }

    #[test]
    fn encoder_errors_pass_through() {
        let encoder = MethodEncoder::new(&method(), None);
        let err = encoder.call(&[Token::Bool(true)]).unwrap_err();
        assert!(matches!(
            err,
            CallError::Encoding(WireError::Argument { index: 0, .. })
        ));
    }

    /// Backend returning canned bytes.
    struct Fixed;

    impl AbiEncoder for Fixed {
        fn derive_identifier(&self, _: &str, _: &[String]) -> Result<Selector, WireError> {
            Ok(Selector([0xaa, 0xbb, 0xcc, 0xdd]))
        }

        fn encode_arguments(&self, _: &[String], args: &[Token]) -> Result<Vec<u8>, WireError> {
            Ok(vec![args.len() as u8])
        }
    }

    #[test]
    fn call_with_custom_backend() {
        let encoder = MethodEncoder::new(&method(), None);
        assert_eq!(
            encoder.call_with(&Fixed, &[Token::uint(5u8)]).unwrap(),
            vec![0xaa, 0xbb, 0xcc, 0xdd, 1]
        );
    }

    #[test]
    fn later_definitions_shadow_earlier_ones() {
        let map = FieldMap::from_entries([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), None);
        assert_eq!(map.keys(), ["a", "b"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.entries().count(), 3);
    }

    #[test]
    fn only_the_last_definition_is_visible() {
        let map = FieldMap::from_entries([("a", 1), ("b", 2), ("a", 3), ("a", 4)]);
        let shadowed: Vec<bool> = (0..4).map(|i| map.is_shadowed(i)).collect();
        assert_eq!(shadowed, [true, false, true, false]);
        assert!(!map.is_shadowed(4));
        assert_eq!(map.get("a"), Some(&4));
        assert_eq!(map.keys(), ["a", "b"]);
    }

    #[test]
    fn missing_keys_are_not_defined() {
        let map: EncoderObject = FieldMap::new();
        assert_eq!(
            map.call("Event", &[]),
            Err(CallError::NotDefined {
                name: "Event".into()
            })
        );
    }
}
