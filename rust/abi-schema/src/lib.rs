#![deny(unsafe_code)]

//! Interface description model for contract ABI encoder generation.
//!
//! An [`Interface`] is the ordered list of entries found in a contract's JSON
//! ABI. Only entries whose [`EntryKind`] is [`EntryKind::Function`] describe
//! callable methods; everything else (events, constructors, errors, ...) is
//! carried along so that generators can decide what to skip.
//!
//! ```
//! use abi_schema::Interface;
//!
//! let interface = Interface::from_json(r#"[
//!     {"type": "function", "name": "Method", "inputs": [{"name": "x", "type": "uint256"}]},
//!     {"type": "event", "name": "Event", "inputs": []}
//! ]"#).unwrap();
//!
//! assert_eq!(interface.entries.len(), 2);
//! assert_eq!(interface.functions().count(), 1);
//! ```

use std::fmt;

mod json;

pub use json::SchemaError;

/// Tag distinguishing callable methods from the other kinds of ABI entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Function,
    Constructor,
    Event,
    Error,
    Fallback,
    Receive,
    /// The entry carried no `type` tag.
    Untagged,
    /// Any tag this crate does not know about, kept verbatim.
    Other(String),
}

impl EntryKind {
    /// Parse the JSON `type` tag of an ABI entry.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "function" => EntryKind::Function,
            "constructor" => EntryKind::Constructor,
            "event" => EntryKind::Event,
            "error" => EntryKind::Error,
            "fallback" => EntryKind::Fallback,
            "receive" => EntryKind::Receive,
            other => EntryKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntryKind::Function => "function",
            EntryKind::Constructor => "constructor",
            EntryKind::Event => "event",
            EntryKind::Error => "error",
            EntryKind::Fallback => "fallback",
            EntryKind::Receive => "receive",
            EntryKind::Untagged => "untagged",
            EntryKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name. May be empty; ABI JSON does not require names.
    pub name: String,

    /// Canonical type name understood by the encoder (e.g. `uint256`,
    /// `bytes`, `(address,uint256)[]`).
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// One entry of a contract interface.
///
/// Overloads share a `name`; the order of `parameters` defines both the
/// signature used to derive the method identifier and the positional order
/// of arguments at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub kind: EntryKind,
    pub name: String,
    pub parameters: Vec<Param>,
}

impl MethodDescriptor {
    /// Build a function-kind descriptor.
    pub fn function(name: impl Into<String>, parameters: Vec<Param>) -> Self {
        Self {
            kind: EntryKind::Function,
            name: name.into(),
            parameters,
        }
    }

    /// Build a descriptor of any kind.
    pub fn new(kind: EntryKind, name: impl Into<String>, parameters: Vec<Param>) -> Self {
        Self {
            kind,
            name: name.into(),
            parameters,
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == EntryKind::Function
    }

    /// Parameter type names, in declaration order.
    pub fn parameter_types(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.ty.clone()).collect()
    }
}

/// An ordered interface description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    pub entries: Vec<MethodDescriptor>,
}

impl Interface {
    pub fn new(entries: Vec<MethodDescriptor>) -> Self {
        Self { entries }
    }

    /// Load an interface from a JSON ABI array.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        json::parse_interface(json)
    }

    /// Function-kind entries, in interface order.
    pub fn functions(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.entries.iter().filter(|m| m.is_function())
    }
}

impl FromIterator<MethodDescriptor> for Interface {
    fn from_iter<T: IntoIterator<Item = MethodDescriptor>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_kind_tags() {
        for tag in [
            "function",
            "constructor",
            "event",
            "error",
            "fallback",
            "receive",
        ] {
            assert_eq!(EntryKind::from_tag(tag).as_str(), tag);
        }
        assert_eq!(
            EntryKind::from_tag("modifier"),
            EntryKind::Other("modifier".into())
        );
    }

    #[test]
    fn parameter_types_use_declared_order() {
        let method = MethodDescriptor::function(
            "transfer",
            vec![Param::new("to", "address"), Param::new("amount", "uint256")],
        );
        assert_eq!(method.parameter_types(), vec!["address", "uint256"]);
    }

    #[test]
    fn functions_skips_other_kinds() {
        let interface: Interface = [
            MethodDescriptor::new(EntryKind::Event, "Transfer", vec![]),
            MethodDescriptor::function("a", vec![]),
            MethodDescriptor::new(EntryKind::Constructor, "", vec![]),
            MethodDescriptor::function("b", vec![]),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = interface.functions().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
