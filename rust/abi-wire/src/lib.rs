#![deny(unsafe_code)]

//! Contract ABI method identifiers and argument encoding.
//!
//! This is the encoding collaborator that generated encoders call into. It
//! provides exactly two capabilities:
//!
//! - [`method_id`]: the 4-byte identifier of a method, the first four bytes
//!   of the keccak-256 hash of its canonical signature `name(t1,t2,...)`.
//! - [`encode_arguments`]: the positional, type-directed encoding of call
//!   arguments.
//!
//! A call payload is the identifier followed by the encoded arguments:
//!
//! ```
//! use abi_wire::{Token, encode_arguments, method_id};
//!
//! let types = ["uint256"];
//! let mut payload = method_id("Method", &types).unwrap().to_vec();
//! payload.extend(encode_arguments(&types, &[Token::uint(257u32)]).unwrap());
//!
//! assert_eq!(
//!     hex::encode(&payload),
//!     "06f7365f0000000000000000000000000000000000000000000000000000000000000101"
//! );
//! ```

use std::fmt;

use sha3::{Digest, Keccak256};

mod encode;
mod token;
mod types;

pub use token::{Token, Word};
pub use types::ParamType;

/// Errors raised while deriving identifiers or encoding arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The type name is not a valid ABI type.
    InvalidType(String),
    /// The number of arguments differs from the number of types.
    LengthMismatch { expected: usize, actual: usize },
    /// A value's kind does not match its declared type.
    TypeMismatch {
        expected: String,
        found: &'static str,
    },
    /// A numeric value does not fit its declared width.
    OutOfRange { ty: String },
    /// A fixed-size value (`bytesN`, `T[N]`, tuple) has the wrong length.
    FixedLength {
        ty: String,
        expected: usize,
        actual: usize,
    },
    /// An error encoding the argument at `index`.
    Argument { index: usize, error: Box<WireError> },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::InvalidType(ty) => write!(f, "invalid ABI type `{ty}`"),
            WireError::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
            WireError::TypeMismatch { expected, found } => {
                write!(f, "expected a value of type {expected}, found {found}")
            }
            WireError::OutOfRange { ty } => write!(f, "value out of range for {ty}"),
            WireError::FixedLength {
                ty,
                expected,
                actual,
            } => write!(f, "{ty} expects {expected} elements, got {actual}"),
            WireError::Argument { index, error } => write!(f, "argument {index}: {error}"),
        }
    }
}

impl std::error::Error for WireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WireError::Argument { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// A 4-byte method identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector(pub [u8; 4]);

impl Selector {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Canonical signature `name(t1,t2,...)` with type aliases resolved.
pub fn signature<S: AsRef<str>>(name: &str, types: &[S]) -> Result<String, WireError> {
    let types = parse_types(types)?;
    let types: Vec<String> = types.iter().map(ToString::to_string).collect();
    Ok(format!("{name}({})", types.join(",")))
}

/// Derive the method identifier for `name` called with `types`.
pub fn method_id<S: AsRef<str>>(name: &str, types: &[S]) -> Result<Selector, WireError> {
    let hash = Keccak256::digest(signature(name, types)?.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    Ok(Selector(selector))
}

/// Encode `args` positionally against `types`.
pub fn encode_arguments<S: AsRef<str>>(types: &[S], args: &[Token]) -> Result<Vec<u8>, WireError> {
    encode::encode_tokens(&parse_types(types)?, args)
}

fn parse_types<S: AsRef<str>>(types: &[S]) -> Result<Vec<ParamType>, WireError> {
    types.iter().map(|t| ParamType::parse(t.as_ref())).collect()
}

/// The two capabilities a generated encoder needs from its encoding backend.
pub trait AbiEncoder {
    fn derive_identifier(&self, name: &str, parameter_types: &[String])
    -> Result<Selector, WireError>;

    fn encode_arguments(
        &self,
        parameter_types: &[String],
        args: &[Token],
    ) -> Result<Vec<u8>, WireError>;
}

/// The standard keccak-256 / head-tail ABI encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEncoder;

impl AbiEncoder for StandardEncoder {
    fn derive_identifier(
        &self,
        name: &str,
        parameter_types: &[String],
    ) -> Result<Selector, WireError> {
        method_id(name, parameter_types)
    }

    fn encode_arguments(
        &self,
        parameter_types: &[String],
        args: &[Token],
    ) -> Result<Vec<u8>, WireError> {
        encode_arguments(parameter_types, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_method_ids() {
        let cases: &[(&str, &[&str], &str)] = &[
            ("Method", &["uint256"], "06f7365f"),
            ("Method", &["uint256", "uint256"], "1f6e054f"),
            ("transfer", &["address", "uint256"], "a9059cbb"),
            ("balanceOf", &["address"], "70a08231"),
            ("baz", &["uint32", "bool"], "cdcd77c0"),
            ("sam", &["bytes", "bool", "uint256[]"], "a5643bf2"),
        ];
        for (name, types, expected) in cases {
            assert_eq!(method_id(name, *types).unwrap().to_string(), *expected, "{name}");
        }
    }

    #[test]
    fn aliases_hash_like_canonical_names() {
        assert_eq!(
            method_id("Method", &["uint"]).unwrap(),
            method_id("Method", &["uint256"]).unwrap()
        );
        assert_eq!(
            signature("f", &["uint", "int[]", "byte"]).unwrap(),
            "f(uint256,int256[],bytes1)"
        );
    }

    #[test]
    fn invalid_types_surface() {
        assert_eq!(
            method_id("f", &["uint7"]),
            Err(WireError::InvalidType("uint7".into()))
        );
        assert_eq!(
            encode_arguments(&["nope"], &[true.into()]),
            Err(WireError::InvalidType("nope".into()))
        );
    }

    #[test]
    fn standard_encoder_delegates() {
        let types = vec!["uint256".to_string()];
        let encoder = StandardEncoder;
        assert_eq!(
            encoder.derive_identifier("Method", &types).unwrap(),
            Selector([0x06, 0xf7, 0x36, 0x5f])
        );
        let encoded = encoder.encode_arguments(&types, &[Token::uint(258u32)]).unwrap();
        assert_eq!(encoded[30..], [0x01, 0x02]);
    }

    #[test]
    fn argument_errors_chain_to_source() {
        use std::error::Error as _;

        let err = encode_arguments(&["bool"], &[1u8.into()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "argument 0: expected a value of type bool, found uint"
        );
        assert!(err.source().is_some());
    }
}
