use std::fmt;

use abi_schema::EntryKind;
use abi_wire::WireError;

/// Errors raised while generating encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Single-method generation was asked to emit a non-function entry.
    InvalidMethodKind { name: String, kind: EntryKind },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidMethodKind { name, kind } => {
                write!(f, "not a function: {name} (kind {kind})")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Errors raised by a generated encoder when it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The number of arguments differs from the method's parameter count.
    ///
    /// Overloads are not resolved: an encoder only ever accepts the arity of
    /// the definition it was generated from.
    ArityMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },
    /// No encoder is defined under this name.
    NotDefined { name: String },
    /// The encoding backend rejected the arguments or parameter types.
    Encoding(WireError),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::ArityMismatch {
                method,
                expected,
                actual,
            } => write!(
                f,
                "arity mismatch: {method} expects {expected} arguments, got {actual}"
            ),
            CallError::NotDefined { name } => write!(f, "{name} is not defined"),
            CallError::Encoding(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallError::Encoding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WireError> for CallError {
    fn from(err: WireError) -> Self {
        CallError::Encoding(err)
    }
}
