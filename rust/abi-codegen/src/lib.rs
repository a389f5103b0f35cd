#![deny(unsafe_code)]

//! Generates standalone encoder functions from contract ABI descriptions.
//!
//! Given the method descriptors of a contract interface, this crate produces
//! one encoder per method. An encoder checks that it was called with as many
//! arguments as the method declares, then returns the 4-byte method
//! identifier followed by the ABI-encoded arguments.
//!
//! # Build, then render
//!
//! Generation happens in two steps:
//!
//! 1. [`build_one`], [`build_many`] and [`build_object`] turn descriptors into
//!    in-memory [`MethodEncoder`]s that can be called directly.
//! 2. The [`targets`] render those encoders as source text, for callers that
//!    want generated, inspectable code (a `build.rs`, a bundler step, ...).
//!
//! ```
//! use abi_codegen::{DEFAULT_PREFIX, build_one};
//! use abi_schema::{MethodDescriptor, Param};
//! use abi_wire::Token;
//!
//! let method = MethodDescriptor::function("Method", vec![Param::new("x", "uint256")]);
//! let encoder = build_one(&method, DEFAULT_PREFIX).unwrap();
//!
//! assert_eq!(encoder.callable_name(), Some("encode_Method"));
//! let payload = encoder.call(&[Token::uint(257u32)]).unwrap();
//! assert_eq!(&payload[..4], &[0x06, 0xf7, 0x36, 0x5f]);
//! ```
//!
//! # Overloads
//!
//! Methods that share a name are not told apart. Each one is generated under
//! the same callable name (`prefix + name`), so a later definition shadows
//! the earlier ones: in an [`EncoderSet`] or [`EncoderObject`] the last
//! definition wins, exactly as it would once the rendered source runs.

pub mod code_writer;
mod encoder;
mod error;
mod render;
pub mod targets;

pub use abi_wire as wire;

use abi_schema::{Interface, MethodDescriptor};

pub use encoder::{EncodeFn, EncoderObject, EncoderSet, FieldMap, FnTable, MethodEncoder};
pub use error::{CallError, GenerateError};

/// Prefix used for generated callable names unless told otherwise.
pub const DEFAULT_PREFIX: &str = "encode_";

/// Build the encoder for one function-kind method, named `name_prefix + name`.
pub fn build_one(
    method: &MethodDescriptor,
    name_prefix: &str,
) -> Result<MethodEncoder, GenerateError> {
    if !method.is_function() {
        return Err(GenerateError::InvalidMethodKind {
            name: method.name.clone(),
            kind: method.kind.clone(),
        });
    }
    let callable_name = format!("{name_prefix}{}", method.name);
    tracing::debug!(
        method = %method.name,
        callable = %callable_name,
        params = method.parameters.len(),
        "built method encoder"
    );
    Ok(MethodEncoder::new(method, Some(callable_name)))
}

/// Build one encoder per function-kind entry, in interface order.
///
/// Other entries are skipped without error.
pub fn build_many(interface: &Interface, name_prefix: &str) -> EncoderSet {
    let mut set = EncoderSet::new();
    for method in function_entries(interface) {
        let callable_name = format!("{name_prefix}{}", method.name);
        tracing::debug!(
            method = %method.name,
            callable = %callable_name,
            params = method.parameters.len(),
            "built method encoder"
        );
        set.push(
            callable_name.clone(),
            MethodEncoder::new(method, Some(callable_name)),
        );
    }
    set
}

/// Build anonymous encoders keyed by bare method name, in interface order.
pub fn build_object(interface: &Interface) -> EncoderObject {
    let mut object = EncoderObject::new();
    for method in function_entries(interface) {
        tracing::debug!(
            method = %method.name,
            params = method.parameters.len(),
            "built anonymous method encoder"
        );
        object.push(method.name.clone(), MethodEncoder::new(method, None));
    }
    object
}

fn function_entries(interface: &Interface) -> impl Iterator<Item = &MethodDescriptor> {
    interface.entries.iter().filter(|method| {
        if !method.is_function() {
            tracing::trace!(kind = %method.kind, name = %method.name, "skipping non-function entry");
        }
        method.is_function()
    })
}
