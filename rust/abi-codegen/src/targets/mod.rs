//! Source renderers.
//!
//! Each target offers the same three operations:
//!
//! - `generate_one(method, prefix)`: one documented callable named
//!   `prefix + method.name`, or [`GenerateError::InvalidMethodKind`] for a
//!   non-function descriptor.
//! - `generate_many(interface, prefix)`: one callable per function entry, in
//!   interface order, concatenated.
//! - `generate_object(interface)`: one object literal whose fields are
//!   anonymous callables keyed by bare method name.
//!
//! Output is a pure function of the input: rendering twice yields identical
//! text.
//!
//! [`GenerateError::InvalidMethodKind`]: crate::GenerateError::InvalidMethodKind

pub mod javascript;
pub mod rust;
