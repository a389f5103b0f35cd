//! JavaScript code generation.
//!
//! Emits plain functions that delegate to an ABI encoding module loaded with
//! `require` (`ethereumjs-abi` by default):
//!
//! ```text
//! /** Method that encodes calls to Method
//!  * @param {uint256} x
//!  * @returns {Buffer} buffer with encoded arguments
//!  */
//! function encode_Method (...args) {
//!   ...
//!   return Buffer.concat([Abi.methodID('Method', ["uint256"]), Abi.rawEncode(["uint256"], args)])
//! }
//! ```
//!
//! The emitted definitions are independent top-level functions, so when two
//! overloads share a name the one evaluated last replaces the other.

use std::borrow::Cow;
use std::fmt;

use abi_schema::{Interface, MethodDescriptor};

use crate::code_writer::CodeWriter;
use crate::encoder::{EncoderObject, EncoderSet, MethodEncoder};
use crate::render::{documented_params, js_string, json_string_array, render_string};
use crate::{GenerateError, build_many, build_object, build_one, cw_writeln};

/// Options for JavaScript code generation.
#[derive(Debug, Clone)]
pub struct JsCodegenOptions {
    /// Module passed to `require` for `methodID` and `rawEncode`.
    pub encoder_module: Cow<'static, str>,
}

impl Default for JsCodegenOptions {
    fn default() -> Self {
        Self {
            encoder_module: Cow::Borrowed("ethereumjs-abi"),
        }
    }
}

pub fn generate_one(method: &MethodDescriptor, name_prefix: &str) -> Result<String, GenerateError> {
    generate_one_with_options(method, name_prefix, &JsCodegenOptions::default())
}

pub fn generate_one_with_options(
    method: &MethodDescriptor,
    name_prefix: &str,
    options: &JsCodegenOptions,
) -> Result<String, GenerateError> {
    let encoder = build_one(method, name_prefix)?;
    Ok(render_encoder(&encoder, options))
}

pub fn generate_many(interface: &Interface, name_prefix: &str) -> String {
    generate_many_with_options(interface, name_prefix, &JsCodegenOptions::default())
}

pub fn generate_many_with_options(
    interface: &Interface,
    name_prefix: &str,
    options: &JsCodegenOptions,
) -> String {
    render_set(&build_many(interface, name_prefix), options)
}

pub fn generate_object(interface: &Interface) -> String {
    generate_object_with_options(interface, &JsCodegenOptions::default())
}

pub fn generate_object_with_options(interface: &Interface, options: &JsCodegenOptions) -> String {
    render_object(&build_object(interface), options)
}

/// Render one encoder: a function declaration if it has a callable name,
/// otherwise an anonymous function expression.
pub fn render_encoder(encoder: &MethodEncoder, options: &JsCodegenOptions) -> String {
    render_string(2, |w| write_declaration(w, encoder, options))
}

/// Render every definition of `set`, shadowed ones included.
pub fn render_set(set: &EncoderSet, options: &JsCodegenOptions) -> String {
    tracing::debug!(
        target_lang = "javascript",
        definitions = set.entries().count(),
        "rendering encoder set"
    );
    render_string(2, |w| {
        for (_, encoder) in set.entries() {
            write_declaration(w, encoder, options)?;
        }
        Ok(())
    })
}

/// Render `object` as a parenthesized object literal, one field per
/// definition.
pub fn render_object(object: &EncoderObject, options: &JsCodegenOptions) -> String {
    tracing::debug!(
        target_lang = "javascript",
        fields = object.len(),
        "rendering encoder object"
    );
    render_string(2, |w| {
        w.writeln("({")?;
        {
            let _indent = w.indent();
            for (key, encoder) in object.entries() {
                write_method(w, encoder, &format!("{key}: function (...args)"), ",", options)?;
            }
        }
        w.writeln("})")
    })
}

fn write_declaration<W: fmt::Write>(
    w: &mut CodeWriter<W>,
    encoder: &MethodEncoder,
    options: &JsCodegenOptions,
) -> fmt::Result {
    let header = match encoder.callable_name() {
        Some(name) => format!("function {name} (...args)"),
        None => "function (...args)".to_string(),
    };
    write_method(w, encoder, &header, "", options)
}

/// JSDoc, then `header {` body `}closer`.
fn write_method<W: fmt::Write>(
    w: &mut CodeWriter<W>,
    encoder: &MethodEncoder,
    header: &str,
    closer: &str,
    options: &JsCodegenOptions,
) -> fmt::Result {
    let mut doc = vec![format!(
        "Method that encodes calls to {}",
        encoder.method_name()
    )];
    for (name, ty) in documented_params(encoder) {
        doc.push(format!("@param {{{ty}}} {name}"));
    }
    doc.push("@returns {Buffer} buffer with encoded arguments".to_string());
    w.jsdoc(&doc)?;

    let name = js_string(encoder.method_name());
    let types = json_string_array(encoder.parameter_types());
    let arity = encoder.arity();

    w.block_with(header, closer, |w| {
        w.block(&format!("if (args.length !== {arity})"), |w| {
            cw_writeln!(
                w,
                "throw Error('arity mismatch: ' + {name} + ' expects {arity} arguments, got ' + args.length)"
            )
        })?;
        cw_writeln!(w, "const Abi = require({})", js_string(&options.encoder_module))?;
        cw_writeln!(
            w,
            "return Buffer.concat([Abi.methodID({name}, {types}), Abi.rawEncode({types}, args)])"
        )
    })
}
