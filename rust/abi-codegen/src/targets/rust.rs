//! Rust code generation for contract encoders.
//!
//! Generates free functions (or an [`FnTable`](crate::FnTable) expression)
//! that depend only on this crate at runtime. Intended for use in build.rs
//! scripts:
//!
//! ```ignore
//! let interface = abi_schema::Interface::from_json(&std::fs::read_to_string("Token.abi.json")?)?;
//! let code = abi_codegen::targets::rust::generate_many(&interface, "encode_");
//! std::fs::write(out_dir.join("token_encoders.rs"), code)?;
//! ```
//!
//! Every generated function has the signature of [`EncodeFn`](crate::EncodeFn).
//! Overloads are emitted under the same name, like every other target. In
//! `generate_many` output every definition but the last one of a name is
//! marked `#[cfg(any())]`, so only the last definition is compiled.

use std::borrow::Cow;
use std::fmt;

use abi_schema::{Interface, MethodDescriptor};
use codegen::{Function, Scope};

use crate::code_writer::CodeWriter;
use crate::encoder::{EncoderObject, EncoderSet, MethodEncoder};
use crate::render::{
    documented_params, render_string, rust_ident, rust_string, rust_string_array,
};
use crate::{GenerateError, build_many, build_object, build_one, cw_writeln};

/// Options for Rust code generation.
#[derive(Debug, Clone)]
pub struct RustCodegenOptions {
    /// Emit a `tracing::trace!` event each time a generated encoder runs.
    ///
    /// Requires the `tracing` crate in the consuming crate.
    pub tracing: bool,

    /// Path under which the generated code finds this crate.
    pub runtime_crate: Cow<'static, str>,
}

impl Default for RustCodegenOptions {
    fn default() -> Self {
        Self {
            tracing: false,
            runtime_crate: Cow::Borrowed("::abi_codegen"),
        }
    }
}

pub fn generate_one(method: &MethodDescriptor, name_prefix: &str) -> Result<String, GenerateError> {
    generate_one_with_options(method, name_prefix, &RustCodegenOptions::default())
}

pub fn generate_one_with_options(
    method: &MethodDescriptor,
    name_prefix: &str,
    options: &RustCodegenOptions,
) -> Result<String, GenerateError> {
    let encoder = build_one(method, name_prefix)?;
    let mut scope = Scope::new();
    push_function(&mut scope, &encoder, options);
    Ok(finish(scope))
}

pub fn generate_many(interface: &Interface, name_prefix: &str) -> String {
    generate_many_with_options(interface, name_prefix, &RustCodegenOptions::default())
}

pub fn generate_many_with_options(
    interface: &Interface,
    name_prefix: &str,
    options: &RustCodegenOptions,
) -> String {
    render_set(&build_many(interface, name_prefix), options)
}

pub fn generate_object(interface: &Interface) -> String {
    generate_object_with_options(interface, &RustCodegenOptions::default())
}

pub fn generate_object_with_options(interface: &Interface, options: &RustCodegenOptions) -> String {
    render_object(&build_object(interface), options)
}

/// Render every definition of `set` as a `pub fn`. Shadowed definitions are
/// kept in place but compiled out.
pub fn render_set(set: &EncoderSet, options: &RustCodegenOptions) -> String {
    tracing::debug!(
        target_lang = "rust",
        definitions = set.entries().count(),
        "rendering encoder set"
    );
    let mut scope = Scope::new();
    for (index, (_, encoder)) in set.entries().enumerate() {
        let function = push_function(&mut scope, encoder, options);
        if set.is_shadowed(index) {
            function.attr("cfg(any())");
        }
    }
    finish(scope)
}

/// Render `object` as a block expression evaluating to an `FnTable`.
pub fn render_object(object: &EncoderObject, options: &RustCodegenOptions) -> String {
    tracing::debug!(
        target_lang = "rust",
        fields = object.len(),
        "rendering encoder object"
    );
    let rt = &options.runtime_crate;
    render_string(4, |w| {
        w.writeln("{")?;
        {
            let _indent = w.indent();
            cw_writeln!(w, "let mut encoders = {rt}::FnTable::new();")?;
            for (key, encoder) in object.entries() {
                write_closure(w, key, encoder, options)?;
            }
            w.writeln("encoders")?;
        }
        w.writeln("}")
    })
}

fn finish(scope: Scope) -> String {
    let mut code = scope.to_string();
    if !code.is_empty() {
        code.push('\n');
    }
    code
}

fn push_function<'a>(
    scope: &'a mut Scope,
    encoder: &MethodEncoder,
    options: &RustCodegenOptions,
) -> &'a mut Function {
    let name = rust_ident(encoder.callable_name().unwrap_or(encoder.method_name()));
    let (arg_ty, ret_ty) = signature_types(options);

    let function = scope.new_fn(&name);
    function.vis("pub");
    function.doc(&doc_text(encoder));
    function.allow("non_snake_case");
    function.arg("args", arg_ty);
    function.ret(ret_ty);
    for line in body_lines(encoder, options) {
        function.line(line);
    }
    function
}

fn write_closure<W: fmt::Write>(
    w: &mut CodeWriter<W>,
    key: &str,
    encoder: &MethodEncoder,
    options: &RustCodegenOptions,
) -> fmt::Result {
    let (arg_ty, ret_ty) = signature_types(options);
    w.doc_comment("//", &doc_text(encoder))?;
    cw_writeln!(
        w,
        "encoders.push({}, |args: {arg_ty}| -> {ret_ty} {{",
        rust_string(key)
    )?;
    {
        let _indent = w.indent();
        for line in body_lines(encoder, options) {
            w.writeln(&line)?;
        }
    }
    w.writeln("});")
}

fn signature_types(options: &RustCodegenOptions) -> (String, String) {
    let rt = &options.runtime_crate;
    (
        format!("&[{rt}::wire::Token]"),
        format!("::std::result::Result<::std::vec::Vec<u8>, {rt}::CallError>"),
    )
}

fn doc_text(encoder: &MethodEncoder) -> String {
    let mut doc = format!("Encodes calls to `{}`.\n", encoder.method_name());
    let params = documented_params(encoder);
    if !params.is_empty() {
        doc.push_str("\n# Parameters\n\n");
        for (name, ty) in params {
            doc.push_str(&format!("- `{name}`: `{ty}`\n"));
        }
    }
    doc.push_str("\nReturns the method identifier followed by the encoded arguments.");
    doc
}

/// Statements shared by the function and closure forms.
fn body_lines(encoder: &MethodEncoder, options: &RustCodegenOptions) -> Vec<String> {
    let rt = &options.runtime_crate;
    let method = rust_string(encoder.method_name());
    let arity = encoder.arity();
    let types = rust_string_array(encoder.parameter_types());

    let mut lines = Vec::new();
    if options.tracing {
        lines.push(format!(
            "tracing::trace!(method = {method}, args = args.len(), \"encoding call\");"
        ));
    }
    lines.extend([
        format!("if args.len() != {arity} {{"),
        format!("    return Err({rt}::CallError::ArityMismatch {{"),
        format!("        method: {method}.to_string(),"),
        format!("        expected: {arity},"),
        "        actual: args.len(),".to_string(),
        "    });".to_string(),
        "}".to_string(),
        format!("let types: [&str; {arity}] = {types};"),
        format!("let mut payload = {rt}::wire::method_id({method}, &types)?.to_vec();"),
        format!("payload.extend({rt}::wire::encode_arguments(&types, args)?);"),
        "Ok(payload)".to_string(),
    ]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    use abi_schema::{EntryKind, Param};

    fn method() -> MethodDescriptor {
        MethodDescriptor::function("Method", vec![Param::new("x", "uint256")])
    }

    #[test]
    fn one_function() {
        let code = generate_one(&method(), crate::DEFAULT_PREFIX).unwrap();
        assert!(code.contains("/// Encodes calls to `Method`."));
        assert!(code.contains("/// - `x`: `uint256`"));
        assert!(code.contains("#[allow(non_snake_case)]"));
        assert!(code.contains(
            "pub fn encode_Method(args: &[::abi_codegen::wire::Token]) -> ::std::result::Result<::std::vec::Vec<u8>, ::abi_codegen::CallError> {"
        ));
        assert!(code.contains("if args.len() != 1 {"));
        assert!(code.contains("let types: [&str; 1] = [\"uint256\"];"));
        assert!(code.contains("::abi_codegen::wire::method_id(\"Method\", &types)?"));
        assert!(!code.contains("tracing::trace!"));
    }

    #[test]
    fn parameterless_methods_have_no_parameter_section() {
        let ping = MethodDescriptor::function("ping", vec![]);
        let code = generate_one(&ping, crate::DEFAULT_PREFIX).unwrap();
        assert!(!code.contains("# Parameters"));
        assert!(code.contains("let types: [&str; 0] = [];"));
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        let method = MethodDescriptor::function("type", vec![]);
        let code = generate_one(&method, "").unwrap();
        assert!(code.contains("pub fn r#type(args:"));
        assert!(code.contains("method_id(\"type\", &types)"));
    }

    #[test]
    fn non_functions_produce_no_text() {
        let ctor = MethodDescriptor::new(EntryKind::Constructor, "", vec![]);
        assert!(matches!(
            generate_one(&ctor, crate::DEFAULT_PREFIX),
            Err(GenerateError::InvalidMethodKind {
                kind: EntryKind::Constructor,
                ..
            })
        ));
    }

    #[test]
    fn options_change_paths_and_tracing() {
        let options = RustCodegenOptions {
            tracing: true,
            runtime_crate: "crate::abi".into(),
        };
        let code = generate_one_with_options(&method(), "e_", &options).unwrap();
        assert!(code.contains("pub fn e_Method(args: &[crate::abi::wire::Token])"));
        assert!(code.contains("tracing::trace!(method = \"Method\", args = args.len(), \"encoding call\");"));
    }

    #[test]
    fn many_skips_non_functions() {
        let interface = Interface::new(vec![
            MethodDescriptor::function("a", vec![]),
            MethodDescriptor::new(EntryKind::Event, "Changed", vec![]),
            MethodDescriptor::function("b", vec![Param::new("flag", "bool")]),
        ]);
        let code = generate_many(&interface, crate::DEFAULT_PREFIX);
        assert_eq!(code.matches("pub fn ").count(), 2);
        assert!(code.find("pub fn encode_a(").unwrap() < code.find("pub fn encode_b(").unwrap());
        assert!(!code.contains("Changed"));
        assert_eq!(generate_many(&Interface::default(), crate::DEFAULT_PREFIX), "");
    }

    #[test]
    fn many_compiles_out_shadowed_overloads() {
        let interface = Interface::new(vec![
            MethodDescriptor::function(
                "Method",
                vec![Param::new("x", "uint256"), Param::new("y", "uint256")],
            ),
            MethodDescriptor::function("ping", vec![]),
            method(),
        ]);
        let code = generate_many(&interface, crate::DEFAULT_PREFIX);

        assert_eq!(code.matches("pub fn encode_Method(").count(), 2);
        assert_eq!(code.matches("#[cfg(any())]").count(), 1);

        let disabled = code.find("#[cfg(any())]").unwrap();
        let first = code.find("pub fn encode_Method(").unwrap();
        let ping = code.find("pub fn encode_ping(").unwrap();
        assert!(disabled < first);
        assert!(first < ping);
        assert!(code.find("args.len() != 2").unwrap() < ping);
        assert!(code.rfind("args.len() != 1").unwrap() > ping);
    }

    #[test]
    fn object_pushes_every_definition() {
        let interface = Interface::new(vec![
            MethodDescriptor::function(
                "Method",
                vec![Param::new("x", "uint256"), Param::new("y", "uint256")],
            ),
            MethodDescriptor::new(EntryKind::Event, "Event", vec![]),
            method(),
        ]);
        let code = generate_object(&interface);
        assert!(code.starts_with("{\n    let mut encoders = ::abi_codegen::FnTable::new();\n"));
        assert_eq!(code.matches("encoders.push(\"Method\", |args: &[::abi_codegen::wire::Token]|").count(), 2);
        assert!(code.contains("    // Encodes calls to `Method`.\n"));
        assert!(code.contains("        if args.len() != 2 {\n"));
        assert!(code.ends_with("    encoders\n}\n"));
        assert!(!code.contains("Event"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let interface = Interface::new(vec![method(), MethodDescriptor::function("ping", vec![])]);
        assert_eq!(
            generate_many(&interface, crate::DEFAULT_PREFIX),
            generate_many(&interface, crate::DEFAULT_PREFIX)
        );
        assert_eq!(generate_object(&interface), generate_object(&interface));
    }
}
