use std::fmt;

use crate::code_writer::CodeWriter;
use crate::encoder::MethodEncoder;

/// Run `body` against a fresh writer and return what it wrote.
pub(crate) fn render_string<F>(indent_spaces: usize, body: F) -> String
where
    F: FnOnce(&mut CodeWriter<&mut String>) -> fmt::Result,
{
    let mut out = String::new();
    {
        let mut w = CodeWriter::with_indent_spaces(&mut out, indent_spaces);
        // Only a failing Display impl can make writing into a String fail.
        body(&mut w).expect("rendering into a String");
    }
    out
}

/// `(name, type)` pairs for documentation. Unnamed parameters are shown
/// by position.
pub(crate) fn documented_params(encoder: &MethodEncoder) -> Vec<(String, &str)> {
    encoder
        .parameters()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let name = if p.name.is_empty() {
                format!("arg{i}")
            } else {
                p.name.clone()
            };
            (name, p.ty.as_str())
        })
        .collect()
}

/// A single-quoted JavaScript string literal.
pub(crate) fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// A compact JSON array of strings, as `JSON.stringify` would print it.
pub(crate) fn json_string_array(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|s| json_string(s)).collect();
    format!("[{}]", items.join(","))
}

fn json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c < ' ' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A Rust string literal.
pub(crate) fn rust_string(s: &str) -> String {
    format!("{s:?}")
}

/// A Rust array literal of string literals.
pub(crate) fn rust_string_array(items: &[String]) -> String {
    let items: Vec<String> = items.iter().map(|s| rust_string(s)).collect();
    format!("[{}]", items.join(", "))
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Make `name` usable as a Rust identifier.
pub(crate) fn rust_ident(name: &str) -> String {
    match name {
        // These cannot be raw identifiers.
        "self" | "Self" | "super" | "crate" | "_" => format!("{name}_"),
        n if RUST_KEYWORDS.contains(&n) => format!("r#{n}"),
        n => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string("Method"), "'Method'");
        assert_eq!(js_string("it's"), "'it\\'s'");
    }

    #[test]
    fn json_arrays_are_compact() {
        assert_eq!(
            json_string_array(&["uint256".into(), "bytes".into()]),
            r#"["uint256","bytes"]"#
        );
        assert_eq!(json_string_array(&[]), "[]");
    }

    #[test]
    fn json_strings_escape_control_characters() {
        assert_eq!(
            json_string_array(&["a\"b\\c".into(), "x\ny\tz".into(), "\u{1}\u{8}".into()]),
            r#"["a\"b\\c","x\ny\tz","\u0001\b"]"#
        );
    }

    #[test]
    fn rust_literals() {
        assert_eq!(
            rust_string_array(&["uint256".into(), "(bool,string)".into()]),
            r#"["uint256", "(bool,string)"]"#
        );
    }

    #[test]
    fn rust_identifiers() {
        assert_eq!(rust_ident("transfer"), "transfer");
        assert_eq!(rust_ident("type"), "r#type");
        assert_eq!(rust_ident("self"), "self_");
    }
}
