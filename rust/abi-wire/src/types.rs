//! Canonical ABI type names.

use std::fmt;

use crate::WireError;

/// A parsed ABI parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    Bool,
    /// `uintN`, with `N` in bits.
    Uint(usize),
    /// `intN`, with `N` in bits.
    Int(usize),
    /// `bytesN`, with `N` in bytes.
    FixedBytes(usize),
    Bytes,
    String,
    Array(Box<ParamType>),
    FixedArray(Box<ParamType>, usize),
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Parse a type name. Aliases (`uint`, `int`, `byte`) resolve to their
    /// canonical form, so `Display` always prints the name used for hashing.
    pub fn parse(ty: &str) -> Result<Self, WireError> {
        let invalid = || WireError::InvalidType(ty.to_string());
        let s = ty.trim();

        if let Some(prefix) = s.strip_suffix(']') {
            let open = prefix.rfind('[').ok_or_else(invalid)?;
            let inner = Self::parse(&prefix[..open])?;
            let size = &prefix[open + 1..];
            return if size.is_empty() {
                Ok(ParamType::Array(Box::new(inner)))
            } else {
                let n = size.parse::<usize>().map_err(|_| invalid())?;
                Ok(ParamType::FixedArray(Box::new(inner), n))
            };
        }

        if let Some(body) = s.strip_prefix('(') {
            let body = body.strip_suffix(')').ok_or_else(invalid)?;
            return split_top_level(body)
                .ok_or_else(invalid)?
                .into_iter()
                .map(Self::parse)
                .collect::<Result<Vec<_>, _>>()
                .map(ParamType::Tuple);
        }

        match s {
            "address" => return Ok(ParamType::Address),
            "bool" => return Ok(ParamType::Bool),
            "string" => return Ok(ParamType::String),
            "bytes" => return Ok(ParamType::Bytes),
            "byte" => return Ok(ParamType::FixedBytes(1)),
            "uint" => return Ok(ParamType::Uint(256)),
            "int" => return Ok(ParamType::Int(256)),
            _ => {}
        }

        if let Some(bits) = s.strip_prefix("uint") {
            let bits = parse_width(bits).ok_or_else(invalid)?;
            return Ok(ParamType::Uint(bits));
        }
        if let Some(bits) = s.strip_prefix("int") {
            let bits = parse_width(bits).ok_or_else(invalid)?;
            return Ok(ParamType::Int(bits));
        }
        if let Some(len) = s.strip_prefix("bytes") {
            return match len.parse::<usize>() {
                Ok(n) if (1..=32).contains(&n) && !len.starts_with('0') => {
                    Ok(ParamType::FixedBytes(n))
                }
                _ => Err(invalid()),
            };
        }

        Err(invalid())
    }

    /// Whether values of this type live in the tail of the encoding.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(members) => members.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// Bytes this type occupies in the head of an enclosing sequence.
    pub(crate) fn head_len(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            ParamType::FixedArray(inner, n) => inner.head_len() * n,
            ParamType::Tuple(members) => members.iter().map(ParamType::head_len).sum(),
            _ => 32,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Int(bits) => write!(f, "int{bits}"),
            ParamType::FixedBytes(n) => write!(f, "bytes{n}"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::String => f.write_str("string"),
            ParamType::Array(inner) => write!(f, "{inner}[]"),
            ParamType::FixedArray(inner, n) => write!(f, "{inner}[{n}]"),
            ParamType::Tuple(members) => {
                f.write_str("(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn parse_width(bits: &str) -> Option<usize> {
    if bits.starts_with('0') {
        return None;
    }
    let bits = bits.parse::<usize>().ok()?;
    (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(bits)
}

/// Split a tuple body on commas that are not nested inside parentheses.
fn split_top_level(body: &str) -> Option<Vec<&str>> {
    if body.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&body[start..]);
    Some(parts)
}
