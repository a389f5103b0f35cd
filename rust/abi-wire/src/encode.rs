//! Head/tail argument encoding.
//!
//! Every value occupies one or more 32-byte words. Static values are written
//! in place; dynamic values (`bytes`, `string`, `T[]`, and fixed arrays or
//! tuples that contain them) put an offset in the head and their contents in
//! the tail. Offsets are relative to the start of the enclosing sequence.

use crate::{ParamType, Token, WireError, Word};

/// Encode `tokens` positionally against `types`.
pub fn encode_tokens(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, WireError> {
    if types.len() != tokens.len() {
        return Err(WireError::LengthMismatch {
            expected: types.len(),
            actual: tokens.len(),
        });
    }
    encode_sequence(types, tokens, true)
}

fn encode_sequence(
    types: &[ParamType],
    tokens: &[Token],
    top_level: bool,
) -> Result<Vec<u8>, WireError> {
    let head_len: usize = types.iter().map(ParamType::head_len).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for (index, (ty, token)) in types.iter().zip(tokens).enumerate() {
        let encoded = encode_value(ty, token).map_err(|error| {
            if top_level {
                WireError::Argument {
                    index,
                    error: Box::new(error),
                }
            } else {
                error
            }
        })?;
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }

    head.extend(tail);
    Ok(head)
}

fn encode_value(ty: &ParamType, token: &Token) -> Result<Vec<u8>, WireError> {
    match (ty, token) {
        (ParamType::Address, Token::Address(address)) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address);
            Ok(word.to_vec())
        }
        (ParamType::Bool, Token::Bool(value)) => {
            let mut word = [0u8; 32];
            word[31] = u8::from(*value);
            Ok(word.to_vec())
        }
        (ParamType::Uint(bits), Token::Uint(word)) => {
            let unused = 32 - bits / 8;
            if word[..unused].iter().any(|b| *b != 0) {
                return Err(WireError::OutOfRange { ty: ty.to_string() });
            }
            Ok(word.to_vec())
        }
        (ParamType::Int(bits), Token::Int(word)) => {
            let unused = 32 - bits / 8;
            if unused > 0 {
                let sign = if word[unused] & 0x80 != 0 { 0xff } else { 0x00 };
                if word[..unused].iter().any(|b| *b != sign) {
                    return Err(WireError::OutOfRange { ty: ty.to_string() });
                }
            }
            Ok(word.to_vec())
        }
        (ParamType::FixedBytes(n), Token::FixedBytes(bytes)) => {
            if bytes.len() != *n {
                return Err(WireError::FixedLength {
                    ty: ty.to_string(),
                    expected: *n,
                    actual: bytes.len(),
                });
            }
            Ok(right_padded(bytes))
        }
        (ParamType::Bytes, Token::Bytes(bytes)) => Ok(length_prefixed(bytes)),
        (ParamType::String, Token::String(s)) => Ok(length_prefixed(s.as_bytes())),
        (ParamType::Array(inner), Token::Array(items)) => {
            let types = vec![(**inner).clone(); items.len()];
            let mut out = usize_word(items.len()).to_vec();
            out.extend(encode_sequence(&types, items, false)?);
            Ok(out)
        }
        (ParamType::FixedArray(inner, n), Token::FixedArray(items) | Token::Array(items)) => {
            if items.len() != *n {
                return Err(WireError::FixedLength {
                    ty: ty.to_string(),
                    expected: *n,
                    actual: items.len(),
                });
            }
            let types = vec![(**inner).clone(); *n];
            encode_sequence(&types, items, false)
        }
        (ParamType::Tuple(types), Token::Tuple(items)) => {
            if items.len() != types.len() {
                return Err(WireError::FixedLength {
                    ty: ty.to_string(),
                    expected: types.len(),
                    actual: items.len(),
                });
            }
            encode_sequence(types, items, false)
        }
        (ty, token) => Err(WireError::TypeMismatch {
            expected: ty.to_string(),
            found: token.kind_name(),
        }),
    }
}

fn usize_word(value: usize) -> Word {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn right_padded(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.resize(bytes.len().div_ceil(32) * 32, 0);
    out
}

fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut out = usize_word(bytes.len()).to_vec();
    out.extend(right_padded(bytes));
    out
}
