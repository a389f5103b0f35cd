//! Argument values.

/// A 32-byte big-endian ABI word.
pub type Word = [u8; 32];

/// A value to be encoded against a [`ParamType`](crate::ParamType).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Address([u8; 20]),
    Bool(bool),
    /// Unsigned integer as a big-endian word.
    Uint(Word),
    /// Signed integer as a two's complement big-endian word.
    Int(Word),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Token>),
    FixedArray(Vec<Token>),
    Tuple(Vec<Token>),
}

impl Token {
    pub fn uint(value: impl Into<u128>) -> Self {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&value.into().to_be_bytes());
        Token::Uint(word)
    }

    pub fn int(value: impl Into<i128>) -> Self {
        let value = value.into();
        let mut word = if value < 0 { [0xff; 32] } else { [0u8; 32] };
        word[16..].copy_from_slice(&value.to_be_bytes());
        Token::Int(word)
    }

    /// Unsigned integer from up to 32 big-endian bytes. Returns `None` if
    /// `bytes` is longer than a word.
    pub fn uint_from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > 32 {
            return None;
        }
        let mut word = [0u8; 32];
        word[32 - bytes.len()..].copy_from_slice(bytes);
        Some(Token::Uint(word))
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Token::Bytes(bytes.into())
    }

    pub fn fixed_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Token::FixedBytes(bytes.into())
    }

    /// Short name of the token variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::Bool(_) => "bool",
            Token::Uint(_) => "uint",
            Token::Int(_) => "int",
            Token::FixedBytes(_) => "fixed bytes",
            Token::Bytes(_) => "bytes",
            Token::String(_) => "string",
            Token::Array(_) => "array",
            Token::FixedArray(_) => "fixed array",
            Token::Tuple(_) => "tuple",
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Token {
            fn from(value: $t) -> Self {
                Token::uint(value)
            }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Token {
            fn from(value: $t) -> Self {
                Token::int(value)
            }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128);
impl_from_signed!(i8, i16, i32, i64, i128);

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::String(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::String(value)
    }
}

impl From<[u8; 20]> for Token {
    fn from(value: [u8; 20]) -> Self {
        Token::Address(value)
    }
}
