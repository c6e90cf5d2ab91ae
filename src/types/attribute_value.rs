use crate::error::TypeMismatch;

use indexmap::IndexMap;
use std::fmt;

/// A DynamoDB item: attribute name to value, in insertion order.
///
/// Equality ignores order, so two items holding the same attributes compare
/// equal however they were built.
pub type Item = IndexMap<String, AttributeValue>;

/// DynamoDB attribute value restricted to string, binary, list and map.
///
/// Exactly one variant is ever populated; the enum makes any other state
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// UTF-8 text.
    S(String),
    /// Opaque bytes (base64 on the wire).
    B(Vec<u8>),
    /// Ordered list of values.
    L(Vec<AttributeValue>),
    /// Nested attributes.
    M(Item),
}

/// Which variant an [`AttributeValue`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    S,
    B,
    L,
    M,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 4] = [Self::S, Self::B, Self::L, Self::M];

    /// The single JSON key identifying this kind on the wire.
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::B => "B",
            Self::L => "L",
            Self::M => "M",
        }
    }

    pub fn from_discriminator(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.discriminator() == key)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.discriminator())
    }
}

impl AttributeValue {
    pub fn of_string<T: Into<String>>(value: T) -> Self {
        Self::S(value.into())
    }

    pub fn of_binary<T: Into<Vec<u8>>>(value: T) -> Self {
        Self::B(value.into())
    }

    pub fn of_list<T: IntoIterator<Item = AttributeValue>>(values: T) -> Self {
        Self::L(values.into_iter().collect())
    }

    pub fn of_map<K, T>(entries: T) -> Self
    where
        K: Into<String>,
        T: IntoIterator<Item = (K, AttributeValue)>,
    {
        Self::M(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::S(_) => AttributeKind::S,
            Self::B(_) => AttributeKind::B,
            Self::L(_) => AttributeKind::L,
            Self::M(_) => AttributeKind::M,
        }
    }

    pub fn is_s(&self) -> bool {
        matches!(self, Self::S(_))
    }

    pub fn is_b(&self) -> bool {
        matches!(self, Self::B(_))
    }

    pub fn is_l(&self) -> bool {
        matches!(self, Self::L(_))
    }

    pub fn is_m(&self) -> bool {
        matches!(self, Self::M(_))
    }

    pub fn as_s(&self) -> Result<&str, TypeMismatch> {
        match self {
            Self::S(s) => Ok(s),
            _ => Err(self.mismatch(AttributeKind::S)),
        }
    }

    pub fn as_b(&self) -> Result<&[u8], TypeMismatch> {
        match self {
            Self::B(b) => Ok(b),
            _ => Err(self.mismatch(AttributeKind::B)),
        }
    }

    pub fn as_l(&self) -> Result<&[AttributeValue], TypeMismatch> {
        match self {
            Self::L(l) => Ok(l),
            _ => Err(self.mismatch(AttributeKind::L)),
        }
    }

    pub fn as_m(&self) -> Result<&Item, TypeMismatch> {
        match self {
            Self::M(m) => Ok(m),
            _ => Err(self.mismatch(AttributeKind::M)),
        }
    }

    pub fn into_s(self) -> Result<String, TypeMismatch> {
        match self {
            Self::S(s) => Ok(s),
            other => Err(other.mismatch(AttributeKind::S)),
        }
    }

    pub fn into_b(self) -> Result<Vec<u8>, TypeMismatch> {
        match self {
            Self::B(b) => Ok(b),
            other => Err(other.mismatch(AttributeKind::B)),
        }
    }

    pub fn into_l(self) -> Result<Vec<AttributeValue>, TypeMismatch> {
        match self {
            Self::L(l) => Ok(l),
            other => Err(other.mismatch(AttributeKind::L)),
        }
    }

    pub fn into_m(self) -> Result<Item, TypeMismatch> {
        match self {
            Self::M(m) => Ok(m),
            other => Err(other.mismatch(AttributeKind::M)),
        }
    }

    /// Number of string and binary leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::S(_) | Self::B(_) => 1,
            Self::L(l) => l.iter().map(AttributeValue::leaf_count).sum(),
            Self::M(m) => m.values().map(AttributeValue::leaf_count).sum(),
        }
    }

    fn mismatch(&self, expected: AttributeKind) -> TypeMismatch {
        TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{{S: {s}}}"),
            Self::B(b) => write!(f, "{{B: {} bytes}}", b.len()),
            Self::L(l) => write!(f, "{{L: {} items}}", l.len()),
            Self::M(m) => write!(f, "{{M: {} keys}}", m.len()),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> AttributeValue {
        AttributeValue::S(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> AttributeValue {
        AttributeValue::S(value.into())
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> AttributeValue {
        AttributeValue::B(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> AttributeValue {
        AttributeValue::L(value)
    }
}

impl From<Item> for AttributeValue {
    fn from(value: Item) -> AttributeValue {
        AttributeValue::M(value)
    }
}
