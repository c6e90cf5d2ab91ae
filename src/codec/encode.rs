use crate::types::{AttributeValue, Item};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(s) => map.serialize_entry("S", s)?,
            Self::B(b) => map.serialize_entry("B", &STANDARD.encode(b))?,
            Self::L(l) => map.serialize_entry("L", l)?,
            Self::M(m) => map.serialize_entry("M", m)?,
        }
        map.end()
    }
}

/// Encodes an item as a JSON value, keeping attribute order.
pub fn encode(item: &Item) -> Value {
    total(serde_json::to_value(item))
}

/// Encodes an item straight to UTF-8 JSON bytes.
pub fn encode_to_vec(item: &Item) -> Vec<u8> {
    let mut buf = Vec::with_capacity(estimate_len(item));
    write_item(&mut buf, item);
    buf
}

pub fn encode_to_string(item: &Item) -> String {
    total(serde_json::to_string(item))
}

pub(crate) fn write_item<W: std::io::Write>(writer: W, item: &Item) {
    total(serde_json::to_writer(writer, item))
}

/// Unwraps a serde_json encoding result. Item keys are strings and no value
/// impl reports an error, so the only failure left is the writer itself;
/// every caller writes to memory.
pub(super) fn total<T>(result: serde_json::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => unreachable!("encoding into memory cannot fail: {err}"),
    }
}

fn estimate_len(item: &Item) -> usize {
    item.iter()
        .map(|(name, value)| name.len() + value_len(value) + 4)
        .sum::<usize>()
        + 2
}

fn value_len(value: &AttributeValue) -> usize {
    match value {
        AttributeValue::S(s) => s.len() + 8,
        AttributeValue::B(b) => b.len().div_ceil(3) * 4 + 8,
        AttributeValue::L(l) => l.iter().map(|v| value_len(v) + 1).sum::<usize>() + 8,
        AttributeValue::M(m) => estimate_len(m) + 6,
    }
}
