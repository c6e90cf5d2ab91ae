use crate::error::DecodeError;
use crate::types::{AttributeKind, AttributePath, AttributeValue, Item, Segment};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Visitor methods for every JSON type but an object. Each one fails through
/// the visitor's own `reject(found)`.
macro_rules! reject_non_objects {
    ($de:lifetime) => {
        fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Err(self.reject("a boolean"))
        }

        fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Err(self.reject("a number"))
        }

        fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Err(self.reject("a number"))
        }

        fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Err(self.reject("a number"))
        }

        fn visit_str<E: serde::de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Err(self.reject("a string"))
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Err(self.reject("null"))
        }

        fn visit_seq<A: serde::de::SeqAccess<$de>>(self, _: A) -> Result<Self::Value, A::Error> {
            Err(self.reject("an array"))
        }
    };
}

pub(super) use reject_non_objects;

/// Decodes a wire document into an item.
///
/// Decoding is strict: the first malformed node aborts the whole document
/// and the error names its path.
pub fn decode(document: &Value) -> Result<Item, DecodeError> {
    let mut cursor = Cursor::default();
    let result = ItemSeed(&mut cursor).deserialize(serde_stacker::Deserializer::new(document));
    cursor.settle(result)
}

/// Decodes UTF-8 JSON bytes. Keys are seen as written, so a repeated
/// attribute name or discriminator is rejected rather than collapsed.
pub fn decode_slice(bytes: &[u8]) -> Result<Item, DecodeError> {
    let mut cursor = Cursor::default();
    let result = from_slice(bytes, ItemSeed(&mut cursor));
    cursor.settle(result)
}

pub fn decode_str(text: &str) -> Result<Item, DecodeError> {
    decode_slice(text.as_bytes())
}

/// Runs `seed` over a whole JSON document with no nesting limit. Deep
/// documents grow the stack on the heap instead of overflowing it.
pub(super) fn from_slice<'a, S: DeserializeSeed<'a>>(
    bytes: &'a [u8],
    seed: S,
) -> Result<S::Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    deserializer.disable_recursion_limit();
    let value = seed.deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Decoding state shared by every node of one document: where we are, and
/// the first failure in its structured form.
#[derive(Debug, Default)]
pub(super) struct Cursor {
    path: AttributePath,
    failure: Option<DecodeError>,
}

impl Cursor {
    pub(super) fn push(&mut self, segment: Segment) {
        self.path.push(segment);
    }

    pub(super) fn pop(&mut self) {
        self.path.pop();
    }

    pub(super) fn mismatch<E: de::Error>(
        &mut self,
        expected: &'static str,
        found: &'static str,
    ) -> E {
        let path = self.path.clone();
        self.fail(DecodeError::TypeMismatch {
            path,
            expected,
            found,
        })
    }

    pub(super) fn duplicate<E: de::Error>(&mut self) -> E {
        let path = self.path.clone();
        self.fail(DecodeError::DuplicateKey { path })
    }

    fn unknown<E: de::Error>(&mut self, found: String) -> E {
        let path = self.path.clone();
        self.fail(DecodeError::UnknownVariant { path, found })
    }

    fn invalid_encoding<E: de::Error>(&mut self, source: base64::DecodeError) -> E {
        let path = self.path.clone();
        self.fail(DecodeError::InvalidEncoding { path, source })
    }

    fn fail<E: de::Error>(&mut self, err: DecodeError) -> E {
        let message = err.to_string();
        self.failure = Some(err);
        E::custom(message)
    }

    /// Turns the parser's result into ours. A recorded failure wins over the
    /// parser error that carried it out; anything else is a syntax error.
    pub(super) fn settle<T>(
        self,
        result: Result<T, serde_json::Error>,
    ) -> Result<T, DecodeError> {
        result.map_err(|err| {
            let err = self.failure.unwrap_or_else(|| DecodeError::from(err));
            debug!("Failed to decode item. {err}");
            err
        })
    }
}

/// Reads an object of named attributes.
pub(super) struct ItemSeed<'c>(pub(super) &'c mut Cursor);

impl ItemSeed<'_> {
    fn reject<E: de::Error>(self, found: &'static str) -> E {
        self.0.mismatch("an object", found)
    }
}

impl<'de> DeserializeSeed<'de> for ItemSeed<'_> {
    type Value = Item;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Item, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for ItemSeed<'_> {
    type Value = Item;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object")
    }

    reject_non_objects!('de);

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Item, A::Error> {
        read_attributes(self.0, map)
    }
}

#[derive(Debug, Clone, Copy)]
enum Expect {
    /// `{"<discriminator>": <payload>}`
    Attribute,
    Payload(AttributeKind),
}

impl Expect {
    fn description(self) -> &'static str {
        match self {
            Expect::Attribute => "an attribute value object",
            Expect::Payload(AttributeKind::S) => "a string",
            Expect::Payload(AttributeKind::B) => "a base64 string",
            Expect::Payload(AttributeKind::L) => "an array",
            Expect::Payload(AttributeKind::M) => "an object",
        }
    }
}

struct Node<'c> {
    cursor: &'c mut Cursor,
    expect: Expect,
}

impl<'c> Node<'c> {
    fn attribute(cursor: &'c mut Cursor) -> Self {
        Self {
            cursor,
            expect: Expect::Attribute,
        }
    }

    fn reject<E: de::Error>(self, found: &'static str) -> E {
        self.cursor.mismatch(self.expect.description(), found)
    }
}

impl<'de> DeserializeSeed<'de> for Node<'_> {
    type Value = AttributeValue;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<AttributeValue, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Node<'_> {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.expect.description())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<AttributeValue, E> {
        Err(self.reject("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<AttributeValue, E> {
        Err(self.reject("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<AttributeValue, E> {
        Err(self.reject("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<AttributeValue, E> {
        Err(self.reject("a number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<AttributeValue, E> {
        Err(self.reject("null"))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<AttributeValue, E> {
        let expect = self.expect;
        match expect {
            Expect::Payload(AttributeKind::S) => Ok(AttributeValue::S(value.to_owned())),
            Expect::Payload(AttributeKind::B) => match STANDARD.decode(value) {
                Ok(bytes) => Ok(AttributeValue::B(bytes)),
                Err(source) => Err(self.cursor.invalid_encoding(source)),
            },
            _ => Err(self.reject("a string")),
        }
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<AttributeValue, E> {
        let expect = self.expect;
        match expect {
            Expect::Payload(AttributeKind::S) => Ok(AttributeValue::S(value)),
            _ => self.visit_str(&value),
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<AttributeValue, A::Error> {
        let expect = self.expect;
        if !matches!(expect, Expect::Payload(AttributeKind::L)) {
            return Err(self.reject("an array"));
        }

        let cursor = self.cursor;
        let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        loop {
            cursor.push(Segment::Index(list.len()));
            let element = seq.next_element_seed(Node::attribute(&mut *cursor))?;
            cursor.pop();
            match element {
                Some(value) => list.push(value),
                None => return Ok(AttributeValue::L(list)),
            }
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<AttributeValue, A::Error> {
        let expect = self.expect;
        match expect {
            Expect::Attribute => read_discriminated(self.cursor, map),
            Expect::Payload(AttributeKind::M) => {
                read_attributes(self.cursor, map).map(AttributeValue::M)
            }
            Expect::Payload(_) => Err(self.reject("an object")),
        }
    }
}

fn read_attributes<'de, A: MapAccess<'de>>(
    cursor: &mut Cursor,
    mut map: A,
) -> Result<Item, A::Error> {
    let mut item = Item::with_capacity(map.size_hint().unwrap_or(0));
    while let Some(name) = map.next_key::<String>()? {
        cursor.push(Segment::Key(name.clone()));
        if item.contains_key(&name) {
            return Err(cursor.duplicate());
        }
        let value = map.next_value_seed(Node::attribute(&mut *cursor))?;
        cursor.pop();
        item.insert(name, value);
    }
    Ok(item)
}

fn read_discriminated<'de, A: MapAccess<'de>>(
    cursor: &mut Cursor,
    mut map: A,
) -> Result<AttributeValue, A::Error> {
    let Some(key) = map.next_key::<String>()? else {
        return Err(cursor.unknown("no discriminator".into()));
    };
    let Some(kind) = AttributeKind::from_discriminator(&key) else {
        return Err(cursor.unknown(format!("`{key}`")));
    };
    let value = map.next_value_seed(Node {
        cursor: &mut *cursor,
        expect: Expect::Payload(kind),
    })?;

    if let Some(extra) = map.next_key::<String>()? {
        let mut keys = vec![key, extra];
        loop {
            map.next_value::<IgnoredAny>()?;
            match map.next_key::<String>()? {
                Some(key) => keys.push(key),
                None => break,
            }
        }
        return Err(cursor.unknown(format!("ambiguous discriminators {keys:?}")));
    }

    Ok(value)
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
