//! PutItem request and GetItem response bodies carrying an item.

use super::decode::{from_slice, json_type, reject_non_objects, Cursor, ItemSeed};
use super::encode::{total, write_item};
use crate::error::DecodeError;
use crate::types::{AttributePath, Item, Segment};

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::io::Write;

const TABLE_NAME: &str = "TableName";
const ITEM: &str = "Item";

/// Decoded body of a PutItem request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutItemInput {
    pub table_name: String,
    pub item: Item,
}

/// `{"TableName":"<table>","Item":{..}}`
pub fn encode_put_item(table_name: &str, item: &Item) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"{\"TableName\":");
    write_json(&mut buf, table_name);
    buf.extend_from_slice(b",\"Item\":");
    write_item(&mut buf, item);
    buf.push(b'}');
    buf
}

/// `{"Item":{..}}`
pub fn encode_get_item_output(item: &Item) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"{\"Item\":");
    write_item(&mut buf, item);
    buf.push(b'}');
    buf
}

pub fn decode_put_item(bytes: &[u8]) -> Result<PutItemInput, DecodeError> {
    let mut cursor = Cursor::default();
    let result = from_slice(bytes, Envelope(&mut cursor));
    let members = cursor.settle(result)?;

    let Some(table_name) = members.table_name else {
        return Err(member_missing(TABLE_NAME, "a string"));
    };
    let Some(item) = members.item else {
        return Err(member_missing(ITEM, "an object"));
    };
    Ok(PutItemInput { table_name, item })
}

/// Decodes a GetItem response. DynamoDB answers `{}` when the key does not
/// exist, which yields `None`.
pub fn decode_get_item_output(bytes: &[u8]) -> Result<Option<Item>, DecodeError> {
    let mut cursor = Cursor::default();
    let result = from_slice(bytes, Envelope(&mut cursor));
    Ok(cursor.settle(result)?.item)
}

#[derive(Debug, Default)]
struct Members {
    table_name: Option<String>,
    item: Option<Item>,
}

/// Top-level object of a request or response. Errors inside the item are
/// reported under `Item`; unrelated members are skipped.
struct Envelope<'c>(&'c mut Cursor);

impl Envelope<'_> {
    fn reject<E: de::Error>(self, found: &'static str) -> E {
        self.0.mismatch("an object", found)
    }
}

impl<'de> DeserializeSeed<'de> for Envelope<'_> {
    type Value = Members;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Members, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Envelope<'_> {
    type Value = Members;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object")
    }

    reject_non_objects!('de);

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Members, A::Error> {
        let cursor = self.0;
        let mut members = Members::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                ITEM => {
                    cursor.push(Segment::Key(ITEM.into()));
                    if members.item.is_some() {
                        return Err(cursor.duplicate());
                    }
                    members.item = Some(map.next_value_seed(ItemSeed(&mut *cursor))?);
                    cursor.pop();
                }
                TABLE_NAME => {
                    cursor.push(Segment::Key(TABLE_NAME.into()));
                    if members.table_name.is_some() {
                        return Err(cursor.duplicate());
                    }
                    match map.next_value::<Value>()? {
                        Value::String(name) => members.table_name = Some(name),
                        other => return Err(cursor.mismatch("a string", json_type(&other))),
                    }
                    cursor.pop();
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(members)
    }
}

fn member_missing(member: &str, expected: &'static str) -> DecodeError {
    DecodeError::TypeMismatch {
        path: AttributePath::root().key(member),
        expected,
        found: "nothing",
    }
}

fn write_json<W: Write>(writer: W, value: &str) {
    total(serde_json::to_writer(writer, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeValue;

    fn item() -> Item {
        Item::from([
            ("hashKey".to_string(), AttributeValue::of_string("k")),
            ("binaryAttr".to_string(), AttributeValue::of_binary(vec![0x01, 0x02])),
        ])
    }

    #[test]
    fn it_encodes_put_item_request() {
        let body = encode_put_item("a", &item());
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"TableName":"a","Item":{"hashKey":{"S":"k"},"binaryAttr":{"B":"AQI="}}}"#
        );
    }

    #[test]
    fn it_escapes_the_table_name() {
        let body = encode_put_item("we\"ird", &Item::new());
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"TableName":"we\"ird","Item":{}}"#
        );
    }

    #[test]
    fn it_decodes_put_item_request() {
        let input = decode_put_item(&encode_put_item("People", &item())).unwrap();
        assert_eq!(
            input,
            PutItemInput {
                table_name: "People".into(),
                item: item(),
            }
        );
    }

    #[test]
    fn it_requires_a_table_name() {
        let err = decode_put_item(br#"{"Item":{}}"#).unwrap_err();
        assert_eq!(err.path().to_string(), "TableName");
    }

    #[test]
    fn it_encodes_get_item_response() {
        let body = encode_get_item_output(&item());
        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"Item":{"hashKey":{"S":"k"},"binaryAttr":{"B":"AQI="}}}"#
        );
    }

    #[test]
    fn it_decodes_get_item_response() {
        let decoded = decode_get_item_output(&encode_get_item_output(&item())).unwrap();
        assert_eq!(decoded, Some(item()));
    }

    #[test]
    fn it_returns_none_for_a_missing_item() {
        assert_eq!(decode_get_item_output(b"{}").unwrap(), None);
    }

    #[test]
    fn it_prefixes_item_errors_with_the_member_name() {
        let err = decode_get_item_output(br#"{"Item":{"listAttr":{"L":[{"S":"a"},{"Q":1}]}}}"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::UnknownVariant { .. }));
        assert_eq!(err.path().to_string(), "Item.listAttr[1]");
    }

    #[test]
    fn it_rejects_a_repeated_item_member() {
        let err = decode_get_item_output(br#"{"Item":{},"Item":{"a":{"S":"x"}}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::DuplicateKey { .. }));
        assert_eq!(err.path().to_string(), "Item");
    }

    #[test]
    fn it_rejects_a_repeated_attribute_inside_the_item() {
        let err = decode_put_item(
            br#"{"TableName":"t","Item":{"hashKey":{"S":"1"},"hashKey":{"S":"2"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::DuplicateKey { .. }));
        assert_eq!(err.path().to_string(), "Item.hashKey");
    }

    #[test]
    fn it_rejects_a_non_string_table_name() {
        let err = decode_put_item(br#"{"TableName":7,"Item":{}}"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TypeMismatch {
                expected: "a string",
                found: "a number",
                ..
            }
        ));
        assert_eq!(err.path().to_string(), "TableName");
    }

    #[test]
    fn it_rejects_a_non_object_body() {
        let err = decode_get_item_output(b"[]").unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { found: "an array", .. }));
        assert!(err.path().is_root());
    }

    #[test]
    fn it_skips_unrelated_members() {
        let body = br#"{"ConsumedCapacity":{"TableName":"x"},"Item":{"a":{"S":"x"}}}"#;
        let item = decode_get_item_output(body).unwrap().unwrap();
        assert_eq!(item["a"], AttributeValue::of_string("x"));
    }
}
