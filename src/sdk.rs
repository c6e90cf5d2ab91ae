//! Conversion to and from the AWS SDK attribute value type.

use crate::error::SdkConversionError;
use crate::types::{AttributePath, AttributeValue, Item};

use aws_sdk_dynamodb::{primitives::Blob, types};
use std::collections::HashMap;

impl From<AttributeValue> for types::AttributeValue {
    fn from(value: AttributeValue) -> types::AttributeValue {
        match value {
            AttributeValue::S(v) => types::AttributeValue::S(v),
            AttributeValue::B(v) => types::AttributeValue::B(Blob::new(v)),
            AttributeValue::L(v) => {
                types::AttributeValue::L(v.into_iter().map(types::AttributeValue::from).collect())
            }
            AttributeValue::M(v) => types::AttributeValue::M(into_sdk_item(v)),
        }
    }
}

impl TryFrom<types::AttributeValue> for AttributeValue {
    type Error = SdkConversionError;

    fn try_from(value: types::AttributeValue) -> Result<AttributeValue, Self::Error> {
        from_sdk_value(value, &AttributePath::root())
    }
}

pub fn into_sdk_item(item: Item) -> HashMap<String, types::AttributeValue> {
    item.into_iter()
        .map(|(key, val)| (key, types::AttributeValue::from(val)))
        .collect()
}

/// SDK maps are unordered, so the resulting item follows hash order.
pub fn from_sdk_item(
    value: HashMap<String, types::AttributeValue>,
) -> Result<Item, SdkConversionError> {
    from_sdk_map(value, &AttributePath::root())
}

fn from_sdk_map(
    value: HashMap<String, types::AttributeValue>,
    path: &AttributePath,
) -> Result<Item, SdkConversionError> {
    value
        .into_iter()
        .map(|(key, val)| {
            let converted = from_sdk_value(val, &path.key(key.as_str()))?;
            Ok((key, converted))
        })
        .collect()
}

fn from_sdk_value(
    value: types::AttributeValue,
    path: &AttributePath,
) -> Result<AttributeValue, SdkConversionError> {
    match value {
        types::AttributeValue::S(v) => Ok(AttributeValue::S(v)),
        types::AttributeValue::B(v) => Ok(AttributeValue::B(v.into_inner())),
        types::AttributeValue::L(v) => v
            .into_iter()
            .enumerate()
            .map(|(n, val)| from_sdk_value(val, &path.index(n)))
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::L),
        types::AttributeValue::M(v) => from_sdk_map(v, path).map(AttributeValue::M),
        other => Err(SdkConversionError {
            path: path.clone(),
            kind: unsupported_kind(&other).into(),
        }),
    }
}

fn unsupported_kind(value: &types::AttributeValue) -> &'static str {
    match value {
        types::AttributeValue::Bool(_) => "BOOL",
        types::AttributeValue::Bs(_) => "BS",
        types::AttributeValue::N(_) => "N",
        types::AttributeValue::Ns(_) => "NS",
        types::AttributeValue::Null(_) => "NULL",
        types::AttributeValue::Ss(_) => "SS",
        _ => "UNKNOWN",
    }
}
