//! JSON wire codec for items.
//!
//! Each attribute is written as a single-key object whose key names the
//! variant:
//!
//! ```text
//! { "stringAttr": { "S": "hello" } }
//! { "binAttr":    { "B": "AQI=" } }
//! { "listAttr":   { "L": [ { "S": "a" }, { "B": "AQI=" } ] } }
//! { "mapAttr":    { "M": { "nested": { "S": "b" } } } }
//! ```

mod decode;
mod encode;
pub mod envelope;

pub use decode::{decode, decode_slice, decode_str};
pub use encode::{encode, encode_to_string, encode_to_vec};
pub use envelope::{
    decode_get_item_output, decode_put_item, encode_get_item_output, encode_put_item,
    PutItemInput,
};
