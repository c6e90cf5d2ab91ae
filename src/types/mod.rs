mod attribute_value;
mod path;

pub use attribute_value::{AttributeKind, AttributeValue, Item};
pub use path::{AttributePath, Segment};
