use super::TextSource;
use crate::types::{AttributeValue, Item};

/// Structure of a generated value, without content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    S,
    B,
    L(&'static [Shape]),
    M(&'static [(&'static str, Shape)]),
}

/// Named top-level attributes of an item.
pub type ItemShape = &'static [(&'static str, Shape)];

use Shape::{B, S};

const ATTR_ONE: Shape = Shape::M(&[("attrOne", S)]);

pub const TINY: ItemShape = &[("stringAttr", S)];

pub const SMALL: ItemShape = &[
    ("stringAttr", S),
    ("binaryAttr", B),
    ("listAttr", Shape::L(&[S, B, S])),
];

const HUGE_INNER_LIST: Shape = Shape::L(&[
    S, S, S, S, S, S, S, S, S, S, S, S, S, S, // 14 strings
    B,
    S,
    ATTR_ONE,
]);

const HUGE_LIST: Shape = Shape::L(&[
    S, S, S, S, S, S, S, S, S, S, S, S, S, S, // 14 strings
    B,
    Shape::L(&[S]),
    ATTR_ONE,
    HUGE_INNER_LIST,
]);

const HUGE_MAP: Shape = Shape::M(&[
    ("attrOne", S),
    ("attrTwo", B),
    (
        "attrThree",
        Shape::L(&[
            S,
            S,
            S,
            S,
            Shape::M(&[
                ("attrOne", S),
                ("attrTwo", B),
                ("attrThree", Shape::L(&[S, S, S, S])),
            ]),
        ]),
    ),
]);

pub const HUGE: ItemShape = &[
    ("hashKey", S),
    ("rangeKey", S),
    ("stringAttr", S),
    ("binaryAttr", B),
    ("listAttr", HUGE_LIST),
    ("mapAttr", HUGE_MAP),
];

impl Shape {
    pub(super) fn fill<T: TextSource>(
        &self,
        source: &mut T,
        string_len: usize,
        binary_len: usize,
    ) -> AttributeValue {
        match *self {
            Shape::S => AttributeValue::S(source.string(string_len)),
            Shape::B => AttributeValue::B(source.bytes(binary_len)),
            Shape::L(elements) => AttributeValue::L(
                elements
                    .iter()
                    .map(|e| e.fill(source, string_len, binary_len))
                    .collect(),
            ),
            Shape::M(entries) => {
                AttributeValue::M(fill_item(entries, source, string_len, binary_len))
            }
        }
    }

    /// Whether `value` has exactly this structure, ignoring leaf content.
    pub fn matches(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Shape::S, AttributeValue::S(_)) | (Shape::B, AttributeValue::B(_)) => true,
            (Shape::L(elements), AttributeValue::L(values)) => {
                elements.len() == values.len()
                    && elements.iter().zip(values).all(|(e, v)| e.matches(v))
            }
            (Shape::M(entries), AttributeValue::M(item)) => matches_item(*entries, item),
            _ => false,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Shape::S | Shape::B => 1,
            Shape::L(elements) => elements.iter().map(Shape::leaf_count).sum(),
            Shape::M(entries) => entries.iter().map(|(_, s)| s.leaf_count()).sum(),
        }
    }
}

pub(super) fn fill_item<T: TextSource>(
    shape: ItemShape,
    source: &mut T,
    string_len: usize,
    binary_len: usize,
) -> Item {
    shape
        .iter()
        .map(|(name, s)| (name.to_string(), s.fill(source, string_len, binary_len)))
        .collect()
}

/// Whether `item` holds exactly the attributes of `shape`, in that order.
pub fn matches_item(shape: ItemShape, item: &Item) -> bool {
    shape.len() == item.len()
        && shape
            .iter()
            .zip(item)
            .all(|((name, s), (key, value))| *name == key.as_str() && s.matches(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(shape: &Shape) -> usize {
        match shape {
            Shape::S | Shape::B => 0,
            Shape::L(elements) => 1 + elements.iter().map(depth).max().unwrap_or(0),
            Shape::M(entries) => 1 + entries.iter().map(|(_, s)| depth(s)).max().unwrap_or(0),
        }
    }

    #[test]
    fn it_defines_tiny_with_one_string() {
        assert_eq!(TINY, &[("stringAttr", Shape::S)]);
    }

    #[test]
    fn it_defines_small_with_a_three_element_list() {
        assert_eq!(SMALL.len(), 3);
        assert_eq!(SMALL[2], ("listAttr", Shape::L(&[S, B, S])));
    }

    #[test]
    fn it_defines_huge_with_six_attributes() {
        let names: Vec<&str> = HUGE.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["hashKey", "rangeKey", "stringAttr", "binaryAttr", "listAttr", "mapAttr"]
        );
    }

    #[test]
    fn it_nests_lists_of_at_least_sixteen_elements() {
        let Shape::L(outer) = HUGE_LIST else {
            unreachable!("listAttr is a list");
        };
        assert_eq!(outer.len(), 18);

        let Shape::L(inner) = outer[17] else {
            unreachable!("the last element is a list");
        };
        assert_eq!(inner.len(), 17);
    }

    #[test]
    fn it_nests_a_map_in_a_list_in_a_map() {
        assert_eq!(depth(&HUGE_MAP), 4);
        assert_eq!(HUGE_MAP.leaf_count(), 12);
    }

    #[test]
    fn it_counts_huge_leaves() {
        let total: usize = HUGE.iter().map(|(_, s)| s.leaf_count()).sum();
        assert_eq!(total, 4 + 34 + 12);
    }

    #[test]
    fn it_rejects_values_of_another_structure() {
        let value = AttributeValue::of_list([AttributeValue::of_string("a")]);
        assert!(Shape::L(&[S]).matches(&value));
        assert!(!Shape::L(&[B]).matches(&value));
        assert!(!Shape::L(&[S, S]).matches(&value));
        assert!(!Shape::S.matches(&value));
    }
}
