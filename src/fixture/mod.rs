//! Benchmark fixtures: fixed structure, random leaves.

mod set;
pub mod shape;
mod source;

pub use set::FixtureSet;
pub use shape::{ItemShape, Shape};
pub use source::{RandomTextSource, TextSource};

use crate::types::Item;

use rand::rngs::ThreadRng;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_STRING_LENGTH: usize = 16;
pub const DEFAULT_BINARY_LENGTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixture {
    Tiny,
    Small,
    Huge,
}

impl Fixture {
    pub const ALL: [Fixture; 3] = [Self::Tiny, Self::Small, Self::Huge];

    pub fn shape(&self) -> ItemShape {
        match self {
            Self::Tiny => shape::TINY,
            Self::Small => shape::SMALL,
            Self::Huge => shape::HUGE,
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tiny => write!(f, "TINY"),
            Self::Small => write!(f, "SMALL"),
            Self::Huge => write!(f, "HUGE"),
        }
    }
}

impl FromStr for Fixture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "small" => Ok(Self::Small),
            "huge" => Ok(Self::Huge),
            _ => Err(format!("Unknown fixture: {s}")),
        }
    }
}

/// Generates fixture items, owning the source of leaf content.
#[derive(Debug)]
pub struct ItemBuilder<T = RandomTextSource<ThreadRng>> {
    source: T,
    string_len: usize,
    binary_len: usize,
}

impl ItemBuilder {
    /// Builder backed by the thread-local generator.
    pub fn new() -> Self {
        Self::with_source(RandomTextSource::new())
    }
}

impl Default for ItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextSource> ItemBuilder<T> {
    pub fn with_source(source: T) -> Self {
        Self {
            source,
            string_len: DEFAULT_STRING_LENGTH,
            binary_len: DEFAULT_BINARY_LENGTH,
        }
    }

    pub fn set_string_len(self, string_len: usize) -> Self {
        Self { string_len, ..self }
    }

    pub fn set_binary_len(self, binary_len: usize) -> Self {
        Self { binary_len, ..self }
    }

    pub fn tiny(&mut self) -> Item {
        self.build(Fixture::Tiny)
    }

    pub fn small(&mut self) -> Item {
        self.build(Fixture::Small)
    }

    pub fn huge(&mut self) -> Item {
        self.build(Fixture::Huge)
    }

    pub fn build(&mut self, fixture: Fixture) -> Item {
        debug!("Generating {fixture} item");
        self.build_shape(fixture.shape())
    }

    pub fn build_shape(&mut self, shape: ItemShape) -> Item {
        shape::fill_item(shape, &mut self.source, self.string_len, self.binary_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, encode_to_vec};
    use crate::types::AttributeValue;

    fn assert_leaf_lengths(value: &AttributeValue) {
        match value {
            AttributeValue::S(s) => {
                assert_eq!(s.len(), DEFAULT_STRING_LENGTH);
                assert!(s.bytes().all(|b| b.is_ascii_lowercase()));
            }
            AttributeValue::B(b) => assert_eq!(b.len(), DEFAULT_BINARY_LENGTH),
            AttributeValue::L(l) => l.iter().for_each(assert_leaf_lengths),
            AttributeValue::M(m) => m.values().for_each(assert_leaf_lengths),
        }
    }

    #[test]
    fn it_builds_tiny_with_one_attribute() {
        let item = ItemBuilder::new().tiny();
        assert_eq!(item.len(), 1);
        assert!(item["stringAttr"].is_s());
    }

    #[test]
    fn it_builds_small_with_a_three_element_list() {
        let item = ItemBuilder::new().small();
        assert_eq!(item.len(), 3);
        assert!(item["stringAttr"].is_s());
        assert!(item["binaryAttr"].is_b());

        let list = item["listAttr"].as_l().unwrap();
        assert_eq!(list.len(), 3);
        assert!(list[0].is_s());
        assert!(list[1].is_b());
        assert!(list[2].is_s());
    }

    #[test]
    fn it_builds_huge_with_six_attributes() {
        let item = ItemBuilder::new().huge();
        assert_eq!(item.len(), 6);

        let list = item["listAttr"].as_l().unwrap();
        assert!(list.len() >= 16);

        let nested = item["mapAttr"].as_m().unwrap()["attrThree"].as_l().unwrap();
        let inner = nested[4].as_m().unwrap();
        assert!(inner["attrThree"].is_l());

        let leaves: usize = item.values().map(AttributeValue::leaf_count).sum();
        assert_eq!(leaves, 50);
    }

    #[test]
    fn it_fills_leaves_with_fixed_length_content() {
        let item = ItemBuilder::new().huge();
        item.values().for_each(assert_leaf_lengths);
    }

    #[test]
    fn it_matches_the_static_shape() {
        let mut builder = ItemBuilder::new();
        for fixture in Fixture::ALL {
            let item = builder.build(fixture);
            assert!(shape::matches_item(fixture.shape(), &item), "{fixture}");
        }
    }

    #[test]
    fn it_round_trips_every_fixture() {
        let mut builder = ItemBuilder::new();
        for fixture in Fixture::ALL {
            let item = builder.build(fixture);
            let decoded = decode_slice(&encode_to_vec(&item)).unwrap();
            assert_eq!(decoded, item, "{fixture}");
            assert_eq!(encode_to_vec(&decoded), encode_to_vec(&item), "{fixture}");
        }
    }

    #[test]
    fn it_reproduces_items_from_the_same_seed() {
        let a = ItemBuilder::with_source(RandomTextSource::seeded(7)).huge();
        let b = ItemBuilder::with_source(RandomTextSource::seeded(7)).huge();
        assert_eq!(a, b);
    }

    #[test]
    fn it_randomizes_content_between_builds() {
        let mut builder = ItemBuilder::new();
        assert_ne!(builder.huge(), builder.huge());
    }

    #[test]
    fn it_honours_custom_leaf_lengths() {
        let item = ItemBuilder::new()
            .set_string_len(4)
            .set_binary_len(2)
            .small();
        assert_eq!(item["stringAttr"].as_s().unwrap().len(), 4);
        assert_eq!(item["binaryAttr"].as_b().unwrap().len(), 2);
    }

    #[test]
    fn it_parses_fixture_names() {
        assert_eq!("tiny".parse::<Fixture>(), Ok(Fixture::Tiny));
        assert_eq!("HUGE".parse::<Fixture>(), Ok(Fixture::Huge));
        assert_eq!(
            "medium".parse::<Fixture>(),
            Err("Unknown fixture: medium".to_string())
        );
        assert_eq!(Fixture::Small.to_string(), "SMALL");
    }
}
