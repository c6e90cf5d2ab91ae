use super::{Fixture, ItemBuilder, TextSource};
use crate::codec::encode_get_item_output;
use crate::types::Item;

use tracing::info;

#[derive(Debug, Clone)]
struct Entry {
    item: Item,
    response: Vec<u8>,
}

/// Every fixture generated once, together with the GetItem response body
/// that carries it. Read-only after construction.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    tiny: Entry,
    small: Entry,
    huge: Entry,
}

impl FixtureSet {
    pub fn generate<T: TextSource>(builder: &mut ItemBuilder<T>) -> Self {
        let mut entry = |fixture: Fixture| {
            let item = builder.build(fixture);
            let response = encode_get_item_output(&item);
            info!("{fixture} fixture ready: {} bytes on the wire", response.len());
            Entry { item, response }
        };

        Self {
            tiny: entry(Fixture::Tiny),
            small: entry(Fixture::Small),
            huge: entry(Fixture::Huge),
        }
    }

    pub fn item(&self, fixture: Fixture) -> &Item {
        &self.entry(fixture).item
    }

    /// Pre-encoded `{"Item":{..}}` body for `fixture`.
    pub fn response_bytes(&self, fixture: Fixture) -> &[u8] {
        &self.entry(fixture).response
    }

    fn entry(&self, fixture: Fixture) -> &Entry {
        match fixture {
            Fixture::Tiny => &self.tiny,
            Fixture::Small => &self.small,
            Fixture::Huge => &self.huge,
        }
    }
}
