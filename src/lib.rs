pub mod codec;
pub mod config;
pub mod error;
pub mod fixture;
pub mod sdk;
pub mod types;

pub use codec::{decode, decode_slice, decode_str, encode, encode_to_string, encode_to_vec};
pub use config::Config;
pub use error::{DecodeError, SdkConversionError, TypeMismatch};
pub use fixture::{Fixture, FixtureSet, ItemBuilder, RandomTextSource, TextSource};
pub use types::{AttributeKind, AttributePath, AttributeValue, Item};

pub const ENV_FIXTURE_SIZE: &str = "FIXTURE_SIZE";
pub const ENV_FIXTURE_SEED: &str = "FIXTURE_SEED";
pub const ENV_FIXTURE_STRING_LENGTH: &str = "FIXTURE_STRING_LENGTH";
pub const ENV_FIXTURE_BINARY_LENGTH: &str = "FIXTURE_BINARY_LENGTH";
pub const ENV_FIXTURE_TABLE_NAME: &str = "FIXTURE_TABLE_NAME";
