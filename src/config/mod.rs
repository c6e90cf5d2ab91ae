use crate::fixture::{Fixture, DEFAULT_BINARY_LENGTH, DEFAULT_STRING_LENGTH};
use crate::{
    ENV_FIXTURE_BINARY_LENGTH, ENV_FIXTURE_SEED, ENV_FIXTURE_SIZE, ENV_FIXTURE_STRING_LENGTH,
    ENV_FIXTURE_TABLE_NAME,
};

use std::env;
use std::str::FromStr;
use tracing::warn;

/// Fixture generator settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    fixtures: Vec<Fixture>,
    seed: Option<u64>,
    string_len: usize,
    binary_len: usize,
    table_name: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let fixtures = match lookup(ENV_FIXTURE_SIZE) {
            None => Fixture::ALL.to_vec(),
            Some(size) if size.eq_ignore_ascii_case("all") => Fixture::ALL.to_vec(),
            Some(size) => match size.parse::<Fixture>() {
                Ok(fixture) => vec![fixture],
                Err(err) => {
                    warn!("{err}");
                    warn!("Fall back to all fixtures.");
                    Fixture::ALL.to_vec()
                }
            },
        };

        Self {
            fixtures,
            seed: lookup(ENV_FIXTURE_SEED).and_then(|v| parse_or_warn(ENV_FIXTURE_SEED, &v)),
            string_len: lookup(ENV_FIXTURE_STRING_LENGTH)
                .and_then(|v| parse_or_warn(ENV_FIXTURE_STRING_LENGTH, &v))
                .unwrap_or(DEFAULT_STRING_LENGTH),
            binary_len: lookup(ENV_FIXTURE_BINARY_LENGTH)
                .and_then(|v| parse_or_warn(ENV_FIXTURE_BINARY_LENGTH, &v))
                .unwrap_or(DEFAULT_BINARY_LENGTH),
            table_name: lookup(ENV_FIXTURE_TABLE_NAME).filter(|name| !name.is_empty()),
        }
    }

    pub fn fixtures(&self) -> Vec<Fixture> {
        self.fixtures.clone()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn string_len(&self) -> usize {
        self.string_len
    }

    pub fn binary_len(&self) -> usize {
        self.binary_len
    }

    pub fn table_name(&self) -> Option<String> {
        self.table_name.clone()
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

fn parse_or_warn<T: FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.parse::<T>().ok();
    if parsed.is_none() {
        warn!("Invalid value for {key}: {value}. Use the default.");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn it_uses_defaults_without_env() {
        let config = config(&[]);
        assert_eq!(config.fixtures(), Fixture::ALL.to_vec());
        assert_eq!(config.seed(), None);
        assert_eq!(config.string_len(), 16);
        assert_eq!(config.binary_len(), 16);
        assert_eq!(config.table_name(), None);
    }

    #[test]
    fn it_reads_overrides() {
        let config = config(&[
            (ENV_FIXTURE_SIZE, "Small"),
            (ENV_FIXTURE_SEED, "42"),
            (ENV_FIXTURE_STRING_LENGTH, "8"),
            (ENV_FIXTURE_BINARY_LENGTH, "32"),
            (ENV_FIXTURE_TABLE_NAME, "People"),
        ]);
        assert_eq!(config.fixtures(), vec![Fixture::Small]);
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.string_len(), 8);
        assert_eq!(config.binary_len(), 32);
        assert_eq!(config.table_name(), Some("People".into()));
    }

    #[test]
    fn it_falls_back_to_defaults_on_invalid_values() {
        let config = config(&[
            (ENV_FIXTURE_SIZE, "medium"),
            (ENV_FIXTURE_SEED, "abc"),
            (ENV_FIXTURE_STRING_LENGTH, "-1"),
            (ENV_FIXTURE_TABLE_NAME, ""),
        ]);
        assert_eq!(config.fixtures(), Fixture::ALL.to_vec());
        assert_eq!(config.seed(), None);
        assert_eq!(config.string_len(), DEFAULT_STRING_LENGTH);
        assert_eq!(config.table_name(), None);
    }
}
