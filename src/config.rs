//! Process configuration read from the environment.

use std::str::FromStr;
use thiserror::Error;

/// Table used when `PRODUCT_TABLE_NAME` is unset.
pub const DEFAULT_TABLE_NAME: &str = "product-inventory";
/// Region used when `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "ap-south-1";

const TABLE_NAME_VAR: &str = "PRODUCT_TABLE_NAME";
const REGION_VAR: &str = "AWS_REGION";
const SCAN_PAGE_SIZE_VAR: &str = "PRODUCT_SCAN_PAGE_SIZE";
const STORE_VAR: &str = "PRODUCT_STORE";

/// Errors raised while reading the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        /// Name of the variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Which storage backend serves the requests.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum StoreKind {
    /// The DynamoDB table.
    #[default]
    DynamoDb,
    /// A process-local store, for local runs.
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dynamodb" => Ok(Self::DynamoDb),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::InvalidValue {
                name: STORE_VAR,
                value: value.to_string(),
                reason: "expected `dynamodb` or `memory`",
            }),
        }
    }
}

/// Configuration of the router process.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The DynamoDB table holding the products.
    pub table_name: String,
    /// The AWS region of the table.
    pub region: String,
    /// Maximum number of items per scan page, `None` for the storage default.
    pub scan_page_size: Option<i32>,
    /// Storage backend.
    pub store: StoreKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            scan_page_size: None,
            store: StoreKind::default(),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let table_name = lookup(TABLE_NAME_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.table_name);
        let region = lookup(REGION_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.region);
        let scan_page_size = lookup(SCAN_PAGE_SIZE_VAR)
            .map(|value| parse_page_size(&value))
            .transpose()?;
        let store = lookup(STORE_VAR)
            .map(|value| value.parse::<StoreKind>())
            .transpose()?
            .unwrap_or(defaults.store);
        Ok(Self {
            table_name,
            region,
            scan_page_size,
            store,
        })
    }
}

fn parse_page_size(value: &str) -> Result<i32, ConfigError> {
    match value.parse::<i32>() {
        Ok(page_size) if page_size > 0 => Ok(page_size),
        _ => Err(ConfigError::InvalidValue {
            name: SCAN_PAGE_SIZE_VAR,
            value: value.to_string(),
            reason: "expected a positive integer",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use std::collections;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: collections::HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let actual = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(actual, Config::default());
        assert_eq!(actual.table_name, "product-inventory");
        assert_eq!(actual.region, "ap-south-1");
    }

    #[test]
    fn test_overrides() {
        let actual = Config::from_lookup(lookup(&[
            ("PRODUCT_TABLE_NAME", "products-dev"),
            ("AWS_REGION", "eu-west-1"),
            ("PRODUCT_SCAN_PAGE_SIZE", "25"),
            ("PRODUCT_STORE", "memory"),
        ]))
        .unwrap();
        assert_eq!(
            actual,
            Config {
                table_name: "products-dev".to_string(),
                region: "eu-west-1".to_string(),
                scan_page_size: Some(25),
                store: StoreKind::Memory,
            }
        );
    }

    #[test]
    fn test_empty_table_name_falls_back() {
        let actual = Config::from_lookup(lookup(&[("PRODUCT_TABLE_NAME", "")])).unwrap();
        assert_eq!(actual.table_name, DEFAULT_TABLE_NAME);
    }

    #[rstest]
    #[case::zero("PRODUCT_SCAN_PAGE_SIZE", "0")]
    #[case::negative("PRODUCT_SCAN_PAGE_SIZE", "-5")]
    #[case::not_a_number("PRODUCT_SCAN_PAGE_SIZE", "many")]
    #[case::unknown_store("PRODUCT_STORE", "redis")]
    fn test_invalid_values(#[case] name: &str, #[case] value: &str) {
        let actual = Config::from_lookup(lookup(&[(name, value)]));
        assert!(matches!(
            actual,
            Err(ConfigError::InvalidValue { name: rejected, .. }) if rejected == name
        ));
    }

    #[test]
    fn test_config_error_display() {
        let error = parse_page_size("0").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid value \"0\" for PRODUCT_SCAN_PAGE_SIZE: expected a positive integer"
        );
    }
}
