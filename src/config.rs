//! Service configuration read from the environment (`.env` is loaded by `main`).

use crate::domain::aggregates::order::{DEFAULT_CODE_ATTEMPTS, DEFAULT_CODE_CAPACITY};
use crate::{LogisticsError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    pub order_code_attempts: u32,
    pub order_code_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8083,
            log_filter: "info".to_string(),
            order_code_attempts: DEFAULT_CODE_ATTEMPTS,
            order_code_capacity: DEFAULT_CODE_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("KOTO_HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port)?,
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            order_code_attempts: parse_or("KOTO_ORDER_CODE_ATTEMPTS", lookup("KOTO_ORDER_CODE_ATTEMPTS"), defaults.order_code_attempts)?,
            order_code_capacity: parse_or("KOTO_ORDER_CODE_CAPACITY", lookup("KOTO_ORDER_CODE_CAPACITY"), defaults.order_code_capacity)?,
        })
    }

    pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| LogisticsError::InvalidConfig { key: key.to_string(), message: e.to_string() }),
    }
}
