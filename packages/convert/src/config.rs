//! Deployment settings for talking to Fedora.

use std::time::Duration;

use alvincora_http::ReqwestExecutor;

use crate::{ConfigError, ConverterFactory, DEFAULT_DATA_DIVIDER};

pub const FEDORA_URL_VAR: &str = "ALVINCORA_FEDORA_URL";
pub const FETCH_TIMEOUT_VAR: &str = "ALVINCORA_FETCH_TIMEOUT_SECS";
pub const DATA_DIVIDER_VAR: &str = "ALVINCORA_DATA_DIVIDER";

pub const DEFAULT_FEDORA_URL: &str = "http://localhost:8080/fedora/";

/// Where the stored legacy documents live and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FedoraConfig {
    /// Prefix of every datastream URL; normally ends with a slash.
    pub base_url: String,
    pub timeout: Duration,
    pub data_divider: String,
}

impl Default for FedoraConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEDORA_URL.to_string(),
            timeout: ReqwestExecutor::DEFAULT_TIMEOUT,
            data_divider: DEFAULT_DATA_DIVIDER.to_string(),
        }
    }
}

impl FedoraConfig {
    /// Defaults overridden by the `ALVINCORA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(FEDORA_URL_VAR) {
            config.base_url = url;
        }
        if let Some(value) = lookup(FETCH_TIMEOUT_VAR) {
            config.timeout = parse_timeout(FETCH_TIMEOUT_VAR, &value)?;
        }
        if let Some(divider) = lookup(DATA_DIVIDER_VAR) {
            if divider.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: DATA_DIVIDER_VAR,
                    value: divider,
                    message: "must not be empty".to_string(),
                });
            }
            config.data_divider = divider;
        }

        log::debug!("fedora configuration: {:?}", config);
        Ok(config)
    }

    pub fn executor(&self) -> Result<ReqwestExecutor, alvincora_http::Error> {
        ReqwestExecutor::new(self.timeout)
    }

    pub fn converter_factory(&self) -> ConverterFactory {
        ConverterFactory::with_data_divider(&self.data_divider)
    }
}

/// Whole seconds, greater than zero.
pub fn parse_timeout(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        message: message.to_string(),
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(&e.to_string())),
    }
}
