//! Service location.

use reqwest::Url;
use thiserror::Error;

/// Used when `ITEM_DESK_API_URL` is not set at build time (the backend's default port)
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API base URL '{0}' cannot carry path segments")]
    NotABase(String),
}

/// Remote service configuration, fixed for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parse the base into a URL that accepts path segments
    pub fn parsed_base(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(self.base_url.clone()));
        }
        Ok(url)
    }
}

impl Default for ApiConfig {
    /// Browsers have no process environment, so the override is read at compile time.
    fn default() -> Self {
        Self::new(option_env!("ITEM_DESK_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}
