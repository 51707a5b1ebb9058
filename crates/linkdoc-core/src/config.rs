//! Engine configuration.
//!
//! Configuration is plain data: hosts build it with `Default`, struct
//! literals, or a TOML document, and pass it explicitly to the serializer.

use crate::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid engine config: page sizes must be non-zero")]
    ZeroPageSize,
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Page size used when `page[size]` is absent or unparsable.
    pub default_page_size: u32,

    /// Upper bound applied to requested page sizes.
    pub max_page_size: Option<u32>,

    /// Default of `page[count]` when the request omits it.
    pub count_by_default: bool,

    /// Fallback base URL for links when the request supplies none.
    pub base_url: Option<String>,

    /// Emit `links.self` on every resource object.
    pub resource_links: bool,

    /// Emit a top-level `jsonapi` object with this version.
    pub jsonapi_version: Option<String>,
}

impl EngineConfig {
    /// Parse a TOML document into a validated config.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.max_page_size == Some(0) {
            return Err(ConfigError::ZeroPageSize);
        }

        Ok(())
    }

    /// Resolve a requested page size against the default and the clamp.
    #[must_use]
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        let size = requested
            .filter(|size| *size > 0)
            .unwrap_or(self.default_page_size)
            .max(1);

        match self.max_page_size {
            Some(max) => size.min(max),
            None => size,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: Some(100),
            count_by_default: true,
            base_url: None,
            resource_links: false,
            jsonapi_version: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_only_named_keys() {
        let config = EngineConfig::from_toml_str(
            r#"
            default_page_size = 25
            base_url = "https://api.example.test"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, Some(100));
        assert!(config.count_by_default);
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.test"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = EngineConfig::from_toml_str("default_page_size = 0")
            .expect_err("zero page size must fail");

        assert!(matches!(err, ConfigError::ZeroPageSize));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = EngineConfig::from_toml_str("page_sise = 3").expect_err("typo must fail");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn page_size_falls_back_and_clamps() {
        let config = EngineConfig::default();

        assert_eq!(config.page_size(None), 10);
        assert_eq!(config.page_size(Some(0)), 10);
        assert_eq!(config.page_size(Some(15)), 15);
        assert_eq!(config.page_size(Some(5_000)), 100);

        let unbounded = EngineConfig {
            max_page_size: None,
            ..EngineConfig::default()
        };
        assert_eq!(unbounded.page_size(Some(5_000)), 5_000);
    }
}
