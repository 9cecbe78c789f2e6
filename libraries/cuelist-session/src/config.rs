//! Session configuration
//!
//! Loaded once at startup from `CUELIST_`-prefixed environment variables.
//! A malformed configuration is fatal: `load` fails and no store connection
//! is ever attempted.

use config::{Config, Environment};
use cuelist_core::{CuelistError, Result};
use serde::Deserialize;
use url::Url;

fn default_database_url() -> String {
    "sqlite://cuelist.db".to_string()
}

fn default_share_base_url() -> String {
    "https://cuelist.app/share".to_string()
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database url handed to the store (`CUELIST_DATABASE_URL`)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Base url share links are rendered against (`CUELIST_SHARE_BASE_URL`)
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
}

impl AppConfig {
    /// Load and validate configuration from the environment
    pub fn load() -> Result<Self> {
        let source = Config::builder()
            .add_source(Environment::with_prefix("CUELIST"))
            .build()
            .map_err(|e| CuelistError::config(e.to_string()))?;

        let config: AppConfig = source
            .try_deserialize()
            .map_err(|e| CuelistError::config(e.to_string()))?;

        config.share_base()?;
        Ok(config)
    }

    /// The share base url, parsed
    pub fn share_base(&self) -> Result<Url> {
        Url::parse(&self.share_base_url)
            .map_err(|e| CuelistError::config(format!("invalid share base url: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_and_validation_catches_bad_urls() {
        let config = AppConfig::load().expect("defaults should load");
        assert_eq!(config.database_url, "sqlite://cuelist.db");
        assert!(config.share_base().is_ok());

        let broken = AppConfig {
            database_url: default_database_url(),
            share_base_url: "not a url".to_string(),
        };
        assert!(matches!(
            broken.share_base(),
            Err(CuelistError::Config(_))
        ));
    }
}
