//! Resolver configuration
//!
//! Loads the supported currency markers and command prefixes from YAML.
//! Every field has a default, so an empty document is a valid config.
//!
//! ```yaml
//! currencies: ["£", "GBP", "$", "USD"]
//! display_currency: GBP
//! command_prefixes: [move, transfer]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::directive::{CurrencySet, Resolver, DEFAULT_CURRENCY_MARKERS};
use crate::error::ConfigError;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "TRANSFER_DIRECTIVE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Currency symbols and codes an amount may carry
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,

    /// Currency code shown in success summaries
    #[serde(default = "default_display_currency")]
    pub display_currency: String,

    /// Command words that introduce a transfer
    #[serde(default = "default_command_prefixes")]
    pub command_prefixes: Vec<String>,
}

fn default_currencies() -> Vec<String> {
    DEFAULT_CURRENCY_MARKERS.iter().map(|m| m.to_string()).collect()
}

fn default_display_currency() -> String {
    "GBP".to_string()
}

fn default_command_prefixes() -> Vec<String> {
    vec!["move".to_string(), "transfer".to_string()]
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            currencies: default_currencies(),
            display_currency: default_display_currency(),
            command_prefixes: default_command_prefixes(),
        }
    }
}

impl ResolverConfig {
    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::load_from_str(&content)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `TRANSFER_DIRECTIVE_CONFIG`, or use the
    /// defaults when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::load_from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currencies.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one currency marker is required".to_string(),
            ));
        }
        if self.currencies.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "currency markers can't be empty".to_string(),
            ));
        }
        if self.display_currency.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "display_currency can't be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .command_prefixes
            .iter()
            .find(|p| p.is_empty() || p.chars().any(char::is_whitespace))
        {
            return Err(ConfigError::Invalid(format!(
                "command prefix {bad:?} must be a single non-empty word"
            )));
        }
        Ok(())
    }

    pub fn currency_set(&self) -> CurrencySet {
        CurrencySet::new(self.currencies.iter().cloned())
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.currency_set())
    }
}
