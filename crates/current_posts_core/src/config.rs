//! Module configuration loaded from JSON.
//!
//! ```json
//! {
//!   "base_path": "/",
//!   "database_path": "/var/lib/site/items.sqlite3",
//!   "log": { "level": "info", "dir": "/var/log/site" },
//!   "messages": { "block.empty": "No posts available." }
//! }
//! ```
//!
//! Every field is optional.

use crate::i18n::{CatalogError, MessageCatalog};
use crate::logging::LogSettings;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_BASE_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Prefix joined in front of item paths; starts and ends with `/`.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub log: Option<LogSettings>,
    /// Message overrides keyed by message id.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            database_path: None,
            log: None,
            messages: BTreeMap::new(),
        }
    }
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

impl ModuleConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.starts_with('/') || !self.base_path.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "base_path must start and end with `/`, got `{}`",
                self.base_path
            )));
        }
        self.message_catalog()?;
        Ok(())
    }

    /// Builds the message table from `messages`.
    pub fn message_catalog(&self) -> Result<MessageCatalog, ConfigError> {
        MessageCatalog::from_entries(
            self.messages
                .iter()
                .map(|(key, text)| (key.as_str(), text.as_str())),
        )
        .map_err(ConfigError::Messages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse(String),
    Invalid(String),
    Messages(CatalogError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "failed to read config `{}`: {message}", path.display())
            }
            Self::Parse(message) => write!(f, "invalid config: {message}"),
            Self::Invalid(message) => write!(f, "invalid config value: {message}"),
            Self::Messages(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Messages(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ModuleConfig};
    use crate::i18n::{MessageId, Translate};

    #[test]
    fn empty_document_uses_defaults() {
        let config = ModuleConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ModuleConfig::default());
        assert_eq!(config.base_path, "/");
    }

    #[test]
    fn full_document_parses_every_section() {
        let config = ModuleConfig::from_json_str(
            r#"{
                "base_path": "/blog/",
                "database_path": "/tmp/items.sqlite3",
                "log": { "level": "warn", "dir": "/tmp/logs" },
                "messages": { "block.empty": "Nothing new." }
            }"#,
        )
        .unwrap();
        assert_eq!(config.base_path, "/blog/");
        assert_eq!(config.log.as_ref().map(|log| log.level.as_str()), Some("warn"));
        let catalog = config.message_catalog().unwrap();
        assert_eq!(catalog.translate(MessageId::NoPosts), "Nothing new.");
    }

    #[test]
    fn invalid_base_path_is_rejected() {
        let err = ModuleConfig::from_json_str(r#"{"base_path": "blog"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_message_key_is_rejected() {
        let err = ModuleConfig::from_json_str(r#"{"messages": {"nope": "x"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Messages(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ModuleConfig::from_json_str(r#"{"cache": true}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
