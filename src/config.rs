//! Translator configuration.
//!
//! ```toml
//! dialect = "mysql"
//!
//! [entities.User]
//! table = "users"
//! primary_keys = ["Id"]
//! fields = [{ name = "Id" }, { name = "Name", column = "user_name" }]
//! relations = [{ target = "Order", pairs = [["Id", "UserId"]] }]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{TranslateError, TranslateResult};
use crate::metadata::EntityRegistry;

const CONFIG_DIR: &str = "querymill";
const CONFIG_FILE: &str = "config.toml";

/// Dialect plus entity metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub entities: EntityRegistry,
}

impl TranslatorConfig {
    pub fn from_toml(content: &str) -> TranslateResult<Self> {
        let config: TranslatorConfig = toml::from_str(content)?;
        if config.entities.is_empty() {
            return Err(TranslateError::Config("no entities configured".to_string()));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> TranslateResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// `<config_dir>/querymill/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, falling back to [`TranslatorConfig::default_path`].
    pub fn load_or_default(path: Option<&Path>) -> TranslateResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()
                .ok_or_else(|| TranslateError::Config("cannot determine config directory".to_string()))?,
        };
        if !path.exists() {
            return Err(TranslateError::Config(format!("{} not found", path.display())));
        }
        Self::load(path)
    }
}
