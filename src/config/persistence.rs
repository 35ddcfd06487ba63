//! Loading profiles from JSON files, with ~/.lootbox/config.json as the
//! default location.

use super::types::GachaConfig;
use crate::core::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{LootError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the default config file. Does not create anything.
pub fn default_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| LootError::config("could not determine home directory"))?;
    Ok(home_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl GachaConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: GachaConfig = serde_json::from_str(&json)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            profiles = config.profiles.len(),
            "loaded gacha config"
        );
        Ok(config)
    }

    /// The default config file if present and valid, otherwise the built-in
    /// profiles.
    pub fn load_or_builtin() -> Self {
        let path = match default_config_path() {
            Ok(p) => p,
            Err(_) => return Self::builtin(),
        };
        if !path.exists() {
            return Self::builtin();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring config file: {e}");
                Self::builtin()
            }
        }
    }

    /// Write as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
