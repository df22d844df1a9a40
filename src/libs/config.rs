//! Configuration for the habitlog store.
//!
//! Settings live in a JSON file inside the platform data directory resolved
//! by [`DataStorage`]. Every field has a default, so a missing file or a
//! partially written one still yields a usable configuration.
//!
//! ## File Location
//!
//! - **`$HABITLOG_DATA_DIR`**: when set, used as-is
//! - **Windows**: `%LOCALAPPDATA%\habitlog\habitlog\config.json`
//! - **macOS**: `~/Library/Application Support/habitlog/habitlog/config.json`
//! - **Linux**: `~/.local/share/habitlog/habitlog/config.json`
//!
//! ```rust,no_run
//! use habitlog::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.pinned_category = "Favourites".to_string();
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_info};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_DB_FILE_NAME: &str = "habitlog.db";
pub const DEFAULT_PINNED_CATEGORY: &str = "Pinned";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite file. A bare file name is placed in the data directory, an
    /// absolute path is used verbatim.
    pub database: String,

    /// Title of the reserved category that holds pinned trackers.
    pub pinned_category: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: DEFAULT_DB_FILE_NAME.to_string(),
            pinned_category: DEFAULT_PINNED_CATEGORY.to_string(),
        }
    }
}

impl Config {
    /// Reads `config.json` from the data directory, falling back to defaults
    /// when the file does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads a configuration file from an explicit location.
    ///
    /// A missing file is not an error; a file that cannot be parsed is.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            msg_debug!(Message::ConfigFileNotFound);
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        msg_debug!(Message::ConfigLoaded(path.display().to_string()));
        Ok(config)
    }

    /// Writes the configuration to `config.json` in the data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        msg_info!(Message::ConfigSaved(path.display().to_string()));
        Ok(())
    }

    /// Resolves the database location.
    pub fn database_path(&self) -> Result<PathBuf> {
        let database = Path::new(&self.database);
        if database.is_absolute() {
            return Ok(database.to_path_buf());
        }
        DataStorage::new().get_path(&self.database)
    }
}
