use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LibrisError, Result};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "libris.json";

/// Configuration for libris, stored as config.json in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibrisConfig {
    /// Filename of the JSON store inside the data directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl Default for LibrisConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }
}

impl LibrisConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LibrisError::Io)?;
        let config: LibrisConfig =
            serde_json::from_str(&content).map_err(LibrisError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LibrisError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LibrisError::Serialization)?;
        fs::write(config_path, content).map_err(LibrisError::Io)?;
        Ok(())
    }

    pub fn get_data_file(&self) -> &str {
        &self.data_file
    }

    /// Set the store filename (ensures a .json extension).
    pub fn set_data_file(&mut self, name: &str) {
        if name.ends_with(".json") {
            self.data_file = name.to_string();
        } else {
            self.data_file = format!("{}.json", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LibrisConfig::default();
        assert_eq!(config.data_file, "libris.json");
    }

    #[test]
    fn test_set_data_file_normalizes_extension() {
        let mut config = LibrisConfig::default();
        config.set_data_file("branch-a");
        assert_eq!(config.data_file, "branch-a.json");
        config.set_data_file("branch-b.json");
        assert_eq!(config.data_file, "branch-b.json");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibrisConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, LibrisConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LibrisConfig::default();
        config.set_data_file("campus");
        config.save(dir.path()).unwrap();

        let loaded = LibrisConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.data_file, "campus.json");
    }
}
