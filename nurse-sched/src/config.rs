use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::records::Entity;

pub const CONFIG_FILE: &str = "nursesched.json";

/// Where save files and the log live, and how chatty the log is
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_file: PathBuf::from("logs/nursesched.log"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Builds the configuration from, in increasing precedence: defaults,
    /// the JSON config file, environment variables and the first
    /// command-line argument (data directory).
    pub fn load(args: &[String]) -> Result<Self, ConfigError> {
        let path = env::var("NURSESCHED_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(dir) = env::var("NURSESCHED_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(level) = env::var("NURSESCHED_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(dir) = args.get(1) {
            config.data_dir = PathBuf::from(dir);
        }

        config.level_filter()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Save file of one entity inside the data directory
    pub fn save_file(&self, entity: Entity) -> PathBuf {
        let name = match entity {
            Entity::Appointment => "Appt.txt",
            Entity::Shift => "Shift.txt",
            Entity::Patient => "Patient.txt",
            Entity::Medicine => "Medicine.txt",
        };
        self.data_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "data_dir": "/tmp/nurse" }"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/nurse"));
        assert_eq!(config.log_file, PathBuf::from("logs/nursesched.log"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Config::from_json("{ data_dir: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_level_filter() {
        let mut config = Config::default();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
        config.log_level = "DEBUG".to_string();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        config.log_level = "loud".to_string();
        assert!(matches!(config.level_filter(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn test_save_files_live_in_data_dir() {
        let config = Config::default();
        assert_eq!(config.save_file(Entity::Appointment), PathBuf::from("data/Appt.txt"));
        assert_eq!(config.save_file(Entity::Medicine), PathBuf::from("data/Medicine.txt"));
    }
}
