// src/config.rs

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use log::warn;

use crate::settings::{clamp_rate, clamp_volume, Settings, DEFAULT_RATE, DEFAULT_VOLUME};

const CONFIG_FILE: &str = "config.json";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub text_file: PathBuf,
    pub rate: i64,
    pub volume: f32,
    pub custom_voice: Option<String>,
    pub language: Option<String>, // "de" or "en"; None means detect from the system
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_file: PathBuf::from("text.txt"),
            rate: DEFAULT_RATE as i64,
            volume: DEFAULT_VOLUME,
            custom_voice: None,
            language: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                Config::default()
            }),
            // a missing file is the normal case
            Err(_) => Config::default(),
        }
    }

    pub fn initial_settings(&self) -> Settings {
        Settings {
            rate: clamp_rate(self.rate),
            volume: clamp_volume(self.volume),
            ..Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.initial_settings(), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "rate": 900, "language": "en" }"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.language.as_deref(), Some("en"));
        assert_eq!(config.text_file, PathBuf::from("text.txt"));
        assert_eq!(config.initial_settings().rate, 400);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
