use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    dlive::DLIVE_MAX_BASE_CHANNEL,
    error::{AppError, ErrorType},
};

pub const DEFAULT_CONFIG_FILE: &str = "dlive-control.yaml";

/// Application settings, read from a YAML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the mixrack
    pub host: String,
    /// MIDI over TCP port of the mixrack
    pub midi_port: u16,
    /// 0-based base MIDI channel
    pub midi_channel: u8,
    /// Where the control console listens
    pub listen_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "192.168.1.70".to_string(),
            midi_port: 51328,
            midi_channel: 0,
            listen_address: "127.0.0.1:9999".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::new(ErrorType::ConfigError, e.to_string()))?;
        config.validate()?;
        return Ok(config);
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::new(
                ErrorType::ConfigError,
                format!("{}: {}", path.as_ref().display(), e),
            )
        })?;
        return Self::from_yaml(&content);
    }

    /// Loads the given file, or the default file when present, or falls back to defaults.
    pub fn resolve(path: Option<String>) -> Result<Self, AppError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        if Path::new(DEFAULT_CONFIG_FILE).is_file() {
            return Self::load(DEFAULT_CONFIG_FILE);
        }
        log::info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        return Ok(Self::default());
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.midi_channel > DLIVE_MAX_BASE_CHANNEL {
            return Err(AppError::new(
                ErrorType::ConfigError,
                format!(
                    "midi_channel {} out of range (0-{})",
                    self.midi_channel, DLIVE_MAX_BASE_CHANNEL
                ),
            ));
        }
        if self.midi_port == 0 {
            return Err(AppError::new(
                ErrorType::ConfigError,
                "midi_port must not be 0".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(AppError::new(
                ErrorType::ConfigError,
                "host must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let Ok(config) = Config::from_yaml("{}") else {
            panic!();
        };
        assert_eq!(config, Config::default());
        assert_eq!(config.midi_port, 51328);
    }

    #[test]
    fn test_partial_override() {
        let yaml = "host: 10.0.0.5\nmidi_channel: 11\n";
        let Ok(config) = Config::from_yaml(yaml) else {
            panic!();
        };
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.midi_channel, 11);
        assert_eq!(config.listen_address, "127.0.0.1:9999");
    }

    #[test]
    fn test_rejects_base_channel_above_eleven() {
        let Err(e) = Config::from_yaml("midi_channel: 12\n") else {
            panic!();
        };
        assert_eq!(e.error_type, ErrorType::ConfigError);
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let Err(e) = Config::from_yaml("midi_port: [1, 2]\n") else {
            panic!();
        };
        assert_eq!(e.error_type, ErrorType::ConfigError);
        assert!(Config::from_yaml("midi_port: 0\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let Err(e) = Config::load("does/not/exist.yaml") else {
            panic!();
        };
        assert_eq!(e.error_type, ErrorType::ConfigError);
    }
}
