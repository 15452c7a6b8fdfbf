use std::fs;
use std::io;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::remote::events::{CommandId, InstanceSettings};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OscConfig {
    /// OSC address path every button press is sent on.
    pub address: String,
    /// Local bind address of the shared UDP socket.
    pub bind_address: String,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            address: "/action".to_string(),
            bind_address: "0.0.0.0:0".to_string(),
        }
    }
}

/// Tuple installed for an instance that appears without settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub ip: String,
    pub port: u16,
    pub command_id: CommandId,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 8000,
            command_id: CommandId::Text("defaultCommand".to_string()),
        }
    }
}

impl DefaultsConfig {
    pub fn settings(&self) -> InstanceSettings {
        InstanceSettings {
            destination_address: self.ip.clone(),
            destination_port: self.port,
            command: self.command_id.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: String,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "plugin_debug.log".to_string(),
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Host the plugin WebSocket lives on; the port comes from the command line.
    pub host: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string() }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub osc: OscConfig,
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
    pub host: HostConfig,
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Load the config file at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    match fs::read_to_string(path) {
        Ok(raw) => Config::from_json(&raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.osc.address, "/action");
        assert_eq!(config.osc.bind_address, "0.0.0.0:0");
        assert_eq!(config.logging.file, "plugin_debug.log");
        assert_eq!(config.logging.level_filter(), LevelFilter::Info);
        assert_eq!(config.host.host, "127.0.0.1");
        let defaults = config.defaults.settings();
        assert_eq!(defaults.destination_address, "127.0.0.1");
        assert_eq!(defaults.destination_port, 8000);
        assert_eq!(defaults.command, CommandId::Text("defaultCommand".to_string()));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_json(
            r#"{"osc":{"address":"/reaper/action"},"defaults":{"command_id":40044},"logging":{"level":"debug"}}"#,
        )
        .unwrap();
        assert_eq!(config.osc.address, "/reaper/action");
        assert_eq!(config.osc.bind_address, "0.0.0.0:0");
        assert_eq!(config.defaults.port, 8000);
        assert_eq!(config.defaults.command_id, CommandId::Int(40044));
        assert_eq!(config.logging.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let logging = LoggingConfig { level: "chatty".to_string(), ..Default::default() };
        assert_eq!(logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Config::from_json("{not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config(Path::new("definitely/not/here/config.json")).unwrap();
        assert_eq!(config.defaults.port, 8000);
    }
}
