use crate::error::{Result, RolodexError};
use crate::logging;
use crate::store::StoreOptions;
use crate::validation::Rules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use crate::store::fs_backend::CONFIG_FILENAME;

pub const KEYS: [&str; 3] = ["strict-phone", "pretty-json", "log-level"];

/// Configuration for rolodex, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolodexConfig {
    /// Require phones to be exactly 12 digits
    #[serde(default = "default_true")]
    pub strict_phone: bool,

    /// Indent snapshot files
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Log level when neither RUST_LOG nor --verbose is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            strict_phone: true,
            pretty_json: true,
            log_level: default_log_level(),
        }
    }
}

impl RolodexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RolodexError::Io)?;
        let config: RolodexConfig =
            serde_json::from_str(&content).map_err(RolodexError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RolodexError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RolodexError::Serialization)?;
        fs::write(config_path, content).map_err(RolodexError::Io)?;
        Ok(())
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            rules: Rules {
                strict_phone: self.strict_phone,
            },
            pretty_json: self.pretty_json,
        }
    }

    /// Value of a kebab-case key, formatted for display
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "strict-phone" => Some(self.strict_phone.to_string()),
            "pretty-json" => Some(self.pretty_json.to_string()),
            "log-level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "strict-phone" => self.strict_phone = parse_bool(key, value)?,
            "pretty-json" => self.pretty_json = parse_bool(key, value)?,
            "log-level" => self.log_level = logging::normalize_level(value)?.to_string(),
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("{} expects true or false, got \"{}\"", key, value)),
    }
}
