use crate::commands::{CmdMessage, CmdResult};
use crate::config::RolodexConfig;
use crate::error::{Result, RolodexError};
use log::warn;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut config = load_or_default(config_dir, &mut result)?;

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            let value = config
                .get(&key)
                .ok_or_else(|| RolodexError::Api(format!("Unknown config key: {}", key)))?;
            result.add_message(CmdMessage::info(value));
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value).map_err(RolodexError::Api)?;
            // Saving over an unparsable file replaces it with defaults plus this key.
            config.save(config_dir)?;

            let display_val = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result.with_config(config))
        }
    }
}

/// An unparsable config file reads as defaults, with a warning, so it can
/// be repaired with `Set`. Read failures are still errors.
fn load_or_default(config_dir: &Path, result: &mut CmdResult) -> Result<RolodexConfig> {
    match RolodexConfig::load(config_dir) {
        Err(RolodexError::Serialization(e)) => {
            warn!(
                "Ignoring unreadable config in {}: {}",
                config_dir.display(),
                e
            );
            result.add_message(CmdMessage::warning(format!(
                "Config file is unreadable ({}), showing defaults",
                e
            )));
            Ok(RolodexConfig::default())
        }
        other => other,
    }
}
