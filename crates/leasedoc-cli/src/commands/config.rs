//! `leasedoc config` — read and write configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value:?}"))?;
        }

        ConfigCommands::Set { key, value } => {
            let mut updated = config;
            set_config_value(&mut updated, &key, &value)?;
            write_config(&updated)?;
            output.success(&format!("Set {key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.lease" => Ok(config.defaults.lease.clone().unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "store.path" => Ok(config
            .store
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => Err(unknown_key(key)),
    }
}

fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> CliResult<()> {
    match key {
        "defaults.lease" => config.defaults.lease = Some(value.to_string()),
        "output.no_color" => {
            config.output.no_color = value.parse().map_err(|_| CliError::ConfigError {
                message: format!("'{value}' is not a boolean"),
                source: None,
            })?;
        }
        "output.format" => config.output.format = value.to_string(),
        "store.path" => config.store.path = Some(value.into()),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

fn write_config(config: &AppConfig) -> CliResult<()> {
    let path = AppConfig::config_path();
    let toml = toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, toml)?;
    Ok(())
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
