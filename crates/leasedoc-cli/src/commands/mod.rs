//! Command handlers and the plumbing they share.
//!
//! Each handler translates CLI arguments into core service calls and
//! displays results. No business logic lives here.

pub mod add;
pub mod completions;
pub mod config;
pub mod edit;
pub mod init;
pub mod list;
pub mod remove;

use std::path::PathBuf;

use leasedoc_adapters::{JsonFileRepository, MergeFields};
use leasedoc_core::{application::AssociationService, domain::ResourceId};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Resolve the store path: `--store` flag first, then config, then the
/// platform data directory.
pub(crate) fn store_path(global: &GlobalArgs, config: &AppConfig) -> PathBuf {
    global
        .store
        .clone()
        .unwrap_or_else(|| config.store_path())
}

/// Open the JSON store and wire the association service to it.
pub(crate) fn open_service(global: &GlobalArgs, config: &AppConfig) -> CliResult<AssociationService> {
    let repository = JsonFileRepository::open(store_path(global, config)).map_err(CliError::Core)?;
    Ok(AssociationService::new(Box::new(repository)))
}

/// Lease context: the `--lease` flag, falling back to the configured
/// default. `None` is a valid answer (orphan creates).
pub(crate) fn lease_context(flag: Option<String>, config: &AppConfig) -> Option<ResourceId> {
    flag.or_else(|| config.defaults.lease.clone())
        .map(ResourceId::new)
}

/// Parse repeated `--field KEY=VALUE` flags into merge fields.
pub(crate) fn parse_fields(raw: &[String]) -> CliResult<MergeFields> {
    let mut fields = MergeFields::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::InvalidMergeField { raw: pair.clone() })?;
        fields = fields.with_field(key.trim(), value);
    }
    Ok(fields)
}

/// Ask the user for a yes/no confirmation on stdin.
pub(crate) fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{prompt} [y/N] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}

// ── tests ─────────────────────────────────────────────────────────────────────
