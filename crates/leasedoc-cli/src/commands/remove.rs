//! `leasedoc remove` — delete-or-unlink a template from a lease's view.
//!
//! The decision itself lives in the core association service; this handler
//! only gathers the lease context, confirms with the user, and reports which
//! of the two outcomes happened.

use tracing::{info, instrument};

use leasedoc_core::{application::RemovalOutcome, domain::TemplateId};

use crate::{
    cli::{RemoveArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(id = %args.id))]
pub fn execute(
    args: RemoveArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // Removal is always evaluated against a lease; creating orphans is fine,
    // but "remove from nowhere" is not meaningful.
    let lease = super::lease_context(args.lease, &config).ok_or(CliError::LeaseRequired)?;

    let service = super::open_service(&global, &config)?;
    let template = service
        .get(&TemplateId::new(args.id))
        .map_err(CliError::Core)?;

    if !global.quiet && !args.yes {
        let prompt = if template.link_count() > 1 {
            format!(
                "Remove '{}' from lease {}? ({} other lease(s) keep it)",
                template.name,
                lease,
                template.link_count() - 1,
            )
        } else {
            format!(
                "Delete '{}'? No other lease references it; this is permanent.",
                template.name,
            )
        };
        if !super::confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    let outcome = service.remove(&template, &lease).map_err(CliError::Core)?;

    match outcome {
        RemovalOutcome::Deleted => {
            info!(id = %template.id, "Template deleted");
            output.success(&format!("Template '{}' deleted", template.name))?;
        }
        RemovalOutcome::Unlinked { remaining } => {
            info!(id = %template.id, remaining = remaining.len(), "Template unlinked");
            output.success(&format!(
                "Template '{}' unlinked from lease {} ({} lease(s) still use it)",
                template.name,
                lease,
                remaining.len(),
            ))?;
        }
    }

    Ok(())
}
