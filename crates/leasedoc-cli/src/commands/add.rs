//! `leasedoc add-text` / `leasedoc add-file` — create templates.
//!
//! Responsibility: translate CLI arguments into a draft, drive the
//! workbench, and display results. No business logic lives here.

use tracing::{info, instrument};

use leasedoc_adapters::render_html;
use leasedoc_core::{
    application::TemplateWorkbench,
    domain::{TemplateKind, TemplatePayload},
};

use crate::{
    cli::{AddFileArgs, AddTextArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `leasedoc add-text`.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute_text(
    args: AddTextArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let fields = super::parse_fields(&args.fields)?;
    let html = render_html(&args.contents, &fields);
    let lease = super::lease_context(args.lease, &config);

    let service = super::open_service(&global, &config)?;
    let mut bench = TemplateWorkbench::new(service);

    bench.open_new(TemplateKind::Text).map_err(core_err)?;
    bench.rename(TemplateKind::Text, &args.name).map_err(core_err)?;
    bench
        .replace_payload(
            TemplateKind::Text,
            TemplatePayload::Text {
                contents: args.contents,
                html,
            },
        )
        .map_err(core_err)?;

    let saved = bench
        .save(TemplateKind::Text, lease.as_ref())
        .map_err(CliError::Core)?;

    info!(id = %saved.id, "Text template created");
    report_created(&saved, lease.as_ref(), &output)
}

/// Execute `leasedoc add-file`.
#[instrument(skip_all, fields(name = %args.name))]
pub fn execute_file(
    args: AddFileArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let lease = super::lease_context(args.lease, &config);

    let service = super::open_service(&global, &config)?;
    let mut bench = TemplateWorkbench::new(service);

    bench.open_new(TemplateKind::FileDescriptor).map_err(core_err)?;
    bench
        .rename(TemplateKind::FileDescriptor, &args.name)
        .map_err(core_err)?;
    bench
        .replace_payload(
            TemplateKind::FileDescriptor,
            TemplatePayload::FileDescriptor {
                description: args.description,
                has_expiry_date: args.expires,
            },
        )
        .map_err(core_err)?;

    let saved = bench
        .save(TemplateKind::FileDescriptor, lease.as_ref())
        .map_err(CliError::Core)?;

    info!(id = %saved.id, "File-descriptor template created");
    report_created(&saved, lease.as_ref(), &output)
}

fn core_err(e: leasedoc_core::domain::DomainError) -> CliError {
    CliError::Core(e.into())
}

fn report_created(
    template: &leasedoc_core::domain::Template,
    lease: Option<&leasedoc_core::domain::ResourceId>,
    output: &OutputManager,
) -> CliResult<()> {
    output.success(&format!(
        "Template '{}' created ({})",
        template.name, template.id
    ))?;
    match lease {
        Some(lease) => output.print(&format!("  linked to lease {lease}"))?,
        None => output.info("  not linked to any lease yet")?,
    }
    Ok(())
}
