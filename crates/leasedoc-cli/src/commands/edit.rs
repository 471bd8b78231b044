//! `leasedoc edit` — modify an existing template.
//!
//! Loads the entity, routes it to the editor of its own kind, applies the
//! requested changes, and saves. Kind-specific flags are checked against
//! the entity's actual kind up front: `--contents` belongs to text
//! templates, `--description`/`--expires` to file descriptors.

use tracing::{info, instrument};

use leasedoc_adapters::render_html;
use leasedoc_core::domain::{TemplateId, TemplateKind, TemplatePayload};
use leasedoc_core::application::TemplateWorkbench;

use crate::{
    cli::{EditArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(id = %args.id))]
pub fn execute(
    args: EditArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::open_service(&global, &config)?;
    let template = service
        .get(&TemplateId::new(args.id.clone()))
        .map_err(CliError::Core)?;
    let kind = template.kind();

    reject_wrong_kind_flags(&args, kind)?;

    let lease = super::lease_context(args.lease.clone(), &config);

    let mut bench = TemplateWorkbench::new(service);
    bench
        .open_editor(&template)
        .map_err(|e| CliError::Core(e.into()))?;

    if let Some(name) = &args.name {
        bench
            .rename(kind, name.clone())
            .map_err(|e| CliError::Core(e.into()))?;
    }

    if let Some(payload) = updated_payload(&args, &template.payload)? {
        bench
            .replace_payload(kind, payload)
            .map_err(|e| CliError::Core(e.into()))?;
    }

    let saved = bench.save(kind, lease.as_ref()).map_err(CliError::Core)?;

    info!(id = %saved.id, "Template updated");
    output.success(&format!("Template '{}' updated ({})", saved.name, saved.id))?;
    Ok(())
}

/// Kind-specific flags must match the stored entity's kind.
fn reject_wrong_kind_flags(args: &EditArgs, kind: TemplateKind) -> CliResult<()> {
    match kind {
        TemplateKind::Text => {
            if args.description.is_some() || args.expires.is_some() {
                return Err(CliError::InvalidInput {
                    message: format!(
                        "'{}' is a text template; --description/--expires do not apply",
                        args.id
                    ),
                    source: None,
                });
            }
        }
        TemplateKind::FileDescriptor => {
            if args.contents.is_some() || !args.fields.is_empty() {
                return Err(CliError::InvalidInput {
                    message: format!(
                        "'{}' is a file-descriptor template; --contents/--field do not apply",
                        args.id
                    ),
                    source: None,
                });
            }
        }
    }
    Ok(())
}

/// Build the replacement payload, if any flag asks for one.
fn updated_payload(
    args: &EditArgs,
    current: &TemplatePayload,
) -> CliResult<Option<TemplatePayload>> {
    match current {
        TemplatePayload::Text { .. } => {
            let Some(contents) = &args.contents else {
                return Ok(None);
            };
            let fields = super::parse_fields(&args.fields)?;
            Ok(Some(TemplatePayload::Text {
                contents: contents.clone(),
                html: render_html(contents, &fields),
            }))
        }
        TemplatePayload::FileDescriptor {
            description,
            has_expiry_date,
        } => {
            if args.description.is_none() && args.expires.is_none() {
                return Ok(None);
            }
            Ok(Some(TemplatePayload::FileDescriptor {
                description: args
                    .description
                    .clone()
                    .unwrap_or_else(|| description.clone()),
                has_expiry_date: args.expires.unwrap_or(*has_expiry_date),
            }))
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
