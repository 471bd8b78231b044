//! Implementation of the `leasedoc list` command.

use leasedoc_core::domain::ResourceId;

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::open_service(&global, &config)?;

    let templates = match &args.lease {
        Some(lease) => service
            .templates_for(&ResourceId::new(lease.clone()))
            .map_err(CliError::Core)?,
        None => service.all().map_err(CliError::Core)?,
    };

    match args.format {
        ListFormat::Table => {
            match &args.lease {
                Some(lease) => output.header(&format!("Templates linked to {lease}:"))?,
                None => output.header("All templates:")?,
            }
            if templates.is_empty() {
                output.print("  (none)")?;
            }
            for template in &templates {
                output.print(&format!(
                    "  {}  {:<14}  {}  ({} lease{})",
                    template.id,
                    template.kind().to_string(),
                    template.name,
                    template.link_count(),
                    if template.link_count() == 1 { "" } else { "s" },
                ))?;
            }
        }

        ListFormat::Json => {
            // Serialise as a JSON array to stdout (bypasses OutputManager
            // because JSON output must be parseable even in non-TTY pipes).
            let json = serde_json::to_string_pretty(&templates).unwrap_or_else(|_| "[]".into());
            println!("{json}");
        }

        ListFormat::List => {
            for t in &templates {
                println!("{}", t.name);
            }
        }

        ListFormat::Csv => {
            println!("id,name,kind,links");
            for t in &templates {
                println!(
                    "{},{},{},{}",
                    t.id,
                    escape_csv(&t.name),
                    t.kind(),
                    t.link_count()
                );
            }
        }
    }

    Ok(())
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_escaping_quotes_commas() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
