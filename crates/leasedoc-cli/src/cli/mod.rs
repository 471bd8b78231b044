//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "leasedoc",
    bin_name = "leasedoc",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f4c4} Template documents for lease records",
    long_about = "Leasedoc manages template documents (free text or uploaded \
                  file descriptors) shared across lease records. Removing a \
                  template from one lease never destroys it for leases that \
                  still use it.",
    after_help = "EXAMPLES:\n\
        \x20 leasedoc add-text \"Welcome letter\" --contents 'Dear {{tenant}},' --lease L1\n\
        \x20 leasedoc add-file \"Insurance\" --description 'Signed policy' --expires --lease L1\n\
        \x20 leasedoc list --lease L1\n\
        \x20 leasedoc remove 7d8f… --lease L1 --yes",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List templates.
    #[command(
        visible_alias = "ls",
        about = "List templates",
        after_help = "EXAMPLES:\n\
            \x20 leasedoc list\n\
            \x20 leasedoc list --lease L1\n\
            \x20 leasedoc list --format json"
    )]
    List(ListArgs),

    /// Create a free-text template.
    #[command(
        visible_alias = "at",
        about = "Create a text template",
        after_help = "EXAMPLES:\n\
            \x20 leasedoc add-text \"Welcome letter\" --contents 'Dear {{tenant}},' --lease L1\n\
            \x20 leasedoc add-text \"Checklist\" --contents 'Keys: {{keys}}' --field keys=3"
    )]
    AddText(AddTextArgs),

    /// Create an uploaded-file descriptor template.
    #[command(
        visible_alias = "af",
        about = "Create a file-descriptor template",
        after_help = "EXAMPLES:\n\
            \x20 leasedoc add-file \"Insurance\" --description 'Signed policy' --expires --lease L1"
    )]
    AddFile(AddFileArgs),

    /// Edit an existing template.
    #[command(
        about = "Edit a template",
        after_help = "EXAMPLES:\n\
            \x20 leasedoc edit 7d8f… --name \"Welcome letter v2\"\n\
            \x20 leasedoc edit 7d8f… --contents 'Dear {{tenant}}, welcome!' --lease L2"
    )]
    Edit(EditArgs),

    /// Remove a template from a lease (delete or unlink).
    #[command(
        visible_alias = "rm",
        about = "Remove a template from a lease",
        after_help = "A template still referenced by other leases is only \
                      unlinked; a template whose last referrer is the given \
                      lease is deleted outright.\n\n\
                      EXAMPLES:\n\
            \x20 leasedoc remove 7d8f… --lease L1\n\
            \x20 leasedoc remove 7d8f… --lease L1 --yes"
    )]
    Remove(RemoveArgs),

    /// Initialise a leasedoc configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 leasedoc init\n\
            \x20 leasedoc init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 leasedoc completions bash > ~/.local/share/bash-completion/completions/leasedoc\n\
            \x20 leasedoc completions zsh  > ~/.zfunc/_leasedoc"
    )]
    Completions(CompletionsArgs),

    /// Manage the leasedoc configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 leasedoc config get defaults.lease\n\
            \x20 leasedoc config list"
    )]
    Config(ConfigCommands),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `leasedoc list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only templates linked to this lease.
    #[arg(short = 'l', long = "lease", value_name = "ID", help = "Filter by lease")]
    pub lease: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── add-text ──────────────────────────────────────────────────────────────────

/// Arguments for `leasedoc add-text`.
#[derive(Debug, Args)]
pub struct AddTextArgs {
    /// Display name of the template.
    #[arg(value_name = "NAME", help = "Template name")]
    pub name: String,

    /// Source markup; may contain `{{field}}` placeholders.
    #[arg(long = "contents", value_name = "TEXT", help = "Template contents")]
    pub contents: String,

    /// Merge field values, `key=value`.
    #[arg(
        long = "field",
        value_name = "KEY=VALUE",
        help = "Merge field (repeatable)"
    )]
    pub fields: Vec<String>,

    /// Lease to link the new template to.
    #[arg(short = 'l', long = "lease", value_name = "ID", help = "Lease context")]
    pub lease: Option<String>,
}

// ── add-file ──────────────────────────────────────────────────────────────────

/// Arguments for `leasedoc add-file`.
#[derive(Debug, Args)]
pub struct AddFileArgs {
    /// Display name of the template.
    #[arg(value_name = "NAME", help = "Template name")]
    pub name: String,

    /// What the uploaded document is.
    #[arg(long = "description", value_name = "TEXT", help = "Document description")]
    pub description: String,

    /// The document carries an expiry date.
    #[arg(long = "expires", help = "Document has an expiry date")]
    pub expires: bool,

    /// Lease to link the new template to.
    #[arg(short = 'l', long = "lease", value_name = "ID", help = "Lease context")]
    pub lease: Option<String>,
}

// ── edit ──────────────────────────────────────────────────────────────────────

/// Arguments for `leasedoc edit`.
///
/// Kind-specific flags are validated against the stored template's kind:
/// `--contents` applies to text templates only, `--description` /
/// `--expires` to file descriptors only.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Identifier of the template to edit.
    #[arg(value_name = "ID", help = "Template identifier")]
    pub id: String,

    /// New display name.
    #[arg(long = "name", value_name = "NAME", help = "Rename the template")]
    pub name: Option<String>,

    /// New contents (text templates).
    #[arg(long = "contents", value_name = "TEXT", help = "Replace contents")]
    pub contents: Option<String>,

    /// Merge field values for re-rendering, `key=value`.
    #[arg(
        long = "field",
        value_name = "KEY=VALUE",
        help = "Merge field (repeatable)"
    )]
    pub fields: Vec<String>,

    /// New description (file-descriptor templates).
    #[arg(long = "description", value_name = "TEXT", help = "Replace description")]
    pub description: Option<String>,

    /// Toggle the expiry-date flag (file-descriptor templates).
    #[arg(long = "expires", value_name = "BOOL", help = "Set expiry-date flag")]
    pub expires: Option<bool>,

    /// Lease context; the saved template is linked to it.
    #[arg(short = 'l', long = "lease", value_name = "ID", help = "Lease context")]
    pub lease: Option<String>,
}

// ── remove ────────────────────────────────────────────────────────────────────

/// Arguments for `leasedoc remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Identifier of the template to remove.
    #[arg(value_name = "ID", help = "Template identifier")]
    pub id: String,

    /// Lease whose view the template is removed from.
    #[arg(short = 'l', long = "lease", value_name = "ID", help = "Lease context")]
    pub lease: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `leasedoc init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `leasedoc completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `leasedoc config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.lease`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
