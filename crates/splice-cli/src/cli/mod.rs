//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "splice",
    bin_name = "splice",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate module compositions before anything is generated",
    long_about = "Splice checks a blueprint genome against a precomputed artifact \
                  registry: file create conflicts, ownership of enhanced files, and \
                  missing module dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 splice validate genome.json --registry artifacts.json\n\
        \x20 splice validate genome.toml --registry ./registry --layout vite-react --format json\n\
        \x20 splice resolve '{{paths.shared_library}}auth/config.ts'\n\
        \x20 splice completions bash > /usr/share/bash-completion/completions/splice",
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
    /// Validate a genome against the artifact registry.
    #[command(
        visible_alias = "v",
        about = "Validate a genome",
        after_help = "EXAMPLES:\n\
            \x20 splice validate genome.json --registry artifacts.json\n\
            \x20 splice validate genome.json --layout-file ./remix.toml\n\
            \x20 splice validate genome.json --strict --format json"
    )]
    Validate(ValidateArgs),

    /// Resolve one path template.
    #[command(
        about = "Resolve a path template",
        after_help = "EXAMPLES:\n\
            \x20 splice resolve '{{paths.shared_library}}auth/config.ts'\n\
            \x20 splice resolve '{{paths.components}}{{project.theme}}/button.tsx' --param theme=slate\n\
            \x20 splice resolve '{{paths.app_root}}chat/page.tsx' --layout tanstack-start"
    )]
    Resolve(ResolveArgs),

    /// List modules in the artifact registry.
    #[command(
        visible_alias = "ls",
        about = "List registered modules",
        after_help = "EXAMPLES:\n\
            \x20 splice list --registry artifacts.json\n\
            \x20 splice list --format json"
    )]
    List(ListArgs),

    /// Show built-in path layouts.
    #[command(
        about = "Show path layouts",
        after_help = "EXAMPLES:\n\
            \x20 splice layouts\n\
            \x20 splice layouts nextjs"
    )]
    Layouts(LayoutsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 splice completions bash > ~/.local/share/bash-completion/completions/splice\n\
            \x20 splice completions zsh  > ~/.zfunc/_splice\n\
            \x20 splice completions fish > ~/.config/fish/completions/splice.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Splice configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 splice config get registry.path\n\
            \x20 splice config list\n\
            \x20 splice config path"
    )]
    Config(ConfigCommands),
}

// ── shared layout selection ───────────────────────────────────────────────────

/// Which path layout to resolve `{{paths.*}}` against.
#[derive(Debug, Clone, Default, Args)]
pub struct LayoutArgs {
    /// Built-in layout name.
    #[arg(
        short = 'l',
        long = "layout",
        value_name = "NAME",
        help = "Built-in layout (nextjs, vite-react, tanstack-start)"
    )]
    pub layout: Option<String>,

    /// Layout table file.
    #[arg(
        long = "layout-file",
        value_name = "FILE",
        conflicts_with = "layout",
        help = "TOML layout table to use instead of a built-in layout"
    )]
    pub layout_file: Option<PathBuf>,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `splice validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Genome document (JSON or TOML).
    #[arg(value_name = "GENOME", help = "Genome file to validate")]
    pub genome: PathBuf,

    /// Artifact registry: a manifest file or a descriptor directory.
    #[arg(
        short = 'r',
        long = "registry",
        value_name = "PATH",
        help = "Artifact manifest file or registry directory"
    )]
    pub registry: Option<PathBuf>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Report format.
    #[arg(long = "format", value_enum, help = "Report format")]
    pub format: Option<ReportFormat>,

    /// Treat warnings as failures.
    #[arg(long = "strict", help = "Fail when the report contains warnings")]
    pub strict: bool,
}

/// Output format for the validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Grouped human-readable report.
    Human,
    /// The `ValidationResult` as JSON.
    Json,
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `splice resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Template containing `{{family.key}}` tokens.
    #[arg(value_name = "TEMPLATE", help = "Path template to resolve")]
    pub template: String,

    /// Module parameter for `{{project.<key>}}`.
    #[arg(
        short = 'p',
        long = "param",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Module parameter (repeatable)"
    )]
    pub params: Vec<(String, String)>,

    /// Feature flag for `{{integration.features.<key>}}`.
    #[arg(
        short = 'f',
        long = "feature",
        value_name = "KEY=BOOL",
        value_parser = parse_feature,
        help = "Feature flag (repeatable)"
    )]
    pub features: Vec<(String, bool)>,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Parse `key=value`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

/// Parse `key=true|false`.
pub fn parse_feature(raw: &str) -> Result<(String, bool), String> {
    let (key, value) = parse_key_value(raw)?;
    let enabled = match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => true,
        "false" | "no" | "off" | "0" => false,
        other => return Err(format!("expected a boolean for '{key}', got '{other}'")),
    };
    Ok((key, enabled))
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `splice list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Artifact registry to list.
    #[arg(
        short = 'r',
        long = "registry",
        value_name = "PATH",
        help = "Artifact manifest file or registry directory"
    )]
    pub registry: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` and `layouts` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── layouts ───────────────────────────────────────────────────────────────────

/// Arguments for `splice layouts`.
#[derive(Debug, Args)]
pub struct LayoutsArgs {
    /// Show the table of one layout.
    #[arg(value_name = "NAME", help = "Layout to show in full")]
    pub name: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `splice completions`.
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

/// Subcommands for `splice config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from([
            "splice",
            "validate",
            "genome.json",
            "--registry",
            "artifacts.json",
            "--layout",
            "vite-react",
            "--strict",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.genome, PathBuf::from("genome.json"));
        assert_eq!(args.layout.layout.as_deref(), Some("vite-react"));
        assert!(args.strict);
        assert!(args.format.is_none());
    }

    #[test]
    fn layout_and_layout_file_conflict() {
        let result = Cli::try_parse_from([
            "splice",
            "validate",
            "genome.json",
            "--layout",
            "nextjs",
            "--layout-file",
            "remix.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn resolve_collects_params_and_features() {
        let cli = Cli::parse_from([
            "splice",
            "resolve",
            "{{project.theme}}/x.ts",
            "--param",
            "theme=slate",
            "-f",
            "dark=on",
        ]);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected Resolve command");
        };
        assert_eq!(args.params, vec![("theme".to_string(), "slate".to_string())]);
        assert_eq!(args.features, vec![("dark".to_string(), true)]);
    }

    #[test]
    fn key_value_requires_equals() {
        assert!(parse_key_value("theme").is_err());
        assert!(parse_key_value("=slate").is_err());
        assert_eq!(
            parse_key_value("url=a=b").unwrap(),
            ("url".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn feature_requires_boolean() {
        assert!(parse_feature("dark=maybe").is_err());
        assert_eq!(parse_feature("dark=FALSE").unwrap(), ("dark".to_string(), false));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["splice", "--quiet", "--verbose", "layouts"]);
        assert!(result.is_err());
    }
}
