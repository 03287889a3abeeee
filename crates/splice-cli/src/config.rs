//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SPLICE_` prefix, `__` between sections,
//!    e.g. `SPLICE_REGISTRY__PATH=./artifacts.json`
//! 3. Config file: `--config FILE`, or `config.toml` in the platform config dir
//! 4. Built-in defaults (always present)

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "SPLICE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where artifact descriptors come from.
    pub registry: RegistryConfig,
    /// Which path layout to resolve against.
    pub layout: LayoutConfig,
    /// Defaults for `{{project.<key>}}`; genome metadata overrides them.
    pub project: BTreeMap<String, String>,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Manifest file or registry directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Built-in layout name.
    pub framework: Option<String>,
    /// Layout table file; wins over `framework`.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `human` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist when
    /// given. The default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        let file = File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(required);

        let defaults = OutputConfig::default();
        let settings = Config::builder()
            .set_default("output.no_color", defaults.no_color)?
            .set_default("output.format", defaults.format)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to assemble configuration")?;

        settings
            .try_deserialize()
            .context("configuration has an unexpected shape")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.splice.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "splice", "splice")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".splice.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_format_is_human() {
        assert_eq!(AppConfig::default().output.format, "human");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("splice.toml");
        fs::write(
            &path,
            r#"
[registry]
path = "artifacts.json"

[layout]
framework = "vite-react"

[project]
name = "storefront"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.registry.path, Some(PathBuf::from("artifacts.json")));
        assert_eq!(cfg.layout.framework.as_deref(), Some("vite-react"));
        assert_eq!(cfg.project.get("name").map(String::as_str), Some("storefront"));
        assert_eq!(cfg.output.format, "human");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/absolutely/does/not/exist.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
