//! Application layer errors.
//!
//! These errors represent failures in orchestration, not composition rules.
//! Composition problems are findings in a `ValidationResult`; malformed
//! inputs are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The artifact registry as a whole cannot be read.
    #[error("Artifact registry unavailable at {path}: {reason}")]
    RegistryUnavailable { path: PathBuf, reason: String },

    /// One registry entry could not be read or parsed.
    #[error("Artifact registry entry for '{module}' is unreadable: {reason}")]
    RegistryEntryCorrupt { module: String, reason: String },

    /// No layout with this framework name is known.
    #[error("Unknown path layout '{name}'")]
    LayoutNotFound { name: String },

    /// A layout file could not be read or parsed.
    #[error("Failed to load path layout from {path}: {reason}")]
    LayoutLoadFailed { path: PathBuf, reason: String },

    /// A genome document could not be read or parsed.
    #[error("Failed to load genome from {path}: {reason}")]
    GenomeLoadFailed { path: PathBuf, reason: String },

    /// Artifact cache lock poisoned.
    #[error("Artifact cache lock poisoned")]
    CacheLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RegistryUnavailable { path, .. } => vec![
                format!("Failed to read the registry at: {}", path.display()),
                "Pass the registry location with --registry".into(),
                "Or set registry.path in the configuration file".into(),
            ],
            Self::RegistryEntryCorrupt { module, .. } => vec![
                format!("Regenerate the artifact descriptor for '{}'", module),
                "The module is treated as contributing no artifacts".into(),
            ],
            Self::LayoutNotFound { name } => vec![
                format!("No built-in layout named '{}'", name),
                "Try: splice layouts".into(),
                "Or supply a layout table with --layout-file".into(),
            ],
            Self::LayoutLoadFailed { path, .. } => vec![
                format!("Check the layout file: {}", path.display()),
                "Expected: framework = \"...\" and a [paths] table".into(),
            ],
            Self::GenomeLoadFailed { path, .. } => vec![
                format!("Check the genome file: {}", path.display()),
                "Genomes are JSON or TOML with 'project' and 'modules'".into(),
            ],
            Self::CacheLockError => vec![
                "The artifact cache is in an inconsistent state".into(),
                "Try again with a fresh process".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RegistryUnavailable { .. } => ErrorCategory::Configuration,
            Self::RegistryEntryCorrupt { .. } => ErrorCategory::Internal,
            Self::LayoutNotFound { .. } => ErrorCategory::NotFound,
            Self::LayoutLoadFailed { .. } => ErrorCategory::Configuration,
            Self::GenomeLoadFailed { .. } => ErrorCategory::Validation,
            Self::CacheLockError => ErrorCategory::Internal,
        }
    }
}
