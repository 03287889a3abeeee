// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::resolver::PathResolutionError;

/// Root domain error type.
///
/// Expected validation findings (conflicts, ownership violations, missing
/// dependencies) are *not* errors; they are data in a `ValidationResult`.
/// This enum covers malformed inputs that prevent building the model at all.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid module id '{id}': {reason}")]
    InvalidModuleId { id: String, reason: String },

    #[error("Invalid module kind '{0}'")]
    InvalidModuleKind(String),

    #[error("Invalid path layout '{framework}': {reason}")]
    InvalidLayout { framework: String, reason: String },

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    #[error(transparent)]
    PathResolution(#[from] PathResolutionError),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidModuleId { id, .. } => vec![
                format!("Module id '{}' is not usable", id),
                "Module ids look like 'category/name', e.g. 'auth/better-auth'".into(),
            ],
            Self::InvalidModuleKind(kind) => vec![
                format!("'{}' is not a module kind", kind),
                "Use one of: provider (adapter), integrator (integration, feature, connector)"
                    .into(),
            ],
            Self::InvalidLayout { framework, .. } => vec![
                format!("Check the path layout for '{}'", framework),
                "Layout keys map to directory prefixes, e.g. shared_library = \"src/lib/\"".into(),
            ],
            Self::PathResolution(e) => e.suggestions(),
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidModuleId { .. }
            | Self::InvalidModuleKind(_)
            | Self::PathResolution(_) => ErrorCategory::Validation,
            Self::InvalidLayout { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
