//! Validation findings and the final report handed to the executor.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ModuleId;

/// Error taxonomy. Serialized in SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Two providers write the same concrete path.
    CreateConflict,
    /// An enhancer touches a file it has no declared right to touch.
    FileOwnershipViolation,
    /// A declared dependency id is absent from the genome.
    MissingDependency,
    /// A path template could not be resolved to a concrete path.
    UnresolvedPath,
}

impl ErrorType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateConflict => "CREATE_CONFLICT",
            Self::FileOwnershipViolation => "FILE_OWNERSHIP_VIOLATION",
            Self::MissingDependency => "MISSING_DEPENDENCY",
            Self::UnresolvedPath => "UNRESOLVED_PATH",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warning taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningType {
    /// The registry has no entry for the module; it contributes no effects.
    MissingArtifacts,
    /// The registry entry could not be loaded; the module's effects are unknown.
    ArtifactLoadFailed,
    /// The same module id is selected more than once.
    DuplicateModule,
    /// A module lists itself as a dependency.
    SelfDependency,
}

impl WarningType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingArtifacts => "MISSING_ARTIFACTS",
            Self::ArtifactLoadFailed => "ARTIFACT_LOAD_FAILED",
            Self::DuplicateModule => "DUPLICATE_MODULE",
            Self::SelfDependency => "SELF_DEPENDENCY",
        }
    }
}

impl fmt::Display for WarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the three ownership checks failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipViolation {
    /// No provider creates the path.
    Unowned,
    /// The owner is not among the enhancer's dependencies.
    UndeclaredDependency,
    /// The declared expected owner differs from the actual owner.
    OwnerMismatch,
}

/// Structured context attached to a finding. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_modules: Vec<ModuleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_dependencies: Vec<ModuleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_dependency: Option<ModuleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<OwnershipViolation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FindingDetails {
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A hard validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: ErrorType,
    pub module_id: ModuleId,
    pub message: String,
    #[serde(default)]
    pub details: FindingDetails,
}

impl ValidationError {
    pub fn new(kind: ErrorType, module_id: ModuleId, message: impl Into<String>) -> Self {
        Self {
            kind,
            module_id,
            message: message.into(),
            details: FindingDetails::default(),
        }
    }

    pub fn with_details(mut self, details: FindingDetails) -> Self {
        self.details = details;
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.module_id, self.message)
    }
}

/// A degradation that does not block execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    #[serde(rename = "type")]
    pub kind: WarningType,
    pub module_id: ModuleId,
    pub message: String,
    #[serde(default)]
    pub details: FindingDetails,
}

impl ValidationWarning {
    pub fn new(kind: WarningType, module_id: ModuleId, message: impl Into<String>) -> Self {
        Self {
            kind,
            module_id,
            message: message.into(),
            details: FindingDetails::default(),
        }
    }

    pub fn with_details(mut self, details: FindingDetails) -> Self {
        self.details = details;
        self
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.module_id, self.message)
    }
}

/// Errors and warnings produced by one check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Append another check's findings, preserving order.
    pub fn merge(&mut self, other: Findings) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Single pass/fail report for one genome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// `is_valid` is derived: it holds exactly when there are no errors.
    pub fn from_findings(findings: Findings) -> Self {
        Self {
            is_valid: findings.errors.is_empty(),
            errors: findings.errors,
            warnings: findings.warnings,
        }
    }

    pub fn errors_of(&self, kind: ErrorType) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    pub fn warnings_of(&self, kind: WarningType) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
