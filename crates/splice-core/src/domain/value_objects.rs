//! Domain value objects: ModuleId, ModuleKind, ParameterValue.
//!
//! # Design
//!
//! Pure value types with equality-by-value and no identity beyond their
//! contents. They know how to parse and print themselves; composition rules
//! live in `ownership.rs`, `conflicts.rs` and `dependencies.rs`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── ModuleId ─────────────────────────────────────────────────────────────────

/// Globally unique module identifier, e.g. `auth/better-auth`.
///
/// Invariant: never empty, never surrounded by whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Create a module id.
    ///
    /// # Panics
    /// Panics if the id is empty (use `try_new` for fallible).
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "ModuleId cannot be empty");
        Self(id.trim().to_owned())
    }

    /// Fallible constructor.
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModuleId {
                id,
                reason: "module id cannot be empty".into(),
            });
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(DomainError::InvalidModuleId {
                id: id.clone(),
                reason: "module id cannot contain whitespace".into(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The category segment (`auth` in `auth/better-auth`).
    pub fn category(&self) -> Option<&str> {
        self.0.split_once('/').map(|(category, _)| category)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

impl FromStr for ModuleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

// ── ModuleKind ───────────────────────────────────────────────────────────────

/// Whether a module originates files or only extends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Base provider ("adapter"); sole legitimate owner of its `creates` paths.
    #[serde(alias = "adapter")]
    Provider,
    /// Integration, feature or connector; may only enhance provider files.
    #[serde(alias = "integration", alias = "feature", alias = "connector")]
    Integrator,
}

/// Id prefixes that mark a module as non-provider when `kind` is omitted.
const INTEGRATOR_PREFIXES: &[&str] = &["integrations/", "features/", "connectors/"];

impl ModuleKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Integrator => "integrator",
        }
    }

    pub const fn is_provider(self) -> bool {
        matches!(self, Self::Provider)
    }

    /// Infer the kind from marketplace id conventions.
    pub fn infer(id: &ModuleId) -> Self {
        if INTEGRATOR_PREFIXES
            .iter()
            .any(|prefix| id.as_str().starts_with(prefix))
        {
            Self::Integrator
        } else {
            Self::Provider
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "provider" | "adapter" => Ok(Self::Provider),
            "integrator" | "integration" | "feature" | "connector" => Ok(Self::Integrator),
            _ => Err(DomainError::InvalidModuleKind(s.to_owned())),
        }
    }
}

// ── ParameterValue ───────────────────────────────────────────────────────────

/// One typed module parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<ParameterValue>),
    Table(BTreeMap<String, ParameterValue>),
}

impl ParameterValue {
    /// String form used in path substitution. Lists and tables have none.
    pub fn as_scalar_string(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::List(_) | Self::Table(_) => None,
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Table(_) => "table",
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for ParameterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParameterValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}
