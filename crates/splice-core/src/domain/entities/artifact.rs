//! Declared file-level effects of a module.
//!
//! Descriptors come from a precomputed registry and are read-only here.
//! `installs` and `env_vars` are carried through untouched; only `creates`
//! and `enhances` take part in validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ModuleId;

/// A path containing `{{family.key}}` tokens, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTemplate(String);

impl PathTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathTemplate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One `creates` or `enhances` entry.
///
/// Serialized either as a bare path string or as `{ path, owner? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FileArtifactRecord")]
pub struct FileArtifact {
    pub path: PathTemplate,
    /// Module id the file is expected to belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<ModuleId>,
}

impl FileArtifact {
    pub fn new(path: impl Into<PathTemplate>) -> Self {
        Self {
            path: path.into(),
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: impl Into<ModuleId>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FileArtifactRecord {
    Path(PathTemplate),
    Full {
        path: PathTemplate,
        #[serde(default)]
        owner: Option<ModuleId>,
    },
}

impl From<FileArtifactRecord> for FileArtifact {
    fn from(record: FileArtifactRecord) -> Self {
        match record {
            FileArtifactRecord::Path(path) => Self { path, owner: None },
            FileArtifactRecord::Full { path, owner } => Self { path, owner },
        }
    }
}

/// A declared environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    #[serde(default)]
    pub description: String,
}

/// Static effect descriptor for one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDescriptor {
    #[serde(default)]
    pub creates: Vec<FileArtifact>,
    #[serde(default)]
    pub enhances: Vec<FileArtifact>,
    #[serde(default)]
    pub installs: Vec<String>,
    #[serde(default, alias = "env_vars")]
    pub env_vars: Vec<EnvVar>,
}

impl ArtifactDescriptor {
    /// The descriptor substituted for unregistered or unreadable modules.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn creates(mut self, path: impl Into<PathTemplate>) -> Self {
        self.creates.push(FileArtifact::new(path));
        self
    }

    pub fn enhances(mut self, artifact: FileArtifact) -> Self {
        self.enhances.push(artifact);
        self
    }

    pub fn installs(mut self, package: impl Into<String>) -> Self {
        self.installs.push(package.into());
        self
    }

    pub fn env_var(mut self, key: impl Into<String>, description: impl Into<String>) -> Self {
        self.env_vars.push(EnvVar {
            key: key.into(),
            description: description.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.creates.is_empty()
            && self.enhances.is_empty()
            && self.installs.is_empty()
            && self.env_vars.is_empty()
    }

    /// Number of file-level effects (`creates` + `enhances`).
    pub fn file_effect_count(&self) -> usize {
        self.creates.len() + self.enhances.len()
    }
}
