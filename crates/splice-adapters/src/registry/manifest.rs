//! Single-file precomputed artifact manifest.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "modules": {
//!     "auth/better-auth": {
//!       "creates": ["{{paths.shared_library}}auth/config.ts"],
//!       "installs": ["better-auth"]
//!     }
//!   }
//! }
//! ```
//!
//! The same shape is accepted as TOML when the file ends in `.toml`. The
//! file is read once when opened. Each module entry is decoded on lookup, so
//! one malformed entry only fails its own module.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use splice_core::{
    application::{ApplicationError, ports::ArtifactRegistry},
    domain::{ArtifactDescriptor, ModuleId},
    error::SpliceResult,
};

use super::DocumentFormat;

/// Highest manifest version this reader understands.
pub const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    modules: BTreeMap<String, Value>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

/// Artifact registry backed by one manifest file.
#[derive(Debug, Clone)]
pub struct ManifestRegistry {
    path: PathBuf,
    version: u32,
    modules: BTreeMap<String, Value>,
}

impl ManifestRegistry {
    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::RegistryUnavailable`] if the file cannot be
    /// read, does not parse, or declares an unsupported version.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> SpliceResult<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| ApplicationError::RegistryUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let registry = Self::parse(path, DocumentFormat::from_path(path), &raw)?;

        info!(modules = registry.modules.len(), "artifact manifest loaded");
        Ok(registry)
    }

    /// Parse manifest text; `origin` is only used in error messages.
    pub fn parse(origin: &Path, format: DocumentFormat, raw: &str) -> SpliceResult<Self> {
        let unavailable = |reason: String| ApplicationError::RegistryUnavailable {
            path: origin.to_path_buf(),
            reason,
        };

        let document: ManifestDocument = format.parse(raw).map_err(unavailable)?;
        if document.version > SUPPORTED_VERSION {
            return Err(unavailable(format!(
                "manifest version {} is newer than supported version {}",
                document.version, SUPPORTED_VERSION
            ))
            .into());
        }

        Ok(Self {
            path: origin.to_path_buf(),
            version: document.version,
            modules: document.modules,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ArtifactRegistry for ManifestRegistry {
    fn lookup(&self, id: &ModuleId) -> SpliceResult<Option<ArtifactDescriptor>> {
        let Some(entry) = self.modules.get(id.as_str()) else {
            return Ok(None);
        };

        let descriptor = ArtifactDescriptor::deserialize(entry).map_err(|e| {
            ApplicationError::RegistryEntryCorrupt {
                module: id.to_string(),
                reason: format!("invalid entry in '{}': {e}", self.path.display()),
            }
        })?;
        Ok(Some(descriptor))
    }

    fn module_ids(&self) -> SpliceResult<Vec<ModuleId>> {
        Ok(self
            .modules
            .keys()
            .filter_map(|key| match ModuleId::try_new(key.as_str()) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping invalid manifest key");
                    None
                }
            })
            .collect())
    }
}
