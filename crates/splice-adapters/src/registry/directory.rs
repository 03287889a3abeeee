//! One descriptor file per module.
//!
//! # Directory layout expected
//!
//! ```text
//! registry/
//! ├── auth/
//! │   ├── better-auth.json     ← descriptor for `auth/better-auth`
//! │   └── custom.toml          ← descriptor for `auth/custom`
//! └── integrations/
//!     └── rhf-zod-shadcn.json
//! ```
//!
//! Entries are read and parsed on lookup, so one malformed file only fails
//! its own module. When both `.json` and `.toml` exist for an id the JSON
//! file wins. Extensions are matched case-sensitively, for listing and for
//! lookup alike.

use std::{
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use splice_core::{
    application::{ApplicationError, ports::ArtifactRegistry},
    domain::{ArtifactDescriptor, ModuleId},
    error::SpliceResult,
};

use super::DocumentFormat;

const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Artifact registry backed by a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    root: PathBuf,
}

impl DirectoryRegistry {
    /// Point at `root`, which must be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> SpliceResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ApplicationError::RegistryUnavailable {
                path: root,
                reason: "not a directory".into(),
            }
            .into());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate file for `id`, or `None` if the id cannot name a file
    /// inside the root.
    fn entry_path(&self, id: &ModuleId) -> Option<PathBuf> {
        let relative = Path::new(id.as_str());
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        EXTENSIONS.iter().find_map(|ext| {
            let candidate = self.root.join(format!("{}.{}", id.as_str(), ext));
            candidate.is_file().then_some(candidate)
        })
    }

    /// Module id for a file under the root, if it has a known extension.
    fn id_for(&self, path: &Path) -> Option<ModuleId> {
        let ext = path.extension()?.to_str()?;
        if !EXTENSIONS.contains(&ext) {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let segments: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        ModuleId::try_new(segments.join("/")).ok()
    }
}

impl ArtifactRegistry for DirectoryRegistry {
    #[instrument(skip_all, fields(module = %id))]
    fn lookup(&self, id: &ModuleId) -> SpliceResult<Option<ArtifactDescriptor>> {
        let Some(path) = self.entry_path(id) else {
            debug!("no descriptor file");
            return Ok(None);
        };

        let corrupt = |reason: String| ApplicationError::RegistryEntryCorrupt {
            module: id.to_string(),
            reason,
        };

        let raw = fs::read_to_string(&path)
            .map_err(|e| corrupt(format!("failed to read '{}': {e}", path.display())))?;
        let descriptor = DocumentFormat::from_path(&path)
            .parse::<ArtifactDescriptor>(&raw)
            .map_err(|e| corrupt(format!("failed to parse '{}': {e}", path.display())))?;

        debug!(path = %path.display(), "descriptor parsed");
        Ok(Some(descriptor))
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn module_ids(&self) -> SpliceResult<Vec<ModuleId>> {
        let mut ids = BTreeSet::new();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable registry entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(id) = self.id_for(entry.path()) {
                ids.insert(id);
            }
        }

        debug!(count = ids.len(), "registry directory listed");
        Ok(ids.into_iter().collect())
    }
}
