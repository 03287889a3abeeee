//! Artifact registry adapters.
//!
//! Three backends for [`ArtifactRegistry`]:
//! - [`InMemoryRegistry`] for tests and embedding
//! - [`ManifestRegistry`] for a single precomputed manifest file
//! - [`DirectoryRegistry`] for one descriptor file per module

pub mod directory;
pub mod manifest;
pub mod memory;

use std::path::Path;

use splice_core::{application::ports::ArtifactRegistry, error::SpliceResult};
use tracing::debug;

pub use directory::DirectoryRegistry;
pub use manifest::ManifestRegistry;
pub use memory::InMemoryRegistry;

/// Serialization format of a registry file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.toml` is TOML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Parse `raw` in this format.
    pub fn parse<T: serde::de::DeserializeOwned>(self, raw: &str) -> Result<T, String> {
        match self {
            Self::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
        }
    }
}

/// Open the registry at `path`: a directory becomes a [`DirectoryRegistry`],
/// a file a [`ManifestRegistry`].
pub fn open_registry(path: &Path) -> SpliceResult<Box<dyn ArtifactRegistry>> {
    if path.is_dir() {
        debug!(path = %path.display(), "opening directory registry");
        Ok(Box::new(DirectoryRegistry::open(path)?))
    } else {
        debug!(path = %path.display(), "opening manifest registry");
        Ok(Box::new(ManifestRegistry::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("registry.TOML")),
            DocumentFormat::Toml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("registry.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("registry")),
            DocumentFormat::Json
        );
    }
}
