//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `splice-adapters` crate provides implementations.

use crate::domain::{ArtifactDescriptor, ModuleId};
use crate::error::SpliceResult;

/// Port for the build-time artifact registry.
///
/// Implemented by:
/// - `splice_adapters::registry::InMemoryRegistry` (tests, embedding)
/// - `splice_adapters::registry::ManifestRegistry` (single precomputed manifest)
/// - `splice_adapters::registry::DirectoryRegistry` (one descriptor file per module)
///
/// ## Contract
///
/// - `Ok(None)`: the module has no registry entry
/// - `Err(_)`: the entry exists but could not be loaded
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRegistry: Send + Sync {
    /// Look up the descriptor for one module.
    fn lookup(&self, id: &ModuleId) -> SpliceResult<Option<ArtifactDescriptor>>;

    /// All module ids with a registry entry, sorted.
    fn module_ids(&self) -> SpliceResult<Vec<ModuleId>>;
}
