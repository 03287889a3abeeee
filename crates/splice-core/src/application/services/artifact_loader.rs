//! Artifact Loader - cached registry lookups.
//!
//! Turns registry answers into an explicit partial result per module:
//! either a descriptor, or the reason there is none. A registry failure for
//! one module never aborts the load of the others.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::ArtifactRegistry},
    domain::{ArtifactDescriptor, ModuleId},
    error::SpliceResult,
};

/// Why a module has no usable descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The registry has no entry; the module has no file effects.
    NotRegistered,
    /// The entry exists but could not be loaded; effects are unknown.
    LoadFailed { reason: String },
}

/// Outcome of loading one module's descriptor.
pub type ArtifactLoad = Result<ArtifactDescriptor, LoadWarning>;

/// Registry front-end with a per-instance outcome cache.
pub struct ArtifactLoader {
    registry: Box<dyn ArtifactRegistry>,
    cache: RwLock<HashMap<ModuleId, ArtifactLoad>>,
}

impl ArtifactLoader {
    pub fn new(registry: Box<dyn ArtifactRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load descriptors for every id, consulting the cache first.
    ///
    /// Failed and missing lookups are cached as well; call [`clear_cache`]
    /// after the registry changes.
    ///
    /// [`clear_cache`]: Self::clear_cache
    #[instrument(skip_all)]
    pub fn load_artifacts<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a ModuleId>,
    ) -> SpliceResult<BTreeMap<ModuleId, ArtifactLoad>> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| ApplicationError::CacheLockError)?;

        let mut loaded = BTreeMap::new();
        for id in ids {
            if loaded.contains_key(id) {
                continue;
            }
            let outcome = match cache.get(id) {
                Some(hit) => hit.clone(),
                None => {
                    let fetched = self.fetch(id);
                    cache.insert(id.clone(), fetched.clone());
                    fetched
                }
            };
            loaded.insert(id.clone(), outcome);
        }

        debug!(modules = loaded.len(), cached = cache.len(), "artifacts loaded");
        Ok(loaded)
    }

    /// Drop every cached outcome.
    pub fn clear_cache(&self) -> SpliceResult<()> {
        self.cache
            .write()
            .map_err(|_| ApplicationError::CacheLockError)?
            .clear();
        Ok(())
    }

    /// Number of cached outcomes.
    pub fn cached_len(&self) -> SpliceResult<usize> {
        Ok(self
            .cache
            .read()
            .map_err(|_| ApplicationError::CacheLockError)?
            .len())
    }

    /// All ids the registry knows about.
    pub fn registered_ids(&self) -> SpliceResult<Vec<ModuleId>> {
        self.registry.module_ids()
    }

    fn fetch(&self, id: &ModuleId) -> ArtifactLoad {
        match self.registry.lookup(id) {
            Ok(Some(descriptor)) => {
                debug!(module = %id, effects = descriptor.file_effect_count(), "descriptor found");
                Ok(descriptor)
            }
            Ok(None) => {
                debug!(module = %id, "no registry entry");
                Err(LoadWarning::NotRegistered)
            }
            Err(e) => {
                warn!(module = %id, error = %e, "failed to load artifact descriptor");
                Err(LoadWarning::LoadFailed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
