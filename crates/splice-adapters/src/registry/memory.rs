//! In-memory artifact registry.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use splice_core::{
    application::{ApplicationError, ports::ArtifactRegistry},
    domain::{ArtifactDescriptor, ModuleId},
    error::SpliceResult,
};

/// Thread-safe in-memory artifact registry.
#[derive(Clone, Default)]
pub struct InMemoryRegistry {
    inner: Arc<RwLock<HashMap<ModuleId, ArtifactDescriptor>>>,
}

impl InMemoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from existing entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (ModuleId, ArtifactDescriptor)>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    /// Add or replace one entry.
    pub fn insert(&self, id: impl Into<ModuleId>, descriptor: ArtifactDescriptor) -> SpliceResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::CacheLockError)?;
        inner.insert(id.into(), descriptor);
        Ok(())
    }

    /// Remove one entry, returning it if present.
    pub fn remove(&self, id: &ModuleId) -> SpliceResult<Option<ArtifactDescriptor>> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::CacheLockError)?;
        Ok(inner.remove(id))
    }

    /// Get the number of entries.
    pub fn len(&self) -> SpliceResult<usize> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::CacheLockError)?
            .len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> SpliceResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl ArtifactRegistry for InMemoryRegistry {
    fn lookup(&self, id: &ModuleId) -> SpliceResult<Option<ArtifactDescriptor>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::CacheLockError)?;
        Ok(inner.get(id).cloned())
    }

    fn module_ids(&self) -> SpliceResult<Vec<ModuleId>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::CacheLockError)?;
        let mut ids: Vec<ModuleId> = inner.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup() {
        let registry = InMemoryRegistry::new();
        registry
            .insert("db/drizzle", ArtifactDescriptor::empty().creates("src/db/schema.ts"))
            .unwrap();

        let found = registry.lookup(&ModuleId::new("db/drizzle")).unwrap();
        assert_eq!(found.unwrap().creates.len(), 1);
        assert!(registry.lookup(&ModuleId::new("db/prisma")).unwrap().is_none());
    }

    #[test]
    fn module_ids_are_sorted() {
        let registry = InMemoryRegistry::from_entries([
            (ModuleId::new("ui/shadcn-ui"), ArtifactDescriptor::empty()),
            (ModuleId::new("auth/better-auth"), ArtifactDescriptor::empty()),
        ]);
        assert_eq!(
            registry.module_ids().unwrap(),
            vec![ModuleId::new("auth/better-auth"), ModuleId::new("ui/shadcn-ui")]
        );
    }

    #[test]
    fn clones_share_entries() {
        let registry = InMemoryRegistry::new();
        let clone = registry.clone();
        clone.insert("core/forms", ArtifactDescriptor::empty()).unwrap();
        assert_eq!(registry.len().unwrap(), 1);
        assert!(registry.remove(&ModuleId::new("core/forms")).unwrap().is_some());
        assert!(clone.is_empty().unwrap());
    }
}
