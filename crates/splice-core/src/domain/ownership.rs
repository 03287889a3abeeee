//! Ownership graph: concrete path → provider module(s) that create it.
//!
//! Only providers contribute. A second provider claiming a path is recorded
//! next to the first, never overwriting it; the conflict detector reports
//! every contested path.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::domain::{
    entities::{
        artifact::ArtifactDescriptor,
        module::Module,
        report::{ErrorType, FindingDetails, Findings, ValidationError},
    },
    resolver::PathResolver,
    value_objects::ModuleId,
};

/// Who may originate a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership<'a> {
    Unowned,
    Owned(&'a ModuleId),
    /// Claimed by several providers, in genome order.
    Contested(&'a [ModuleId]),
}

/// Transient map, rebuilt from scratch for every validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipMap {
    claims: BTreeMap<String, Vec<ModuleId>>,
}

impl OwnershipMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `module` as a creator of `path`. Repeated claims by the same
    /// module count once.
    pub fn claim(&mut self, path: impl Into<String>, module: &ModuleId) {
        let claimants = self.claims.entry(path.into()).or_default();
        if !claimants.contains(module) {
            claimants.push(module.clone());
        }
    }

    pub fn owner(&self, path: &str) -> Ownership<'_> {
        match self.claims.get(path).map(Vec::as_slice) {
            None | Some([]) => Ownership::Unowned,
            Some([single]) => Ownership::Owned(single),
            Some(many) => Ownership::Contested(many),
        }
    }

    pub fn claimants(&self, path: &str) -> &[ModuleId] {
        self.claims.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Paths claimed by more than one provider, in path order.
    pub fn contested(&self) -> impl Iterator<Item = (&str, &[ModuleId])> {
        self.claims
            .iter()
            .filter(|(_, claimants)| claimants.len() > 1)
            .map(|(path, claimants)| (path.as_str(), claimants.as_slice()))
    }

    /// Uncontested path → owner pairs.
    pub fn owned(&self) -> impl Iterator<Item = (&str, &ModuleId)> {
        self.claims.iter().filter_map(|(path, claimants)| match claimants.as_slice() {
            [single] => Some((path.as_str(), single)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Result of building the map: the map plus any `creates` entries that
/// could not be resolved.
#[derive(Debug, Clone, Default)]
pub struct OwnershipOutcome {
    pub map: OwnershipMap,
    pub findings: Findings,
}

/// Build the ownership map from the `creates` effects of provider modules.
pub fn build_ownership(
    modules: &[Module],
    artifacts: &BTreeMap<ModuleId, ArtifactDescriptor>,
    resolver: &PathResolver,
) -> OwnershipOutcome {
    let mut outcome = OwnershipOutcome::default();

    for module in modules.iter().filter(|m| m.is_provider()) {
        let Some(descriptor) = artifacts.get(&module.id) else {
            continue;
        };

        for artifact in &descriptor.creates {
            match resolver.resolve(artifact.path.as_str(), &module.parameters) {
                Ok(path) => {
                    trace!(
                        module = %module.id,
                        template = %artifact.path,
                        path = path.as_str(),
                        "claim"
                    );
                    outcome.map.claim(path, &module.id);
                }
                Err(e) => outcome
                    .findings
                    .error(unresolved(module, artifact.path.as_str(), &e)),
            }
        }
    }

    debug!(paths = outcome.map.len(), "ownership map built");
    outcome
}

pub(crate) fn unresolved(
    module: &Module,
    template: &str,
    error: &crate::domain::resolver::PathResolutionError,
) -> ValidationError {
    ValidationError::new(
        ErrorType::UnresolvedPath,
        module.id.clone(),
        format!("cannot resolve path template '{template}': {error}"),
    )
    .with_details(
        FindingDetails::default()
            .with_template(template)
            .with_reason(error.to_string()),
    )
}
