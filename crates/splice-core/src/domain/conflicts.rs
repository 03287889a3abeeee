//! Conflict detection over a built [`OwnershipMap`].
//!
//! - `CREATE_CONFLICT`: a path claimed by more than one provider.
//! - `FILE_OWNERSHIP_VIOLATION`: a non-provider enhancing a path that nobody
//!   creates, that belongs to a module it does not depend on, or whose owner
//!   differs from the one it declares.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    entities::{
        artifact::{ArtifactDescriptor, FileArtifact},
        module::Module,
        report::{ErrorType, FindingDetails, Findings, OwnershipViolation, ValidationError},
    },
    ownership::{Ownership, OwnershipMap, unresolved},
    resolver::PathResolver,
    value_objects::ModuleId,
};

/// Run every conflict check. Never short-circuits.
pub fn detect_conflicts(
    modules: &[Module],
    artifacts: &BTreeMap<ModuleId, ArtifactDescriptor>,
    ownership: &OwnershipMap,
    resolver: &PathResolver,
) -> Findings {
    let mut findings = create_conflicts(ownership);

    for module in modules.iter().filter(|m| !m.is_provider()) {
        let Some(descriptor) = artifacts.get(&module.id) else {
            continue;
        };

        for artifact in &descriptor.enhances {
            match resolver.resolve(artifact.path.as_str(), &module.parameters) {
                Ok(path) => check_enhancement(module, artifact, &path, ownership, &mut findings),
                Err(e) => findings.error(unresolved(module, artifact.path.as_str(), &e)),
            }
        }
    }

    debug!(errors = findings.errors.len(), "conflict detection finished");
    findings
}

/// One error per contested path, naming every claimant.
fn create_conflicts(ownership: &OwnershipMap) -> Findings {
    let mut findings = Findings::new();

    for (path, claimants) in ownership.contested() {
        // The first claimant is the earliest in genome order; blame the next one.
        let offender = claimants[1].clone();
        findings.error(
            ValidationError::new(
                ErrorType::CreateConflict,
                offender,
                format!(
                    "'{}' is created by more than one provider: {}",
                    path,
                    join_ids(claimants)
                ),
            )
            .with_details(FindingDetails {
                path: Some(path.to_owned()),
                conflicting_modules: claimants.to_vec(),
                ..FindingDetails::default()
            }),
        );
    }

    findings
}

fn check_enhancement(
    module: &Module,
    artifact: &FileArtifact,
    path: &str,
    ownership: &OwnershipMap,
    findings: &mut Findings,
) {
    let claimants: &[ModuleId] = match ownership.owner(path) {
        Ownership::Unowned => {
            findings.error(violation(
                module,
                OwnershipViolation::Unowned,
                format!("enhances '{path}', but no provider creates this file"),
                FindingDetails {
                    path: Some(path.to_owned()),
                    template: Some(artifact.path.to_string()),
                    expected_owner: artifact.owner.as_ref().map(ToString::to_string),
                    declared_dependencies: declared(module),
                    ..FindingDetails::default()
                },
            ));
            return;
        }
        Ownership::Owned(owner) => std::slice::from_ref(owner),
        Ownership::Contested(many) => many,
    };

    let actual = join_ids(claimants);

    if !claimants.iter().any(|owner| module.depends_on(owner)) {
        let expected = if module.dependencies.is_empty() {
            "none".to_owned()
        } else {
            join_ids(module.dependencies.iter())
        };
        findings.error(violation(
            module,
            OwnershipViolation::UndeclaredDependency,
            format!(
                "modifies '{path}' owned by {actual}, but does not declare a dependency on it \
                 (declared: {expected})"
            ),
            FindingDetails {
                path: Some(path.to_owned()),
                template: Some(artifact.path.to_string()),
                actual_owner: Some(actual.clone()),
                expected_owner: Some(expected),
                declared_dependencies: declared(module),
                ..FindingDetails::default()
            },
        ));
    }

    if let Some(expected) = &artifact.owner {
        if !claimants.contains(expected) {
            findings.error(violation(
                module,
                OwnershipViolation::OwnerMismatch,
                format!("expects '{path}' to be owned by {expected}, but it is owned by {actual}"),
                FindingDetails {
                    path: Some(path.to_owned()),
                    template: Some(artifact.path.to_string()),
                    actual_owner: Some(actual),
                    expected_owner: Some(expected.to_string()),
                    declared_dependencies: declared(module),
                    ..FindingDetails::default()
                },
            ));
        }
    }
}

fn violation(
    module: &Module,
    violation: OwnershipViolation,
    message: String,
    details: FindingDetails,
) -> ValidationError {
    ValidationError::new(ErrorType::FileOwnershipViolation, module.id.clone(), message)
        .with_details(FindingDetails {
            violation: Some(violation),
            ..details
        })
}

fn declared(module: &Module) -> Vec<ModuleId> {
    module.dependencies.iter().cloned().collect()
}

fn join_ids<'a>(ids: impl IntoIterator<Item = &'a ModuleId>) -> String {
    ids.into_iter()
        .map(ModuleId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
