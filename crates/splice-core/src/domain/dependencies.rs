//! Dependency closure over declared module ids.
//!
//! Independent of file effects: a feature with no `enhances` entries can
//! still depend on an adapter at runtime, and forgetting to select that
//! adapter must be caught here.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::domain::{
    entities::{
        module::Module,
        report::{
            ErrorType, FindingDetails, Findings, ValidationError, ValidationWarning, WarningType,
        },
    },
    value_objects::ModuleId,
};

/// Check every declared dependency against the selected module ids.
pub fn validate_dependencies(modules: &[Module]) -> Findings {
    let mut findings = Findings::new();
    let selected: BTreeSet<&ModuleId> = modules.iter().map(|m| &m.id).collect();
    let mut seen: HashSet<&ModuleId> = HashSet::new();

    for module in modules {
        if !seen.insert(&module.id) {
            findings.warning(ValidationWarning::new(
                WarningType::DuplicateModule,
                module.id.clone(),
                format!("module '{}' is selected more than once", module.id),
            ));
        }

        for dependency in &module.dependencies {
            if dependency == &module.id {
                findings.warning(ValidationWarning::new(
                    WarningType::SelfDependency,
                    module.id.clone(),
                    format!("module '{}' lists itself as a dependency", module.id),
                ));
                continue;
            }

            if !selected.contains(dependency) {
                findings.error(
                    ValidationError::new(
                        ErrorType::MissingDependency,
                        module.id.clone(),
                        format!(
                            "depends on '{}', which is not part of this genome",
                            dependency
                        ),
                    )
                    .with_details(FindingDetails {
                        missing_dependency: Some(dependency.clone()),
                        declared_dependencies: module.dependencies.iter().cloned().collect(),
                        ..FindingDetails::default()
                    }),
                );
            }
        }
    }

    debug!(
        modules = modules.len(),
        missing = findings.errors.len(),
        "dependency closure checked"
    );
    findings
}
