//! Validation Service - main application orchestrator.
//!
//! This service coordinates one validation pass over a genome:
//! 1. Load artifact descriptors for every selected module
//! 2. Build the ownership map from provider `creates` entries
//! 3. Detect create conflicts and ownership violations
//! 4. Check the dependency closure
//!
//! Every check runs regardless of what earlier checks found.

use std::collections::BTreeMap;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ArtifactRegistry,
        services::artifact_loader::{ArtifactLoad, ArtifactLoader, LoadWarning},
    },
    domain::{
        ArtifactDescriptor, FindingDetails, Findings, Genome, ModuleId, ModuleParameters,
        PathResolutionError, PathResolver, ValidationResult, ValidationWarning, WarningType,
        build_ownership, detect_conflicts, validate_dependencies,
    },
    error::SpliceResult,
};

/// Module composition validator.
pub struct ValidationService {
    loader: ArtifactLoader,
    resolver: PathResolver,
}

impl ValidationService {
    /// Create a new validation service.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use splice_core::application::ValidationService;
    /// use splice_core::domain::{PathLayout, PathResolver};
    ///
    /// # fn build(registry: Box<dyn splice_core::application::ArtifactRegistry>) {
    /// let layout = PathLayout::from_pairs("nextjs", &[("shared_library", "src/lib/")]);
    /// let service = ValidationService::new(registry, PathResolver::for_layout(layout));
    /// # }
    /// ```
    pub fn new(registry: Box<dyn ArtifactRegistry>, resolver: PathResolver) -> Self {
        Self {
            loader: ArtifactLoader::new(registry),
            resolver,
        }
    }

    /// Validate a genome.
    ///
    /// Composition problems are reported in the returned result; `Err` means
    /// the pass itself could not run.
    #[instrument(
        skip_all,
        fields(project = %genome.project.name, modules = genome.modules.len())
    )]
    pub fn validate_genome(&self, genome: &Genome) -> SpliceResult<ValidationResult> {
        info!("Validating genome");

        let resolver = self.resolver.for_project(&genome.project);
        let mut findings = Findings::new();

        // 1. Load artifacts
        let loads = self
            .loader
            .load_artifacts(genome.modules.iter().map(|m| &m.id))?;
        let artifacts = self.usable_artifacts(genome, loads, &mut findings);

        // 2. Ownership
        let ownership = build_ownership(&genome.modules, &artifacts, &resolver);
        findings.merge(ownership.findings);

        // 3. Conflicts and enhancements
        findings.merge(detect_conflicts(
            &genome.modules,
            &artifacts,
            &ownership.map,
            &resolver,
        ));

        // 4. Dependency closure
        findings.merge(validate_dependencies(&genome.modules));

        let result = ValidationResult::from_findings(findings);
        info!(
            valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Validation finished"
        );
        Ok(result)
    }

    /// Forget every cached registry outcome.
    pub fn clear_cache(&self) -> SpliceResult<()> {
        self.loader.clear_cache()
    }

    /// Resolve one path template with the configured tables.
    pub fn resolve_path(
        &self,
        template: &str,
        parameters: &ModuleParameters,
    ) -> Result<String, PathResolutionError> {
        self.resolver.resolve(template, parameters)
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn loader(&self) -> &ArtifactLoader {
        &self.loader
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Keep loaded descriptors and turn the rest into warnings.
    ///
    /// Warnings follow genome order; a repeated module warns once.
    fn usable_artifacts(
        &self,
        genome: &Genome,
        mut loads: BTreeMap<ModuleId, ArtifactLoad>,
        findings: &mut Findings,
    ) -> BTreeMap<ModuleId, ArtifactDescriptor> {
        let mut artifacts = BTreeMap::new();

        for module in &genome.modules {
            let Some(load) = loads.remove(&module.id) else {
                continue;
            };
            match load {
                Ok(descriptor) => {
                    artifacts.insert(module.id.clone(), descriptor);
                }
                Err(LoadWarning::NotRegistered) => {
                    findings.warning(ValidationWarning::new(
                        WarningType::MissingArtifacts,
                        module.id.clone(),
                        format!(
                            "no artifact descriptor registered for '{}'; assuming no file effects",
                            module.id
                        ),
                    ));
                    artifacts.insert(module.id.clone(), ArtifactDescriptor::empty());
                }
                Err(LoadWarning::LoadFailed { reason }) => {
                    warn!(module = %module.id, %reason, "validating without artifacts");
                    findings.warning(
                        ValidationWarning::new(
                            WarningType::ArtifactLoadFailed,
                            module.id.clone(),
                            format!(
                                "artifact descriptor for '{}' could not be loaded; its file effects are unknown",
                                module.id
                            ),
                        )
                        .with_details(FindingDetails::default().with_reason(reason)),
                    );
                    artifacts.insert(module.id.clone(), ArtifactDescriptor::empty());
                }
            }
        }

        artifacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::output::MockArtifactRegistry};
    use crate::domain::{ErrorType, Module, PathLayout, ProjectMetadata};
    use crate::error::SpliceError;

    fn resolver() -> PathResolver {
        PathResolver::for_layout(PathLayout::from_pairs(
            "nextjs",
            &[("shared_library", "src/lib/")],
        ))
    }

    #[test]
    fn unregistered_modules_warn_but_stay_valid() {
        let mut registry = MockArtifactRegistry::new();
        registry.expect_lookup().returning(|_| Ok(None));

        let service = ValidationService::new(Box::new(registry), resolver());
        let genome = Genome::new(ProjectMetadata::new("shop"))
            .with_module(Module::provider("ui/shadcn-ui"));

        let result = service.validate_genome(&genome).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningType::MissingArtifacts);
    }

    #[test]
    fn failed_loads_carry_the_reason() {
        let mut registry = MockArtifactRegistry::new();
        registry.expect_lookup().returning(|_| {
            Err(SpliceError::from(ApplicationError::RegistryEntryCorrupt {
                module: "db/drizzle".into(),
                reason: "truncated".into(),
            }))
        });

        let service = ValidationService::new(Box::new(registry), resolver());
        let genome =
            Genome::new(ProjectMetadata::new("shop")).with_module(Module::provider("db/drizzle"));

        let result = service.validate_genome(&genome).unwrap();
        let warning = &result.warnings[0];
        assert_eq!(warning.kind, WarningType::ArtifactLoadFailed);
        assert!(warning.details.reason.as_deref().unwrap().contains("truncated"));
    }

    #[test]
    fn every_check_runs_without_short_circuit() {
        let mut registry = MockArtifactRegistry::new();
        registry.expect_lookup().returning(|id| {
            Ok(Some(match id.as_str() {
                "auth/better-auth" | "auth/custom" => {
                    ArtifactDescriptor::empty().creates("{{paths.shared_library}}auth/config.ts")
                }
                _ => ArtifactDescriptor::empty(),
            }))
        });

        let service = ValidationService::new(Box::new(registry), resolver());
        let genome = Genome::new(ProjectMetadata::new("shop"))
            .with_module(Module::provider("auth/better-auth"))
            .with_module(Module::provider("auth/custom"))
            .with_module(Module::integrator("features/ai-chat").with_dependency("ai/vercel-ai-sdk"));

        let result = service.validate_genome(&genome).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors_of(ErrorType::CreateConflict).count(), 1);
        assert_eq!(result.errors_of(ErrorType::MissingDependency).count(), 1);
    }

    #[test]
    fn resolve_path_uses_the_configured_layout() {
        let registry = MockArtifactRegistry::new();
        let service = ValidationService::new(Box::new(registry), resolver());

        let path = service
            .resolve_path("{{paths.shared_library}}db/schema.ts", &ModuleParameters::new())
            .unwrap();
        assert_eq!(path, "src/lib/db/schema.ts");
    }
}
