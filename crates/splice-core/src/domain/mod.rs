// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Splice.
//!
//! This module contains pure composition logic with no I/O. Loading
//! descriptors, layouts and environment variables is handled via ports
//! (traits) defined in the application layer or injected values.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror + serde + tracing
//! - **Immutable entities**: A genome never changes during a validation pass
//! - **Pure checks**: Every check takes its inputs by reference and returns findings
//!
// Public API - what the world sees
pub mod conflicts;
pub mod dependencies;
pub mod entities;
pub mod error;
pub mod layout;
pub mod ownership;
pub mod resolver;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    artifact::{ArtifactDescriptor, EnvVar, FileArtifact, PathTemplate},
    genome::{Genome, ProjectMetadata},
    module::{Module, ModuleParameters},
    report::{
        ErrorType, FindingDetails, Findings, OwnershipViolation, ValidationError,
        ValidationResult, ValidationWarning, WarningType,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use layout::PathLayout;
pub use ownership::{Ownership, OwnershipMap, OwnershipOutcome, build_ownership};
pub use conflicts::detect_conflicts;
pub use dependencies::validate_dependencies;
pub use resolver::{
    EnvSource, NoEnv, PathResolutionError, PathResolver, ResolverTables, TokenFamily,
};

pub use value_objects::{ModuleId, ModuleKind, ParameterValue};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn module_id_rejects_blank() {
        assert!(ModuleId::try_new("").is_err());
        assert!(ModuleId::try_new("   ").is_err());
        assert!(ModuleId::try_new("auth/better auth").is_err());
        assert_eq!(ModuleId::try_new(" auth/x ").unwrap().as_str(), "auth/x");
    }

    #[test]
    #[should_panic]
    fn module_id_new_panics_on_empty() {
        ModuleId::new("");
    }

    #[test]
    fn module_id_category() {
        assert_eq!(ModuleId::new("auth/better-auth").category(), Some("auth"));
        assert_eq!(ModuleId::new("standalone").category(), None);
    }

    #[test]
    fn module_kind_parses_aliases() {
        assert_eq!(ModuleKind::from_str("adapter").unwrap(), ModuleKind::Provider);
        assert_eq!(ModuleKind::from_str("Feature").unwrap(), ModuleKind::Integrator);
        assert_eq!(
            ModuleKind::from_str("connector").unwrap(),
            ModuleKind::Integrator
        );
        assert!(ModuleKind::from_str("theme").is_err());
    }

    #[test]
    fn module_kind_inferred_from_id_prefix() {
        assert_eq!(
            ModuleKind::infer(&ModuleId::new("integrations/rhf-zod-shadcn")),
            ModuleKind::Integrator
        );
        assert_eq!(
            ModuleKind::infer(&ModuleId::new("features/ai-chat")),
            ModuleKind::Integrator
        );
        assert_eq!(
            ModuleKind::infer(&ModuleId::new("auth/better-auth")),
            ModuleKind::Provider
        );
    }

    #[test]
    fn parameter_scalars_stringify() {
        assert_eq!(
            ParameterValue::Bool(true).as_scalar_string().as_deref(),
            Some("true")
        );
        assert_eq!(
            ParameterValue::Integer(3).as_scalar_string().as_deref(),
            Some("3")
        );
        assert!(ParameterValue::List(vec![]).as_scalar_string().is_none());
    }

    // ========================================================================
    // Serialization Tests
    // ========================================================================

    #[test]
    fn genome_deserializes_with_inferred_kinds() {
        let json = r#"{
            "project": { "name": "shop", "framework": "nextjs" },
            "modules": [
                { "id": "framework/nextjs" },
                { "id": "features/ai-chat", "dependencies": ["ai/vercel-ai-sdk"] },
                { "id": "ui/shadcn-ui", "kind": "adapter",
                  "parameters": { "theme": "slate", "features": { "dark": true } } }
            ]
        }"#;
        let genome: Genome = serde_json::from_str(json).unwrap();

        assert_eq!(genome.module_count(), 3);
        assert_eq!(genome.modules[0].kind, ModuleKind::Provider);
        assert_eq!(genome.modules[1].kind, ModuleKind::Integrator);
        assert!(genome.modules[1].depends_on(&ModuleId::new("ai/vercel-ai-sdk")));

        let params = &genome.modules[2].parameters;
        assert_eq!(params.feature("dark"), Some(&ParameterValue::Bool(true)));
        assert_eq!(params.value("theme"), Some(&ParameterValue::from("slate")));
        assert!(params.value("features").is_none());
    }

    #[test]
    fn artifact_entries_accept_strings_or_objects() {
        let json = r#"{
            "creates": ["{{paths.shared_library}}auth/config.ts"],
            "enhances": [{ "path": "{{paths.shared_library}}forms/index.ts", "owner": "core/forms" }],
            "installs": ["better-auth"],
            "envVars": [{ "key": "AUTH_SECRET", "description": "Signing secret" }]
        }"#;
        let descriptor: ArtifactDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(descriptor.creates[0].owner, None);
        assert_eq!(
            descriptor.enhances[0].owner,
            Some(ModuleId::new("core/forms"))
        );
        assert_eq!(descriptor.env_vars[0].key, "AUTH_SECRET");
        assert_eq!(descriptor.file_effect_count(), 2);
    }

    #[test]
    fn validation_result_serializes_camel_case() {
        let result = ValidationResult::from_findings(Findings {
            errors: vec![
                ValidationError::new(
                    ErrorType::MissingDependency,
                    ModuleId::new("features/ai-chat"),
                    "missing",
                )
                .with_details(FindingDetails {
                    missing_dependency: Some(ModuleId::new("ai/vercel-ai-sdk")),
                    ..FindingDetails::default()
                }),
            ],
            warnings: vec![],
        });
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["isValid"], false);
        assert_eq!(value["errors"][0]["type"], "MISSING_DEPENDENCY");
        assert_eq!(value["errors"][0]["moduleId"], "features/ai-chat");
        assert_eq!(
            value["errors"][0]["details"]["missingDependency"],
            "ai/vercel-ai-sdk"
        );
        assert!(value["errors"][0]["details"].get("path").is_none());
    }

    #[test]
    fn empty_findings_are_valid() {
        assert!(ValidationResult::from_findings(Findings::new()).is_valid);
    }
}
