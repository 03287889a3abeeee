//! End-to-end validation over filesystem registries.

use std::{fs, path::Path};

use splice_adapters::{ProcessEnv, builtin_layout, load_genome, open_registry};
use splice_core::{
    domain::{ErrorType, PathResolver, ResolverTables, WarningType},
    prelude::*,
};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let full = root.join(rel);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

fn service_for(registry: &Path) -> ValidationService {
    let layout = builtin_layout("nextjs").unwrap();
    let resolver = PathResolver::new(ResolverTables::new(layout)).with_env(ProcessEnv);
    ValidationService::new(open_registry(registry).unwrap(), resolver)
}

#[test]
fn directory_registry_drives_validation() {
    let temp = TempDir::new().unwrap();
    let registry = temp.path().join("registry");
    write(
        &registry,
        "core/forms.json",
        r#"{ "creates": ["{{paths.shared_library}}forms/index.ts"] }"#,
    );
    write(
        &registry,
        "integrations/rhf-zod-shadcn.toml",
        r#"
[[enhances]]
path = "{{paths.shared_library}}forms/index.ts"
owner = "core/forms"
"#,
    );
    write(&registry, "db/drizzle.json", "{ broken");
    write(
        temp.path(),
        "genome.json",
        r#"{
            "project": { "name": "shop", "framework": "nextjs" },
            "modules": [
                { "id": "core/forms" },
                { "id": "integrations/rhf-zod-shadcn", "dependencies": ["core/forms"] },
                { "id": "db/drizzle" },
                { "id": "ui/shadcn-ui" }
            ]
        }"#,
    );

    let genome = load_genome(temp.path().join("genome.json")).unwrap();
    let result = service_for(&registry).validate_genome(&genome).unwrap();

    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(result.warnings_of(WarningType::ArtifactLoadFailed).count(), 1);
    assert_eq!(result.warnings_of(WarningType::MissingArtifacts).count(), 1);
}

#[test]
fn manifest_registry_reports_conflicts() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "artifacts.json",
        r#"{
            "version": 1,
            "modules": {
                "auth/better-auth": { "creates": ["{{paths.shared_library}}auth/config.ts"] },
                "auth/custom": { "creates": ["{{paths.shared_library}}auth/config.ts"] }
            }
        }"#,
    );
    let genome = Genome::new(ProjectMetadata::new("shop"))
        .with_module(Module::provider("auth/better-auth"))
        .with_module(Module::provider("auth/custom"));

    let result = service_for(&temp.path().join("artifacts.json"))
        .validate_genome(&genome)
        .unwrap();

    assert!(!result.is_valid);
    let conflict = result.errors_of(ErrorType::CreateConflict).next().unwrap();
    assert_eq!(conflict.details.path.as_deref(), Some("src/lib/auth/config.ts"));
}

#[test]
fn corrupt_manifest_entry_degrades_only_its_module() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "artifacts.json",
        r#"{
            "version": 1,
            "modules": {
                "core/forms": { "creates": ["{{paths.shared_library}}forms/index.ts"] },
                "db/drizzle": { "creates": 5 }
            }
        }"#,
    );
    let genome = Genome::new(ProjectMetadata::new("shop"))
        .with_module(Module::provider("core/forms"))
        .with_module(Module::provider("db/drizzle"));

    let result = service_for(&temp.path().join("artifacts.json"))
        .validate_genome(&genome)
        .unwrap();

    assert!(result.is_valid, "{:?}", result.errors);
    let failed: Vec<_> = result.warnings_of(WarningType::ArtifactLoadFailed).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].module_id, ModuleId::new("db/drizzle"));
}
