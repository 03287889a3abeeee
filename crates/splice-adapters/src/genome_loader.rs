//! Genome documents from disk.
//!
//! A genome is JSON, or TOML when the file ends in `.toml`:
//!
//! ```toml
//! [project]
//! name = "shop"
//! framework = "nextjs"
//!
//! [[modules]]
//! id = "core/forms"
//!
//! [[modules]]
//! id = "integrations/rhf-zod-shadcn"
//! dependencies = ["core/forms"]
//! ```

use std::{fs, path::Path};

use tracing::{debug, instrument};

use splice_core::{application::ApplicationError, domain::Genome, error::SpliceResult};

use crate::registry::DocumentFormat;

/// Read and parse the genome at `path`.
///
/// # Errors
///
/// Returns [`ApplicationError::GenomeLoadFailed`] if the file cannot be read
/// or does not describe a genome.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_genome(path: impl AsRef<Path>) -> SpliceResult<Genome> {
    let path = path.as_ref();
    let failed = |reason: String| ApplicationError::GenomeLoadFailed {
        path: path.to_path_buf(),
        reason,
    };

    let raw = fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
    let genome: Genome = DocumentFormat::from_path(path)
        .parse(&raw)
        .map_err(failed)?;

    debug!(
        project = %genome.project.name,
        modules = genome.module_count(),
        "genome loaded"
    );
    Ok(genome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use splice_core::{
        domain::{ModuleKind, ParameterValue},
        error::SpliceError,
    };
    use tempfile::TempDir;

    #[test]
    fn loads_json_genome() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("genome.json");
        fs::write(
            &path,
            r#"{ "project": { "name": "shop" },
                 "modules": [{ "id": "features/ai-chat", "dependencies": ["ai/vercel-ai-sdk"] }] }"#,
        )
        .unwrap();

        let genome = load_genome(&path).unwrap();
        assert_eq!(genome.project.name, "shop");
        assert_eq!(genome.modules[0].kind, ModuleKind::Integrator);
    }

    #[test]
    fn loads_toml_genome() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("genome.toml");
        fs::write(
            &path,
            r#"
[project]
name = "shop"
framework = "nextjs"

[[modules]]
id = "core/forms"
kind = "provider"

[[modules]]
id = "integrations/rhf-zod-shadcn"
dependencies = ["core/forms"]

[modules.parameters.features]
zod = true
"#,
        )
        .unwrap();

        let genome = load_genome(&path).unwrap();
        assert_eq!(genome.module_count(), 2);
        assert_eq!(genome.project.framework.as_deref(), Some("nextjs"));
        assert_eq!(
            genome.modules[1].parameters.feature("zod"),
            Some(&ParameterValue::Bool(true))
        );
    }

    #[test]
    fn non_boolean_features_still_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("genome.json");
        fs::write(
            &path,
            r#"{ "project": { "name": "shop" },
                 "modules": [{
                     "id": "auth/better-auth",
                     "kind": "provider",
                     "parameters": { "features": { "oauth": true, "providers": ["github"] } }
                 }] }"#,
        )
        .unwrap();

        let genome = load_genome(&path).unwrap();
        let params = &genome.modules[0].parameters;
        assert_eq!(params.feature("oauth"), Some(&ParameterValue::Bool(true)));
        assert_eq!(
            params.feature("providers"),
            Some(&ParameterValue::List(vec![ParameterValue::from("github")]))
        );
    }

    #[test]
    fn malformed_genome_fails_to_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("genome.json");
        fs::write(&path, r#"{ "modules": [] }"#).unwrap();

        assert!(matches!(
            load_genome(&path),
            Err(SpliceError::Application(ApplicationError::GenomeLoadFailed { .. }))
        ));
    }
}
