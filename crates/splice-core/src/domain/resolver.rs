//! Path resolution: `{{family.key}}` templates → concrete relative paths.
//!
//! Four token families are recognised:
//!
//! | Token                           | Source                                          |
//! |---------------------------------|-------------------------------------------------|
//! | `{{paths.<key>}}`               | active [`PathLayout`]                           |
//! | `{{project.<key>}}`             | module parameters, then project defaults        |
//! | `{{integration.features.<key>}}`| `parameters.features[key]`, e.g. `true`/`false` |
//! | `{{env.<key>}}`                 | injected [`EnvSource`]                          |
//!
//! Tokens are substituted left to right in a single pass; substituted values
//! are never re-scanned. Any token that cannot be resolved is an error, so a
//! literal `{{...}}` fragment can never reach a concrete path.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{
    entities::{genome::ProjectMetadata, module::ModuleParameters},
    layout::PathLayout,
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

// ── Environment ──────────────────────────────────────────────────────────────

/// Read-only view of environment variables for `{{env.<key>}}`.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// An environment with no variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnv;

impl EnvSource for NoEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// The table a token is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFamily {
    Paths,
    Project,
    Features,
    Env,
}

impl TokenFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paths => "paths",
            Self::Project => "project",
            Self::Features => "integration.features",
            Self::Env => "env",
        }
    }
}

impl fmt::Display for TokenFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathResolutionError {
    #[error("unknown token '{{{{{token}}}}}' in '{template}'")]
    UnknownToken { template: String, token: String },

    #[error("empty token in '{template}'")]
    EmptyToken { template: String },

    #[error("unterminated token at offset {offset} in '{template}'")]
    Unterminated { template: String, offset: usize },

    #[error("no value for '{family}.{key}' in '{template}'")]
    MissingKey {
        template: String,
        family: TokenFamily,
        key: String,
    },

    #[error("parameter '{key}' is a {found}, expected a scalar, in '{template}'")]
    NonScalarParameter {
        template: String,
        key: String,
        found: &'static str,
    },

    #[error("value for '{family}.{key}' contains a token, in '{template}'")]
    NestedToken {
        template: String,
        family: TokenFamily,
        key: String,
    },

    #[error("'{template}' resolves to '{path}', which still contains '{{{{'")]
    TokenInOutput { template: String, path: String },

    #[error("'{template}' resolves to an empty path")]
    EmptyPath { template: String },

    #[error("'{template}' resolves to '{path}', which is not a relative path inside the project")]
    NotRelative { template: String, path: String },
}

impl PathResolutionError {
    /// The template that failed to resolve.
    pub fn template(&self) -> &str {
        match self {
            Self::UnknownToken { template, .. }
            | Self::EmptyToken { template }
            | Self::Unterminated { template, .. }
            | Self::MissingKey { template, .. }
            | Self::NonScalarParameter { template, .. }
            | Self::NestedToken { template, .. }
            | Self::TokenInOutput { template, .. }
            | Self::EmptyPath { template }
            | Self::NotRelative { template, .. } => template,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownToken { token, .. } => vec![
                format!("'{token}' is not a recognised token"),
                "Use paths.<key>, project.<key>, integration.features.<key> or env.<key>".into(),
            ],
            Self::MissingKey {
                family: TokenFamily::Paths,
                key,
                ..
            } => vec![
                format!("Add '{key}' to the active path layout"),
                "Or select a layout that defines it with --layout".into(),
            ],
            Self::MissingKey {
                family: TokenFamily::Project,
                key,
                ..
            } => vec![format!(
                "Set parameter '{key}' on the module or a project default for it"
            )],
            Self::MissingKey {
                family: TokenFamily::Features,
                key,
                ..
            } => vec![format!("Declare feature '{key}' in the module's parameters.features")],
            Self::MissingKey {
                family: TokenFamily::Env,
                key,
                ..
            } => vec![format!("Export the environment variable '{key}'")],
            _ => vec!["Check the path template in the artifact registry".into()],
        }
    }
}

// ── Tokens ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    family: TokenFamily,
    key: &'a str,
}

fn parse_token<'a>(raw: &'a str, template: &str) -> Result<Token<'a>, PathResolutionError> {
    let body = raw.trim();
    if body.is_empty() {
        return Err(PathResolutionError::EmptyToken {
            template: template.to_owned(),
        });
    }

    let unknown = || PathResolutionError::UnknownToken {
        template: template.to_owned(),
        token: body.to_owned(),
    };

    let (head, rest) = body.split_once('.').ok_or_else(unknown)?;
    let (family, key) = match head {
        "paths" => (TokenFamily::Paths, rest),
        "project" => (TokenFamily::Project, rest),
        "env" => (TokenFamily::Env, rest),
        "integration" => match rest.split_once('.') {
            Some(("features", key)) => (TokenFamily::Features, key),
            _ => return Err(unknown()),
        },
        _ => return Err(unknown()),
    };

    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(unknown());
    }

    Ok(Token { family, key })
}

// ── Resolver ─────────────────────────────────────────────────────────────────

/// Immutable lookup tables injected into a [`PathResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverTables {
    pub layout: PathLayout,
    pub project_defaults: BTreeMap<String, String>,
}

impl ResolverTables {
    pub fn new(layout: PathLayout) -> Self {
        Self {
            layout,
            project_defaults: BTreeMap::new(),
        }
    }

    pub fn with_project_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.project_defaults.insert(key.into(), value.into());
        self
    }
}

/// Pure template resolver. Cloning is cheap; the tables are shared.
#[derive(Clone)]
pub struct PathResolver {
    tables: Arc<ResolverTables>,
    env: Arc<dyn EnvSource>,
}

impl PathResolver {
    pub fn new(tables: ResolverTables) -> Self {
        Self {
            tables: Arc::new(tables),
            env: Arc::new(NoEnv),
        }
    }

    /// Resolver for a layout with no project defaults.
    pub fn for_layout(layout: PathLayout) -> Self {
        Self::new(ResolverTables::new(layout))
    }

    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// A resolver whose project defaults are overlaid with genome metadata.
    pub fn for_project(&self, project: &ProjectMetadata) -> Self {
        let mut tables = (*self.tables).clone();
        tables.project_defaults.extend(project.as_defaults());
        Self {
            tables: Arc::new(tables),
            env: Arc::clone(&self.env),
        }
    }

    pub fn layout(&self) -> &PathLayout {
        &self.tables.layout
    }

    pub fn project_defaults(&self) -> &BTreeMap<String, String> {
        &self.tables.project_defaults
    }

    /// Resolve `template` with one module's parameters.
    pub fn resolve(
        &self,
        template: &str,
        parameters: &ModuleParameters,
    ) -> Result<String, PathResolutionError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];
            let end = after
                .find(CLOSE)
                .ok_or_else(|| PathResolutionError::Unterminated {
                    template: template.to_owned(),
                    offset: offset + start,
                })?;

            let token = parse_token(&after[..end], template)?;
            let value = self.lookup(token, parameters, template)?;
            if value.contains(OPEN) {
                return Err(PathResolutionError::NestedToken {
                    template: template.to_owned(),
                    family: token.family,
                    key: token.key.to_owned(),
                });
            }
            out.push_str(&value);

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
        out.push_str(rest);

        // A value ending in '{' can join a literal '{' into a fresh opener.
        if out.contains(OPEN) {
            return Err(PathResolutionError::TokenInOutput {
                template: template.to_owned(),
                path: out,
            });
        }

        normalize(out, template)
    }

    fn lookup(
        &self,
        token: Token<'_>,
        parameters: &ModuleParameters,
        template: &str,
    ) -> Result<String, PathResolutionError> {
        let missing = || PathResolutionError::MissingKey {
            template: template.to_owned(),
            family: token.family,
            key: token.key.to_owned(),
        };

        match token.family {
            TokenFamily::Paths => self
                .tables
                .layout
                .get(token.key)
                .map(str::to_owned)
                .ok_or_else(missing),
            TokenFamily::Project => match parameters.value(token.key) {
                Some(value) => {
                    value
                        .as_scalar_string()
                        .ok_or_else(|| PathResolutionError::NonScalarParameter {
                            template: template.to_owned(),
                            key: token.key.to_owned(),
                            found: value.type_name(),
                        })
                }
                None => self
                    .tables
                    .project_defaults
                    .get(token.key)
                    .cloned()
                    .ok_or_else(missing),
            },
            TokenFamily::Features => {
                let value = parameters.feature(token.key).ok_or_else(missing)?;
                value
                    .as_scalar_string()
                    .ok_or_else(|| PathResolutionError::NonScalarParameter {
                        template: template.to_owned(),
                        key: format!("{}.{}", TokenFamily::Features, token.key),
                        found: value.type_name(),
                    })
            }
            TokenFamily::Env => self.env.var(token.key).ok_or_else(missing),
        }
    }
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}

/// Canonical form: forward slashes, no repeated separators, no leading `./`.
fn normalize(path: String, template: &str) -> Result<String, PathResolutionError> {
    let unified = path.replace('\\', "/");

    if unified.starts_with('/') || has_drive_prefix(&unified) {
        return Err(PathResolutionError::NotRelative {
            template: template.to_owned(),
            path: unified,
        });
    }

    let trailing_slash = unified.ends_with('/');
    let segments: Vec<&str> = unified
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if segments.contains(&"..") {
        return Err(PathResolutionError::NotRelative {
            template: template.to_owned(),
            path: unified,
        });
    }
    if segments.is_empty() {
        return Err(PathResolutionError::EmptyPath {
            template: template.to_owned(),
        });
    }

    let mut normalized = segments.join("/");
    if trailing_slash {
        normalized.push('/');
    }
    Ok(normalized)
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PathResolver {
        let layout = PathLayout::from_pairs(
            "nextjs",
            &[
                ("shared_library", "src/lib/"),
                ("api_routes", "src/app/api/"),
                ("hooks", "src/hooks/"),
            ],
        );
        PathResolver::new(ResolverTables::new(layout).with_project_default("name", "demo"))
    }

    #[test]
    fn resolves_layout_token() {
        let path = resolver()
            .resolve("{{paths.shared_library}}auth/config.ts", &ModuleParameters::new())
            .unwrap();
        assert_eq!(path, "src/lib/auth/config.ts");
    }

    #[test]
    fn tolerates_whitespace_inside_braces() {
        let path = resolver()
            .resolve("{{ paths.hooks }}use-auth.ts", &ModuleParameters::new())
            .unwrap();
        assert_eq!(path, "src/hooks/use-auth.ts");
    }

    #[test]
    fn project_prefers_module_parameter_over_default() {
        let params = ModuleParameters::new().with_value("name", "custom");
        let r = resolver();
        assert_eq!(r.resolve("{{project.name}}.md", &params).unwrap(), "custom.md");
        assert_eq!(
            r.resolve("{{project.name}}.md", &ModuleParameters::new()).unwrap(),
            "demo.md"
        );
    }

    #[test]
    fn features_render_as_booleans() {
        let params = ModuleParameters::new().with_feature("oauth", true);
        let path = resolver()
            .resolve("flags/{{integration.features.oauth}}.ts", &params)
            .unwrap();
        assert_eq!(path, "flags/true.ts");
    }

    #[test]
    fn env_comes_from_injected_source() {
        let mut env = BTreeMap::new();
        env.insert("REGION".to_owned(), "eu".to_owned());
        let path = resolver()
            .with_env(env)
            .resolve("deploy/{{env.REGION}}.json", &ModuleParameters::new())
            .unwrap();
        assert_eq!(path, "deploy/eu.json");
    }

    #[test]
    fn missing_layout_key_is_an_error() {
        let err = resolver()
            .resolve("{{paths.components}}button.tsx", &ModuleParameters::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PathResolutionError::MissingKey {
                family: TokenFamily::Paths,
                ..
            }
        ));
    }

    #[test]
    fn unknown_family_is_an_error() {
        let err = resolver()
            .resolve("{{module.id}}/x.ts", &ModuleParameters::new())
            .unwrap_err();
        assert!(matches!(err, PathResolutionError::UnknownToken { .. }));
    }

    #[test]
    fn unterminated_token_reports_offset() {
        let err = resolver()
            .resolve("src/{{paths.hooks", &ModuleParameters::new())
            .unwrap_err();
        assert_eq!(
            err,
            PathResolutionError::Unterminated {
                template: "src/{{paths.hooks".into(),
                offset: 4
            }
        );
    }

    #[test]
    fn non_scalar_parameter_is_rejected() {
        let params = ModuleParameters::new().with_value(
            "providers",
            crate::domain::ParameterValue::List(vec!["github".into()]),
        );
        let err = resolver()
            .resolve("{{project.providers}}.ts", &params)
            .unwrap_err();
        assert!(matches!(err, PathResolutionError::NonScalarParameter { .. }));
    }

    #[test]
    fn values_are_not_rescanned() {
        let layout = PathLayout::new("odd").with_path("tricky", "{{paths.tricky}}");
        let err = PathResolver::for_layout(layout)
            .resolve("{{paths.tricky}}x", &ModuleParameters::new())
            .unwrap_err();
        assert!(matches!(err, PathResolutionError::NestedToken { .. }));
    }

    #[test]
    fn value_joined_with_literal_brace_is_rejected() {
        let layout = PathLayout::new("odd").with_path("brace", "src/{");
        let err = PathResolver::for_layout(layout)
            .resolve("{{paths.brace}}{x.ts", &ModuleParameters::new())
            .unwrap_err();
        assert_eq!(
            err,
            PathResolutionError::TokenInOutput {
                template: "{{paths.brace}}{x.ts".into(),
                path: "src/{{x.ts".into(),
            }
        );
    }

    #[test]
    fn list_feature_fails_only_when_referenced() {
        let mut params = ModuleParameters::new().with_feature("oauth", true);
        params.features.insert(
            "providers".into(),
            crate::domain::ParameterValue::List(vec!["github".into()]),
        );
        let r = resolver();
        assert_eq!(
            r.resolve("flags/{{integration.features.oauth}}.ts", &params).unwrap(),
            "flags/true.ts"
        );
        let err = r
            .resolve("{{integration.features.providers}}.ts", &params)
            .unwrap_err();
        assert_eq!(
            err,
            PathResolutionError::NonScalarParameter {
                template: "{{integration.features.providers}}.ts".into(),
                key: "integration.features.providers".into(),
                found: "list",
            }
        );
    }

    #[test]
    fn output_is_normalized() {
        let layout = PathLayout::new("n").with_path("lib", "./src//lib/");
        let path = PathResolver::for_layout(layout)
            .resolve("{{paths.lib}}/auth\\config.ts", &ModuleParameters::new())
            .unwrap();
        assert_eq!(path, "src/lib/auth/config.ts");
    }

    #[test]
    fn absolute_and_escaping_paths_are_rejected() {
        let r = resolver();
        assert!(matches!(
            r.resolve("/etc/passwd", &ModuleParameters::new()),
            Err(PathResolutionError::NotRelative { .. })
        ));
        assert!(matches!(
            r.resolve("{{paths.hooks}}../../x", &ModuleParameters::new()),
            Err(PathResolutionError::NotRelative { .. })
        ));
    }

    #[test]
    fn literal_template_passes_through() {
        assert_eq!(
            resolver().resolve("package.json", &ModuleParameters::new()).unwrap(),
            "package.json"
        );
    }

    #[test]
    fn genome_metadata_overlays_defaults() {
        let project = ProjectMetadata::new("shop").framework("nextjs");
        let r = resolver().for_project(&project);
        assert_eq!(
            r.resolve("{{project.name}}/{{project.framework}}.txt", &ModuleParameters::new())
                .unwrap(),
            "shop/nextjs.txt"
        );
    }

    #[test]
    fn resolution_never_leaves_braces() {
        let r = resolver();
        for template in [
            "{{paths.shared_library}}a.ts",
            "{{paths.api_routes}}{{project.name}}/route.ts",
            "x/{{paths.hooks}}{{paths.hooks}}y.ts",
        ] {
            let out = r.resolve(template, &ModuleParameters::new()).unwrap();
            assert!(!out.contains("{{"), "{out}");
        }
    }
}
