//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core calls and render results.
//! The helpers below are shared by every command that needs a registry or a
//! path layout.

use std::path::PathBuf;

use tracing::debug;

use splice_adapters::{
    ProcessEnv, builtin_layout, builtin_names, layouts::DEFAULT_LAYOUT, load_layout_file,
};
use splice_core::domain::{PathLayout, PathResolver, ResolverTables};

use crate::{
    cli::LayoutArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod completions;
pub mod config;
pub mod layouts;
pub mod list;
pub mod resolve;
pub mod validate;

/// Registry path from the command line, falling back to configuration.
pub(crate) fn registry_path(flag: Option<&PathBuf>, config: &AppConfig) -> CliResult<PathBuf> {
    flag.or(config.registry.path.as_ref())
        .cloned()
        .ok_or(CliError::MissingRegistry)
}

/// Pick the path layout.
///
/// Precedence: `--layout-file`, `--layout`, `layout.file`, `layout.framework`,
/// the genome's framework when it names a built-in layout, then the default.
pub(crate) fn select_layout(
    args: &LayoutArgs,
    config: &AppConfig,
    genome_framework: Option<&str>,
) -> CliResult<PathLayout> {
    if let Some(file) = &args.layout_file {
        return Ok(load_layout_file(file)?);
    }
    if let Some(name) = &args.layout {
        return Ok(builtin_layout(name)?);
    }
    if let Some(file) = &config.layout.file {
        return Ok(load_layout_file(file)?);
    }
    if let Some(name) = &config.layout.framework {
        return Ok(builtin_layout(name)?);
    }

    let name = genome_framework
        .filter(|framework| {
            builtin_names()
                .iter()
                .any(|builtin| builtin.eq_ignore_ascii_case(framework.trim()))
        })
        .unwrap_or(DEFAULT_LAYOUT);
    debug!(layout = name, "no layout configured, using built-in");
    Ok(builtin_layout(name)?)
}

/// Resolver over `layout` with configured project defaults and the process
/// environment.
pub(crate) fn build_resolver(layout: PathLayout, config: &AppConfig) -> PathResolver {
    let tables = config
        .project
        .iter()
        .fold(ResolverTables::new(layout), |tables, (key, value)| {
            tables.with_project_default(key.clone(), value.clone())
        });
    PathResolver::new(tables).with_env(ProcessEnv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_flag_wins_over_config() {
        let mut config = AppConfig::default();
        config.registry.path = Some(PathBuf::from("configured.json"));
        let flag = PathBuf::from("flag.json");

        assert_eq!(registry_path(Some(&flag), &config).unwrap(), flag);
        assert_eq!(
            registry_path(None, &config).unwrap(),
            PathBuf::from("configured.json")
        );
    }

    #[test]
    fn missing_registry_is_an_error() {
        assert!(matches!(
            registry_path(None, &AppConfig::default()),
            Err(CliError::MissingRegistry)
        ));
    }

    #[test]
    fn layout_flag_wins_over_config() {
        let mut config = AppConfig::default();
        config.layout.framework = Some("vite-react".into());
        let args = LayoutArgs {
            layout: Some("tanstack-start".into()),
            layout_file: None,
        };
        assert_eq!(
            select_layout(&args, &config, None).unwrap().framework,
            "tanstack-start"
        );
        assert_eq!(
            select_layout(&LayoutArgs::default(), &config, None)
                .unwrap()
                .framework,
            "vite-react"
        );
    }

    #[test]
    fn genome_framework_used_when_builtin() {
        let config = AppConfig::default();
        let args = LayoutArgs::default();
        assert_eq!(
            select_layout(&args, &config, Some("Vite-React")).unwrap().framework,
            "vite-react"
        );
        assert_eq!(
            select_layout(&args, &config, Some("remix")).unwrap().framework,
            DEFAULT_LAYOUT
        );
    }

    #[test]
    fn unknown_layout_flag_is_not_found() {
        let args = LayoutArgs {
            layout: Some("sveltekit".into()),
            layout_file: None,
        };
        let err = select_layout(&args, &AppConfig::default(), None).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn configured_project_defaults_reach_resolver() {
        let mut config = AppConfig::default();
        config.project.insert("theme".into(), "slate".into());
        let layout = builtin_layout("nextjs").unwrap();
        let resolver = build_resolver(layout, &config);
        assert_eq!(
            resolver.project_defaults().get("theme").map(String::as_str),
            Some("slate")
        );
    }
}
