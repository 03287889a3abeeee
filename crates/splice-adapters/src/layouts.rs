//! Built-in path layouts and layout files.
//!
//! A layout maps `{{paths.<key>}}` to a directory prefix for one target
//! framework. Three layouts ship with Splice; others are read from TOML:
//!
//! ```toml
//! framework = "remix"
//!
//! [paths]
//! app_root = "app/"
//! shared_library = "app/lib/"
//! ```

use std::{fs, path::Path};

use tracing::{debug, instrument};

use splice_core::{
    application::ApplicationError,
    domain::PathLayout,
    error::{SpliceError, SpliceResult},
};

/// Layout used when nothing else is configured.
pub const DEFAULT_LAYOUT: &str = "nextjs";

const NEXTJS: &[(&str, &str)] = &[
    ("source_root", "src/"),
    ("app_root", "src/app/"),
    ("pages", "src/app/"),
    ("api_routes", "src/app/api/"),
    ("components", "src/components/"),
    ("ui_components", "src/components/ui/"),
    ("layouts", "src/components/layouts/"),
    ("shared_library", "src/lib/"),
    ("hooks", "src/hooks/"),
    ("stores", "src/stores/"),
    ("types", "src/types/"),
    ("styles", "src/styles/"),
    ("server", "src/server/"),
    ("database", "src/db/"),
    ("middleware", "src/"),
    ("tests", "tests/"),
    ("public", "public/"),
    ("project_root", ""),
];

const VITE_REACT: &[(&str, &str)] = &[
    ("source_root", "src/"),
    ("app_root", "src/"),
    ("pages", "src/pages/"),
    ("api_routes", "server/api/"),
    ("components", "src/components/"),
    ("ui_components", "src/components/ui/"),
    ("layouts", "src/layouts/"),
    ("shared_library", "src/lib/"),
    ("hooks", "src/hooks/"),
    ("stores", "src/stores/"),
    ("types", "src/types/"),
    ("styles", "src/styles/"),
    ("server", "server/"),
    ("database", "server/db/"),
    ("tests", "tests/"),
    ("public", "public/"),
    ("project_root", ""),
];

const TANSTACK_START: &[(&str, &str)] = &[
    ("source_root", "src/"),
    ("app_root", "src/"),
    ("pages", "src/routes/"),
    ("api_routes", "src/routes/api/"),
    ("components", "src/components/"),
    ("ui_components", "src/components/ui/"),
    ("layouts", "src/components/layouts/"),
    ("shared_library", "src/lib/"),
    ("hooks", "src/hooks/"),
    ("stores", "src/stores/"),
    ("types", "src/types/"),
    ("styles", "src/styles/"),
    ("server", "src/server/"),
    ("database", "src/db/"),
    ("tests", "tests/"),
    ("public", "public/"),
    ("project_root", ""),
];

const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    ("nextjs", NEXTJS),
    ("tanstack-start", TANSTACK_START),
    ("vite-react", VITE_REACT),
];

/// Names of the built-in layouts, sorted.
pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN.iter().map(|(name, _)| *name).collect()
}

/// Look up a built-in layout by framework name (case-insensitive).
pub fn builtin_layout(name: &str) -> SpliceResult<PathLayout> {
    BUILTIN
        .iter()
        .find(|(builtin, _)| builtin.eq_ignore_ascii_case(name.trim()))
        .map(|(builtin, pairs)| PathLayout::from_pairs(*builtin, pairs))
        .ok_or_else(|| {
            ApplicationError::LayoutNotFound {
                name: name.to_owned(),
            }
            .into()
        })
}

/// Read a layout table from a TOML file.
///
/// # Errors
///
/// Returns [`ApplicationError::LayoutLoadFailed`] when the file cannot be read
/// or parsed, and a domain error when the table itself is invalid.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_layout_file(path: impl AsRef<Path>) -> SpliceResult<PathLayout> {
    let path = path.as_ref();
    let failed = |reason: String| ApplicationError::LayoutLoadFailed {
        path: path.to_path_buf(),
        reason,
    };

    let raw = fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
    let layout: PathLayout = toml::from_str(&raw).map_err(|e| failed(e.to_string()))?;
    layout.validate().map_err(SpliceError::Domain)?;

    debug!(framework = %layout.framework, keys = layout.len(), "layout file loaded");
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use splice_core::domain::{ModuleParameters, PathResolver};
    use tempfile::TempDir;

    #[test]
    fn builtins_are_valid() {
        for name in builtin_names() {
            builtin_layout(name).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn nextjs_shared_library_is_src_lib() {
        let layout = builtin_layout("NextJS").unwrap();
        assert_eq!(layout.framework, "nextjs");
        assert_eq!(layout.get("shared_library"), Some("src/lib/"));
    }

    #[test]
    fn builtins_share_keys() {
        let nextjs = builtin_layout("nextjs").unwrap();
        for name in ["vite-react", "tanstack-start"] {
            let other = builtin_layout(name).unwrap();
            for key in other.keys() {
                assert!(nextjs.get(key).is_some(), "{name} has extra key {key}");
            }
        }
    }

    #[test]
    fn project_root_resolves_to_bare_file() {
        let resolver = PathResolver::for_layout(builtin_layout("vite-react").unwrap());
        let path = resolver
            .resolve("{{paths.project_root}}vite.config.ts", &ModuleParameters::new())
            .unwrap();
        assert_eq!(path, "vite.config.ts");
    }

    #[test]
    fn unknown_layout_is_not_found() {
        let err = builtin_layout("sveltekit").unwrap_err();
        assert!(matches!(
            err,
            SpliceError::Application(ApplicationError::LayoutNotFound { .. })
        ));
    }

    #[test]
    fn layout_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("remix.toml");
        fs::write(
            &path,
            "framework = \"remix\"\n\n[paths]\napp_root = \"app/\"\nshared_library = \"app/lib/\"\n",
        )
        .unwrap();

        let layout = load_layout_file(&path).unwrap();
        assert_eq!(layout.framework, "remix");
        assert_eq!(layout.get("shared_library"), Some("app/lib/"));
    }

    #[test]
    fn layout_file_with_absolute_prefix_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "framework = \"bad\"\n[paths]\nroot = \"/etc/\"\n").unwrap();

        assert!(matches!(
            load_layout_file(&path),
            Err(SpliceError::Domain(_))
        ));
    }

    #[test]
    fn unreadable_layout_file_fails_to_load() {
        assert!(matches!(
            load_layout_file("/absolutely/does/not/exist.toml"),
            Err(SpliceError::Application(ApplicationError::LayoutLoadFailed { .. }))
        ));
    }
}
