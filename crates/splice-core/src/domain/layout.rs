//! Project-layout tables: symbolic `paths.<key>` → directory prefix.
//!
//! A layout is supplied by whichever target-framework adapter is active and
//! is immutable once built. Several layouts can coexist; nothing here is
//! global.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Directory prefixes for one target framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLayout {
    pub framework: String,
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
}

impl PathLayout {
    pub fn new(framework: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            paths: BTreeMap::new(),
        }
    }

    pub fn with_path(mut self, key: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.paths.insert(key.into(), prefix.into());
        self
    }

    /// Build a layout from static pairs, e.g. a built-in table.
    pub fn from_pairs(framework: impl Into<String>, pairs: &[(&str, &str)]) -> Self {
        Self {
            framework: framework.into(),
            paths: pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.paths.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Reject blank keys and absolute prefixes.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.framework.trim().is_empty() {
            return Err(DomainError::InvalidLayout {
                framework: self.framework.clone(),
                reason: "framework name cannot be empty".into(),
            });
        }

        for (key, prefix) in &self.paths {
            if key.trim().is_empty() || key.contains(char::is_whitespace) {
                return Err(DomainError::InvalidLayout {
                    framework: self.framework.clone(),
                    reason: format!("invalid key '{key}'"),
                });
            }
            if prefix.starts_with('/') || prefix.starts_with('\\') {
                return Err(DomainError::InvalidLayout {
                    framework: self.framework.clone(),
                    reason: format!("prefix for '{key}' must be relative, got '{prefix}'"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key() {
        let layout = PathLayout::from_pairs("nextjs", &[("shared_library", "src/lib/")]);
        assert_eq!(layout.get("shared_library"), Some("src/lib/"));
        assert_eq!(layout.get("hooks"), None);
    }

    #[test]
    fn absolute_prefix_is_rejected() {
        let layout = PathLayout::new("bad").with_path("root", "/etc/");
        assert!(matches!(
            layout.validate(),
            Err(DomainError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn blank_framework_is_rejected() {
        assert!(PathLayout::new("  ").validate().is_err());
    }
}
