//! Process environment as an [`EnvSource`].

use splice_core::domain::EnvSource;

/// Reads `{{env.<key>}}` values from the running process.
///
/// Values that are not valid unicode resolve as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
