//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "validate a genome" or "resolve a path".

pub mod artifact_loader;
pub mod validation_service;

pub use artifact_loader::{ArtifactLoad, ArtifactLoader, LoadWarning};
pub use validation_service::ValidationService;
