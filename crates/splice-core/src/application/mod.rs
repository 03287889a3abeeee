//! Application layer for Splice.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ValidationService, ArtifactLoader)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! composition rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ArtifactLoad, ArtifactLoader, LoadWarning, ValidationService};

// Re-export port traits (for adapter implementation)
pub use ports::ArtifactRegistry;

pub use error::ApplicationError;
