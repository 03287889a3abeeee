//! Splice Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Splice
//! module composition validator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           splice-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ValidationService, ArtifactLoader)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: ArtifactRegistry)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     splice-adapters (Infrastructure)    │
//! │ (InMemoryRegistry, ManifestRegistry...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Genome, PathResolver, OwnershipMap)    │
//! │         No I/O, No Async                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use splice_core::{
//!     application::ValidationService,
//!     domain::{Genome, PathLayout, PathResolver},
//! };
//!
//! # fn run(registry: Box<dyn splice_core::application::ArtifactRegistry>, genome: Genome)
//! # -> splice_core::error::SpliceResult<()> {
//! let layout = PathLayout::from_pairs("nextjs", &[("shared_library", "src/lib/")]);
//! let service = ValidationService::new(registry, PathResolver::for_layout(layout));
//!
//! let result = service.validate_genome(&genome)?;
//! if !result.is_valid {
//!     for error in &result.errors {
//!         eprintln!("{}: {}", error.module_id, error.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Domain layer (pure composition rules)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactLoader, ValidationService,
        ports::ArtifactRegistry,
    };
    pub use crate::domain::{
        ArtifactDescriptor, ErrorType, FileArtifact, Genome, Module, ModuleId, ModuleKind,
        ModuleParameters, PathLayout, PathResolver, ProjectMetadata, ValidationError,
        ValidationResult, ValidationWarning, WarningType,
    };
    pub use crate::error::{SpliceError, SpliceResult};
}

