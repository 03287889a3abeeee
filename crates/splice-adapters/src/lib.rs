//! Infrastructure adapters for Splice.
//!
//! This crate implements the ports defined in `splice-core::application::ports`
//! and supplies the injected tables the domain needs (path layouts, the
//! process environment). It contains all filesystem I/O.

pub mod env;
pub mod genome_loader;
pub mod layouts;
pub mod registry;

// Re-export commonly used adapters
pub use env::ProcessEnv;
pub use genome_loader::load_genome;
pub use layouts::{builtin_layout, builtin_names, load_layout_file};
pub use registry::{DirectoryRegistry, InMemoryRegistry, ManifestRegistry, open_registry};
