pub mod artifact;
pub mod genome;
pub mod module;
pub mod report;

pub use crate::domain::DomainError;
pub use artifact::ArtifactDescriptor;
pub use genome::Genome;
pub use module::Module;
pub use report::ValidationResult;
