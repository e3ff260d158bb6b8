// defflow-domain library entry point
pub mod artifact;
pub mod condition;
pub mod definition;
pub mod error;
pub mod revision;
pub use artifact::{artifact_name, ArtifactApply, SchemaArtifact};
pub use condition::{Condition, ConditionStatus};
pub use definition::{Definition, DefinitionSpec, DefinitionStatus};
pub use error::DomainError;
pub use revision::{revision_name, Revision, RevisionRef};
