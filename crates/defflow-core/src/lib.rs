//! defflow-core: reconciliación de revisiones de definiciones con historial
//! acotado y publicación idempotente de esquemas.
pub mod constants;
pub mod errors;
pub mod gate;
pub mod hashing;
pub mod publish;
pub mod reconcile;
pub mod recorder;
pub mod retry;
pub mod revision;
pub mod store;

pub use errors::{classify_error, ErrorClass, ReconcileError, StoreError};
pub use gate::matches_controller_requirement;
pub use publish::{publish_schema, CanonicalSchemaEncoder, PublishedSchema, SchemaEncoder};
pub use reconcile::{persist_status, ReconcileContext, ReconcileOptions, ReconcileOutcome, Reconciler, SkipReason};
pub use recorder::{EventRecorder, EventSeverity, LogRecorder, MemoryRecorder, RecordedEvent};
pub use retry::{report_then_ignore, with_conflict_retry, BackoffPolicy};
pub use revision::{ensure_revision, EnsuredRevision};
pub use store::{DeclarativeStore, InMemoryStore, ResourceKey};
