//! Taxonomía de errores de la reconciliación.
//!
//! - `StoreError`: fallos del store declarativo compartido (semántica
//!   conflict-on-stale-version requerida por el contrato externo).
//! - `ReconcileError`: errores de una pasada; los transitorios suben al
//!   planificador externo para backoff-and-retry, los terminales se escriben
//!   como condición de status y no bloquean pasadas futuras.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("write conflict (stale resource version): {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ReconcileError {
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("conflict persists after {attempts} attempts: {last}")]
    ConflictExhausted { attempts: u32, last: StoreError },
    #[error("reconcile deadline exceeded")]
    DeadlineExceeded,
    #[error("schema publish failed: {0}")]
    Publish(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// Clasificación gruesa para decidir reintento externo vs. reporte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transient,
    Permanent,
}

pub fn classify_error(err: &ReconcileError) -> ErrorClass {
    match err {
        ReconcileError::Store(StoreError::Conflict(_))
        | ReconcileError::Store(StoreError::Unavailable(_))
        | ReconcileError::ConflictExhausted { .. }
        | ReconcileError::DeadlineExceeded => ErrorClass::Transient,
        ReconcileError::Store(StoreError::NotFound(_))
        | ReconcileError::Publish(_)
        | ReconcileError::Internal(_) => ErrorClass::Permanent,
    }
}
