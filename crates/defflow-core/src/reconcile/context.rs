//! Contexto de una pasada de reconciliación.
//!
//! Transporta la señal de deadline/cancelación del framework externo. Todo
//! paso que toque el store la verifica y aborta con un error transitorio
//! (el planificador externo re-agenda con backoff).

use std::time::{Duration, Instant};

use crate::constants::DEFAULT_RECONCILE_TIMEOUT_SECS;
use crate::errors::ReconcileError;

#[derive(Debug, Clone)]
pub struct ReconcileContext {
    deadline: Option<Instant>,
}

impl ReconcileContext {
    /// Contexto sin deadline (tests, herramientas).
    pub fn background() -> Self {
        ReconcileContext { deadline: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        ReconcileContext { deadline: Some(Instant::now() + timeout) }
    }

    /// Deadline por defecto de una pasada.
    pub fn with_default_timeout() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_RECONCILE_TIMEOUT_SECS))
    }

    pub fn expired(&self) -> bool {
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }

    pub fn check(&self) -> Result<(), ReconcileError> {
        if self.expired() {
            return Err(ReconcileError::DeadlineExceeded);
        }
        Ok(())
    }
}
