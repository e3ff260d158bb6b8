//! Condiciones de status para observabilidad de la reconciliación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind de la condición que refleja el resultado de la reconciliación.
pub const CONDITION_SYNCED: &str = "Synced";
/// Reason estable para errores de reconciliación.
pub const REASON_RECONCILE_ERROR: &str = "ReconcileError";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
}

/// Condición estructurada adjunta al status de una `Definition`.
/// Mapea un error terminal a un registro observable sin bloquear pasadas
/// futuras de reconciliación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: String,
    pub status: ConditionStatus,
    pub reason: String,
    pub message: String,
    pub last_transition: DateTime<Utc>,
}

impl Condition {
    /// Condición `Synced=False` construida a partir de un error de
    /// reconciliación (publicación o escritura de status fallida).
    pub fn reconcile_error(message: String) -> Self {
        Condition { kind: CONDITION_SYNCED.to_string(),
                    status: ConditionStatus::False,
                    reason: REASON_RECONCILE_ERROR.to_string(),
                    message,
                    last_transition: Utc::now() }
    }
}
