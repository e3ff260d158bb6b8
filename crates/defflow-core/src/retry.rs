//! Combinadores de reintento y de absorción de fallos secundarios.
//!
//! Todo read-modify-write contra el store compartido pasa por
//! `with_conflict_retry`: política acotada, delay lineal-creciente, logs por
//! intento. `report_then_ignore` hace visible (y testeable) el patrón
//! "reportar y seguir" para fallos al escribir un fallo.

use std::time::Duration;

use log::warn;

use crate::errors::{ReconcileError, StoreError};
use crate::reconcile::ReconcileContext;

/// Política de backoff para conflictos de concurrencia optimista.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy { max_attempts: 4,
                        base_delay: Duration::from_millis(10) }
    }
}

impl BackoffPolicy {
    /// Delay del intento `attempt` (1-based): lineal-creciente acotado.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Ejecuta `op` reintentando ante `Conflict` hasta agotar la política.
/// El deadline del contexto se verifica antes de cada intento; otros errores
/// del store se propagan sin reintentar (el backoff externo decide).
pub fn with_conflict_retry<T, F>(ctx: &ReconcileContext, policy: &BackoffPolicy, mut op: F) -> Result<T, ReconcileError>
    where F: FnMut() -> Result<T, StoreError>
{
    let mut attempts = 0u32;
    loop {
        ctx.check()?;
        match op() {
            Err(e @ StoreError::Conflict(_)) => {
                attempts += 1;
                if attempts >= policy.max_attempts {
                    return Err(ReconcileError::ConflictExhausted { attempts, last: e });
                }
                let delay = policy.delay_for(attempts);
                warn!("conflicto optimista (intento {}): {} -> esperando {:?}", attempts, e, delay);
                std::thread::sleep(delay);
            }
            Err(e) => return Err(ReconcileError::from(e)),
            Ok(v) => return Ok(v),
        }
    }
}

/// Reporta (log warn) y descarta el error de una escritura secundaria.
/// Nunca escala: registrar un fallo no debe producir un loop de fallos.
pub fn report_then_ignore<T>(what: &str, result: Result<T, ReconcileError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("{what}: fallo secundario ignorado: {e}");
            None
        }
    }
}
