//! Resultado transitorio de una pasada de orquestación.

/// Motivo por el cual una pasada terminó sin efectos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// El recurso desapareció entre la notificación y la lectura.
    NotFound,
    /// Marcado para borrado (placeholder de finalizers).
    Deleting,
    /// No cumple el requisito de versión/propiedad de este controller.
    ControllerMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No-op silencioso.
    Skipped(SkipReason),
    /// Pasada completa; indica si hubo revisión nueva y/o escritura de status.
    Done {
        revision_created: bool,
        status_updated: bool,
    },
    /// La publicación falló: el error quedó reportado como condición de
    /// status + evento, y la pasada se considera exitosa para que el
    /// backoff del framework gobierne el reintento.
    DoneWithCondition { message: String },
}

impl ReconcileOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, ReconcileOutcome::Skipped(_))
    }
}
