//! Revisión inmutable de una `Definition`.
//!
//! Rol en el flujo:
//! - El Revision Store crea una `Revision` cuando el fingerprint del
//!   contenido cambia; nunca se muta después de creada.
//! - Las revisiones de una misma definición quedan totalmente ordenadas por
//!   `generation` (monótona por definición, sin orden global entre
//!   definiciones).
//! - El nombre se deriva de forma determinista: `<definición>-v<generación>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nombre lógico de la revisión `generation` de una definición.
pub fn revision_name(definition_name: &str, generation: u64) -> String {
    format!("{definition_name}-v{generation}")
}

/// Referencia liviana a una revisión, persistida en `DefinitionStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRef {
    pub name: String,
    pub generation: u64,
    pub fingerprint: String,
}

/// Snapshot inmutable del contenido de una definición.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub name: String,
    pub namespace: String,
    pub definition_name: String,
    pub generation: u64,
    /// Hash canónico del contenido (asignado al crear; identidad del snapshot).
    pub fingerprint: String,
    /// Copia completa del contenido al momento de la revisión.
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

impl Revision {
    pub fn new(namespace: &str, definition_name: &str, generation: u64, fingerprint: String, content: Value) -> Self {
        Revision { name: revision_name(definition_name, generation),
                   namespace: namespace.to_string(),
                   definition_name: definition_name.to_string(),
                   generation,
                   fingerprint,
                   content,
                   created_at: Utc::now() }
    }

    pub fn to_ref(&self) -> RevisionRef {
        RevisionRef { name: self.name.clone(),
                      generation: self.generation,
                      fingerprint: self.fingerprint.clone() }
    }
}
