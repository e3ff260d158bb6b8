//! Encoder Definición → Artifact publicable con metadata de descubrimiento.
//!
//! Reglas clave:
//! - El `data` del artifact es exactamente el que produce el encoder canónico
//!   del core: mismo contenido ⇒ mismos bytes ⇒ escritura idempotente.
//! - Los labels identifican (definición, revisión); viven fuera del `data` y
//!   por eso no participan en la comparación de contenido.

use defflow_core::{CanonicalSchemaEncoder, SchemaEncoder};
use defflow_domain::{Definition, RevisionRef, SchemaArtifact};

use crate::labels::{LABEL_DEFINITION_NAME, LABEL_DEFINITION_REVISION};

/// Encoder de plataforma: delega la serialización canónica al core y anota
/// el artifact con los labels de descubrimiento estándar.
#[derive(Clone, Default)]
pub struct DiscoverySchemaEncoder {
    inner: CanonicalSchemaEncoder,
}

impl DiscoverySchemaEncoder {
    pub fn new() -> Self {
        DiscoverySchemaEncoder::default()
    }
}

impl SchemaEncoder for DiscoverySchemaEncoder {
    fn encode(&self, def: &Definition, revision: &RevisionRef) -> SchemaArtifact {
        let mut artifact = self.inner.encode(def, revision);
        artifact.labels
                .insert(LABEL_DEFINITION_NAME.to_string(), def.name().to_string());
        artifact.labels
                .insert(LABEL_DEFINITION_REVISION.to_string(), revision.name.clone());
        artifact
    }
}
