//! Schema Publisher: publica el esquema serializado de una revisión en el
//! registro compartido.
//!
//! Reglas clave:
//! - El nombre del artifact se deriva de la revisión (determinista), así que
//!   publicar dos veces el mismo par (definición, revisión) es idempotente.
//! - El contenido se serializa a JSON canónico (orden estable de claves)
//!   para que "mismo contenido" sea comparable byte a byte.
//! - Contenido distinto bajo el mismo nombre no debería ocurrir dado que las
//!   revisiones son inmutables; si ocurre, gana el último escritor y el
//!   llamador lo registra como anomalía de nivel warning.

use defflow_domain::{artifact_name, ArtifactApply, Definition, RevisionRef, SchemaArtifact};

use crate::constants::SCHEMA_DATA_KEY;
use crate::errors::ReconcileError;
use crate::hashing::to_canonical_json;
use crate::reconcile::ReconcileContext;
use crate::store::DeclarativeStore;

/// Contrato de serialización (definición, revisión) → artifact publicable.
/// El nombre del artifact resultante debe ser determinista.
pub trait SchemaEncoder {
    fn encode(&self, def: &Definition, revision: &RevisionRef) -> SchemaArtifact;
}

/// Encoder neutral: esquema canónico bajo la clave estándar, sin metadata de
/// descubrimiento (los encoders de plataforma la agregan por fuera del core).
#[derive(Clone, Default)]
pub struct CanonicalSchemaEncoder;

impl SchemaEncoder for CanonicalSchemaEncoder {
    fn encode(&self, def: &Definition, revision: &RevisionRef) -> SchemaArtifact {
        let mut artifact = SchemaArtifact::new(artifact_name(&revision.name), def.namespace());
        artifact.data
                .insert(SCHEMA_DATA_KEY.to_string(), to_canonical_json(&def.spec.schema));
        artifact
    }
}

/// Referencia al artifact publicado más el resultado de la escritura.
#[derive(Debug, Clone)]
pub struct PublishedSchema {
    pub artifact_ref: String,
    pub outcome: ArtifactApply,
}

/// Publica el esquema de `revision`. Los errores del store suben al
/// orquestador, que decide entre condición de status y reintento externo.
pub fn publish_schema<S: DeclarativeStore>(store: &mut S,
                                           encoder: &dyn SchemaEncoder,
                                           ctx: &ReconcileContext,
                                           def: &Definition,
                                           revision: &RevisionRef)
                                           -> Result<PublishedSchema, ReconcileError> {
    ctx.check()?;
    let artifact = encoder.encode(def, revision);
    let artifact_ref = artifact.name.clone();
    let outcome = store.apply_artifact(artifact)?;
    Ok(PublishedSchema { artifact_ref, outcome })
}
