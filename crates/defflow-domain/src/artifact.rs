//! Artifact publicado con el esquema serializado de una revisión.
//!
//! Un `SchemaArtifact` es un registro clave/valor (estilo config map) que
//! otros componentes consultan para descubrir el esquema de parámetros de un
//! paso. Invariantes:
//! - Un artifact por par (definición, revisión); el nombre se deriva del
//!   nombre de la revisión.
//! - Escritura idempotente: re-publicar contenido idéntico no produce cambio
//!   observable. Contenido distinto bajo el mismo nombre gana el último
//!   escritor (`Replaced`, anomalía que el llamador registra como warning).
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sufijo estable del nombre del artifact de esquema.
pub const SCHEMA_ARTIFACT_SUFFIX: &str = "-schema";

/// Nombre determinista del artifact para una revisión dada.
pub fn artifact_name(revision_name: &str) -> String {
    format!("{revision_name}{SCHEMA_ARTIFACT_SUFFIX}")
}

/// Resultado de aplicar un artifact contra el store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactApply {
    /// No existía; fue creado.
    Created,
    /// Existía con contenido idéntico; no hubo cambio observable.
    Unchanged,
    /// Existía con contenido distinto; se sobrescribió (last-writer-wins).
    Replaced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaArtifact {
    pub name: String,
    pub namespace: String,
    /// Entradas clave/valor con el esquema serializado.
    pub data: BTreeMap<String, String>,
    /// Labels de descubrimiento (no entran en la comparación de contenido).
    pub labels: BTreeMap<String, String>,
}

impl SchemaArtifact {
    pub fn new(name: String, namespace: &str) -> Self {
        SchemaArtifact { name,
                         namespace: namespace.to_string(),
                         data: BTreeMap::new(),
                         labels: BTreeMap::new() }
    }

    /// Igualdad de contenido publicado (sólo `data`; labels son metadata).
    pub fn same_content(&self, other: &SchemaArtifact) -> bool {
        self.data == other.data
    }
}
