//! Contrato del store declarativo compartido.
//!
//! El store real (API server) es un colaborador externo; este trait captura
//! la porción que el core necesita con semántica de concurrencia optimista:
//! las escrituras sobre una versión obsoleta devuelven `Conflict` y el
//! llamador reintenta re-leyendo, nunca bloquea.

use std::fmt;

use defflow_domain::{ArtifactApply, Definition, Revision, SchemaArtifact};

use crate::errors::StoreError;

/// Identidad namespaced de un recurso.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub namespace: String,
    pub name: String,
}

impl ResourceKey {
    pub fn new(namespace: &str, name: &str) -> Self {
        ResourceKey { namespace: namespace.to_string(),
                      name: name.to_string() }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

pub trait DeclarativeStore {
    /// Lee una definición por identidad.
    fn get_definition(&self, key: &ResourceKey) -> Result<Definition, StoreError>;

    /// Escribe únicamente el `status` de la definición. `Conflict` si el
    /// `resource_version` de `def` ya no es el vigente. Devuelve el objeto
    /// actualizado (con versión nueva).
    fn update_definition_status(&mut self, def: &Definition) -> Result<Definition, StoreError>;

    /// Crea una revisión inmutable. `Conflict` si el nombre ya existe
    /// (creador concurrente de la misma generación).
    fn create_revision(&mut self, revision: Revision) -> Result<Revision, StoreError>;

    /// Lista las revisiones de una definición (sin orden garantizado).
    fn list_revisions(&self, namespace: &str, definition_name: &str) -> Result<Vec<Revision>, StoreError>;

    /// Borra una revisión por identidad.
    fn delete_revision(&mut self, key: &ResourceKey) -> Result<(), StoreError>;

    /// Lee un artifact publicado.
    fn get_artifact(&self, key: &ResourceKey) -> Result<SchemaArtifact, StoreError>;

    /// Crea o sobrescribe un artifact. Contenido idéntico ⇒ `Unchanged`
    /// (idempotente); distinto ⇒ `Replaced` (last-writer-wins).
    fn apply_artifact(&mut self, artifact: SchemaArtifact) -> Result<ArtifactApply, StoreError>;
}
