//! Store declarativo in-memory.
//!
//! Implementación de referencia con paridad semántica respecto al store
//! externo real: versiones de recurso monótonas y `Conflict` en escrituras
//! obsoletas. Los métodos inherentes (`seed_definition`,
//! `set_definition_schema`) simulan a los clientes externos que poseen el
//! contenido del spec; el core sólo escribe status, revisiones y artifacts.

use std::collections::HashMap;

use defflow_domain::{ArtifactApply, Definition, Revision, SchemaArtifact};
use serde_json::Value;

use super::types::{DeclarativeStore, ResourceKey};
use crate::errors::StoreError;

#[derive(Default)]
pub struct InMemoryStore {
    definitions: HashMap<ResourceKey, Definition>,
    revisions: HashMap<ResourceKey, Revision>,
    artifacts: HashMap<ResourceKey, SchemaArtifact>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta una definición como lo haría un cliente externo (versión 1).
    pub fn seed_definition(&mut self, mut def: Definition) {
        def.resource_version = 1;
        let key = ResourceKey::new(def.namespace(), def.name());
        self.definitions.insert(key, def);
    }

    /// Simula una edición externa del contenido: reemplaza el schema del
    /// spec y avanza la versión del recurso.
    pub fn set_definition_schema(&mut self, key: &ResourceKey, schema: Value) -> Result<(), StoreError> {
        let def = self.definitions
                      .get_mut(key)
                      .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        def.spec.schema = schema;
        def.resource_version += 1;
        Ok(())
    }

    /// Marca la definición para borrado (deletion timestamp).
    pub fn mark_deleting(&mut self, key: &ResourceKey) -> Result<(), StoreError> {
        let def = self.definitions
                      .get_mut(key)
                      .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        def.deletion_timestamp = Some(chrono::Utc::now());
        def.resource_version += 1;
        Ok(())
    }

    pub fn revision_count(&self, namespace: &str, definition_name: &str) -> usize {
        self.revisions
            .values()
            .filter(|r| r.namespace == namespace && r.definition_name == definition_name)
            .count()
    }
}

impl DeclarativeStore for InMemoryStore {
    fn get_definition(&self, key: &ResourceKey) -> Result<Definition, StoreError> {
        self.definitions
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn update_definition_status(&mut self, def: &Definition) -> Result<Definition, StoreError> {
        let key = ResourceKey::new(def.namespace(), def.name());
        let stored = self.definitions
                         .get_mut(&key)
                         .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        if stored.resource_version != def.resource_version {
            return Err(StoreError::Conflict(key.to_string()));
        }
        stored.status = def.status.clone();
        stored.resource_version += 1;
        Ok(stored.clone())
    }

    fn create_revision(&mut self, revision: Revision) -> Result<Revision, StoreError> {
        let key = ResourceKey::new(&revision.namespace, &revision.name);
        if self.revisions.contains_key(&key) {
            return Err(StoreError::Conflict(key.to_string()));
        }
        self.revisions.insert(key, revision.clone());
        Ok(revision)
    }

    fn list_revisions(&self, namespace: &str, definition_name: &str) -> Result<Vec<Revision>, StoreError> {
        Ok(self.revisions
               .values()
               .filter(|r| r.namespace == namespace && r.definition_name == definition_name)
               .cloned()
               .collect())
    }

    fn delete_revision(&mut self, key: &ResourceKey) -> Result<(), StoreError> {
        self.revisions
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn get_artifact(&self, key: &ResourceKey) -> Result<SchemaArtifact, StoreError> {
        self.artifacts
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn apply_artifact(&mut self, artifact: SchemaArtifact) -> Result<ArtifactApply, StoreError> {
        let key = ResourceKey::new(&artifact.namespace, &artifact.name);
        let outcome = match self.artifacts.get(&key) {
            None => ArtifactApply::Created,
            Some(existing) if existing.same_content(&artifact) => ArtifactApply::Unchanged,
            Some(_) => ArtifactApply::Replaced,
        };
        if outcome != ArtifactApply::Unchanged {
            self.artifacts.insert(key, artifact);
        }
        Ok(outcome)
    }
}
