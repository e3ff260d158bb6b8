//! Recurso declarativo `Definition`.
//!
//! Una `Definition` describe un paso de workflow reutilizable: su `spec`
//! contiene el esquema de parámetros (JSON opaco para este core) y su
//! `status` registra la última revisión publicada. El contenido del `spec`
//! es propiedad de clientes externos; este core sólo muta `status` durante
//! la reconciliación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::Condition;
use crate::revision::RevisionRef;
use crate::DomainError;

/// Spec declarado por el usuario. El `schema` es el payload de parámetros
/// del paso; el core no interpreta su semántica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSpec {
    pub schema: Value,
}

/// Status observado, mutado únicamente por el orquestador de reconciliación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionStatus {
    /// Referencia a la revisión más reciente (None antes de la primera pasada).
    pub latest_revision: Option<RevisionRef>,
    /// Nombre del artifact publicado con el esquema serializado.
    pub config_map_ref: Option<String>,
    /// Condiciones observables (errores de reconciliación, etc.).
    pub conditions: Vec<Condition>,
}

impl DefinitionStatus {
    /// Reemplaza la condición del mismo `kind` si existe; inserta si no.
    pub fn set_condition(&mut self, cond: Condition) {
        match self.conditions.iter_mut().find(|c| c.kind == cond.kind) {
            Some(existing) => *existing = cond,
            None => self.conditions.push(cond),
        }
    }

    /// Elimina la condición del `kind` dado (si estaba presente).
    pub fn clear_condition(&mut self, kind: &str) {
        self.conditions.retain(|c| c.kind != kind);
    }

    pub fn condition(&self, kind: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    name: String,
    namespace: String,
    /// Token de concurrencia optimista: el store lo incrementa en cada
    /// escritura y rechaza escrituras con versión obsoleta.
    pub resource_version: u64,
    /// Marcador de borrado (placeholder de finalizers; la pasada lo respeta
    /// como no-op).
    pub deletion_timestamp: Option<DateTime<Utc>>,
    /// Requisito de versión de controller declarado por el recurso, si lo hay.
    pub controller_requirement: Option<String>,
    pub spec: DefinitionSpec,
    pub status: DefinitionStatus,
}

impl Definition {
    /// Valida nombre y namespace estilo DNS-1123 (minúsculas, dígitos y '-').
    pub fn new(name: &str, namespace: &str, schema: Value) -> Result<Self, DomainError> {
        validate_segment("name", name)?;
        validate_segment("namespace", namespace)?;
        Ok(Definition { name: name.to_string(),
                        namespace: namespace.to_string(),
                        resource_version: 0,
                        deletion_timestamp: None,
                        controller_requirement: None,
                        spec: DefinitionSpec { schema },
                        status: DefinitionStatus::default() })
    }

    pub fn with_controller_requirement(mut self, version: &str) -> Self {
        self.controller_requirement = Some(version.to_string());
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn namespace(&self) -> &str { &self.namespace }
}

fn validate_segment(field: &str, value: &str) -> Result<(), DomainError> {
    let valid = !value.is_empty()
                && value.len() <= 253
                && value.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                && !value.starts_with('-')
                && !value.ends_with('-');
    if !valid {
        return Err(DomainError::ValidationError(format!("invalid {field}: {value:?}")));
    }
    Ok(())
}
