//! Fallo de publicación: se registra condición de status + evento warning y
//! la pasada reporta éxito-con-condición (el backoff externo gobierna el
//! reintento). Un fallo secundario al escribir la condición sólo se loguea.

use defflow_core::{DeclarativeStore, EventSeverity, InMemoryStore, MemoryRecorder, ReconcileContext,
                   ReconcileOptions, ReconcileOutcome, Reconciler, ResourceKey, StoreError};
use defflow_domain::condition::CONDITION_SYNCED;
use defflow_domain::{ArtifactApply, ConditionStatus, Definition, Revision, SchemaArtifact};
use serde_json::json;

/// Store cuyo registro de artifacts está caído; opcionalmente empieza a
/// rechazar también las escrituras de status a partir de la llamada N.
struct BrokenRegistry {
    inner: InMemoryStore,
    fail_updates_from: Option<u32>,
    update_calls: u32,
}

impl BrokenRegistry {
    fn new(inner: InMemoryStore, fail_updates_from: Option<u32>) -> Self {
        BrokenRegistry { inner,
                         fail_updates_from,
                         update_calls: 0 }
    }
}

impl DeclarativeStore for BrokenRegistry {
    fn get_definition(&self, key: &ResourceKey) -> Result<Definition, StoreError> {
        self.inner.get_definition(key)
    }
    fn update_definition_status(&mut self, def: &Definition) -> Result<Definition, StoreError> {
        self.update_calls += 1;
        if let Some(from) = self.fail_updates_from {
            if self.update_calls >= from {
                return Err(StoreError::Unavailable("status backend down".to_string()));
            }
        }
        self.inner.update_definition_status(def)
    }
    fn create_revision(&mut self, revision: Revision) -> Result<Revision, StoreError> {
        self.inner.create_revision(revision)
    }
    fn list_revisions(&self, namespace: &str, definition_name: &str) -> Result<Vec<Revision>, StoreError> {
        self.inner.list_revisions(namespace, definition_name)
    }
    fn delete_revision(&mut self, key: &ResourceKey) -> Result<(), StoreError> {
        self.inner.delete_revision(key)
    }
    fn get_artifact(&self, key: &ResourceKey) -> Result<SchemaArtifact, StoreError> {
        self.inner.get_artifact(key)
    }
    fn apply_artifact(&mut self, _artifact: SchemaArtifact) -> Result<ArtifactApply, StoreError> {
        Err(StoreError::Unavailable("registry down".to_string()))
    }
}

fn seeded() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.seed_definition(Definition::new("step-a", "ns", json!({"p": 1})).unwrap());
    store
}

#[test]
fn publish_failure_reports_condition_and_event() {
    let store = BrokenRegistry::new(seeded(), None);
    let mut reconciler = Reconciler::new(store, MemoryRecorder::new(), ReconcileOptions::default());
    let key = ResourceKey::new("ns", "step-a");

    let outcome = reconciler.reconcile(&ReconcileContext::background(), &key).unwrap();
    assert!(matches!(outcome, ReconcileOutcome::DoneWithCondition { .. }));

    // evento warning emitido
    let warnings = reconciler.recorder().warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, EventSeverity::Warning);
    assert_eq!(warnings[0].reason, "PublishFailed");

    // condición terminal visible en status; el latest sí quedó persistido
    let def = reconciler.store().get_definition(&key).unwrap();
    assert_eq!(def.status.latest_revision.as_ref().unwrap().name, "step-a-v1");
    let cond = def.status.condition(CONDITION_SYNCED).expect("condition recorded");
    assert_eq!(cond.status, ConditionStatus::False);
    assert!(cond.message.contains("registry down"));
    assert!(def.status.config_map_ref.is_none());
}

#[test]
fn secondary_condition_write_failure_is_swallowed() {
    // la primera escritura (latest) pasa; la segunda (condición) falla
    let store = BrokenRegistry::new(seeded(), Some(2));
    let mut reconciler = Reconciler::new(store, MemoryRecorder::new(), ReconcileOptions::default());
    let key = ResourceKey::new("ns", "step-a");

    let outcome = reconciler.reconcile(&ReconcileContext::background(), &key).unwrap();
    // el fallo secundario nunca escala: la pasada sigue reportando la condición
    assert!(matches!(outcome, ReconcileOutcome::DoneWithCondition { .. }));

    let def = reconciler.store().get_definition(&key).unwrap();
    assert!(def.status.condition(CONDITION_SYNCED).is_none());
    assert_eq!(def.status.latest_revision.as_ref().unwrap().name, "step-a-v1");
}

#[test]
fn recovery_clears_the_error_condition() {
    // primera pasada contra el registro caído deja la condición puesta
    let store = BrokenRegistry::new(seeded(), None);
    let mut reconciler = Reconciler::new(store, MemoryRecorder::new(), ReconcileOptions::default());
    let key = ResourceKey::new("ns", "step-a");
    reconciler.reconcile(&ReconcileContext::background(), &key).unwrap();

    // reconstruir un reconciler sano sobre el mismo estado lógico
    let mut healthy_inner = seeded();
    let broken_def = reconciler.store().get_definition(&key).unwrap();
    healthy_inner.seed_definition(broken_def);
    let mut healthy = Reconciler::new(healthy_inner, MemoryRecorder::new(), ReconcileOptions::default());

    let outcome = healthy.reconcile(&ReconcileContext::background(), &key).unwrap();
    assert!(matches!(outcome, ReconcileOutcome::Done { .. }));
    let def = healthy.store().get_definition(&key).unwrap();
    assert!(def.status.condition(CONDITION_SYNCED).is_none());
    assert_eq!(def.status.config_map_ref.as_deref(), Some("step-a-v1-schema"));
}
