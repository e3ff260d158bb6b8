//! El deadline del contexto se respeta: una pasada con deadline vencido
//! aborta con error transitorio antes de mutar el store.

use std::time::Duration;

use defflow_core::{classify_error, DeclarativeStore, ErrorClass, InMemoryStore, MemoryRecorder, ReconcileContext,
                   ReconcileError, ReconcileOptions, Reconciler, ResourceKey};
use defflow_domain::Definition;
use serde_json::json;

#[test]
fn expired_context_aborts_before_writing() {
    let mut store = InMemoryStore::new();
    store.seed_definition(Definition::new("step-a", "ns", json!({"x": 1})).unwrap());
    let mut reconciler = Reconciler::new(store, MemoryRecorder::new(), ReconcileOptions::default());
    let key = ResourceKey::new("ns", "step-a");

    let ctx = ReconcileContext::with_timeout(Duration::from_secs(0));
    let err = reconciler.reconcile(&ctx, &key).expect_err("expired deadline");
    assert_eq!(err, ReconcileError::DeadlineExceeded);
    assert_eq!(classify_error(&err), ErrorClass::Transient);

    // sin efectos: ni revisión ni status
    assert_eq!(reconciler.store().revision_count("ns", "step-a"), 0);
    let def = reconciler.store().get_definition(&key).unwrap();
    assert!(def.status.latest_revision.is_none());
}
