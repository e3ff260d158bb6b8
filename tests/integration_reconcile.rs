//! Integración raíz: orquestador del core + encoder de plataforma de
//! adapters, de punta a punta sobre el store en memoria.

use defflow_adapters::{DiscoverySchemaEncoder, LABEL_DEFINITION_NAME, LABEL_DEFINITION_REVISION};
use defflow_core::constants::SCHEMA_DATA_KEY;
use defflow_core::{DeclarativeStore, InMemoryStore, MemoryRecorder, ReconcileContext, ReconcileOptions,
                   ReconcileOutcome, Reconciler, ResourceKey};
use defflow_domain::Definition;
use serde_json::json;

#[test]
fn full_pass_publishes_discoverable_schema() {
    let schema = json!({"properties": {"url": {"type": "string"}}});
    let mut store = InMemoryStore::new();
    store.seed_definition(Definition::new("step-a", "ns", schema.clone()).unwrap());

    let mut reconciler = Reconciler::new(store, MemoryRecorder::new(), ReconcileOptions::default())
        .with_encoder(Box::new(DiscoverySchemaEncoder::new()));
    let key = ResourceKey::new("ns", "step-a");

    let outcome = reconciler.reconcile(&ReconcileContext::background(), &key).unwrap();
    assert_eq!(outcome,
               ReconcileOutcome::Done { revision_created: true,
                                        status_updated: true });

    // el artifact publicado lleva la metadata de descubrimiento de adapters
    let artifact = reconciler.store()
                             .get_artifact(&ResourceKey::new("ns", "step-a-v1-schema"))
                             .unwrap();
    assert_eq!(artifact.labels.get(LABEL_DEFINITION_NAME).map(String::as_str), Some("step-a"));
    assert_eq!(artifact.labels.get(LABEL_DEFINITION_REVISION).map(String::as_str), Some("step-a-v1"));

    // y el data contiene el esquema canónico bajo la clave estándar
    let stored: serde_json::Value = serde_json::from_str(&artifact.data[SCHEMA_DATA_KEY]).unwrap();
    assert_eq!(stored, schema);

    // el status referencia artifact y revisión coherentes
    let def = reconciler.store().get_definition(&key).unwrap();
    assert_eq!(def.status.config_map_ref.as_deref(), Some("step-a-v1-schema"));
    assert_eq!(def.status.latest_revision.unwrap().name, "step-a-v1");
}

#[test]
fn republish_with_platform_encoder_is_idempotent() {
    let mut store = InMemoryStore::new();
    store.seed_definition(Definition::new("step-a", "ns", json!({"a": 1})).unwrap());
    let mut reconciler = Reconciler::new(store, MemoryRecorder::new(), ReconcileOptions::default())
        .with_encoder(Box::new(DiscoverySchemaEncoder::new()));
    let key = ResourceKey::new("ns", "step-a");
    let ctx = ReconcileContext::background();

    reconciler.reconcile(&ctx, &key).unwrap();
    let first = reconciler.store()
                          .get_artifact(&ResourceKey::new("ns", "step-a-v1-schema"))
                          .unwrap();

    let outcome = reconciler.reconcile(&ctx, &key).unwrap();
    assert_eq!(outcome,
               ReconcileOutcome::Done { revision_created: false,
                                        status_updated: false });
    let second = reconciler.store()
                           .get_artifact(&ResourceKey::new("ns", "step-a-v1-schema"))
                           .unwrap();
    assert_eq!(first, second);
}
