//! Propiedad: publicar dos veces el mismo par (definición, revisión) con el
//! mismo esquema devuelve la misma referencia y no produce error ni cambio.

use defflow_core::{publish_schema, CanonicalSchemaEncoder, DeclarativeStore, InMemoryStore, ReconcileContext,
                   ResourceKey};
use defflow_domain::{ArtifactApply, Definition, RevisionRef};
use serde_json::json;

fn fixture() -> (InMemoryStore, Definition, RevisionRef) {
    let store = InMemoryStore::new();
    let def = Definition::new("step-a", "ns", json!({"properties": {"image": {"type": "string"}}})).unwrap();
    let revision = RevisionRef { name: "step-a-v1".to_string(),
                                 generation: 1,
                                 fingerprint: "fp".to_string() };
    (store, def, revision)
}

#[test]
fn republish_same_revision_is_a_noop() {
    let (mut store, def, revision) = fixture();
    let encoder = CanonicalSchemaEncoder;
    let ctx = ReconcileContext::background();

    let first = publish_schema(&mut store, &encoder, &ctx, &def, &revision).unwrap();
    assert_eq!(first.artifact_ref, "step-a-v1-schema");
    assert_eq!(first.outcome, ArtifactApply::Created);

    let second = publish_schema(&mut store, &encoder, &ctx, &def, &revision).unwrap();
    assert_eq!(second.artifact_ref, first.artifact_ref);
    assert_eq!(second.outcome, ArtifactApply::Unchanged);
}

#[test]
fn divergent_content_overwrites_last_writer_wins() {
    let (mut store, mut def, revision) = fixture();
    let encoder = CanonicalSchemaEncoder;
    let ctx = ReconcileContext::background();

    publish_schema(&mut store, &encoder, &ctx, &def, &revision).unwrap();

    // contenido distinto bajo el mismo nombre: no debería ocurrir con
    // revisiones inmutables, pero si ocurre gana el último escritor
    def.spec.schema = json!({"properties": {"image": {"type": "number"}}});
    let replaced = publish_schema(&mut store, &encoder, &ctx, &def, &revision).unwrap();
    assert_eq!(replaced.outcome, ArtifactApply::Replaced);

    let stored = store.get_artifact(&ResourceKey::new("ns", "step-a-v1-schema")).unwrap();
    assert!(stored.data["openapi-v3-json-schema"].contains("number"));
}
