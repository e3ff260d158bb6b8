//! Tests del encoder de plataforma: labels de descubrimiento y estabilidad
//! del contenido respecto del encoder canónico del core.

use defflow_adapters::{DiscoverySchemaEncoder, LABEL_DEFINITION_NAME, LABEL_DEFINITION_REVISION};
use defflow_core::constants::SCHEMA_DATA_KEY;
use defflow_core::{CanonicalSchemaEncoder, SchemaEncoder};
use defflow_domain::{Definition, Revision};
use serde_json::json;

fn sample() -> (Definition, defflow_domain::RevisionRef) {
    let def = Definition::new("step-a", "ns", json!({"properties": {"url": {"type": "string"}}})).unwrap();
    let rev = Revision::new("ns", "step-a", 3, "f".repeat(64), def.spec.schema.clone());
    (def, rev.to_ref())
}

#[test]
fn discovery_encoder_annotates_definition_and_revision() {
    let (def, rev) = sample();
    let artifact = DiscoverySchemaEncoder::new().encode(&def, &rev);

    assert_eq!(artifact.name, "step-a-v3-schema");
    assert_eq!(artifact.namespace, "ns");
    assert_eq!(artifact.labels.get(LABEL_DEFINITION_NAME).map(String::as_str), Some("step-a"));
    assert_eq!(artifact.labels.get(LABEL_DEFINITION_REVISION).map(String::as_str), Some("step-a-v3"));
    assert!(artifact.data.contains_key(SCHEMA_DATA_KEY));
}

#[test]
fn labels_do_not_alter_published_content() {
    let (def, rev) = sample();
    let canonical = CanonicalSchemaEncoder.encode(&def, &rev);
    let discovery = DiscoverySchemaEncoder::new().encode(&def, &rev);

    // mismo data ⇒ la publicación con uno u otro encoder es Unchanged
    assert!(canonical.same_content(&discovery));
    assert!(canonical.labels.is_empty());
    assert_eq!(discovery.labels.len(), 2);
}

#[test]
fn encoding_is_deterministic_across_calls() {
    let (def, rev) = sample();
    let encoder = DiscoverySchemaEncoder::new();
    let a = encoder.encode(&def, &rev);
    let b = encoder.encode(&def, &rev);
    assert_eq!(a, b);
}
