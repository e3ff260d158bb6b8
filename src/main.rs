use defflow_adapters::DiscoverySchemaEncoder;
use defflow_core::{DeclarativeStore, InMemoryStore, MemoryRecorder, ReconcileContext, ReconcileOptions,
                   ReconcileOutcome, Reconciler, ResourceKey, SkipReason};
use defflow_domain::Definition;
use defflow_rust::config::CONFIG;
use serde_json::json;

fn main() {
    // Cargar variables de entorno desde .env si existe (antes de leer CONFIG)
    let _ = dotenvy::dotenv();
    println!("controller_version = {:?}, concurrent_reconciles = {}",
             CONFIG.reconcile.controller_version, CONFIG.reconcile.concurrent_reconciles);

    // Demo de ciclo de vida completo sobre el store en memoria. La retención
    // se fija en 1 para que la poda sea observable en dos pasadas.
    let c1 = json!({"properties": {"url": {"type": "string"}}});
    let c2 = json!({"properties": {"url": {"type": "string"}, "method": {"type": "string"}}});

    let mut store = InMemoryStore::new();
    store.seed_definition(Definition::new("step-a", "demo", c1).expect("definición válida"));
    let options = ReconcileOptions { revision_limit: 1,
                                     ..CONFIG.reconcile.to_options() };
    let mut reconciler = Reconciler::new(store, MemoryRecorder::new(), options)
        .with_encoder(Box::new(DiscoverySchemaEncoder::new()));
    let key = ResourceKey::new("demo", "step-a");
    let ctx = ReconcileContext::with_default_timeout();

    println!("--- Pasada 1: contenido C1 ---");
    let outcome = reconciler.reconcile(&ctx, &key).expect("pasada 1 ok");
    println!("outcome: {outcome:?}");
    let def = reconciler.store().get_definition(&key).expect("definición presente");
    println!("latest = {:?}", def.status.latest_revision.as_ref().map(|r| r.name.as_str()));
    println!("config_map_ref = {:?}", def.status.config_map_ref);

    println!("--- Pasada 2: mismo contenido (idempotencia) ---");
    let outcome = reconciler.reconcile(&ctx, &key).expect("pasada 2 ok");
    assert_eq!(outcome,
               ReconcileOutcome::Done { revision_created: false,
                                        status_updated: false });
    println!("outcome: {outcome:?}");

    println!("--- Pasada 3: contenido C2 + retención 1 ---");
    reconciler.store_mut().set_definition_schema(&key, c2).expect("edición del esquema");
    let outcome = reconciler.reconcile(&ctx, &key).expect("pasada 3 ok");
    assert_eq!(outcome,
               ReconcileOutcome::Done { revision_created: true,
                                        status_updated: true });
    let revisions = reconciler.store().list_revisions("demo", "step-a").expect("listado ok");
    println!("revisiones retenidas: {:?}", revisions.iter().map(|r| r.name.as_str()).collect::<Vec<_>>());
    assert_eq!(revisions.len(), 1, "retención 1 debe podar la revisión vieja");
    let def = reconciler.store().get_definition(&key).expect("definición presente");
    println!("latest = {:?}, config_map_ref = {:?}",
             def.status.latest_revision.as_ref().map(|r| r.name.as_str()),
             def.status.config_map_ref);

    println!("--- Pasada 4: gate de elegibilidad ---");
    let gated = Definition::new("step-b", "demo", json!({"x": 1})).expect("definición válida")
                                                                  .with_controller_requirement("v99.0.0");
    reconciler.store_mut().seed_definition(gated);
    let outcome = reconciler.reconcile(&ctx, &ResourceKey::new("demo", "step-b")).expect("pasada 4 ok");
    assert_eq!(outcome, ReconcileOutcome::Skipped(SkipReason::ControllerMismatch));
    println!("outcome: {outcome:?}");

    let events = reconciler.recorder().events.borrow();
    println!("eventos registrados: {}", events.len());
    println!("!Demo OK (revisión, publicación idempotente, poda y gate)");
}
