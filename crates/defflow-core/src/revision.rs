//! Revision Store: historial acotado e inmutable de una definición.
//!
//! `ensure_revision` garantiza que exista una revisión para el contenido
//! actual de la definición:
//! - fingerprint igual al del latest registrado ⇒ no-op (idempotencia entre
//!   pasadas);
//! - fingerprint nuevo ⇒ crea la siguiente generación, persiste la
//!   referencia en status vía el callback y poda el historial excedente.
//!
//! Invariante defensivo: la revisión referenciada como latest nunca se poda,
//! ni siquiera bajo carrera con otra pasada (se revalida contra una lectura
//! fresca de la definición inmediatamente antes de cada delete).

use log::{debug, info};

use defflow_domain::{Definition, Revision, RevisionRef};

use crate::errors::{ReconcileError, StoreError};
use crate::hashing::hash_value;
use crate::reconcile::ReconcileContext;
use crate::retry::{with_conflict_retry, BackoffPolicy};
use crate::store::{DeclarativeStore, ResourceKey};

/// Resultado de asegurar la revisión del contenido actual.
#[derive(Debug, Clone)]
pub struct EnsuredRevision {
    pub revision: RevisionRef,
    pub created: bool,
}

/// Asegura una revisión para el contenido de `def` y poda el historial más
/// allá de `revision_limit`. `persist_latest` se invoca inmediatamente tras
/// crear una revisión nueva, antes de podar, para que los pasos siguientes
/// observen una vista consistente; su fallo aborta la pasada.
pub fn ensure_revision<S, F>(store: &mut S,
                             ctx: &ReconcileContext,
                             backoff: &BackoffPolicy,
                             def: &Definition,
                             revision_limit: usize,
                             mut persist_latest: F)
                             -> Result<EnsuredRevision, ReconcileError>
    where S: DeclarativeStore,
          F: FnMut(&mut S, &RevisionRef) -> Result<(), ReconcileError>
{
    ctx.check()?;
    let fingerprint = hash_value(&def.spec.schema);

    if let Some(latest) = &def.status.latest_revision {
        if latest.fingerprint == fingerprint {
            debug!("contenido de {}/{} sin cambios (fingerprint {})",
                   def.namespace(),
                   def.name(),
                   &fingerprint[..8]);
            return Ok(EnsuredRevision { revision: latest.clone(),
                                        created: false });
        }
    }

    // El closure recalcula la generación en cada intento: un creador
    // concurrente de la misma generación produce Conflict y fuerza
    // re-derivar el nombre en lugar de duplicarlo.
    let created = with_conflict_retry(ctx, backoff, || {
        let existing = store.list_revisions(def.namespace(), def.name())?;
        let max_listed = existing.iter().map(|r| r.generation).max().unwrap_or(0);
        let from_status = def.status
                             .latest_revision
                             .as_ref()
                             .map(|r| r.generation)
                             .unwrap_or(0);
        let generation = max_listed.max(from_status) + 1;
        store.create_revision(Revision::new(def.namespace(),
                                            def.name(),
                                            generation,
                                            fingerprint.clone(),
                                            def.spec.schema.clone()))
    })?;
    info!("revision {} creada para {}/{}", created.name, def.namespace(), def.name());

    let revision = created.to_ref();
    persist_latest(store, &revision)?;

    prune_revisions(store, ctx, def, revision_limit, &revision.name)?;

    Ok(EnsuredRevision { revision, created: true })
}

/// Poda las revisiones más antiguas por encima del límite de retención.
/// `limit == 0` se comporta como 1: siempre sobrevive la revisión latest.
fn prune_revisions<S: DeclarativeStore>(store: &mut S,
                                        ctx: &ReconcileContext,
                                        def: &Definition,
                                        limit: usize,
                                        latest_name: &str)
                                        -> Result<(), ReconcileError> {
    let keep = limit.max(1);
    let mut revisions = store.list_revisions(def.namespace(), def.name())?;
    if revisions.len() <= keep {
        return Ok(());
    }
    // Orden descendente por generación: se conservan las `keep` más nuevas.
    revisions.sort_by(|a, b| b.generation.cmp(&a.generation));
    let def_key = ResourceKey::new(def.namespace(), def.name());

    for victim in revisions.iter().skip(keep) {
        ctx.check()?;
        // Revalidación contra el status vigente: el latest observado puede
        // haber cambiado por una pasada concurrente desde que listamos.
        let current_latest = match store.get_definition(&def_key) {
            Ok(d) => d.status.latest_revision.map(|r| r.name),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => return Err(ReconcileError::from(e)),
        };
        if victim.name == latest_name || current_latest.as_deref() == Some(victim.name.as_str()) {
            continue;
        }
        match store.delete_revision(&ResourceKey::new(&victim.namespace, &victim.name)) {
            Ok(()) => debug!("revision {} podada", victim.name),
            // otra pasada la podó primero
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(ReconcileError::from(e)),
        }
    }
    Ok(())
}
