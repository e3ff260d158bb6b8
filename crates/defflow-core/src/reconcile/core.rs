//! Orquestador de reconciliación.
//!
//! Una pasada es una función pura del estado externo observado hacia el
//! estado externo deseado: sin estado propio entre pasadas, sin máquina de
//! estados persistida. La secuencia es fija: cargar → gate de elegibilidad →
//! asegurar revisión (persistiendo el latest de inmediato) → publicar
//! esquema → reconciliar status con retry-on-conflict.

use log::{error, info, warn};

use defflow_domain::condition::CONDITION_SYNCED;
use defflow_domain::{ArtifactApply, Condition, Definition, DefinitionStatus};

use crate::constants::{DEFAULT_CONCURRENT_RECONCILES, DEFAULT_REVISION_LIMIT};
use crate::errors::{ReconcileError, StoreError};
use crate::gate::matches_controller_requirement;
use crate::publish::{publish_schema, CanonicalSchemaEncoder, SchemaEncoder};
use crate::reconcile::{ReconcileContext, ReconcileOutcome, SkipReason};
use crate::recorder::{EventRecorder, EventSeverity};
use crate::retry::{report_then_ignore, with_conflict_retry, BackoffPolicy};
use crate::revision::ensure_revision;
use crate::store::{DeclarativeStore, ResourceKey};

/// Configuración consumida al arranque (nunca estado ambiente; llega
/// explícita al constructor).
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Límite de retención de revisiones (≥ 0).
    pub revision_limit: usize,
    /// Pasadas concurrentes máximas; lo consume el despachador externo.
    pub concurrent_reconciles: usize,
    /// Saltar definiciones sin requisito de controller explícito.
    pub ignore_without_requirement: bool,
    /// Versión de este controller, comparada contra el requisito del recurso.
    pub controller_version: String,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        ReconcileOptions { revision_limit: DEFAULT_REVISION_LIMIT,
                           concurrent_reconciles: DEFAULT_CONCURRENT_RECONCILES,
                           ignore_without_requirement: false,
                           controller_version: String::new() }
    }
}

/// Orquestador: compone Revision Store y Schema Publisher sobre un store
/// declarativo y un recorder de eventos.
pub struct Reconciler<S, R>
    where S: DeclarativeStore,
          R: EventRecorder
{
    store: S,
    recorder: R,
    encoder: Box<dyn SchemaEncoder>,
    backoff: BackoffPolicy,
    options: ReconcileOptions,
}

impl<S, R> Reconciler<S, R>
    where S: DeclarativeStore,
          R: EventRecorder
{
    pub fn new(store: S, recorder: R, options: ReconcileOptions) -> Self {
        Reconciler { store,
                     recorder,
                     encoder: Box::new(CanonicalSchemaEncoder),
                     backoff: BackoffPolicy::default(),
                     options }
    }

    /// Reemplaza el encoder neutral por uno de plataforma (labels de
    /// descubrimiento, claves específicas).
    pub fn with_encoder(mut self, encoder: Box<dyn SchemaEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Una pasada completa para la identidad `key`.
    pub fn reconcile(&mut self, ctx: &ReconcileContext, key: &ResourceKey) -> Result<ReconcileOutcome, ReconcileError> {
        info!("reconciliando definition {key}");

        let def = match self.store.get_definition(key) {
            Ok(d) => d,
            Err(StoreError::NotFound(_)) => return Ok(ReconcileOutcome::Skipped(SkipReason::NotFound)),
            Err(e) => return Err(ReconcileError::from(e)),
        };

        // placeholder de finalizers: borrado en curso es no-op
        if def.deletion_timestamp.is_some() {
            return Ok(ReconcileOutcome::Skipped(SkipReason::Deleting));
        }

        if !matches_controller_requirement(&def,
                                           &self.options.controller_version,
                                           self.options.ignore_without_requirement)
        {
            info!("skip {key}: no cumple el requisito de controller de la definición");
            return Ok(ReconcileOutcome::Skipped(SkipReason::ControllerMismatch));
        }

        let backoff = self.backoff.clone();
        let limit = self.options.revision_limit;
        let ensured = ensure_revision(&mut self.store, ctx, &backoff, &def, limit, |store, rev| {
            let mut status = def.status.clone();
            status.latest_revision = Some(rev.clone());
            persist_status(store, ctx, &backoff, key, status).map(|_| ())
        })?;

        // Tras persistir el latest, reconciliar contra la versión más nueva
        // observada del recurso.
        let def = if ensured.created {
            self.store.get_definition(key)?
        } else {
            def
        };

        let published = match publish_schema(&mut self.store, self.encoder.as_ref(), ctx, &def, &ensured.revision) {
            Ok(p) => p,
            Err(err) => {
                let message = format!("could not store schema of {} in registry: {err}", def.name());
                warn!("{message}");
                self.recorder
                    .event(def.name(), EventSeverity::Warning, "PublishFailed", &message);
                let mut status = def.status.clone();
                status.set_condition(Condition::reconcile_error(message.clone()));
                report_then_ignore("condición de fallo de publicación",
                                   persist_status(&mut self.store, ctx, &backoff, key, status));
                // éxito-con-error-reportado: el backoff externo gobierna el
                // reintento, la pasada no falla.
                return Ok(ReconcileOutcome::DoneWithCondition { message });
            }
        };

        if published.outcome == ArtifactApply::Replaced {
            warn!("artifact {} sobrescrito con contenido distinto (last-writer-wins)",
                  published.artifact_ref);
        }

        let wants_ref = Some(published.artifact_ref.clone());
        let stale_condition = def.status.condition(CONDITION_SYNCED).is_some();
        let mut status_updated = false;

        if def.status.config_map_ref != wants_ref
           || def.status.latest_revision.as_ref() != Some(&ensured.revision)
           || stale_condition
        {
            let mut status = def.status.clone();
            status.latest_revision = Some(ensured.revision.clone());
            status.config_map_ref = wants_ref;
            status.clear_condition(CONDITION_SYNCED);
            match persist_status(&mut self.store, ctx, &backoff, key, status) {
                Ok(_) => {
                    info!("status.config_map_ref de {key} actualizado a {}", published.artifact_ref);
                    status_updated = true;
                }
                Err(err) => {
                    error!("no se pudo actualizar el status de {key}: {err}");
                    let message = format!("could not update status of {}: {err}", def.name());
                    self.recorder
                        .event(def.name(), EventSeverity::Warning, "StatusUpdateFailed", &message);
                    let mut status = def.status.clone();
                    status.set_condition(Condition::reconcile_error(message));
                    report_then_ignore("condición de fallo de status",
                                       persist_status(&mut self.store, ctx, &backoff, key, status));
                    // transitorio: el planificador externo re-agenda con backoff
                    return Err(err);
                }
            }
        }

        Ok(ReconcileOutcome::Done { revision_created: ensured.created,
                                    status_updated })
    }
}

/// Escritura de status con retry-on-conflict: re-lee el objeto vigente,
/// re-aplica el status deseado y reintenta ante `Conflict`.
pub fn persist_status<S: DeclarativeStore>(store: &mut S,
                                           ctx: &ReconcileContext,
                                           backoff: &BackoffPolicy,
                                           key: &ResourceKey,
                                           status: DefinitionStatus)
                                           -> Result<Definition, ReconcileError> {
    with_conflict_retry(ctx, backoff, || {
        let mut current = store.get_definition(key)?;
        current.status = status.clone();
        store.update_definition_status(&current)
    })
}
