//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! La sección `reconcile` se traduce directamente a `ReconcileOptions`.
use once_cell::sync::Lazy;
use std::env;

use defflow_core::constants::{DEFAULT_CONCURRENT_RECONCILES, DEFAULT_REVISION_LIMIT};
use defflow_core::ReconcileOptions;

/// Configuración global de la aplicación (extensible para más secciones: logging, etc.).
pub struct AppConfig {
    /// Parámetros del loop de reconciliación.
    pub reconcile: ReconcileConfig,
}

/// Parámetros de reconciliación leídos del entorno.
pub struct ReconcileConfig {
    /// Cantidad total de revisiones retenidas por definición.
    pub revision_limit: usize,
    /// Workers concurrentes del loop (mínimo 1).
    pub concurrent_reconciles: usize,
    /// Si una definición sin requirement explícito debe ignorarse.
    pub ignore_without_requirement: bool,
    /// Versión que este controlador declara para el gate de elegibilidad.
    pub controller_version: String,
}

impl ReconcileConfig {
    pub fn to_options(&self) -> ReconcileOptions {
        ReconcileOptions { revision_limit: self.revision_limit,
                           concurrent_reconciles: self.concurrent_reconciles,
                           ignore_without_requirement: self.ignore_without_requirement,
                           controller_version: self.controller_version.clone() }
    }
}

fn env_flag(name: &str) -> bool {
    matches!(env::var(name).ok().as_deref(), Some("1") | Some("true"))
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    let revision_limit = env::var("DEFINITION_REVISION_LIMIT").ok()
        .and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_REVISION_LIMIT);
    let concurrent = env::var("CONCURRENT_RECONCILES").ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CONCURRENT_RECONCILES)
        .max(1);
    AppConfig {
        reconcile: ReconcileConfig {
            revision_limit,
            concurrent_reconciles: concurrent,
            ignore_without_requirement: env_flag("IGNORE_DEFINITION_WITHOUT_CONTROLLER_REQUIREMENT"),
            controller_version: env::var("CONTROLLER_VERSION").unwrap_or_default(),
        },
    }
});
