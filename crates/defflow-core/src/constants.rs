//! Constantes del core de reconciliación.
//!
//! Valores estables que forman parte del contrato observable: la clave bajo
//! la cual se publica el esquema serializado y los defaults de configuración
//! que consume el arranque del proceso.

/// Clave del artifact bajo la cual se publica el esquema OpenAPI serializado.
/// Cambiarla rompe el descubrimiento para los consumidores del registro.
pub const SCHEMA_DATA_KEY: &str = "openapi-v3-json-schema";

/// Límite de retención de revisiones por defecto.
pub const DEFAULT_REVISION_LIMIT: usize = 20;

/// Concurrencia por defecto del despachador externo (pasadas simultáneas
/// sobre definiciones distintas; la misma identidad se serializa fuera).
pub const DEFAULT_CONCURRENT_RECONCILES: usize = 4;

/// Deadline por defecto de una pasada de reconciliación.
pub const DEFAULT_RECONCILE_TIMEOUT_SECS: u64 = 180;
