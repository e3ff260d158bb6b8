//! Gate de elegibilidad por versión de controller.
//!
//! Evita el doble procesamiento durante rolling upgrades: una definición con
//! requisito explícito sólo la procesa el controller de esa versión; sin
//! requisito, se procesa salvo que el flag de ignore esté activo.

use defflow_domain::Definition;

/// Función pura: ningún estado ambiente, la versión llega por configuración.
pub fn matches_controller_requirement(def: &Definition, controller_version: &str, ignore_without_requirement: bool) -> bool {
    match def.controller_requirement.as_deref() {
        Some(req) => req == controller_version,
        None => !ignore_without_requirement,
    }
}
