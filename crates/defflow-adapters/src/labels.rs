//! Labels de descubrimiento aplicados a los artifacts publicados.
//!
//! Los consumidores externos localizan el esquema de una revisión por estos
//! labels, no por convención de nombres.

/// Nombre de la definición dueña del esquema.
pub const LABEL_DEFINITION_NAME: &str = "definition.defflow.dev/name";

/// Nombre de la revisión exacta que originó el esquema.
pub const LABEL_DEFINITION_REVISION: &str = "definition.defflow.dev/revision";
