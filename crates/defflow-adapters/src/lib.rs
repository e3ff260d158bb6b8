//! defflow-adapters: encoders de plataforma sobre el core neutral.
//!
//! El core publica esquemas sin metadata de descubrimiento; este crate
//! agrega la capa de plataforma (labels estándar sobre el artifact) sin
//! tocar el contrato `SchemaEncoder`.

pub mod encoder;
pub mod labels;

pub use encoder::DiscoverySchemaEncoder;
pub use labels::{LABEL_DEFINITION_NAME, LABEL_DEFINITION_REVISION};
