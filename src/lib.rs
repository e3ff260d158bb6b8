//! Raíz del workspace: expone la configuración de la aplicación.
//! La lógica vive en los crates `defflow-domain`, `defflow-core` y
//! `defflow-adapters`; este crate sólo arma el binario de demo.

pub mod config;
