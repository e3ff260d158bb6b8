pub mod context;
pub mod core;
pub mod outcome;

pub use context::ReconcileContext;
pub use core::{persist_status, ReconcileOptions, Reconciler};
pub use outcome::{ReconcileOutcome, SkipReason};
