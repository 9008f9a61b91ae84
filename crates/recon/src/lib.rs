//! `netrecon-recon` — router reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns reconciliation
//! rows. No CLI or IO dependencies.

pub mod engine;
pub mod report;

pub use engine::{enrich, reconcile, run};
pub use report::{ReconMeta, ReconReport, ReconSummary};
