//! `netrecon-core` — shared data model for the reconciliation workflow.
//!
//! Holds the record types for both source tables, the output row, the
//! string normalizers, and the router name↔IP directory. No IO, no HTTP.

pub mod directory;
pub mod model;
pub mod normalize;

pub use directory::{RouterDirectory, UNKNOWN_ROUTER};
pub use model::{InventoryRecord, MatchStatus, ReconRow, SpeedAuditRecord};
pub use normalize::{normalize_ip, normalize_router_label};
