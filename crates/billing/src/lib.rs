//! `netrecon-billing` — client for the provisioning system's paged query API.
//!
//! This crate is the single source of truth for the billing wire contract:
//! the request envelope, the `f1..f22` field-code allowlist, and the
//! short-page pagination rule.
//!
//! Blocking reqwest client (no Tokio runtime required). No retries: any
//! transport or parse failure aborts the whole fetch.

mod client;
mod schema;

pub use client::{parse_rows, BillingClient, BillingError};
pub use schema::{column_for_tag, FIELD_COLUMNS};
