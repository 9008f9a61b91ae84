//! `netrecon-audit` — client for the monitoring system's speed-audit API.
//!
//! Two-step exchange: sign in with identity credentials for a bearer token,
//! then pull one day's interface snapshot and reshape the provider's item
//! schema into the flat audit table. The reshape is strict: one malformed
//! item fails the whole snapshot.

mod client;
mod reshape;

pub use client::{AuditClient, AuditError};
pub use reshape::{reshape, validate_date};
