//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | Reserved (general error)                 |
//! | 2       | Universal | CLI usage error (bad args)               |
//! | 3       | Universal | File I/O error                           |
//! | 10-19   | fetch     | Billing / audit retrieval codes          |
//! | 20-29   | reconcile | Reconciliation input codes               |

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// File I/O error - cannot read or write a workbook / settings file.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Fetch (10-19)
// =============================================================================

/// Credential exchange or authenticated call rejected.
pub const EXIT_FETCH_AUTH: u8 = 10;

/// Upstream service failed (transport error or non-success status).
pub const EXIT_FETCH_UPSTREAM: u8 = 11;

/// Response body could not be parsed, or an item failed the schema.
pub const EXIT_FETCH_PARSE: u8 = 12;

/// Request parameter rejected before any network call (bad date).
pub const EXIT_FETCH_VALIDATION: u8 = 13;

// =============================================================================
// Reconcile (20-29)
// =============================================================================

/// A reconcile input table is missing or malformed.
pub const EXIT_RECON_INPUT: u8 = 20;
