//! `netrecon-io` — spreadsheet I/O for the three workflow tables.
//!
//! Fetched tables are written to disk so a later reconcile step can rerun
//! without re-fetching; readers map columns by header name, not position.

mod xlsx;

pub use xlsx::{
    read_audit, read_inventory, write_audit, write_inventory, write_report,
};
