//! Field-code allowlist for the paged query response.
//!
//! Row children carry positional tag codes (`f1`..`f22`). Only codes in
//! this table are extracted; the upstream view exposes more fields than
//! the inventory table carries, and those are dropped.

use netrecon_core::model::INVENTORY_COLUMNS;

/// Wire tag → inventory column, in column order.
pub const FIELD_COLUMNS: [(&str, &str); 22] = [
    ("f1", INVENTORY_COLUMNS[0]),   // Group
    ("f2", INVENTORY_COLUMNS[1]),   // Account
    ("f3", INVENTORY_COLUMNS[2]),   // Contract Type
    ("f4", INVENTORY_COLUMNS[3]),   // Client Name
    ("f5", INVENTORY_COLUMNS[4]),   // Login
    ("f6", INVENTORY_COLUMNS[5]),   // Consumer Segment
    ("f7", INVENTORY_COLUMNS[6]),   // Project
    ("f8", INVENTORY_COLUMNS[7]),   // Tariff Plan
    ("f9", INVENTORY_COLUMNS[8]),   // Resource
    ("f10", INVENTORY_COLUMNS[9]),  // Connection
    ("f11", INVENTORY_COLUMNS[10]), // Connection Status
    ("f12", INVENTORY_COLUMNS[11]), // Resource Start Date
    ("f13", INVENTORY_COLUMNS[12]), // Resource End Date
    ("f14", INVENTORY_COLUMNS[13]), // Router
    ("f15", INVENTORY_COLUMNS[14]), // Network
    ("f16", INVENTORY_COLUMNS[15]), // IP Range
    ("f17", INVENTORY_COLUMNS[16]), // Speed
    ("f18", INVENTORY_COLUMNS[17]), // Unit
    ("f19", INVENTORY_COLUMNS[18]), // LM Technology
    ("f20", INVENTORY_COLUMNS[19]), // Classifier Code
    ("f21", INVENTORY_COLUMNS[20]), // Service
    ("f22", INVENTORY_COLUMNS[21]), // Router New
];

/// Column name for a wire tag, `None` for tags outside the allowlist.
pub fn column_for_tag(tag: &[u8]) -> Option<&'static str> {
    FIELD_COLUMNS
        .iter()
        .find(|(code, _)| code.as_bytes() == tag)
        .map(|(_, column)| *column)
}
