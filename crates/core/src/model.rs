use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Inventory table (source A)
// ---------------------------------------------------------------------------

/// Column order of the inventory export, as produced by the billing query
/// service and written to the inventory spreadsheet. The billing client's
/// tag allowlist maps wire field codes onto these names.
pub const INVENTORY_COLUMNS: [&str; 22] = [
    "Group",
    "Account",
    "Contract Type",
    "Client Name",
    "Login",
    "Consumer Segment",
    "Project",
    "Tariff Plan",
    "Resource",
    "Connection",
    "Connection Status",
    "Resource Start Date",
    "Resource End Date",
    "Router",
    "Network",
    "IP Range",
    "Speed",
    "Unit",
    "LM Technology",
    "Classifier Code",
    "Service",
    "Router New",
];

pub const COL_IP_RANGE: &str = "IP Range";
pub const COL_ROUTER: &str = "Router";
pub const COL_CONNECTION: &str = "Connection";

/// One provisioned circuit from the billing export.
///
/// The three fields the engine joins and classifies on are lifted out of the
/// column map; everything else rides along in `raw_fields` so the fetched
/// table can be written back out in full.
#[derive(Debug, Clone)]
pub struct InventoryRecord {
    pub ip_range: Option<String>,
    pub router: Option<String>,
    pub connection: Option<String>,
    pub raw_fields: HashMap<String, String>,
}

impl InventoryRecord {
    /// Build a record from a column-name → value map. Fields absent from the
    /// map stay `None`; the engine tolerates them downstream.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self {
            ip_range: fields.get(COL_IP_RANGE).cloned(),
            router: fields.get(COL_ROUTER).cloned(),
            connection: fields.get(COL_CONNECTION).cloned(),
            raw_fields: fields,
        }
    }
}

// ---------------------------------------------------------------------------
// Speed-audit table (source B)
// ---------------------------------------------------------------------------

/// Column order of the speed-audit snapshot spreadsheet.
pub const AUDIT_COLUMNS: [&str; 15] = [
    "DATE AND TIME",
    "BRANCH",
    "ROUTER NAME",
    "INTERFACE NAME",
    "INTERFACE DESCRIPTION",
    "INPUT POLICY",
    "INPUT SPEED",
    "OUTPUT POLICY",
    "OUTPUT SPEED",
    "INTERFACE",
    "ACCOUNT",
    "COMPANY NAME",
    "INPUT SPEED (BILLING)",
    "OUTPUT SPEED (BILLING)",
    "BUSINESS UNIT",
];

/// One monitored interface on the requested date.
///
/// `interface` holds the interface IP and is the join key into this table.
/// All fields are required; the audit client fails the whole snapshot if any
/// is missing from a response item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedAuditRecord {
    pub timestamp: String,
    pub branch: String,
    pub router_name: String,
    pub interface_name: String,
    pub interface_description: String,
    pub in_policy: String,
    pub in_speed: String,
    pub out_policy: String,
    pub out_speed: String,
    pub interface: String,
    pub account: String,
    pub company_name: String,
    pub in_speed_billing: String,
    pub out_speed_billing: String,
    pub business_unit: String,
}

impl SpeedAuditRecord {
    /// Field values in `AUDIT_COLUMNS` order.
    pub fn column_values(&self) -> [&str; 15] {
        [
            &self.timestamp,
            &self.branch,
            &self.router_name,
            &self.interface_name,
            &self.interface_description,
            &self.in_policy,
            &self.in_speed,
            &self.out_policy,
            &self.out_speed,
            &self.interface,
            &self.account,
            &self.company_name,
            &self.in_speed_billing,
            &self.out_speed_billing,
            &self.business_unit,
        ]
    }

    /// Rebuild a record from values in `AUDIT_COLUMNS` order.
    pub fn from_column_values(values: [String; 15]) -> Self {
        let [timestamp, branch, router_name, interface_name, interface_description, in_policy, in_speed, out_policy, out_speed, interface, account, company_name, in_speed_billing, out_speed_billing, business_unit] =
            values;
        Self {
            timestamp,
            branch,
            router_name,
            interface_name,
            interface_description,
            in_policy,
            in_speed,
            out_policy,
            out_speed,
            interface,
            account,
            company_name,
            in_speed_billing,
            out_speed_billing,
            business_unit,
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciliation output
// ---------------------------------------------------------------------------

/// Column order of the final report.
pub const REPORT_COLUMNS: [&str; 6] =
    ["IP", "Status", "Router Name", "Router IP", "Connection", "Branch"];

/// Whether the provisioned router identity matches the observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Correct,
    Incorrect,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// One reconciled circuit: provisioned vs observed router for a single IP.
///
/// `router_name` and `branch` are attached by the enrichment pass; both stay
/// `None` when the directory / audit table has no entry for the IP.
#[derive(Debug, Clone, Serialize)]
pub struct ReconRow {
    pub ip: String,
    pub status: MatchStatus,
    pub router_name: Option<String>,
    pub router_ip: String,
    pub connection: Option<String>,
    pub branch: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_record_lifts_essential_fields() {
        let mut fields = HashMap::new();
        fields.insert(COL_IP_RANGE.to_string(), "10.0.0.5/30".to_string());
        fields.insert(COL_ROUTER.to_string(), "rtr-bb1.alm1".to_string());
        fields.insert(COL_CONNECTION.to_string(), "active".to_string());
        fields.insert("Group".to_string(), "corporate".to_string());

        let rec = InventoryRecord::from_fields(fields);
        assert_eq!(rec.ip_range.as_deref(), Some("10.0.0.5/30"));
        assert_eq!(rec.router.as_deref(), Some("rtr-bb1.alm1"));
        assert_eq!(rec.connection.as_deref(), Some("active"));
        assert_eq!(rec.raw_fields.len(), 4);
    }

    #[test]
    fn inventory_record_tolerates_missing_fields() {
        let rec = InventoryRecord::from_fields(HashMap::new());
        assert!(rec.ip_range.is_none());
        assert!(rec.router.is_none());
        assert!(rec.connection.is_none());
    }

    #[test]
    fn audit_record_column_roundtrip() {
        let values: [String; 15] =
            std::array::from_fn(|i| format!("v{}", i));
        let rec = SpeedAuditRecord::from_column_values(values.clone());
        let back = rec.column_values();
        for (i, v) in back.iter().enumerate() {
            assert_eq!(*v, values[i]);
        }
    }

    #[test]
    fn match_status_serializes_lowercase() {
        assert_eq!(MatchStatus::Correct.to_string(), "correct");
        assert_eq!(MatchStatus::Incorrect.to_string(), "incorrect");
        let json = serde_json::to_string(&MatchStatus::Correct).unwrap();
        assert_eq!(json, "\"correct\"");
    }
}
