//! Projection of the provider's snapshot items into the flat audit table.
//!
//! Pure field renaming/flattening. Strict by policy: any item missing a
//! required field fails the whole reshape, so a snapshot is either complete
//! or rejected.

use chrono::NaiveDate;
use serde_json::Value;

use netrecon_core::SpeedAuditRecord;

use crate::client::AuditError;

/// Validate the snapshot date parameter against `YYYY.MM.DD`.
pub fn validate_date(value: &str) -> Result<NaiveDate, AuditError> {
    NaiveDate::parse_from_str(value, "%Y.%m.%d")
        .map_err(|_| AuditError::InvalidDate(value.to_string()))
}

/// Reshape a snapshot response body into audit records.
///
/// Expects a `data` array of flat per-interface items. Numeric values are
/// stringified; a missing or null required field aborts with the field name
/// and item index.
pub fn reshape(body: &Value) -> Result<Vec<SpeedAuditRecord>, AuditError> {
    let items = body["data"]
        .as_array()
        .ok_or_else(|| AuditError::Parse("snapshot response missing 'data' array".into()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| reshape_item(item, index))
        .collect()
}

fn reshape_item(item: &Value, index: usize) -> Result<SpeedAuditRecord, AuditError> {
    let field = |name: &'static str| -> Result<String, AuditError> {
        match &item[name] {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(AuditError::Schema { field: name, index }),
        }
    };

    Ok(SpeedAuditRecord {
        timestamp: field("insert_datetime")?,
        branch: field("branch")?,
        router_name: field("router_name")?,
        interface_name: field("interface_name")?,
        interface_description: field("interface_description")?,
        in_policy: field("in_policy_router")?,
        in_speed: field("in_speed_router")?,
        out_policy: field("out_policy_router")?,
        out_speed: field("out_speed_router")?,
        interface: field("ip_interface")?,
        account: field("account")?,
        company_name: field("company_name")?,
        in_speed_billing: field("in_speed_billing")?,
        out_speed_billing: field("out_speed_billing")?,
        business_unit: field("business_unit")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_calendar_dates() {
        assert!(validate_date("2026.08.25").is_ok());
        assert!(validate_date("2026.12.01").is_ok());
    }

    #[test]
    fn rejects_other_formats() {
        assert!(validate_date("2026-08-25").is_err());
        assert!(validate_date("25.08.2026").is_err());
        assert!(validate_date("2026.13.01").is_err());
        assert!(validate_date("").is_err());
        assert!(validate_date("tomorrow").is_err());
    }

    #[test]
    fn reshape_requires_data_array() {
        let err = reshape(&serde_json::json!({ "rows": [] })).unwrap_err();
        assert!(matches!(err, AuditError::Parse(_)));
    }

    #[test]
    fn reshape_empty_data_is_empty_table() {
        let records = reshape(&serde_json::json!({ "data": [] })).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn null_field_is_a_schema_error() {
        let body = serde_json::json!({
            "data": [{
                "insert_datetime": "2026-08-25 04:00:00",
                "branch": null
            }]
        });
        let err = reshape(&body).unwrap_err();
        match err {
            AuditError::Schema { field, index } => {
                assert_eq!(field, "branch");
                assert_eq!(index, 0);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
