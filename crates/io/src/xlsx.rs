// Excel import/export for the inventory, audit, and report tables.
//
// Writers emit one sheet with a fixed header row; readers map columns by
// header name so files re-ordered or extended by hand still load.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::Workbook;

use netrecon_core::model::{AUDIT_COLUMNS, INVENTORY_COLUMNS, REPORT_COLUMNS};
use netrecon_core::{InventoryRecord, ReconRow, SpeedAuditRecord};

// ── Export ──────────────────────────────────────────────────────────

/// Write the inventory table with the full 22-column layout.
pub fn write_inventory(path: &Path, records: &[InventoryRecord]) -> Result<(), String> {
    write_sheet(path, &INVENTORY_COLUMNS, records.iter().map(|rec| {
        INVENTORY_COLUMNS
            .iter()
            .map(|col| rec.raw_fields.get(*col).cloned().unwrap_or_default())
            .collect()
    }))
}

/// Write the speed-audit table.
pub fn write_audit(path: &Path, records: &[SpeedAuditRecord]) -> Result<(), String> {
    write_sheet(path, &AUDIT_COLUMNS, records.iter().map(|rec| {
        rec.column_values().iter().map(|v| v.to_string()).collect()
    }))
}

/// Write the final report: {IP, Status, Router Name, Router IP, Connection,
/// Branch}. Absent name/connection/branch cells stay empty.
pub fn write_report(path: &Path, rows: &[ReconRow]) -> Result<(), String> {
    write_sheet(path, &REPORT_COLUMNS, rows.iter().map(|row| {
        vec![
            row.ip.clone(),
            row.status.to_string(),
            row.router_name.clone().unwrap_or_default(),
            row.router_ip.clone(),
            row.connection.clone().unwrap_or_default(),
            row.branch.clone().unwrap_or_default(),
        ]
    }))
}

fn write_sheet(
    path: &Path,
    columns: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *name)
            .map_err(|e| format!("Failed to write header '{}': {}", name, e))?;
    }

    for (row_idx, row) in rows.enumerate() {
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_idx as u32 + 1, col as u16, value)
                .map_err(|e| format!("Failed to write cell: {}", e))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))
}

// ── Import ──────────────────────────────────────────────────────────

/// Read an inventory table. Cells under unknown headers are kept in
/// `raw_fields` untouched; empty cells stay absent.
pub fn read_inventory(path: &Path) -> Result<Vec<InventoryRecord>, String> {
    let (headers, range) = open_first_sheet(path)?;

    let mut records = Vec::new();
    for row in range.rows().skip(1) {
        let mut fields = HashMap::new();
        for (col, cell) in row.iter().enumerate() {
            let Some(header) = headers.get(col) else { continue };
            if let Some(value) = cell_to_string(cell) {
                fields.insert(header.clone(), value);
            }
        }
        if fields.is_empty() {
            continue;
        }
        records.push(InventoryRecord::from_fields(fields));
    }
    Ok(records)
}

/// Read a speed-audit table. All 15 columns are required.
pub fn read_audit(path: &Path) -> Result<Vec<SpeedAuditRecord>, String> {
    let (headers, range) = open_first_sheet(path)?;

    let mut indices = [0usize; 15];
    for (i, column) in AUDIT_COLUMNS.iter().enumerate() {
        indices[i] = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| format!("Audit table missing column '{}'", column))?;
    }

    let mut records = Vec::new();
    for row in range.rows().skip(1) {
        if row.iter().all(|c| cell_to_string(c).is_none()) {
            continue;
        }
        let values: [String; 15] = std::array::from_fn(|i| {
            row.get(indices[i])
                .and_then(cell_to_string)
                .unwrap_or_default()
        });
        records.push(SpeedAuditRecord::from_column_values(values));
    }
    Ok(records)
}

fn open_first_sheet(path: &Path) -> Result<(Vec<String>, Range<Data>), String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| "Excel file contains no sheets".to_string())?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| format!("Failed to read sheet '{}': {}", first, e))?;

    let headers: Vec<String> = range
        .rows()
        .next()
        .map(|row| {
            row.iter()
                .map(|c| cell_to_string(c).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    Ok((headers, range))
}

/// Stringify a cell. Whole floats lose the trailing `.0` so numeric columns
/// survive a write/read cycle unchanged.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use netrecon_core::model::{COL_CONNECTION, COL_IP_RANGE, COL_ROUTER};
    use netrecon_core::MatchStatus;

    use super::*;

    fn inventory(ip: &str, router: &str) -> InventoryRecord {
        let mut fields = HashMap::new();
        fields.insert(COL_IP_RANGE.to_string(), ip.to_string());
        fields.insert(COL_ROUTER.to_string(), router.to_string());
        fields.insert(COL_CONNECTION.to_string(), "active".to_string());
        fields.insert("Group".to_string(), "corporate".to_string());
        InventoryRecord::from_fields(fields)
    }

    fn audit(interface: &str) -> SpeedAuditRecord {
        SpeedAuditRecord::from_column_values(std::array::from_fn(|i| {
            if AUDIT_COLUMNS[i] == "INTERFACE" {
                interface.to_string()
            } else {
                format!("value {}", i)
            }
        }))
    }

    #[test]
    fn inventory_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.xlsx");

        let records = vec![inventory("10.0.0.5/30", "rtr-bb1.alm1"), inventory("10.0.1.9/30", "rtr-bb0.alm1")];
        write_inventory(&path, &records).unwrap();

        let loaded = read_inventory(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].ip_range.as_deref(), Some("10.0.0.5/30"));
        assert_eq!(loaded[0].router.as_deref(), Some("rtr-bb1.alm1"));
        assert_eq!(loaded[0].connection.as_deref(), Some("active"));
        assert_eq!(
            loaded[1].raw_fields.get("Group").map(String::as_str),
            Some("corporate"),
        );
    }

    #[test]
    fn inventory_missing_fields_stay_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.xlsx");

        let mut fields = HashMap::new();
        fields.insert(COL_IP_RANGE.to_string(), "10.0.0.1".to_string());
        write_inventory(&path, &[InventoryRecord::from_fields(fields)]).unwrap();

        let loaded = read_inventory(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].router.is_none());
        assert!(loaded[0].connection.is_none());
    }

    #[test]
    fn audit_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.xlsx");

        let records = vec![audit("10.0.0.5"), audit("10.0.1.9")];
        write_audit(&path, &records).unwrap();

        let loaded = read_audit(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], records[0]);
        assert_eq!(loaded[1].interface, "10.0.1.9");
    }

    #[test]
    fn audit_missing_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xlsx");

        // Inventory layout lacks the audit columns
        write_inventory(&path, &[inventory("10.0.0.5/30", "rtr-a")]).unwrap();

        let err = read_audit(&path).unwrap_err();
        assert!(err.contains("missing column"), "got: {err}");
    }

    #[test]
    fn report_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let rows = vec![ReconRow {
            ip: "10.0.0.5".into(),
            status: MatchStatus::Correct,
            router_name: Some("bb1.alm1".into()),
            router_ip: "217.196.30.129".into(),
            connection: Some("active".into()),
            branch: None,
        }];
        write_report(&path, &rows).unwrap();

        let (headers, range) = open_first_sheet(&path).unwrap();
        assert_eq!(headers, REPORT_COLUMNS);
        let data_row: Vec<String> = range
            .rows()
            .nth(1)
            .unwrap()
            .iter()
            .map(|c| cell_to_string(c).unwrap_or_default())
            .collect();
        assert_eq!(
            data_row,
            vec!["10.0.0.5", "correct", "bb1.alm1", "217.196.30.129", "active", ""],
        );
    }

    #[test]
    fn numeric_cells_read_back_without_decimal_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numeric.xlsx");

        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "IP Range").unwrap();
        ws.write_string(0, 1, "Speed").unwrap();
        ws.write_string(1, 0, "10.0.0.1/30").unwrap();
        ws.write_number(1, 1, 100.0).unwrap();
        workbook.save(&path).unwrap();

        let loaded = read_inventory(&path).unwrap();
        assert_eq!(
            loaded[0].raw_fields.get("Speed").map(String::as_str),
            Some("100"),
        );
    }
}
