use std::collections::{HashMap, HashSet};

use netrecon_core::{
    normalize_ip, normalize_router_label, InventoryRecord, MatchStatus, ReconRow,
    RouterDirectory, SpeedAuditRecord,
};

use crate::report::{ReconMeta, ReconReport, ReconSummary};

/// Join the inventory export against the speed-audit snapshot and classify
/// each surviving circuit's router assignment.
///
/// Inner-join semantics: inventory rows whose normalized IP has no audit
/// entry produce no output. When several audit rows share an interface IP,
/// the first in source order wins. Duplicate inventory rows on
/// (normalized IP, normalized router) keep the first occurrence only.
///
/// Identity is compared through the directory, never by raw string: the
/// audit row's router name resolves to a management IP, that IP reverse-
/// resolves to a canonical name, and the row is `correct` iff the inventory
/// side's normalized router label equals that name.
pub fn reconcile(
    inventory: &[InventoryRecord],
    audit: &[SpeedAuditRecord],
    directory: &RouterDirectory,
) -> Vec<ReconRow> {
    // First audit row per interface IP wins.
    let mut by_interface: HashMap<&str, &SpeedAuditRecord> = HashMap::new();
    for rec in audit {
        by_interface.entry(rec.interface.as_str()).or_insert(rec);
    }

    let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
    let mut rows = Vec::new();

    for rec in inventory {
        let ip = rec.ip_range.as_deref().map(normalize_ip);
        let router = rec.router.as_deref().map(normalize_router_label);

        // Keep-first dedup in input order.
        if !seen.insert(dedup_key(rec)) {
            continue;
        }

        let Some(ip) = ip else { continue };
        let Some(observed) = by_interface.get(ip) else {
            continue;
        };

        let router_ip = directory.resolve(&observed.router_name);
        let status = match directory.reverse_lookup(router_ip) {
            Some(canonical) => {
                if router == Some(canonical) {
                    MatchStatus::Correct
                } else {
                    MatchStatus::Incorrect
                }
            }
            // Unresolvable observed router can never match.
            None => MatchStatus::Incorrect,
        };

        rows.push(ReconRow {
            ip: ip.to_string(),
            status,
            router_name: None,
            router_ip: router_ip.to_string(),
            connection: rec.connection.clone(),
            branch: None,
        });
    }

    rows
}

fn dedup_key(rec: &InventoryRecord) -> (Option<String>, Option<String>) {
    (
        rec.ip_range
            .as_deref()
            .map(normalize_ip)
            .map(str::to_string),
        rec.router
            .as_deref()
            .map(normalize_router_label)
            .map(str::to_string),
    )
}

/// Second pass: attach the canonical router name (reverse directory lookup
/// over the resolved IP) and the branch code (first-wins IP→branch map over
/// the audit table). Rows whose IP or router IP has no entry keep `None`.
pub fn enrich(
    rows: Vec<ReconRow>,
    audit: &[SpeedAuditRecord],
    directory: &RouterDirectory,
) -> Vec<ReconRow> {
    let mut branch_by_ip: HashMap<&str, &str> = HashMap::new();
    for rec in audit {
        branch_by_ip
            .entry(rec.interface.as_str())
            .or_insert(rec.branch.as_str());
    }

    rows.into_iter()
        .map(|row| ReconRow {
            router_name: directory
                .reverse_lookup(&row.router_ip)
                .map(str::to_string),
            branch: branch_by_ip.get(row.ip.as_str()).map(|b| b.to_string()),
            ..row
        })
        .collect()
}

/// Full run: reconcile, enrich, and wrap the rows in a report envelope with
/// summary counts.
pub fn run(
    inventory: &[InventoryRecord],
    audit: &[SpeedAuditRecord],
    directory: &RouterDirectory,
) -> ReconReport {
    let rows = enrich(reconcile(inventory, audit, directory), audit, directory);
    let deduped = inventory
        .iter()
        .map(dedup_key)
        .collect::<HashSet<_>>()
        .len();
    let summary = ReconSummary::from_rows(inventory.len(), audit.len(), deduped, &rows);

    ReconReport {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    }
}
