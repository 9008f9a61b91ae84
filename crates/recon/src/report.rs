use netrecon_core::{MatchStatus, ReconRow, UNKNOWN_ROUTER};
use serde::Serialize;

/// Run provenance attached to every report.
#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
}

/// Counts over a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub inventory_records: usize,
    pub audit_records: usize,
    /// Inventory rows surviving (IP, router) dedup, matched or not.
    pub deduped: usize,
    pub reconciled: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unknown_router: usize,
}

impl ReconSummary {
    pub fn from_rows(
        inventory_records: usize,
        audit_records: usize,
        deduped: usize,
        rows: &[ReconRow],
    ) -> Self {
        let correct = rows
            .iter()
            .filter(|r| r.status == MatchStatus::Correct)
            .count();
        let unknown_router = rows
            .iter()
            .filter(|r| r.router_ip == UNKNOWN_ROUTER)
            .count();
        Self {
            inventory_records,
            audit_records,
            deduped,
            reconciled: rows.len(),
            correct,
            incorrect: rows.len() - correct,
            unknown_router,
        }
    }
}

/// Terminal artifact of a run: meta + summary + the reconciled rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: Vec<ReconRow>,
}
