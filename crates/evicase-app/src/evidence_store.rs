//! Per-case cache of evidence items
//!
//! Scoped to the currently open case. Switching cases discards the old
//! cache *before* the new fetch, so stale evidence is never visible across
//! a case boundary, not even while a load is failing.

use evicase_api::ApiClient;
use evicase_core::prelude::*;
use evicase_core::types::{Evidence, EvidenceSummary};

/// Cache of the open case's evidence list.
#[derive(Debug, Default)]
pub struct EvidenceStore {
    open_case: Option<String>,
    items: Vec<Evidence>,
}

impl EvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the evidence list for a case, replacing the cache wholesale.
    ///
    /// When `case_id` differs from the currently open case the old cache is
    /// dropped first; a failing fetch then leaves the store empty rather
    /// than showing another case's evidence.
    pub async fn load_for(&mut self, api: &ApiClient, case_id: &str) -> Result<()> {
        if self.open_case.as_deref() != Some(case_id) {
            self.items.clear();
            self.open_case = Some(case_id.to_string());
        }

        self.items = api.list_evidence(case_id).await?;
        debug!(
            "evidence cache for case {} loaded ({} items)",
            case_id,
            self.items.len()
        );
        Ok(())
    }

    /// Cached evidence for the open case, in server order.
    pub fn evidence(&self) -> &[Evidence] {
        &self.items
    }

    /// Id of the currently open case, if any.
    pub fn open_case(&self) -> Option<&str> {
        self.open_case.as_deref()
    }

    /// Aggregate summary across all cached evidence.
    ///
    /// Recomputed on every call from the cache; this is the quantity
    /// offered for export.
    pub fn totals(&self) -> EvidenceSummary {
        self.items.iter().fold(EvidenceSummary::default(), |mut acc, e| {
            acc += e.summary;
            acc
        })
    }
}
