//! Evidence upload workflow
//!
//! Drives the single-file upload: admission control, the multipart submit,
//! and interpretation of the extraction summary. The in-flight guard is
//! explicit workflow state so the surface can disable its upload control
//! and tests can exercise the admission rule directly.

use std::path::Path;

use evicase_api::ApiClient;
use evicase_core::prelude::*;
use evicase_core::types::EvidenceSummary;

use crate::evidence_store::EvidenceStore;

/// Extensions the extraction service documents as expected input. The list
/// is advisory only; other files are submitted anyway and the server
/// decides.
pub const ADVISORY_EXTENSIONS: [&str; 4] = ["db", "sqlite", "sqlite3", "zip"];

/// Workflow state of the upload coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadPhase {
    /// No upload running; a new one may be admitted.
    #[default]
    Idle,
    /// A request is outstanding; further uploads are rejected until it
    /// settles. Client-side convenience only -- the server stays the
    /// consistency authority.
    InFlight,
    /// The last upload failed with this reason. A new upload may start.
    Failed(String),
}

/// Notification payload of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub evidence_id: String,
    pub file_hash: String,
    pub summary: EvidenceSummary,
}

/// Coordinates the one-file-at-a-time upload workflow.
#[derive(Debug, Default)]
pub struct UploadCoordinator {
    phase: UploadPhase,
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    /// Upload one evidence file to the open case.
    ///
    /// Preconditions: no other upload in flight, `case_id` is the case the
    /// store currently has open, and `path` names a readable file. On
    /// success the extraction summary is returned and the evidence store
    /// refreshed (best-effort). On failure the store is left untouched.
    pub async fn upload(
        &mut self,
        api: &ApiClient,
        store: &mut EvidenceStore,
        case_id: &str,
        path: &Path,
    ) -> Result<UploadOutcome> {
        if self.phase == UploadPhase::InFlight {
            return Err(Error::validation("an upload is already in progress"));
        }
        if store.open_case() != Some(case_id) {
            return Err(Error::validation(format!(
                "case {case_id} is not the open case"
            )));
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::validation(format!("not a usable file path: {}", path.display()))
            })?;

        if !has_advisory_extension(&filename) {
            warn!("'{filename}' is outside the expected evidence types, submitting anyway");
        }

        self.phase = UploadPhase::InFlight;
        match run_upload(api, case_id, &filename, path).await {
            Ok(outcome) => {
                self.phase = UploadPhase::Idle;
                info!(
                    "evidence {} extracted: {} messages, {} contacts, {} call logs",
                    outcome.evidence_id,
                    outcome.summary.messages_count,
                    outcome.summary.contacts_count,
                    outcome.summary.call_logs_count
                );
                // Best-effort refresh; the upload already succeeded.
                if let Err(e) = store.load_for(api, case_id).await {
                    warn!("evidence refresh after upload failed: {e}");
                }
                Ok(outcome)
            }
            Err(e) => {
                self.phase = UploadPhase::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

async fn run_upload(
    api: &ApiClient,
    case_id: &str,
    filename: &str,
    path: &Path,
) -> Result<UploadOutcome> {
    let bytes = tokio::fs::read(path).await?;
    let response = api.upload_evidence(case_id, filename, bytes).await?;
    Ok(UploadOutcome {
        evidence_id: response.evidence_id,
        file_hash: response.file_hash,
        summary: response.summary,
    })
}

/// Whether a filename carries one of the documented evidence extensions.
pub fn has_advisory_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ADVISORY_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}
