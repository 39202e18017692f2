//! Export workflow: data-type selection and artifact retrieval
//!
//! The coordinator accumulates a data-type selection, blocks empty
//! submissions client-side, and hands the returned artifact to the
//! injected [`FileSink`]. The integrity hash is surfaced for the
//! investigator's chain-of-custody record, never verified against the
//! payload here.

use std::path::PathBuf;

use evicase_api::ApiClient;
use evicase_core::prelude::*;
use evicase_core::types::{DataType, ExportFormat, ExportRecord, ExportRequest};

use crate::sink::FileSink;

/// Result of a completed export, as reported to the surface.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Artifact name as derived from the response headers.
    pub filename: String,
    /// Integrity hash from the service, when one was sent.
    pub hash: Option<String>,
    /// Where the sink stored the artifact.
    pub stored_at: PathBuf,
}

/// Coordinates the export workflow for the open case.
#[derive(Debug, Default)]
pub struct ExportCoordinator {
    selection: Vec<DataType>,
}

impl ExportCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a data type: remove it if selected, add it otherwise.
    pub fn toggle(&mut self, data_type: DataType) {
        match self.selection.iter().position(|dt| *dt == data_type) {
            Some(idx) => {
                self.selection.remove(idx);
            }
            None => self.selection.push(data_type),
        }
    }

    /// Current selection, in toggle order.
    pub fn selection(&self) -> &[DataType] {
        &self.selection
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    /// Export the selected data types for a case and persist the artifact.
    ///
    /// An empty selection fails with a validation error before any network
    /// call. On a service rejection nothing is persisted.
    pub async fn export(
        &self,
        api: &ApiClient,
        sink: &dyn FileSink,
        case_id: &str,
        format: ExportFormat,
    ) -> Result<ExportReport> {
        if self.selection.is_empty() {
            return Err(Error::validation(
                "select at least one data type to export",
            ));
        }

        let request = ExportRequest {
            case_id: case_id.to_string(),
            data_types: self.selection.clone(),
            export_format: format,
        };
        let artifact = api.export(&request).await?;
        let stored_at = sink.persist(&artifact.payload, &artifact.filename)?;

        info!(
            "export '{}' stored at {} ({} bytes)",
            artifact.filename,
            stored_at.display(),
            artifact.payload.len()
        );
        Ok(ExportReport {
            filename: artifact.filename,
            hash: artifact.hash,
            stored_at,
        })
    }

    /// Fetch the case's server-side export history.
    pub async fn history(&self, api: &ApiClient, case_id: &str) -> Result<Vec<ExportRecord>> {
        api.export_history(case_id).await
    }
}
