//! Wire types and header parsing for the extraction service API
//!
//! Response envelopes mirror the service's JSON shapes field-for-field.
//! Unknown fields are ignored so server-side additions never break the
//! client.

use serde::Deserialize;

use evicase_core::types::{Case, Evidence, EvidenceSummary, ExportRecord};

/// Fallback artifact name when the `Content-Disposition` header is absent
/// or unparseable.
pub const FALLBACK_EXPORT_FILENAME: &str = "forensics_export.json";

/// Response header carrying the hex digest of the export artifact.
pub const EXPORT_HASH_HEADER: &str = "X-Export-Hash";

/// `POST /api/cases` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCaseResponse {
    #[serde(default)]
    pub success: bool,
    pub case: Case,
}

/// `GET /api/cases` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CasesResponse {
    #[serde(default)]
    pub cases: Vec<Case>,
}

/// `POST /api/cases/{id}/upload` response envelope.
///
/// The summary is the notification payload surfaced to the investigator
/// after a successful extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub evidence_id: String,
    #[serde(default)]
    pub file_hash: String,
    #[serde(default)]
    pub summary: EvidenceSummary,
}

/// `GET /api/cases/{id}/evidence` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct EvidenceListResponse {
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

/// `GET /api/exports/{id}` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportHistoryResponse {
    #[serde(default)]
    pub exports: Vec<ExportRecord>,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: String,
}

/// The export endpoint's result: a raw artifact plus its integrity metadata
/// from the response headers. Transient; exists only until persisted.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Name from `Content-Disposition`, or [`FALLBACK_EXPORT_FILENAME`].
    pub filename: String,
    /// Hex digest from [`EXPORT_HASH_HEADER`], when the service sent one.
    pub hash: Option<String>,
    /// Raw artifact bytes, exactly as hashed server-side.
    pub payload: Vec<u8>,
}

/// Extract the artifact filename from a `Content-Disposition` header value.
///
/// Accepts the `...filename=<value>...` shape with or without surrounding
/// quotes. Returns `None` when no usable name is present.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let value = rest.split(';').next().unwrap_or(rest);
    let value = value.trim().trim_matches('"').trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_quoted_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"report.json\""),
            Some("report.json".to_string())
        );
    }

    #[test]
    fn test_filename_from_unquoted_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=forensics_export_ab12.csv"),
            Some("forensics_export_ab12.csv".to_string())
        );
    }

    #[test]
    fn test_filename_ignores_trailing_parameters() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"report.json\"; size=42"),
            Some("report.json".to_string())
        );
    }

    #[test]
    fn test_filename_missing_or_empty() {
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
        assert_eq!(filename_from_disposition("attachment; filename=   "), None);
    }

    #[test]
    fn test_upload_response_defaults() {
        let response: UploadResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.evidence_id, "");
        assert_eq!(response.summary.messages_count, 0);
    }

    #[test]
    fn test_error_body_tolerates_unknown_shape() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(body.detail, "");
    }
}
