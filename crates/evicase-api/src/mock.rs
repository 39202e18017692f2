//! In-process stand-in for the extraction service, used by test suites
//!
//! Mirrors the real service's endpoints and response shapes: case and
//! evidence bookkeeping, canned extraction summaries, genuine SHA-256
//! hashes over uploaded bytes and export artifacts, and the
//! `Content-Disposition`/`X-Export-Hash` headers on export responses.
//!
//! Extraction itself is faked: every upload yields the summary the service
//! was spawned with. That is enough for the client workflows, which only
//! interpret the response shape.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;

use evicase_core::types::{
    Case, DataType, Evidence, EvidenceSummary, ExportFormat, ExportRecord, ExportRequest, NewCase,
};

const EXPORT_HASH_HEADER: HeaderName = HeaderName::from_static("x-export-hash");

#[derive(Default)]
struct Inner {
    cases: Vec<Case>,
    evidence: HashMap<String, Vec<Evidence>>,
    exports: HashMap<String, Vec<ExportRecord>>,
    summary: EvidenceSummary,
    upload_rejection: Option<String>,
    fail_case_listing: bool,
    seq: u64,
}

#[derive(Clone, Default)]
struct MockState(Arc<Mutex<Inner>>);

/// A running mock extraction service bound to an ephemeral local port.
///
/// The server task is aborted on drop.
pub struct MockService {
    addr: SocketAddr,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockService {
    /// Spawn with the canonical example summary (5 messages, 2 contacts).
    pub async fn spawn() -> Self {
        Self::spawn_with_summary(EvidenceSummary {
            messages_count: 5,
            contacts_count: 2,
            call_logs_count: 0,
        })
        .await
    }

    /// Spawn a service whose every upload extracts the given summary.
    pub async fn spawn_with_summary(summary: EvidenceSummary) -> Self {
        let state = MockState::default();
        state.0.lock().unwrap().summary = summary;

        let app = Router::new()
            .route("/api/health", get(health))
            .route("/api/cases", get(list_cases).post(create_case))
            .route("/api/cases/{case_id}/upload", post(upload_evidence))
            .route("/api/cases/{case_id}/evidence", get(list_evidence))
            .route("/api/export", post(export_data))
            .route("/api/exports/{case_id}", get(export_history))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock service");
        let addr = listener.local_addr().expect("mock service addr");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Base URL clients should point at.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make every subsequent upload fail with the given reason (400).
    pub fn reject_uploads(&self, reason: &str) {
        self.state.0.lock().unwrap().upload_rejection = Some(reason.to_string());
    }

    /// Make `GET /api/cases` fail with a 500 until called with `false`.
    pub fn fail_case_listing(&self, fail: bool) {
        self.state.0.lock().unwrap().fail_case_listing = fail;
    }

    /// Number of cases currently known to the service.
    pub fn case_count(&self) -> usize {
        self.state.0.lock().unwrap().cases.len()
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn not_found(detail: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "timestamp": timestamp() }))
}

async fn create_case(
    State(state): State<MockState>,
    Json(input): Json<NewCase>,
) -> Json<serde_json::Value> {
    let mut inner = state.0.lock().unwrap();
    inner.seq += 1;
    let case = Case {
        case_id: format!("case-{:04}", inner.seq),
        case_name: input.case_name,
        investigator: input.investigator,
        description: input.description,
        status: "active".to_string(),
        created_at: timestamp(),
    };
    inner.cases.push(case.clone());
    Json(json!({ "success": true, "case": case }))
}

async fn list_cases(State(state): State<MockState>) -> Response {
    let inner = state.0.lock().unwrap();
    if inner.fail_case_listing {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "database unavailable" })),
        )
            .into_response();
    }
    Json(json!({ "cases": inner.cases })).into_response()
}

async fn upload_evidence(
    State(state): State<MockState>,
    Path(case_id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut filename = "upload.bin".to_string();
    let mut bytes = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            if let Some(name) = field.file_name() {
                filename = name.to_string();
            }
            bytes = field.bytes().await.unwrap_or_default().to_vec();
        }
    }

    let mut inner = state.0.lock().unwrap();
    if let Some(reason) = &inner.upload_rejection {
        let detail = reason.clone();
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response();
    }
    if !inner.cases.iter().any(|c| c.case_id == case_id) {
        return not_found("Case not found");
    }

    inner.seq += 1;
    let file_hash = format!("{:x}", Sha256::digest(&bytes));
    let evidence = Evidence {
        evidence_id: format!("evidence-{:04}", inner.seq),
        case_id: case_id.clone(),
        filename,
        file_hash: file_hash.clone(),
        file_size: bytes.len() as u64,
        uploaded_at: timestamp(),
        processed: true,
        summary: inner.summary,
    };
    let summary = evidence.summary;
    let evidence_id = evidence.evidence_id.clone();
    inner.evidence.entry(case_id).or_default().push(evidence);

    Json(json!({
        "success": true,
        "evidence_id": evidence_id,
        "file_hash": file_hash,
        "summary": summary,
    }))
    .into_response()
}

async fn list_evidence(
    State(state): State<MockState>,
    Path(case_id): Path<String>,
) -> Json<serde_json::Value> {
    let inner = state.0.lock().unwrap();
    let evidence = inner.evidence.get(&case_id).cloned().unwrap_or_default();
    Json(json!({ "evidence": evidence }))
}

async fn export_data(
    State(state): State<MockState>,
    Json(request): Json<ExportRequest>,
) -> Response {
    let mut inner = state.0.lock().unwrap();
    if inner
        .evidence
        .get(&request.case_id)
        .map_or(true, |e| e.is_empty())
    {
        return not_found("No evidence found for case");
    }

    inner.seq += 1;
    let export_id = format!("export-{:04}", inner.seq);
    let exported_at = timestamp();

    let (body, filename) = match request.export_format {
        ExportFormat::Json => {
            let body = serde_json::to_string_pretty(&json!({
                "export_metadata": {
                    "export_id": export_id.clone(),
                    "case_id": request.case_id.clone(),
                    "exported_at": exported_at.clone(),
                    "data_types": request.data_types.clone(),
                    "format": "json",
                },
                "data": {
                    "messages": [],
                    "contacts": [],
                    "call_logs": [],
                },
            }))
            .expect("serialize export body");
            (body, format!("forensics_export_{export_id}.json"))
        }
        ExportFormat::Csv => {
            let first = request
                .data_types
                .first()
                .copied()
                .unwrap_or(DataType::Messages);
            let body = format!("record_type,source\n{first},mock\n");
            (body, format!("forensics_export_{first}_{export_id}.csv"))
        }
    };

    let file_hash = format!("{:x}", Sha256::digest(body.as_bytes()));
    inner
        .exports
        .entry(request.case_id.clone())
        .or_default()
        .push(ExportRecord {
            export_id,
            case_id: request.case_id.clone(),
            exported_at,
            format: request.export_format,
            data_types: request.data_types.clone(),
            file_hash: file_hash.clone(),
        });

    (
        [
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
            (EXPORT_HASH_HEADER, file_hash),
        ],
        body,
    )
        .into_response()
}

async fn export_history(
    State(state): State<MockState>,
    Path(case_id): Path<String>,
) -> Json<serde_json::Value> {
    let inner = state.0.lock().unwrap();
    let exports = inner.exports.get(&case_id).cloned().unwrap_or_default();
    Json(json!({ "exports": exports }))
}
