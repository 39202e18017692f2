//! Typed binding to the extraction service's remote operations
//!
//! One structured call per HTTP exchange, no business logic, no retries.
//! The service is the only consistency authority; this client translates
//! its responses into domain types and its failures into the error
//! taxonomy (`Remote` for transport and non-2xx, `Upload`/`Export` for
//! rejected uploads and exports).

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use url::Url;

use evicase_core::prelude::*;
use evicase_core::types::{Case, Evidence, ExportRecord, ExportRequest, NewCase};

use crate::protocol::{
    filename_from_disposition, CasesResponse, CreateCaseResponse, ErrorBody,
    EvidenceListResponse, ExportArtifact, ExportHistoryResponse, HealthResponse, UploadResponse,
    EXPORT_HASH_HEADER, FALLBACK_EXPORT_FILENAME,
};

/// Connect timeout for every request. There is deliberately no overall
/// request timeout: large evidence uploads and exports may legitimately
/// take a long time, and cancellation is left to the caller's surface.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the extraction service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    /// Build a client for a service base URL (e.g. `http://localhost:8001`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid server URL '{base_url}': {e}")))?;

        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::remote(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("invalid endpoint path '{path}': {e}")))
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.endpoint("/api/health")?;
        let response = self.get(url).await?;
        let response = remote_ok(response).await?;
        decode(response).await
    }

    /// `POST /api/cases`
    pub async fn create_case(&self, new_case: &NewCase) -> Result<Case> {
        let url = self.endpoint("/api/cases")?;
        let response = self
            .http
            .post(url)
            .json(new_case)
            .send()
            .await
            .map_err(transport)?;
        let response = remote_ok(response).await?;
        let envelope: CreateCaseResponse = decode(response).await?;
        if !envelope.success {
            return Err(Error::remote("service reported unsuccessful case creation"));
        }
        debug!("created case {}", envelope.case.case_id);
        Ok(envelope.case)
    }

    /// `GET /api/cases`
    pub async fn list_cases(&self) -> Result<Vec<Case>> {
        let url = self.endpoint("/api/cases")?;
        let response = self.get(url).await?;
        let response = remote_ok(response).await?;
        let envelope: CasesResponse = decode(response).await?;
        Ok(envelope.cases)
    }

    /// `POST /api/cases/{id}/upload`
    ///
    /// Submits the file as a single multipart part named `file`, keeping the
    /// submitted filename. Rejections (malformed file, unknown case) come
    /// back as [`Error::Upload`] carrying the server-reported reason.
    pub async fn upload_evidence(
        &self,
        case_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse> {
        let url = self.endpoint(&format!("/api/cases/{case_id}/upload"))?;

        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Error::upload(failure_detail(response).await));
        }
        let envelope: UploadResponse = decode(response).await?;
        if !envelope.success {
            return Err(Error::upload("service could not process the file"));
        }
        debug!(
            "uploaded {} as evidence {} ({} records)",
            filename,
            envelope.evidence_id,
            envelope.summary.total()
        );
        Ok(envelope)
    }

    /// `GET /api/cases/{id}/evidence`
    pub async fn list_evidence(&self, case_id: &str) -> Result<Vec<Evidence>> {
        let url = self.endpoint(&format!("/api/cases/{case_id}/evidence"))?;
        let response = self.get(url).await?;
        let response = remote_ok(response).await?;
        let envelope: EvidenceListResponse = decode(response).await?;
        Ok(envelope.evidence)
    }

    /// `POST /api/export`
    ///
    /// On success the artifact body is read in full; the filename comes from
    /// `Content-Disposition` (with the documented fallback) and the hash
    /// from the integrity header. Rejections map to [`Error::Export`]; no
    /// partial artifact is ever returned.
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportArtifact> {
        let url = self.endpoint("/api/export")?;
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Error::export(failure_detail(response).await));
        }

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| FALLBACK_EXPORT_FILENAME.to_string());

        let hash = response
            .headers()
            .get(EXPORT_HASH_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let payload = response
            .bytes()
            .await
            .map_err(|e| Error::export(format!("failed to read artifact body: {e}")))?
            .to_vec();

        debug!("received export artifact '{}' ({} bytes)", filename, payload.len());
        Ok(ExportArtifact {
            filename,
            hash,
            payload,
        })
    }

    /// `GET /api/exports/{id}` -- the case's export history.
    pub async fn export_history(&self, case_id: &str) -> Result<Vec<ExportRecord>> {
        let url = self.endpoint(&format!("/api/exports/{case_id}"))?;
        let response = self.get(url).await?;
        let response = remote_ok(response).await?;
        let envelope: ExportHistoryResponse = decode(response).await?;
        Ok(envelope.exports)
    }

    async fn get(&self, url: Url) -> Result<Response> {
        self.http.get(url).send().await.map_err(transport)
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::remote(format!("request failed: {e}"))
}

/// Map a non-2xx response to [`Error::Remote`], passing 2xx through.
async fn remote_ok(response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(Error::remote(failure_detail(response).await))
    }
}

/// Best-effort extraction of the server's `{"detail": ...}` message,
/// falling back to the status line.
async fn failure_detail(response: Response) -> String {
    let status: StatusCode = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) if !body.detail.is_empty() => body.detail,
        _ => format!("server returned {status}"),
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| Error::remote(format!("invalid response body: {e}")))
}
