//! # evicase-api - Extraction Service Client
//!
//! Typed binding to the remote forensic extraction service. One method per
//! remote operation, one HTTP exchange per call, no business logic.
//!
//! Depends on [`evicase_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Client (`client`)
//! - [`ApiClient`] - Typed client: health, case creation/listing, evidence
//!   upload/listing, export, export history
//!
//! ### Wire Types (`protocol`)
//! - Response envelopes for every endpoint
//! - [`ExportArtifact`] - Export payload plus header metadata
//! - [`filename_from_disposition()`] - `Content-Disposition` parsing
//! - [`FALLBACK_EXPORT_FILENAME`], [`EXPORT_HASH_HEADER`]
//!
//! ### Test Support (`mock`, behind `test-helpers`)
//! - [`MockService`] - In-process axum stand-in for the real service

pub mod client;
#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;
pub mod protocol;

// Public API re-exports
pub use client::ApiClient;
#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockService;
pub use protocol::{
    filename_from_disposition, CasesResponse, CreateCaseResponse, EvidenceListResponse,
    ExportArtifact, ExportHistoryResponse, HealthResponse, UploadResponse, EXPORT_HASH_HEADER,
    FALLBACK_EXPORT_FILENAME,
};
