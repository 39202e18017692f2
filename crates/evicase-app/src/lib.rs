//! # evicase-app - Case and Export Workflows
//!
//! Platform-agnostic workflow layer: the stores caching remote state, the
//! coordinators driving uploads and exports, the persistence seam for
//! export artifacts, and configuration loading. Surfaces (CLI today) call
//! into this crate and render from store state; a new surface only has to
//! provide its own [`FileSink`].
//!
//! ## Public API
//!
//! ### Stores
//! - [`CaseStore`] - Read-through cache of the case list
//! - [`EvidenceStore`] - Per-open-case evidence cache with aggregate totals
//!
//! ### Coordinators
//! - [`UploadCoordinator`] / [`UploadPhase`] / [`UploadOutcome`] - Single-
//!   file upload workflow with explicit in-flight admission control
//! - [`ExportCoordinator`] / [`ExportReport`] - Data-type selection and
//!   integrity-hashed artifact export
//!
//! ### Persistence
//! - [`FileSink`] - Byte-for-byte artifact persistence seam
//! - [`DirectorySink`] - Download/document directory implementation
//!
//! ### Configuration
//! - [`Settings`], [`load_settings()`] - `.evicase/config.toml` handling

pub mod case_store;
pub mod config;
pub mod evidence_store;
pub mod export;
pub mod sink;
pub mod upload;

// Re-export primary types
pub use case_store::CaseStore;
pub use config::{load_settings, Settings, DEFAULT_SERVER_URL, SERVER_ENV_VAR};
pub use evidence_store::EvidenceStore;
pub use export::{ExportCoordinator, ExportReport};
pub use sink::{DirectorySink, FileSink};
pub use upload::{
    has_advisory_extension, UploadCoordinator, UploadOutcome, UploadPhase, ADVISORY_EXTENSIONS,
};
