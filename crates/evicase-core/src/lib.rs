//! # evicase-core - Core Domain Types
//!
//! Foundation crate for evicase. Provides the domain model for cases,
//! evidence, and exports, plus error handling, logging setup, and hash
//! display formatting.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Case`] - An investigative case as returned by the extraction service
//! - [`Evidence`] - One uploaded source file with its extraction summary
//! - [`EvidenceSummary`] - Messages/contacts/call-log counts for a file
//! - [`DataType`], [`ExportFormat`] - Export request vocabulary
//! - [`NewCase`] - Validated input for case creation
//! - [`ExportRequest`], [`ExportRecord`] - Export wire request and history
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum covering the remote/upload/export/
//!   validation taxonomy
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Hash Display (`hash`)
//! - [`short_hash()`] - Pure truncation of opaque digests for display
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use evicase_core::prelude::*;
//! ```

pub mod error;
pub mod hash;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all evicase crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use hash::{short_hash, SHORT_HASH_LEN};
pub use types::{
    Case, DataType, Evidence, EvidenceSummary, ExportFormat, ExportRecord, ExportRequest, NewCase,
};
