//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Remote Service Errors
    // ─────────────────────────────────────────────────────────────
    /// Transport failure or non-2xx response from the extraction service.
    #[error("Remote service error: {message}")]
    Remote { message: String },

    /// The service accepted the request but rejected the file's content
    /// (malformed database, unsupported format).
    #[error("Upload rejected: {message}")]
    Upload { message: String },

    /// The service rejected the export request or produced no artifact.
    #[error("Export failed: {message}")]
    Export { message: String },

    // ─────────────────────────────────────────────────────────────
    // Client-Side Errors
    // ─────────────────────────────────────────────────────────────
    /// A client-side precondition was violated before any network call.
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error was raised before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Check if this error came back from the remote service (as opposed to
    /// a local precondition or infrastructure failure). Remote errors are
    /// terminal for the action that caused them but never for the session.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Remote { .. } | Error::Upload { .. } | Error::Export { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::remote("connection refused");
        assert_eq!(err.to_string(), "Remote service error: connection refused");

        let err = Error::upload("not a SQLite database");
        assert_eq!(err.to_string(), "Upload rejected: not a SQLite database");

        let err = Error::export("no evidence found for case");
        assert!(err.to_string().contains("no evidence found"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_validation() {
        assert!(Error::validation("empty selection").is_validation());
        assert!(!Error::remote("503").is_validation());
        assert!(!Error::config("bad toml").is_validation());
    }

    #[test]
    fn test_error_is_remote() {
        assert!(Error::remote("timeout").is_remote());
        assert!(Error::upload("rejected").is_remote());
        assert!(Error::export("rejected").is_remote());
        assert!(!Error::validation("empty").is_remote());
        assert!(!Error::config("bad").is_remote());
    }

    #[test]
    fn test_error_constructors() {
        let _ = Error::remote("test");
        let _ = Error::upload("test");
        let _ = Error::export("test");
        let _ = Error::validation("test");
        let _ = Error::config("test");
    }
}
