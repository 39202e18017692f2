//! Platform persistence seam for export artifacts

use std::path::{Path, PathBuf};

use evicase_core::prelude::*;

/// Persists an export artifact to durable, user-accessible storage.
///
/// Implementations must store the payload byte-for-byte: the integrity
/// hash the service computed covers exactly these bytes, and re-encoding
/// or truncation would break the investigator's verification record.
pub trait FileSink {
    /// Write the artifact, returning the final stored path.
    fn persist(&self, payload: &[u8], filename: &str) -> Result<PathBuf>;
}

/// Sink writing artifacts into a target directory (download or document
/// directory, depending on the surface).
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn persist(&self, payload: &[u8], filename: &str) -> Result<PathBuf> {
        // Server-supplied names never address directories; keep only the
        // final path component.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| Error::validation(format!("unusable artifact filename '{filename}'")))?;

        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(name);
        std::fs::write(&target, payload)?;
        debug!("artifact persisted to {}", target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_writes_bytes_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let payload = b"\x00\x01binary artifact\xff".to_vec();
        let stored = sink.persist(&payload, "forensics_export_1.json").unwrap();

        assert_eq!(stored, dir.path().join("forensics_export_1.json"));
        assert_eq!(std::fs::read(stored).unwrap(), payload);
    }

    #[test]
    fn test_persist_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("case-a");
        let sink = DirectorySink::new(&nested);

        let stored = sink.persist(b"{}", "report.json").unwrap();
        assert!(stored.starts_with(&nested));
        assert!(stored.exists());
    }

    #[test]
    fn test_persist_sanitizes_traversal_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let stored = sink.persist(b"x", "../../escape.json").unwrap();
        assert_eq!(stored, dir.path().join("escape.json"));
    }

    #[test]
    fn test_persist_rejects_nameless_path() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let err = sink.persist(b"x", "..").unwrap_err();
        assert!(err.is_validation(), "got {err:?}");
    }
}
