//! Domain types for cases, evidence, and exports
//!
//! Everything here mirrors the extraction service's wire vocabulary. The
//! service is the only consistency authority: these types are never mutated
//! client-side once received, and opaque fields (`status`, hashes,
//! timestamps) are carried as strings, displayed but never interpreted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A top-level investigative unit grouping evidence.
///
/// Server-assigned and immutable from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Case {
    pub case_id: String,
    pub case_name: String,
    pub investigator: String,
    #[serde(default)]
    pub description: String,
    /// Server-controlled lifecycle label. Opaque to the client.
    #[serde(default)]
    pub status: String,
    /// Server-assigned creation timestamp, carried verbatim.
    #[serde(default)]
    pub created_at: String,
}

/// One uploaded source file and its extraction summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Evidence {
    pub evidence_id: String,
    pub case_id: String,
    pub filename: String,
    /// Hex digest computed server-side over the uploaded bytes. Opaque
    /// verification token, never recomputed here.
    #[serde(default)]
    pub file_hash: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub uploaded_at: String,
    #[serde(default)]
    pub processed: bool,
    #[serde(default)]
    pub summary: EvidenceSummary,
}

/// Record counts extracted from a single evidence file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EvidenceSummary {
    pub messages_count: u64,
    pub contacts_count: u64,
    pub call_logs_count: u64,
}

impl EvidenceSummary {
    /// The count backing one exportable data type.
    pub fn count_for(&self, data_type: DataType) -> u64 {
        match data_type {
            DataType::Messages => self.messages_count,
            DataType::Contacts => self.contacts_count,
            DataType::CallLogs => self.call_logs_count,
        }
    }

    /// Total records across all three data types.
    pub fn total(&self) -> u64 {
        self.messages_count + self.contacts_count + self.call_logs_count
    }
}

impl std::ops::AddAssign for EvidenceSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.messages_count += rhs.messages_count;
        self.contacts_count += rhs.contacts_count;
        self.call_logs_count += rhs.call_logs_count;
    }
}

/// Kind of extracted communication record offered for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Messages,
    Contacts,
    CallLogs,
}

impl DataType {
    /// All data types, in the order the service documents them.
    pub const ALL: [DataType; 3] = [DataType::Messages, DataType::Contacts, DataType::CallLogs];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Messages => "messages",
            DataType::Contacts => "contacts",
            DataType::CallLogs => "call_logs",
        }
    }

    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Messages => "Messages",
            DataType::Contacts => "Contacts",
            DataType::CallLogs => "Call Logs",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "messages" => Ok(DataType::Messages),
            "contacts" => Ok(DataType::Contacts),
            "call_logs" => Ok(DataType::CallLogs),
            other => Err(Error::validation(format!(
                "unknown data type '{other}' (expected messages, contacts, or call_logs)"
            ))),
        }
    }
}

/// Serialization format of an export artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(Error::validation(format!(
                "unknown export format '{other}' (expected json or csv)"
            ))),
        }
    }
}

/// Input for creating a new case. Validated before any network call.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewCase {
    pub case_name: String,
    pub investigator: String,
    #[serde(default)]
    pub description: String,
}

impl NewCase {
    pub fn new(case_name: impl Into<String>, investigator: impl Into<String>) -> Self {
        Self {
            case_name: case_name.into(),
            investigator: investigator.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Client-side precondition: case name and investigator are required.
    pub fn validate(&self) -> Result<(), Error> {
        if self.case_name.trim().is_empty() {
            return Err(Error::validation("case name must not be empty"));
        }
        if self.investigator.trim().is_empty() {
            return Err(Error::validation("investigator must not be empty"));
        }
        Ok(())
    }
}

/// Wire request for the export endpoint. Constructed transiently per export
/// action, never persisted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportRequest {
    pub case_id: String,
    pub data_types: Vec<DataType>,
    pub export_format: ExportFormat,
}

/// One entry of a case's server-side export history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportRecord {
    pub export_id: String,
    pub case_id: String,
    #[serde(default)]
    pub exported_at: String,
    pub format: ExportFormat,
    #[serde(default)]
    pub data_types: Vec<DataType>,
    #[serde(default)]
    pub file_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_decodes_server_shape() {
        // Shape as returned by the service, including Mongo's _id passthrough.
        let json = r#"{
            "_id": "66f0a1",
            "case_id": "9b2d8c1e",
            "case_name": "Case A",
            "investigator": "Jane",
            "description": "seized handset",
            "status": "active",
            "created_at": "2026-08-01T10:22:31Z"
        }"#;
        let case: Case = serde_json::from_str(json).unwrap();
        assert_eq!(case.case_id, "9b2d8c1e");
        assert_eq!(case.case_name, "Case A");
        assert_eq!(case.investigator, "Jane");
        assert_eq!(case.status, "active");
    }

    #[test]
    fn test_evidence_decodes_without_optional_fields() {
        let json = r#"{
            "evidence_id": "ev-1",
            "case_id": "9b2d8c1e",
            "filename": "mmssms.db"
        }"#;
        let evidence: Evidence = serde_json::from_str(json).unwrap();
        assert_eq!(evidence.summary, EvidenceSummary::default());
        assert_eq!(evidence.file_hash, "");
        assert!(!evidence.processed);
    }

    #[test]
    fn test_summary_add_assign() {
        let mut total = EvidenceSummary::default();
        total += EvidenceSummary {
            messages_count: 5,
            contacts_count: 2,
            call_logs_count: 0,
        };
        total += EvidenceSummary {
            messages_count: 1,
            contacts_count: 0,
            call_logs_count: 7,
        };
        assert_eq!(total.messages_count, 6);
        assert_eq!(total.contacts_count, 2);
        assert_eq!(total.call_logs_count, 7);
        assert_eq!(total.total(), 15);
    }

    #[test]
    fn test_data_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&DataType::CallLogs).unwrap(),
            "\"call_logs\""
        );
        assert_eq!("messages".parse::<DataType>().unwrap(), DataType::Messages);
        assert_eq!(
            "call_logs".parse::<DataType>().unwrap(),
            DataType::CallLogs
        );
        assert!("phone_calls".parse::<DataType>().is_err());
    }

    #[test]
    fn test_data_type_round_trips_through_str() {
        for dt in DataType::ALL {
            assert_eq!(dt.as_str().parse::<DataType>().unwrap(), dt);
        }
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_new_case_validation() {
        assert!(NewCase::new("Case A", "Jane").validate().is_ok());
        assert!(NewCase::new("", "Jane").validate().is_err());
        assert!(NewCase::new("Case A", "   ").validate().is_err());
    }

    #[test]
    fn test_export_request_wire_shape() {
        let request = ExportRequest {
            case_id: "9b2d8c1e".to_string(),
            data_types: vec![DataType::Messages, DataType::CallLogs],
            export_format: ExportFormat::Json,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["case_id"], "9b2d8c1e");
        assert_eq!(json["data_types"][1], "call_logs");
        assert_eq!(json["export_format"], "json");
    }

    #[test]
    fn test_export_record_decodes_history_entry() {
        let json = r#"{
            "export_id": "ex-9",
            "case_id": "9b2d8c1e",
            "exported_at": "2026-08-02T08:00:00Z",
            "format": "csv",
            "data_types": ["contacts"],
            "file_hash": "ab12"
        }"#;
        let record: ExportRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.format, ExportFormat::Csv);
        assert_eq!(record.data_types, vec![DataType::Contacts]);
    }
}
