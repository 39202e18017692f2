//! End-to-end workflow tests against the in-process mock service

use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tempfile::TempDir;

use evicase_api::{ApiClient, MockService};
use evicase_app::{
    CaseStore, DirectorySink, EvidenceStore, ExportCoordinator, UploadCoordinator,
};
use evicase_core::types::{DataType, EvidenceSummary, ExportFormat, NewCase};

fn evidence_file(dir: &TempDir, name: &str, payload: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, payload).unwrap();
    path
}

#[tokio::test]
async fn test_full_case_lifecycle_to_verified_export() {
    let mock = MockService::spawn_with_summary(EvidenceSummary {
        messages_count: 5,
        contacts_count: 2,
        call_logs_count: 0,
    })
    .await;
    let api = ApiClient::new(&mock.url()).unwrap();

    // Create a case and find it in the refreshed list.
    let mut cases = CaseStore::new();
    let case = cases
        .create(&api, NewCase::new("Case A", "Jane"))
        .await
        .unwrap();
    let listed = cases.find(&case.case_id).expect("case listed after create");
    assert_eq!(listed.case_name, "Case A");
    assert_eq!(listed.investigator, "Jane");

    // Upload one evidence file; the extraction summary becomes visible
    // through the store refresh.
    let workdir = tempfile::tempdir().unwrap();
    let source = evidence_file(&workdir, "mmssms.db", b"SQLite format 3\0rows");

    let mut evidence = EvidenceStore::new();
    evidence.load_for(&api, &case.case_id).await.unwrap();

    let mut uploader = UploadCoordinator::new();
    let outcome = uploader
        .upload(&api, &mut evidence, &case.case_id, &source)
        .await
        .unwrap();
    assert_eq!(outcome.summary.messages_count, 5);
    assert_eq!(outcome.summary.contacts_count, 2);

    assert_eq!(evidence.evidence().len(), 1);
    assert_eq!(evidence.evidence()[0].summary, outcome.summary);
    assert_eq!(evidence.totals().total(), 7);

    // Export messages as JSON and persist through the directory sink.
    let export_dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(export_dir.path());

    let mut exporter = ExportCoordinator::new();
    exporter.toggle(DataType::Messages);
    let report = exporter
        .export(&api, &sink, &case.case_id, ExportFormat::Json)
        .await
        .unwrap();

    let hash = report.hash.expect("service sends an integrity hash");
    assert_eq!(hash.len(), 64);

    // The persisted artifact matches the service's hash byte-for-byte.
    // (The workflows never verify this themselves; the test does, to pin
    // down sink fidelity.)
    let stored = std::fs::read(&report.stored_at).unwrap();
    assert_eq!(format!("{:x}", Sha256::digest(&stored)), hash);

    // The export shows up in the case's history.
    let history = exporter.history(&api, &case.case_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].data_types, vec![DataType::Messages]);
    assert_eq!(history[0].file_hash, hash);
}

#[tokio::test]
async fn test_switching_cases_never_leaks_evidence() {
    let mock = MockService::spawn().await;
    let api = ApiClient::new(&mock.url()).unwrap();

    let case_a = api.create_case(&NewCase::new("Case A", "Jane")).await.unwrap();
    let case_b = api.create_case(&NewCase::new("Case B", "Avery")).await.unwrap();

    let workdir = tempfile::tempdir().unwrap();
    let source = evidence_file(&workdir, "calls.db", &[0u8; 128]);

    let mut evidence = EvidenceStore::new();
    evidence.load_for(&api, &case_a.case_id).await.unwrap();

    let mut uploader = UploadCoordinator::new();
    uploader
        .upload(&api, &mut evidence, &case_a.case_id, &source)
        .await
        .unwrap();
    assert_eq!(evidence.evidence().len(), 1);

    // Opening the second case replaces the cache; nothing from Case A
    // remains visible.
    evidence.load_for(&api, &case_b.case_id).await.unwrap();
    assert!(evidence.evidence().is_empty());
    assert_eq!(evidence.totals(), EvidenceSummary::default());
    assert_eq!(evidence.open_case(), Some(case_b.case_id.as_str()));
}

#[tokio::test]
async fn test_csv_export_uses_server_filename() {
    let mock = MockService::spawn().await;
    let api = ApiClient::new(&mock.url()).unwrap();

    let case = api.create_case(&NewCase::new("Case A", "Jane")).await.unwrap();
    api.upload_evidence(&case.case_id, "contacts.sqlite", vec![1; 16])
        .await
        .unwrap();

    let export_dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(export_dir.path());

    let mut exporter = ExportCoordinator::new();
    exporter.toggle(DataType::Contacts);
    let report = exporter
        .export(&api, &sink, &case.case_id, ExportFormat::Csv)
        .await
        .unwrap();

    assert!(report.filename.contains("contacts"));
    assert!(report.filename.ends_with(".csv"));
    assert_eq!(
        report.stored_at.file_name().unwrap().to_str().unwrap(),
        report.filename
    );
}
