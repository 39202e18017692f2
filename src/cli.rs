//! Command-line surface over the evicase workflows
//!
//! Each subcommand maps to one workflow operation. `--json` switches to
//! machine-readable output for scripting; human output stays terse and
//! column-aligned.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use evicase_api::ApiClient;
use evicase_app::{
    load_settings, CaseStore, DirectorySink, EvidenceStore, ExportCoordinator, Settings,
    UploadCoordinator,
};
use evicase_core::types::{Case, DataType, ExportFormat, NewCase};
use evicase_core::{short_hash, Error};

/// Case and evidence workstation for remote forensic extraction services
#[derive(Parser, Debug)]
#[command(name = "evicase")]
#[command(about = "Case and evidence workstation for forensic extraction services", long_about = None)]
pub struct Args {
    /// Extraction service base URL (overrides config and EVICASE_SERVER)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the extraction service is reachable
    Health,

    /// List all cases
    Cases,

    /// Create a new case
    Create {
        /// Case name
        #[arg(long)]
        name: String,

        /// Investigator in charge
        #[arg(long)]
        investigator: String,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Show a case with its evidence and aggregate totals
    Show {
        case_id: String,
    },

    /// Upload an evidence file to a case
    Upload {
        case_id: String,

        /// Evidence file (.db, .sqlite, .sqlite3, .zip expected)
        file: PathBuf,
    },

    /// Export selected data types as an integrity-hashed artifact
    Export {
        case_id: String,

        /// Comma-separated data types: messages,contacts,call_logs
        #[arg(long, value_delimiter = ',', required = true)]
        types: Vec<DataType>,

        /// Artifact format
        #[arg(long, default_value = "json")]
        format: ExportFormat,

        /// Output directory (defaults to the configured export directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Show a case's export history
    History {
        case_id: String,
    },
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let settings = load_settings(&cwd);

    let server = args
        .server
        .clone()
        .unwrap_or_else(|| settings.server_url());
    let api = ApiClient::new(&server)?;

    match args.command {
        Command::Health => health(&api, args.json).await?,
        Command::Cases => cases(&api, args.json).await?,
        Command::Create {
            name,
            investigator,
            description,
        } => create(&api, args.json, name, investigator, description).await?,
        Command::Show { case_id } => show(&api, args.json, &case_id).await?,
        Command::Upload { case_id, file } => upload(&api, args.json, &case_id, &file).await?,
        Command::Export {
            case_id,
            types,
            format,
            out,
        } => export(&api, &settings, args.json, &case_id, types, format, out).await?,
        Command::History { case_id } => history(&api, args.json, &case_id).await?,
    }
    Ok(())
}

async fn health(api: &ApiClient, json: bool) -> color_eyre::Result<()> {
    let health = api.health().await?;
    if json {
        println!(
            "{}",
            json!({ "status": health.status, "timestamp": health.timestamp })
        );
    } else {
        println!(
            "service {} at {} ({})",
            health.status,
            api.base_url(),
            health.timestamp
        );
    }
    Ok(())
}

async fn cases(api: &ApiClient, json: bool) -> color_eyre::Result<()> {
    let mut store = CaseStore::new();
    store.refresh(api).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.list())?);
        return Ok(());
    }

    if store.list().is_empty() {
        println!("No cases found. Create one with `evicase create`.");
        return Ok(());
    }
    for case in store.list() {
        print_case_line(case);
    }
    Ok(())
}

async fn create(
    api: &ApiClient,
    json: bool,
    name: String,
    investigator: String,
    description: String,
) -> color_eyre::Result<()> {
    let mut store = CaseStore::new();
    let new_case = NewCase::new(name, investigator).with_description(description);
    let case = store.create(api, new_case).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&case)?);
    } else {
        println!("Created case {} ({})", case.case_id, case.case_name);
    }
    Ok(())
}

async fn show(api: &ApiClient, json: bool, case_id: &str) -> color_eyre::Result<()> {
    let mut cases = CaseStore::new();
    cases.refresh(api).await?;
    let case = cases
        .find(case_id)
        .ok_or_else(|| Error::validation(format!("no case with id {case_id}")))?
        .clone();

    let mut evidence = EvidenceStore::new();
    evidence.load_for(api, case_id).await?;
    let totals = evidence.totals();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "case": case,
                "evidence": evidence.evidence(),
                "totals": totals,
            }))?
        );
        return Ok(());
    }

    print_case_line(&case);
    if !case.description.is_empty() {
        println!("  {}", case.description);
    }
    println!();

    if evidence.evidence().is_empty() {
        println!("No evidence uploaded yet.");
    } else {
        for item in evidence.evidence() {
            println!(
                "  {:<28} {:>6} messages {:>6} contacts {:>6} call logs  hash {}",
                item.filename,
                item.summary.messages_count,
                item.summary.contacts_count,
                item.summary.call_logs_count,
                short_hash(&item.file_hash)
            );
        }
        println!();
        println!(
            "Totals: {} messages, {} contacts, {} call logs ({} records)",
            totals.messages_count,
            totals.contacts_count,
            totals.call_logs_count,
            totals.total()
        );
    }
    Ok(())
}

async fn upload(
    api: &ApiClient,
    json: bool,
    case_id: &str,
    file: &std::path::Path,
) -> color_eyre::Result<()> {
    let mut store = EvidenceStore::new();
    store.load_for(api, case_id).await?;

    let mut coordinator = UploadCoordinator::new();
    let outcome = coordinator.upload(api, &mut store, case_id, file).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "evidence_id": outcome.evidence_id,
                "file_hash": outcome.file_hash,
                "summary": outcome.summary,
            }))?
        );
        return Ok(());
    }

    println!("Evidence {} processed.", outcome.evidence_id);
    println!(
        "Extracted {} messages, {} contacts, {} call logs",
        outcome.summary.messages_count,
        outcome.summary.contacts_count,
        outcome.summary.call_logs_count
    );
    println!("File hash: {}", outcome.file_hash);
    Ok(())
}

async fn export(
    api: &ApiClient,
    settings: &Settings,
    json: bool,
    case_id: &str,
    types: Vec<DataType>,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> color_eyre::Result<()> {
    let mut coordinator = ExportCoordinator::new();
    for data_type in types {
        // Repeated flags collapse into a single selection entry.
        if !coordinator.selection().contains(&data_type) {
            coordinator.toggle(data_type);
        }
    }

    let sink = DirectorySink::new(out.unwrap_or_else(|| settings.output_dir()));
    let report = coordinator.export(api, &sink, case_id, format).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "filename": report.filename,
                "stored_at": report.stored_at,
                "hash": report.hash,
            }))?
        );
        return Ok(());
    }

    println!("Export complete: {}", report.stored_at.display());
    match &report.hash {
        Some(hash) => println!("Artifact hash: {hash}"),
        None => println!("Artifact hash: (none reported)"),
    }
    Ok(())
}

async fn history(api: &ApiClient, json: bool, case_id: &str) -> color_eyre::Result<()> {
    let coordinator = ExportCoordinator::new();
    let records = coordinator.history(api, case_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No exports recorded for case {case_id}.");
        return Ok(());
    }
    for record in &records {
        let types: Vec<&str> = record.data_types.iter().map(|t| t.as_str()).collect();
        println!(
            "  {:<14} {:<4} [{}] {}  hash {}",
            record.export_id,
            record.format,
            types.join(","),
            record.exported_at,
            short_hash(&record.file_hash)
        );
    }
    Ok(())
}

fn print_case_line(case: &Case) {
    println!(
        "{:<12} {:<24} {:<18} {:<8} {}",
        case.case_id, case.case_name, case.investigator, case.status, case.created_at
    );
}
