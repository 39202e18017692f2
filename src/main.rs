//! evicase - Case and evidence workstation client
//!
//! This is the binary entry point. Command handling lives in `cli`; all
//! workflow logic lives in the workspace crates.

mod cli;

use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = cli::Args::parse();

    // Logging failures must not block the workstation itself.
    if let Err(e) = evicase_core::logging::init() {
        eprintln!("warning: file logging unavailable: {e}");
    }

    cli::run(args).await
}
