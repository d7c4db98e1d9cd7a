//! Iconsync CLI - synchronize an installed icon with its staged replacement.

use std::process::ExitCode;

use clap::Parser;

use iconsync::{
    FixedIdentity, IconPaths, IconUpdater, StdoutSink, TracingSink, UpdateOutcome,
    CURRENT_ICON_ROOT, STAGED_ICON_ROOT,
};

/// Iconsync - single-file icon synchronization over raw system calls
#[derive(Parser)]
#[command(name = "iconsync")]
#[command(version)]
#[command(about = "Synchronize an installed icon with its staged replacement")]
struct Cli {
    /// Title identifier used to build both icon paths
    #[arg(required = true)]
    title_id: String,

    /// Root directory holding the installed icon
    #[arg(long, default_value = CURRENT_ICON_ROOT)]
    current_root: String,

    /// Root directory holding the staged replacement icon
    #[arg(long, default_value = STAGED_ICON_ROOT)]
    staged_root: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let identity = FixedIdentity::new(cli.title_id);

    let paths =
        match IconPaths::for_identity_with_roots(&cli.current_root, &cli.staged_root, &identity) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };

    let updater = IconUpdater::new(paths, TracingSink, StdoutSink);
    match updater.run().await {
        UpdateOutcome::Failed => ExitCode::FAILURE,
        UpdateOutcome::Updated | UpdateOutcome::Identical | UpdateOutcome::MissingCurrent => {
            ExitCode::SUCCESS
        }
    }
}
