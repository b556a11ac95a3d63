mod cli;
mod error;
mod logging;
mod ui;

use crate::cli::Cli;
use crate::error::Result;
use crate::ui::UiRenderer;
use clap::Parser;
use conffails::progress::ProgressReporter;
use conffails::workflows::triage;
use tracing::{debug, error, info};

/// Folder of OMEGA log files, relative to the working directory.
const LOG_FOLDER: &str = "Conformers-Logs";
/// Folder of per-library structure files, relative to the working directory.
const STRUCTURES_FOLDER: &str = "Compound-3D-Structure";

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("conffails v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let cwd = std::env::current_dir()
        .map_err(|e| anyhow::anyhow!("Cannot determine working directory: {}", e))?;
    let log_folder = cwd.join(LOG_FOLDER);
    let structures_root = cwd.join(STRUCTURES_FOLDER);

    let ui = UiRenderer::new();
    let reporter = ProgressReporter::with_callback(ui.callback());
    let result = triage::run(&log_folder, &structures_root, &reporter);
    ui.finish();

    match &result {
        Ok(report) => {
            info!(
                "Triage finished: {} library(ies), {} structure file(s) collected.",
                report.libraries.len(),
                report.structures_copied
            );
            println!("Script finished!");
        }
        Err(e) => {
            error!("Triage failed: {}", e);
        }
    }

    result.map(|_| ()).map_err(Into::into)
}
