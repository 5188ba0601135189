use anyhow::{Context, Result};
use clap::Parser;

use ite::cli::CliArgs;
use ite::editor::Document;
use ite::output::OutputPanel;
use ite::runtime::app::{App, RunStatus};

fn main() -> Result<()> {
    ite::tracing::init();

    let args = CliArgs::parse();
    let base = args.load_base_config();
    let startup = args.into_config(base);

    let document = match startup.file {
        Some(path) => Document::open_or_create(path.clone())
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => Document::new(),
    };

    let mut app = App::new(document, OutputPanel::console(), startup.build);
    let status = app.run_action(startup.kind, startup.timeout);
    tracing::info!("{} ended with {:?}", startup.kind, status);

    if status == RunStatus::TimedOut {
        eprintln!("Timed out waiting for {} to finish", startup.kind);
    }
    std::process::exit(status.exit_code());
}
