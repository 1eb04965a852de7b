use clap::Parser;
use tracing::debug;

use twin_cli::cli::Cli;
use twin_cli::config::AppConfig;
use twin_cli::{app, logging, report};

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging();
    if cli.quiet {
        logging::set_terminal_enabled(false)?;
    }

    let config = AppConfig::resolve(&cli)?;
    if let Some(level) = &config.logging.level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    let targets = config.targets()?;

    let registry = app::build_registry();
    debug!(backends = ?registry.available_backends(), "registry ready");
    let snapshot = app::run_forecast(&registry, &config).await?;

    print!("{}", report::render(&snapshot, &targets));

    if cli.chart {
        println!();
        print!("{}", report::render_chart(&snapshot)?);
    }
    if let Some(path) = &cli.csv {
        app::write_csv_file(&snapshot, path)?;
    }
    if cli.layout {
        println!();
        print!("{}", snapshot.pdf_layout());
    }

    Ok(())
}
