//! # naschviz Renderer
//!
//! Command-line tool that renders a Nagel-Schreckenberg simulation run
//! into a static PNG, live browser figures, or standalone HTML documents.
//!
//! ## Usage
//!
//! ```bash
//! # Static two-panel PNG (default mode)
//! naschviz-render traffic.ini
//!
//! # Interactive figures in the browser
//! naschviz-render traffic.ini interactive
//!
//! # Standalone HTML documents
//! naschviz-render traffic.ini html
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use naschviz::loader;
use naschviz::render::{self, OutputMode};

/// naschviz - Nagel-Schreckenberg Traffic Visualization
#[derive(Parser)]
#[command(name = "naschviz-render")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Simulation configuration file (key=value lines)
    #[arg(value_name = "CONFIG_FILE")]
    config: PathBuf,

    /// Output mode: raster, interactive, or html (defaults to raster)
    #[arg(value_name = "MODE")]
    mode: Option<String>,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = parse_cli();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mode = match cli.mode.as_deref() {
        Some(token) => token.parse::<OutputMode>()?,
        None => OutputMode::Raster,
    };

    let run = loader::load(&cli.config)?;
    render::render(&run, mode)?;

    Ok(())
}

/// Parse arguments, remapping clap's usage-error exit status to 1 while
/// keeping `--help`/`--version` at 0.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            if err.use_stderr() {
                std::process::exit(1);
            }
            std::process::exit(0);
        }
    }
}
