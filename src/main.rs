use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use apinav::core::config::{self, CliOverrides};
use apinav::loader::{self, SpecSource};
use apinav::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "apinav", version, about = "Browse an OpenAPI 3 description in the terminal")]
struct Args {
    /// Path or http(s) URL of the OpenAPI description (JSON or YAML)
    spec: String,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// File to write the log to
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file to use instead of ~/.apinav/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("apinav: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            log_level: args.log_level.as_deref(),
            log_file: args.log_file.as_deref(),
        },
    );

    // File logger; the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    for warning in &resolved.warnings {
        log::warn!("{warning}");
    }

    log::info!("apinav {} starting up", env!("CARGO_PKG_VERSION"));

    let source = match SpecSource::parse(&args.spec) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("apinav: {e}");
            return ExitCode::FAILURE;
        }
    };
    let document = match loader::load(&source).await {
        Ok(d) => d,
        Err(e) => {
            log::error!("failed to load {source}: {e}");
            eprintln!("apinav: {source}: {e}");
            return ExitCode::FAILURE;
        }
    };

    match tui::run(document, &resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("apinav: terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
