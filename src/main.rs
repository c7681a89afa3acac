mod api;
mod app;
mod cache;
mod commands;
mod config;
mod event;
mod forms;
mod invoices;
mod query;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "invoicer")]
#[command(about = "A terminal front-end for the invoicing API")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/invoicer/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base URL of the invoicing API
  #[arg(short, long)]
  url: Option<String>,

  /// Log file path (default from config, else <tmp>/invoicer.log)
  #[arg(long)]
  log_file: Option<PathBuf>,

  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

/// File-only logging; stdout belongs to the terminal UI. The guard flushes
/// pending lines when dropped, so it lives as long as `main`.
fn setup_logging(file: &Path, level: &str, verbose: u8) -> WorkerGuard {
  let level = match verbose {
    0 => level,
    1 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(format!("invoicer={}", level)));

  let dir = file.parent().unwrap_or_else(|| Path::new("."));
  let name = file
    .file_name()
    .unwrap_or_else(|| std::ffi::OsStr::new("invoicer.log"));

  let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
    .init();

  guard
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Command line wins over file and environment
  if let Some(url) = args.url {
    config.api.url = url;
  }
  if let Some(file) = args.log_file {
    config.log.file = file;
  }

  let _guard = setup_logging(&config.log.file, &config.log.level, args.verbose);

  // Initialize and run the app
  let mut app = app::App::new(config)?;
  app.run().await?;

  Ok(())
}
