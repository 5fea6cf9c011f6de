//! Command-line front end for the permtree engine.
//!
//! Stands in for the desktop editor: session files hold the four
//! tables as one snapshot, documents are the exported permission
//! trees.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use permtree_core::config::Config;
use permtree_core::export::ExportOptions;
use permtree_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use permtree_core::{build_document, export_with, load, Tables};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "permtree")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Optional configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Export a session file to a permission-tree document
    Export {
        /// Session file holding the four tables
        session: PathBuf,
        /// Output document path
        document: PathBuf,
    },
    /// Load a document back into a session file
    Load {
        /// Input document path
        document: PathBuf,
        /// Session file to (over)write
        session: PathBuf,
    },
    /// Validate a session file without writing anything
    Check {
        /// Session file holding the four tables
        session: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("reading config '{}'", path.display()))?,
        None => Config::from_env().context("reading config from environment")?,
    };

    let log_level = LogLevel::parse(&args.log_level).unwrap_or_else(|| {
        eprintln!("Invalid log level '{}', using 'info'", args.log_level);
        LogLevel::Info
    });
    let log_config = LogConfig::new(log_level).json_format(args.json_logs);
    init_logging_with_config(log_config)?;

    match args.command {
        Command::Export { session, document } => {
            let tables = read_session(&session)?;
            let mut sink = File::create(&document)
                .with_context(|| format!("creating '{}'", document.display()))?;
            let options = ExportOptions { pretty: config.export.pretty };
            export_with(&tables, &mut sink, &options)
                .with_context(|| format!("exporting '{}'", session.display()))?;
            info!(document = %document.display(), "export finished");
        }
        Command::Load { document, session } => {
            let mut source = File::open(&document)
                .with_context(|| format!("opening '{}'", document.display()))?;
            let mut tables = Tables::new();
            load(&mut tables, &mut source)
                .with_context(|| format!("loading '{}'", document.display()))?;
            write_session(&session, &tables)?;
            info!(session = %session.display(), "load finished");
        }
        Command::Check { session } => {
            let tables = read_session(&session)?;
            build_document(&tables)
                .with_context(|| format!("validating '{}'", session.display()))?;
            info!(session = %session.display(), "session is valid");
        }
    }

    Ok(())
}

fn read_session(path: &Path) -> Result<Tables> {
    let mut file =
        File::open(path).with_context(|| format!("opening '{}'", path.display()))?;
    Tables::restore_snapshot(&mut file)
        .with_context(|| format!("reading session '{}'", path.display()))
}

fn write_session(path: &Path, tables: &Tables) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating '{}'", path.display()))?;
    tables
        .save_snapshot(&mut file)
        .with_context(|| format!("writing session '{}'", path.display()))
}
