// src/main.rs
mod batch;
mod extractors;
mod source;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use batch::{Batch, LayoutKind};
use extractors::ContextScope;
use storage::StorageManager;
use utils::AppError;

/// Extracts budget ledger tables from Ministry of Finance expenditure reports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract one layout from every PDF or text file in a directory
    Extract {
        /// Report layout to extract
        #[arg(short, long, value_enum)]
        layout: LayoutKind,

        /// Directory holding the input documents
        #[arg(short, long, default_value = "input")]
        input_dir: PathBuf,

        /// Output directory for extracted tables
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Whether titles, program/activity and section state carry across pages
        #[arg(long, value_enum, default_value_t = ScopeArg::Document)]
        context_scope: ScopeArg,
    },
    /// Download every PDF linked from an archive page
    Fetch {
        /// Archive page listing the PDFs
        #[arg(short, long)]
        url: String,

        /// Directory to save the PDFs into
        #[arg(short, long, default_value = "input")]
        output_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeArg {
    Document,
    Page,
}

impl From<ScopeArg> for ContextScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Document => ContextScope::Document,
            ScopeArg::Page => ContextScope::Page,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    match args.command {
        Command::Extract {
            layout,
            input_dir,
            output_dir,
            context_scope,
        } => {
            let storage = StorageManager::new(&output_dir)?;
            let sources = source::default_sources();
            let batch = Batch {
                kind: layout,
                scope: context_scope.into(),
                sources: &sources,
                storage: &storage,
            };

            let summary = batch.run_dir(&input_dir)?;
            if summary.written == 0 && summary.failed > 0 {
                return Err(AppError::Processing(format!(
                    "Failed to extract any tables from {} documents",
                    summary.failed
                )));
            }
        }
        Command::Fetch { url, output_dir } => {
            let summary = source::fetch::download_archive(&url, &output_dir).await?;
            tracing::info!(
                "Download finished. New: {}, Already present: {}, Failures: {}",
                summary.downloaded,
                summary.existing,
                summary.failed
            );
        }
    }

    Ok(())
}
