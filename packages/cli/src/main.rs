#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for crash report lead extraction.
//!
//! `crash_leads parse` runs a batch of PDFs through the parser, prints the
//! lead table and summary metrics, and writes the export file. Without a
//! subcommand the tool runs interactively.
//!
//! Logging goes through `indicatif-log-bridge` (via
//! [`crash_leads_cli_utils::init_logger`]) so log lines and the progress
//! bar never fight for the terminal.

mod interactive;
mod render;

use std::path::{Path, PathBuf};
use std::str::FromStr as _;

use clap::{Parser, Subcommand};
use crash_leads_cli_utils::{IndicatifProgress, MultiProgress};
use crash_leads_export::ExportFormat;
use crash_leads_ingest::{BatchProcessor, LeadBatch, load_parser};

/// Default export file name prefix.
const DEFAULT_PREFIX: &str = "leads";

#[derive(Parser)]
#[command(
    name = "crash_leads",
    about = "Extract lead rows from NJTR-1 crash report PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse crash report PDFs and export the lead rows
    Parse {
        /// PDF files (or directories of PDFs), processed in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Directory the export file is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Export format (xlsx, csv, json)
        #[arg(long, default_value = "xlsx", value_parser = parse_format)]
        format: ExportFormat,
        /// Export file name prefix; a `_YYYYMMDD_HHMM` timestamp is appended
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
        /// Report profile TOML overriding the built-in NJTR-1 profile
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Print the table only; do not write an export file
        #[arg(long)]
        no_export: bool,
    },
    /// Print the extracted text of one PDF and the method that produced it
    Text {
        /// PDF file
        file: PathBuf,
    },
    /// Print the active report profile as TOML
    Profile {
        /// Report profile TOML to validate and print instead of the built-in one
        #[arg(long)]
        profile: Option<PathBuf>,
    },
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_str(value)
        .map_err(|_| format!("unknown format '{value}' (expected xlsx, csv or json)"))
}

/// Where and how to write the export file.
struct ExportTarget {
    out_dir: PathBuf,
    format: ExportFormat,
    prefix: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crash_leads_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi).await;
    };

    match command {
        Commands::Parse {
            files,
            out_dir,
            format,
            prefix,
            profile,
            no_export,
        } => {
            let target = (!no_export).then_some(ExportTarget {
                out_dir,
                format,
                prefix,
            });
            parse_files(&multi, &files, profile.as_deref(), target.as_ref()).await?;
        }
        Commands::Text { file } => {
            print_text(&file).await?;
        }
        Commands::Profile { profile } => {
            let parser = load_parser(profile.as_deref())?;
            print!("{}", parser.profile().to_toml_string()?);
        }
    }

    Ok(())
}

/// Processes `inputs` in order, prints the results, and writes the export
/// file when a target is given.
async fn parse_files(
    multi: &MultiProgress,
    inputs: &[PathBuf],
    profile: Option<&Path>,
    target: Option<&ExportTarget>,
) -> Result<LeadBatch, Box<dyn std::error::Error>> {
    let processor = BatchProcessor::new(load_parser(profile)?);
    let paths = collect_pdf_paths(inputs).await?;

    if paths.is_empty() {
        println!("No PDF files to parse.");
        return Ok(LeadBatch::default());
    }

    log::info!("Parsing {} file(s)", paths.len());

    let progress = IndicatifProgress::documents_bar(multi, paths.len() as u64);
    let batch = processor.process_paths(&paths, &progress).await;
    progress.clear();

    render::print_documents(&batch.documents);
    println!();
    render::print_rows(&batch.rows);
    println!();
    render::print_summary(&batch.summary());

    if let Some(target) = target {
        let path = crash_leads_export::export_to_dir(
            &target.out_dir,
            &target.prefix,
            target.format,
            &batch.rows,
            chrono::Local::now().naive_local(),
        )?;
        println!();
        println!("Export written to {}", path.display());
    }

    Ok(batch)
}

/// Extracts and prints the text of one document.
async fn print_text(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(path).await?;
    let extracted =
        tokio::task::spawn_blocking(move || crash_leads_pdf::extract_text(&bytes)).await?;

    println!(
        "Extraction method: {} ({} page(s), {} characters)",
        extracted.method,
        extracted.pages,
        extracted.text.chars().count()
    );
    println!("{}", "-".repeat(60));
    println!("{}", extracted.text);

    Ok(())
}

/// Expands directories into the `.pdf` files they contain (sorted by name)
/// and keeps file arguments as given, preserving argument order.
async fn collect_pdf_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = Vec::new();

    for input in inputs {
        if !tokio::fs::metadata(input).await.is_ok_and(|m| m.is_dir()) {
            paths.push(input.clone());
            continue;
        }

        let mut entries = tokio::fs::read_dir(input).await?;
        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            {
                found.push(path);
            }
        }
        found.sort();

        log::debug!("{}: {} PDF file(s)", input.display(), found.len());
        paths.extend(found);
    }

    Ok(paths)
}
