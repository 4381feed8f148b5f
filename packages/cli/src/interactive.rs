//! Interactive mode.
//!
//! Menu-driven front end using `dialoguer`, for running a batch without
//! remembering the `parse` flags.

use std::path::PathBuf;

use crash_leads_cli_utils::MultiProgress;
use crash_leads_export::ExportFormat;
use dialoguer::{Confirm, Input, Select};

use crate::{DEFAULT_PREFIX, ExportTarget};

/// Top-level actions of the interactive menu.
enum Action {
    Parse,
    ShowText,
    ShowProfile,
}

impl Action {
    const ALL: &[Self] = &[Self::Parse, Self::ShowText, Self::ShowProfile];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Parse => "Parse crash reports",
            Self::ShowText => "Show extracted text of a PDF",
            Self::ShowProfile => "Show report profile",
        }
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if a prompt fails, the profile cannot be loaded, or the
/// export file cannot be written.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crash Report Lead Extractor");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Parse => parse(multi).await?,
        Action::ShowText => {
            let file: String = Input::new().with_prompt("PDF file").interact_text()?;
            crate::print_text(&PathBuf::from(file.trim())).await?;
        }
        Action::ShowProfile => {
            let parser = crash_leads_ingest::load_parser(prompt_profile()?.as_deref())?;
            print!("{}", parser.profile().to_toml_string()?);
        }
    }

    Ok(())
}

async fn parse(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let raw: String = Input::new()
        .with_prompt("PDF files or directories (comma-separated)")
        .interact_text()?;
    let inputs = split_paths(&raw);

    if inputs.is_empty() {
        println!("No files given.");
        return Ok(());
    }

    let profile = prompt_profile()?;

    let export = Confirm::new()
        .with_prompt("Write an export file?")
        .default(true)
        .interact()?;

    let target = if export {
        let format_labels: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.extension()).collect();
        let format_idx = Select::new()
            .with_prompt("Export format")
            .items(&format_labels)
            .default(0)
            .interact()?;

        let out_dir: String = Input::new()
            .with_prompt("Output directory")
            .default(".".to_string())
            .interact_text()?;

        let prefix: String = Input::new()
            .with_prompt("File name prefix")
            .default(DEFAULT_PREFIX.to_string())
            .interact_text()?;

        Some(ExportTarget {
            out_dir: PathBuf::from(out_dir.trim()),
            format: ExportFormat::ALL[format_idx],
            prefix: prefix.trim().to_string(),
        })
    } else {
        None
    };

    crate::parse_files(multi, &inputs, profile.as_deref(), target.as_ref()).await?;

    Ok(())
}

/// Asks for an optional profile path; empty means the built-in profile.
fn prompt_profile() -> Result<Option<PathBuf>, dialoguer::Error> {
    let raw: String = Input::new()
        .with_prompt("Report profile TOML (empty for built-in NJTR-1)")
        .allow_empty(true)
        .interact_text()?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| PathBuf::from(raw)))
}

fn split_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
