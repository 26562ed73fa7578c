//! Balance and export CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::settings::{ExportFormat, Settings};
use crate::display::format_group_summary;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{write_report, BalanceReport};
use crate::services::{BalanceService, GroupService};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON, amounts as numbers
    Json,
    /// YAML, human-readable
    Yaml,
    /// CSV, balances then suggested settlements
    Csv,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Yaml => ExportFormat::Yaml,
            OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}

/// Print a group's balances and suggested settlements
pub fn handle_balances_command(
    storage: &Storage,
    settings: &Settings,
    group: &str,
) -> LedgerResult<()> {
    let group = GroupService::new(storage).require(group)?;
    let summary = BalanceService::new(storage).group_summary(group.id)?;
    print!("{}", format_group_summary(&summary, settings));
    Ok(())
}

/// Export a group's balance report to a file or stdout
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    group: &str,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let group = GroupService::new(storage).require(group)?;
    let summary = BalanceService::new(storage).group_summary(group.id)?;
    let report = BalanceReport::from_summary(&summary);
    let format = format
        .map(ExportFormat::from)
        .unwrap_or(settings.default_export_format);

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
            eprintln!("Balances for {} exported to: {}", group.name, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, format, &mut writer)?;
        }
    }

    Ok(())
}
