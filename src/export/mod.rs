//! Export module for splitledger
//!
//! Writes a group's balance report in one of three formats:
//! - JSON: machine-readable, amounts as numbers
//! - YAML: human-readable, same structure as JSON
//! - CSV: spreadsheet-compatible, balances then suggested settlements

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_report_csv;
pub use json::{export_report_json, BalanceReport, BalanceRecord, SettlementRecord};
pub use yaml::export_report_yaml;

use std::io::Write;

use crate::config::settings::ExportFormat;
use crate::error::LedgerResult;

/// Write a report in the requested format
pub fn write_report<W: Write>(
    report: &BalanceReport,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Json => export_report_json(report, writer, true),
        ExportFormat::Yaml => export_report_yaml(report, writer),
        ExportFormat::Csv => export_report_csv(report, writer),
    }
}
