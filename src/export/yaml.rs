//! YAML export of a group's balance report

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::BalanceReport;

/// Write a report as YAML, preceded by a short comment header
pub fn export_report_yaml<W: Write>(report: &BalanceReport, writer: &mut W) -> LedgerResult<()> {
    let export_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# splitledger balances for {}", report.group_name).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", report.generated_at).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, report).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
