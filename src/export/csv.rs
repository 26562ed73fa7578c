//! CSV export of a group's balance report
//!
//! Two sections, each with its own header row: member balances, then
//! suggested settlements. Amounts are written with two decimals.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::BalanceReport;

/// Write a report as CSV
pub fn export_report_csv<W: Write>(report: &BalanceReport, writer: &mut W) -> LedgerResult<()> {
    let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv_writer
        .write_record(["user_id", "user_name", "profile_picture_url", "balance"])
        .map_err(export_err)?;
    for record in &report.balances {
        csv_writer
            .write_record([
                record.user_id.as_uuid().to_string(),
                record.user_name.clone(),
                record.profile_picture_url.clone().unwrap_or_default(),
                format!("{:.2}", record.balance),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .write_record(["paid_by", "paid_by_name", "paid_to", "paid_to_name", "amount"])
        .map_err(export_err)?;
    for record in &report.suggested_settlements {
        csv_writer
            .write_record([
                record.paid_by.as_uuid().to_string(),
                record.paid_by_name.clone(),
                record.paid_to.as_uuid().to_string(),
                record.paid_to_name.clone(),
                format!("{:.2}", record.amount),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
