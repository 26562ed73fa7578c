//! JSON export of a group's balance report
//!
//! The report mirrors the balances response of the web API this tool grew
//! out of: member balances plus suggested settlements with names resolved.
//! Amounts are plain JSON numbers rounded to cents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{GroupId, MemberId};
use crate::services::GroupSummary;

/// A group's balances and suggested settlements, ready to serialize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceReport {
    pub group_id: GroupId,
    pub group_name: String,
    pub generated_at: DateTime<Utc>,
    pub balances: Vec<BalanceRecord>,
    pub suggested_settlements: Vec<SettlementRecord>,
}

/// One member's balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub user_id: MemberId,
    pub user_name: String,
    pub profile_picture_url: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// One suggested transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub paid_by: MemberId,
    pub paid_by_name: String,
    pub paid_to: MemberId,
    pub paid_to_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl BalanceReport {
    /// Build a report from a computed group summary
    pub fn from_summary(summary: &GroupSummary) -> Self {
        let balances = summary
            .balances
            .iter()
            .map(|b| BalanceRecord {
                user_id: b.member.id,
                user_name: b.member.name.clone(),
                profile_picture_url: b.member.avatar_url.clone(),
                balance: b.balance.round_cents().as_decimal(),
            })
            .collect();

        let suggested_settlements = summary
            .suggestions
            .iter()
            .map(|s| SettlementRecord {
                paid_by: s.from.id,
                paid_by_name: s.from.name.clone(),
                paid_to: s.to.id,
                paid_to_name: s.to.name.clone(),
                amount: s.amount.round_cents().as_decimal(),
            })
            .collect();

        Self {
            group_id: summary.group.id,
            group_name: summary.group.name.clone(),
            generated_at: Utc::now(),
            balances,
            suggested_settlements,
        }
    }
}

/// Write a report as JSON
pub fn export_report_json<W: Write>(
    report: &BalanceReport,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)
    } else {
        serde_json::to_writer(&mut *writer, report)
    };
    result.map_err(|e| LedgerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
