//! Balance sheet display formatting
//!
//! Shows every member's net position and the transfers that would settle
//! the group.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::services::GroupSummary;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a group's balances followed by the suggested settlements
pub fn format_group_summary(summary: &GroupSummary, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = format!("Balances for {}\n\n", summary.group.name);

    if summary.balances.is_empty() {
        output.push_str("This group has no members yet.\n");
        return output;
    }

    let rows = summary.balances.iter().map(|b| BalanceRow {
        member: b.member.name.clone(),
        balance: b.balance.format_with_symbol(symbol),
        status: if b.balance.is_positive() {
            "is owed"
        } else if b.balance.is_negative() {
            "owes"
        } else {
            "settled"
        },
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.modify(Columns::single(1), Alignment::right());
    output.push_str(&table.to_string());
    output.push_str("\n\n");

    if summary.is_settled() {
        output.push_str("All settled up.\n");
        return output;
    }

    output.push_str("Suggested settlements\n\n");
    let rows = summary.suggestions.iter().map(|s| SuggestionRow {
        from: s.from.name.clone(),
        to: s.to.name.clone(),
        amount: s.amount.format_with_symbol(symbol),
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.modify(Columns::single(2), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');

    output
}
