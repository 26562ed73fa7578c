//! Expense and settlement display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::MemberNames;
use crate::config::settings::Settings;
use crate::models::{Expense, Settlement};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Paid by")]
    paid_by: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Split")]
    split: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct SettlementRow {
    #[tabled(rename = "Recorded")]
    recorded: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format a group's expenses, one row per expense with its split inline
pub fn format_expense_list(
    expenses: &[Expense],
    names: &MemberNames,
    settings: &Settings,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let symbol = settings.currency_symbol.as_str();
    let rows = expenses.iter().map(|e| ExpenseRow {
        date: e.date.format(&settings.date_format).to_string(),
        description: e.description.clone(),
        paid_by: names.name(e.paid_by),
        amount: e.amount.format_with_symbol(symbol),
        split: e
            .splits
            .iter()
            .map(|s| format!("{} {}", names.name(s.member_id), s.amount.format_with_symbol(symbol)))
            .collect::<Vec<_>>()
            .join(", "),
        id: e.id.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.modify(Columns::single(3), Alignment::right());
    table.to_string()
}

/// Format a group's recorded settlements
pub fn format_settlement_list(
    settlements: &[Settlement],
    names: &MemberNames,
    settings: &Settings,
) -> String {
    if settlements.is_empty() {
        return "No settlements recorded.".to_string();
    }

    let rows = settlements.iter().map(|s| SettlementRow {
        recorded: s.created_at.format(&settings.date_format).to_string(),
        from: names.name(s.paid_by),
        to: names.name(s.paid_to),
        amount: s.amount.format_with_symbol(&settings.currency_symbol),
        id: s.id.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.modify(Columns::single(3), Alignment::right());
    table.to_string()
}
