//! Expense CLI commands
//!
//! `expense add` turns `--split`, `--among`, and `--shares` into a split
//! request; the service does the arithmetic and the checks.

use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::config::settings::Settings;
use crate::display::{format_expense_list, MemberNames};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Group, MemberId, Money, Split, SplitMode};
use crate::services::{
    CreateExpenseInput, ExpenseService, GroupService, MemberService, SplitRequest,
};
use crate::storage::Storage;

/// How to divide an expense
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SplitArg {
    /// Evenly between --among (default: everyone in the group)
    Equal,
    /// By percentage, given with --shares name=percent
    Percentage,
    /// Exact amounts, given with --shares name=amount
    Custom,
}

impl From<SplitArg> for SplitMode {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Equal => SplitMode::Equal,
            SplitArg::Percentage => SplitMode::Percentage,
            SplitArg::Custom => SplitMode::Custom,
        }
    }
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense to a group
    Add {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "42.50")
        amount: String,
        /// Member who paid
        #[arg(short, long)]
        paid_by: String,
        /// How to split the amount
        #[arg(short, long, value_enum, default_value = "equal")]
        split: SplitArg,
        /// Members sharing an equal split
        #[arg(long, value_delimiter = ',')]
        among: Vec<String>,
        /// Per-member shares for percentage or custom splits (name=value)
        #[arg(long, value_delimiter = ',')]
        shares: Vec<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List a group's expenses
    List {
        /// Group name or ID
        group: String,
    },
    /// Delete an expense and its splits
    Delete {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let groups = GroupService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            group,
            description,
            amount,
            paid_by,
            split,
            among,
            shares,
            date,
        } => {
            let group = groups.require(&group)?;
            let members = MemberService::new(storage);

            let amount = Money::parse(&amount)
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            let paid_by = members.require(&paid_by)?.id;
            let date = date.as_deref().map(parse_date).transpose()?;

            let split = match SplitMode::from(split) {
                SplitMode::Equal => {
                    let ids = if among.is_empty() {
                        group.member_ids.clone()
                    } else {
                        among
                            .iter()
                            .map(|name| members.require(name).map(|m| m.id))
                            .collect::<LedgerResult<Vec<_>>>()?
                    };
                    SplitRequest::Equal(ids)
                }
                SplitMode::Percentage => {
                    let percentages = resolve_shares(&members, &shares, |value| {
                        Decimal::from_str(value.trim_end_matches('%')).ok()
                    })?;
                    SplitRequest::Percentage(percentages)
                }
                SplitMode::Custom => {
                    let amounts =
                        resolve_shares(&members, &shares, |value| Money::parse(value).ok())?;
                    SplitRequest::Custom(
                        amounts
                            .into_iter()
                            .map(|(id, amount)| Split::new(id, amount))
                            .collect(),
                    )
                }
            };

            let expense = service.create(CreateExpenseInput {
                group_id: group.id,
                description,
                amount,
                paid_by,
                split,
                date,
            })?;

            println!(
                "Added expense: {} {}",
                expense.description,
                expense.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  ID: {}", expense.id);
        }
        ExpenseCommands::List { group } => {
            let group = groups.require(&group)?;
            let expenses = service.list_for_group(group.id)?;
            let names = member_names(&groups, &group)?;
            println!("{}", format_expense_list(&expenses, &names, settings));
        }
        ExpenseCommands::Delete { group, expense } => {
            let group = groups.require(&group)?;
            let found = service
                .find(group.id, &expense)?
                .ok_or_else(|| LedgerError::expense_not_found(&expense))?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense: {}", deleted.description);
        }
    }

    Ok(())
}

pub(crate) fn member_names(groups: &GroupService<'_>, group: &Group) -> LedgerResult<MemberNames> {
    Ok(MemberNames::new(&groups.members(group)?))
}

pub(crate) fn parse_date(value: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| {
            LedgerError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value))
        })
}

/// Split `name=value` pairs, keeping their order
fn parse_shares(shares: &[String]) -> LedgerResult<Vec<(&str, &str)>> {
    shares
        .iter()
        .map(|share| {
            share
                .split_once('=')
                .map(|(name, value)| (name.trim(), value.trim()))
                .filter(|(name, value)| !name.is_empty() && !value.is_empty())
                .ok_or_else(|| {
                    LedgerError::Validation(format!(
                        "Invalid share '{}', expected name=value",
                        share
                    ))
                })
        })
        .collect()
}

fn resolve_shares<T>(
    members: &MemberService<'_>,
    shares: &[String],
    parse_value: impl Fn(&str) -> Option<T>,
) -> LedgerResult<Vec<(MemberId, T)>> {
    if shares.is_empty() {
        return Err(LedgerError::Validation(
            "This split needs --shares name=value,...".into(),
        ));
    }

    parse_shares(shares)?
        .into_iter()
        .map(|(name, value)| {
            let member = members.require(name)?;
            let value = parse_value(value).ok_or_else(|| {
                LedgerError::Validation(format!("Invalid share value '{}' for {}", value, name))
            })?;
            Ok((member.id, value))
        })
        .collect()
}
