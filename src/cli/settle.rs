//! Settlement CLI commands

use clap::Subcommand;

use super::expense::member_names;
use crate::config::settings::Settings;
use crate::display::format_settlement_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;
use crate::services::{GroupService, MemberService, SettlementService};
use crate::storage::Storage;

/// Settlement subcommands
#[derive(Subcommand)]
pub enum SettleCommands {
    /// Record a payment between two members
    Record {
        /// Group name or ID
        group: String,
        /// Member who paid
        from: String,
        /// Member who received the money
        to: String,
        /// Amount paid
        amount: String,
    },
    /// List a group's recorded settlements
    List {
        /// Group name or ID
        group: String,
    },
    /// Delete a recorded settlement
    Delete {
        /// Group name or ID
        group: String,
        /// Settlement ID
        settlement: String,
    },
}

/// Handle a settlement command
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SettleCommands,
) -> LedgerResult<()> {
    let service = SettlementService::new(storage);
    let groups = GroupService::new(storage);

    match cmd {
        SettleCommands::Record {
            group,
            from,
            to,
            amount,
        } => {
            let group = groups.require(&group)?;
            let members = MemberService::new(storage);
            let from = members.require(&from)?;
            let to = members.require(&to)?;
            let amount =
                Money::parse(&amount).map_err(|e| LedgerError::Validation(e.to_string()))?;

            let settlement = service.record(group.id, from.id, to.id, amount)?;
            println!(
                "Recorded: {} paid {} {}",
                from.name,
                to.name,
                settlement.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  ID: {}", settlement.id);
        }
        SettleCommands::List { group } => {
            let group = groups.require(&group)?;
            let settlements = service.list_for_group(group.id)?;
            let names = member_names(&groups, &group)?;
            println!("{}", format_settlement_list(&settlements, &names, settings));
        }
        SettleCommands::Delete { group, settlement } => {
            let group = groups.require(&group)?;
            let found = service
                .find(group.id, &settlement)?
                .ok_or_else(|| LedgerError::settlement_not_found(&settlement))?;
            service.delete(found.id)?;
            println!("Deleted settlement {}", found.id);
        }
    }

    Ok(())
}
