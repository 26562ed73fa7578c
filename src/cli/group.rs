//! Group CLI commands

use clap::Subcommand;

use crate::display::{format_group_details, format_group_list};
use crate::error::LedgerResult;
use crate::services::{GroupService, MemberService};
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a new group
    Create {
        /// Group name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all groups
    List,
    /// Show a group and its members
    Show {
        /// Group name or ID
        group: String,
    },
    /// Add existing members to a group
    AddMember {
        /// Group name or ID
        group: String,
        /// Member names or IDs
        #[arg(required = true)]
        members: Vec<String>,
    },
    /// Delete a group with all of its expenses and settlements
    Delete {
        /// Group name or ID
        group: String,
        /// Delete even if the group has expenses or settlements
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a group command
pub fn handle_group_command(storage: &Storage, cmd: GroupCommands) -> LedgerResult<()> {
    let service = GroupService::new(storage);

    match cmd {
        GroupCommands::Create { name, description } => {
            let group = service.create(&name, description.as_deref())?;
            println!("Created group: {}", group.name);
            println!("  ID: {}", group.id);
        }
        GroupCommands::List => {
            println!("{}", format_group_list(&service.list()?));
        }
        GroupCommands::Show { group } => {
            let group = service.require(&group)?;
            let members = service.members(&group)?;
            print!("{}", format_group_details(&group, &members));
        }
        GroupCommands::AddMember { group, members } => {
            let group = service.require(&group)?;
            let member_service = MemberService::new(storage);

            for identifier in members {
                let member = member_service.require(&identifier)?;
                service.add_member(group.id, &member)?;
                println!("Added {} to {}", member.name, group.name);
            }
        }
        GroupCommands::Delete { group, force } => {
            let group = service.require(&group)?;
            let removed = service.delete(group.id, force)?;
            println!("Deleted group: {}", removed.group.name);
            if !removed.expenses.is_empty() || !removed.settlements.is_empty() {
                println!(
                    "  Removed {} expenses and {} settlements",
                    removed.expenses.len(),
                    removed.settlements.len()
                );
            }
        }
    }

    Ok(())
}
