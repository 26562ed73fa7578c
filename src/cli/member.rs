//! Member CLI commands

use clap::Subcommand;

use crate::display::format_member_list;
use crate::error::LedgerResult;
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a new member
    Add {
        /// Member name
        name: String,
        /// Profile picture URL
        #[arg(long)]
        avatar: Option<String>,
    },
    /// List all members
    List,
}

/// Handle a member command
pub fn handle_member_command(storage: &Storage, cmd: MemberCommands) -> LedgerResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { name, avatar } => {
            let member = service.create(&name, avatar.as_deref())?;
            println!("Added member: {}", member.name);
            println!("  ID: {}", member.id);
        }
        MemberCommands::List => {
            println!("{}", format_member_list(&service.list()?));
        }
    }

    Ok(())
}
