//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod group;
pub mod member;
pub mod settle;

pub use expense::{handle_expense_command, ExpenseCommands, SplitArg};
pub use export::{handle_balances_command, handle_export_command, OutputFormat};
pub use group::{handle_group_command, GroupCommands};
pub use member::{handle_member_command, MemberCommands};
pub use settle::{handle_settle_command, SettleCommands};
