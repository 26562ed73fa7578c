//! Display formatting for terminal output
//!
//! Renders members, groups, activity, and balance sheets as `tabled`
//! tables. Amounts use the configured currency symbol.

pub mod activity;
pub mod balance;
pub mod group;

pub use activity::{format_expense_list, format_settlement_list};
pub use balance::format_group_summary;
pub use group::{format_group_details, format_group_list, format_member_list};

use std::collections::HashMap;

use crate::models::{Member, MemberId};

/// Member id to name lookup for tables that only carry ids
#[derive(Debug, Default)]
pub struct MemberNames(HashMap<MemberId, String>);

impl MemberNames {
    pub fn new(members: &[Member]) -> Self {
        Self(members.iter().map(|m| (m.id, m.name.clone())).collect())
    }

    /// Name of a member, or its short id if unknown
    pub fn name(&self, id: MemberId) -> String {
        self.0.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }
}
