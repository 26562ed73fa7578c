//! Balance service
//!
//! Answers "who owes whom" for one group: takes a storage snapshot, runs the
//! ledger over it, and resolves member ids back to member records for
//! display and export. Nothing is cached; every call recomputes.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{compute_balances, suggest_settlements};
use crate::models::{Group, GroupId, Member, MemberId, Money};
use crate::storage::Storage;

/// One member's net balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberBalance {
    pub member: Member,
    /// Positive when owed money, negative when owing
    pub balance: Money,
}

/// A suggested transfer with both parties resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementSuggestion {
    pub from: Member,
    pub to: Member,
    pub amount: Money,
}

/// Balances and settle-up suggestions for a group
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub group: Group,
    /// Every member in join order, zero balances included
    pub balances: Vec<MemberBalance>,
    /// Suggested transfers in the order they were matched
    pub suggestions: Vec<SettlementSuggestion>,
}

impl GroupSummary {
    /// True when no transfer is needed
    pub fn is_settled(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Service computing balances and settlements for groups
pub struct BalanceService<'a> {
    storage: &'a Storage,
}

impl<'a> BalanceService<'a> {
    /// Create a new balance service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Compute the balance sheet and suggested settlements of a group
    ///
    /// # Errors
    ///
    /// Fails with not-found for an unknown group, with an integrity error
    /// if any stored record references someone outside the group, and with
    /// an overflow error if stored amounts push a balance out of range.
    pub fn group_summary(&self, group_id: GroupId) -> LedgerResult<GroupSummary> {
        let snapshot = self.storage.group_snapshot(group_id)?;
        let group = snapshot.group;

        let balances =
            compute_balances(&group.member_ids, &snapshot.expenses, &snapshot.settlements)?;
        let transfers = suggest_settlements(&balances);

        let by_id: HashMap<MemberId, Member> =
            snapshot.members.into_iter().map(|m| (m.id, m)).collect();
        let resolve = |id: MemberId| -> LedgerResult<Member> {
            by_id
                .get(&id)
                .cloned()
                .ok_or_else(|| LedgerError::member_not_found(id.to_string()))
        };

        let member_balances = group
            .member_ids
            .iter()
            .map(|id| {
                Ok(MemberBalance {
                    member: resolve(*id)?,
                    balance: balances.get(*id).unwrap_or_default(),
                })
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        let suggestions = transfers
            .into_iter()
            .map(|t| {
                Ok(SettlementSuggestion {
                    from: resolve(t.from)?,
                    to: resolve(t.to)?,
                    amount: t.amount,
                })
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        tracing::debug!(
            group = %group.id,
            members = member_balances.len(),
            suggestions = suggestions.len(),
            "group summary ready"
        );

        Ok(GroupSummary {
            group,
            balances: member_balances,
            suggestions,
        })
    }
}
