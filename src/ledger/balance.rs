//! Balance calculation
//!
//! Folds a group's expenses and settlements into one net balance per member.
//!
//! Sign convention: a positive balance means the member is owed money, a
//! negative one means they owe. Paying (an expense or a settlement) raises
//! the payer's balance; owing a split or receiving a settlement lowers it.

use std::collections::btree_map::{self, BTreeMap};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, MemberId, Money, Settlement};

/// Net balance per member, ordered by member id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances(BTreeMap<MemberId, Money>);

impl Balances {
    /// Create an empty balance map
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance for a member, if they are part of the map
    pub fn get(&self, member_id: MemberId) -> Option<Money> {
        self.0.get(&member_id).copied()
    }

    /// Set a member's balance
    pub fn insert(&mut self, member_id: MemberId, balance: Money) {
        self.0.insert(member_id, balance);
    }

    /// Iterate `(member, balance)` pairs by member id
    pub fn iter(&self) -> impl Iterator<Item = (MemberId, Money)> + '_ {
        self.0.iter().map(|(id, balance)| (*id, *balance))
    }

    /// Number of members in the map
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the map has no members
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all balances; zero for any internally consistent ledger
    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    /// Add `delta` to a member's balance
    ///
    /// Fails with an integrity error for a member outside the map, and with
    /// an overflow error if the balance would leave `Decimal`'s range.
    fn apply(
        &mut self,
        member_id: MemberId,
        delta: Money,
        record: impl FnOnce() -> String,
    ) -> LedgerResult<()> {
        let Some(balance) = self.0.get_mut(&member_id) else {
            return Err(LedgerError::dangling_member(record(), member_id));
        };
        *balance = balance
            .checked_add(delta)
            .ok_or_else(|| LedgerError::balance_overflow(record(), member_id))?;
        Ok(())
    }
}

impl FromIterator<(MemberId, Money)> for Balances {
    fn from_iter<I: IntoIterator<Item = (MemberId, Money)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Balances {
    type Item = (MemberId, Money);
    type IntoIter = btree_map::IntoIter<MemberId, Money>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Compute every member's net balance from a snapshot of group activity
///
/// Every member starts at zero and appears in the result even without any
/// activity. Each expense credits its full amount to the payer and debits
/// each split from its member (the payer's own split nets out their share).
/// Each settlement credits the payer and debits the payee. Final balances
/// are rounded to cents.
///
/// # Errors
///
/// Returns [`LedgerError::Integrity`] if an expense payer, split member,
/// settlement payer, or settlement payee is not in `members`, and
/// [`LedgerError::Overflow`] if stored amounts push a balance out of range.
pub fn compute_balances(
    members: &[MemberId],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> LedgerResult<Balances> {
    let mut balances: Balances = members.iter().map(|id| (*id, Money::zero())).collect();

    for expense in expenses {
        balances.apply(expense.paid_by, expense.amount, || {
            format!("payer of expense {}", expense.id)
        })?;

        for split in &expense.splits {
            balances.apply(split.member_id, -split.amount, || {
                format!("split of expense {}", expense.id)
            })?;
        }
    }

    for settlement in settlements {
        balances.apply(settlement.paid_by, settlement.amount, || {
            format!("payer of settlement {}", settlement.id)
        })?;
        balances.apply(settlement.paid_to, -settlement.amount, || {
            format!("payee of settlement {}", settlement.id)
        })?;
    }

    let balances: Balances = balances
        .into_iter()
        .map(|(id, balance)| (id, balance.round_cents()))
        .collect();

    tracing::debug!(
        members = balances.len(),
        expenses = expenses.len(),
        settlements = settlements.len(),
        "computed group balances"
    );

    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroupId, Split};
    use uuid::Uuid;

    fn member(n: u128) -> MemberId {
        MemberId::from_uuid(Uuid::from_u128(n))
    }

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn expense(paid_by: MemberId, amount: &str, splits: &[(MemberId, &str)]) -> Expense {
        Expense::new(
            GroupId::new(),
            "test expense",
            money(amount),
            paid_by,
            splits
                .iter()
                .map(|(id, amt)| Split::new(*id, money(amt)))
                .collect(),
        )
    }

    fn settlement(paid_by: MemberId, paid_to: MemberId, amount: &str) -> Settlement {
        Settlement::new(GroupId::new(), paid_by, paid_to, money(amount))
    }

    #[test]
    fn test_even_three_way_split() {
        let (a, b, c) = (member(1), member(2), member(3));
        let expenses = [expense(a, "90", &[(a, "30"), (b, "30"), (c, "30")])];

        let balances = compute_balances(&[a, b, c], &expenses, &[]).unwrap();

        assert_eq!(balances.get(a), Some(money("60")));
        assert_eq!(balances.get(b), Some(money("-30")));
        assert_eq!(balances.get(c), Some(money("-30")));
    }

    #[test]
    fn test_settlement_raises_payer_and_lowers_payee() {
        let (a, b, c) = (member(1), member(2), member(3));
        let expenses = [expense(a, "90", &[(a, "30"), (b, "30"), (c, "30")])];
        let settlements = [settlement(b, a, "30")];

        let balances = compute_balances(&[a, b, c], &expenses, &settlements).unwrap();

        assert_eq!(balances.get(a), Some(money("30")));
        assert_eq!(balances.get(b), Some(Money::zero()));
        assert_eq!(balances.get(c), Some(money("-30")));
    }

    #[test]
    fn test_inactive_member_is_zero() {
        let (a, b, idle) = (member(1), member(2), member(9));
        let expenses = [expense(a, "10", &[(b, "10")])];

        let balances = compute_balances(&[a, b, idle], &expenses, &[]).unwrap();

        assert_eq!(balances.len(), 3);
        assert_eq!(balances.get(idle), Some(Money::zero()));
    }

    #[test]
    fn test_payer_not_in_split_list() {
        let (a, b) = (member(1), member(2));
        let expenses = [expense(a, "25", &[(b, "25")])];

        let balances = compute_balances(&[a, b], &expenses, &[]).unwrap();

        assert_eq!(balances.get(a), Some(money("25")));
        assert_eq!(balances.get(b), Some(money("-25")));
    }

    #[test]
    fn test_drifting_splits_rounded_to_cents() {
        let (a, b, c) = (member(1), member(2), member(3));
        let expenses = [expense(a, "100", &[(a, "33.333"), (b, "33.333"), (c, "33.333")])];

        let balances = compute_balances(&[a, b, c], &expenses, &[]).unwrap();

        assert_eq!(balances.get(a), Some(money("66.67")));
        assert_eq!(balances.get(b), Some(money("-33.33")));
        assert_eq!(balances.get(c), Some(money("-33.33")));
    }

    #[test]
    fn test_unknown_split_member_is_integrity_error() {
        let (a, b, stranger) = (member(1), member(2), member(7));
        let expenses = [expense(a, "20", &[(a, "10"), (stranger, "10")])];

        let err = compute_balances(&[a, b], &expenses, &[]).unwrap_err();

        assert!(err.is_integrity());
        assert!(matches!(err, LedgerError::Integrity { member_id, .. } if member_id == stranger));
    }

    #[test]
    fn test_unknown_payer_is_integrity_error() {
        let (a, stranger) = (member(1), member(7));
        let expenses = [expense(stranger, "20", &[(a, "20")])];

        let err = compute_balances(&[a], &expenses, &[]).unwrap_err();
        assert!(err.is_integrity());
    }

    #[test]
    fn test_unknown_settlement_party_is_integrity_error() {
        let (a, b, stranger) = (member(1), member(2), member(7));

        let err = compute_balances(&[a, b], &[], &[settlement(a, stranger, "5")]).unwrap_err();
        assert!(matches!(err, LedgerError::Integrity { member_id, .. } if member_id == stranger));

        let err = compute_balances(&[a, b], &[], &[settlement(stranger, b, "5")]).unwrap_err();
        assert!(matches!(err, LedgerError::Integrity { member_id, .. } if member_id == stranger));
    }

    #[test]
    fn test_overflowing_balance_is_an_error() {
        let (a, b) = (member(1), member(2));
        let huge = Money::from_decimal(rust_decimal::Decimal::from_i128_with_scale(
            5 * 10_i128.pow(28),
            0,
        ));
        let expenses = [
            Expense::new(GroupId::new(), "first", huge, a, vec![Split::new(b, huge)]),
            Expense::new(GroupId::new(), "second", huge, a, vec![Split::new(b, huge)]),
        ];

        let err = compute_balances(&[a, b], &expenses, &[]).unwrap_err();

        assert!(matches!(err, LedgerError::Overflow { member_id, .. } if member_id == a));
    }

    #[test]
    fn test_same_snapshot_same_balances() {
        let (a, b, c) = (member(1), member(2), member(3));
        let expenses = [
            expense(a, "90", &[(a, "30"), (b, "30"), (c, "30")]),
            expense(b, "12.50", &[(c, "12.50")]),
        ];
        let settlements = [settlement(c, a, "10")];

        let first = compute_balances(&[a, b, c], &expenses, &settlements).unwrap();
        let second = compute_balances(&[a, b, c], &expenses, &settlements).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.total(), Money::zero());
    }
}
