//! Settle-up suggestions
//!
//! Greedy matching of the largest debt against the largest credit. This is
//! not guaranteed to produce the fewest possible transfers, but the output is
//! deterministic and every transfer moves as much money as one pair allows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::balance::Balances;
use super::tolerance::TOLERANCE;
use crate::models::{MemberId, Money};

/// A proposed payment from a debtor to a creditor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTransfer {
    /// Member who should pay
    pub from: MemberId,
    /// Member who should receive
    pub to: MemberId,
    /// Amount, rounded to cents
    pub amount: Money,
}

/// A member with an outstanding amount, always stored as a positive value
#[derive(Debug, Clone, Copy)]
struct Outstanding {
    member: MemberId,
    amount: Money,
}

/// Largest amount first; equal amounts by member id ascending
fn largest_first(a: &Outstanding, b: &Outstanding) -> Ordering {
    b.amount.cmp(&a.amount).then(a.member.cmp(&b.member))
}

fn insert_sorted(queue: &mut Vec<Outstanding>, entry: Outstanding) {
    let pos = queue.partition_point(|e| largest_first(e, &entry) == Ordering::Less);
    queue.insert(pos, entry);
}

/// Suggest transfers that bring every balance to within one cent of zero
///
/// Balances are rounded to cents first. Members within tolerance of zero are
/// left out. Each step pairs the current largest debtor with the current
/// largest creditor and moves the smaller of the two amounts; whoever still
/// has more than a cent outstanding goes back into the queue at their new
/// rank.
///
/// If the balances don't sum to zero, the side with the larger total keeps
/// an unmatched residue. That is logged and otherwise accepted.
pub fn suggest_settlements(balances: &Balances) -> Vec<SuggestedTransfer> {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for (member, balance) in balances.iter() {
        let balance = balance.round_cents();
        if balance < -TOLERANCE {
            debtors.push(Outstanding {
                member,
                amount: -balance,
            });
        } else if balance > TOLERANCE {
            creditors.push(Outstanding {
                member,
                amount: balance,
            });
        }
    }

    debtors.sort_by(largest_first);
    creditors.sort_by(largest_first);

    let mut transfers = Vec::new();

    while !debtors.is_empty() && !creditors.is_empty() {
        let debtor = debtors.remove(0);
        let creditor = creditors.remove(0);

        let amount = debtor.amount.min(creditor.amount);
        if amount > TOLERANCE {
            transfers.push(SuggestedTransfer {
                from: debtor.member,
                to: creditor.member,
                amount: amount.round_cents(),
            });
        }

        let owed = debtor.amount - amount;
        if owed > TOLERANCE {
            insert_sorted(
                &mut debtors,
                Outstanding {
                    member: debtor.member,
                    amount: owed,
                },
            );
        }

        let credit = creditor.amount - amount;
        if credit > TOLERANCE {
            insert_sorted(
                &mut creditors,
                Outstanding {
                    member: creditor.member,
                    amount: credit,
                },
            );
        }
    }

    let unmatched: Money = debtors.iter().chain(creditors.iter()).map(|e| e.amount).sum();
    if !unmatched.is_zero() {
        tracing::warn!(
            %unmatched,
            debtors = debtors.len(),
            creditors = creditors.len(),
            "balances do not net to zero; residue left unmatched"
        );
    }

    tracing::debug!(transfers = transfers.len(), "suggested settlements");

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn member(n: u128) -> MemberId {
        MemberId::from_uuid(Uuid::from_u128(n))
    }

    fn balances(entries: &[(u128, &str)]) -> Balances {
        entries
            .iter()
            .map(|(n, amount)| (member(*n), Money::parse(amount).unwrap()))
            .collect()
    }

    fn plan(transfers: &[SuggestedTransfer]) -> Vec<(u128, u128, i64)> {
        transfers
            .iter()
            .map(|t| {
                let cents = t.amount.cents().unwrap();
                (t.from.as_uuid().as_u128(), t.to.as_uuid().as_u128(), cents)
            })
            .collect()
    }

    #[rstest]
    #[case::one_creditor_two_equal_debtors(
        &[(1, "60"), (2, "-30"), (3, "-30")],
        vec![(2, 1, 3000), (3, 1, 3000)]
    )]
    #[case::after_partial_settlement(
        &[(1, "30"), (2, "0"), (3, "-30")],
        vec![(3, 1, 3000)]
    )]
    #[case::sub_cent_noise_rounded_away(
        &[(1, "10.004"), (2, "-10.004")],
        vec![(2, 1, 1000)]
    )]
    #[case::half_cent_balances_are_settled(
        &[(1, "0.005"), (2, "-0.005")],
        vec![]
    )]
    #[case::exactly_one_cent_is_settled(
        &[(1, "0.01"), (2, "-0.01")],
        vec![]
    )]
    #[case::everyone_even(
        &[(1, "0"), (2, "0")],
        vec![]
    )]
    #[case::largest_debt_pays_largest_credit_first(
        &[(1, "50"), (2, "20"), (3, "-40"), (4, "-30")],
        vec![(3, 1, 4000), (4, 2, 2000), (4, 1, 1000)]
    )]
    #[case::remaining_credit_is_reranked(
        &[(1, "50"), (2, "40"), (3, "-30"), (4, "-30"), (5, "-30")],
        vec![(3, 1, 3000), (4, 2, 3000), (5, 1, 2000), (5, 2, 1000)]
    )]
    #[case::equal_creditors_by_member_id(
        &[(7, "25"), (3, "25"), (5, "-50")],
        vec![(5, 3, 2500), (5, 7, 2500)]
    )]
    fn test_suggestions(#[case] input: &[(u128, &str)], #[case] expected: Vec<(u128, u128, i64)>) {
        let transfers = suggest_settlements(&balances(input));
        assert_eq!(plan(&transfers), expected);
    }

    #[test]
    fn test_inconsistent_balances_leave_residue_unmatched() {
        // Credits exceed debts by 20; the suggester matches what it can and stops.
        let input = balances(&[(1, "50"), (2, "-30")]);

        let transfers = suggest_settlements(&input);

        assert_eq!(plan(&transfers), vec![(2, 1, 3000)]);
        let paid: Money = transfers.iter().map(|t| t.amount).sum();
        assert_eq!(paid, Money::from_cents(3000));
    }

    #[test]
    fn test_only_debtors_yields_nothing() {
        let input = balances(&[(1, "-5"), (2, "-7")]);
        assert!(suggest_settlements(&input).is_empty());
    }

    #[test]
    fn test_amounts_are_rounded_and_above_tolerance() {
        let input = balances(&[(1, "33.335"), (2, "-16.665"), (3, "-16.67")]);

        let transfers = suggest_settlements(&input);

        assert!(transfers.iter().all(|t| t.amount > TOLERANCE));
        assert!(transfers.iter().all(|t| t.amount == t.amount.round_cents()));
        assert_eq!(plan(&transfers), vec![(2, 1, 1667), (3, 1, 1667)]);
    }
}
