//! Balance ledger and settle-up engine
//!
//! Pure functions over a snapshot of one group's activity:
//!
//! - `balance`: fold expenses and settlements into per-member net balances
//! - `suggest`: turn balances into a greedy list of suggested transfers
//! - `tolerance`: the one-cent threshold and rounding shared by both
//!
//! Nothing here reads storage or caches results; callers hand in a
//! consistent snapshot on every call.
//!
//! # Example
//!
//! ```
//! use splitledger::ledger::{compute_balances, suggest_settlements};
//! use splitledger::models::{Expense, GroupId, MemberId, Money, Split};
//!
//! let (a, b) = (MemberId::new(), MemberId::new());
//! let dinner = Expense::new(
//!     GroupId::new(),
//!     "Dinner",
//!     Money::from_cents(4000),
//!     a,
//!     vec![Split::new(a, Money::from_cents(2000)), Split::new(b, Money::from_cents(2000))],
//! );
//!
//! let balances = compute_balances(&[a, b], &[dinner], &[]).unwrap();
//! let transfers = suggest_settlements(&balances);
//! assert_eq!(transfers.len(), 1);
//! assert_eq!(transfers[0].from, b);
//! assert_eq!(transfers[0].amount, Money::from_cents(2000));
//! ```

pub mod balance;
pub mod suggest;
pub mod tolerance;

pub use balance::{compute_balances, Balances};
pub use suggest::{suggest_settlements, SuggestedTransfer};
pub use tolerance::{is_within_tolerance, round_cents, TOLERANCE};
