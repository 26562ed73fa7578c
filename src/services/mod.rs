//! Service layer for splitledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, membership checks, and audit logging. The balance
//! service is the bridge between stored records and the ledger.

pub mod balance;
pub mod expense;
pub mod group;
pub mod member;
pub mod settlement;

pub use balance::{BalanceService, GroupSummary, MemberBalance, SettlementSuggestion};
pub use expense::{CreateExpenseInput, ExpenseService, SplitRequest};
pub use group::GroupService;
pub use member::MemberService;
pub use settlement::SettlementService;
