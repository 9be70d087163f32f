//! Transaction aggregation and budget inference core for a personal-finance
//! application.
//!
//! Merges externally synced bank transactions with internally recorded peer
//! transfers into one correctly signed, date-descending ledger per linked
//! account, derives spending categories and limits from that ledger, and
//! aggregates account snapshots across a user's banks with per-branch fault
//! isolation.
//!
//! External collaborators (the bank-link store, the account-data provider,
//! the transfer store, and the institution directory) are consumed through
//! the traits in [`providers`]; this crate owns no wire protocol of its own.

pub mod aggregator;
pub mod budget;
pub mod ledger;
pub mod models;
pub mod providers;
pub mod types;

pub use aggregator::{AccountAggregator, AggregatedAccounts, AggregationOutcome, AggregatorConfig, BranchFailure, MergedAccount};
pub use budget::{BudgetConfig, BudgetEngine};
pub use models::{
    Account, AggregationError, BankLink, BudgetCategory, CustomBudget, ProviderError, Transaction, TransactionKind,
    TransferRecord
};
