mod account;
mod budget;
mod errors;
mod transaction;

use serde::{Deserialize, Serialize};

pub use account::{Account, AccountSnapshot, BankLink, Institution};
pub use budget::{BudgetCategory, BudgetTheme, CustomBudget};
pub use errors::{AggregationError, ProviderError};
pub use transaction::{ExternalTransaction, NewTransfer, RawTransaction, Transaction, TransferRecord};

/// Direction of a merged ledger row relative to the account being viewed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit
}
