mod sync;

use async_trait::async_trait;

use crate::models::{AccountSnapshot, BankLink, Institution, NewTransfer, ProviderError, RawTransaction, TransferRecord};
use crate::types::{BankLinkId, ExternalAccountId, InstitutionId, UserId};

pub use sync::TransactionSync;

/// One page of the provider's cursor-based incremental sync. Each page hands
/// back a continuation token instead of an offset.
#[derive(Debug, Clone)]
pub struct SyncPage {
    pub added: Vec<RawTransaction>,
    pub has_more: bool,
    pub next_cursor: Option<String>
}

/// Store of bank-link documents.
#[async_trait]
pub trait BankLinkStore: Send + Sync {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<BankLink>, ProviderError>;
    async fn get(&self, bank_link_id: &BankLinkId) -> Result<BankLink, ProviderError>;
    async fn get_by_account_id(&self, account_id: &ExternalAccountId) -> Result<Option<BankLink>, ProviderError>;
}

/// External account-data provider: balance snapshots plus the incremental
/// transaction sync protocol.
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn get_account_snapshot(&self, access_token: &str) -> Result<AccountSnapshot, ProviderError>;
    async fn sync_transactions(&self, access_token: &str, cursor: Option<&str>) -> Result<SyncPage, ProviderError>;
}

/// Store of internally recorded peer transfers.
#[async_trait]
pub trait TransferStore: Send + Sync {
    /// Every transfer naming the link as sender or receiver.
    async fn list_by_bank_id(&self, bank_link_id: &BankLinkId) -> Result<Vec<TransferRecord>, ProviderError>;
    /// Persists a new transfer; the store assigns id and creation timestamp.
    async fn create(&self, transfer: NewTransfer) -> Result<TransferRecord, ProviderError>;
}

/// Institution metadata directory.
#[async_trait]
pub trait InstitutionDirectory: Send + Sync {
    async fn get_institution(&self, institution_id: &InstitutionId) -> Result<Institution, ProviderError>;
}
