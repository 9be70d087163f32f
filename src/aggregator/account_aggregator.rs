use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::ledger::{merge_transactions, normalize_external, normalize_transfer, paginate, total_pages};
use crate::models::{
    Account, AccountSnapshot, AggregationError, BankLink, ExternalTransaction, NewTransfer, ProviderError,
    Transaction, TransferRecord
};
use crate::providers::{BankLinkStore, InstitutionDirectory, TransactionProvider, TransactionSync, TransferStore};
use crate::types::{BankLinkId, ExternalAccountId, InstitutionId, UserId};

/// Explicit aggregator configuration; nothing is read from the environment.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Permit recording transfers whose sender link was saved without a
    /// funding source.
    pub allow_save_without_funding_source: bool,
    /// Require the receiving link to carry a funding source authorizing
    /// on-demand pulls before a transfer is recorded.
    pub require_on_demand_authorization: bool,
    /// Safety cap on cursor-sync pages fetched per account.
    pub max_sync_pages: usize,
    /// Optional deadline raced against each snapshot fetch. The losing fetch
    /// is abandoned, not cancelled; any side effects it had stand.
    pub snapshot_deadline: Option<Duration>
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            allow_save_without_funding_source: false,
            require_on_demand_authorization: true,
            max_sync_pages: 64,
            snapshot_deadline: None
        }
    }
}

/// Single-account view: the refreshed account plus one page of its merged
/// ledger.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedAccount {
    pub account: Account,
    pub transactions: Vec<Transaction>,
    pub total_pages: usize
}

/// Portfolio view across every bank that answered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedAccounts {
    pub accounts: Vec<Account>,
    pub total_banks: usize,
    pub total_current_balance: Decimal
}

/// One fan-out branch that failed. Observable through
/// [`AccountAggregator::get_aggregated_accounts_detailed`], never propagated.
#[derive(Debug)]
pub struct BranchFailure {
    pub bank_link_id: BankLinkId,
    pub reason: ProviderError
}

/// Fan-out outcome with the failed branches retained for observability
/// hooks; callers wanting only the portfolio use
/// [`AccountAggregator::get_aggregated_accounts`].
#[derive(Debug)]
pub struct AggregationOutcome {
    pub portfolio: AggregatedAccounts,
    pub failures: Vec<BranchFailure>
}

/// Orchestrates per-user aggregation across linked banks.
///
/// Holds no mutable state across requests; every call recomputes from the
/// two source-of-truth stores and the external provider.
pub struct AccountAggregator {
    links: Arc<dyn BankLinkStore>,
    provider: Arc<dyn TransactionProvider>,
    transfers: Arc<dyn TransferStore>,
    institutions: Arc<dyn InstitutionDirectory>,
    config: AggregatorConfig
}

impl AccountAggregator {
    pub fn new(
        links: Arc<dyn BankLinkStore>,
        provider: Arc<dyn TransactionProvider>,
        transfers: Arc<dyn TransferStore>,
        institutions: Arc<dyn InstitutionDirectory>,
        config: AggregatorConfig
    ) -> Self {
        Self {
            links,
            provider,
            transfers,
            institutions,
            config
        }
    }

    /// Fetches one linked account with the requested page of its merged
    /// ledger.
    ///
    /// The snapshot is load-bearing: its failure surfaces as
    /// [`AggregationError::UpstreamUnavailable`]. Everything else degrades:
    /// a failed transfer-store read or external sync contributes zero rows,
    /// and a failed institution lookup leaves the name unresolved.
    pub async fn get_merged_account(&self, bank_link_id: &BankLinkId, page: usize) -> Result<MergedAccount, AggregationError> {
        let link = self
            .links
            .get(bank_link_id)
            .await
            .map_err(|error| AggregationError::from_link_lookup(bank_link_id, error))?;

        // Snapshot and internal transfers race independently.
        let (snapshot, transfer_rows) = tokio::join!(
            self.fetch_snapshot(&link),
            self.transfers.list_by_bank_id(&link.id),
        );

        let snapshot = snapshot.map_err(|error| AggregationError::upstream_unavailable(&link.id, error))?;

        let transfer_rows = transfer_rows.unwrap_or_else(|error| {
            warn!(bank_link_id = %link.id, %error, "Transfer store read failed, continuing without internal transfers");
            Vec::new()
        });

        let external_rows = self.sync_external(&link).await;
        let institution_name = self.resolve_institution(&snapshot.institution_id).await;
        let account = Account::from_snapshot(snapshot, &link, institution_name);

        let external: Vec<Transaction> = external_rows.iter().map(normalize_external).collect();
        let transfers: Vec<Transaction> = transfer_rows
            .iter()
            .map(|transfer| normalize_transfer(transfer, &link.id))
            .collect();

        let merged = merge_transactions(external, transfers);
        let pages = total_pages(merged.len());
        let rows = paginate(&merged, page).to_vec();

        debug!(bank_link_id = %link.id, rows = merged.len(), page, "Merged account ledger assembled");

        Ok(MergedAccount {
            account,
            transactions: rows,
            total_pages: pages
        })
    }

    /// Portfolio totals across every bank that answered.
    pub async fn get_aggregated_accounts(&self, user_id: &UserId) -> Result<AggregatedAccounts, AggregationError> {
        Ok(self.get_aggregated_accounts_detailed(user_id).await?.portfolio)
    }

    /// Same aggregation, with the dropped branches exposed for observability.
    ///
    /// Per-bank fetches race with no ordering guarantee; a branch failure is
    /// caught at the branch boundary and drops only that bank. Totals are
    /// computed over the subset that succeeded.
    pub async fn get_aggregated_accounts_detailed(&self, user_id: &UserId) -> Result<AggregationOutcome, AggregationError> {
        let links = self
            .links
            .list_for_user(user_id)
            .await
            .map_err(|error| AggregationError::listing_failed(user_id, error))?;

        let branches = join_all(links.iter().map(|link| self.fetch_branch(link))).await;

        let mut accounts = Vec::new();
        let mut failures = Vec::new();

        for (link, outcome) in links.iter().zip(branches) {
            match outcome {
                Ok(account) => accounts.push(account),
                Err(reason) => {
                    warn!(bank_link_id = %link.id, %reason, "Dropping bank from aggregation after branch failure");
                    failures.push(BranchFailure {
                        bank_link_id: link.id.clone(),
                        reason
                    });
                }
            }
        }

        let total_banks = accounts.len();
        let total_current_balance = accounts.iter().map(|account| account.current_balance).sum();

        Ok(AggregationOutcome {
            portfolio: AggregatedAccounts {
                accounts,
                total_banks,
                total_current_balance
            },
            failures
        })
    }

    /// Records a peer transfer after checking funding-source authorization on
    /// both ends.
    ///
    /// The receiver is addressed by external account id (the decrypted
    /// shareable identifier), matching how transfers are initiated.
    pub async fn record_transfer(
        &self,
        name: &str,
        amount: Decimal,
        sender_bank_id: &BankLinkId,
        receiver_account_id: &ExternalAccountId
    ) -> Result<TransferRecord, AggregationError> {
        let (sender, receiver) = tokio::join!(
            self.links.get(sender_bank_id),
            self.links.get_by_account_id(receiver_account_id),
        );

        let sender = sender.map_err(|error| AggregationError::from_link_lookup(sender_bank_id, error))?;
        let receiver = receiver
            .map_err(|error| AggregationError::upstream_unavailable(sender_bank_id, error))?
            .ok_or_else(|| AggregationError::link_not_found(receiver_account_id))?;

        if sender.funding_source_url.is_empty() {
            if !self.config.allow_save_without_funding_source {
                return Err(AggregationError::missing_funding_source(&sender.id));
            }

            warn!(bank_link_id = %sender.id, "Recording transfer from a link without a funding source");
        }

        if self.config.require_on_demand_authorization && receiver.funding_source_url.is_empty() {
            return Err(AggregationError::missing_funding_source(&receiver.id));
        }

        let transfer = NewTransfer::peer(name, amount, sender.id.clone(), receiver.id.clone());

        self.transfers
            .create(transfer)
            .await
            .map_err(|error| AggregationError::TransferRejected { source: error })
    }

    async fn fetch_snapshot(&self, link: &BankLink) -> Result<AccountSnapshot, ProviderError> {
        let fetch = self.provider.get_account_snapshot(&link.access_token);

        match self.config.snapshot_deadline {
            Some(deadline) => match timeout(deadline, fetch).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::DeadlineElapsed {
                    millis: deadline.as_millis() as u64
                })
            },
            None => fetch.await
        }
    }

    /// One fan-out branch: snapshot plus institution metadata for one link.
    /// Failures stay at this boundary and become absence upstream.
    async fn fetch_branch(&self, link: &BankLink) -> Result<Account, ProviderError> {
        let snapshot = self.fetch_snapshot(link).await?;
        let institution_name = self.resolve_institution(&snapshot.institution_id).await;

        Ok(Account::from_snapshot(snapshot, link, institution_name))
    }

    /// External sync is fault-isolated from the snapshot: missing consent and
    /// provider failures both degrade to zero external rows.
    async fn sync_external(&self, link: &BankLink) -> Vec<ExternalTransaction> {
        let sync = TransactionSync::new(self.provider.as_ref(), &link.access_token, self.config.max_sync_pages);

        match sync.collect_all().await {
            Ok(rows) => rows,
            Err(error) if error.is_missing_consent() => {
                warn!(bank_link_id = %link.id, %error, "Transaction scope not granted, continuing with internal transfers only");
                Vec::new()
            }
            Err(error) => {
                warn!(bank_link_id = %link.id, %error, "Transaction sync failed, continuing with internal transfers only");
                Vec::new()
            }
        }
    }

    async fn resolve_institution(&self, institution_id: &InstitutionId) -> Option<String> {
        match self.institutions.get_institution(institution_id).await {
            Ok(institution) => Some(institution.name),
            Err(error) => {
                debug!(%institution_id, %error, "Institution lookup failed, leaving the name unresolved");
                None
            }
        }
    }
}
