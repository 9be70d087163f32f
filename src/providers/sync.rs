use tracing::{debug, warn};

use crate::models::{ExternalTransaction, ProviderError};
use crate::providers::TransactionProvider;

/// Lazy page source over the provider's cursor-based sync protocol.
///
/// Pages are produced on demand: each call requests one page, keeps the
/// provider's `added` rows, and advances the cursor. The source is exhausted
/// once the provider reports no more pages or the safety cap is reached. A
/// consumed source is not restartable mid-sync; a fresh one resumes from the
/// provider's last checkpoint.
pub struct TransactionSync<'a> {
    provider: &'a dyn TransactionProvider,
    access_token: &'a str,
    cursor: Option<String>,
    pages_fetched: usize,
    max_pages: usize,
    exhausted: bool
}

impl<'a> TransactionSync<'a> {
    pub fn new(provider: &'a dyn TransactionProvider, access_token: &'a str, max_pages: usize) -> Self {
        Self {
            provider,
            access_token,
            cursor: None,
            pages_fetched: 0,
            max_pages,
            exhausted: false
        }
    }

    /// Fetches the next page of transactions, or `None` once the source is
    /// exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<ExternalTransaction>>, ProviderError> {
        if self.exhausted {
            return Ok(None);
        }

        if self.pages_fetched >= self.max_pages {
            // A provider that never clears has_more would otherwise hang the request.
            warn!(max_pages = self.max_pages, "Transaction sync stopped at the page cap with pages still pending");
            self.exhausted = true;
            return Ok(None);
        }

        let page = self.provider.sync_transactions(self.access_token, self.cursor.as_deref()).await?;

        self.pages_fetched += 1;
        self.cursor = page.next_cursor;
        self.exhausted = !page.has_more;

        debug!(page = self.pages_fetched, rows = page.added.len(), "Fetched transaction sync page");

        Ok(Some(page.added.into_iter().map(ExternalTransaction::from).collect()))
    }

    /// Drains the source into a single list.
    pub async fn collect_all(mut self) -> Result<Vec<ExternalTransaction>, ProviderError> {
        let mut transactions = Vec::new();

        while let Some(page) = self.next_page().await? {
            transactions.extend(page);
        }

        Ok(transactions)
    }
}
