use thiserror::Error;

use crate::types::{BankLinkId, UserId};

/// Failures crossing a collaborator seam (bank-link store, account-data
/// provider, transfer store, institution directory).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {message}")]
    Unavailable {
        message: String
    },
    #[error("Additional consent required: {message}")]
    MissingConsent {
        message: String
    },
    #[error("Record not found: {message}")]
    NotFound {
        message: String
    },
    #[error("Deadline of {millis}ms elapsed before the provider answered")]
    DeadlineElapsed {
        millis: u64
    }
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into() }
    }

    pub fn missing_consent(message: impl Into<String>) -> Self {
        Self::MissingConsent { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn is_missing_consent(&self) -> bool {
        matches!(self, Self::MissingConsent { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failures the aggregator surfaces to its caller.
///
/// Per-branch fan-out failures never appear here; they are caught at the
/// branch boundary, logged, and converted to absence.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Bank link [{bank_link_id}] was not found")]
    LinkNotFound {
        bank_link_id: BankLinkId
    },
    #[error("Upstream fetch failed for bank link [{bank_link_id}]")]
    UpstreamUnavailable {
        bank_link_id: BankLinkId,
        #[source]
        source: ProviderError
    },
    #[error("Could not list bank links for user [{user_id}]")]
    ListingFailed {
        user_id: UserId,
        #[source]
        source: ProviderError
    },
    #[error("Bank link [{bank_link_id}] has no funding source")]
    MissingFundingSource {
        bank_link_id: BankLinkId
    },
    #[error("Transfer store rejected the record")]
    TransferRejected {
        #[source]
        source: ProviderError
    }
}

impl AggregationError {
    pub fn link_not_found(bank_link_id: &BankLinkId) -> Self {
        Self::LinkNotFound { bank_link_id: bank_link_id.clone() }
    }

    pub fn upstream_unavailable(bank_link_id: &BankLinkId, source: ProviderError) -> Self {
        Self::UpstreamUnavailable { bank_link_id: bank_link_id.clone(), source }
    }

    pub fn listing_failed(user_id: &UserId, source: ProviderError) -> Self {
        Self::ListingFailed { user_id: user_id.clone(), source }
    }

    pub fn missing_funding_source(bank_link_id: &BankLinkId) -> Self {
        Self::MissingFundingSource { bank_link_id: bank_link_id.clone() }
    }

    /// Maps a bank-link lookup failure: a missing document is reported as
    /// such, anything else means the store itself was unreachable.
    pub fn from_link_lookup(bank_link_id: &BankLinkId, source: ProviderError) -> Self {
        if source.is_not_found() {
            Self::link_not_found(bank_link_id)
        } else {
            Self::upstream_unavailable(bank_link_id, source)
        }
    }
}
