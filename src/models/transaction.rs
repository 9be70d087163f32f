use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TransactionKind;
use crate::types::{BankLinkId, ExternalAccountId};

/// One entry from the provider's incremental transaction sync.
///
/// Amounts follow the provider sign convention: positive = debit/outflow.
/// The category list is the provider's full hierarchy; only the first entry
/// survives projection into [`ExternalTransaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransaction {
    pub transaction_id: String,
    pub name: String,
    pub payment_channel: String,
    pub account_id: ExternalAccountId,
    pub amount: Decimal,
    pub pending: bool,
    #[serde(default)]
    pub category: Vec<String>,
    pub date: DateTime<Utc>,
    pub logo_url: Option<String>
}

/// Crate-side projection of a synced provider transaction, still carrying the
/// provider's sign convention.
#[derive(Debug, Clone)]
pub struct ExternalTransaction {
    pub id: String,
    pub name: String,
    pub payment_channel: String,
    pub account_id: ExternalAccountId,
    pub amount: Decimal,
    pub pending: bool,
    pub category: String,
    pub date: DateTime<Utc>,
    pub image: Option<String>
}

impl From<RawTransaction> for ExternalTransaction {
    fn from(raw: RawTransaction) -> Self {
        Self {
            id: raw.transaction_id,
            name: raw.name,
            payment_channel: raw.payment_channel,
            account_id: raw.account_id,
            amount: raw.amount,
            pending: raw.pending,
            category: raw.category.into_iter().next().unwrap_or_default(),
            date: raw.date,
            image: raw.logo_url
        }
    }
}

/// Internally recorded peer transfer.
///
/// `amount` is stored as a positive magnitude; the debit/credit direction is
/// derived from the sender/receiver link ids at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub channel: String,
    pub category: String,
    pub sender_bank_id: BankLinkId,
    pub receiver_bank_id: BankLinkId
}

/// Fields supplied by the caller when recording a transfer; the store assigns
/// the id and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub name: String,
    pub amount: Decimal,
    pub channel: String,
    pub category: String,
    pub sender_bank_id: BankLinkId,
    pub receiver_bank_id: BankLinkId
}

impl NewTransfer {
    pub const DEFAULT_CHANNEL: &'static str = "online";
    pub const DEFAULT_CATEGORY: &'static str = "Transfer";

    /// A peer transfer with the standard channel and category. The amount is
    /// stored as a positive magnitude regardless of the sign passed in.
    pub fn peer(name: impl Into<String>, amount: Decimal, sender_bank_id: BankLinkId, receiver_bank_id: BankLinkId) -> Self {
        Self {
            name: name.into(),
            amount: amount.abs(),
            channel: Self::DEFAULT_CHANNEL.to_string(),
            category: Self::DEFAULT_CATEGORY.to_string(),
            sender_bank_id,
            receiver_bank_id
        }
    }
}

/// Unified ledger row produced at the merge boundary.
///
/// Sign invariant: negative amounts are money leaving the reference account,
/// positive amounts are money entering it, and `kind` always agrees with the
/// sign. No raw source shape flows past this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: DateTime<Utc>,
    pub payment_channel: String,
    pub category: String,
    pub pending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>
}
