use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BankLinkId, ExternalAccountId, InstitutionId, UserId};

/// Internal record associating a user with one linked external account and
/// the credentials needed to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankLink {
    pub id: BankLinkId,
    pub user_id: UserId,
    /// External account this link was established for.
    pub account_id: ExternalAccountId,
    /// Provider access token scoped to this link.
    pub access_token: String,
    /// Payments-provider funding source authorizing transfers. Empty when the
    /// link was saved without one.
    pub funding_source_url: String,
    /// Encrypted external account id used for transfer addressing.
    pub shareable_id: String
}

/// Point-in-time account data as returned by the external provider.
///
/// Balance fields are refreshed on every read and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub account_id: ExternalAccountId,
    pub available_balance: Decimal,
    pub current_balance: Decimal,
    pub institution_id: InstitutionId,
    pub name: String,
    pub official_name: Option<String>,
    pub mask: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub subtype: String
}

/// Institution metadata resolved through the provider's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub institution_id: InstitutionId,
    pub name: String
}

/// One linked bank account as surfaced to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: ExternalAccountId,
    pub available_balance: Decimal,
    pub current_balance: Decimal,
    pub institution_id: InstitutionId,
    /// Display name from the institution directory; `None` when the lookup
    /// failed or was skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    pub name: String,
    pub official_name: Option<String>,
    pub mask: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub subtype: String,
    /// Ties the account back to its bank-link document.
    pub bank_link_id: BankLinkId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable_id: Option<String>
}

impl Account {
    /// Builds the caller-facing view from a provider snapshot and the link it
    /// was fetched through.
    pub fn from_snapshot(snapshot: AccountSnapshot, link: &BankLink, institution_name: Option<String>) -> Self {
        Self {
            id: snapshot.account_id,
            available_balance: snapshot.available_balance,
            current_balance: snapshot.current_balance,
            institution_id: snapshot.institution_id,
            institution_name,
            name: snapshot.name,
            official_name: snapshot.official_name,
            mask: snapshot.mask,
            account_type: snapshot.account_type,
            subtype: snapshot.subtype,
            bank_link_id: link.id.clone(),
            shareable_id: Some(link.shareable_id.clone())
        }
    }
}
