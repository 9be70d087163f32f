use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{ExternalTransaction, Transaction, TransactionKind, TransferRecord};
use crate::types::BankLinkId;

/// Resolves the debit/credit direction of a transfer relative to the account
/// being viewed and produces a signed ledger row.
///
/// A record naming the reference link as sender is money leaving the account;
/// anything else is money entering it. A record naming the reference on
/// neither side violates the transfer store's invariants; it resolves
/// fail-open as a credit and is reported through logging, never raised.
pub fn normalize_transfer(transfer: &TransferRecord, reference: &BankLinkId) -> Transaction {
    let magnitude = transfer.amount.abs();
    let is_sender = transfer.sender_bank_id == *reference;

    if !is_sender && transfer.receiver_bank_id != *reference {
        warn!(
            transfer_id = %transfer.id,
            reference = %reference,
            "Transfer names neither sender nor receiver as the viewed account, treating as credit"
        );
    }

    let (amount, kind) = if is_sender {
        (-magnitude, TransactionKind::Debit)
    } else {
        (magnitude, TransactionKind::Credit)
    };

    Transaction {
        id: transfer.id.clone(),
        name: transfer.name.clone(),
        amount,
        kind,
        date: transfer.created_at,
        payment_channel: transfer.channel.clone(),
        category: transfer.category.clone(),
        pending: false,
        image: None
    }
}

/// Converts a synced provider transaction to the merged sign convention.
///
/// The provider reports outflows as positive amounts, so the sign flips:
/// provider-positive becomes a negative debit, provider-negative becomes a
/// positive credit.
pub fn normalize_external(external: &ExternalTransaction) -> Transaction {
    let (amount, kind) = if external.amount > Decimal::ZERO {
        (-external.amount, TransactionKind::Debit)
    } else {
        (external.amount.abs(), TransactionKind::Credit)
    };

    Transaction {
        id: external.id.clone(),
        name: external.name.clone(),
        amount,
        kind,
        date: external.date,
        payment_channel: external.payment_channel.clone(),
        category: external.category.clone(),
        pending: external.pending,
        image: external.image.clone()
    }
}
