use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use super::{merge_transactions, normalize_external, normalize_transfer, paginate, total_pages};
use crate::models::{ExternalTransaction, Transaction, TransactionKind, TransferRecord};

fn create_transfer(id: &str, amount: &str, sender: &str, receiver: &str, created_at: DateTime<Utc>) -> Result<TransferRecord> {
    Ok(TransferRecord {
        id: id.to_string(),
        name: format!("Transfer {id}"),
        amount: Decimal::from_str(amount)?,
        created_at,
        channel: "online".to_string(),
        category: "Transfer".to_string(),
        sender_bank_id: sender.to_string(),
        receiver_bank_id: receiver.to_string()
    })
}

fn create_external(id: &str, amount: &str, date: DateTime<Utc>) -> Result<ExternalTransaction> {
    Ok(ExternalTransaction {
        id: id.to_string(),
        name: format!("External {id}"),
        payment_channel: "online".to_string(),
        account_id: "acc-1".to_string(),
        amount: Decimal::from_str(amount)?,
        pending: false,
        category: "Food and Drink".to_string(),
        date,
        image: None
    })
}

fn timestamp(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn sample_row(id: &str, date: DateTime<Utc>) -> Transaction {
    Transaction {
        id: id.to_string(),
        name: id.to_string(),
        amount: Decimal::ONE,
        kind: TransactionKind::Credit,
        date,
        payment_channel: "online".to_string(),
        category: "".to_string(),
        pending: false,
        image: None
    }
}

#[test]
fn test_transfer_from_sender_side_is_negative_debit() -> Result<()> {
    let transfer = create_transfer("t1", "15.00", "A", "B", timestamp(3, 0))?;
    let row = normalize_transfer(&transfer, &"A".to_string());

    assert_eq!(row.amount, Decimal::from_str("-15.00")?);
    assert_eq!(row.kind, TransactionKind::Debit);

    Ok(())
}

#[test]
fn test_transfer_from_receiver_side_is_positive_credit() -> Result<()> {
    let transfer = create_transfer("t1", "15.00", "A", "B", timestamp(3, 0))?;
    let row = normalize_transfer(&transfer, &"B".to_string());

    assert_eq!(row.amount, Decimal::from_str("15.00")?);
    assert_eq!(row.kind, TransactionKind::Credit);

    Ok(())
}

#[test]
fn test_transfer_referencing_neither_side_fails_open_as_credit() -> Result<()> {
    let transfer = create_transfer("t1", "15.00", "A", "B", timestamp(3, 0))?;
    let row = normalize_transfer(&transfer, &"C".to_string());

    assert_eq!(row.amount, Decimal::from_str("15.00")?);
    assert_eq!(row.kind, TransactionKind::Credit);

    Ok(())
}

#[test]
fn test_external_outflow_becomes_negative_debit() -> Result<()> {
    let external = create_external("e1", "20.00", timestamp(2, 0))?;
    let row = normalize_external(&external);

    assert_eq!(row.amount, Decimal::from_str("-20.00")?);
    assert_eq!(row.kind, TransactionKind::Debit);

    Ok(())
}

#[test]
fn test_external_inflow_becomes_positive_credit() -> Result<()> {
    let external = create_external("e2", "-500.00", timestamp(2, 0))?;
    let row = normalize_external(&external);

    assert_eq!(row.amount, Decimal::from_str("500.00")?);
    assert_eq!(row.kind, TransactionKind::Credit);

    Ok(())
}

#[test]
fn test_merge_preserves_every_row_and_sorts_descending() {
    let external = vec![sample_row("e1", timestamp(2, 0)), sample_row("e2", timestamp(5, 0))];
    let transfers = vec![sample_row("t1", timestamp(3, 0)), sample_row("t2", timestamp(1, 0))];

    let merged = merge_transactions(external, transfers);

    assert_eq!(merged.len(), 4);

    for pair in merged.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }

    let order: Vec<&str> = merged.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(order, vec!["e2", "t1", "e1", "t2"]);
}

#[test]
fn test_merge_breaks_timestamp_ties_deterministically() {
    let same_instant = timestamp(4, 12);
    let external = vec![sample_row("e1", same_instant)];
    let transfers = vec![sample_row("t1", same_instant)];

    let merged = merge_transactions(external, transfers);

    // Stable sort keeps source order: externals ahead of transfers.
    assert_eq!(merged[0].id, "e1");
    assert_eq!(merged[1].id, "t1");
}

#[test]
fn test_merge_with_one_empty_source_returns_other_sorted() {
    let transfers = vec![sample_row("t1", timestamp(1, 0)), sample_row("t2", timestamp(2, 0))];

    let merged = merge_transactions(Vec::new(), transfers);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].id, "t2");
}

#[test]
fn test_merge_keeps_duplicate_ids_from_different_sources() {
    let external = vec![sample_row("shared", timestamp(2, 0))];
    let transfers = vec![sample_row("shared", timestamp(1, 0))];

    assert_eq!(merge_transactions(external, transfers).len(), 2);
}

#[test]
fn test_merged_transfer_sorts_ahead_of_older_external() -> Result<()> {
    let external = vec![normalize_external(&create_external("e1", "20.00", timestamp(2, 0))?)];
    let transfer = create_transfer("t1", "15.00", "A", "B", timestamp(3, 0))?;
    let transfers = vec![normalize_transfer(&transfer, &"A".to_string())];

    let merged = merge_transactions(external, transfers);

    assert_eq!(merged[0].id, "t1");
    assert_eq!(merged[0].amount, Decimal::from_str("-15.00")?);
    assert_eq!(merged[0].kind, TransactionKind::Debit);
    assert_eq!(merged[1].id, "e1");
    assert_eq!(merged[1].amount, Decimal::from_str("-20.00")?);

    Ok(())
}

#[test]
fn test_pagination_covers_the_sequence_exactly_once() {
    let rows: Vec<Transaction> = (0..23).map(|i| sample_row(&format!("r{i}"), timestamp(1, 0))).collect();
    let pages = total_pages(rows.len());

    assert_eq!(pages, 3);

    let mut reassembled = Vec::new();
    for page in 1..=pages {
        reassembled.extend(paginate(&rows, page).iter().map(|row| row.id.clone()));
    }

    let original: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    assert_eq!(reassembled, original);
}

#[test]
fn test_page_zero_clamps_to_first_page() {
    let rows: Vec<Transaction> = (0..15).map(|i| sample_row(&format!("r{i}"), timestamp(1, 0))).collect();

    assert_eq!(paginate(&rows, 0), paginate(&rows, 1));
    assert_eq!(paginate(&rows, 1).len(), 10);
}

#[test]
fn test_page_beyond_range_is_empty() {
    let rows: Vec<Transaction> = (0..5).map(|i| sample_row(&format!("r{i}"), timestamp(1, 0))).collect();

    assert!(paginate(&rows, 2).is_empty());
    assert!(paginate(&rows, 99).is_empty());
}

#[test]
fn test_empty_sequence_still_reports_one_page() {
    let rows: Vec<Transaction> = Vec::new();

    assert_eq!(total_pages(0), 1);
    assert!(paginate(&rows, 1).is_empty());
}
