use crate::models::Transaction;

/// Combines the two normalized sources into one date-descending sequence.
///
/// The sort is stable and compares full timestamps, so rows carrying the same
/// instant keep their source order (externals ahead of transfers) and the
/// result is deterministic regardless of fetch completion order. Ids are not
/// deduplicated across sources; a synced transaction and a transfer sharing
/// an id are distinct ledger entries.
pub fn merge_transactions(external: Vec<Transaction>, transfers: Vec<Transaction>) -> Vec<Transaction> {
    let mut merged = external;
    merged.extend(transfers);
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}
