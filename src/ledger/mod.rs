mod merge;
mod normalize;
mod paginate;
#[cfg(test)]
mod tests;

pub use merge::merge_transactions;
pub use normalize::{normalize_external, normalize_transfer};
pub use paginate::{paginate, total_pages};
