mod account_aggregator;

pub use account_aggregator::{
    AccountAggregator, AggregatedAccounts, AggregationOutcome, AggregatorConfig, BranchFailure, MergedAccount
};
