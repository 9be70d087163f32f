mod engine;

pub use engine::{BudgetConfig, BudgetEngine};
