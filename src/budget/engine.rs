use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::models::{BudgetCategory, BudgetTheme, CustomBudget, Transaction};

/// Provider category to budget category mapping. Anything unmapped lands in
/// the fallback bucket.
const CATEGORY_MAP: &[(&str, &str)] = &[
    ("Transfer", "Savings"),
    ("Food and Drink", "Food and booze"),
    ("Travel", "Travel"),
    ("Payment", "Subscriptions"),
    ("Processing", "Subscriptions")
];

/// Categories seeded at zero spend so the UI always has consistent defaults
/// to merge against, even when the ledger is empty.
const DEFAULT_CATEGORIES: &[&str] = &["Subscriptions", "Food and booze", "Savings"];

const FALLBACK_CATEGORY: &str = "Other";

/// Explicit tuning for budget inference; nothing is read from the
/// environment.
#[derive(Debug, Clone)]
pub struct BudgetConfig {
    /// Minimum ceiling assigned to any touched category, in whole currency
    /// units.
    pub floor: Decimal,
    /// Headroom multiplier applied to observed spend when deriving a ceiling.
    pub headroom: Decimal,
    /// Number of categories surfaced to the caller.
    pub top_limit: usize
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            floor: Decimal::from(50),
            headroom: Decimal::new(12, 1),
            top_limit: 3
        }
    }
}

/// Derives spending categories and limits from a merged ledger.
pub struct BudgetEngine {
    config: BudgetConfig
}

impl BudgetEngine {
    pub fn new(config: BudgetConfig) -> Self {
        Self { config }
    }

    /// Infers the top spending categories for the given ledger, most-used
    /// first.
    ///
    /// Accumulation runs on unrounded decimals; rounding to whole currency
    /// units happens once on the way out so per-row rounding error cannot
    /// compound. Categories rank by how often they were hit rather than by
    /// how much was spent, surfacing recurring habits ahead of one-off large
    /// purchases. Custom budgets go to the head of the list and win the cut;
    /// they carry no computed spend until transaction attribution exists.
    pub fn infer(&self, transactions: &[Transaction], custom: &[CustomBudget]) -> Vec<BudgetCategory> {
        let mut touched: Vec<(&str, Decimal, usize)> = DEFAULT_CATEGORIES
            .iter()
            .map(|name| (*name, Decimal::ZERO, 0))
            .collect();

        for transaction in transactions {
            let name = Self::budget_category(&transaction.category);
            let magnitude = transaction.amount.abs();

            match touched.iter_mut().find(|(existing, _, _)| *existing == name) {
                Some((_, spent, count)) => {
                    *spent += magnitude;
                    *count += 1;
                }
                None => touched.push((name, magnitude, 1))
            }
        }

        let mut derived: Vec<BudgetCategory> = touched
            .into_iter()
            .map(|(name, spent, count)| {
                let ceiling = (spent * self.config.headroom).max(self.config.floor);

                BudgetCategory {
                    name: name.to_string(),
                    spent: round_display(spent),
                    total: round_display(ceiling),
                    theme: BudgetTheme::for_category(name),
                    count
                }
            })
            .collect();

        // Stable sort: equal counts keep first-touch order.
        derived.sort_by(|a, b| b.count.cmp(&a.count));

        let mut budgets: Vec<BudgetCategory> = custom.iter().map(BudgetCategory::from_custom).collect();
        budgets.extend(derived);
        budgets.truncate(self.config.top_limit);

        debug!(rows = transactions.len(), surfaced = budgets.len(), "Inferred budget categories");

        budgets
    }

    fn budget_category(provider_category: &str) -> &'static str {
        CATEGORY_MAP
            .iter()
            .find(|(provider, _)| *provider == provider_category)
            .map(|(_, budget)| *budget)
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
