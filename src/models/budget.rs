use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Icon and color pairing used when rendering a category in the sidebar.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BudgetTheme {
    pub icon: String,
    pub color: String
}

const THEMES: &[(&str, &str, &str)] = &[
    ("Subscriptions", "/icons/monitor.svg", "bg-blue-500"),
    ("Food and booze", "/icons/shopping-bag.svg", "bg-pink-500"),
    ("Savings", "/icons/coins.svg", "bg-green-500"),
    ("Travel", "/icons/plane.svg", "bg-purple-500")
];

const FALLBACK_ICON: &str = "/icons/dollar-circle.svg";
const FALLBACK_COLOR: &str = "bg-gray-500";

impl BudgetTheme {
    /// Looks up the fixed theme for a category name; anything unmapped gets
    /// the fallback theme.
    pub fn for_category(name: &str) -> Self {
        THEMES
            .iter()
            .find(|(category, _, _)| *category == name)
            .map(|(_, icon, color)| Self { icon: (*icon).to_string(), color: (*color).to_string() })
            .unwrap_or_else(|| Self { icon: FALLBACK_ICON.to_string(), color: FALLBACK_COLOR.to_string() })
    }
}

/// One derived spending category.
///
/// Ephemeral: recomputed from the merged ledger on every request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub name: String,
    /// Sum of absolute amounts of matched rows, rounded for display.
    pub spent: Decimal,
    /// Derived ceiling; at least the configured floor and at least spend plus
    /// headroom.
    pub total: Decimal,
    #[serde(flatten)]
    pub theme: BudgetTheme,
    /// How many rows matched; drives the ranking.
    pub count: usize
}

/// User-created budget with a chosen target.
///
/// Display-only until transaction attribution exists, so it carries no
/// computed spend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBudget {
    pub name: String,
    pub target: Decimal,
    pub note: Option<String>
}

impl BudgetCategory {
    pub fn from_custom(custom: &CustomBudget) -> Self {
        Self {
            name: custom.name.clone(),
            spent: Decimal::ZERO,
            total: custom.target,
            theme: BudgetTheme::for_category(&custom.name),
            count: 0
        }
    }
}
