//! Stock overview aggregations.
//!
//! Every function here is pure over a snapshot's product slice. Nothing
//! caches and nothing is stored: the dashboard recomputes from the latest
//! snapshot on every call, so an overview can never drift from the
//! collection it was derived from.

use domain::Product;
use serde::Serialize;

/// One aggregation row: a display label and the units summed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelTotal {
    pub label: String,
    pub units: u64,
}

/// Headline figures for the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTotals {
    /// Distinct records in the collection.
    pub total_types: usize,

    /// Units on hand across all records.
    pub total_units: u64,

    /// Records strictly below their reorder threshold.
    pub low_stock_count: usize,
}

/// The full dashboard summary built in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOverview {
    pub by_category: Vec<LabelTotal>,
    pub by_gender: Vec<LabelTotal>,
    pub totals: StockTotals,
}

impl StockOverview {
    /// Builds the overview for a snapshot's collection.
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            by_category: units_by_category(products),
            by_gender: units_by_gender(products),
            totals: totals(products),
        }
    }
}

/// Sums quantities under each category display label.
///
/// Quantities are summed, never records counted: two records of 5 and 3
/// units yield one row of 8. Rows appear in first-occurrence order and
/// only for labels with at least one record. Unknown codes aggregate
/// under their own code.
pub fn units_by_category(products: &[Product]) -> Vec<LabelTotal> {
    sum_by(products, |p| p.category.label())
}

/// Sums quantities under each gender display label. Same rules as
/// [`units_by_category`].
pub fn units_by_gender(products: &[Product]) -> Vec<LabelTotal> {
    sum_by(products, |p| p.gender.label())
}

/// Headline totals for the collection.
pub fn totals(products: &[Product]) -> StockTotals {
    StockTotals {
        total_types: products.len(),
        total_units: products.iter().map(|p| u64::from(p.quantity)).sum(),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
    }
}

/// Linear scan so rows keep first-occurrence order; label sets are small.
fn sum_by<'a>(
    products: &'a [Product],
    label_of: impl Fn(&'a Product) -> &'a str,
) -> Vec<LabelTotal> {
    let mut rows: Vec<LabelTotal> = Vec::new();
    for product in products {
        let label = label_of(product);
        match rows.iter_mut().find(|row| row.label == label) {
            Some(row) => row.units += u64::from(product.quantity),
            None => rows.push(LabelTotal {
                label: label.to_string(),
                units: u64::from(product.quantity),
            }),
        }
    }
    rows
}
