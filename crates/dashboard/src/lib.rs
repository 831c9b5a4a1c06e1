//! Dashboard aggregations for the nursery stock tracker.
//!
//! This crate is the read side of the data layer: pure functions that
//! reshape a store snapshot into what the dashboard renders.
//! - [`units_by_category`] / [`units_by_gender`] for the distribution rows
//! - [`totals`] for the headline figures
//! - [`StockOverview`] bundling all of it in one pass

pub mod overview;

pub use overview::{
    LabelTotal, StockOverview, StockTotals, totals, units_by_category, units_by_gender,
};
