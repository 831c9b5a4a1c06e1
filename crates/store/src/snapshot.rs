use domain::Product;
use serde::Serialize;

/// An immutable view of the whole store at one instant.
///
/// Snapshots are what consumers render and what the dashboard aggregates
/// over. `revision` increases on every commit, including the transition
/// into the pending phase, so equal revisions mean identical snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// The full collection, in insertion order.
    pub products: Vec<Product>,

    /// True while a mutating or fetching operation is in flight.
    pub loading: bool,

    /// Message of the most recent failed operation. Cleared when a new
    /// attempt begins and on the next success.
    pub error: Option<String>,

    /// Commit counter.
    pub revision: u64,
}
