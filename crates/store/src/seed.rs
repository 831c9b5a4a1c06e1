//! Seed sources: where `load()` gets the catalog from.
//!
//! The store never talks to a real backend. A [`SeedSource`] stands in for
//! one and can be swapped for any data source (literal fixture, JSON file
//! content, a remote call) without changing the store contract. Sources
//! supply drafts; the store assigns ids and timestamps when it materializes
//! them.

use async_trait::async_trait;
use domain::{Category, Gender, ProductDraft};
use thiserror::Error;

/// Errors raised by a seed source.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The source could not be reached or refused to answer.
    #[error("{0}")]
    Unavailable(String),

    /// The source answered with data that does not parse as a catalog.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Supplies the initial product list consumed by `load()`.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetches the catalog as drafts.
    async fn fetch(&self) -> Result<Vec<ProductDraft>, SeedError>;
}

/// Seed source backed by a literal list of drafts.
#[derive(Debug, Clone, Default)]
pub struct FixtureSeed {
    drafts: Vec<ProductDraft>,
}

impl FixtureSeed {
    /// Creates a fixture seed from the given drafts.
    pub fn new(drafts: Vec<ProductDraft>) -> Self {
        Self { drafts }
    }

    /// A fixture with no products.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeedSource for FixtureSeed {
    async fn fetch(&self) -> Result<Vec<ProductDraft>, SeedError> {
        Ok(self.drafts.clone())
    }
}

/// Seed source that parses a JSON array of drafts (camelCase keys).
#[derive(Debug, Clone)]
pub struct JsonSeed {
    json: String,
}

impl JsonSeed {
    /// Creates a seed from raw JSON text.
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[async_trait]
impl SeedSource for JsonSeed {
    async fn fetch(&self) -> Result<Vec<ProductDraft>, SeedError> {
        let drafts = serde_json::from_str(&self.json)?;
        Ok(drafts)
    }
}

/// The built-in five-product starter catalog.
pub fn starter_catalog() -> FixtureSeed {
    FixtureSeed::new(vec![
        ProductDraft::new(
            "Body de algodão",
            Category::Clothes0To3,
            Gender::Unisex,
            15,
            10,
        ),
        ProductDraft::new(
            "Macacão manga longa",
            Category::Clothes0To3,
            Gender::Masculine,
            8,
            10,
        ),
        ProductDraft::new(
            "Macacão manga longa",
            Category::Clothes0To3,
            Gender::Feminine,
            12,
            10,
        ),
        ProductDraft::new(
            "Fraldas descartáveis P",
            Category::Hygiene,
            Gender::Unisex,
            5,
            20,
        ),
        ProductDraft::new(
            "Toalha com capuz",
            Category::Utilities,
            Gender::Unisex,
            18,
            10,
        ),
    ])
}
