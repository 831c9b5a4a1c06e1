//! The product record and its create/update payloads.

use chrono::{DateTime, NaiveDate, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::DomainError;
use crate::gender::Gender;

/// One stock-keeping unit of the nursery inventory.
///
/// Records are created, merged, and removed only by the store; `id` and
/// `created_at` are assigned once and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier, immutable for the record's lifetime.
    pub id: ProductId,

    /// Non-empty display name.
    pub name: String,

    /// Age-range or purpose bucket.
    pub category: Category,

    /// Intended gender.
    pub gender: Gender,

    /// Current on-hand count.
    pub quantity: u32,

    /// Reorder threshold.
    pub minimum_stock: u32,

    /// Expiry date; `None` means not perishable / not tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,

    /// Set once at creation.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful mutation; equals `created_at` until
    /// the first update.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Materializes a draft into a full record.
    ///
    /// Both timestamps are set to `at` and stay equal until the first
    /// successful update.
    pub fn from_draft(id: ProductId, draft: ProductDraft, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            gender: draft.gender,
            quantity: draft.quantity,
            minimum_stock: draft.minimum_stock,
            expiration_date: draft.expiration_date,
            created_at: at,
            updated_at: at,
        }
    }

    /// True if the on-hand count has fallen strictly below the reorder
    /// threshold. A product sitting exactly at its minimum is not low
    /// stock.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.minimum_stock
    }

    /// Merges the fields present in `patch` onto this record.
    ///
    /// The id and creation timestamp are not part of a patch and cannot
    /// change here; `updated_at` is stamped by the store when the merge
    /// commits.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(minimum_stock) = patch.minimum_stock {
            self.minimum_stock = minimum_stock;
        }
        if let Some(expiration_date) = patch.expiration_date {
            self.expiration_date = expiration_date;
        }
    }
}

/// Fields for creating a product. The store assigns the id and both
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: Category,
    pub gender: Gender,
    pub quantity: u32,
    pub minimum_stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

impl ProductDraft {
    /// Creates a draft with no expiration date.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        gender: Gender,
        quantity: u32,
        minimum_stock: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            gender,
            quantity,
            minimum_stock,
            expiration_date: None,
        }
    }

    /// Sets the expiration date.
    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Checks the field invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(())
    }
}

/// Partial update for a product. Absent fields keep their current value.
///
/// `expiration_date` is doubly optional so a patch can clear the date:
/// absent leaves it unchanged, an explicit `null` clears it, a value
/// replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_stock: Option<u32>,

    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<Option<NaiveDate>>,
}

impl ProductPatch {
    /// A patch that only changes the quantity.
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    /// Checks the field invariants for the fields present.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::EmptyName);
            }
        }
        Ok(())
    }
}

/// Keeps an explicit `null` distinguishable from an absent key: a present
/// key always wraps in the outer `Some`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<NaiveDate>::deserialize(deserializer).map(Some)
}
