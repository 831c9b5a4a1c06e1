//! Product category codes and display labels.

use serde::{Deserialize, Serialize};

use crate::options::SelectOption;

/// Category bucket for a product, by age range or purpose.
///
/// The wire format is the upstream code string (`ROUPA_0_3M`, `HIGIENE`,
/// ...). A code outside the known set is preserved verbatim in
/// [`Category::Other`] so foreign seed data never fails to parse; such a
/// code labels as itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Clothing, 0-3 months.
    Clothes0To3,

    /// Clothing, 3-6 months.
    Clothes3To6,

    /// Clothing, 6-9 months.
    Clothes6To9,

    /// Clothing, 9-12 months.
    Clothes9To12,

    /// Non-clothing utility items (towels, bottles, ...).
    Utilities,

    /// Hygiene supplies (diapers, wipes, ...).
    Hygiene,

    /// Unrecognized category code, carried through unchanged.
    Other(String),
}

impl Category {
    /// The known categories, in display order.
    pub const KNOWN: [Category; 6] = [
        Category::Clothes0To3,
        Category::Clothes3To6,
        Category::Clothes6To9,
        Category::Clothes9To12,
        Category::Utilities,
        Category::Hygiene,
    ];

    /// Parses a category code, falling back to [`Category::Other`] for
    /// codes outside the known set.
    pub fn from_code(code: &str) -> Self {
        match code {
            "ROUPA_0_3M" => Category::Clothes0To3,
            "ROUPA_3_6M" => Category::Clothes3To6,
            "ROUPA_6_9M" => Category::Clothes6To9,
            "ROUPA_9_12M" => Category::Clothes9To12,
            "UTILITARIOS" => Category::Utilities,
            "HIGIENE" => Category::Hygiene,
            other => Category::Other(other.to_string()),
        }
    }

    /// Returns the wire code for this category.
    pub fn code(&self) -> &str {
        match self {
            Category::Clothes0To3 => "ROUPA_0_3M",
            Category::Clothes3To6 => "ROUPA_3_6M",
            Category::Clothes6To9 => "ROUPA_6_9M",
            Category::Clothes9To12 => "ROUPA_9_12M",
            Category::Utilities => "UTILITARIOS",
            Category::Hygiene => "HIGIENE",
            Category::Other(code) => code,
        }
    }

    /// Returns the display label for this category.
    ///
    /// Unknown codes label as themselves.
    pub fn label(&self) -> &str {
        match self {
            Category::Clothes0To3 => "Roupas 0-3 meses",
            Category::Clothes3To6 => "Roupas 3-6 meses",
            Category::Clothes6To9 => "Roupas 6-9 meses",
            Category::Clothes9To12 => "Roupas 9-12 meses",
            Category::Utilities => "Utilitários",
            Category::Hygiene => "Higiene",
            Category::Other(code) => code,
        }
    }

    /// Returns `{value, label}` rows for a category select input.
    pub fn options() -> Vec<SelectOption> {
        Self::KNOWN
            .iter()
            .map(|category| SelectOption {
                value: category.code().to_string(),
                label: category.label().to_string(),
            })
            .collect()
    }
}

impl From<String> for Category {
    fn from(code: String) -> Self {
        Category::from_code(&code)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.code().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
