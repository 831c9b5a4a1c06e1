//! Product gender codes and display labels.

use serde::{Deserialize, Serialize};

use crate::options::SelectOption;

/// Gender a product is intended for.
///
/// Same wire rules as [`crate::Category`]: the code string is the wire
/// format and unknown codes are preserved in [`Gender::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    /// Boys.
    Masculine,

    /// Girls.
    Feminine,

    /// Either.
    Unisex,

    /// Unrecognized gender code, carried through unchanged.
    Other(String),
}

impl Gender {
    /// The known genders, in display order.
    pub const KNOWN: [Gender; 3] = [Gender::Masculine, Gender::Feminine, Gender::Unisex];

    /// Parses a gender code, falling back to [`Gender::Other`] for codes
    /// outside the known set.
    pub fn from_code(code: &str) -> Self {
        match code {
            "MASCULINO" => Gender::Masculine,
            "FEMININO" => Gender::Feminine,
            "UNISEX" => Gender::Unisex,
            other => Gender::Other(other.to_string()),
        }
    }

    /// Returns the wire code for this gender.
    pub fn code(&self) -> &str {
        match self {
            Gender::Masculine => "MASCULINO",
            Gender::Feminine => "FEMININO",
            Gender::Unisex => "UNISEX",
            Gender::Other(code) => code,
        }
    }

    /// Returns the display label for this gender.
    ///
    /// Unknown codes label as themselves.
    pub fn label(&self) -> &str {
        match self {
            Gender::Masculine => "Masculino",
            Gender::Feminine => "Feminino",
            Gender::Unisex => "Unissex",
            Gender::Other(code) => code,
        }
    }

    /// Returns `{value, label}` rows for a gender select input.
    pub fn options() -> Vec<SelectOption> {
        Self::KNOWN
            .iter()
            .map(|gender| SelectOption {
                value: gender.code().to_string(),
                label: gender.label().to_string(),
            })
            .collect()
    }
}

impl From<String> for Gender {
    fn from(code: String) -> Self {
        Gender::from_code(&code)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.code().to_string()
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
