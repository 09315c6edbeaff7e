//! Supported guest languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The languages guests can hold a conversation in.
///
/// The set is closed: every guest-facing message has a translation for each
/// variant, and anything outside it is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Uz,
    Ru,
    En,
}

impl Language {
    /// Returns all supported languages in presentation order.
    pub fn all() -> &'static [Language] {
        &[Language::Uz, Language::Ru, Language::En]
    }

    /// Returns the two-letter code used on the wire and in storage.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Uz => "uz",
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Returns the name shown on selection buttons.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Uz => "Uzb",
            Language::Ru => "Rus",
            Language::En => "Eng",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uz" => Ok(Language::Uz),
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("unknown code '{}'", other),
            )),
        }
    }
}
