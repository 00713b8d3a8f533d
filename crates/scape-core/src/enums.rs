//! Category enums.
//!
//! `SmellCategory` serializes as its lowercase name. Backend rows may carry a
//! category this build does not know about; those decode to
//! [`SmellCategory::Unrecognized`] instead of failing, so the map can still
//! draw them with the fallback color.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

// ---------------------------------------------------------------------------
// SmellCategory
// ---------------------------------------------------------------------------

/// Category of a smell report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SmellCategory {
    Nature,
    Animal,
    Food,
    Urban,
    Human,
    Chemical,
    Other,
    /// A category string outside the known set, kept verbatim.
    Unrecognized(String),
}

impl SmellCategory {
    /// Every known category, in display order.
    pub const KNOWN: [Self; 7] = [
        Self::Nature,
        Self::Animal,
        Self::Food,
        Self::Urban,
        Self::Human,
        Self::Chemical,
        Self::Other,
    ];

    /// Return the string stored in the backend.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Nature => "nature",
            Self::Animal => "animal",
            Self::Food => "food",
            Self::Urban => "urban",
            Self::Human => "human",
            Self::Chemical => "chemical",
            Self::Other => "other",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Map a stored string to a category. Matching is case-insensitive.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "nature" => Self::Nature,
            "animal" => Self::Animal,
            "food" => Self::Food,
            "urban" => Self::Urban,
            "human" => Self::Human,
            "chemical" => Self::Chemical,
            "other" => Self::Other,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for SmellCategory {
    fn from(raw: String) -> Self {
        Self::from_stored(&raw)
    }
}

impl From<SmellCategory> for String {
    fn from(category: SmellCategory) -> Self {
        match category {
            SmellCategory::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Parsing is strict: forms only accept the known categories.
impl FromStr for SmellCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_stored(s) {
            Self::Unrecognized(raw) => Err(ValidationError::UnknownCategory(raw)),
            known => Ok(known),
        }
    }
}

impl fmt::Display for SmellCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_categories_roundtrip_through_strings() {
        for category in SmellCategory::KNOWN {
            let stored: String = category.clone().into();
            assert_eq!(SmellCategory::from(stored), category);
        }
    }

    #[test]
    fn unknown_category_is_preserved() {
        let category: SmellCategory = serde_json::from_str("\"floral\"").unwrap();
        assert_eq!(category, SmellCategory::Unrecognized("floral".into()));
        assert!(!category.is_recognized());
        assert_eq!(serde_json::to_string(&category).unwrap(), "\"floral\"");
    }

    #[test]
    fn stored_matching_ignores_case() {
        assert_eq!(SmellCategory::from_stored("Food"), SmellCategory::Food);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        let err = "perfume".parse::<SmellCategory>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownCategory("perfume".into()));
        assert_eq!("urban".parse::<SmellCategory>().unwrap(), SmellCategory::Urban);
    }
}
