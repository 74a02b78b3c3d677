//! Newtype wrappers for catalog identifiers and the `all` sentinel.
//!
//! These types prevent accidental mixing of different ID types (e.g., using a ColorId
//! where a ManufacturerId is expected) and make the code more self-documenting.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The literal used on the wire for an unconstrained filter slot.
pub const ALL_SENTINEL: &str = "all";

/// Error returned when a filter value is neither `all` nor a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter value: {0:?}")]
pub struct InvalidFilterValue(pub String);

/// A product category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(n: u64) -> Self {
        CategoryId(n)
    }
}

impl FromStr for CategoryId {
    type Err = InvalidFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(CategoryId)
            .map_err(|_| InvalidFilterValue(s.to_string()))
    }
}

/// A manufacturer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManufacturerId(pub u64);

impl fmt::Display for ManufacturerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ManufacturerId {
    fn from(n: u64) -> Self {
        ManufacturerId(n)
    }
}

impl FromStr for ManufacturerId {
    type Err = InvalidFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(ManufacturerId)
            .map_err(|_| InvalidFilterValue(s.to_string()))
    }
}

/// A color identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u64);

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ColorId {
    fn from(n: u64) -> Self {
        ColorId(n)
    }
}

impl FromStr for ColorId {
    type Err = InvalidFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(ColorId)
            .map_err(|_| InvalidFilterValue(s.to_string()))
    }
}

/// The value held by a filter slot: either unconstrained or a single identifier.
///
/// `All` is distinct from every real identifier. On the wire it is always the
/// literal string `"all"`, never an omitted parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterValue<T> {
    /// No constraint on this slot.
    All,
    /// Constrained to exactly this identifier.
    Only(T),
}

impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        FilterValue::All
    }
}

impl<T> FilterValue<T> {
    /// Returns true if this is the `all` sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }

    /// Returns the identifier, if constrained.
    pub fn id(&self) -> Option<&T> {
        match self {
            FilterValue::All => None,
            FilterValue::Only(id) => Some(id),
        }
    }
}

impl<T: FromStr<Err = InvalidFilterValue>> FilterValue<T> {
    /// Parses a wire value. An empty string is treated as `all`, matching how
    /// an unselected control reports its value.
    pub fn parse(s: &str) -> Result<Self, InvalidFilterValue> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            Ok(FilterValue::All)
        } else {
            trimmed.parse().map(FilterValue::Only)
        }
    }
}

impl<T> From<T> for FilterValue<T> {
    fn from(id: T) -> Self {
        FilterValue::Only(id)
    }
}

impl<T: fmt::Display> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::All => f.write_str(ALL_SENTINEL),
            FilterValue::Only(id) => write!(f, "{}", id),
        }
    }
}

impl<T: fmt::Display> Serialize for FilterValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr<Err = InvalidFilterValue>> Deserialize<'de> for FilterValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FilterValue::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ids {
        use super::*;

        #[test]
        fn display_is_bare_number() {
            assert_eq!(CategoryId(5).to_string(), "5");
            assert_eq!(ManufacturerId(7).to_string(), "7");
            assert_eq!(ColorId(12).to_string(), "12");
        }

        #[test]
        fn parse_rejects_non_numeric() {
            assert!("abc".parse::<ManufacturerId>().is_err());
            assert!("-1".parse::<ColorId>().is_err());
            assert_eq!(" 9 ".parse::<ManufacturerId>(), Ok(ManufacturerId(9)));
        }

        #[test]
        fn serde_is_transparent() {
            let json = serde_json::to_string(&ColorId(3)).unwrap();
            assert_eq!(json, "3");
            let back: ColorId = serde_json::from_str("3").unwrap();
            assert_eq!(back, ColorId(3));
        }
    }

    mod filter_value {
        use super::*;

        #[test]
        fn all_serializes_as_literal_all() {
            let v: FilterValue<CategoryId> = FilterValue::All;
            assert_eq!(v.to_string(), "all");
            assert_eq!(serde_json::to_string(&v).unwrap(), "\"all\"");
        }

        #[test]
        fn only_serializes_as_id_string() {
            let v = FilterValue::Only(ManufacturerId(7));
            assert_eq!(v.to_string(), "7");
            assert_eq!(serde_json::to_string(&v).unwrap(), "\"7\"");
        }

        #[test]
        fn parse_accepts_all_and_empty() {
            assert_eq!(FilterValue::<ColorId>::parse("all"), Ok(FilterValue::All));
            assert_eq!(FilterValue::<ColorId>::parse("ALL"), Ok(FilterValue::All));
            assert_eq!(FilterValue::<ColorId>::parse(""), Ok(FilterValue::All));
            assert_eq!(
                FilterValue::<ColorId>::parse("4"),
                Ok(FilterValue::Only(ColorId(4)))
            );
        }

        #[test]
        fn parse_rejects_garbage() {
            assert!(FilterValue::<ColorId>::parse("red").is_err());
        }

        #[test]
        fn deserialize_from_string() {
            let v: FilterValue<CategoryId> = serde_json::from_str("\"all\"").unwrap();
            assert!(v.is_all());
            let v: FilterValue<CategoryId> = serde_json::from_str("\"5\"").unwrap();
            assert_eq!(v.id(), Some(&CategoryId(5)));
        }

        #[test]
        fn default_is_all() {
            assert!(FilterValue::<ManufacturerId>::default().is_all());
        }
    }
}
