//! Resolution of country codes, price ranges and rating colors.

use crate::config::{COLORS, COUNTRIES, UNKNOWN_LABEL};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A code with no entry in its lookup table.
#[derive(Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("Unknown country code {code} (restaurant {restaurant_id})")]
    UnknownCountryCode { restaurant_id: i64, code: i64 },

    #[error("Unknown rating color {code:?} (restaurant {restaurant_id})")]
    UnknownRatingColor { restaurant_id: i64, code: String },
}

/// What to do with codes missing from the lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedPolicy {
    /// Abort the whole pipeline on the first miss
    #[default]
    Fail,
    /// Label the value "Unknown" and keep the row
    Unknown,
}

impl UnmappedPolicy {
    /// Parse the `--on-unmapped` argument.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "unknown" => UnmappedPolicy::Unknown,
            _ => UnmappedPolicy::Fail,
        }
    }
}

/// Price tier derived from the integer price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PriceType {
    Cheap,
    Normal,
    Expensive,
    Gourmet,
}

impl PriceType {
    /// 1, 2 and 3 are Cheap, Normal and Expensive; every other value is Gourmet.
    pub fn from_range(price_range: i64) -> Self {
        match price_range {
            1 => PriceType::Cheap,
            2 => PriceType::Normal,
            3 => PriceType::Expensive,
            _ => PriceType::Gourmet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Cheap => "Cheap",
            PriceType::Normal => "Normal",
            PriceType::Expensive => "Expensive",
            PriceType::Gourmet => "Gourmet",
        }
    }

    /// Expensive or Gourmet
    pub fn is_pricey(&self) -> bool {
        matches!(self, PriceType::Expensive | PriceType::Gourmet)
    }

    /// Cheap or Normal
    pub fn is_affordable(&self) -> bool {
        !self.is_pricey()
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a country code to its display name.
pub fn country_name(
    code: i64,
    restaurant_id: i64,
    policy: UnmappedPolicy,
) -> Result<&'static str, LookupError> {
    match (COUNTRIES.get(&code), policy) {
        (Some(name), _) => Ok(*name),
        (None, UnmappedPolicy::Unknown) => Ok(UNKNOWN_LABEL),
        (None, UnmappedPolicy::Fail) => {
            Err(LookupError::UnknownCountryCode { restaurant_id, code })
        }
    }
}

/// Resolve a rating color hex code to its color family.
///
/// Codes are matched exactly; the table keys are uppercase.
pub fn color_name(
    code: &str,
    restaurant_id: i64,
    policy: UnmappedPolicy,
) -> Result<&'static str, LookupError> {
    match (COLORS.get(code), policy) {
        (Some(name), _) => Ok(*name),
        (None, UnmappedPolicy::Unknown) => Ok(UNKNOWN_LABEL),
        (None, UnmappedPolicy::Fail) => Err(LookupError::UnknownRatingColor {
            restaurant_id,
            code: code.to_string(),
        }),
    }
}
