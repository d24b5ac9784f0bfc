//! Cleaned restaurant records and the in-memory dataset.

use crate::lookups::PriceType;
use serde::Serialize;
use std::collections::HashSet;

/// A cleaned listing. Administrative columns are gone and the three
/// derived fields (`country`, `price_type`, `color`) are resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub city: String,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    /// First listed cuisine only
    pub cuisines: String,
    pub average_cost_for_two: f64,
    pub currency: String,
    pub has_table_booking: bool,
    pub has_online_delivery: bool,
    pub is_delivering_now: bool,
    pub price_range: i64,
    pub aggregate_rating: f64,
    pub rating_text: Option<String>,
    pub votes: i64,
    pub country: String,
    pub price_type: PriceType,
    pub color: String,
}

/// The cleaned dataset. Row index is the position in `rows`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Restaurant>,
}

impl Dataset {
    pub fn new(rows: Vec<Restaurant>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Restaurant] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unique country names in first-appearance order (the filter options).
    pub fn countries(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.country.as_str()))
            .map(|r| r.country.clone())
            .collect()
    }

    /// Keep rows whose country exactly matches one of `selected`.
    pub fn filter_countries<S: AsRef<str>>(&self, selected: &[S]) -> Dataset {
        let wanted: HashSet<&str> = selected.iter().map(|s| s.as_ref()).collect();
        Dataset::new(
            self.rows
                .iter()
                .filter(|r| wanted.contains(r.country.as_str()))
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A cleaned row with neutral defaults for the fields tests rarely vary.
    pub fn restaurant(id: i64, country: &str, city: &str, cuisines: &str) -> Restaurant {
        Restaurant {
            restaurant_id: id,
            restaurant_name: format!("Restaurant {}", id),
            city: city.to_string(),
            address: None,
            locality: None,
            longitude: 0.0,
            latitude: 0.0,
            cuisines: cuisines.to_string(),
            average_cost_for_two: 100.0,
            currency: "Dollar($)".to_string(),
            has_table_booking: false,
            has_online_delivery: false,
            is_delivering_now: false,
            price_range: 2,
            aggregate_rating: 3.0,
            rating_text: None,
            votes: 0,
            country: country.to_string(),
            price_type: PriceType::Normal,
            color: "orange".to_string(),
        }
    }

    /// Same as [`restaurant`] with rating, cost and price range set.
    pub fn rated(
        id: i64,
        country: &str,
        city: &str,
        cuisines: &str,
        rating: f64,
        cost: f64,
        price_range: i64,
    ) -> Restaurant {
        Restaurant {
            aggregate_rating: rating,
            average_cost_for_two: cost,
            price_range,
            price_type: PriceType::from_range(price_range),
            ..restaurant(id, country, city, cuisines)
        }
    }
}
