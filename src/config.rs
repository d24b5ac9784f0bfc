//! Configuration and constants for the dashboard.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Default source file, relative to the working directory
pub const DEFAULT_CSV: &str = "zomato.csv";

/// Country code to display name
pub static COUNTRIES: LazyLock<HashMap<i64, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(1, "India");
    m.insert(14, "Australia");
    m.insert(30, "Brazil");
    m.insert(37, "Canada");
    m.insert(94, "Indonesia");
    m.insert(148, "New Zealand");
    m.insert(162, "Philippines");
    m.insert(166, "Qatar");
    m.insert(184, "Singapore");
    m.insert(189, "South Africa");
    m.insert(191, "Sri Lanka");
    m.insert(208, "Turkey");
    m.insert(214, "United Arab Emirates");
    m.insert(215, "England");
    m.insert(216, "United States of America");
    m
});

/// Rating color hex code to color family.
///
/// `CBCBC8` (not rated) and `FF7800` both map to `darkred`.
pub static COLORS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("3F7E00", "darkgreen");
    m.insert("5BA829", "green");
    m.insert("9ACD32", "lightgreen");
    m.insert("CDD614", "orange");
    m.insert("FFBA00", "red");
    m.insert("CBCBC8", "darkred");
    m.insert("FF7800", "darkred");
    m
});

/// Label used for unmapped codes when the `unknown` policy is active
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Normalized columns the loader requires
pub const REQUIRED_COLUMNS: &[&str] = &[
    "restaurant_id",
    "restaurant_name",
    "country_code",
    "city",
    "longitude",
    "latitude",
    "cuisines",
    "average_cost_for_two",
    "currency",
    "has_table_booking",
    "has_online_delivery",
    "is_delivering_now",
    "price_range",
    "aggregate_rating",
    "rating_color",
    "votes",
];

/// Columns dropped by the cleaner
pub const ADMIN_COLUMNS: &[&str] = &[
    "country_code",
    "locality_verbose",
    "switch_to_order_menu",
    "rating_color",
];

/// Ratings at or below this are "worst rated"
pub const LOW_RATING: f64 = 2.5;

/// Ratings at or above this are "best rated"
pub const HIGH_RATING: f64 = 4.0;

pub const TOP_RESTAURANTS: usize = 10;
pub const TOP_VOTED_COUNTRIES: usize = 5;
pub const TOP_RATED_CITIES: usize = 7;
pub const TOP_DIVERSE_CITIES: usize = 10;
pub const TOP_PRICED_CITIES: usize = 10;
pub const TOP_CUISINES: usize = 10;
pub const TOP_PRICED_CUISINES: usize = 20;
