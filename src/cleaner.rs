//! The cleaning pipeline: raw export rows in, cleaned dataset out.
//!
//! Steps run in a fixed order over the whole collection:
//! 1. headers are normalized (done by the loader),
//! 2. country, price tier and color are resolved for every row,
//! 3. rows without cuisines are dropped, the rest keep their first cuisine,
//! 4. administrative columns are dropped,
//! 5. duplicate restaurant ids are dropped (first occurrence wins),
//! 6. zero-cost rows are dropped,
//! 7. rows are reindexed from zero.

use crate::config::ADMIN_COLUMNS;
use crate::csv_loader::RawRecord;
use crate::dataset::{Dataset, Restaurant};
use crate::lookups::{color_name, country_name, LookupError, PriceType, UnmappedPolicy};
use std::collections::HashSet;
use tracing::{debug, info};

/// How many rows each step removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub input_rows: usize,
    pub null_cuisines: usize,
    pub duplicates: usize,
    pub zero_cost: usize,
    pub output_rows: usize,
}

/// Clean the raw records.
///
/// Lookups run on every row before any row is dropped, so with
/// [`UnmappedPolicy::Fail`] an unmapped code fails the run even when its
/// row would later be discarded.
pub fn clean_records(
    raw: Vec<RawRecord>,
    policy: UnmappedPolicy,
) -> Result<(Dataset, CleanStats), LookupError> {
    let mut stats = CleanStats {
        input_rows: raw.len(),
        ..Default::default()
    };

    // Resolve derived fields
    let derived = raw
        .into_iter()
        .map(|rec| {
            let country = country_name(rec.country_code, rec.restaurant_id, policy)?;
            let color = color_name(&rec.rating_color, rec.restaurant_id, policy)?;
            let price_type = PriceType::from_range(rec.price_range);
            Ok((rec, country, price_type, color))
        })
        .collect::<Result<Vec<_>, LookupError>>()?;

    debug!("Dropping columns: {}", ADMIN_COLUMNS.join(", "));

    let mut seen_ids = HashSet::new();
    let mut rows = Vec::with_capacity(derived.len());

    for (rec, country, price_type, color) in derived {
        let Some(cuisines) = rec.cuisines.as_deref().map(first_cuisine) else {
            stats.null_cuisines += 1;
            continue;
        };

        if !seen_ids.insert(rec.restaurant_id) {
            stats.duplicates += 1;
            continue;
        }

        if rec.average_cost_for_two == 0.0 {
            stats.zero_cost += 1;
            continue;
        }

        rows.push(Restaurant {
            restaurant_id: rec.restaurant_id,
            restaurant_name: rec.restaurant_name,
            city: rec.city,
            address: rec.address,
            locality: rec.locality,
            longitude: rec.longitude,
            latitude: rec.latitude,
            cuisines,
            average_cost_for_two: rec.average_cost_for_two,
            currency: rec.currency,
            has_table_booking: rec.has_table_booking,
            has_online_delivery: rec.has_online_delivery,
            is_delivering_now: rec.is_delivering_now,
            price_range: rec.price_range,
            aggregate_rating: rec.aggregate_rating,
            rating_text: rec.rating_text,
            votes: rec.votes,
            country: country.to_string(),
            price_type,
            color: color.to_string(),
        });
    }

    stats.output_rows = rows.len();
    info!(
        "Cleaned {} rows into {} ({} without cuisines, {} duplicates, {} zero cost)",
        stats.input_rows, stats.output_rows, stats.null_cuisines, stats.duplicates, stats.zero_cost
    );

    Ok((Dataset::new(rows), stats))
}

/// Everything before the first comma, untrimmed.
fn first_cuisine(cuisines: &str) -> String {
    cuisines.split(',').next().unwrap_or_default().to_string()
}
