//! Group-by, sort and top-N summaries over cleaned rows.
//!
//! Groups are formed in ascending key order and sorted stably by value,
//! so ties keep key order unless the caller sorts by a secondary key.

use crate::dataset::Restaurant;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Text columns usable as group keys or for distinct counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Country,
    City,
    Cuisines,
}

impl Column {
    pub fn value<'a>(&self, row: &'a Restaurant) -> &'a str {
        match self {
            Column::Country => &row.country,
            Column::City => &row.city,
            Column::Cuisines => &row.cuisines,
        }
    }
}

/// Numeric columns usable for sums and means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    AverageCostForTwo,
    AggregateRating,
    Votes,
}

impl Metric {
    pub fn value(&self, row: &Restaurant) -> f64 {
        match self {
            Metric::AverageCostForTwo => row.average_cost_for_two,
            Metric::AggregateRating => row.aggregate_rating,
            Metric::Votes => row.votes as f64,
        }
    }
}

/// Aggregate operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    /// Rows per group
    Count,
    /// Distinct values of a column per group
    CountDistinct(Column),
    /// Sum of a metric
    Sum(Metric),
    /// Arithmetic mean of a metric
    Mean(Metric),
}

impl AggregateOp {
    /// True when the result is always a whole number.
    pub fn is_whole(&self) -> bool {
        matches!(
            self,
            AggregateOp::Count | AggregateOp::CountDistinct(_) | AggregateOp::Sum(Metric::Votes)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One summarized group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    /// One value per grouping column, in grouping order
    pub key: Vec<String>,
    pub value: f64,
}

#[derive(Default)]
struct Accumulator<'a> {
    rows: usize,
    sum: f64,
    distinct: HashSet<&'a str>,
}

/// A group-by query: key columns, operator, sort order and optional limit.
///
/// Stateless; the same query can run over any number of row sets.
#[derive(Debug, Clone)]
pub struct Aggregation {
    group_by: Vec<Column>,
    op: AggregateOp,
    order: SortOrder,
    limit: Option<usize>,
}

impl Aggregation {
    pub fn new(group_by: &[Column], op: AggregateOp, order: SortOrder) -> Self {
        Self {
            group_by: group_by.to_vec(),
            op,
            order,
            limit: None,
        }
    }

    /// Keep only the first `n` groups after sorting.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn op(&self) -> AggregateOp {
        self.op
    }

    /// Run the query. Zero input rows yield zero groups.
    pub fn run<'a, I>(&self, rows: I) -> Vec<Group>
    where
        I: IntoIterator<Item = &'a Restaurant>,
    {
        let mut groups: BTreeMap<Vec<&'a str>, Accumulator<'a>> = BTreeMap::new();

        for row in rows {
            let key: Vec<&str> = self.group_by.iter().map(|c| c.value(row)).collect();
            let acc = groups.entry(key).or_default();
            acc.rows += 1;
            match self.op {
                AggregateOp::Count => {}
                AggregateOp::CountDistinct(col) => {
                    acc.distinct.insert(col.value(row));
                }
                AggregateOp::Sum(metric) | AggregateOp::Mean(metric) => {
                    acc.sum += metric.value(row);
                }
            }
        }

        let mut out: Vec<Group> = groups
            .into_iter()
            .map(|(key, acc)| Group {
                key: key.into_iter().map(str::to_string).collect(),
                value: match self.op {
                    AggregateOp::Count => acc.rows as f64,
                    AggregateOp::CountDistinct(_) => acc.distinct.len() as f64,
                    AggregateOp::Sum(_) => acc.sum,
                    AggregateOp::Mean(_) => acc.sum / acc.rows as f64,
                },
            })
            .collect();

        // sort_by is stable: ties keep key order
        match self.order {
            SortOrder::Ascending => out.sort_by(|a, b| a.value.total_cmp(&b.value)),
            SortOrder::Descending => out.sort_by(|a, b| b.value.total_cmp(&a.value)),
        }

        if let Some(n) = self.limit {
            out.truncate(n);
        }

        out
    }
}

/// Best rated restaurants, ties broken by ascending restaurant id.
pub fn top_restaurants<'a, I>(rows: I, n: usize) -> Vec<&'a Restaurant>
where
    I: IntoIterator<Item = &'a Restaurant>,
{
    let mut sorted: Vec<&Restaurant> = rows.into_iter().collect();
    sorted.sort_by(|a, b| {
        b.aggregate_rating
            .total_cmp(&a.aggregate_rating)
            .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
    });
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{rated, restaurant};

    fn by_country(india: usize, brazil: usize) -> Vec<Restaurant> {
        let mut rows = Vec::new();
        let mut id = 0;
        for _ in 0..india {
            id += 1;
            rows.push(restaurant(id, "India", "Delhi", "Indian"));
        }
        for _ in 0..brazil {
            id += 1;
            rows.push(restaurant(id, "Brazil", "Rio de Janeiro", "Brazilian"));
        }
        rows
    }

    #[test]
    fn test_top_country_by_count() {
        let rows = by_country(5, 9);
        let top = Aggregation::new(&[Column::Country], AggregateOp::Count, SortOrder::Descending)
            .limit(1)
            .run(&rows);
        assert_eq!(
            top,
            vec![Group {
                key: vec!["Brazil".to_string()],
                value: 9.0
            }]
        );
    }

    #[test]
    fn test_counts_sum_to_row_total() {
        let rows = by_country(5, 9);
        let groups = Aggregation::new(&[Column::Country], AggregateOp::Count, SortOrder::Ascending)
            .run(&rows);
        let total: f64 = groups.iter().map(|g| g.value).sum();
        assert_eq!(total as usize, rows.len());
        assert_eq!(groups[0].key, vec!["India"]);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<Restaurant> = Vec::new();
        let groups = Aggregation::new(
            &[Column::Country, Column::City],
            AggregateOp::Mean(Metric::AggregateRating),
            SortOrder::Descending,
        )
        .limit(10)
        .run(&rows);
        assert!(groups.is_empty());
        assert!(top_restaurants(&rows, 10).is_empty());
    }

    #[test]
    fn test_ties_keep_key_order() {
        let rows = vec![
            restaurant(1, "Qatar", "Doha", "Arabian"),
            restaurant(2, "Canada", "Toronto", "Cafe"),
            restaurant(3, "England", "London", "British"),
        ];
        let groups = Aggregation::new(&[Column::Country], AggregateOp::Count, SortOrder::Descending)
            .run(&rows);
        let keys: Vec<&str> = groups.iter().map(|g| g.key[0].as_str()).collect();
        assert_eq!(keys, vec!["Canada", "England", "Qatar"]);
    }

    #[test]
    fn test_count_distinct_multi_key() {
        let rows = vec![
            restaurant(1, "India", "Delhi", "Cafe"),
            restaurant(2, "India", "Delhi", "Cafe"),
            restaurant(3, "India", "Delhi", "Bakery"),
            restaurant(4, "India", "Goa", "Seafood"),
        ];
        let groups = Aggregation::new(
            &[Column::Country, Column::City],
            AggregateOp::CountDistinct(Column::Cuisines),
            SortOrder::Descending,
        )
        .run(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, vec!["India", "Delhi"]);
        assert_eq!(groups[0].value, 2.0);
        assert_eq!(groups[1].key, vec!["India", "Goa"]);
        assert_eq!(groups[1].value, 1.0);
    }

    #[test]
    fn test_sum_and_mean() {
        let mut rows = vec![
            rated(1, "India", "Delhi", "Cafe", 4.0, 100.0, 1),
            rated(2, "India", "Delhi", "Cafe", 3.0, 300.0, 1),
            rated(3, "Turkey", "Ankara", "Kebab", 2.0, 50.0, 1),
        ];
        rows[0].votes = 10;
        rows[1].votes = 30;
        rows[2].votes = 5;

        let sums = Aggregation::new(&[Column::Country], AggregateOp::Sum(Metric::Votes), SortOrder::Descending)
            .run(&rows);
        assert_eq!(sums[0].key, vec!["India"]);
        assert_eq!(sums[0].value, 40.0);

        let means = Aggregation::new(
            &[Column::Country],
            AggregateOp::Mean(Metric::AverageCostForTwo),
            SortOrder::Ascending,
        )
        .run(&rows);
        assert_eq!(means[0].key, vec!["Turkey"]);
        assert_eq!(means[1].value, 200.0);
    }

    #[test]
    fn test_top_restaurants_tie_break() {
        let rows = vec![
            rated(30, "India", "Delhi", "Cafe", 4.9, 100.0, 1),
            rated(10, "India", "Delhi", "Cafe", 4.9, 100.0, 1),
            rated(20, "India", "Delhi", "Cafe", 4.5, 100.0, 1),
            rated(5, "India", "Delhi", "Cafe", 3.0, 100.0, 1),
        ];
        let ids: Vec<i64> = top_restaurants(&rows, 3)
            .iter()
            .map(|r| r.restaurant_id)
            .collect();
        assert_eq!(ids, vec![10, 30, 20]);
    }

    #[test]
    fn test_query_is_reusable() {
        let rows = by_country(2, 3);
        let query = Aggregation::new(&[Column::Country], AggregateOp::Count, SortOrder::Ascending);
        assert_eq!(query.run(&rows), query.run(&rows));
        assert!(query.op().is_whole());
    }
}
