//! Dashboard pages built from the cleaned dataset.
//!
//! Each page is a list of tables (plus headline numbers and map markers on
//! the home page). Every view tolerates an empty dataset.

use crate::aggregate::{top_restaurants, AggregateOp, Aggregation, Column, Group, Metric, SortOrder};
use crate::config::{
    HIGH_RATING, LOW_RATING, TOP_CUISINES, TOP_DIVERSE_CITIES, TOP_PRICED_CITIES,
    TOP_PRICED_CUISINES, TOP_RATED_CITIES, TOP_RESTAURANTS, TOP_VOTED_COUNTRIES,
};
use crate::dataset::{Dataset, Restaurant};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Which pages to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Country,
    City,
    Gastronomic,
    All,
}

impl PageKind {
    /// Parse the `--page` argument.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "home" => PageKind::Home,
            "country" => PageKind::Country,
            "city" => PageKind::City,
            "gastronomic" => PageKind::Gastronomic,
            _ => PageKind::All,
        }
    }
}

/// A table cell. Decimals are shown with two places.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
    Decimal(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// A headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: i64,
}

/// One restaurant pin on the world map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub restaurant_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub cuisines: String,
    pub average_cost_for_two: f64,
    pub currency: String,
    pub aggregate_rating: f64,
    pub color: String,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<Stat>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<MapMarker>,
    pub tables: Vec<Table>,
}

/// Build the requested pages over `data`.
pub fn build_pages(data: &Dataset, kind: PageKind) -> Vec<Page> {
    match kind {
        PageKind::Home => vec![home_page(data)],
        PageKind::Country => vec![country_page(data)],
        PageKind::City => vec![city_page(data)],
        PageKind::Gastronomic => vec![gastronomic_page(data)],
        PageKind::All => vec![
            home_page(data),
            country_page(data),
            city_page(data),
            gastronomic_page(data),
        ],
    }
}

/// Turn summarized groups into a table: key cells then the value.
fn groups_table(title: &str, columns: Vec<&'static str>, groups: Vec<Group>, op: AggregateOp) -> Table {
    let rows = groups
        .into_iter()
        .map(|g| {
            let mut row: Vec<Cell> = g.key.into_iter().map(Cell::Text).collect();
            row.push(if op.is_whole() {
                Cell::Int(g.value as i64)
            } else {
                Cell::Decimal(g.value)
            });
            row
        })
        .collect();

    Table {
        title: title.to_string(),
        columns,
        rows,
    }
}

/// Run a query and tabulate it.
fn query_table<'a, I>(title: &str, columns: Vec<&'static str>, query: Aggregation, rows: I) -> Table
where
    I: IntoIterator<Item = &'a Restaurant>,
{
    let op = query.op();
    groups_table(title, columns, query.run(rows), op)
}

/// First row seen for each value of `column`.
fn first_by<'a>(rows: &'a [Restaurant], column: Column) -> HashMap<&'a str, &'a Restaurant> {
    let mut first = HashMap::new();
    for row in rows {
        first.entry(column.value(row)).or_insert(row);
    }
    first
}

/// Mean cost for two and mean rating per `key`, ordered by mean rating.
fn cost_and_rating_by<'a>(
    rows: &[&'a Restaurant],
    key: Column,
    order: SortOrder,
    limit: usize,
) -> Vec<(String, f64, f64)> {
    let ratings = Aggregation::new(&[key], AggregateOp::Mean(Metric::AggregateRating), order)
        .limit(limit)
        .run(rows.iter().copied());
    let costs: HashMap<Vec<String>, f64> =
        Aggregation::new(&[key], AggregateOp::Mean(Metric::AverageCostForTwo), order)
            .run(rows.iter().copied())
            .into_iter()
            .map(|g| (g.key, g.value))
            .collect();

    ratings
        .into_iter()
        .map(|g| {
            let cost = costs.get(&g.key).copied().unwrap_or_default();
            let name = g.key.into_iter().next().unwrap_or_default();
            (name, cost, g.value)
        })
        .collect()
}

fn count_distinct(rows: &[Restaurant], column: Column) -> i64 {
    rows.iter().map(|r| column.value(r)).collect::<HashSet<_>>().len() as i64
}

fn marker(row: &Restaurant) -> MapMarker {
    MapMarker {
        restaurant_name: row.restaurant_name.clone(),
        latitude: row.latitude,
        longitude: row.longitude,
        cuisines: row.cuisines.clone(),
        average_cost_for_two: row.average_cost_for_two,
        currency: row.currency.clone(),
        aggregate_rating: row.aggregate_rating,
        color: row.color.clone(),
        popup: format!(
            "{}\nCuisine: {}\nAverage cost for two: {} ({})\nRating: {} / 5.0",
            row.restaurant_name,
            row.cuisines,
            row.average_cost_for_two,
            row.currency,
            row.aggregate_rating
        ),
    }
}

/// Headline numbers, the restaurant map and the top rated restaurants.
pub fn home_page(data: &Dataset) -> Page {
    let rows = data.rows();

    let stats = vec![
        Stat {
            label: "Registered restaurants",
            value: rows.iter().map(|r| r.restaurant_id).collect::<HashSet<_>>().len() as i64,
        },
        Stat {
            label: "Restaurants taking reservations",
            value: rows.iter().filter(|r| r.has_table_booking).count() as i64,
        },
        Stat {
            label: "Restaurants with online orders",
            value: rows.iter().filter(|r| r.has_online_delivery).count() as i64,
        },
        Stat {
            label: "Restaurants delivering now",
            value: rows.iter().filter(|r| r.is_delivering_now).count() as i64,
        },
        Stat {
            label: "Countries",
            value: count_distinct(rows, Column::Country),
        },
        Stat {
            label: "Cities",
            value: count_distinct(rows, Column::City),
        },
        Stat {
            label: "Cuisines",
            value: count_distinct(rows, Column::Cuisines),
        },
        Stat {
            label: "Votes cast",
            value: rows.iter().map(|r| r.votes).sum(),
        },
    ];

    let top = Table {
        title: format!("Top {} restaurants", TOP_RESTAURANTS),
        columns: vec![
            "ID",
            "Name",
            "Country",
            "City",
            "Cuisine",
            "Currency",
            "Cost for two",
            "Rating",
            "Votes",
        ],
        rows: top_restaurants(rows, TOP_RESTAURANTS)
            .into_iter()
            .map(|r| {
                vec![
                    Cell::Int(r.restaurant_id),
                    Cell::Text(r.restaurant_name.clone()),
                    Cell::Text(r.country.clone()),
                    Cell::Text(r.city.clone()),
                    Cell::Text(r.cuisines.clone()),
                    Cell::Text(r.currency.clone()),
                    Cell::Decimal(r.average_cost_for_two),
                    Cell::Decimal(r.aggregate_rating),
                    Cell::Int(r.votes),
                ]
            })
            .collect(),
    };

    Page {
        title: "Fome Zero",
        stats,
        markers: rows.iter().map(marker).collect(),
        tables: vec![top],
    }
}

/// Per-country counts, diversity, votes, ratings and costs.
pub fn country_page(data: &Dataset) -> Page {
    let rows = data.rows();
    let country = [Column::Country];

    let mut tables = vec![
        query_table(
            "Restaurants per country",
            vec!["Country", "Restaurants"],
            Aggregation::new(&country, AggregateOp::Count, SortOrder::Ascending),
            rows,
        ),
        query_table(
            "Cities per country",
            vec!["Country", "Cities"],
            Aggregation::new(&country, AggregateOp::CountDistinct(Column::City), SortOrder::Ascending),
            rows,
        ),
        query_table(
            "Distinct cuisines per country",
            vec!["Country", "Cuisines"],
            Aggregation::new(
                &country,
                AggregateOp::CountDistinct(Column::Cuisines),
                SortOrder::Descending,
            ),
            rows,
        ),
        query_table(
            &format!("Top {} countries by votes", TOP_VOTED_COUNTRIES),
            vec!["Country", "Votes"],
            Aggregation::new(&country, AggregateOp::Sum(Metric::Votes), SortOrder::Descending)
                .limit(TOP_VOTED_COUNTRIES),
            rows,
        ),
        query_table(
            "Mean rating per country",
            vec!["Country", "Mean rating"],
            Aggregation::new(
                &country,
                AggregateOp::Mean(Metric::AggregateRating),
                SortOrder::Ascending,
            ),
            rows,
        ),
    ];

    // Mean cost and rating, with the currency of each country's first row
    let currencies = first_by(rows, Column::Country);
    let ratings: HashMap<Vec<String>, f64> = Aggregation::new(
        &country,
        AggregateOp::Mean(Metric::AggregateRating),
        SortOrder::Descending,
    )
    .run(rows)
    .into_iter()
    .map(|g| (g.key, g.value))
    .collect();
    let cost_rows = Aggregation::new(
        &country,
        AggregateOp::Mean(Metric::AverageCostForTwo),
        SortOrder::Descending,
    )
    .run(rows)
    .into_iter()
    .filter_map(|g| {
        let name = g.key.first()?;
        let currency = currencies.get(name.as_str())?.currency.clone();
        let rating = ratings.get(&g.key).copied().unwrap_or_default();
        Some(vec![
            Cell::Text(name.clone()),
            Cell::Text(currency),
            Cell::Decimal(g.value),
            Cell::Decimal(rating),
        ])
    })
    .collect();

    tables.push(Table {
        title: "Mean cost and rating per country".to_string(),
        columns: vec!["Country", "Currency", "Mean cost for two", "Mean rating"],
        rows: cost_rows,
    });

    Page {
        title: "Country Background",
        stats: Vec::new(),
        markers: Vec::new(),
        tables,
    }
}

/// Cities ranked by size, rating, diversity and price.
pub fn city_page(data: &Dataset) -> Page {
    let rows = data.rows();
    let place = [Column::Country, Column::City];

    // Largest city of each country, smallest first
    let city_counts =
        Aggregation::new(&place, AggregateOp::Count, SortOrder::Descending).run(rows);
    let mut largest: Vec<Group> = data
        .countries()
        .iter()
        .filter_map(|c| city_counts.iter().find(|g| &g.key[0] == c).cloned())
        .collect();
    largest.sort_by(|a, b| a.value.total_cmp(&b.value));

    let mut tables = vec![
        groups_table(
            "Largest city of each country",
            vec!["Country", "City", "Restaurants"],
            largest,
            AggregateOp::Count,
        ),
        query_table(
            &format!("Top {} cities by restaurants rated below {}", TOP_RATED_CITIES, LOW_RATING),
            vec!["Country", "City", "Restaurants"],
            Aggregation::new(&place, AggregateOp::Count, SortOrder::Descending).limit(TOP_RATED_CITIES),
            rows.iter().filter(|r| r.aggregate_rating < LOW_RATING),
        ),
        query_table(
            &format!("Top {} cities by restaurants rated above {}", TOP_RATED_CITIES, HIGH_RATING),
            vec!["Country", "City", "Restaurants"],
            Aggregation::new(&place, AggregateOp::Count, SortOrder::Descending).limit(TOP_RATED_CITIES),
            rows.iter().filter(|r| r.aggregate_rating > HIGH_RATING),
        ),
        query_table(
            &format!("Top {} cities by cuisine diversity", TOP_DIVERSE_CITIES),
            vec!["Country", "City", "Cuisines"],
            Aggregation::new(
                &place,
                AggregateOp::CountDistinct(Column::Cuisines),
                SortOrder::Descending,
            )
            .limit(TOP_DIVERSE_CITIES),
            rows,
        ),
    ];

    // Country and currency come from the first row of each city
    let first_of_city = first_by(rows, Column::City);
    let priced_table = |title: String, selected: Vec<&Restaurant>, order: SortOrder| Table {
        title,
        columns: vec!["Country", "City", "Currency", "Mean cost for two", "Mean rating"],
        rows: cost_and_rating_by(&selected, Column::City, order, TOP_PRICED_CITIES)
            .into_iter()
            .filter_map(|(city, cost, rating)| {
                let first = first_of_city.get(city.as_str())?;
                Some(vec![
                    Cell::Text(first.country.clone()),
                    Cell::Text(city),
                    Cell::Text(first.currency.clone()),
                    Cell::Decimal(cost),
                    Cell::Decimal(rating),
                ])
            })
            .collect(),
    };

    tables.push(priced_table(
        format!("Top {} expensive and worst rated cities", TOP_PRICED_CITIES),
        rows.iter()
            .filter(|r| r.price_type.is_pricey() && r.aggregate_rating <= LOW_RATING)
            .collect(),
        SortOrder::Ascending,
    ));
    tables.push(priced_table(
        format!("Top {} cheap and best rated cities", TOP_PRICED_CITIES),
        rows.iter()
            .filter(|r| r.price_type.is_affordable() && r.aggregate_rating >= HIGH_RATING)
            .collect(),
        SortOrder::Descending,
    ));

    Page {
        title: "City Background",
        stats: Vec::new(),
        markers: Vec::new(),
        tables,
    }
}

/// Cuisines ranked by popularity and rating.
pub fn gastronomic_page(data: &Dataset) -> Page {
    let rows = data.rows();
    let cuisine = [Column::Cuisines];
    let mean_rating = AggregateOp::Mean(Metric::AggregateRating);

    let tables = vec![
        query_table(
            &format!("Top {} cuisines by restaurants", TOP_CUISINES),
            vec!["Cuisine", "Restaurants"],
            Aggregation::new(&cuisine, AggregateOp::Count, SortOrder::Descending).limit(TOP_CUISINES),
            rows,
        ),
        query_table(
            &format!("{} worst rated cuisines", TOP_CUISINES),
            vec!["Cuisine", "Mean rating"],
            Aggregation::new(&cuisine, mean_rating, SortOrder::Ascending).limit(TOP_CUISINES),
            rows,
        ),
        query_table(
            &format!("{} best rated cuisines", TOP_CUISINES),
            vec!["Cuisine", "Mean rating"],
            Aggregation::new(&cuisine, mean_rating, SortOrder::Descending).limit(TOP_CUISINES),
            rows,
        ),
        query_table(
            &format!("{} expensive and worst rated cuisines", TOP_PRICED_CUISINES),
            vec!["Cuisine", "Mean rating"],
            Aggregation::new(&cuisine, mean_rating, SortOrder::Ascending).limit(TOP_PRICED_CUISINES),
            rows.iter()
                .filter(|r| r.price_type.is_pricey() && r.aggregate_rating <= LOW_RATING),
        ),
        query_table(
            &format!("{} cheap and best rated cuisines", TOP_PRICED_CUISINES),
            vec!["Cuisine", "Mean rating"],
            Aggregation::new(&cuisine, mean_rating, SortOrder::Descending).limit(TOP_PRICED_CUISINES),
            rows.iter()
                .filter(|r| r.price_type.is_affordable() && r.aggregate_rating >= HIGH_RATING),
        ),
    ];

    Page {
        title: "Gastronomic Background",
        stats: Vec::new(),
        markers: Vec::new(),
        tables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{rated, restaurant};

    fn text(cell: &Cell) -> &str {
        match cell {
            Cell::Text(s) => s,
            other => panic!("expected text, got {:?}", other),
        }
    }

    fn sample() -> Dataset {
        let mut rows = vec![
            rated(1, "India", "Delhi", "North Indian", 4.5, 800.0, 3),
            rated(2, "India", "Delhi", "Cafe", 2.0, 300.0, 1),
            rated(3, "India", "Mumbai", "Cafe", 4.9, 1200.0, 4),
            rated(4, "Brazil", "Rio de Janeiro", "Brazilian", 2.1, 150.0, 3),
            rated(5, "Brazil", "Brasília", "Bakery", 4.2, 40.0, 1),
            rated(6, "Brazil", "Rio de Janeiro", "Brazilian", 4.9, 90.0, 2),
        ];
        rows[3].currency = "Brazilian Real(R$)".to_string();
        rows[4].currency = "Brazilian Real(R$)".to_string();
        rows[5].currency = "Brazilian Real(R$)".to_string();
        rows[0].has_table_booking = true;
        rows[2].votes = 100;
        rows[5].votes = 50;
        Dataset::new(rows)
    }

    #[test]
    fn test_home_stats() {
        let page = home_page(&sample());
        let value = |label: &str| page.stats.iter().find(|s| s.label == label).unwrap().value;
        assert_eq!(value("Registered restaurants"), 6);
        assert_eq!(value("Restaurants taking reservations"), 1);
        assert_eq!(value("Countries"), 2);
        assert_eq!(value("Cities"), 4);
        assert_eq!(value("Cuisines"), 4);
        assert_eq!(value("Votes cast"), 150);
        assert_eq!(page.markers.len(), 6);
        assert!(page.markers[0].popup.contains("Cuisine: North Indian"));
    }

    #[test]
    fn test_top_restaurants_table() {
        let page = home_page(&sample());
        let ids: Vec<&Cell> = page.tables[0].rows.iter().map(|r| &r[0]).collect();
        assert_eq!(ids[0], &Cell::Int(3));
        assert_eq!(ids[1], &Cell::Int(6));
        assert_eq!(ids[2], &Cell::Int(1));
    }

    #[test]
    fn test_country_cost_table_joins_currency() {
        let page = country_page(&sample());
        let cost = page.tables.last().unwrap();
        assert_eq!(cost.rows.len(), 2);
        assert_eq!(text(&cost.rows[0][0]), "India");
        assert_eq!(text(&cost.rows[0][1]), "Dollar($)");
        assert_eq!(cost.rows[0][2], Cell::Decimal(2300.0 / 3.0));
        assert_eq!(text(&cost.rows[1][1]), "Brazilian Real(R$)");
    }

    #[test]
    fn test_votes_are_whole_numbers() {
        let page = country_page(&sample());
        let votes = &page.tables[3];
        assert_eq!(votes.rows[0], vec![Cell::Text("India".into()), Cell::Int(100)]);
    }

    #[test]
    fn test_largest_city_per_country() {
        let page = city_page(&sample());
        let largest = &page.tables[0];
        assert_eq!(largest.rows.len(), 2);
        // Both have two restaurants; India comes first in the data
        assert_eq!(text(&largest.rows[0][1]), "Delhi");
        assert_eq!(text(&largest.rows[1][1]), "Rio de Janeiro");
        assert_eq!(largest.rows[1][2], Cell::Int(2));
    }

    #[test]
    fn test_priced_cities() {
        let page = city_page(&sample());
        let worst = &page.tables[4];
        // Pricey and rated <= 2.5: only restaurant 4
        assert_eq!(worst.rows.len(), 1);
        assert_eq!(text(&worst.rows[0][0]), "Brazil");
        assert_eq!(text(&worst.rows[0][1]), "Rio de Janeiro");
        assert_eq!(worst.rows[0][3], Cell::Decimal(150.0));

        let best = &page.tables[5];
        // Affordable and rated >= 4: restaurants 5 and 6
        let cities: Vec<&str> = best.rows.iter().map(|r| text(&r[1])).collect();
        assert_eq!(cities, vec!["Rio de Janeiro", "Brasília"]);
    }

    #[test]
    fn test_gastronomic_rankings() {
        let page = gastronomic_page(&sample());
        let popular = &page.tables[0];
        assert_eq!(popular.rows[0], vec![Cell::Text("Brazilian".into()), Cell::Int(2)]);
        assert_eq!(popular.rows[1], vec![Cell::Text("Cafe".into()), Cell::Int(2)]);

        let worst = &page.tables[1];
        assert_eq!(text(&worst.rows[0][0]), "Cafe");
        assert_eq!(worst.rows[0][1], Cell::Decimal((2.0 + 4.9) / 2.0));
    }

    #[test]
    fn test_empty_dataset_renders_empty_tables() {
        let empty = Dataset::default();
        for page in build_pages(&empty, PageKind::All) {
            assert!(page.markers.is_empty());
            assert!(page.tables.iter().all(|t| t.rows.is_empty()), "{}", page.title);
        }
    }

    #[test]
    fn test_filtered_to_nothing() {
        let data = Dataset::new(vec![restaurant(1, "India", "Delhi", "Cafe")]);
        let filtered = data.filter_countries(&["Qatar"]);
        let pages = build_pages(&filtered, PageKind::Home);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].stats[0].value, 0);
    }

    #[test]
    fn test_page_kind() {
        assert_eq!(PageKind::from_arg("city"), PageKind::City);
        assert_eq!(PageKind::from_arg("all"), PageKind::All);
        assert_eq!(build_pages(&sample(), PageKind::All).len(), 4);
    }
}
