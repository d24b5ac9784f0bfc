//! Main pipeline: load, clean, filter, report.

use crate::cleaner::clean_records;
use crate::csv_loader::load_raw_records;
use crate::dataset::Dataset;
use crate::lookups::UnmappedPolicy;
use crate::render::{export_csv, render_json, render_text};
use crate::reports::{build_pages, PageKind};
use crate::Args;

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Instant;
use tracing::{info, warn};

/// Load the CSV and build the cleaned dataset.
pub fn load_dataset(args: &Args) -> Result<Dataset> {
    let raw = load_raw_records(&args.csv)?;
    let policy = UnmappedPolicy::from_arg(&args.on_unmapped);
    let (dataset, _stats) = clean_records(raw, policy)
        .context("Cleaning failed (rerun with --on-unmapped unknown to keep unmapped rows)")?;
    Ok(dataset)
}

/// Narrow the dataset to the selected countries. No selection keeps all.
pub fn apply_country_filter(dataset: Dataset, selected: &[String]) -> Dataset {
    if selected.is_empty() {
        return dataset;
    }

    let available = dataset.countries();
    for name in selected {
        if !available.contains(name) {
            warn!("Country not in dataset: {}", name);
        }
    }

    let filtered = dataset.filter_countries(selected);
    info!(
        "Country filter kept {} of {} restaurants",
        filtered.len(),
        dataset.len()
    );
    if filtered.is_empty() {
        warn!("Country filter matched no restaurants; pages will be empty");
    }
    filtered
}

/// Build the report text for the given arguments.
pub fn build_output(args: &Args) -> Result<String> {
    let dataset = load_dataset(args)?;

    if args.list_countries {
        return Ok(dataset.countries().join("\n") + "\n");
    }

    let dataset = apply_country_filter(dataset, &args.country);

    if let Some(ref path) = args.export {
        export_csv(&dataset, path)?;
    }

    let pages = build_pages(&dataset, PageKind::from_arg(&args.page));
    match args.format.as_str() {
        "json" => render_json(&pages),
        _ => Ok(render_text(&pages)),
    }
}

/// Run the pipeline and print the result to stdout.
pub fn run(args: Args) -> Result<()> {
    let start = Instant::now();

    let output = build_output(&args)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    info!("Done in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
