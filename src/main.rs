//! Fome Zero - restaurant listings dashboard
//!
//! Loads the Zomato listings export, cleans it once, and prints the
//! dashboard pages (home, country, city, gastronomic) as text tables or JSON.

mod aggregate;
mod cleaner;
mod config;
mod csv_loader;
mod dataset;
mod lookups;
mod processor;
mod render;
mod reports;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fome Zero - restaurant listings dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "fomezero")]
#[command(version = "0.1.0")]
#[command(about = "Fome Zero - clean the Zomato export and print dashboard pages", long_about = None)]
pub struct Args {
    /// Listings CSV file
    #[arg(short, long, default_value = config::DEFAULT_CSV)]
    pub csv: PathBuf,

    /// Page to print
    #[arg(short, long, default_value = "all", value_parser = ["home", "country", "city", "gastronomic", "all"])]
    pub page: String,

    /// Only include these countries (repeatable; default is every country)
    #[arg(long)]
    pub country: Vec<String>,

    /// What to do with country or color codes missing from the lookup tables
    #[arg(long, default_value = "fail", value_parser = ["fail", "unknown"])]
    pub on_unmapped: String,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Also write the cleaned (and filtered) dataset to this CSV file
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Print the country filter options and exit
    #[arg(long, default_value = "false")]
    pub list_countries: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!("Fome Zero dashboard");
    info!("CSV: {:?}", args.csv);
    info!("Page: {}", args.page);

    // Validate paths
    if !args.csv.exists() {
        anyhow::bail!("CSV file not found: {:?}", args.csv);
    }

    processor::run(args)?;

    Ok(())
}
