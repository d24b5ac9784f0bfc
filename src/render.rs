//! Output of page reports and of the cleaned dataset.

use crate::dataset::Dataset;
use crate::reports::{Cell, Page, Table};
use crate::utils::format_decimal;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use tracing::info;

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Int(v) => v.to_string(),
        Cell::Decimal(v) => format_decimal(*v),
    }
}

/// Render one table with aligned columns. Numbers are right-aligned.
fn render_table(out: &mut String, table: &Table) {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, text) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(text.chars().count());
            }
        }
    }

    let _ = writeln!(out, "--- {} ---", table.title);

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());

    if cells.is_empty() {
        let _ = writeln!(out, "(no rows)");
    }

    for (row, raw) in cells.iter().zip(&table.rows) {
        let line: Vec<String> = row
            .iter()
            .zip(raw)
            .zip(&widths)
            .map(|((text, cell), w)| match cell {
                Cell::Text(_) => format!("{:<width$}", text, width = *w),
                _ => format!("{:>width$}", text, width = *w),
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }

    out.push('\n');
}

/// Render pages as plain text.
pub fn render_text(pages: &[Page]) -> String {
    let mut out = String::new();

    for page in pages {
        let _ = writeln!(out, "=== {} ===\n", page.title);

        for stat in &page.stats {
            let _ = writeln!(out, "{}: {}", stat.label, stat.value);
        }
        if !page.stats.is_empty() {
            out.push('\n');
        }

        if !page.markers.is_empty() {
            let _ = writeln!(
                out,
                "Map: {} restaurant markers (use --format json for coordinates)\n",
                page.markers.len()
            );
        }

        for table in &page.tables {
            render_table(&mut out, table);
        }
    }

    out
}

/// Render pages as pretty-printed JSON.
pub fn render_json(pages: &[Page]) -> Result<String> {
    serde_json::to_string_pretty(pages).context("Failed to serialize pages")
}

/// Write the cleaned dataset as CSV to any writer.
pub fn write_csv<W: Write>(data: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in data.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export the cleaned dataset to a CSV file.
pub fn export_csv(data: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file {:?}", path))?;
    write_csv(data, file)?;
    info!("Exported {} rows to {:?}", data.len(), path);
    Ok(())
}
