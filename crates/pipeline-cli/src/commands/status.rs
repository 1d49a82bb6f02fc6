//! Status command implementation

use colored::Colorize;
use pipeline_core::{CsvManifest, ManifestRow, PipelineConfig};

use crate::error::Result;

/// Columns shown in the status table
const STATUS_COLUMNS: [&str; 6] = ["ts", "stage", "original_name", "action", "size_bytes", "sha256"];

/// Cells longer than this are shortened with `...`
const MAX_CELL_WIDTH: usize = 50;

/// Run the status command
///
/// Prints the last `limit` manifest entries of a project. A project
/// without a manifest is reported, not treated as an error.
pub fn run_status(config: &PipelineConfig, project: &str, limit: usize, json: bool) -> Result<()> {
    let manifest = CsvManifest::new(config.manifest_path(project));

    if !manifest.exists() {
        if json {
            println!("[]");
        } else {
            println!("No manifest found for project: {}", project);
            println!("Expected: {}", manifest.path().display());
        }
        return Ok(());
    }

    let rows = manifest.read_rows()?;
    let recent = &rows[rows.len().saturating_sub(limit)..];

    if json {
        println!("{}", serde_json::to_string_pretty(recent)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("Manifest is empty for project: {}", project);
        return Ok(());
    }

    let rule = "=".repeat(60);
    println!();
    println!("{}", rule);
    println!("{}:       {}", "Project".dimmed(), project.cyan());
    println!("{}:      {}", "Manifest".dimmed(), manifest.path().display());
    println!("{}: {}", "Total entries".dimmed(), rows.len());
    println!("Showing last {} entries:", recent.len());
    println!("{}", rule);
    println!();
    print!("{}", format_table(recent));
    println!();
    println!("{}", rule);

    Ok(())
}

fn row_cells(row: &ManifestRow) -> [String; 6] {
    [
        row.ts.clone(),
        row.stage.clone(),
        row.original_name.clone(),
        row.action.to_string(),
        row.size_bytes.to_string(),
        row.sha256.clone(),
    ]
}

fn shorten(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let kept: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{kept}...")
    }
}

/// Render rows as an aligned plain-text table with a header line.
pub fn format_table(rows: &[ManifestRow]) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| row_cells(row).map(|c| shorten(&c)))
        .collect();

    let mut widths = STATUS_COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = render_line(STATUS_COLUMNS.iter().copied(), &widths);
    for row in &cells {
        out.push_str(&render_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn render_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = values
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}
