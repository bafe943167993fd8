//! Text rendering for command output.

use crate::error::Result;
use crate::product::Product;
use crate::storage::CacheStats;
use crate::validation::FieldErrors;

use super::OutputFormat;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a product list followed by the record count.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn product_list(products: &[Product], format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Json => return Ok(serde_json::to_string_pretty(products)?),
        OutputFormat::Plain => products
            .iter()
            .map(|p| format!("{}\t{}\n", p.id, p.name))
            .collect::<String>(),
        OutputFormat::Table => product_table(products),
    };
    out.push_str(&format!("Total records: {}", products.len()));
    Ok(out)
}

fn product_table(products: &[Product]) -> String {
    let headers = ["ID", "NAME", "RELEASE", "REVISION"];
    let rows: Vec<[String; 4]> = products
        .iter()
        .map(|p| {
            [
                p.id.clone(),
                p.name.clone(),
                p.date_release.format(DATE_FORMAT).to_string(),
                p.date_revision.format(DATE_FORMAT).to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells = headers.map(String::from);
    for row in std::iter::once(&header_cells).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

/// Render a single product.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn product_detail(product: &Product, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(product)?);
    }

    let fields = [
        ("ID", product.id.clone()),
        ("Name", product.name.clone()),
        ("Description", product.description.clone()),
        ("Logo", product.logo.clone()),
        ("Release date", product.date_release.format(DATE_FORMAT).to_string()),
        ("Revision date", product.date_revision.format(DATE_FORMAT).to_string()),
    ];
    let lines: Vec<String> = match format {
        OutputFormat::Table => fields
            .iter()
            .map(|(label, value)| format!("{}  {value}", pad(label, 13)))
            .collect(),
        _ => fields
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect(),
    };
    Ok(lines.join("\n"))
}

/// Render validation failures, one field per line.
#[must_use]
pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render cache status for humans.
#[must_use]
pub fn status(base_url: &str, stats: &CacheStats, cache_path: &str) -> String {
    let refreshed = stats
        .last_refreshed
        .map_or_else(|| "never".to_string(), |t| t.to_rfc3339());
    [
        "fincat status".to_string(),
        "-------------".to_string(),
        format!("Endpoint:        {base_url}"),
        format!("Cache:           {cache_path}"),
        format!("Cached products: {}", stats.cached_products),
        format!(
            "Selected:        {}",
            stats.selected_id.as_deref().unwrap_or("none")
        ),
        format!("Last refreshed:  {refreshed}"),
    ]
    .join("\n")
}
