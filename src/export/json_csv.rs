// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{InvoiceLine, InvoiceReport, InvoiceTotals};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed: lines plus the totals block.
pub(crate) fn export_json(report: &InvoiceReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV (header incluso grazie a serde). The totals go into a
/// trailing comment-style row so the file stays machine-readable.
pub(crate) fn export_csv(
    lines: &[InvoiceLine],
    totals: &InvoiceTotals,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in lines {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.write_record([
        "TOTAL",
        "",
        "",
        &format!("{:.2}", totals.hours),
        &format!("{:.2}", totals.net),
        &totals.currency,
    ])
    .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}
