// src/export/logic.rs

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{InvoiceLine, InvoiceReport, InvoiceTotals};
use crate::export::range::parse_range;
use crate::ui::messages::warning;

use chrono::NaiveDate;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the invoicing report: every allocation in the range joined
    /// with its ticket and priced at the configured hourly rate.
    ///
    /// - `format`: "csv" | "json"
    /// - `file`: absolute path of the output file
    /// - `range`: `None` (current month), `"all"`, or expressions like
    ///   `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `A:B` spans of the same shapes
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let date_bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let report = build_report(pool, cfg, date_bounds)?;

        if report.lines.is_empty() {
            warning("⚠️  No allocations found for selected range.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&report.lines, &report.totals, path)?,
            ExportFormat::Json => export_json(&report, path)?,
        }

        Ok(())
    }
}

pub(crate) fn build_report(
    pool: &mut DbPool,
    cfg: &Config,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<InvoiceReport> {
    let allocations = match bounds {
        Some((start, end)) => queries::get_allocations_in_range(&pool.conn, &start, &end)?,
        None => {
            // unbounded: everything ever allocated
            let min = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch");
            let max = NaiveDate::from_ymd_opt(9999, 12, 31).expect("far future");
            queries::get_allocations_in_range(&pool.conn, &min, &max)?
        }
    };

    // Description lookup, archived tickets included: history stays priced
    let tickets: HashMap<String, String> = queries::list_tickets(&pool.conn, true)?
        .into_iter()
        .map(|t| (t.id, t.description))
        .collect();

    let mut lines = Vec::with_capacity(allocations.len());
    let mut total_minutes = 0i64;

    for alloc in allocations {
        let hours = alloc.minutes as f64 / 60.0;
        total_minutes += alloc.minutes;
        lines.push(InvoiceLine {
            date: alloc.date_str(),
            description: tickets
                .get(&alloc.ticket_id)
                .cloned()
                .unwrap_or_default(),
            ticket_id: alloc.ticket_id,
            hours,
            amount: hours * cfg.hourly_rate,
            entered_on_client: alloc.entered_on_client,
        });
    }

    let net = total_minutes as f64 / 60.0 * cfg.hourly_rate;
    let vat = net * cfg.vat_rate;
    let totals = InvoiceTotals {
        hours: total_minutes as f64 / 60.0,
        net,
        vat,
        gross: net + vat,
        currency: cfg.currency.clone(),
    };

    Ok(InvoiceReport { lines, totals })
}
