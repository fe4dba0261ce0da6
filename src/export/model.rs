// src/export/model.rs

use serde::Serialize;

/// Flat invoice row: one allocation joined with its ticket, priced at
/// the configured hourly rate.
#[derive(Serialize, Clone, Debug)]
pub struct InvoiceLine {
    pub date: String,
    pub ticket_id: String,
    pub description: String,
    pub hours: f64,
    pub amount: f64,
    pub entered_on_client: bool,
}

/// Totals block appended to the report.
#[derive(Serialize, Clone, Debug)]
pub struct InvoiceTotals {
    pub hours: f64,
    pub net: f64,
    pub vat: f64,
    pub gross: f64,
    pub currency: String,
}

/// Full report payload for the JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct InvoiceReport {
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
}
