use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

/// Longest ticket code accepted, matching the client billing system.
pub const MAX_TICKET_ID_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Ticket {
    pub id: String,          // ⇔ tickets.id (TEXT, PK, uppercase)
    pub description: String, // ⇔ tickets.description (TEXT NOT NULL)
    pub archived: bool,      // ⇔ tickets.archived (INT 0/1)
    pub created_at: NaiveDate,
}

impl Ticket {
    pub fn new(id: &str, description: &str, created_at: NaiveDate) -> AppResult<Self> {
        let id = normalize_ticket_id(id)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::Validation("ticket description is required".into()));
        }
        Ok(Self {
            id,
            description: description.to_string(),
            archived: false,
            created_at,
        })
    }
}

/// Uppercase and validate a ticket id: 1..=8 chars, alphanumeric with
/// internal dashes (e.g. "PROJ-123").
pub fn normalize_ticket_id(raw: &str) -> AppResult<String> {
    let id = raw.trim().to_uppercase();
    if id.is_empty() {
        return Err(AppError::Validation("ticket id is required".into()));
    }
    if id.len() > MAX_TICKET_ID_LEN {
        return Err(AppError::Validation(format!(
            "ticket id '{id}' exceeds {MAX_TICKET_ID_LEN} characters"
        )));
    }
    let re = Regex::new(r"^[A-Z0-9][A-Z0-9-]*$").expect("static pattern");
    if !re.is_match(&id) {
        return Err(AppError::Validation(format!(
            "ticket id '{id}' may only contain letters, digits and dashes"
        )));
    }
    Ok(id)
}
