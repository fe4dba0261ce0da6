//! Allocation coverage: how a date's ticket allocations compare to the
//! hours actually worked. Under- and over-allocation are flagged states
//! shown to the user, never errors.

use crate::models::allocation::Allocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Nothing worked on that date.
    None,
    /// Hours worked but no allocations recorded yet.
    Unallocated,
    Under,
    Over,
    Exact,
}

impl Coverage {
    /// Single-character marker used in week and allocation views.
    pub fn glyph(&self) -> &'static str {
        match self {
            Coverage::None => "-",
            Coverage::Unallocated => "?",
            Coverage::Under => "↓",
            Coverage::Over => "↑",
            Coverage::Exact => "✓",
        }
    }
}

/// Classify a date. Total over all inputs: exactly one variant applies
/// for any non-negative worked total and any allocation set.
pub fn coverage(worked_minutes: i64, allocations: &[Allocation]) -> Coverage {
    if worked_minutes == 0 {
        return Coverage::None;
    }
    if allocations.is_empty() {
        return Coverage::Unallocated;
    }
    let allocated: i64 = allocations.iter().map(|a| a.minutes).sum();
    match allocated.cmp(&worked_minutes) {
        std::cmp::Ordering::Less => Coverage::Under,
        std::cmp::Ordering::Greater => Coverage::Over,
        std::cmp::Ordering::Equal => Coverage::Exact,
    }
}
