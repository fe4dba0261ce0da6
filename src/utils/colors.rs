/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::core::coverage::Coverage;

/// Coverage marker color:
/// exact → green, under/unallocated → yellow, over → red, none → grey.
pub fn color_for_coverage(cov: Coverage) -> &'static str {
    match cov {
        Coverage::Exact => GREEN,
        Coverage::Under | Coverage::Unallocated => YELLOW,
        Coverage::Over => RED,
        Coverage::None => GREY,
    }
}

/// Grey out placeholder values ("-", "--:--", empty).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
