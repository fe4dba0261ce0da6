use crate::core::calendar::{self, DateRange};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
}

/// A derived view period: granularity plus anchor date, resolved into a
/// concrete range by the billing calendar. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub granularity: Granularity,
    pub anchor: NaiveDate,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self {
            granularity: Granularity::Year,
            anchor: NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year"),
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            granularity: Granularity::Month,
            anchor: calendar::month_bounds(year, month).start,
        }
    }

    pub fn week(anchor: NaiveDate) -> Self {
        Self {
            granularity: Granularity::Week,
            anchor: calendar::week_start(anchor),
        }
    }

    pub fn day(anchor: NaiveDate) -> Self {
        Self {
            granularity: Granularity::Day,
            anchor,
        }
    }

    pub fn range(&self) -> DateRange {
        match self.granularity {
            Granularity::Year => DateRange::new(
                NaiveDate::from_ymd_opt(self.anchor.year(), 1, 1).expect("valid year"),
                NaiveDate::from_ymd_opt(self.anchor.year(), 12, 31).expect("valid year"),
            ),
            Granularity::Month => calendar::month_bounds(self.anchor.year(), self.anchor.month()),
            Granularity::Week => calendar::week_of(self.anchor),
            Granularity::Day => DateRange::new(self.anchor, self.anchor),
        }
    }

    /// The calendar months this period touches. A boundary week reports
    /// both adjacent months, every other period exactly its own.
    pub fn months(&self) -> Vec<(i32, u32)> {
        match self.granularity {
            Granularity::Year => calendar::fiscal_year_months(self.anchor.year()),
            Granularity::Week => {
                let range = self.range();
                let first = (range.start.year(), range.start.month());
                let last = (range.end.year(), range.end.month());
                if first == last {
                    vec![first]
                } else {
                    vec![first, last]
                }
            }
            _ => vec![(self.anchor.year(), self.anchor.month())],
        }
    }

    pub fn end(&self) -> NaiveDate {
        self.range().end
    }

    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Year => self.anchor.format("%Y").to_string(),
            Granularity::Month => self.anchor.format("%B %Y").to_string(),
            Granularity::Week => {
                let range = self.range();
                format!(
                    "{} - {}",
                    range.start.format("%b %d"),
                    range.end.format("%b %d, %Y")
                )
            }
            Granularity::Day => self.anchor.format("%a %b %d, %Y").to_string(),
        }
    }
}

