//! Navigation state machine for the browse session.
//!
//! The current view is an explicit value, not process-wide state: every
//! transition takes a state and returns the next one, so the whole
//! machine is unit-testable without a terminal attached.
//!
//! Week view moves within the current month's week list. Stepping past
//! either end is an explicit month switch: going left lands on the
//! previous month's last week, going right on the next month's first
//! week. When the months split mid-week those are the same calendar
//! week (the shared boundary week), so no day is skipped or duplicated.

use crate::core::calendar::{self, DateRange};
use crate::models::period::{Granularity, Period};
use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Year {
        year: i32,
    },
    Month {
        year: i32,
        month: u32,
    },
    Week {
        year: i32,
        month: u32,
        week_start: NaiveDate,
    },
    Day {
        date: NaiveDate,
        /// Week the day view was drilled into from.
        entered_from: NaiveDate,
    },
}

impl NavState {
    /// Initial state: week view anchored on today's billing week.
    pub fn initial(today: NaiveDate) -> Self {
        NavState::Week {
            year: today.year(),
            month: today.month(),
            week_start: calendar::week_start(today),
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            NavState::Year { .. } => Granularity::Year,
            NavState::Month { .. } => Granularity::Month,
            NavState::Week { .. } => Granularity::Week,
            NavState::Day { .. } => Granularity::Day,
        }
    }

    /// The derived period this state displays.
    pub fn period(&self) -> Period {
        match *self {
            NavState::Year { year } => Period::year(year),
            NavState::Month { year, month } => Period::month(year, month),
            NavState::Week { week_start, .. } => Period::week(week_start),
            NavState::Day { date, .. } => Period::day(date),
        }
    }

    pub fn range(&self) -> DateRange {
        self.period().range()
    }

    /// Move one step back in time (one year / month / week). No-op in
    /// day view.
    pub fn left(self) -> Self {
        match self {
            NavState::Year { year } => NavState::Year { year: year - 1 },
            NavState::Month { year, month } => {
                let (year, month) = calendar::prev_month(year, month);
                NavState::Month { year, month }
            }
            NavState::Week {
                year,
                month,
                week_start,
            } => {
                let weeks = calendar::weeks_in_month(year, month);
                let idx = calendar::find_week_index(&weeks, week_start);
                if idx > 0 {
                    NavState::Week {
                        year,
                        month,
                        week_start: weeks[idx - 1],
                    }
                } else {
                    // Explicit month switch, landing on the boundary week.
                    let (py, pm) = calendar::prev_month(year, month);
                    let prev_weeks = calendar::weeks_in_month(py, pm);
                    NavState::Week {
                        year: py,
                        month: pm,
                        week_start: *prev_weeks.last().expect("month has weeks"),
                    }
                }
            }
            day @ NavState::Day { .. } => day,
        }
    }

    /// Move one step forward in time. No-op in day view.
    pub fn right(self) -> Self {
        match self {
            NavState::Year { year } => NavState::Year { year: year + 1 },
            NavState::Month { year, month } => {
                let (year, month) = calendar::next_month(year, month);
                NavState::Month { year, month }
            }
            NavState::Week {
                year,
                month,
                week_start,
            } => {
                let weeks = calendar::weeks_in_month(year, month);
                let idx = calendar::find_week_index(&weeks, week_start);
                if idx + 1 < weeks.len() {
                    NavState::Week {
                        year,
                        month,
                        week_start: weeks[idx + 1],
                    }
                } else {
                    let (ny, nm) = calendar::next_month(year, month);
                    let next_weeks = calendar::weeks_in_month(ny, nm);
                    NavState::Week {
                        year: ny,
                        month: nm,
                        week_start: next_weeks[0],
                    }
                }
            }
            day @ NavState::Day { .. } => day,
        }
    }

    /// Drill down one level into the row under the cursor. Without a
    /// selection, or past the end of the row list, nothing happens.
    pub fn enter(self, selection: Option<usize>) -> Self {
        let Some(sel) = selection else {
            return self;
        };
        match self {
            NavState::Year { year } => {
                let months = calendar::fiscal_year_months(year);
                match months.get(sel) {
                    Some(&(y, m)) => NavState::Month { year: y, month: m },
                    None => self,
                }
            }
            NavState::Month { year, month } => {
                let weeks = calendar::weeks_in_month(year, month);
                match weeks.get(sel) {
                    Some(&ws) => NavState::Week {
                        year,
                        month,
                        week_start: ws,
                    },
                    None => self,
                }
            }
            NavState::Week { week_start, .. } => {
                if sel < 7 {
                    NavState::Day {
                        date: week_start + Days::new(sel as u64),
                        entered_from: week_start,
                    }
                } else {
                    self
                }
            }
            day @ NavState::Day { .. } => day,
        }
    }

    /// Climb back up one level. Escape from a day re-derives its week:
    /// the anchor month is the month the day itself belongs to, whose
    /// week list always contains that week.
    pub fn escape(self) -> Self {
        match self {
            NavState::Year { .. } => self,
            NavState::Month { year, .. } => NavState::Year { year },
            NavState::Week { year, month, .. } => NavState::Month { year, month },
            NavState::Day { date, .. } => NavState::Week {
                year: date.year(),
                month: date.month(),
                week_start: calendar::week_start(date),
            },
        }
    }

    /// Jump to today, preserving the current granularity.
    pub fn goto_today(self, today: NaiveDate) -> Self {
        match self {
            NavState::Year { .. } => NavState::Year { year: today.year() },
            NavState::Month { .. } => NavState::Month {
                year: today.year(),
                month: today.month(),
            },
            NavState::Week { .. } => NavState::Week {
                year: today.year(),
                month: today.month(),
                week_start: calendar::week_start(today),
            },
            NavState::Day { .. } => NavState::Day {
                date: today,
                entered_from: calendar::week_start(today),
            },
        }
    }
}
