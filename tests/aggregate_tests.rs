//! Period aggregation: worked totals, per-kind breakdown, max hours,
//! earnings.

use chrono::{NaiveDate, NaiveTime};
use rtimesheet::config::Config;
use rtimesheet::core::aggregate::Aggregator;
use rtimesheet::core::calendar::{week_of, DateRange};
use rtimesheet::models::adjust_kind::AdjustKind;
use rtimesheet::models::day_entry::{Adjustment, DayEntry};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

fn test_config() -> Config {
    Config {
        database: ":memory:".to_string(),
        standard_day_hours: 7.5,
        hourly_rate: 97.0,
        vat_rate: 0.20,
        currency: "GBP".to_string(),
        region: "england-and-wales".to_string(),
    }
}

fn clocked(date: NaiveDate) -> DayEntry {
    // 09:00-17:00 with 30m lunch = 450 minutes
    DayEntry {
        date,
        clock_in: Some(t(9, 0)),
        lunch: Some(30),
        clock_out: Some(t(17, 0)),
        ..Default::default()
    }
}

fn adjusted(date: NaiveDate, kind: AdjustKind, minutes: i64) -> DayEntry {
    DayEntry {
        date,
        adjustments: vec![Adjustment { kind, minutes }],
        ..Default::default()
    }
}

#[test]
fn worked_minutes_derive_from_clocks() {
    let entry = clocked(d(2024, 12, 30));
    assert_eq!(entry.worked_minutes(), 450);

    // missing clock-out means nothing worked yet
    let mut open = clocked(d(2024, 12, 30));
    open.clock_out = None;
    assert_eq!(open.worked_minutes(), 0);
}

#[test]
fn total_worked_respects_the_range() {
    let agg = Aggregator::new(&test_config());
    let entries = vec![clocked(d(2025, 3, 3)), clocked(d(2025, 3, 10))];

    let week = week_of(d(2025, 3, 3));
    assert_eq!(agg.total_worked(&entries, week), 450);

    let both = DateRange::new(d(2025, 3, 1), d(2025, 3, 31));
    assert_eq!(agg.total_worked(&entries, both), 900);
}

#[test]
fn adjustment_totals_group_by_kind() {
    let agg = Aggregator::new(&test_config());
    let entries = vec![
        adjusted(d(2025, 3, 3), AdjustKind::Leave, 450),
        adjusted(d(2025, 3, 4), AdjustKind::Sick, 450),
        adjusted(d(2025, 3, 5), AdjustKind::PublicHoliday, 450),
        adjusted(d(2025, 3, 6), AdjustKind::Training, 120),
    ];

    let range = DateRange::new(d(2025, 3, 1), d(2025, 3, 31));
    let totals = agg.adjustment_totals(&entries, range);

    assert_eq!(totals.leave, 450);
    assert_eq!(totals.sick, 450);
    assert_eq!(totals.public_holiday, 450);
    assert_eq!(totals.training, 120);
    assert_eq!(totals.total(), 1470);
}

#[test]
fn max_hours_only_reacts_to_public_holidays() {
    let agg = Aggregator::new(&test_config());
    // Week of Mon 2024-12-30: Sat Dec 28 .. Fri Jan 3, five weekdays
    let week = week_of(d(2024, 12, 30));

    // No adjustments: 5 × 7.5h
    assert_eq!(agg.max_minutes(&[], week), 2250);

    // A public holiday reduces the maximum by exactly its hours
    let ph = vec![adjusted(d(2025, 1, 1), AdjustKind::PublicHoliday, 450)];
    assert_eq!(agg.max_minutes(&ph, week), 1800);

    // Leave / Sick / Training of the same size leave it untouched
    for kind in [AdjustKind::Leave, AdjustKind::Sick, AdjustKind::Training] {
        let entries = vec![adjusted(d(2025, 1, 1), kind, 450)];
        assert_eq!(agg.max_minutes(&entries, week), 2250, "{kind:?}");
    }
}

#[test]
fn week_scenario_from_history() {
    // DayEntry(2024-12-30, 7.5h worked) in a week with no holidays:
    // max is 37.5h and the worked total is 7.5h
    let agg = Aggregator::new(&test_config());
    let entries = vec![clocked(d(2024, 12, 30))];
    let week = week_of(d(2024, 12, 30));

    let summary = agg.summarize(&entries, week);
    assert_eq!(summary.worked, 450);
    assert_eq!(summary.max, 2250);
    assert_eq!(summary.total(), 450);
}

#[test]
fn earnings_follow_the_hourly_rate() {
    let agg = Aggregator::new(&test_config());
    assert_eq!(agg.earnings(450), 7.5 * 97.0);
    assert_eq!(agg.earnings(0), 0.0);
}

#[test]
fn aggregation_is_deterministic() {
    let agg = Aggregator::new(&test_config());
    let entries = vec![
        clocked(d(2025, 3, 3)),
        adjusted(d(2025, 3, 4), AdjustKind::Leave, 450),
    ];
    let range = DateRange::new(d(2025, 3, 1), d(2025, 3, 31));

    let first = agg.summarize(&entries, range);
    let second = agg.summarize(&entries, range);
    assert_eq!(first.worked, second.worked);
    assert_eq!(first.max, second.max);
    assert_eq!(first.adjustments, second.adjustments);
}

#[test]
fn blank_entry_counts_as_missing() {
    let agg = Aggregator::new(&test_config());
    let blank = DayEntry::new(d(2025, 3, 3));
    assert!(blank.is_blank());

    let range = DateRange::new(d(2025, 3, 1), d(2025, 3, 31));
    assert_eq!(agg.total_worked(&[blank.clone()], range), 0);
    assert_eq!(
        agg.max_minutes(&[blank], range),
        agg.max_minutes(&[], range)
    );
}
