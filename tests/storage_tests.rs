//! Repository round-trips against a real SQLite file, exercised through
//! the library API.

use chrono::{NaiveDate, NaiveTime};
use rtimesheet::db::queries;
use rtimesheet::errors::AppError;
use rtimesheet::models::adjust_kind::AdjustKind;
use rtimesheet::models::allocation::Allocation;
use rtimesheet::models::day_entry::{Adjustment, DayEntry};
use rtimesheet::models::ticket::Ticket;

mod common;
use common::{open_db, setup_test_db};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

#[test]
fn day_entry_round_trip_keeps_adjustment_order() {
    let db = setup_test_db("storage_day_round_trip");
    let mut conn = open_db(&db);

    let entry = DayEntry {
        date: d(2025, 6, 2),
        clock_in: Some(t(9, 0)),
        lunch: Some(30),
        clock_out: Some(t(17, 0)),
        adjustments: vec![
            Adjustment {
                kind: AdjustKind::Training,
                minutes: 120,
            },
            Adjustment {
                kind: AdjustKind::Leave,
                minutes: 60,
            },
        ],
        comment: Some("standup + course".to_string()),
    };
    queries::upsert_day(&mut conn, &entry).expect("upsert");

    let loaded = queries::get_day(&conn, &d(2025, 6, 2))
        .expect("get")
        .expect("entry exists");
    assert_eq!(loaded, entry);
    // order is the insertion order, not kind order
    assert_eq!(loaded.adjustments[0].kind, AdjustKind::Training);

    // a date has at most one entry: upserting replaces it
    let replacement = DayEntry {
        adjustments: Vec::new(),
        ..entry.clone()
    };
    queries::upsert_day(&mut conn, &replacement).expect("upsert again");
    let loaded = queries::get_day(&conn, &d(2025, 6, 2))
        .expect("get")
        .expect("entry exists");
    assert!(loaded.adjustments.is_empty());
}

#[test]
fn missing_day_is_none() {
    let db = setup_test_db("storage_missing_day");
    let conn = open_db(&db);
    assert!(
        queries::get_day(&conn, &d(2030, 1, 1))
            .expect("get")
            .is_none()
    );
}

#[test]
fn invalid_clocks_are_rejected_and_not_persisted() {
    let db = setup_test_db("storage_invalid_clocks");
    let mut conn = open_db(&db);

    let entry = DayEntry {
        date: d(2025, 6, 2),
        clock_in: Some(t(17, 0)),
        clock_out: Some(t(9, 0)),
        ..Default::default()
    };

    match queries::upsert_day(&mut conn, &entry) {
        Err(AppError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(
        queries::get_day(&conn, &d(2025, 6, 2))
            .expect("get")
            .is_none(),
        "rejected edit must leave nothing behind"
    );
}

#[test]
fn range_query_returns_ordered_entries() {
    let db = setup_test_db("storage_range");
    let mut conn = open_db(&db);

    for day in [3, 1, 2] {
        let entry = DayEntry {
            date: d(2025, 6, day),
            clock_in: Some(t(9, 0)),
            clock_out: Some(t(10, 0)),
            ..Default::default()
        };
        queries::upsert_day(&mut conn, &entry).expect("upsert");
    }

    let entries =
        queries::get_days_in_range(&conn, &d(2025, 6, 1), &d(2025, 6, 2)).expect("range");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, d(2025, 6, 1));
    assert_eq!(entries[1].date, d(2025, 6, 2));
}

#[test]
fn allocations_upsert_replaces_per_ticket_and_date() {
    let db = setup_test_db("storage_alloc_upsert");
    let conn = open_db(&db);

    let ticket = Ticket::new("ABC123", "Backend work", d(2025, 1, 1)).expect("ticket");
    queries::create_ticket(&conn, &ticket).expect("create");

    let mut alloc = Allocation::new("ABC123", d(2025, 6, 2), 300);
    queries::upsert_allocation(&conn, &alloc).expect("insert");

    alloc.minutes = 450;
    alloc.entered_on_client = true;
    queries::upsert_allocation(&conn, &alloc).expect("replace");

    let loaded = queries::get_allocations(&conn, &d(2025, 6, 2)).expect("get");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].minutes, 450);
    assert!(loaded[0].entered_on_client);

    assert_eq!(
        queries::allocated_minutes(&conn, &d(2025, 6, 2)).expect("sum"),
        450
    );
}

#[test]
fn allocation_requires_an_existing_ticket() {
    let db = setup_test_db("storage_alloc_no_ticket");
    let conn = open_db(&db);

    let alloc = Allocation::new("GHOST", d(2025, 6, 2), 60);
    match queries::upsert_allocation(&conn, &alloc) {
        Err(AppError::NotFound(_)) => {}
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[test]
fn deleting_an_allocation_twice_reports_not_found() {
    let db = setup_test_db("storage_alloc_delete_twice");
    let conn = open_db(&db);

    let ticket = Ticket::new("ABC123", "Backend work", d(2025, 1, 1)).expect("ticket");
    queries::create_ticket(&conn, &ticket).expect("create");
    queries::upsert_allocation(&conn, &Allocation::new("ABC123", d(2025, 6, 2), 60))
        .expect("insert");

    queries::delete_allocation(&conn, "ABC123", &d(2025, 6, 2)).expect("first delete");
    match queries::delete_allocation(&conn, "ABC123", &d(2025, 6, 2)) {
        Err(AppError::NotFound(_)) => {}
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[test]
fn duplicate_ticket_id_is_a_validation_error() {
    let db = setup_test_db("storage_ticket_dup");
    let conn = open_db(&db);

    let ticket = Ticket::new("ABC123", "Backend work", d(2025, 1, 1)).expect("ticket");
    queries::create_ticket(&conn, &ticket).expect("create");

    match queries::create_ticket(&conn, &ticket) {
        Err(AppError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn ticket_id_rules_are_enforced_at_construction() {
    // lowercased input is normalized, overlong and malformed ids refused
    let ok = Ticket::new("abc123", "Backend work", d(2025, 1, 1)).expect("ticket");
    assert_eq!(ok.id, "ABC123");

    assert!(Ticket::new("TOOLONG-ID", "x", d(2025, 1, 1)).is_err());
    assert!(Ticket::new("BAD ID", "x", d(2025, 1, 1)).is_err());
    assert!(Ticket::new("", "x", d(2025, 1, 1)).is_err());
    assert!(Ticket::new("ABC123", "   ", d(2025, 1, 1)).is_err());
}

#[test]
fn archived_tickets_drop_out_of_active_listings() {
    let db = setup_test_db("storage_ticket_archive");
    let conn = open_db(&db);

    for id in ["AAA", "BBB"] {
        let ticket = Ticket::new(id, "work", d(2025, 1, 1)).expect("ticket");
        queries::create_ticket(&conn, &ticket).expect("create");
    }
    queries::set_ticket_archived(&conn, "AAA", true).expect("archive");

    let active = queries::list_tickets(&conn, false).expect("list");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "BBB");

    let all = queries::list_tickets(&conn, true).expect("list all");
    assert_eq!(all.len(), 2);

    // archived tickets remain valid allocation targets
    queries::upsert_allocation(&conn, &Allocation::new("AAA", d(2025, 6, 2), 60))
        .expect("allocation against archived ticket");
}

#[test]
fn ticket_delete_is_refused_while_referenced() {
    let db = setup_test_db("storage_ticket_refint");
    let conn = open_db(&db);

    let ticket = Ticket::new("ABC123", "Backend work", d(2025, 1, 1)).expect("ticket");
    queries::create_ticket(&conn, &ticket).expect("create");
    queries::upsert_allocation(&conn, &Allocation::new("ABC123", d(2024, 12, 30), 450))
        .expect("insert");

    match queries::delete_ticket(&conn, "ABC123") {
        Err(AppError::ReferentialIntegrity(_)) => {}
        other => panic!("expected referential integrity error, got {other:?}"),
    }

    // both sides untouched
    assert!(
        queries::get_ticket(&conn, "ABC123")
            .expect("get")
            .is_some()
    );
    assert_eq!(
        queries::get_allocations(&conn, &d(2024, 12, 30))
            .expect("get")
            .len(),
        1
    );

    // removing the allocation unblocks the delete
    queries::delete_allocation(&conn, "ABC123", &d(2024, 12, 30)).expect("delete alloc");
    queries::delete_ticket(&conn, "ABC123").expect("delete ticket");
    assert!(
        queries::get_ticket(&conn, "ABC123")
            .expect("get")
            .is_none()
    );
}

#[test]
fn search_matches_id_and_description() {
    let db = setup_test_db("storage_ticket_search");
    let conn = open_db(&db);

    let a = Ticket::new("PROJ-1", "Billing engine", d(2025, 1, 1)).expect("ticket");
    let b = Ticket::new("OPS-2", "Billing support rota", d(2025, 1, 1)).expect("ticket");
    let c = Ticket::new("DOC-3", "Handbook", d(2025, 1, 1)).expect("ticket");
    for t in [&a, &b, &c] {
        queries::create_ticket(&conn, t).expect("create");
    }

    let hits = queries::search_tickets(&conn, "Billing", false).expect("search");
    assert_eq!(hits.len(), 2);

    let hits = queries::search_tickets(&conn, "proj", false).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "PROJ-1");
}

#[test]
fn migration_ledger_records_entered_on_client() {
    let db = setup_test_db("storage_migration_ledger");
    let conn = open_db(&db);

    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log
             WHERE operation = 'migration_applied'
               AND target = '20250712_0001_add_entered_on_client'",
            [],
            |row| row.get(0),
        )
        .expect("ledger query");
    assert_eq!(applied, 1);

    // running migrations again must not duplicate the ledger row
    rtimesheet::db::initialize::init_db(&conn).expect("re-init");
    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log
             WHERE operation = 'migration_applied'
               AND target = '20250712_0001_add_entered_on_client'",
            [],
            |row| row.get(0),
        )
        .expect("ledger query");
    assert_eq!(applied, 1);
}
