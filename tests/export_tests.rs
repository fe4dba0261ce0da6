use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, rts, setup_test_db, temp_out};

fn seed_allocations(db_path: &str) {
    init_db_with_data(db_path);

    rts()
        .args(["--db", db_path, "ticket", "add", "ABC123", "Backend work"])
        .assert()
        .success();
    rts()
        .args(["--db", db_path, "ticket", "add", "OPS-7", "Support rota"])
        .assert()
        .success();

    rts()
        .args(["--db", db_path, "alloc", "set", "2024-12-30", "ABC123", "5"])
        .assert()
        .success();
    rts()
        .args([
            "--db", db_path, "alloc", "set", "2024-12-30", "OPS-7", "2.5", "--client",
        ])
        .assert()
        .success();
    // outside December, to prove range filtering
    rts()
        .args([
            "--db", db_path, "day", "2025-01-06", "--in", "09:00", "--out", "12:00",
        ])
        .assert()
        .success();
    rts()
        .args(["--db", db_path, "alloc", "set", "2025-01-06", "ABC123", "3"])
        .assert()
        .success();
}

#[test]
fn test_export_csv_invoice_lines_and_totals() {
    let db_path = setup_test_db("export_csv");
    let out_file = temp_out("export_csv", "csv");
    seed_allocations(&db_path);

    rts()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out_file, "--range",
            "2024-12",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out_file).expect("read export");
    assert!(content.contains("ABC123"));
    assert!(content.contains("Backend work"));
    assert!(content.contains("OPS-7"));
    assert!(content.contains("TOTAL"));
    // 7.5h at 97/h
    assert!(content.contains("727.5"), "net total missing: {content}");
    // January allocation filtered out by the range
    assert!(!content.contains("2025-01-06"));
}

#[test]
fn test_export_json_report_totals() {
    let db_path = setup_test_db("export_json");
    let out_file = temp_out("export_json", "json");
    seed_allocations(&db_path);

    rts()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out_file, "--range",
            "2024-12:2025-01",
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out_file).expect("read export");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    let lines = report["lines"].as_array().expect("lines array");
    assert_eq!(lines.len(), 3);
    assert_eq!(report["totals"]["hours"].as_f64(), Some(10.5));
    assert_eq!(report["totals"]["currency"].as_str(), Some("GBP"));

    // gross = net * 1.2 at the default VAT rate
    let net = report["totals"]["net"].as_f64().expect("net");
    let gross = report["totals"]["gross"].as_f64().expect("gross");
    assert!((gross - net * 1.2).abs() < 1e-6);

    // the --client flag survives into the report
    let ops_line = lines
        .iter()
        .find(|l| l["ticket_id"] == "OPS-7")
        .expect("OPS-7 line");
    assert_eq!(ops_line["entered_on_client"].as_bool(), Some(true));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    rts()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = setup_test_db("export_overwrite");
    let out_file = temp_out("export_overwrite", "csv");
    seed_allocations(&db_path);

    fs::write(&out_file, "sentinel").expect("pre-create");

    // `ensure_writable` prompts; an empty stdin answer means "no"
    rts()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out_file, "--range",
            "2024-12",
        ])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out_file).expect("read"), "sentinel");

    // --force overwrites
    rts()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out_file, "--range",
            "2024-12", "--force",
        ])
        .assert()
        .success();
    assert!(fs::read_to_string(&out_file).expect("read").contains("TOTAL"));
}

#[test]
fn test_backup_copies_and_compresses() {
    let db_path = setup_test_db("backup_copy");
    let out_file = temp_out("backup_copy", "sqlite");
    init_db_with_data(&db_path);

    rts()
        .args(["--db", &db_path, "backup", "--file", &out_file])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&out_file).expect("backup exists").len() > 0);

    // refuse silent overwrite
    rts()
        .args(["--db", &db_path, "backup", "--file", &out_file])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    // compressed variant replaces the plain copy with a .zip
    let zip_file = temp_out("backup_zip", "sqlite");
    rts()
        .args([
            "--db", &db_path, "backup", "--file", &zip_file, "--compress",
        ])
        .assert()
        .success();
    assert!(!std::path::Path::new(&zip_file).exists());
    let zipped = std::path::Path::new(&zip_file).with_extension("zip");
    assert!(zipped.exists());
    fs::remove_file(zipped).ok();
}
