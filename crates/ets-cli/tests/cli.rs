use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WORK_ORDER: &str = "\
EMERGENCY TRADE SERVICES Pty Ltd ATF The Emergency Trade Services Trust
To: SUSTAINE ELECTRICAL & SOLAR ETS Phone: 1300 755 455
Order Number: PO1529-MS01-001
Date: 4 Jun 2024
Customer Details: Lynda M Harraway
Site Address: 105 Hunter St, Burringbar NSW 2483
Customer Phone: 0407 840 570
Electrical MS
Client Instructions
Please attend site to investigate loss of power to the kitchen circuits.

Scope of Works
1.1. Investigate fault
";

fn ets(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ets").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_dir.path())
        .env("HOME", config_dir.path());
    cmd
}

#[test]
fn test_process_text_as_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.txt");
    fs::write(&input, WORK_ORDER).unwrap();

    let output = ets(&dir)
        .args(["process", "--no-geocode"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["work_order"]["order_number"], "PO1529-MS01-001");
    assert_eq!(json["work_order"]["site_location"]["geocoded"], false);
    assert_eq!(json["job_record"]["category_name"], "Emergency Electrical");
    assert_eq!(json["job_record"]["source"], "ETS PDF Parser");
}

#[test]
fn test_process_text_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.txt");
    fs::write(&input, WORK_ORDER).unwrap();

    ets(&dir)
        .args(["process", "--no-geocode", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== SITE INFORMATION ===\n"))
        .stdout(predicate::str::contains("=== SCOPE OF WORKS ===\n1.1. Investigate fault"));
}

#[test]
fn test_process_email_channel_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.txt");
    fs::write(&input, WORK_ORDER).unwrap();

    ets(&dir)
        .args(["process", "--no-geocode", "--format", "record", "--channel", "email"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"ETS Email Integration\""))
        .stdout(predicate::str::contains("\"work_order\"").not());
}

#[test]
fn test_process_missing_file() {
    let dir = TempDir::new().unwrap();

    ets(&dir)
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.docx");
    fs::write(&input, WORK_ORDER).unwrap();

    ets(&dir)
        .args(["process", "--no-geocode"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn test_batch_routes_files() {
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let processed = dir.path().join("processed");
    let failed = dir.path().join("failed");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("good.txt"), WORK_ORDER).unwrap();
    fs::write(inbox.join("blank.txt"), "   \n").unwrap();
    fs::write(inbox.join("broken.pdf"), b"not really a pdf").unwrap();

    ets(&dir)
        .args(["batch", "--no-geocode", "--continue-on-error", "--summary"])
        .arg(inbox.join("*").to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .arg("--processed-dir")
        .arg(&processed)
        .arg("--failed-dir")
        .arg(&failed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files to process"));

    assert!(processed.join("good.txt").exists());
    assert!(failed.join("blank.txt").exists());
    assert!(failed.join("broken.pdf").exists());
    assert!(!inbox.join("good.txt").exists());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("good.json")).unwrap()).unwrap();
    assert_eq!(json["work_order"]["site_contact_name"], "Lynda M Harraway");

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,order_number"));
    assert!(summary.contains("good.txt,success,PO1529-MS01-001"));
    assert_eq!(summary.matches(",error,").count(), 2);
}

#[test]
fn test_batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("blank.txt");
    fs::write(&input, "").unwrap();

    ets(&dir)
        .args(["batch", "--no-geocode"])
        .arg(input.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_batch_keeps_files_with_same_name() {
    let dir = TempDir::new().unwrap();
    let processed = dir.path().join("processed");
    let out = dir.path().join("out");
    for (folder, order) in [("a", "PO1111-AA01-001"), ("b", "PO2222-BB01-001")] {
        let inbox = dir.path().join("inbox").join(folder);
        fs::create_dir_all(&inbox).unwrap();
        fs::write(
            inbox.join("order.txt"),
            WORK_ORDER.replace("PO1529-MS01-001", order),
        )
        .unwrap();
    }

    ets(&dir)
        .args(["batch", "--no-geocode"])
        .arg(dir.path().join("inbox").join("*").join("order.txt").to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .arg("--processed-dir")
        .arg(&processed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files to process"));

    let moved: Vec<String> = ["order.txt", "order-1.txt"]
        .iter()
        .map(|name| fs::read_to_string(processed.join(name)).unwrap())
        .collect();
    assert!(moved.iter().any(|text| text.contains("PO1111-AA01-001")));
    assert!(moved.iter().any(|text| text.contains("PO2222-BB01-001")));

    let numbers: Vec<String> = ["order.json", "order-1.json"]
        .iter()
        .map(|name| {
            let json: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(out.join(name)).unwrap()).unwrap();
            json["work_order"]["order_number"].as_str().unwrap().to_string()
        })
        .collect();
    assert!(numbers.contains(&"PO1111-AA01-001".to_string()));
    assert!(numbers.contains(&"PO2222-BB01-001".to_string()));
}

#[test]
fn test_config_init_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("ets.json");

    ets(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    ets(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "geocoder.enabled", "false"])
        .assert()
        .success();

    ets(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "geocoder.enabled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));

    ets(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "partner.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
