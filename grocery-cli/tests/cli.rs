use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "grocery-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_seasons_writes_output() {
    let exe = env!("CARGO_BIN_EXE_grocery-cli");
    let output_path = temp_path("seasons");
    let status = Command::new(exe)
        .args(["--list-seasons", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let seasons: Vec<&str> = content.lines().skip(1).map(str::trim).collect();
    assert_eq!(seasons, ["Spring", "Summer", "Fall", "Winter"]);
}

#[test]
fn cli_json_report_reflects_add() {
    let exe = env!("CARGO_BIN_EXE_grocery-cli");
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .args([
            "--season",
            "Summer",
            "--store",
            "Walmart",
            "--add",
            "Walmart=  Oats  ",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["season"], "Summer");
    assert_eq!(report["notifications"][0]["title"], "Item added");
    let store = &report["stores"][0];
    assert_eq!(store["name"], "Walmart");
    assert_eq!(
        store["regular_items"],
        serde_json::json!(["Oats", "Rice", "Beans"])
    );
    assert_eq!(store["seasonal_items"], serde_json::json!(["Canned Corn"]));
}

#[test]
fn cli_reports_duplicate_without_changing_list() {
    let exe = env!("CARGO_BIN_EXE_grocery-cli");
    let output_path = temp_path("duplicate");
    let status = Command::new(exe)
        .args([
            "--store",
            "Walmart",
            "--add",
            "Walmart=rice",
            "--report",
            "markdown",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("> **Duplicate item**: rice is already in the list for Walmart"));
    assert!(content.contains("**Regular Items**\n\n- Rice\n- Beans\n"));
}

#[test]
fn cli_unknown_store_fails() {
    let exe = env!("CARGO_BIN_EXE_grocery-cli");
    let output = Command::new(exe)
        .args(["--store", "Nonexistent Store"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no store named `Nonexistent Store`"));
}

#[test]
fn cli_console_report_prints_every_store() {
    let exe = env!("CARGO_BIN_EXE_grocery-cli");
    let output_path = temp_path("console");
    let status = Command::new(exe)
        .args(["--season", "Winter", "--estimated-budget", "1200", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Grocery Planner"));
    assert!(content.contains("Marietta Square Farmer's Market"));
    assert!(content.contains("Whole Foods"));
    assert!(content.contains("No items to display"));
    assert!(content.contains("Planned budget: $970.00 of estimated $1,200.00"));
}
