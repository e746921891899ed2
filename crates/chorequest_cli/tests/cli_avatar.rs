use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_data_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("chorequest-{nanos}-{label}"))
}

fn run(dir: &PathBuf, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_chorequest"))
        .args(args)
        .env("CHOREQUEST_DATA_DIR", dir)
        .env("CHOREQUEST_DISABLE_NOTIFICATIONS", "1")
        .output()
        .expect("failed to run chorequest")
}

fn seed_stats_at_level(dir: &PathBuf, level: u64) {
    std::fs::create_dir_all(dir).unwrap();
    let stats = serde_json::json!({
        "level": level, "xp": level * 1000, "gold": 0,
        "hp": 100, "maxHp": 100, "mp": 50, "maxMp": 50
    });
    std::fs::write(
        dir.join("childStats.json"),
        serde_json::to_string(&stats).unwrap(),
    )
    .unwrap();
}

#[test]
fn list_shows_the_catalog_with_lock_state() {
    let dir = temp_data_dir("avatar-list");

    let output = run(&dir, &["avatar", "list"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ember-knight"));
    assert!(stdout.contains("Dragon Slayer"));
    assert!(stdout.contains("selected"));
    assert!(stdout.contains("locked"));
}

#[test]
fn list_json_marks_the_stored_selection() {
    let dir = temp_data_dir("avatar-list-json");
    seed_stats_at_level(&dir, 5);
    std::fs::write(dir.join("selectedAvatar.json"), "storm-caller").unwrap();

    let output = run(&dir, &["--json", "avatar", "list"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("json output");
    let entries = parsed.as_array().expect("avatar array");
    assert_eq!(entries.len(), 12);

    let storm = entries
        .iter()
        .find(|entry| entry["id"] == "storm-caller")
        .expect("storm-caller entry");
    assert_eq!(storm["selected"], true);
    assert_eq!(storm["unlockLevel"], 5);

    let ember = entries
        .iter()
        .find(|entry| entry["id"] == "ember-knight")
        .expect("ember-knight entry");
    assert_eq!(ember["selected"], false);
}

#[test]
fn select_rejects_locked_avatars() {
    let dir = temp_data_dir("avatar-select-locked");

    let output = run(&dir, &["avatar", "select", "frost-archer"]);
    let stored = dir.join("selectedAvatar.json").exists();
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_state"));
    assert!(stderr.contains("unlocks at level 2"));
    assert!(!stored);
}

#[test]
fn select_stores_the_raw_id() {
    let dir = temp_data_dir("avatar-select");
    seed_stats_at_level(&dir, 3);

    let output = run(&dir, &["avatar", "select", "stone-guardian"]);
    let stored = std::fs::read_to_string(dir.join("selectedAvatar.json")).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Selected avatar: Stone Guardian (stone-guardian)"));
    assert_eq!(stored, "stone-guardian");
}

#[test]
fn select_reports_unknown_ids() {
    let dir = temp_data_dir("avatar-select-unknown");
    seed_stats_at_level(&dir, 12);

    let output = run(&dir, &["avatar", "select", "cosmic-wizard"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
}
