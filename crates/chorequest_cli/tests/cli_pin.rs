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

fn seed_pin(dir: &PathBuf, pin: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("parentPassword.json"), pin).unwrap();
}

fn stored_pin(dir: &PathBuf) -> String {
    std::fs::read_to_string(dir.join("parentPassword.json")).unwrap()
}

#[test]
fn set_stores_the_pin() {
    let dir = temp_data_dir("pin-set");

    let output = run(&dir, &["pin", "set", "1234"]);
    let stored = stored_pin(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Parent PIN set"));
    assert_eq!(stored, "1234");
}

#[test]
fn set_rejects_short_pins() {
    let dir = temp_data_dir("pin-set-short");

    let output = run(&dir, &["pin", "set", "123"]);
    let exists = dir.join("parentPassword.json").exists();
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(!exists);
}

#[test]
fn set_refuses_to_overwrite() {
    let dir = temp_data_dir("pin-set-twice");
    seed_pin(&dir, "1234");

    let output = run(&dir, &["pin", "set", "5678"]);
    let stored = stored_pin(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_state"));
    assert_eq!(stored, "1234");
}

#[test]
fn change_requires_the_current_pin() {
    let dir = temp_data_dir("pin-change-wrong");
    seed_pin(&dir, "1234");

    let output = run(&dir, &["pin", "change", "9999", "5678"]);
    let stored = stored_pin(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert_eq!(stored, "1234");
}

#[test]
fn change_replaces_the_pin() {
    let dir = temp_data_dir("pin-change");
    seed_pin(&dir, "1234");

    let output = run(&dir, &["pin", "change", "1234", "5678"]);
    let stored = stored_pin(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Parent PIN changed"));
    assert_eq!(stored, "5678");
}

#[test]
fn change_rejects_a_short_replacement() {
    let dir = temp_data_dir("pin-change-short");
    seed_pin(&dir, "1234");

    let output = run(&dir, &["pin", "change", "1234", "12"]);
    let stored = stored_pin(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert_eq!(stored, "1234");
}
