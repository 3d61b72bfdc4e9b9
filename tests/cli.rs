use std::{fs, process::Command};
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_aer_to_xyz"));
    cmd.env_remove("AER_INPUT")
        .env_remove("AER_OUTPUT")
        .env_remove("AER_SCALE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_input_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let out = bin()
        .arg(dir.path().join("nope.csv"))
        .arg(dir.path().join("xyz.csv"))
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("load: cannot read input"), "{stderr}");
    assert!(!dir.path().join("xyz.csv").exists());
}

#[test]
fn malformed_input_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tracking.csv");
    fs::write(&input, "t,az,el,r\n0,10,20,far\n").unwrap();

    let status = bin().arg(&input).arg(dir.path().join("xyz.csv")).status().unwrap();
    assert!(!status.success());
}

#[test]
fn successful_run_exits_zero() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tracking.csv");
    let output = dir.path().join("xyz.csv");
    fs::write(&input, "t,az,el,r\n0,0,90,100\n").unwrap();

    let status = bin().arg(&input).arg(&output).arg("--quiet").status().unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 1);
}
