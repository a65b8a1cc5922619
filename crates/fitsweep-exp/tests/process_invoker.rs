#![cfg(unix)]

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use fitsweep_core::SweepParameter;
use fitsweep_exp::{ProcessInvoker, SimulationInvoker};
use tempfile::{tempdir, TempDir};

fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("{body}\n")).unwrap();
    path
}

fn sh(path: &PathBuf) -> ProcessInvoker {
    ProcessInvoker::new("/bin/sh").with_args([path.display().to_string()])
}

#[test]
fn parameter_is_last_argument() {
    let dir = tempdir().unwrap();
    let path = script(&dir, "echo.sh", r#"echo "arg=$1 count=$#""#);
    let output = sh(&path).invoke(SweepParameter::new(0.01)).unwrap();
    assert_eq!(output, "arg=0.01 count=1\n");
}

#[test]
fn large_values_keep_decimal_rendering() {
    let dir = tempdir().unwrap();
    let path = script(&dir, "echo.sh", r#"echo "$1""#);
    let output = sh(&path).invoke(SweepParameter::new(10_000.0)).unwrap();
    assert_eq!(output.trim(), "10000.0");
}

#[test]
fn non_zero_exit_reports_status_and_stderr() {
    let dir = tempdir().unwrap();
    let path = script(&dir, "fail.sh", "echo partial\necho 'bad dram fit' >&2\nexit 3");
    let err = sh(&path).invoke(SweepParameter::new(5.0)).unwrap_err();
    assert_eq!(err.code(), "invoke-exit-status");
    assert_eq!(err.info().context.get("status").map(String::as_str), Some("3"));
    assert_eq!(err.info().hint.as_deref(), Some("bad dram fit"));
    assert_eq!(err.info().context.get("dram_fit").map(String::as_str), Some("5.0"));
}

#[test]
fn invalid_utf8_is_decode_error() {
    let dir = tempdir().unwrap();
    let path = script(&dir, "binary.sh", r"printf '\377\376'");
    let err = sh(&path).invoke(SweepParameter::new(1.0)).unwrap_err();
    assert_eq!(err.code(), "invoke-decode");
}

#[test]
fn missing_executable_is_not_found() {
    let err = ProcessInvoker::new("/definitely/not/here/dram-metrics")
        .invoke(SweepParameter::new(1.0))
        .unwrap_err();
    assert_eq!(err.code(), "invoke-not-found");
}

#[test]
fn timeout_kills_hung_program() {
    let dir = tempdir().unwrap();
    let path = script(&dir, "hang.sh", "exec sleep 30");
    let invoker = sh(&path).with_timeout(Some(Duration::from_millis(200)));
    let started = Instant::now();
    let err = invoker.invoke(SweepParameter::new(1.0)).unwrap_err();
    assert_eq!(err.code(), "invoke-timeout");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn timeout_path_captures_output() {
    let dir = tempdir().unwrap();
    let path = script(&dir, "quick.sh", "echo 'TOTAL: RES_SUM: 1.0'\necho noise >&2");
    let invoker = sh(&path).with_timeout(Some(Duration::from_secs(10)));
    let output = invoker.invoke(SweepParameter::new(1.0)).unwrap();
    assert_eq!(output, "TOTAL: RES_SUM: 1.0\n");
}
