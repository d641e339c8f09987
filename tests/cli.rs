//! Integration tests for the sumsheet binary.

use std::process::Command;

fn run(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sumsheet"))
        // Tests must not depend on a user's ~/.config/sumsheet/config.toml.
        .arg("--no-config")
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute sumsheet");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_number_and_formula_updates() {
    let (stdout, _, code) = run(&["A1=3", "B2==A1+1.5"]);
    assert_eq!(stdout, "A1\t3.0\nB2\t4.5\n");
    assert_eq!(code, 0);
}

#[test]
fn test_propagation_is_printed() {
    let (stdout, _, code) = run(&["A1=1", "B1==A1", "A1=2"]);
    assert_eq!(stdout, "A1\t1.0\nB1\t1.0\nA1\t2.0\nB1\t2.0\n");
    assert_eq!(code, 0);
}

#[test]
fn test_cycle_prints_marker() {
    let (stdout, _, code) = run(&["A1==B1", "B1==A1"]);
    assert!(stdout.lines().any(|l| l == "B1\tCIRCULAR ERROR"));
    assert_eq!(code, 0);
}

#[test]
fn test_invalid_reference_warns_on_stderr() {
    let (stdout, stderr, code) = run(&["A1==Z99"]);
    assert_eq!(stdout, "A1\t0.0\n");
    assert!(stderr.contains("Invalid cell reference Z99"));
    assert_eq!(code, 0);
}

#[test]
fn test_dump_prints_input_text() {
    let (stdout, _, code) = run(&["--dump", "A1=5", "A2=hi", "A3==A1"]);
    assert!(stdout.ends_with("A1\t5.000000\nA2\thi\nA3\t=A1\n"));
    assert_eq!(code, 0);
}

#[test]
fn test_out_of_grid_assignment() {
    let (stdout, _, code) = run(&["--cols", "2", "C1=5"]);
    assert_eq!(stdout, "C1\tINVALID CELL\n");
    assert_eq!(code, 0);
}

#[test]
fn test_bad_assignment_exits_with_error() {
    let (_, stderr, code) = run(&["nonsense"]);
    assert!(stderr.contains("Expected CELL=INPUT"));
    assert_eq!(code, 1);
}

#[test]
fn test_bad_cell_name_exits_with_error() {
    let (stdout, stderr, code) = run(&["AA1=5"]);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid cell reference: AA1"));
    assert_eq!(code, 1);
}

#[test]
fn test_bad_dimensions_exit_with_error() {
    let (_, stderr, code) = run(&["--cols", "30"]);
    assert!(stderr.contains("Invalid grid dimensions"));
    assert_eq!(code, 1);
}
