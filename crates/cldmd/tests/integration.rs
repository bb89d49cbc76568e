use std::fs;
use std::path::Path;

use assert_cmd::Command;
use cldmd_types::{AnalysisReceipt, LoopPolarity};
use predicates::prelude::*;
use tempfile::tempdir;

fn cldmd_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cldmd"))
}

fn write_notation(dir: &Path, content: &str) -> String {
    let path = dir.join("cld.txt");
    fs::write(&path, content).expect("write fixture");
    path.display().to_string()
}

#[test]
fn balancing_three_cycle_produces_json_receipt() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "X + Y\nY - Z\nZ + X\n");

    let output = cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let receipt: AnalysisReceipt =
        serde_json::from_slice(&output).expect("stdout is a JSON receipt");
    assert_eq!(receipt.schema_version, 1);
    assert_eq!(receipt.report.metrics.variables, 3);
    assert_eq!(receipt.report.metrics.relations, 3);
    assert_eq!(receipt.report.metrics.positive, 2);
    assert_eq!(receipt.report.metrics.negative, 1);
    assert_eq!(receipt.report.loops.len(), 1);
    assert_eq!(receipt.report.loops[0].nodes, vec!["X", "Y", "Z"]);
    assert_eq!(receipt.report.loops[0].polarity, LoopPolarity::Balancing);
    assert_eq!(receipt.report.nodes.len(), 3);
}

#[test]
fn markdown_receipt_lists_the_loop_path() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "X + Y\nY - Z\nZ + X\n");

    cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Feedback loops"))
        .stdout(predicate::str::contains("|1|X -> Y -> Z -> X|balancing|1|"))
        .stdout(predicate::str::contains("## Metrics"));
}

#[test]
fn reinforcing_two_cycle_is_reported() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "A + B\nB + A\n");

    cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .assert()
        .success()
        .stdout(predicate::str::contains("|1|A -> B -> A|reinforcing|0|"));
}

#[test]
fn self_loop_counts_as_one_loop() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "A + A\n");

    let output = cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let receipt: AnalysisReceipt = serde_json::from_slice(&output).expect("JSON receipt");
    assert_eq!(receipt.report.metrics.variables, 1);
    assert_eq!(receipt.report.metrics.relations, 1);
    assert_eq!(receipt.report.loops.len(), 1);
    assert_eq!(receipt.report.loops[0].nodes, vec!["A"]);
    assert_eq!(receipt.report.loops[0].polarity, LoopPolarity::Reinforcing);
}

#[test]
fn doubled_sign_fails_naming_the_line() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "Foo ++ Bar\n");

    cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("malformed line 1"))
        .stderr(predicate::str::contains("Foo ++ Bar"));
}

#[test]
fn acyclic_chain_reports_no_loops() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "A + B\nB + C\n");

    cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .assert()
        .success()
        .stdout(predicate::str::contains("No feedback loops detected."));
}

#[test]
fn missing_input_file_is_fatal() {
    cldmd_cmd()
        .arg("does-not-exist.txt")
        .arg("--no-render")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist.txt"))
        .stderr(predicate::str::contains("Hints:"));
}

#[test]
fn all_comment_file_is_empty_input() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "# nothing here\n# still nothing\n");

    cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no relations found"));
}

#[test]
fn dot_output_skips_the_graphviz_backend() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "X + Y\nY - Z\nZ + X\n");
    let out = dir.path().join("diagram.dot");

    cldmd_cmd()
        .arg(&input)
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success();

    let dot = fs::read_to_string(&out).expect("dot file written");
    assert!(dot.starts_with("digraph cld {"));
    assert!(dot.contains("\"X\" -> \"Y\""));
    assert!(dot.contains("label=\"-\""));
}

#[test]
fn quiet_suppresses_the_receipt() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "A + B\nB + A\n");

    cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn tsv_receipt_is_tab_separated() {
    let dir = tempdir().expect("tempdir");
    let input = write_notation(dir.path(), "A + B\nB + A\n");

    cldmd_cmd()
        .arg(&input)
        .arg("--no-render")
        .arg("--format")
        .arg("tsv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Variable\tScore\tTier"))
        .stdout(predicate::str::contains("1\tA -> B -> A\treinforcing\t0"));
}
