//! Tests for the `calcdeps` binary.

use predicates::prelude::*;

use crate::common::{calcdeps, stdout_lines, two_file_tree};

#[test]
fn test_list_mode_prints_ordered_paths() {
    let tree = two_file_tree();
    let output = calcdeps(&tree).args(["-i", "a.js"]).assert().success();
    assert_eq!(stdout_lines(output.get_output()), vec!["b.js", "a.js"]);
}

#[test]
fn test_dep_is_left_out() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js", "-p", ".", "-d", "b.js"])
        .assert()
        .success()
        .stdout("a.js\n");
}

#[test]
fn test_unknown_output_mode_falls_back_to_list() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js", "-o", "yaml"])
        .assert()
        .success()
        .stdout("b.js\na.js\n");
}

#[test]
fn test_deps_mode_output() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js", "--output_mode", "deps"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("// This file was autogenerated by calcdeps.js\n"))
        .stdout(predicate::str::contains(r#"goog.addDependency("b.js", ["ns.b"], []);"#))
        .stdout(predicate::str::contains(r#"goog.addDependency("a.js", ["ns.a"], ["ns.b"]);"#));
}

#[test]
fn test_script_mode_concatenates_files() {
    let tree = two_file_tree();
    let output = calcdeps(&tree).args(["-i", "a.js", "-o", "script"]).assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();

    let first = stdout.find("// Input 0\ngoog.provide('ns.b');").expect("first segment");
    let second = stdout.find("// Input 1\ngoog.provide('ns.a');").expect("second segment");
    assert!(first < second);
}

#[test]
fn test_output_file_is_written() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js", "--output-file", "build/out.txt"])
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(tree.path("build/out.txt")).unwrap();
    assert_eq!(written, "b.js\na.js\n");
}

#[test]
fn test_cycle_exits_with_error_and_no_output() {
    let tree = two_file_tree();
    tree.js("b.js", &["ns.b"], &["ns.a"]).unwrap();

    calcdeps(&tree)
        .args(["-i", "a.js", "--output_file", "out.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Circular dependency detected"))
        .stderr(predicate::str::contains("a.js → b.js → a.js"));

    assert!(!tree.path("out.txt").exists());
}

#[test]
fn test_unresolved_require_fails_unless_lenient() {
    let tree = two_file_tree();
    tree.js("a.js", &["ns.a"], &["ns.b", "ns.nowhere"]).unwrap();

    calcdeps(&tree)
        .args(["-i", "a.js"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ns.nowhere"))
        .stdout("");

    calcdeps(&tree)
        .args(["-i", "a.js", "--lenient"])
        .assert()
        .success()
        .stdout("b.js\na.js\n")
        .stderr(predicate::str::contains("unresolved-require"));
}

#[test]
fn test_missing_input_fails() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "missing.js"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.js"));
}

#[test]
fn test_no_inputs_fails() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No input files"));
}

#[test]
fn test_exclude_glob() {
    let tree = two_file_tree();
    tree.js("b_test.js", &["ns.b"], &[]).unwrap();

    calcdeps(&tree)
        .args(["-i", "a.js", "-e", "*_test.js"])
        .assert()
        .success()
        .stdout("b.js\na.js\n");
}

#[test]
fn test_quiet_suppresses_warnings() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js", "-p", ".", "-p", "gone", "--quiet"])
        .assert()
        .success()
        .stdout("b.js\na.js\n")
        .stderr("");
}

#[test]
fn test_help_lists_flags() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output_mode"))
        .stdout(predicate::str::contains("--dep"));
}
