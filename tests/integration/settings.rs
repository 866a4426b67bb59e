//! Settings file and environment variable handling.

use predicates::prelude::*;

use crate::common::{SETTINGS_FILE, calcdeps, two_file_tree};

#[test]
fn test_settings_file_enables_lenient_mode() {
    let tree = two_file_tree();
    tree.js("a.js", &["ns.a"], &["ns.b", "ns.nowhere"]).unwrap();
    tree.file(SETTINGS_FILE, "lenient = true\n").unwrap();

    calcdeps(&tree).args(["-i", "a.js"]).assert().success().stdout("b.js\na.js\n");
}

#[test]
fn test_settings_file_excludes_are_appended() {
    let tree = two_file_tree();
    tree.js("generated/b.js", &["ns.b"], &[]).unwrap();
    tree.file(SETTINGS_FILE, "exclude = [\"generated/*\"]\n").unwrap();

    calcdeps(&tree).args(["-i", "a.js"]).assert().success().stdout("b.js\na.js\n");
}

#[test]
fn test_settings_file_extensions() {
    let tree = two_file_tree();
    tree.file("c.mjs", "goog.provide('ns.c');\n").unwrap();
    tree.js("a.js", &["ns.a"], &["ns.b", "ns.c"]).unwrap();
    tree.file(SETTINGS_FILE, "extensions = [\"js\", \"mjs\"]\n").unwrap();

    calcdeps(&tree).args(["-i", "a.js"]).assert().success().stdout("b.js\nc.mjs\na.js\n");
}

#[test]
fn test_explicit_config_overrides_environment() {
    let tree = two_file_tree();
    tree.js("a.js", &["ns.a"], &["ns.b", "ns.nowhere"]).unwrap();
    tree.file("lenient.toml", "lenient = true\n").unwrap();

    calcdeps(&tree).args(["-i", "a.js"]).assert().failure().code(1);
    calcdeps(&tree)
        .args(["-i", "a.js", "--config", "lenient.toml"])
        .assert()
        .success()
        .stdout("b.js\na.js\n");
}

#[test]
fn test_missing_config_file_fails() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js", "-c", "absent.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_invalid_settings_file_fails() {
    let tree = two_file_tree();
    tree.file(SETTINGS_FILE, "lenient = \"sometimes\"\n").unwrap();

    calcdeps(&tree).args(["-i", "a.js"]).assert().failure().code(1);
}

#[test]
fn test_max_parallel_from_environment() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js"])
        .env("CALCDEPS_MAX_PARALLEL", "1")
        .assert()
        .success()
        .stdout("b.js\na.js\n");

    calcdeps(&tree)
        .args(["-i", "a.js"])
        .env("CALCDEPS_MAX_PARALLEL", "lots")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("max parallel"));
}

#[test]
fn test_zero_max_parallel_flag_is_rejected() {
    let tree = two_file_tree();
    calcdeps(&tree)
        .args(["-i", "a.js", "--max-parallel", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("max parallel"));
}
