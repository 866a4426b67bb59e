//! Common helpers for calcdeps integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use assert_cmd::Command;
use calcdeps_cli::test_utils::SourceTree;

/// Settings file written into every tree so a developer's own settings never leak in.
pub const SETTINGS_FILE: &str = "settings.toml";

/// A `calcdeps` command running inside `tree` with an isolated environment.
pub fn calcdeps(tree: &SourceTree) -> Command {
    let settings = tree.path(SETTINGS_FILE);
    if !settings.exists() {
        tree.file(SETTINGS_FILE, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("calcdeps").unwrap();
    cmd.current_dir(tree.root())
        .env("CALCDEPS_CONFIG", settings)
        .env_remove("CALCDEPS_MAX_PARALLEL")
        .env_remove("RUST_LOG");
    cmd
}

/// The two-file tree used across tests: `a.js` requires `ns.b` from `b.js`.
pub fn two_file_tree() -> SourceTree {
    let tree = SourceTree::new().unwrap();
    tree.js("a.js", &["ns.a"], &["ns.b"]).unwrap();
    tree.js("b.js", &["ns.b"], &[]).unwrap();
    tree
}

/// Stdout of a successful run, as lines.
pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout).lines().map(ToString::to_string).collect()
}
