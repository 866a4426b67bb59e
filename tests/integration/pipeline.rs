//! Pipeline tests through the library API.

use std::collections::HashMap;

use calcdeps_cli::config::{CalcOptions, OutputMode};
use calcdeps_cli::core::{CalcDepsError, WarningKind};
use calcdeps_cli::output::{project, render};
use calcdeps_cli::resolver::{Calculation, calculate};
use calcdeps_cli::test_utils::{SourceTree, init_test_logging};

use crate::common::two_file_tree;

fn options(tree: &SourceTree, inputs: &[&str]) -> CalcOptions {
    CalcOptions::new(inputs.iter().map(|input| tree.path(input)).collect())
        .with_paths(vec![tree.root().to_path_buf()])
        .with_base_dir(tree.root())
}

async fn order(options: &CalcOptions) -> Vec<String> {
    calculate(options).await.unwrap().ordered_paths()
}

fn calc_error(err: &anyhow::Error) -> &CalcDepsError {
    err.downcast_ref::<CalcDepsError>().expect("error should be a CalcDepsError")
}

/// Every provider of a required namespace precedes the file requiring it.
fn assert_topological(calculation: &Calculation) {
    let position: HashMap<&str, usize> =
        calculation.ordered().enumerate().map(|(i, f)| (f.display_path.as_str(), i)).collect();
    let providers: HashMap<&str, &str> = calculation
        .ordered()
        .flat_map(|f| f.provides.iter().map(move |ns| (ns.as_str(), f.display_path.as_str())))
        .collect();

    for file in calculation.ordered() {
        for ns in &file.requires {
            if let Some(provider) = providers.get(ns.as_str()) {
                assert!(
                    position[provider] < position[file.display_path.as_str()],
                    "{provider} must come before {}",
                    file.display_path
                );
            }
        }
    }
}

#[tokio::test]
async fn test_provider_precedes_requirer() {
    init_test_logging(None);
    let tree = two_file_tree();
    assert_eq!(order(&options(&tree, &["a.js"])).await, vec!["b.js", "a.js"]);
}

#[tokio::test]
async fn test_dep_provider_is_not_emitted() {
    let tree = two_file_tree();
    let options = options(&tree, &["a.js"]).with_deps(vec![tree.path("b.js")]);
    assert_eq!(order(&options).await, vec!["a.js"]);
}

#[tokio::test]
async fn test_dep_directory_never_appears() {
    let tree = SourceTree::new().unwrap();
    tree.js("src/app.js", &["app"], &["goog.array", "goog.dom", "app.util"]).unwrap();
    tree.js("src/util.js", &["app.util"], &["goog.array"]).unwrap();
    tree.js("closure/array.js", &["goog.array"], &[]).unwrap();
    tree.js("closure/dom.js", &["goog.dom"], &["goog.array"]).unwrap();

    let options = options(&tree, &["src/app.js"]).with_deps(vec![tree.path("closure")]);
    let calculation = calculate(&options).await.unwrap();

    assert_eq!(calculation.ordered_paths(), vec!["src/util.js", "src/app.js"]);
    assert!(calculation.ordered().all(|f| !f.external));
}

#[tokio::test]
async fn test_larger_tree_is_topological_and_deterministic() {
    let tree = SourceTree::new().unwrap();
    tree.js("app/main.js", &["app.main"], &["app.ui.Dialog", "app.net.Client", "app.util"]).unwrap();
    tree.js("app/ui/dialog.js", &["app.ui.Dialog"], &["app.ui.Button", "app.util"]).unwrap();
    tree.js("app/ui/button.js", &["app.ui.Button"], &["app.events"]).unwrap();
    tree.js("app/net/client.js", &["app.net.Client"], &["app.events", "app.util"]).unwrap();
    tree.js("app/events.js", &["app.events"], &["app.util"]).unwrap();
    tree.js("app/util.js", &["app.util"], &[]).unwrap();
    tree.js("app/unused.js", &["app.unused"], &["app.util"]).unwrap();

    let first = calculate(&options(&tree, &["app/main.js"]).with_max_parallel(1)).await.unwrap();
    assert_topological(&first);
    assert_eq!(first.order.len(), 6);
    assert!(!first.ordered_paths().contains(&"app/unused.js".to_string()));

    for limit in [2, 16] {
        let again = calculate(&options(&tree, &["app/main.js"]).with_max_parallel(limit)).await.unwrap();
        assert_eq!(again.ordered_paths(), first.ordered_paths());
    }
}

#[tokio::test]
async fn test_input_order_is_respected() {
    let tree = SourceTree::new().unwrap();
    tree.js("one.js", &["one"], &["shared"]).unwrap();
    tree.js("two.js", &["two"], &[]).unwrap();
    tree.js("shared.js", &["shared"], &[]).unwrap();

    assert_eq!(order(&options(&tree, &["two.js", "one.js"])).await, vec!["two.js", "shared.js", "one.js"]);
    assert_eq!(order(&options(&tree, &["one.js", "two.js"])).await, vec!["shared.js", "one.js", "two.js"]);
}

#[tokio::test]
async fn test_input_directory_expands_in_sorted_order() {
    let tree = SourceTree::new().unwrap();
    tree.js("entry/z.js", &["z"], &[]).unwrap();
    tree.js("entry/a.js", &["a"], &["lib"]).unwrap();
    tree.js("lib.js", &["lib"], &[]).unwrap();

    assert_eq!(order(&options(&tree, &["entry"])).await, vec!["lib.js", "entry/a.js", "entry/z.js"]);
}

#[tokio::test]
async fn test_cycle_names_both_files() {
    let tree = SourceTree::new().unwrap();
    tree.js("a.js", &["ns.a"], &["ns.b"]).unwrap();
    tree.js("b.js", &["ns.b"], &["ns.a"]).unwrap();

    let err = calculate(&options(&tree, &["a.js"])).await.unwrap_err();
    match calc_error(&err) {
        CalcDepsError::DependencyCycle { chain } => assert_eq!(chain, "a.js → b.js → a.js"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_duplicate_provider_fails_before_resolution() {
    let tree = two_file_tree();
    tree.js("other/b.js", &["ns.b"], &[]).unwrap();

    let err = calculate(&options(&tree, &["a.js"])).await.unwrap_err();
    match calc_error(&err) {
        CalcDepsError::DuplicateProvider { namespace, first, second } => {
            assert_eq!(namespace, "ns.b");
            assert_eq!(first, "b.js");
            assert_eq!(second, "other/b.js");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_duplicate_provider_even_when_unreachable() {
    let tree = SourceTree::new().unwrap();
    tree.js("main.js", &["main"], &[]).unwrap();
    tree.js("x1.js", &["dup"], &[]).unwrap();
    tree.js("x2.js", &["dup"], &[]).unwrap();

    let err = calculate(&options(&tree, &["main.js"])).await.unwrap_err();
    assert!(matches!(calc_error(&err), CalcDepsError::DuplicateProvider { .. }));
}

#[tokio::test]
async fn test_dep_masks_duplicate_in_scanned_tree() {
    let tree = two_file_tree();
    tree.js("vendor/b.js", &["ns.b"], &[]).unwrap();

    let options = options(&tree, &["a.js"]).with_deps(vec![tree.path("vendor")]);
    assert_eq!(order(&options).await, vec!["a.js"]);
}

#[tokio::test]
async fn test_unresolved_require_names_namespace_and_file() {
    let tree = SourceTree::new().unwrap();
    tree.js("a.js", &["ns.a"], &["ns.missing"]).unwrap();

    let err = calculate(&options(&tree, &["a.js"])).await.unwrap_err();
    match calc_error(&err) {
        CalcDepsError::UnresolvedRequire { namespace, file } => {
            assert_eq!(namespace, "ns.missing");
            assert_eq!(file, "a.js");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_lenient_mode_warns_on_unresolved() {
    let tree = SourceTree::new().unwrap();
    tree.js("a.js", &["ns.a"], &["ns.missing"]).unwrap();

    let calculation = calculate(&options(&tree, &["a.js"]).lenient(true)).await.unwrap();
    assert_eq!(calculation.ordered_paths(), vec!["a.js"]);
    assert_eq!(calculation.diagnostics.of_kind(WarningKind::UnresolvedRequire).count(), 1);
}

#[tokio::test]
async fn test_input_in_dep_set_is_error() {
    let tree = two_file_tree();
    let options = options(&tree, &["b.js"]).with_deps(vec![tree.path("b.js")]);

    let err = calculate(&options).await.unwrap_err();
    assert!(matches!(calc_error(&err), CalcDepsError::ExternalInput { .. }));
}

#[tokio::test]
async fn test_missing_input_is_scan_error() {
    let tree = two_file_tree();
    let err = calculate(&options(&tree, &["nope.js"])).await.unwrap_err();
    assert!(matches!(calc_error(&err), CalcDepsError::ScanError { .. }));
}

#[tokio::test]
async fn test_missing_path_root_is_warning() {
    let tree = two_file_tree();
    let options = options(&tree, &["a.js"]).with_paths(vec![tree.root().to_path_buf(), tree.path("gone")]);

    let calculation = calculate(&options).await.unwrap();
    assert_eq!(calculation.ordered_paths(), vec!["b.js", "a.js"]);
    assert_eq!(calculation.diagnostics.of_kind(WarningKind::UnreadableRoot).count(), 1);
}

#[tokio::test]
async fn test_excluded_files_are_not_candidates() {
    let tree = two_file_tree();
    tree.js("b_test.js", &["ns.b"], &["ns.a"]).unwrap();

    let options = options(&tree, &["a.js"]).with_excludes(vec!["*_test.js".to_string()]);
    assert_eq!(order(&options).await, vec!["b.js", "a.js"]);
}

#[tokio::test]
async fn test_input_without_declarations() {
    let tree = two_file_tree();
    tree.file("plain.js", "console.log('hi');\n").unwrap();
    assert_eq!(order(&options(&tree, &["plain.js"])).await, vec!["plain.js"]);
}

#[tokio::test]
async fn test_required_base_file_leads_list_but_not_deps() {
    let tree = SourceTree::new().unwrap();
    tree.js("a.js", &["ns.a"], &["ns.b", "goog"]).unwrap();
    tree.js("b.js", &["ns.b"], &[]).unwrap();
    tree.file("closure/base.js", "/** @provideGoog */\nvar goog = goog || {};\ngoog.provide('goog');\n")
        .unwrap();

    let list = calculate(&options(&tree, &["a.js"])).await.unwrap();
    assert_eq!(list.ordered_paths(), vec!["closure/base.js", "b.js", "a.js"]);
    assert_topological(&list);

    let deps = calculate(&options(&tree, &["a.js"]).with_output_mode(OutputMode::Deps)).await.unwrap();
    assert_eq!(deps.ordered_paths(), vec!["b.js", "closure/base.js", "a.js"]);
}

#[tokio::test]
async fn test_unrequired_base_file_is_left_out() {
    let tree = SourceTree::new().unwrap();
    tree.file("lonely.js", "console.log('alone');\n").unwrap();
    tree.file("closure/base.js", "/** @provideGoog */\nvar goog = goog || {};\n").unwrap();

    assert_eq!(order(&options(&tree, &["lonely.js"])).await, vec!["lonely.js"]);
}

#[tokio::test]
async fn test_base_file_with_requires_stays_topological() {
    let tree = SourceTree::new().unwrap();
    tree.file("base.js", "/** @provideGoog */\ngoog.provide('boot');\ngoog.require('cfg');\n").unwrap();
    tree.js("cfg.js", &["cfg"], &[]).unwrap();
    tree.js("a.js", &["ns.a"], &["boot"]).unwrap();

    let calculation = calculate(&options(&tree, &["a.js"])).await.unwrap();
    assert_eq!(calculation.ordered_paths(), vec!["cfg.js", "base.js", "a.js"]);
    assert_topological(&calculation);
}

#[tokio::test]
async fn test_require_after_comment_marker_in_string_is_kept() {
    let tree = SourceTree::new().unwrap();
    tree.file(
        "net.js",
        "goog.provide('app.net');\nvar ACCEPT = '*/*';\ngoog.require('app.xhr');\n",
    )
    .unwrap();
    tree.js("xhr.js", &["app.xhr"], &[]).unwrap();

    assert_eq!(order(&options(&tree, &["net.js"])).await, vec!["xhr.js", "net.js"]);
}

#[tokio::test]
async fn test_goog_module_files_are_ordered() {
    let tree = SourceTree::new().unwrap();
    tree.file("main.js", "goog.module('app.main');\nconst util = goog.require('app.util');\n").unwrap();
    tree.file("util.js", "goog.module('app.util');\nexports.x = 1;\n").unwrap();

    assert_eq!(order(&options(&tree, &["main.js"])).await, vec!["util.js", "main.js"]);
}

#[tokio::test]
async fn test_render_deps_end_to_end() {
    let tree = two_file_tree();
    let options = options(&tree, &["a.js"]).with_output_mode(OutputMode::Deps);
    let calculation = calculate(&options).await.unwrap();

    let bytes = render(&project(&calculation, OutputMode::Deps)).await.unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "// This file was autogenerated by calcdeps.js\n\
         goog.addDependency(\"b.js\", [\"ns.b\"], []);\n\
         goog.addDependency(\"a.js\", [\"ns.a\"], [\"ns.b\"]);\n"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_loop_terminates() {
    let tree = two_file_tree();
    tree.dir("nested").unwrap();
    std::os::unix::fs::symlink(tree.root(), tree.path("nested/loop")).unwrap();

    let calculation = calculate(&options(&tree, &["a.js"])).await.unwrap();
    assert_eq!(calculation.ordered_paths(), vec!["b.js", "a.js"]);
}
