//! Declaration extraction for Closure-style source files.
//!
//! This module pulls `goog.provide`, `goog.module` and `goog.require`
//! declarations out of JavaScript source without parsing it. It is a
//! line-pattern matcher: a declaration only counts when it begins a statement
//! at the start of a line (indentation is ignored).
//!
//! # Recognised Constructs
//!
//! - `goog.provide('ns')` and `goog.module('ns')` provide `ns`
//! - `goog.require('ns')` requires `ns`
//! - `const x = goog.require('ns')` (also `let`/`var`, destructuring allowed)
//!   requires `ns`
//!
//! # Extraction Rules
//!
//! - Lines inside `/* ... */` block comments are skipped
//! - `//` comments never match because the construct must start the statement
//! - Single or double quotes are accepted; whitespace inside the literal is trimmed
//! - A declaration whose argument is not a string literal is reported as
//!   malformed and skipped
//! - A namespace declared twice in one file keeps its first position
//!
//! # Usage
//!
//! ```rust,no_run
//! use calcdeps_cli::extractor::extract_declarations;
//!
//! let source = r#"
//! goog.provide('app.main');
//!
//! goog.require('goog.array');
//! const dom = goog.require('goog.dom');
//! "#;
//!
//! let declarations = extract_declarations(source);
//! assert_eq!(declarations.provides, vec!["app.main"]);
//! assert_eq!(declarations.requires, vec!["goog.array", "goog.dom"]);
//! ```

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::trace;

use crate::core::Namespace;

/// Start of a declaration statement, optionally bound to a variable.
static DECLARATION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:const|let|var)\s+[^=;]+?=\s*)?goog\.(provide|module|require)\s*\(")
        .expect("declaration pattern is valid")
});

/// A single string literal argument followed by the closing parenthesis.
static STRING_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:'([^'\n]*)'|"([^"\n]*)")\s*\)"#).expect("argument pattern is valid")
});

/// `var goog = goog || {};` - the statement that defines the Closure root object.
static BASE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*var\s+goog\s*=\s*goog\s*\|\|\s*\{\s*\}\s*;")
        .expect("base definition pattern is valid")
});

/// JSDoc annotation that marks `base.js`.
const PROVIDE_GOOG_ANNOTATION: &str = "@provideGoog";

/// A declaration that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDeclaration {
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Provided namespaces in textual order
    pub provides: Vec<Namespace>,
    /// Required namespaces in textual order
    pub requires: Vec<Namespace>,
    /// Whether the file defines the `goog` root object
    pub is_base: bool,
    /// Declarations skipped because their argument is not a string literal
    pub malformed: Vec<MalformedDeclaration>,
    /// Namespaces declared more than once (by the same construct kind)
    pub duplicates: Vec<Namespace>,
}

/// Which list a declaration feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclarationKind {
    Provide,
    Require,
}

impl DeclarationKind {
    fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "require" => Self::Require,
            _ => Self::Provide,
        }
    }
}

/// Extract provide and require declarations from file contents.
///
/// Extraction never fails; problems are reported through
/// [`Declarations::malformed`] and [`Declarations::duplicates`].
///
/// # Examples
///
/// ```rust,no_run
/// # use calcdeps_cli::extractor::extract_declarations;
/// let declarations = extract_declarations("goog.require(someVariable);\n");
/// assert!(declarations.requires.is_empty());
/// assert_eq!(declarations.malformed.len(), 1);
/// ```
#[must_use]
pub fn extract_declarations(content: &str) -> Declarations {
    let mut declarations = Declarations {
        is_base: is_base_file(content),
        ..Declarations::default()
    };
    let mut seen_provides = HashSet::new();
    let mut seen_requires = HashSet::new();
    let mut in_block_comment = false;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        if in_block_comment {
            if let Some(close) = line.find("*/") {
                in_block_comment = opens_trailing_block_comment(&line[close + 2..]);
            }
            continue;
        }

        if line.trim_start().starts_with("/*") {
            in_block_comment = opens_trailing_block_comment(line);
            continue;
        }

        if let Some(captures) = DECLARATION_START.captures(line) {
            let (Some(whole), Some(keyword)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let kind = DeclarationKind::from_keyword(keyword.as_str());

            match parse_string_argument(&line[whole.end()..]) {
                Some(namespace) if !namespace.is_empty() => {
                    trace!("line {line_number}: {kind:?} {namespace}");
                    let (list, seen) = match kind {
                        DeclarationKind::Provide => {
                            (&mut declarations.provides, &mut seen_provides)
                        }
                        DeclarationKind::Require => {
                            (&mut declarations.requires, &mut seen_requires)
                        }
                    };
                    if seen.insert(namespace.clone()) {
                        list.push(namespace);
                    } else {
                        declarations.duplicates.push(namespace);
                    }
                }
                _ => declarations.malformed.push(MalformedDeclaration {
                    line: line_number,
                    text: line.trim().to_string(),
                }),
            }
        }

        // A block comment opened after code on the same line hides the following lines.
        if opens_trailing_block_comment(line) {
            in_block_comment = true;
        }
    }

    declarations
}

/// Parse the namespace literal that follows `goog.xxx(`.
fn parse_string_argument(rest: &str) -> Option<Namespace> {
    let captures = STRING_ARGUMENT.captures(rest)?;
    let literal = captures.get(1).or_else(|| captures.get(2))?;
    Some(literal.as_str().trim().to_string())
}

/// Whether the line leaves a `/*` open at its end.
///
/// String literals are skipped, so `'*/*'` or `'src/**/*.js'` open nothing, and
/// a `//` outside a string ends the scan.
fn opens_trailing_block_comment(line: &str) -> bool {
    let mut chars = line.chars().peekable();
    let mut in_comment = false;

    while let Some(c) = chars.next() {
        if in_comment {
            if c == '*' && chars.next_if_eq(&'/').is_some() {
                in_comment = false;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        chars.next();
                    } else if inner == c {
                        break;
                    }
                }
            }
            '/' if chars.next_if_eq(&'/').is_some() => return false,
            '/' if chars.next_if_eq(&'*').is_some() => in_comment = true,
            _ => {}
        }
    }

    in_comment
}

/// Whether the content defines the Closure `goog` root object.
#[must_use]
pub fn is_base_file(content: &str) -> bool {
    content.contains(PROVIDE_GOOG_ANNOTATION) || BASE_DEFINITION.is_match(content)
}
