//! `xtask` — workspace automation for roomwalk.
//!
//! Provides CI-style source checks: suppressions of policy lints and
//! panicking calls (`unwrap`/`expect`) outside test code in the library crates.
use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{bail, eyre};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Lints that must be fixed rather than silenced with `allow`/`expect`.
const SUPPRESSION_DENYLIST_LINTS: &[&str] =
    &["clippy::absolute_paths", "clippy::unwrap_used", "clippy::expect_used"];
/// Clippy lint groups broad enough to suppress denylisted lints transitively.
const SUPPRESSION_DENYLIST_GROUPS: &[&str] = &["all", "restriction", "pedantic"];

/// Matches `#[allow(...)]` / `#[expect(...)]` including inner attributes.
///
/// The lazy capture stops at the first `)`, so nested parentheses can hide a lint
/// (a missed match) but never invent one.
const LINT_ATTRIBUTE_PATTERN: &str = r"(?s)#\s*!?\s*\[\s*(allow|expect)\s*\((.*?)\)\s*]";
const CLIPPY_LINT_TOKEN_PATTERN: &str = r"clippy::[a-z_]+";
const PANIC_CALL_PATTERN: &str = r"\.\s*(unwrap|expect)\s*\(";
const TEST_MODULE_PATTERN: &str = r"#\[cfg\(test\)\]\s*mod tests\b";

/// Source roots whose non-test code must not panic on `Result`/`Option`.
const LIBRARY_ROOTS: &[&str] = &["crates/core/src"];
const SCANNED_ROOTS: &[&str] = &["crates", "xtask"];
const EXCEPTIONS_FILE: &str = ".xtask-exceptions.toml";

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks
    Check,
    /// Check for suppressions of lints denied by workspace policy
    CheckSuppressions,
    /// Check library crates for `unwrap`/`expect` outside test code
    CheckPanics,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let root = env::current_dir()?;
    match cli.command {
        Commands::Check => {
            check_suppressions(&root)?;
            check_panics(&root)
        }
        Commands::CheckSuppressions => check_suppressions(&root),
        Commands::CheckPanics => check_panics(&root),
    }
}

/// TOML schema for `.xtask-exceptions.toml`.
#[derive(Deserialize, Default)]
struct ExceptionsConfig {
    /// Regex patterns matched against relative paths exempt from `check-panics`.
    #[serde(default)]
    panics: Vec<String>,
}

fn load_exceptions(root: &Path) -> Result<Vec<Regex>> {
    let config_path = root.join(EXCEPTIONS_FILE);
    if !config_path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: ExceptionsConfig =
        toml::from_str(&content).map_err(|e| eyre!("Failed to parse {EXCEPTIONS_FILE}: {e}"))?;
    config
        .panics
        .into_iter()
        .map(|pattern| Regex::new(&pattern).map_err(|e| eyre!("Invalid regex {pattern}: {e}")))
        .collect()
}

/// Collects `.rs` files under `dir`, skipping build output, as paths relative to `root`.
fn rust_files(root: &Path, dir: &Path) -> Result<Vec<String>> {
    let mut found = Vec::new();
    let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        if !current.is_dir() {
            continue;
        }
        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                if path.file_name().is_some_and(|name| name == "target") {
                    continue;
                }
                pending.push(path);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let relative = path.strip_prefix(root).unwrap_or(&path);
                found.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    found.sort();
    Ok(found)
}

/// One source-level suppression of a policy-denied lint.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SuppressionHit {
    /// `allow` or `expect`.
    kind: String,
    lint: String,
    /// 1-based line of the lint token.
    line: usize,
}

fn check_suppressions(root: &Path) -> Result<()> {
    let lint_attr_re = Regex::new(LINT_ATTRIBUTE_PATTERN)?;
    let clippy_lint_re = Regex::new(CLIPPY_LINT_TOKEN_PATTERN)?;
    let mut violations = Vec::new();

    for scanned in SCANNED_ROOTS {
        for file_path in rust_files(root, &root.join(scanned))? {
            let source = fs::read_to_string(root.join(&file_path))?;
            for hit in find_denied_suppressions(&source, &lint_attr_re, &clippy_lint_re)? {
                violations.push((file_path.clone(), hit));
            }
        }
    }

    if !violations.is_empty() {
        println!("DISALLOWED LINT SUPPRESSIONS FOUND");
        for (file, hit) in violations {
            println!("{}:{} -> {}({})", file, hit.line, hit.kind, hit.lint);
        }
        bail!("Found suppressions of lints denied by workspace policy.");
    }

    println!("No suppressions found for lints denied by workspace policy.");
    Ok(())
}

fn find_denied_suppressions(
    source: &str,
    lint_attr_re: &Regex,
    clippy_lint_re: &Regex,
) -> Result<Vec<SuppressionHit>> {
    let mut hits = Vec::new();
    for captures in lint_attr_re.captures_iter(source) {
        let kind = captures
            .get(1)
            .ok_or_else(|| eyre!("capture group 1 missing in lint attribute match"))?
            .as_str();
        let args = captures
            .get(2)
            .ok_or_else(|| eyre!("capture group 2 missing in lint attribute match"))?;

        for lint_match in clippy_lint_re.find_iter(args.as_str()) {
            let lint = lint_match.as_str();
            if !is_denied_suppression(lint) {
                continue;
            }
            hits.push(SuppressionHit {
                kind: kind.to_string(),
                lint: lint.to_string(),
                line: line_of(source, args.start() + lint_match.start()),
            });
        }
    }

    Ok(hits)
}

fn is_denied_suppression(lint: &str) -> bool {
    if SUPPRESSION_DENYLIST_LINTS.contains(&lint) {
        return true;
    }
    lint.strip_prefix("clippy::").is_some_and(|group| SUPPRESSION_DENYLIST_GROUPS.contains(&group))
}

fn check_panics(root: &Path) -> Result<()> {
    let exceptions = load_exceptions(root)?;
    let panic_re = Regex::new(PANIC_CALL_PATTERN)?;
    let test_module_re = Regex::new(TEST_MODULE_PATTERN)?;
    let mut violations = Vec::new();

    for library in LIBRARY_ROOTS {
        for file_path in rust_files(root, &root.join(library))? {
            if is_test_file(&file_path) || exceptions.iter().any(|re| re.is_match(&file_path)) {
                continue;
            }
            let source = fs::read_to_string(root.join(&file_path))?;
            for line in find_panic_calls(&source, &panic_re, &test_module_re) {
                violations.push((file_path.clone(), line));
            }
        }
    }

    if !violations.is_empty() {
        println!("PANICKING CALLS IN LIBRARY CODE");
        for (file, line) in violations {
            println!("{file}:{line}");
        }
        println!("\nReturn a Result, or add the path to {EXCEPTIONS_FILE} under `panics`.");
        bail!("Found unwrap/expect outside test code.");
    }

    println!("No unwrap/expect calls outside test code.");
    Ok(())
}

fn is_test_file(file_path: &str) -> bool {
    file_path.ends_with("/tests.rs")
        || file_path.ends_with("/test_support.rs")
        || file_path.contains("/tests/")
}

/// Lines of `.unwrap(`/`.expect(` calls outside comments and before the `tests` module.
fn find_panic_calls(source: &str, panic_re: &Regex, test_module_re: &Regex) -> Vec<usize> {
    let production = match test_module_re.find(source) {
        Some(found) => &source[..found.start()],
        None => source,
    };
    production
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| panic_re.is_match(line))
        .map(|(index, _)| index + 1)
        .collect()
}

fn line_of(source: &str, byte_index: usize) -> usize {
    source[..byte_index].bytes().filter(|byte| *byte == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_denied_suppressions_detects_direct_and_group_lints() -> Result<()> {
        let lint_attr_re = Regex::new(LINT_ATTRIBUTE_PATTERN)?;
        let clippy_lint_re = Regex::new(CLIPPY_LINT_TOKEN_PATTERN)?;

        // Lint names are spliced in so this file does not trip its own scan.
        let source = format!(
            r#"
            #[allow(clippy::{})]
            fn spelled_out() {{}}

            #[expect(clippy::{}, clippy::{})]
            fn risky() {{}}
        "#,
            "absolute_paths", "unwrap_used", "all"
        );
        let hits = find_denied_suppressions(&source, &lint_attr_re, &clippy_lint_re)?;
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].lint, "clippy::absolute_paths");
        assert_eq!(hits[0].line, 2);
        assert_eq!(hits[1].kind, "expect");
        assert_eq!(hits[2].lint, "clippy::all");
        Ok(())
    }

    #[test]
    fn test_find_denied_suppressions_ignores_unrelated_lints() -> Result<()> {
        let lint_attr_re = Regex::new(LINT_ATTRIBUTE_PATTERN)?;
        let clippy_lint_re = Regex::new(CLIPPY_LINT_TOKEN_PATTERN)?;

        let source = r#"
            #[allow(dead_code)]
            #[expect(clippy::needless_range_loop)]
            fn quiet() {}
        "#;
        let hits = find_denied_suppressions(source, &lint_attr_re, &clippy_lint_re)?;
        assert!(hits.is_empty());
        Ok(())
    }

    #[test]
    fn test_panic_calls_in_test_modules_are_ignored() -> Result<()> {
        let panic_re = Regex::new(PANIC_CALL_PATTERN)?;
        let test_module_re = Regex::new(TEST_MODULE_PATTERN)?;
        let source = "#[cfg(test)]\nmod test_support;\n\
                      fn a() {\n    let x = parse().unwrap();\n}\n// b.expect(\"x\")\n\
                      #[cfg(test)]\nmod tests {\n    fn c() { d().expect(\"e\"); }\n}\n";
        assert_eq!(find_panic_calls(source, &panic_re, &test_module_re), vec![4]);
        Ok(())
    }

    #[test]
    fn test_rust_files_skips_target_and_other_extensions() {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp.path();
        fs::create_dir_all(root.join("crates/core/src")).expect("create src");
        fs::create_dir_all(root.join("crates/core/target/debug")).expect("create target");
        fs::write(root.join("crates/core/src/lib.rs"), "").expect("write lib");
        fs::write(root.join("crates/core/src/notes.md"), "").expect("write notes");
        fs::write(root.join("crates/core/target/debug/build.rs"), "").expect("write build");

        let files = rust_files(root, &root.join("crates")).expect("walk");
        assert_eq!(files, vec!["crates/core/src/lib.rs".to_string()]);
    }

    #[test]
    fn test_test_files_are_recognised() {
        assert!(is_test_file("crates/core/src/session/test_support.rs"));
        assert!(is_test_file("crates/core/tests/determinism.rs"));
        assert!(!is_test_file("crates/core/src/session.rs"));
    }
}
