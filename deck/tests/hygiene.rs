//! Hygiene: source-level budgets for patterns the workspace does not allow.
//!
//! Scans production sources of the `deck` crate and of the `ferrydeck` host
//! (sibling `*_test.rs` files are exempt). Every budget is zero; a failure
//! lists the offending files.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics on None/Err" },
    Budget { pattern: ".expect(", max: 0, why: "panics on None/Err" },
    Budget { pattern: "panic!(", max: 0, why: "crashes the host" },
    Budget { pattern: "unreachable!(", max: 0, why: "crashes the host" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished code" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished code" },
    Budget { pattern: "dbg!(", max: 0, why: "debug output left behind" },
    Budget { pattern: "let _ =", max: 0, why: "discards a result unseen" },
    Budget { pattern: ".ok()", max: 0, why: "discards an error unseen" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
];

/// Production source roots, relative to this crate.
fn roots() -> Vec<PathBuf> {
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    vec![here.join("src"), here.join("..").join("src")]
}

fn production_files() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    for root in roots() {
        collect(&root, &mut out);
    }
    out
}

fn collect(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn hits(files: &[(PathBuf, String)], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|(path, content)| {
            let count = content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = production_files();
    assert!(files.iter().any(|(p, _)| p.ends_with("render.rs")), "deck sources missing");
    assert!(files.iter().any(|(p, _)| p.ends_with("session.rs")), "host sources missing");
}

#[test]
fn pattern_budgets() {
    let files = production_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let listing: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!(
                "`{}` ({}): found {count}, max {}\n{}",
                budget.pattern,
                budget.why,
                budget.max,
                listing.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
