//! Hash domain and library hygiene lock tests.
//!
//! Proves:
//! 1. Domain set has the expected count (catches forgotten additions)
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated and follow `WAYFINDER::*::V1\0`
//! 4. No raw `WAYFINDER::` domain literals outside `hash.rs`
//! 5. No `.unwrap()` / `.expect(` in non-test library source

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use wayfinder_search::hash::ALL_DOMAINS;

const PRODUCTION_DIRS: [&str; 2] = [
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src"),
];

#[test]
fn hash_domain_set_count() {
    assert_eq!(
        ALL_DOMAINS.len(),
        3,
        "expected 3 domains; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in ALL_DOMAINS {
        assert!(
            seen.insert(*domain),
            "duplicate domain bytes: {}",
            String::from_utf8_lossy(domain)
        );
    }
}

#[test]
fn hash_domain_naming_convention() {
    for domain in ALL_DOMAINS {
        let shown = String::from_utf8_lossy(domain);
        assert!(domain.ends_with(&[0]), "{shown} is not null-terminated");
        assert!(
            domain.starts_with(b"WAYFINDER::"),
            "{shown} does not start with WAYFINDER::"
        );
        assert!(
            domain.ends_with(b"::V1\0"),
            "{shown} does not end with ::V1\\0"
        );
    }
}

#[test]
fn no_raw_domain_literals_outside_hash_module() {
    let violations = scan_production_source(&["b\"WAYFINDER::"], Some("hash.rs"));
    assert!(
        violations.is_empty(),
        "raw WAYFINDER:: domain literals found outside hash.rs:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_panicking_unwraps_in_library_source() {
    let violations = scan_production_source(&[".unwrap()", ".expect("], None);
    assert!(
        violations.is_empty(),
        "panicking calls in non-test library code:\n{}",
        violations.join("\n")
    );
}

/// Lines of non-test, non-comment production source containing any pattern.
fn scan_production_source(patterns: &[&str], exempt_file: Option<&str>) -> Vec<String> {
    let mut violations = Vec::new();
    for dir in PRODUCTION_DIRS {
        let dir_path = Path::new(dir);
        assert!(dir_path.exists(), "missing source dir {dir}");
        for path in walkdir(dir_path) {
            if path.extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            if exempt_file.is_some() && path.file_name().and_then(|n| n.to_str()) == exempt_file {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            scan_file(&path, &content, patterns, &mut violations);
        }
    }
    violations
}

fn scan_file(path: &Path, content: &str, patterns: &[&str], violations: &mut Vec<String>) {
    // Skip #[cfg(test)] module blocks via brace-depth tracking.
    let mut brace_depth: usize = 0;
    let mut skip_depth: Option<usize> = None;
    let mut cfg_test_pending = false;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.contains("#[cfg(test)]") {
            cfg_test_pending = true;
            continue;
        }

        let opens = line.chars().filter(|&c| c == '{').count();
        let closes = line.chars().filter(|&c| c == '}').count();

        if cfg_test_pending && opens > 0 {
            skip_depth = Some(brace_depth);
            cfg_test_pending = false;
        }

        brace_depth = brace_depth.saturating_add(opens);
        brace_depth = brace_depth.saturating_sub(closes);

        if let Some(depth) = skip_depth {
            if brace_depth <= depth {
                skip_depth = None;
            }
            continue;
        }

        if trimmed.starts_with("//") {
            continue;
        }

        if patterns.iter().any(|p| trimmed.contains(p)) {
            violations.push(format!("  {}:{}: {}", path.display(), i + 1, trimmed));
        }
    }
}

/// Simple recursive directory walker (avoids adding walkdir dependency).
fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(walkdir(&path));
            } else {
                results.push(path);
            }
        }
    }
    results
}
