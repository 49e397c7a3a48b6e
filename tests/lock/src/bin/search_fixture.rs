//! Binary that runs every canonical scenario through the harness runner
//! and prints deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: `<index>.<world_id>.<field>=<value>` lines, see
//! `lock_tests::scenarios::fixture_lines`.

use lock_tests::scenarios::{fixture_lines, run_all};

fn main() {
    let reports = run_all().expect("scenario run failed");
    for line in fixture_lines(&reports).expect("report digest failed") {
        println!("{line}");
    }
}
