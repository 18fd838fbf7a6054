//! Lowvol core library - low-volume product classification and its fixture suite

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Classification is a pure function of one report row
// - No global mutable state; suite counters are returned by value
// - No randomness, clocks, threads, or async
// - Fixtures are evaluated and logged strictly in order

pub mod classify;
pub mod config;
pub mod fixtures;
pub mod numeric;
pub mod report;
pub mod row;
pub mod sink;
pub mod suite;

pub use classify::{classify, validate_row, Classification, Volume};
pub use config::ResolvedConfig;
pub use fixtures::{builtin_fixtures, load_fixture_file};
pub use report::{render_json, render_summary, render_text};
pub use row::{pair_cases, ExpectedResult, Fixture, ReportRow, TestCase};
pub use sink::{LogSink, MemorySink, TracingSink, WriterSink};
pub use suite::{run_cases, run_suite, run_suite_with, SuiteCounters, SuiteOptions, SuiteReport};

use anyhow::Result;

/// Run the shipped fixtures, logging every assertion and the summary through `tracing`
pub fn run_default_suite() -> SuiteReport {
    run_suite(&builtin_fixtures(), TracingSink)
}

/// Gather the fixtures a resolved configuration asks for
///
/// Shipped fixtures come first, then those from the fixture file.
pub fn collect_fixtures(config: &ResolvedConfig) -> Result<Vec<Fixture>> {
    let mut fixtures = Vec::new();

    if config.include_builtin {
        fixtures.extend(builtin_fixtures());
    }

    if let Some(ref path) = config.fixtures {
        fixtures.extend(load_fixture_file(path)?);
    }

    Ok(fixtures)
}

/// Suite options implied by a resolved configuration
pub fn suite_options(config: &ResolvedConfig) -> SuiteOptions {
    SuiteOptions {
        strict_numbers: config.strict_numbers,
    }
}
