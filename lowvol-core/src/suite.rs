//! Fixture suite runner
//!
//! Runs every fixture through the classifier and compares the result against
//! the fixture's expectation.
//!
//! Global invariants enforced:
//! - Fixtures are evaluated strictly in order
//! - Every assertion increments `ran` and exactly one of `passed`/`failed`
//! - Mismatches are recorded, never raised; the suite always runs to the end
//! - Counters start at zero for each run and are returned, not shared

use crate::classify::{classify, validate_row};
use crate::row::{pair_cases, Fixture, ReportRow, TestCase};
use crate::sink::LogSink;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CLICK_MISMATCH: &str = "result click unexpected value.";
pub const UPPER_MISMATCH: &str = "result upper unexpected value.";

/// Pass/fail/ran tally for one suite run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SuiteCounters {
    pub passed: u32,
    pub failed: u32,
    pub ran: u32,
}

impl SuiteCounters {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed => self.failed += 1,
        }
        self.ran += 1;
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for SuiteCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{PASSED={}, FAILED={}, RAN={}}}",
            self.passed, self.failed, self.ran
        )
    }
}

/// Which property of a classification an assertion checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Low-volume flag
    Click,
    /// Display product id
    Upper,
    /// Numeric fields parse (strict mode only)
    Input,
}

impl Check {
    pub fn as_str(&self) -> &'static str {
        match self {
            Check::Click => "click",
            Check::Upper => "upper",
            Check::Input => "input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    fn marker(&self) -> &'static str {
        match self {
            Outcome::Passed => "++PASSED++",
            Outcome::Failed => "--FAILED--",
        }
    }
}

/// One evaluated assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssertionRecord {
    pub case_id: String,
    pub check: Check,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub actual: String,
    pub expected: String,
}

/// Everything a suite run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SuiteReport {
    pub counters: SuiteCounters,
    pub assertions: Vec<AssertionRecord>,
}

impl SuiteReport {
    pub fn failures(&self) -> impl Iterator<Item = &AssertionRecord> {
        self.assertions
            .iter()
            .filter(|a| a.outcome == Outcome::Failed)
    }
}

/// Runner options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteOptions {
    /// Record unparsable clicks/threshold as a failed `input` assertion
    /// instead of classifying the row
    pub strict_numbers: bool,
}

/// Accumulates records and counters while writing each outcome to the sink
struct Recorder<S: LogSink> {
    sink: S,
    report: SuiteReport,
}

impl<S: LogSink> Recorder<S> {
    fn assert_value(
        &mut self,
        case_id: &str,
        check: Check,
        actual: String,
        expected: String,
        message: &str,
    ) {
        let outcome = if actual == expected {
            Outcome::Passed
        } else {
            Outcome::Failed
        };

        self.sink
            .log(&format!("Test - {}: {}", case_id, outcome.marker()));
        if outcome == Outcome::Failed {
            self.sink.log(&format!("Error:\n{}", message));
        }
        self.sink.log(&format!("Actual:\n{}", actual));
        self.sink.log(&format!("Expected:\n{}", expected));

        self.report.counters.record(outcome);
        self.report.assertions.push(AssertionRecord {
            case_id: case_id.to_string(),
            check,
            outcome,
            message: (outcome == Outcome::Failed).then(|| message.to_string()),
            actual,
            expected,
        });
    }
}

/// Run fixtures with default options
pub fn run_suite(fixtures: &[Fixture], sink: impl LogSink) -> SuiteReport {
    run_suite_with(fixtures, SuiteOptions::default(), sink)
}

/// Run fixtures in order, logging every assertion and a final summary
pub fn run_suite_with(
    fixtures: &[Fixture],
    options: SuiteOptions,
    sink: impl LogSink,
) -> SuiteReport {
    let mut recorder = Recorder {
        sink,
        report: SuiteReport::default(),
    };

    for fixture in fixtures {
        if options.strict_numbers {
            if let Err(e) = validate_row(&fixture.row) {
                recorder.assert_value(
                    &fixture.id,
                    Check::Input,
                    format!("{:?} / {:?}", fixture.row.clicks, fixture.row.threshold),
                    "numeric clicks / threshold".to_string(),
                    &format!("{:#}", e),
                );
                continue;
            }
        }

        let result = classify(&fixture.row);

        recorder.assert_value(
            &fixture.id,
            Check::Click,
            result.is_low_volume().to_string(),
            fixture.want.is_low_volume.to_string(),
            CLICK_MISMATCH,
        );
        recorder.assert_value(
            &fixture.id,
            Check::Upper,
            result.product_id,
            fixture.want.product_id.clone(),
            UPPER_MISMATCH,
        );
    }

    let Recorder { mut sink, report } = recorder;
    tracing::debug!(
        passed = report.counters.passed,
        failed = report.counters.failed,
        ran = report.counters.ran,
        "suite finished"
    );
    sink.log(&report.counters.to_string());

    report
}

/// Run positionally aligned cases and rows
pub fn run_cases(cases: &[TestCase], rows: &[ReportRow], sink: impl LogSink) -> SuiteReport {
    run_suite(&pair_cases(cases, rows), sink)
}
