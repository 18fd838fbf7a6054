//! Suite report rendering
//!
//! Global invariants enforced:
//! - Assertions render in evaluation order
//! - Identical reports render byte-for-byte identically

use crate::suite::{Outcome, SuiteCounters, SuiteReport};

/// Render the aggregate counters, e.g. `{PASSED=4, FAILED=0, RAN=4}`
pub fn render_summary(counters: &SuiteCounters) -> String {
    counters.to_string()
}

/// Render a report as a text table followed by the summary
pub fn render_text(report: &SuiteReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<6} {:<36} {:<16} {}\n",
        "RESULT", "CHECK", "CASE", "ACTUAL", "EXPECTED"
    ));

    for assertion in &report.assertions {
        let result = match assertion.outcome {
            Outcome::Passed => "PASS",
            Outcome::Failed => "FAIL",
        };
        output.push_str(&format!(
            "{:<6} {:<6} {:<36} {:<16} {}\n",
            result,
            assertion.check.as_str(),
            truncate_or_pad(&assertion.case_id, 36),
            truncate_or_pad(&assertion.actual, 16),
            assertion.expected,
        ));
        if let Some(ref message) = assertion.message {
            output.push_str(&format!("       {}\n", message));
        }
    }

    output.push_str(&render_summary(&report.counters));
    output.push('\n');
    output
}

/// Render a report as pretty JSON
pub fn render_json(report: &SuiteReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// Truncate or pad string to fixed width (in chars)
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::builtin_fixtures;
    use crate::row::{ExpectedResult, Fixture, ReportRow};
    use crate::sink::MemorySink;
    use crate::suite::run_suite;

    #[test]
    fn test_render_summary() {
        let counters = SuiteCounters {
            passed: 3,
            failed: 1,
            ran: 4,
        };
        assert_eq!(render_summary(&counters), "{PASSED=3, FAILED=1, RAN=4}");
    }

    #[test]
    fn test_render_text_rows_in_order() {
        let report = run_suite(&builtin_fixtures(), MemorySink::new());
        let text = render_text(&report);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("RESULT"));
        assert!(lines[1].starts_with("PASS   click  test-clicks-less-than-threshold"));
        assert!(lines[2].contains("ABCD-12345"));
        assert!(lines[4].contains("EFGH-67890"));
        assert_eq!(lines[5], "{PASSED=4, FAILED=0, RAN=4}");
    }

    #[test]
    fn test_render_text_includes_failure_message() {
        let fixture = Fixture::new(
            "wrong-id",
            ReportRow::new(false, "10", "3", "abcd"),
            ExpectedResult {
                is_low_volume: true,
                product_id: "ABCD".to_string(),
            },
        );
        let report = run_suite(&[fixture], MemorySink::new());
        let text = render_text(&report);

        assert!(text.contains("FAIL   upper"));
        assert!(text.contains("result upper unexpected value."));
    }

    #[test]
    fn test_render_json_shape() {
        let report = run_suite(&builtin_fixtures(), MemorySink::new());
        let value: serde_json::Value = serde_json::from_str(&render_json(&report)).unwrap();

        assert_eq!(value["counters"]["RAN"], 4);
        assert_eq!(value["assertions"][0]["check"], "click");
        assert_eq!(value["assertions"][0]["outcome"], "passed");
        assert!(value["assertions"][0].get("message").is_none());
    }

    #[test]
    fn test_truncate_or_pad() {
        assert_eq!(truncate_or_pad("abc", 5), "abc  ");
        assert_eq!(truncate_or_pad("abcdefgh", 6), "abc...");
        assert_eq!(truncate_or_pad("ééééééé", 5), "éé...");
    }
}
