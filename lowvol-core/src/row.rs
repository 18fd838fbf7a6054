//! Report rows, expectations, and fixtures
//!
//! Field names follow the upstream shopping report query so rows can be
//! pasted straight from an extracted report.

use crate::numeric::{parse_int, ParsedInt};
use serde::{Deserialize, Serialize};

/// One row of already-extracted report data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "PRODUCT_ID_CAPITALISED")]
    pub capitalize: bool,
    #[serde(rename = "THRESHOLD")]
    pub threshold: String,
    #[serde(rename = "metrics.clicks")]
    pub clicks: String,
    #[serde(rename = "segments.product_item_id")]
    pub product_id: String,
}

impl ReportRow {
    pub fn new(
        capitalize: bool,
        threshold: impl Into<String>,
        clicks: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Self {
        Self {
            capitalize,
            threshold: threshold.into(),
            clicks: clicks.into(),
            product_id: product_id.into(),
        }
    }

    pub fn parsed_clicks(&self) -> ParsedInt {
        parse_int(&self.clicks)
    }

    pub fn parsed_threshold(&self) -> ParsedInt {
        parse_int(&self.threshold)
    }
}

/// Expected classification for a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedResult {
    #[serde(rename = "result_click")]
    pub is_low_volume: bool,
    #[serde(rename = "result_upper")]
    pub product_id: String,
}

/// Identifier plus expectation, paired positionally with a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub want: ExpectedResult,
}

/// A row together with the result it must classify to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub row: ReportRow,
    pub want: ExpectedResult,
}

impl Fixture {
    pub fn new(id: impl Into<String>, row: ReportRow, want: ExpectedResult) -> Self {
        Self {
            id: id.into(),
            row,
            want,
        }
    }
}

/// Pair test cases with rows by position
///
/// Only the first `min(cases.len(), rows.len())` pairs are produced; surplus
/// entries on either side are dropped.
pub fn pair_cases(cases: &[TestCase], rows: &[ReportRow]) -> Vec<Fixture> {
    if cases.len() != rows.len() {
        tracing::debug!(
            cases = cases.len(),
            rows = rows.len(),
            "case and row counts differ, surplus entries skipped"
        );
    }

    cases
        .iter()
        .zip(rows)
        .map(|(case, row)| Fixture::new(case.id.clone(), row.clone(), case.want.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, low: bool, product_id: &str) -> TestCase {
        TestCase {
            id: id.to_string(),
            want: ExpectedResult {
                is_low_volume: low,
                product_id: product_id.to_string(),
            },
        }
    }

    #[test]
    fn test_row_uses_report_field_names() {
        let json = r#"{
            "PRODUCT_ID_CAPITALISED": true,
            "THRESHOLD": "10",
            "metrics.clicks": "3",
            "segments.product_item_id": "abcd-12345"
        }"#;

        let row: ReportRow = serde_json::from_str(json).unwrap();
        assert_eq!(row, ReportRow::new(true, "10", "3", "abcd-12345"));
        assert_eq!(row.parsed_clicks(), ParsedInt::from(3));
        assert_eq!(row.parsed_threshold(), ParsedInt::from(10));
    }

    #[test]
    fn test_expected_result_field_names() {
        let json = r#"{"result_click": false, "result_upper": "EFGH-67890"}"#;
        let want: ExpectedResult = serde_json::from_str(json).unwrap();
        assert!(!want.is_low_volume);
        assert_eq!(want.product_id, "EFGH-67890");
    }

    #[test]
    fn test_pair_cases_aligned() {
        let cases = vec![case("a", true, "A"), case("b", false, "B")];
        let rows = vec![
            ReportRow::new(true, "10", "3", "a"),
            ReportRow::new(true, "10", "30", "b"),
        ];

        let fixtures = pair_cases(&cases, &rows);

        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].id, "a");
        assert_eq!(fixtures[0].row.clicks, "3");
        assert_eq!(fixtures[1].id, "b");
        assert_eq!(fixtures[1].want.product_id, "B");
    }

    #[test]
    fn test_pair_cases_skips_surplus() {
        let cases = vec![case("a", true, "A"), case("b", false, "B")];
        let rows = vec![ReportRow::new(true, "10", "3", "a")];

        assert_eq!(pair_cases(&cases, &rows).len(), 1);
        assert_eq!(pair_cases(&cases[..1], &[rows[0].clone(), rows[0].clone()]).len(), 1);
        assert!(pair_cases(&[], &rows).is_empty());
    }
}
