//! Shipped fixtures and fixture file loading
//!
//! Fixture files are JSON in one of two shapes:
//! - `{"fixtures": [{"id": ..., "row": {...}, "want": {...}}]}`
//! - `{"cases": [{"id": ..., "want": {...}}], "rows": [{...}]}`, paired by position

use crate::row::{pair_cases, ExpectedResult, Fixture, ReportRow, TestCase};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Fixtures drawn from customer reports
pub fn builtin_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new(
            "test-clicks-less-than-threshold",
            ReportRow::new(true, "10", "3", "abcd-12345"),
            ExpectedResult {
                is_low_volume: true,
                product_id: "ABCD-12345".to_string(),
            },
        ),
        Fixture::new(
            "test-clicks-more-than-threshold",
            ReportRow::new(true, "20", "30", "efgh-67890"),
            ExpectedResult {
                is_low_volume: false,
                product_id: "EFGH-67890".to_string(),
            },
        ),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Combined {
        fixtures: Vec<Fixture>,
    },
    Positional {
        cases: Vec<TestCase>,
        rows: Vec<ReportRow>,
    },
}

/// Parse fixtures from JSON text
pub fn parse_fixtures(content: &str) -> Result<Vec<Fixture>> {
    let file: FixtureFile = serde_json::from_str(content)
        .context("expected an object with \"fixtures\", or with \"cases\" and \"rows\"")?;

    Ok(match file {
        FixtureFile::Combined { fixtures } => fixtures,
        FixtureFile::Positional { cases, rows } => pair_cases(&cases, &rows),
    })
}

/// Load fixtures from a JSON file
pub fn load_fixture_file(path: &Path) -> Result<Vec<Fixture>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture file: {}", path.display()))?;

    let fixtures = parse_fixtures(&content)
        .with_context(|| format!("failed to parse fixture file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), count = fixtures.len(), "loaded fixtures");

    Ok(fixtures)
}
