//! Low-volume classification
//!
//! Global invariants enforced:
//! - Classification is a pure function of the row
//! - Low volume means clicks strictly below threshold
//! - Unparsable clicks or threshold never classify as low volume

use crate::row::ReportRow;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Volume classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Volume {
    LowVolume, // clicks < threshold
    RampedUp,  // clicks >= threshold, or unparsable
}

impl Volume {
    pub fn as_str(&self) -> &'static str {
        match self {
            Volume::LowVolume => "low_volume",
            Volume::RampedUp => "ramped_up",
        }
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub volume: Volume,
    pub product_id: String,
}

impl Classification {
    pub fn is_low_volume(&self) -> bool {
        self.volume == Volume::LowVolume
    }
}

/// Classify a report row
///
/// The product id is uppercased (full Unicode mapping) when the row's
/// capitalization flag is set, and passed through unchanged otherwise.
pub fn classify(row: &ReportRow) -> Classification {
    let volume = if row.parsed_clicks().less_than(&row.parsed_threshold()) {
        Volume::LowVolume
    } else {
        Volume::RampedUp
    };

    let product_id = if row.capitalize {
        row.product_id.to_uppercase()
    } else {
        row.product_id.clone()
    };

    Classification { volume, product_id }
}

/// Reject rows whose clicks or threshold are not numbers
///
/// `classify` accepts such rows and reports them as ramped up; callers that
/// want malformed input surfaced check here first.
pub fn validate_row(row: &ReportRow) -> Result<()> {
    if row.parsed_clicks().is_nan() {
        anyhow::bail!("metrics.clicks is not a number (got {:?})", row.clicks);
    }
    if row.parsed_threshold().is_nan() {
        anyhow::bail!("THRESHOLD is not a number (got {:?})", row.threshold);
    }
    Ok(())
}
