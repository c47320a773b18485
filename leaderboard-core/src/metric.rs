//! Numeric parsing for spreadsheet cells.
//!
//! Sheets hand every cell back as a string, so "13", " 8.5 ", "1,204" and
//! "92%" all need to become numbers. What happens to cells that cannot be
//! read is decided by [`MetricPolicy`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How unreadable metric cells are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricPolicy {
    /// Treat the cell as zero and keep going.
    #[default]
    Lenient,
    /// Reject the batch, naming the offending row.
    Strict,
}

/// Why a cell could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricFault {
    Missing,
    NotNumeric(String),
}

impl MetricFault {
    /// Text shown in error messages for the offending value.
    pub fn describe(&self) -> String {
        match self {
            MetricFault::Missing => "nothing".to_string(),
            MetricFault::NotNumeric(raw) => raw.clone(),
        }
    }
}

/// Parse a cell into a finite number.
pub fn parse_metric(value: Option<&Value>) -> Result<f64, MetricFault> {
    let value = match value {
        None | Some(Value::Null) => return Err(MetricFault::Missing),
        Some(v) => v,
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(MetricFault::NotNumeric(value.to_string())),
    }
}

fn parse_numeric_text(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed.replace(',', "");
    cleaned.parse::<f64>().ok()
}

/// Read a cell as display text. Numbers keep their JSON spelling.
pub fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => Some(other.to_string()),
    }
}
