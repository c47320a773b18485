//! Turning raw rows into typed records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::{Qualifier, RankOptions};
use crate::error::{LeaderboardError, Result};
use crate::metric::{cell_text, parse_metric, MetricPolicy};

/// One raw row as it arrived from the sheet.
pub type Row = Map<String, Value>;

/// Group label used for rows without one when parsing leniently.
pub const UNGROUPED: &str = "Unassigned";

/// Which row fields feed a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field holding the category (region, team, project).
    pub group: String,
    /// Field holding the performer's name.
    pub subject: String,
    /// Field holding the ranked quantity.
    pub metric: String,
    /// Extra columns copied through for display.
    #[serde(default)]
    pub display: Vec<String>,
}

impl FieldSpec {
    pub fn new(
        group: impl Into<String>,
        subject: impl Into<String>,
        metric: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            subject: subject.into(),
            metric: metric.into(),
            display: Vec::new(),
        }
    }

    pub fn with_display(mut self, columns: &[&str]) -> Self {
        self.display = columns.iter().map(|c| c.to_string()).collect();
        self
    }
}

/// A display-only column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub value: String,
}

/// One performer's result in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Position in the input batch.
    pub index: usize,
    pub group_key: String,
    pub subject: String,
    pub metric: f64,
    /// Parsed qualifying value, when a qualifier is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
}

impl Record {
    /// Display column by name.
    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }
}

/// Parse every row into a [`Record`] under `options.policy`.
///
/// `needs_group` is false for flat boards, where the group field is
/// carried through when present but never required.
pub fn extract_records(
    rows: &[Row],
    fields: &FieldSpec,
    options: &RankOptions,
    needs_group: bool,
) -> Result<Vec<Record>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| extract_record(index, row, fields, options, needs_group))
        .collect()
}

fn extract_record(
    index: usize,
    row: &Row,
    fields: &FieldSpec,
    options: &RankOptions,
    needs_group: bool,
) -> Result<Record> {
    let strict = options.policy == MetricPolicy::Strict;

    let group_key = match cell_text(row.get(&fields.group)) {
        Some(key) => key,
        None if needs_group && strict => {
            return Err(LeaderboardError::MissingGroupKey {
                index,
                field: fields.group.clone(),
            })
        }
        None => {
            if needs_group {
                warn!(index, field = %fields.group, "row has no group, filing under {}", UNGROUPED);
            }
            UNGROUPED.to_string()
        }
    };

    let subject = match cell_text(row.get(&fields.subject)) {
        Some(subject) => subject,
        None if strict => {
            return Err(LeaderboardError::MissingSubject {
                index,
                field: fields.subject.clone(),
            })
        }
        None => String::new(),
    };

    let metric = read_number(index, row, &fields.metric, options.policy)?;
    let secondary = match &options.qualifier {
        Some(q) => Some(read_number(index, row, &q.field, options.policy)?),
        None => None,
    };

    let columns = fields
        .display
        .iter()
        .map(|name| Column {
            name: name.clone(),
            value: cell_text(row.get(name)).unwrap_or_default(),
        })
        .collect();

    Ok(Record {
        index,
        group_key,
        subject,
        metric,
        secondary,
        columns,
    })
}

fn read_number(index: usize, row: &Row, field: &str, policy: MetricPolicy) -> Result<f64> {
    match parse_metric(row.get(field)) {
        Ok(n) => Ok(n),
        Err(fault) => match policy {
            MetricPolicy::Strict => Err(LeaderboardError::MalformedMetric {
                index,
                field: field.to_string(),
                value: fault.describe(),
            }),
            MetricPolicy::Lenient => {
                warn!(index, field, value = %fault.describe(), "unreadable value treated as 0");
                Ok(0.0)
            }
        },
    }
}

/// Drop records whose secondary value falls below the qualifier minimum.
pub fn retain_qualifying(records: Vec<Record>, qualifier: Option<&Qualifier>) -> Vec<Record> {
    let Some(q) = qualifier else {
        return records;
    };
    records
        .into_iter()
        .filter(|r| r.secondary.unwrap_or(0.0) >= q.min)
        .collect()
}
