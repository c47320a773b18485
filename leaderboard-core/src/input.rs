//! Decoding fetched leaderboard batches.
//!
//! Three shapes show up in practice:
//!
//! 1. a plain array of row objects,
//! 2. an object keyed by group name, each holding an array of rows,
//! 3. a spreadsheet values payload, `{"values": [[header...], [cell...]]}`.

use serde_json::{Map, Value};

use crate::error::{LeaderboardError, Result};
use crate::record::{FieldSpec, Row};

/// Decode a JSON document into rows, in document order.
pub fn decode_rows(json: &str, fields: &FieldSpec) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(json)?;
    rows_from_value(value, fields)
}

/// Same as [`decode_rows`] for an already parsed document.
pub fn rows_from_value(value: Value, fields: &FieldSpec) -> Result<Vec<Row>> {
    match value {
        Value::Array(items) => rows_from_array(items, None),
        Value::Object(mut map) => {
            if let Some(values) = map.remove("values") {
                return rows_from_sheet(values);
            }
            rows_from_groups(map, fields)
        }
        other => Err(LeaderboardError::UnsupportedShape(format!(
            "expected an array or object at the top level, found {}",
            kind(&other)
        ))),
    }
}

fn rows_from_array(items: Vec<Value>, group: Option<(&str, &str)>) -> Result<Vec<Row>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(mut row) => {
                if let Some((field, key)) = group {
                    if !row.contains_key(field) {
                        row.insert(field.to_string(), Value::String(key.to_string()));
                    }
                }
                Ok(row)
            }
            other => Err(LeaderboardError::UnsupportedShape(format!(
                "row {} is {}, expected an object",
                i,
                kind(&other)
            ))),
        })
        .collect()
}

fn rows_from_groups(map: Map<String, Value>, fields: &FieldSpec) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                rows.extend(rows_from_array(items, Some((fields.group.as_str(), key.as_str())))?);
            }
            other => {
                return Err(LeaderboardError::UnsupportedShape(format!(
                    "group `{}` holds {}, expected an array of rows",
                    key,
                    kind(&other)
                )))
            }
        }
    }
    Ok(rows)
}

fn rows_from_sheet(values: Value) -> Result<Vec<Row>> {
    let Value::Array(lines) = values else {
        return Err(LeaderboardError::UnsupportedShape(
            "`values` must be an array of rows".to_string(),
        ));
    };

    let mut lines = lines.into_iter();
    let header: Vec<String> = match lines.next() {
        Some(Value::Array(cells)) => cells
            .into_iter()
            .map(|c| match c {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .collect(),
        Some(other) => {
            return Err(LeaderboardError::UnsupportedShape(format!(
                "sheet header is {}, expected an array",
                kind(&other)
            )))
        }
        None => return Ok(Vec::new()),
    };

    lines
        .enumerate()
        .map(|(i, line)| match line {
            Value::Array(cells) => {
                // Sheets drop trailing empty cells; missing ones stay absent.
                let row: Row = header.iter().cloned().zip(cells).collect();
                Ok(row)
            }
            other => Err(LeaderboardError::UnsupportedShape(format!(
                "sheet row {} is {}, expected an array",
                i + 1,
                kind(&other)
            ))),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
