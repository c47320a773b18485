//! Tie-aware competition ranking.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::badge::BadgeTier;
use crate::config::RankOptions;
use crate::error::Result;
use crate::record::{extract_records, retain_qualifying, FieldSpec, Record, Row};

/// A record with its place on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub record: Record,
    /// 1-based; tied metrics share a rank.
    pub rank: u32,
    pub badge: BadgeTier,
}

/// Sort by descending metric and hand out competition ranks.
///
/// Ties keep their input order and share the rank of the first record with
/// that value, so three rows scoring 5, 5, 3 rank 1, 1, 3.
pub fn assign_ranks(mut records: Vec<Record>) -> Vec<RankedRecord> {
    // sort_by is stable, so equal metrics stay in input order.
    records.sort_by(|a, b| b.metric.partial_cmp(&a.metric).unwrap_or(Ordering::Equal));

    let mut ranked = Vec::with_capacity(records.len());
    let mut current_rank = 0_u32;
    let mut previous: Option<f64> = None;

    for (position, record) in records.into_iter().enumerate() {
        if previous != Some(record.metric) {
            current_rank = position as u32 + 1;
            previous = Some(record.metric);
        }
        ranked.push(RankedRecord {
            record,
            rank: current_rank,
            badge: BadgeTier::from_rank(current_rank),
        });
    }

    ranked
}

/// Keep the first `top_n` ranked rows. Ranks and badges are left untouched.
pub fn truncate(mut ranked: Vec<RankedRecord>, top_n: Option<usize>) -> Vec<RankedRecord> {
    if let Some(n) = top_n {
        ranked.truncate(n);
    }
    ranked
}

/// Rank every qualifying row in a single table.
///
/// Rows below the qualifier minimum are dropped before ranking. An empty
/// result means nothing qualified.
pub fn rank_flat(
    rows: &[Row],
    fields: &FieldSpec,
    options: &RankOptions,
) -> Result<Vec<RankedRecord>> {
    options.validate()?;

    let records = extract_records(rows, fields, options, false)?;
    let records = retain_qualifying(records, options.qualifier.as_ref());
    debug!(
        rows = rows.len(),
        qualifying = records.len(),
        metric = %fields.metric,
        "ranking flat board"
    );

    Ok(truncate(assign_ranks(records), options.top_n))
}
