pub mod badge;
pub mod config;
pub mod error;
pub mod grouping;
pub mod input;
pub mod metric;
pub mod ranking;
pub mod record;

use serde::Serialize;
use tracing::info;

pub use badge::{BadgeTally, BadgeTier};
pub use config::{GroupOrder, Qualifier, RankOptions, RankOverrides};
pub use error::{LeaderboardError, Result};
pub use grouping::{group_and_rank, Group, GroupTotal, GroupTotals};
pub use input::decode_rows;
pub use metric::MetricPolicy;
pub use ranking::{assign_ranks, rank_flat, RankedRecord};
pub use record::{FieldSpec, Record, Row, UNGROUPED};

/// Whether a board is split into per-group tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Grouped,
    Flat,
}

/// A named leaderboard preset: which fields to read and how to rank them.
pub trait Board {
    fn name(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn fields(&self) -> FieldSpec;

    fn layout(&self) -> Layout {
        Layout::Grouped
    }

    fn defaults(&self) -> RankOptions {
        RankOptions::default()
    }
}

/// Ranked output of one board, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", content = "rows", rename_all = "lowercase")]
pub enum Standings {
    Grouped(Vec<Group>),
    Flat(Vec<RankedRecord>),
}

impl Standings {
    /// Rows that will actually be shown.
    pub fn shown(&self) -> usize {
        match self {
            Standings::Grouped(groups) => groups.iter().map(|g| g.members.len()).sum(),
            Standings::Flat(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shown() == 0
    }

    pub fn tally(&self) -> BadgeTally {
        let mut tally = BadgeTally::default();
        match self {
            Standings::Grouped(groups) => {
                for group in groups {
                    let mut group_tally = BadgeTally::default();
                    for member in &group.members {
                        group_tally.record(member.badge);
                    }
                    tally.merge(&group_tally);
                }
            }
            Standings::Flat(rows) => {
                for row in rows {
                    tally.record(row.badge);
                }
            }
        }
        tally
    }
}

/// Everything a renderer needs for one board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardReport {
    pub board: &'static str,
    pub title: &'static str,
    pub fields: FieldSpec,
    pub standings: Standings,
    pub tally: BadgeTally,
}

/// Run `board` over `rows`, with `overrides` layered on the board defaults.
pub fn build_standings(
    board: &dyn Board,
    rows: &[Row],
    overrides: &RankOverrides,
) -> Result<BoardReport> {
    let options = board.defaults().merge(overrides);
    let fields = board.fields();

    let standings = match board.layout() {
        Layout::Grouped => Standings::Grouped(group_and_rank(rows, &fields, &options)?),
        Layout::Flat => Standings::Flat(rank_flat(rows, &fields, &options)?),
    };
    let tally = standings.tally();

    info!(
        board = board.name(),
        shown = standings.shown(),
        "{}",
        tally.describe()
    );

    Ok(BoardReport {
        board: board.name(),
        title: board.title(),
        fields,
        standings,
        tally,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct TestBoard;

    impl Board for TestBoard {
        fn name(&self) -> &'static str {
            "test-board"
        }

        fn title(&self) -> &'static str {
            "Test Leaderboard"
        }

        fn fields(&self) -> FieldSpec {
            FieldSpec::new("Region", "SDR", "Appointments")
        }

        fn defaults(&self) -> RankOptions {
            RankOptions {
                top_n: Some(2),
                ..RankOptions::default()
            }
        }
    }

    struct FlatBoard;

    impl Board for FlatBoard {
        fn name(&self) -> &'static str {
            "flat-board"
        }

        fn title(&self) -> &'static str {
            "Flat Leaderboard"
        }

        fn fields(&self) -> FieldSpec {
            FieldSpec::new("Team", "SDR", "Score")
        }

        fn layout(&self) -> Layout {
            Layout::Flat
        }
    }

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn grouped_board_uses_its_defaults() {
        let input = rows(vec![
            json!({ "Region": "A", "SDR": "a", "Appointments": 3 }),
            json!({ "Region": "A", "SDR": "b", "Appointments": 2 }),
            json!({ "Region": "A", "SDR": "c", "Appointments": 1 }),
        ]);
        let report = build_standings(&TestBoard, &input, &RankOverrides::default()).unwrap();

        assert_eq!(report.board, "test-board");
        assert_eq!(report.standings.shown(), 2);
        assert_eq!(
            report.tally,
            BadgeTally {
                gold: 1,
                silver: 1,
                bronze: 0,
                unbadged: 0,
            }
        );
    }

    #[test]
    fn overrides_beat_defaults() {
        let input = rows(vec![
            json!({ "Region": "A", "SDR": "a", "Appointments": 3 }),
            json!({ "Region": "A", "SDR": "b", "Appointments": 2 }),
            json!({ "Region": "A", "SDR": "c", "Appointments": 1 }),
        ]);
        let overrides = RankOverrides {
            top_n: Some(3),
            ..RankOverrides::default()
        };
        let report = build_standings(&TestBoard, &input, &overrides).unwrap();
        assert_eq!(report.standings.shown(), 3);
        assert_eq!(report.tally.bronze, 1);
    }

    #[test]
    fn flat_board_reports_flat_standings() {
        let input = rows(vec![
            json!({ "SDR": "a", "Score": 3 }),
            json!({ "SDR": "b", "Score": 4 }),
        ]);
        let report = build_standings(&FlatBoard, &input, &RankOverrides::default()).unwrap();
        match &report.standings {
            Standings::Flat(rows) => {
                assert_eq!(rows[0].record.subject, "b");
                assert_eq!(rows[1].badge, BadgeTier::Silver);
            }
            other => panic!("expected flat standings, got {other:?}"),
        }
    }

    #[test]
    fn empty_batch_is_not_an_error() {
        let report = build_standings(&FlatBoard, &[], &RankOverrides::default()).unwrap();
        assert!(report.standings.is_empty());
        assert_eq!(report.tally.total(), 0);
    }

    #[test]
    fn report_serializes_for_renderers() {
        let input = rows(vec![json!({ "Region": "A", "SDR": "a", "Appointments": "3" })]);
        let report = build_standings(&TestBoard, &input, &RankOverrides::default()).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["standings"]["layout"], "grouped");
        let first = &value["standings"]["rows"][0]["members"][0];
        assert_eq!(first["subject"], "a");
        assert_eq!(first["rank"], 1);
        assert_eq!(first["badge"], "gold");
    }
}
