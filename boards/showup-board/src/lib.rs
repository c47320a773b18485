use leaderboard_core::{Board, FieldSpec, RankOptions};

/// ShowupBoard ranks SDRs by meetings that actually happened, per region.
pub struct ShowupBoard;

impl Board for ShowupBoard {
    fn name(&self) -> &'static str {
        "showups"
    }

    fn title(&self) -> &'static str {
        "Showup Leaderboard"
    }

    fn fields(&self) -> FieldSpec {
        FieldSpec::new("Region", "SDR", "Showups").with_display(&["Team"])
    }

    fn defaults(&self) -> RankOptions {
        RankOptions {
            top_n: Some(10),
            ..RankOptions::default()
        }
    }
}
