use leaderboard_core::{Board, FieldSpec, Layout, Qualifier, RankOptions};

/// Fewest appointments an SDR needs before their call score counts.
pub const MIN_APPOINTMENTS: f64 = 3.0;

/// CallQualityBoard is a single table of average call scores. SDRs with
/// too few appointments are left off so one lucky call cannot top it.
pub struct CallQualityBoard;

impl Board for CallQualityBoard {
    fn name(&self) -> &'static str {
        "call-quality"
    }

    fn title(&self) -> &'static str {
        "Call Quality Leaderboard"
    }

    fn fields(&self) -> FieldSpec {
        FieldSpec::new("Team", "SDR", "Average Score").with_display(&["Team", "Appointments"])
    }

    fn layout(&self) -> Layout {
        Layout::Flat
    }

    fn defaults(&self) -> RankOptions {
        RankOptions {
            top_n: Some(10),
            qualifier: Some(Qualifier::new("Appointments", MIN_APPOINTMENTS)),
            ..RankOptions::default()
        }
    }
}
