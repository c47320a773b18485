use leaderboard_core::{Board, FieldSpec, RankOptions};

/// AppointmentBoard ranks SDRs by booked appointments inside each region,
/// showing the ten best per region.
pub struct AppointmentBoard;

impl Board for AppointmentBoard {
    fn name(&self) -> &'static str {
        "appointments"
    }

    fn title(&self) -> &'static str {
        "Appointment Leaderboard"
    }

    fn fields(&self) -> FieldSpec {
        FieldSpec::new("Region", "SDR", "Appointments").with_display(&["Team"])
    }

    fn defaults(&self) -> RankOptions {
        RankOptions {
            top_n: Some(10),
            ..RankOptions::default()
        }
    }
}
