use leaderboard_core::{Board, FieldSpec, RankOptions};

/// TaskBoard counts completed tasks per project and crowns the top three.
pub struct TaskBoard;

impl Board for TaskBoard {
    fn name(&self) -> &'static str {
        "tasks"
    }

    fn title(&self) -> &'static str {
        "Task Leaderboard"
    }

    fn fields(&self) -> FieldSpec {
        FieldSpec::new("Project", "SDR", "Tasks")
    }

    fn defaults(&self) -> RankOptions {
        RankOptions {
            top_n: Some(3),
            ..RankOptions::default()
        }
    }
}
