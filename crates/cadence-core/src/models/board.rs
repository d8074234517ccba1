//! Aggregated board view returned by the read path.

use serde::{Deserialize, Serialize};

use super::{PlanWithTemplates, Task};

/// Point and count metrics derived from a plan's task set.
///
/// "Today" figures run over board-visible tasks only; "week" figures run
/// over every task including expired ones, so finished work keeps counting
/// after its instance drops off the board.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardMetrics {
    /// Tasks completed today (done with `done_at` on today's calendar day)
    pub today_done_count: u32,

    /// All board-visible tasks, whether or not they are due today
    pub today_total_count: u32,

    /// Points completed today
    pub today_done_points: u32,

    /// Points across all board-visible tasks
    pub today_total_points: u32,

    /// Tasks completed at any point this week
    pub week_done_count: u32,

    /// Expected total instances this week: materialized past dailies plus a
    /// projection for the remaining days plus weekly/ad-hoc instances
    pub week_projected_count: u32,

    /// Points completed at any point this week
    pub week_done_points: u32,

    /// Expected total points this week (same blend as the count)
    pub week_projected_points: u32,

    /// 1-indexed day of the plan's week, clamped to 1..=7
    pub days_elapsed: u8,
}

/// Everything the presentation layer needs to render the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardData {
    /// The active plan with its template links
    pub plan: PlanWithTemplates,

    /// Board-visible tasks (expired excluded)
    pub tasks: Vec<Task>,

    /// Derived metrics
    pub metrics: BoardMetrics,
}
