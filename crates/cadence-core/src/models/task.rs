//! Task instance model definition.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{TaskKind, TaskStatus};

/// One concrete, trackable task instance.
///
/// Title, description and points are copied from the template at generation
/// time; editing the template later does not rewrite existing tasks. The
/// tuple `(plan_id, template_id, kind, for_date-or-period_key,
/// instance_index)` is unique, which is what makes bulk generation
/// idempotent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Plan the task belongs to; ad-hoc tasks may be unattached
    pub plan_id: Option<u64>,

    /// Template the task was generated from; absent for ad-hoc tasks
    pub template_id: Option<u64>,

    /// Cadence of the instance
    pub kind: TaskKind,

    /// Title snapshot
    pub title: String,

    /// Description snapshot
    pub description: Option<String>,

    /// Points snapshot
    pub points: u32,

    /// Lifecycle status
    #[serde(default)]
    pub status: TaskStatus,

    /// Calendar day a daily instance belongs to
    pub for_date: Option<Date>,

    /// ISO week key a weekly instance belongs to
    pub period_key: Option<String>,

    /// 0-based ordinal distinguishing same-template instances on one
    /// day/week
    pub instance_index: u32,

    /// Set exactly when status transitions to Done, cleared otherwise
    pub done_at: Option<Timestamp>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Task {
    /// Whether this daily instance's anchor day has passed relative to
    /// `today` (it is living out its one-day grace window).
    pub fn is_rollover(&self, today: Date) -> bool {
        self.kind == TaskKind::Daily && self.for_date.is_some_and(|d| d < today)
    }
}
