//! Status and kind enumerations for plans and tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan statuses.
///
/// A plan moves one way through `Active -> PendingUpdate -> Completed`.
/// `PendingUpdate` marks a plan whose week has elapsed but whose successor
/// has not been configured yet; `Completed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan governs the current week
    #[default]
    Active,

    /// Plan's week has elapsed; waiting for the user to configure a successor
    PendingUpdate,

    /// Plan has been superseded (terminal)
    Completed,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "pending_update" => Ok(PlanStatus::PendingUpdate),
            "completed" => Ok(PlanStatus::Completed),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::PendingUpdate => "pending_update",
            PlanStatus::Completed => "completed",
        }
    }
}

/// Type-safe enumeration of task statuses.
///
/// Users toggle `Todo <-> Doing <-> Done`; only the sync engine moves a task
/// to `Expired`, and an expired task cannot be reopened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is pending
    #[default]
    Todo,

    /// Task is being worked on
    Doing,

    /// Task has been completed
    Done,

    /// Task was retired by the sync engine without being completed
    Expired,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            "expired" => Ok(TaskStatus::Expired),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
            TaskStatus::Expired => "expired",
        }
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "○ Todo",
            TaskStatus::Doing => "➤ Doing",
            TaskStatus::Done => "✓ Done",
            TaskStatus::Expired => "✕ Expired",
        }
    }
}

/// Cadence of a task or of a template's use within a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Generated fresh every day of the week
    Daily,

    /// Generated once for the whole week
    Weekly,

    /// Created directly by the user, not bound to a cadence
    AdHoc,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(TaskKind::Daily),
            "weekly" => Ok(TaskKind::Weekly),
            "ad_hoc" | "adhoc" => Ok(TaskKind::AdHoc),
            _ => Err(format!("Invalid task kind: {s}")),
        }
    }
}

impl TaskKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Daily => "daily",
            TaskKind::Weekly => "weekly",
            TaskKind::AdHoc => "ad_hoc",
        }
    }
}

/// Planning period granularity. Only weekly periods exist today; the enum
/// keeps the storage format honest about that.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    #[default]
    Weekly,
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(PeriodType::Weekly),
            _ => Err(format!("Invalid period type: {s}")),
        }
    }
}

impl PeriodType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Weekly => "weekly",
        }
    }
}
