//! Plan and plan-template link model definitions.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{PeriodType, PlanStatus, TaskKind, TaskTemplate};

/// One weekly planning period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Optional owner identifier (single-tenant today, kept for forward
    /// compatibility)
    pub owner: Option<String>,

    /// Period granularity (weekly only)
    pub period_type: PeriodType,

    /// ISO week key identifying the calendar week, e.g. `2026-W09`
    pub period_key: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: PlanStatus,

    /// Calendar day the daily sync last ran for this plan
    pub last_sync_date: Option<Date>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

/// Binds a template to a plan for one period, carrying the per-plan cadence
/// override. The same template can run as 3x/week in one plan and 1x/day in
/// another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanTemplate {
    /// Unique identifier for the link
    pub id: u64,

    /// Plan this link belongs to
    pub plan_id: u64,

    /// Template being scheduled
    pub template_id: u64,

    /// Cadence the template runs at within this plan
    pub kind: TaskKind,

    /// Instances per day (daily) or per week (weekly)
    pub frequency: u32,

    /// Timestamp when the link was created (UTC)
    pub created_at: Timestamp,
}

/// A plan-template link joined with its template, as the sync engine and the
/// board view consume it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkedTemplate {
    /// The link row (cadence override)
    pub link: PlanTemplate,

    /// The template it points at
    pub template: TaskTemplate,
}

/// A plan eagerly loaded with its template links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanWithTemplates {
    /// The plan itself
    pub plan: Plan,

    /// All template links with their templates
    pub templates: Vec<LinkedTemplate>,
}
