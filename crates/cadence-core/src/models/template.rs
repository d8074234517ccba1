//! Task template model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A reusable task definition, owned independently of any plan.
///
/// Many plans may reference the same template over time, each with its own
/// cadence override. Archiving hides a template from selection without
/// deleting it; tasks already generated from it are untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskTemplate {
    /// Unique identifier for the template
    pub id: u64,

    /// Optional owner identifier (single-tenant today, kept for forward
    /// compatibility)
    pub owner: Option<String>,

    /// Title copied onto generated tasks
    pub title: String,

    /// Description copied onto generated tasks
    pub description: String,

    /// Points value of one generated instance
    pub points: u32,

    /// Hidden from selection when true
    pub archived: bool,

    /// Timestamp when the template was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the template was last modified (UTC)
    pub updated_at: Timestamp,
}
