//! Parameter structures for board operations.
//!
//! These are the interface-agnostic shapes the core accepts. Each mutating
//! parameter set carries a `validate()` method that enforces field-level
//! constraints (positive frequencies and points, board-only statuses) before
//! any business logic runs; interface layers (CLI, future HTTP handlers) add
//! their own framework-specific derives and convert into these.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::models::{PeriodType, TaskKind, TaskStatus};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// One template selection within a plan: which template, at what cadence,
/// how many instances per day or per week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateSelection {
    /// Template to schedule
    pub template_id: u64,
    /// Cadence the template runs at within this plan
    pub kind: TaskKind,
    /// Instances per day (daily) or per week (weekly)
    pub frequency: u32,
}

/// Parameters for creating a new weekly plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Period granularity (weekly only)
    #[serde(default)]
    pub period_type: PeriodType,
    /// Optional free-text description
    pub description: Option<String>,
    /// Templates to schedule this week
    #[serde(default)]
    pub templates: Vec<TemplateSelection>,
    /// Pre-existing ad-hoc tasks to attach to the new plan
    #[serde(default)]
    pub adhoc_task_ids: Vec<u64>,
}

impl CreatePlan {
    /// Validates field-level constraints.
    pub fn validate(&self) -> Result<()> {
        if self.templates.is_empty() && self.adhoc_task_ids.is_empty() {
            return Err(BoardError::invalid_input(
                "templates",
                "select at least one template or ad-hoc task",
            ));
        }
        validate_selections(&self.templates)
    }
}

/// Parameters for editing an existing plan.
///
/// `templates` and `adhoc_task_ids`, when present, are full replacement
/// lists; the plan service diffs them against the current state. All-absent
/// input is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    /// New description, if changing
    pub description: Option<String>,
    /// Full replacement template selection, if changing
    pub templates: Option<Vec<TemplateSelection>>,
    /// Full replacement set of attached ad-hoc task ids, if changing
    pub adhoc_task_ids: Option<Vec<u64>>,
}

impl UpdatePlan {
    /// Validates field-level constraints.
    pub fn validate(&self) -> Result<()> {
        match &self.templates {
            Some(selections) => validate_selections(selections),
            None => Ok(()),
        }
    }

    /// Whether this update carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.templates.is_none() && self.adhoc_task_ids.is_none()
    }
}

/// Parameters for creating a task template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTemplate {
    /// Title of the template (required)
    pub title: String,
    /// Description of the template (required)
    pub description: String,
    /// Points value of one generated instance
    pub points: u32,
}

impl CreateTemplate {
    /// Validates field-level constraints.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BoardError::invalid_input("title", "title is required"));
        }
        if self.description.trim().is_empty() {
            return Err(BoardError::invalid_input(
                "description",
                "description is required",
            ));
        }
        validate_points(self.points)
    }
}

/// Parameters for updating a task template. At least one field must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTemplate {
    /// Template ID to update (required)
    pub id: u64,
    /// Updated title
    pub title: Option<String>,
    /// Updated description
    pub description: Option<String>,
    /// Updated points value
    pub points: Option<u32>,
}

impl UpdateTemplate {
    /// Validates field-level constraints.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_none() && self.description.is_none() && self.points.is_none() {
            return Err(BoardError::invalid_input(
                "template",
                "at least one field must be provided",
            ));
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(BoardError::invalid_input("title", "title cannot be empty"));
            }
        }
        if let Some(points) = self.points {
            validate_points(points)?;
        }
        Ok(())
    }
}

/// Parameters for creating a one-off ad-hoc task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAdhocTask {
    /// Title of the task (required)
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Points value
    pub points: u32,
    /// Initial status; defaults to todo, may also be doing
    pub status: Option<TaskStatus>,
    /// Plan to attach the task to; unattached when absent
    pub plan_id: Option<u64>,
}

impl CreateAdhocTask {
    /// Validates field-level constraints.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BoardError::invalid_input("title", "title is required"));
        }
        validate_points(self.points)?;
        match self.status {
            None | Some(TaskStatus::Todo) | Some(TaskStatus::Doing) => Ok(()),
            Some(other) => Err(BoardError::invalid_input(
                "status",
                format!("ad-hoc tasks start as todo or doing, not {}", other.as_str()),
            )),
        }
    }
}

/// Parameters for moving a task between board columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskStatus {
    /// Task ID to update (required)
    pub id: u64,
    /// Target status
    pub status: TaskStatus,
}

impl UpdateTaskStatus {
    /// Validates field-level constraints. Expired is sync-engine territory,
    /// never a user-selectable target.
    pub fn validate(&self) -> Result<()> {
        if self.status == TaskStatus::Expired {
            return Err(BoardError::invalid_input(
                "status",
                "tasks cannot be expired by hand",
            ));
        }
        Ok(())
    }
}

fn validate_selections(selections: &[TemplateSelection]) -> Result<()> {
    for sel in selections {
        if sel.frequency == 0 {
            return Err(BoardError::invalid_input(
                "frequency",
                format!(
                    "frequency must be a positive integer (template {})",
                    sel.template_id
                ),
            ));
        }
    }
    Ok(())
}

fn validate_points(points: u32) -> Result<()> {
    if points == 0 {
        return Err(BoardError::invalid_input(
            "points",
            "points must be a positive integer",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_plan_requires_a_selection() {
        let params = CreatePlan::default();
        assert!(matches!(
            params.validate(),
            Err(BoardError::InvalidInput { field, .. }) if field == "templates"
        ));
    }

    #[test]
    fn create_plan_accepts_adhoc_only() {
        let params = CreatePlan {
            adhoc_task_ids: vec![7],
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let params = CreatePlan {
            templates: vec![TemplateSelection {
                template_id: 1,
                kind: TaskKind::Daily,
                frequency: 0,
            }],
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(BoardError::InvalidInput { field, .. }) if field == "frequency"
        ));
    }

    #[test]
    fn update_plan_without_changes_is_empty() {
        let params = UpdatePlan::default();
        assert!(params.is_empty());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn adhoc_task_cannot_start_done() {
        let params = CreateAdhocTask {
            title: "Ship it".to_string(),
            points: 2,
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn status_update_rejects_expired_target() {
        let params = UpdateTaskStatus {
            id: 1,
            status: TaskStatus::Expired,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn template_update_needs_one_field() {
        let params = UpdateTemplate {
            id: 3,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = UpdateTemplate {
            id: 3,
            points: Some(5),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
