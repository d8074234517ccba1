//! High-level async API for the weekly board.
//!
//! [`Board`] is the interface the CLI (or any other front end) talks to. It
//! coordinates the lifecycle engine and the database: every operation opens
//! the database on a blocking thread, runs as one unit of work, and returns
//! typed results. Construction goes through [`BoardBuilder`].

use std::path::PathBuf;

use tokio::task;

use crate::clock;
use crate::db::{plan_queries, task_queries, template_queries, Database};
use crate::engine::{plan, sync};
use crate::error::{BoardError, Result};
use crate::models::{BoardData, Plan, PlanStatus, PlanWithTemplates, Task, TaskStatus, TaskTemplate};
use crate::params::{
    CreateAdhocTask, CreatePlan, CreateTemplate, UpdatePlan, UpdateTaskStatus, UpdateTemplate,
};

pub mod builder;


pub use builder::BoardBuilder;

/// Main entry point for board operations.
pub struct Board {
    pub(crate) db_path: PathBuf,
}

impl Board {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Runs a blocking database closure on the blocking thread pool.
    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| BoardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Creates the week's plan for today and generates its initial task
    /// instances. Fails with a conflict while another plan is active.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let params = params.clone();
        self.with_db(move |db| plan::create_plan(db, &params, clock::today()))
            .await
    }

    /// Edits a plan: description, template selection (applied as a diff that
    /// preserves completed work), and attached ad-hoc tasks.
    pub async fn update_plan(&self, plan_id: u64, params: &UpdatePlan) -> Result<Plan> {
        let params = params.clone();
        self.with_db(move |db| plan::update_plan(db, plan_id, &params, clock::today()))
            .await
    }

    /// Assembles the board view for today, running the daily or period sync
    /// first if one is due. `None` means there is no plan to show and the
    /// caller should prompt for one.
    pub async fn fetch_board(&self) -> Result<Option<BoardData>> {
        self.with_db(|db| sync::fetch_board(db, clock::today())).await
    }

    /// The plan waiting for a successor after a period rollover, if any.
    /// Useful for pre-filling the next plan's configuration.
    pub async fn pending_plan(&self) -> Result<Option<PlanWithTemplates>> {
        self.with_db(|db| {
            let Some(pending) = plan_queries::get_by_status(db.conn(), PlanStatus::PendingUpdate)?
            else {
                return Ok(None);
            };
            plan_queries::get_with_templates(db.conn(), pending.id)
        })
        .await
    }

    /// Moves a task between board columns. Expired tasks are immutable, and
    /// expiry itself is never a valid target.
    pub async fn update_task_status(&self, params: &UpdateTaskStatus) -> Result<Task> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| {
            let task = task_queries::get(db.conn(), params.id)?
                .ok_or(BoardError::TaskNotFound { id: params.id })?;
            if task.status == TaskStatus::Expired {
                return Err(BoardError::invalid_input(
                    "status",
                    "expired tasks cannot be reopened",
                ));
            }
            task_queries::update_status(db.conn(), params.id, params.status)?;
            task_queries::get(db.conn(), params.id)?
                .ok_or(BoardError::TaskNotFound { id: params.id })
        })
        .await
    }

    /// Creates a one-off task, attached to a plan or floating in the
    /// unattached pool.
    pub async fn create_adhoc_task(&self, params: &CreateAdhocTask) -> Result<Task> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| {
            if let Some(plan_id) = params.plan_id {
                plan_queries::get(db.conn(), plan_id)?
                    .ok_or(BoardError::PlanNotFound { id: plan_id })?;
            }
            let id = task_queries::insert(
                db.conn(),
                &task_queries::NewTask {
                    plan_id: params.plan_id,
                    template_id: None,
                    kind: crate::models::TaskKind::AdHoc,
                    title: params.title.clone(),
                    description: params.description.clone(),
                    points: params.points,
                    status: params.status.unwrap_or_default(),
                    for_date: None,
                    period_key: None,
                    instance_index: 0,
                },
            )?;
            task_queries::get(db.conn(), id)?.ok_or(BoardError::TaskNotFound { id })
        })
        .await
    }

    /// Lists ad-hoc tasks not attached to any plan, available for pickup
    /// when configuring the next plan.
    pub async fn list_unattached_adhoc(&self) -> Result<Vec<Task>> {
        self.with_db(|db| task_queries::list_unattached_adhoc(db.conn()))
            .await
    }

    /// Creates a task template.
    pub async fn create_template(&self, params: &CreateTemplate) -> Result<TaskTemplate> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| {
            template_queries::insert(db.conn(), &params.title, &params.description, params.points)
        })
        .await
    }

    /// Applies field updates to a template. Existing task instances keep
    /// their snapshots.
    pub async fn update_template(&self, params: &UpdateTemplate) -> Result<TaskTemplate> {
        params.validate()?;
        let params = params.clone();
        self.with_db(move |db| {
            template_queries::update(
                db.conn(),
                params.id,
                params.title.as_deref(),
                params.description.as_deref(),
                params.points,
            )?;
            template_queries::get(db.conn(), params.id)?
                .ok_or(BoardError::TemplateNotFound { id: params.id })
        })
        .await
    }

    /// Retrieves a template by its ID.
    pub async fn get_template(&self, id: u64) -> Result<Option<TaskTemplate>> {
        self.with_db(move |db| template_queries::get(db.conn(), id))
            .await
    }

    /// Lists templates, optionally including archived ones.
    pub async fn list_templates(&self, include_archived: bool) -> Result<Vec<TaskTemplate>> {
        self.with_db(move |db| template_queries::list(db.conn(), include_archived))
            .await
    }

    /// Archives or restores a template. Archived templates stop appearing
    /// in listings but stay referenced by history.
    pub async fn set_template_archived(&self, id: u64, archived: bool) -> Result<()> {
        self.with_db(move |db| template_queries::set_archived(db.conn(), id, archived))
            .await
    }
}
