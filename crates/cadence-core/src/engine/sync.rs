//! Daily and end-of-period synchronization, and the board read path.

use jiff::civil::Date;
use jiff::ToSpan;

use crate::db::{plan_queries, task_queries, Database};
use crate::error::{DatabaseResultExt, Result};
use crate::metrics::compute_metrics;
use crate::models::{BoardData, PlanStatus, TaskKind, TaskStatus};

/// Brings a plan's daily instances up to date for `today`: generates
/// today's instances from the plan's daily templates and expires instances
/// that have outlived their one-day grace window.
///
/// Idempotent for a fixed day; a plan that no longer exists is a no-op.
pub(crate) fn daily_sync(db: &mut Database, plan_id: u64, today: Date) -> Result<()> {
    let Some(plan) = plan_queries::get_with_templates(db.conn(), plan_id)? else {
        return Ok(());
    };

    let entries: Vec<_> = plan
        .templates
        .iter()
        .filter(|linked| linked.link.kind == TaskKind::Daily)
        .map(|linked| (linked.link.template_id, linked.link.kind, linked.link.frequency))
        .collect();

    let tx = db.transaction()?;
    // Stamped in the same unit of work as generation, so a failed sync
    // re-runs in full on the next fetch.
    plan_queries::update_last_sync_date(&tx, plan_id, today)?;
    // Yesterday's instances stay on the board one more day; anything older
    // and unfinished expires.
    task_queries::expire_older_than(&tx, plan_id, today - 1.day())?;
    let staged = super::stage_instances(&tx, plan_id, &plan.plan.period_key, today, &entries)?;
    task_queries::insert_many(&tx, &staged)?;
    tx.commit().db_context("Failed to commit daily sync")?;
    Ok(())
}

/// Closes out a plan whose week has elapsed: expires every unfinished
/// generated instance (ad-hoc tasks survive, they are not period-scoped)
/// and parks the plan in pending-update until a successor is configured.
pub(crate) fn end_of_period_sync(db: &mut Database, plan_id: u64) -> Result<()> {
    let tx = db.transaction()?;
    task_queries::expire_all_incomplete(&tx, plan_id)?;
    plan_queries::update_status(&tx, plan_id, PlanStatus::PendingUpdate)?;
    tx.commit().db_context("Failed to commit period sync")?;
    Ok(())
}

/// The read path: finds the active plan, runs whichever sync is due, and
/// assembles the board view.
///
/// Returns `None` when there is no active plan or the plan's week has just
/// elapsed; the caller prompts for a new plan in both cases.
pub(crate) fn fetch_board(db: &mut Database, today: Date) -> Result<Option<BoardData>> {
    let Some(active) = plan_queries::get_active(db.conn())? else {
        return Ok(None);
    };

    if crate::clock::iso_week_key(today) != active.period_key {
        end_of_period_sync(db, active.id)?;
        return Ok(None);
    }

    if active.last_sync_date != Some(today) {
        daily_sync(db, active.id, today)?;
    }

    let Some(plan) = plan_queries::get_with_templates(db.conn(), active.id)? else {
        return Ok(None);
    };
    let tasks = task_queries::list_by_plan(db.conn(), active.id)?;
    let metrics = compute_metrics(&plan, &tasks, today)?;
    let visible = tasks
        .into_iter()
        .filter(|t| t.status != TaskStatus::Expired)
        .collect();

    Ok(Some(BoardData {
        plan,
        tasks: visible,
        metrics,
    }))
}
