//! Plan creation and diff-based editing.

use jiff::civil::Date;
use rusqlite::Connection;

use crate::db::{link_queries, plan_queries, task_queries, Database};
use crate::diff::diff_template_sets;
use crate::error::{BoardError, DatabaseResultExt, Result};
use crate::models::{Plan, PlanStatus};
use crate::params::{CreatePlan, TemplateSelection, UpdatePlan};

/// Creates the week's plan, generates its initial task instances, and
/// retires a pending predecessor if one exists.
///
/// Exactly one plan may be active; creating while one exists is a conflict
/// and performs no writes.
pub(crate) fn create_plan(db: &mut Database, params: &CreatePlan, today: Date) -> Result<Plan> {
    params.validate()?;

    if let Some(active) = plan_queries::get_active(db.conn())? {
        return Err(BoardError::ActivePlanExists { id: active.id });
    }
    let pending = plan_queries::get_by_status(db.conn(), PlanStatus::PendingUpdate)?;

    let period_key = crate::clock::iso_week_key(today);

    let tx = db.transaction()?;
    let mut plan = plan_queries::insert(
        &tx,
        params.period_type,
        &period_key,
        params.description.as_deref(),
        PlanStatus::Active,
    )?;

    link_queries::insert_many(&tx, plan.id, &params.templates)?;
    let staged = stage_for_selections(&tx, plan.id, &period_key, today, &params.templates)?;
    task_queries::insert_many(&tx, &staged)?;

    if let Some(pending) = pending {
        // Ad-hoc tasks the user did not carry over return to the pool.
        task_queries::clear_plan_id_except(&tx, pending.id, &params.adhoc_task_ids)?;
        plan_queries::update_status(&tx, pending.id, PlanStatus::Completed)?;
    }
    task_queries::set_plan_id(&tx, &params.adhoc_task_ids, plan.id)?;

    // Today's instances were just generated, so the daily sync is done for
    // the day.
    plan_queries::update_last_sync_date(&tx, plan.id, today)?;
    tx.commit().db_context("Failed to commit plan creation")?;

    plan.last_sync_date = Some(today);
    Ok(plan)
}

/// Edits an existing plan.
///
/// Template changes are applied as a diff so only the templates that
/// actually changed are touched: their open (todo/doing) instances are
/// deleted and regenerated, while done and expired instances stay as
/// recorded history. Absent fields leave the plan untouched.
pub(crate) fn update_plan(
    db: &mut Database,
    plan_id: u64,
    params: &UpdatePlan,
    today: Date,
) -> Result<Plan> {
    params.validate()?;

    let plan = plan_queries::get(db.conn(), plan_id)?
        .ok_or(BoardError::PlanNotFound { id: plan_id })?;
    if params.is_empty() {
        return Ok(plan);
    }

    let tx = db.transaction()?;

    if let Some(description) = &params.description {
        plan_queries::update_description(&tx, plan_id, Some(description))?;
    }

    if let Some(selections) = &params.templates {
        apply_template_diff(&tx, plan_id, &plan.period_key, today, selections)?;
        // Regeneration ran for today; record it so the next board fetch
        // does not sync again.
        plan_queries::update_last_sync_date(&tx, plan_id, today)?;
    }

    if let Some(keep) = &params.adhoc_task_ids {
        task_queries::clear_plan_id_except(&tx, plan_id, keep)?;
        task_queries::set_plan_id(&tx, keep, plan_id)?;
    }

    tx.commit().db_context("Failed to commit plan update")?;

    plan_queries::get(db.conn(), plan_id)?.ok_or(BoardError::PlanNotFound { id: plan_id })
}

fn apply_template_diff(
    tx: &Connection,
    plan_id: u64,
    period_key: &str,
    today: Date,
    selections: &[TemplateSelection],
) -> Result<()> {
    let current = link_queries::list_by_plan(tx, plan_id)?;
    let diff = diff_template_sets(&current, selections);

    if !diff.removed.is_empty() {
        task_queries::delete_incomplete_by_templates(tx, plan_id, &diff.removed)?;
        link_queries::delete_many(tx, plan_id, &diff.removed)?;
    }

    let mut regenerate: Vec<TemplateSelection> = Vec::new();
    for (link_id, sel) in &diff.modified {
        // Open instances reflect the old cadence; replace them wholesale.
        task_queries::delete_incomplete_by_templates(tx, plan_id, &[sel.template_id])?;
        link_queries::update(tx, *link_id, sel)?;
        regenerate.push(sel.clone());
    }

    link_queries::insert_many(tx, plan_id, &diff.added)?;
    regenerate.extend(diff.added.iter().cloned());

    let staged = stage_for_selections(tx, plan_id, period_key, today, &regenerate)?;
    task_queries::insert_many(tx, &staged)?;
    Ok(())
}

fn stage_for_selections(
    tx: &Connection,
    plan_id: u64,
    period_key: &str,
    today: Date,
    selections: &[TemplateSelection],
) -> Result<Vec<crate::db::task_queries::NewTask>> {
    let entries: Vec<_> = selections
        .iter()
        .map(|sel| (sel.template_id, sel.kind, sel.frequency))
        .collect();
    super::stage_instances(tx, plan_id, period_key, today, &entries)
}
