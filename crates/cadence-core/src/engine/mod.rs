//! Lifecycle engine: plan mutations and the daily/period sync paths.
//!
//! Every multi-step operation here runs inside one transaction so a failure
//! part-way leaves no observable partial state. Generation is idempotent
//! (insert-or-skip on the instance identity), which is what lets two
//! overlapping sync calls converge instead of duplicating rows.

use jiff::civil::Date;
use rusqlite::Connection;

use crate::db::{task_queries::NewTask, template_queries};
use crate::error::Result;
use crate::models::{TaskKind, TaskStatus};

pub(crate) mod plan;
pub(crate) mod sync;


/// Stages task instances for a set of `(template_id, kind, frequency)`
/// entries: daily entries anchor on `today`, weekly entries on the plan's
/// period key. A dangling template reference skips that entry rather than
/// failing the whole run.
pub(crate) fn stage_instances(
    conn: &Connection,
    plan_id: u64,
    period_key: &str,
    today: Date,
    entries: &[(u64, TaskKind, u32)],
) -> Result<Vec<NewTask>> {
    let mut staged = Vec::new();
    for &(template_id, kind, frequency) in entries {
        let Some(template) = template_queries::get(conn, template_id)? else {
            continue;
        };
        let (for_date, period_key) = match kind {
            TaskKind::Daily => (Some(today), None),
            TaskKind::Weekly => (None, Some(period_key.to_string())),
            TaskKind::AdHoc => continue,
        };
        for index in 0..frequency {
            staged.push(NewTask {
                plan_id: Some(plan_id),
                template_id: Some(template_id),
                kind,
                title: template.title.clone(),
                description: Some(template.description.clone()),
                points: template.points,
                status: TaskStatus::Todo,
                for_date,
                period_key: period_key.clone(),
                instance_index: index,
            });
        }
    }
    Ok(staged)
}
