//! Task instance operations and queries.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};
use crate::models::{Task, TaskKind, TaskStatus};

const TASK_COLUMNS: &str = "id, plan_id, template_id, kind, title, description, points, status, \
                            for_date, period_key, instance_index, done_at, created_at, updated_at";
const INSERT_TASK_SQL: &str =
    "INSERT INTO tasks (plan_id, template_id, kind, title, description, points, status, \
     for_date, period_key, instance_index, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)";
// OR IGNORE rides the unique instance index so re-running generation for a
// day or week inserts only the instances that do not exist yet.
const INSERT_TASK_IDEMPOTENT_SQL: &str =
    "INSERT OR IGNORE INTO tasks (plan_id, template_id, kind, title, description, points, status, \
     for_date, period_key, instance_index, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)";
const UPDATE_STATUS_SQL: &str =
    "UPDATE tasks SET status = ?1, done_at = ?2, updated_at = ?3 WHERE id = ?4";
const EXPIRE_OLDER_SQL: &str = "UPDATE tasks SET status = 'expired', updated_at = ?1 \
     WHERE plan_id = ?2 AND kind = 'daily' AND for_date < ?3 AND status != 'done'";
const EXPIRE_ALL_INCOMPLETE_SQL: &str = "UPDATE tasks SET status = 'expired', updated_at = ?1 \
     WHERE plan_id = ?2 AND kind != 'ad_hoc' AND status != 'done'";

/// A task row staged for insertion.
#[derive(Debug, Clone)]
pub(crate) struct NewTask {
    pub plan_id: Option<u64>,
    pub template_id: Option<u64>,
    pub kind: TaskKind,
    pub title: String,
    pub description: Option<String>,
    pub points: u32,
    pub status: TaskStatus,
    pub for_date: Option<Date>,
    pub period_key: Option<String>,
    pub instance_index: u32,
}

/// Maps a task row using the `TASK_COLUMNS` order.
fn task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let kind: String = row.get(3)?;
    let kind = kind
        .parse::<TaskKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?;

    let status: String = row.get(7)?;
    let status = status
        .parse::<TaskStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, e.into()))?;

    let for_date = row
        .get::<_, Option<String>>(8)?
        .map(|s| s.parse::<Date>())
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e)))?;

    let done_at = row
        .get::<_, Option<String>>(11)?
        .map(|s| s.parse::<Timestamp>())
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e)))?;

    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, Option<i64>>(1)?.map(|v| v as u64),
        template_id: row.get::<_, Option<i64>>(2)?.map(|v| v as u64),
        kind,
        title: row.get(4)?,
        description: row.get(5)?,
        points: row.get::<_, i64>(6)? as u32,
        status,
        for_date,
        period_key: row.get(9)?,
        instance_index: row.get::<_, i64>(10)? as u32,
        done_at,
        created_at: super::plan_queries::parse_timestamp(row, 12)?,
        updated_at: super::plan_queries::parse_timestamp(row, 13)?,
    })
}

/// Retrieves a task by its ID.
pub(crate) fn get(conn: &Connection, id: u64) -> Result<Option<Task>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
    conn.query_row(&sql, params![id as i64], task_from_row)
        .optional()
        .db_context("Failed to query task")
}

/// Lists all tasks of a plan in stable creation order.
pub(crate) fn list_by_plan(conn: &Connection, plan_id: u64) -> Result<Vec<Task>> {
    let sql =
        format!("SELECT {TASK_COLUMNS} FROM tasks WHERE plan_id = ?1 ORDER BY created_at, id");
    let mut stmt = conn
        .prepare(&sql)
        .db_context("Failed to prepare task query")?;
    let tasks = stmt
        .query_map(params![plan_id as i64], task_from_row)
        .db_context("Failed to query tasks")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch tasks")?;
    Ok(tasks)
}

/// Lists ad-hoc tasks not attached to any plan and not expired.
pub(crate) fn list_unattached_adhoc(conn: &Connection) -> Result<Vec<Task>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks \
         WHERE plan_id IS NULL AND kind = 'ad_hoc' AND status != 'expired' \
         ORDER BY created_at, id"
    );
    let mut stmt = conn
        .prepare(&sql)
        .db_context("Failed to prepare ad-hoc task query")?;
    let tasks = stmt
        .query_map([], task_from_row)
        .db_context("Failed to query ad-hoc tasks")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch ad-hoc tasks")?;
    Ok(tasks)
}

/// Creates a single task row and returns its ID.
pub(crate) fn insert(conn: &Connection, task: &NewTask) -> Result<u64> {
    execute_insert(conn, INSERT_TASK_SQL, task)?;
    Ok(conn.last_insert_rowid() as u64)
}

/// Inserts a batch of generated instances, silently skipping any whose
/// identity slot already exists. Returns the number of rows inserted.
pub(crate) fn insert_many(conn: &Connection, tasks: &[NewTask]) -> Result<usize> {
    let mut inserted = 0;
    for task in tasks {
        inserted += execute_insert(conn, INSERT_TASK_IDEMPOTENT_SQL, task)?;
    }
    Ok(inserted)
}

fn execute_insert(conn: &Connection, sql: &str, task: &NewTask) -> Result<usize> {
    conn.execute(
        sql,
        params![
            task.plan_id.map(|v| v as i64),
            task.template_id.map(|v| v as i64),
            task.kind.as_str(),
            task.title,
            task.description,
            task.points as i64,
            task.status.as_str(),
            task.for_date.map(|d| d.to_string()),
            task.period_key,
            task.instance_index as i64,
            Timestamp::now().to_string()
        ],
    )
    .db_context("Failed to insert task")
}

/// Moves a task to `status`. `done_at` is stamped exactly when the target
/// is Done and cleared on any other transition.
pub(crate) fn update_status(conn: &Connection, id: u64, status: TaskStatus) -> Result<()> {
    let now = Timestamp::now();
    let done_at = (status == TaskStatus::Done).then(|| now.to_string());
    conn.execute(
        UPDATE_STATUS_SQL,
        params![status.as_str(), done_at, now.to_string(), id as i64],
    )
    .db_context("Failed to update task status")?;
    Ok(())
}

/// Expires every non-done daily instance of the plan anchored strictly
/// before `cutoff`.
pub(crate) fn expire_older_than(conn: &Connection, plan_id: u64, cutoff: Date) -> Result<usize> {
    conn.execute(
        EXPIRE_OLDER_SQL,
        params![Timestamp::now().to_string(), plan_id as i64, cutoff.to_string()],
    )
    .db_context("Failed to expire stale tasks")
}

/// Expires every generated (non-ad-hoc) instance of the plan that is not
/// done. Ad-hoc tasks ride along to the successor plan instead.
pub(crate) fn expire_all_incomplete(conn: &Connection, plan_id: u64) -> Result<usize> {
    conn.execute(
        EXPIRE_ALL_INCOMPLETE_SQL,
        params![Timestamp::now().to_string(), plan_id as i64],
    )
    .db_context("Failed to expire plan tasks")
}

/// Deletes the plan's todo/doing instances generated from the given
/// templates. Done and expired instances are history and stay put.
pub(crate) fn delete_incomplete_by_templates(
    conn: &Connection,
    plan_id: u64,
    template_ids: &[u64],
) -> Result<usize> {
    if template_ids.is_empty() {
        return Ok(0);
    }
    let placeholders = super::placeholders(template_ids.len(), 2);
    let sql = format!(
        "DELETE FROM tasks WHERE plan_id = ?1 AND status IN ('todo', 'doing') \
         AND template_id IN ({placeholders})"
    );
    let mut values: Vec<i64> = vec![plan_id as i64];
    values.extend(template_ids.iter().map(|id| *id as i64));
    conn.execute(&sql, rusqlite::params_from_iter(values))
        .db_context("Failed to delete superseded tasks")
}

/// Attaches the given tasks to a plan.
pub(crate) fn set_plan_id(conn: &Connection, task_ids: &[u64], plan_id: u64) -> Result<()> {
    if task_ids.is_empty() {
        return Ok(());
    }
    let placeholders = super::placeholders(task_ids.len(), 3);
    let sql = format!(
        "UPDATE tasks SET plan_id = ?1, updated_at = ?2 WHERE id IN ({placeholders})"
    );
    let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![
        Box::new(plan_id as i64),
        Box::new(Timestamp::now().to_string()),
    ];
    for id in task_ids {
        values.push(Box::new(*id as i64));
    }
    conn.execute(&sql, rusqlite::params_from_iter(values.iter()))
        .db_context("Failed to attach tasks to plan")?;
    Ok(())
}

/// Detaches the plan's ad-hoc tasks except those in `keep`. Detached tasks
/// return to the unattached pool.
pub(crate) fn clear_plan_id_except(conn: &Connection, plan_id: u64, keep: &[u64]) -> Result<()> {
    let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![
        Box::new(Timestamp::now().to_string()),
        Box::new(plan_id as i64),
    ];
    let sql = if keep.is_empty() {
        "UPDATE tasks SET plan_id = NULL, updated_at = ?1 \
         WHERE plan_id = ?2 AND kind = 'ad_hoc'"
            .to_string()
    } else {
        let placeholders = super::placeholders(keep.len(), 3);
        for id in keep {
            values.push(Box::new(*id as i64));
        }
        format!(
            "UPDATE tasks SET plan_id = NULL, updated_at = ?1 \
             WHERE plan_id = ?2 AND kind = 'ad_hoc' AND id NOT IN ({placeholders})"
        )
    };
    conn.execute(&sql, rusqlite::params_from_iter(values.iter()))
        .db_context("Failed to detach ad-hoc tasks")?;
    Ok(())
}
