//! Plan row operations and queries.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};
use crate::models::{LinkedTemplate, PeriodType, Plan, PlanStatus, PlanWithTemplates};

const PLAN_COLUMNS: &str =
    "id, owner, period_type, period_key, description, status, last_sync_date, created_at, updated_at";
const SELECT_PLAN_SQL: &str =
    "SELECT id, owner, period_type, period_key, description, status, last_sync_date, created_at, updated_at FROM plans WHERE id = ?1";
const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (period_type, period_key, description, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const UPDATE_DESCRIPTION_SQL: &str =
    "UPDATE plans SET description = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_STATUS_SQL: &str = "UPDATE plans SET status = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_LAST_SYNC_SQL: &str =
    "UPDATE plans SET last_sync_date = ?1, updated_at = ?2 WHERE id = ?3";

/// Maps a plan row using the `PLAN_COLUMNS` order.
fn plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
    let period_type: String = row.get(2)?;
    let period_type = period_type.parse::<PeriodType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
    })?;

    let status_str: String = row.get(5)?;
    let status = status_str.parse::<PlanStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, e.into())
    })?;

    let last_sync_date = row
        .get::<_, Option<String>>(6)?
        .map(|s| s.parse::<Date>())
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        owner: row.get(1)?,
        period_type,
        period_key: row.get(3)?,
        description: row.get(4)?,
        status,
        last_sync_date,
        created_at: parse_timestamp(row, 7)?,
        updated_at: parse_timestamp(row, 8)?,
    })
}

pub(crate) fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Retrieves a plan by its ID.
pub(crate) fn get(conn: &Connection, id: u64) -> Result<Option<Plan>> {
    conn.query_row(SELECT_PLAN_SQL, params![id as i64], plan_from_row)
        .optional()
        .db_context("Failed to query plan")
}

/// Retrieves the single plan in the given status, if any.
pub(crate) fn get_by_status(conn: &Connection, status: PlanStatus) -> Result<Option<Plan>> {
    let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE status = ?1 LIMIT 1");
    conn.query_row(&sql, params![status.as_str()], plan_from_row)
        .optional()
        .db_context("Failed to query plan by status")
}

/// Retrieves the currently active plan, if any.
pub(crate) fn get_active(conn: &Connection) -> Result<Option<Plan>> {
    get_by_status(conn, PlanStatus::Active)
}

/// Creates a plan row and returns it.
pub(crate) fn insert(
    conn: &Connection,
    period_type: PeriodType,
    period_key: &str,
    description: Option<&str>,
    status: PlanStatus,
) -> Result<Plan> {
    let now = Timestamp::now();
    conn.execute(
        INSERT_PLAN_SQL,
        params![
            period_type.as_str(),
            period_key,
            description,
            status.as_str(),
            now.to_string()
        ],
    )
    .db_context("Failed to insert plan")?;

    Ok(Plan {
        id: conn.last_insert_rowid() as u64,
        owner: None,
        period_type,
        period_key: period_key.to_string(),
        description: description.map(String::from),
        status,
        last_sync_date: None,
        created_at: now,
        updated_at: now,
    })
}

/// Replaces a plan's description.
pub(crate) fn update_description(
    conn: &Connection,
    id: u64,
    description: Option<&str>,
) -> Result<()> {
    conn.execute(
        UPDATE_DESCRIPTION_SQL,
        params![description, Timestamp::now().to_string(), id as i64],
    )
    .db_context("Failed to update plan description")?;
    Ok(())
}

/// Transitions a plan's lifecycle status.
pub(crate) fn update_status(conn: &Connection, id: u64, status: PlanStatus) -> Result<()> {
    conn.execute(
        UPDATE_STATUS_SQL,
        params![status.as_str(), Timestamp::now().to_string(), id as i64],
    )
    .db_context("Failed to update plan status")?;
    Ok(())
}

/// Records the day the daily sync last ran for a plan.
pub(crate) fn update_last_sync_date(conn: &Connection, id: u64, day: Date) -> Result<()> {
    conn.execute(
        UPDATE_LAST_SYNC_SQL,
        params![day.to_string(), Timestamp::now().to_string(), id as i64],
    )
    .db_context("Failed to update plan last_sync_date")?;
    Ok(())
}

/// Retrieves a plan joined with its template links.
pub(crate) fn get_with_templates(conn: &Connection, id: u64) -> Result<Option<PlanWithTemplates>> {
    let Some(plan) = get(conn, id)? else {
        return Ok(None);
    };
    let templates = links_with_templates(conn, id)?;
    Ok(Some(PlanWithTemplates { plan, templates }))
}

fn links_with_templates(conn: &Connection, plan_id: u64) -> Result<Vec<LinkedTemplate>> {
    let sql = "SELECT pt.id, pt.plan_id, pt.template_id, pt.kind, pt.frequency, pt.created_at, \
               t.id, t.owner, t.title, t.description, t.points, t.archived, t.created_at, t.updated_at \
               FROM plan_templates pt JOIN task_templates t ON t.id = pt.template_id \
               WHERE pt.plan_id = ?1 ORDER BY pt.id";
    let mut stmt = conn
        .prepare(sql)
        .db_context("Failed to prepare linked-template query")?;
    let rows = stmt
        .query_map(params![plan_id as i64], |row| {
            let link = super::link_queries::link_from_row(row)?;
            let template = super::template_queries::template_from_row_at(row, 6)?;
            Ok(LinkedTemplate { link, template })
        })
        .db_context("Failed to query linked templates")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch linked templates")?;
    Ok(rows)
}
