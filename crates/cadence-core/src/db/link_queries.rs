//! Plan-to-template link operations.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection};

use crate::error::{DatabaseResultExt, Result};
use crate::models::{PlanTemplate, TaskKind};
use crate::params::TemplateSelection;

const LINK_COLUMNS: &str = "id, plan_id, template_id, kind, frequency, created_at";
const INSERT_LINK_SQL: &str =
    "INSERT INTO plan_templates (plan_id, template_id, kind, frequency, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_LINK_SQL: &str = "UPDATE plan_templates SET kind = ?1, frequency = ?2 WHERE id = ?3";

/// Maps a link row using the `LINK_COLUMNS` order.
pub(crate) fn link_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanTemplate> {
    let kind: String = row.get(3)?;
    let kind = kind
        .parse::<TaskKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?;

    Ok(PlanTemplate {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, i64>(1)? as u64,
        template_id: row.get::<_, i64>(2)? as u64,
        kind,
        frequency: row.get::<_, i64>(4)? as u32,
        created_at: super::plan_queries::parse_timestamp(row, 5)?,
    })
}

/// Lists the template links of a plan in insertion order.
pub(crate) fn list_by_plan(conn: &Connection, plan_id: u64) -> Result<Vec<PlanTemplate>> {
    let sql = format!("SELECT {LINK_COLUMNS} FROM plan_templates WHERE plan_id = ?1 ORDER BY id");
    let mut stmt = conn
        .prepare(&sql)
        .db_context("Failed to prepare plan-template query")?;
    let links = stmt
        .query_map(params![plan_id as i64], link_from_row)
        .db_context("Failed to query plan templates")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch plan templates")?;
    Ok(links)
}

/// Links a batch of template selections to a plan.
pub(crate) fn insert_many(
    conn: &Connection,
    plan_id: u64,
    selections: &[TemplateSelection],
) -> Result<()> {
    let mut stmt = conn
        .prepare(INSERT_LINK_SQL)
        .db_context("Failed to prepare plan-template insert")?;
    let now = Timestamp::now().to_string();
    for sel in selections {
        stmt.execute(params![
            plan_id as i64,
            sel.template_id as i64,
            sel.kind.as_str(),
            sel.frequency as i64,
            now
        ])
        .db_context("Failed to insert plan template")?;
    }
    Ok(())
}

/// Rewrites a link's cadence and frequency in place.
pub(crate) fn update(conn: &Connection, link_id: u64, sel: &TemplateSelection) -> Result<()> {
    conn.execute(
        UPDATE_LINK_SQL,
        params![sel.kind.as_str(), sel.frequency as i64, link_id as i64],
    )
    .db_context("Failed to update plan template")?;
    Ok(())
}

/// Removes the links binding the given templates to a plan.
pub(crate) fn delete_many(conn: &Connection, plan_id: u64, template_ids: &[u64]) -> Result<()> {
    if template_ids.is_empty() {
        return Ok(());
    }
    let placeholders = super::placeholders(template_ids.len(), 2);
    let sql =
        format!("DELETE FROM plan_templates WHERE plan_id = ?1 AND template_id IN ({placeholders})");
    let mut values: Vec<i64> = vec![plan_id as i64];
    values.extend(template_ids.iter().map(|id| *id as i64));
    conn.execute(&sql, rusqlite::params_from_iter(values))
        .db_context("Failed to delete plan templates")?;
    Ok(())
}
