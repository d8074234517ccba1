//! Task template operations and queries.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{BoardError, DatabaseResultExt, Result};
use crate::models::TaskTemplate;

const TEMPLATE_COLUMNS: &str =
    "id, owner, title, description, points, archived, created_at, updated_at";
const INSERT_TEMPLATE_SQL: &str =
    "INSERT INTO task_templates (title, description, points, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)";
const SET_ARCHIVED_SQL: &str =
    "UPDATE task_templates SET archived = ?1, updated_at = ?2 WHERE id = ?3";

/// Maps a template row starting at column `base` (for joined selects).
pub(crate) fn template_from_row_at(
    row: &rusqlite::Row,
    base: usize,
) -> rusqlite::Result<TaskTemplate> {
    Ok(TaskTemplate {
        id: row.get::<_, i64>(base)? as u64,
        owner: row.get(base + 1)?,
        title: row.get(base + 2)?,
        description: row.get(base + 3)?,
        points: row.get::<_, i64>(base + 4)? as u32,
        archived: row.get(base + 5)?,
        created_at: super::plan_queries::parse_timestamp(row, base + 6)?,
        updated_at: super::plan_queries::parse_timestamp(row, base + 7)?,
    })
}

fn template_from_row(row: &rusqlite::Row) -> rusqlite::Result<TaskTemplate> {
    template_from_row_at(row, 0)
}

/// Retrieves a template by its ID.
pub(crate) fn get(conn: &Connection, id: u64) -> Result<Option<TaskTemplate>> {
    let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM task_templates WHERE id = ?1");
    conn.query_row(&sql, params![id as i64], template_from_row)
        .optional()
        .db_context("Failed to query template")
}

/// Lists templates, newest first. Archived templates are hidden unless
/// asked for.
pub(crate) fn list(conn: &Connection, include_archived: bool) -> Result<Vec<TaskTemplate>> {
    let sql = if include_archived {
        format!("SELECT {TEMPLATE_COLUMNS} FROM task_templates ORDER BY id DESC")
    } else {
        format!("SELECT {TEMPLATE_COLUMNS} FROM task_templates WHERE archived = 0 ORDER BY id DESC")
    };
    let mut stmt = conn
        .prepare(&sql)
        .db_context("Failed to prepare template query")?;
    let templates = stmt
        .query_map([], template_from_row)
        .db_context("Failed to query templates")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch templates")?;
    Ok(templates)
}

/// Creates a template and returns it.
pub(crate) fn insert(
    conn: &Connection,
    title: &str,
    description: &str,
    points: u32,
) -> Result<TaskTemplate> {
    let now = Timestamp::now();
    conn.execute(
        INSERT_TEMPLATE_SQL,
        params![title, description, points as i64, now.to_string()],
    )
    .db_context("Failed to insert template")?;

    Ok(TaskTemplate {
        id: conn.last_insert_rowid() as u64,
        owner: None,
        title: title.to_string(),
        description: description.to_string(),
        points,
        archived: false,
        created_at: now,
        updated_at: now,
    })
}

/// Applies the provided field updates to a template. Errors when the
/// template does not exist.
pub(crate) fn update(
    conn: &Connection,
    id: u64,
    title: Option<&str>,
    description: Option<&str>,
    points: Option<u32>,
) -> Result<()> {
    let mut assignments: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(title) = title {
        assignments.push(format!("title = ?{}", values.len() + 1));
        values.push(Box::new(title.to_string()));
    }
    if let Some(description) = description {
        assignments.push(format!("description = ?{}", values.len() + 1));
        values.push(Box::new(description.to_string()));
    }
    if let Some(points) = points {
        assignments.push(format!("points = ?{}", values.len() + 1));
        values.push(Box::new(points as i64));
    }

    assignments.push(format!("updated_at = ?{}", values.len() + 1));
    values.push(Box::new(Timestamp::now().to_string()));

    let sql = format!(
        "UPDATE task_templates SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len() + 1
    );
    values.push(Box::new(id as i64));

    let changed = conn
        .execute(&sql, rusqlite::params_from_iter(values.iter()))
        .db_context("Failed to update template")?;
    if changed == 0 {
        return Err(BoardError::TemplateNotFound { id });
    }
    Ok(())
}

/// Archives or restores a template.
pub(crate) fn set_archived(conn: &Connection, id: u64, archived: bool) -> Result<()> {
    let changed = conn
        .execute(
            SET_ARCHIVED_SQL,
            params![archived, Timestamp::now().to_string(), id as i64],
        )
        .db_context("Failed to update template archive flag")?;
    if changed == 0 {
        return Err(BoardError::TemplateNotFound { id });
    }
    Ok(())
}
