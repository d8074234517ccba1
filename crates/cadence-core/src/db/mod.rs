//! Database operations and SQLite management for the board.
//!
//! This module owns the SQLite connection, schema management, and the narrow
//! per-entity query interfaces the lifecycle engine composes. Query
//! functions take a plain [`rusqlite::Connection`] reference so the same
//! helpers run standalone or inside a transaction opened by a multi-step
//! operation.

use std::path::Path;

use rusqlite::{Connection, Transaction};

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;

pub(crate) mod link_queries;
pub(crate) mod plan_queries;
pub(crate) mod task_queries;
pub(crate) mod template_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Read-only access to the underlying connection.
    pub(crate) fn conn(&self) -> &Connection {
        &self.connection
    }

    /// Opens a transaction: the unit of work for multi-step operations.
    pub(crate) fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction()
            .db_context("Failed to begin transaction")
    }
}

/// Builds a `?N, ?N+1, ...` placeholder list for dynamic `IN` clauses,
/// starting at 1-based parameter index `start`.
pub(crate) fn placeholders(count: usize, start: usize) -> String {
    (0..count)
        .map(|i| format!("?{}", start + i))
        .collect::<Vec<_>>()
        .join(", ")
}
