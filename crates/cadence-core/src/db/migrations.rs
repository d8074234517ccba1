//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // last_sync_date arrived after the first release; add it to plans
        // created by older schema versions.
        let has_last_sync: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('plans') WHERE name = 'last_sync_date'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_last_sync {
            self.connection
                .execute("ALTER TABLE plans ADD COLUMN last_sync_date TEXT", [])
                .db_context("Failed to add last_sync_date column to plans table")?;
        }

        Ok(())
    }
}
