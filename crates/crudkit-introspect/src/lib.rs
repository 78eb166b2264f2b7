//! Live schema introspection against the MySQL catalog.
//!
//! Two operations, both reading `information_schema`: listing the tables of
//! the current database and describing one table's columns in ordinal order.
//! Unknown column types are not an error here; they pass through and the
//! type mapper turns them into strings.

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use thiserror::Error;

use crudkit_core::{ColumnInfo, KeyKind, TableInfo};

/// Upper bound on any single catalog query.
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced by the introspector.
#[derive(Debug, Error)]
pub enum IntrospectError {
    #[error("table {0} does not exist or has no columns")]
    UnknownTable(String),

    #[error("catalog unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("catalog query timed out after {0:?}")]
    Timeout(Duration),
}

/// Reads table metadata from a live MySQL catalog.
pub struct Introspector {
    pool: MySqlPool,
    database: String,
}

impl Introspector {
    /// Connects a small pool to the given URL.
    pub async fn connect(url: &str, database: &str) -> Result<Self, IntrospectError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(QUERY_TIMEOUT)
            .connect(url)
            .await?;
        Ok(Self::new(pool, database))
    }

    /// Wraps an existing pool.
    pub fn new(pool: MySqlPool, database: &str) -> Self {
        Self {
            pool,
            database: database.to_string(),
        }
    }

    /// Lists every table in the current database.
    pub async fn list_tables(&self) -> Result<Vec<String>, IntrospectError> {
        let rows = self
            .query(
                sqlx::query(
                    "SELECT TABLE_NAME FROM information_schema.TABLES \
                     WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME",
                )
                .bind(&self.database),
            )
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>(0).map_err(IntrospectError::from))
            .collect()
    }

    /// Describes one table, returning its columns in ordinal order.
    pub async fn describe_table(&self, table: &str) -> Result<TableInfo, IntrospectError> {
        let rows = self
            .query(
                sqlx::query(
                    "SELECT COLUMN_NAME, COLUMN_TYPE, IS_NULLABLE, COLUMN_KEY, \
                            COLUMN_DEFAULT, EXTRA, COLUMN_COMMENT \
                     FROM information_schema.COLUMNS \
                     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
                     ORDER BY ORDINAL_POSITION",
                )
                .bind(&self.database)
                .bind(table),
            )
            .await?;

        if rows.is_empty() {
            return Err(IntrospectError::UnknownTable(table.to_string()));
        }

        let columns = rows
            .iter()
            .map(column_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(table, columns = columns.len(), "described table");

        Ok(TableInfo {
            name: table.to_string(),
            comment: String::new(),
            columns,
        })
    }

    async fn query(
        &self,
        query: sqlx::query::Query<'_, sqlx::MySql, sqlx::mysql::MySqlArguments>,
    ) -> Result<Vec<MySqlRow>, IntrospectError> {
        match tokio::time::timeout(QUERY_TIMEOUT, query.fetch_all(&self.pool)).await {
            Ok(result) => result.map_err(IntrospectError::from),
            Err(_) => Err(IntrospectError::Timeout(QUERY_TIMEOUT)),
        }
    }
}

fn column_from_row(row: &MySqlRow) -> Result<ColumnInfo, IntrospectError> {
    let nullable: String = row.try_get("IS_NULLABLE")?;
    let key: String = row.try_get("COLUMN_KEY")?;
    let extra: String = row.try_get("EXTRA")?;

    Ok(ColumnInfo {
        name: row.try_get("COLUMN_NAME")?,
        column_type: row.try_get("COLUMN_TYPE")?,
        nullable: nullable == "YES",
        key: parse_key_kind(&key),
        default_value: row.try_get("COLUMN_DEFAULT")?,
        auto_increment: extra.contains("auto_increment"),
        comment: row.try_get("COLUMN_COMMENT")?,
    })
}

/// Maps the catalog's key tag onto [`KeyKind`].
fn parse_key_kind(tag: &str) -> KeyKind {
    match tag {
        "PRI" => KeyKind::Primary,
        "UNI" => KeyKind::Unique,
        "MUL" => KeyKind::Indexed,
        _ => KeyKind::None,
    }
}
