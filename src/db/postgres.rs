//! PostgreSQL store backend on tokio-postgres.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Column, NoTls, Row};
use tracing::{debug, error};

use crate::config::{DatabaseConfig, SessionConfig};
use crate::db::backend::{StoreBackend, StoreSession};
use crate::db::statement::Statement;
use crate::db::table::ResultTable;
use crate::db::value::{SqlParam, SqlValue};
use crate::error::{CourtError, Result};

/// Backend that opens one PostgreSQL connection per execution.
pub struct PgBackend {
    database: DatabaseConfig,
    session: SessionConfig,
}

impl PgBackend {
    pub fn new(database: DatabaseConfig, session: SessionConfig) -> Self {
        Self { database, session }
    }

    fn pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.database.host)
            .port(self.database.port)
            .dbname(&self.database.dbname)
            .user(&self.database.user)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs));
        if !self.database.password.is_empty() {
            config.password(&self.database.password);
        }
        config
    }
}

#[async_trait]
impl StoreBackend for PgBackend {
    async fn connect(&self) -> Result<Box<dyn StoreSession>> {
        let timeout = Duration::from_secs(self.database.connect_timeout_secs);
        let (client, connection) =
            tokio::time::timeout(timeout, self.pg_config().connect(NoTls))
                .await
                .map_err(|_| CourtError::Connection {
                    message: format!(
                        "timed out after {}s connecting to {}:{}",
                        self.database.connect_timeout_secs,
                        self.database.host,
                        self.database.port
                    ),
                })?
                .map_err(CourtError::connection)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(target: "store", error = %e, "postgres connection error");
            }
        });

        let begin = if self.session.read_only {
            "BEGIN READ ONLY"
        } else {
            "BEGIN"
        };
        client
            .batch_execute(begin)
            .await
            .map_err(CourtError::connection)?;

        debug!(
            target: "store",
            host = %self.database.host,
            dbname = %self.database.dbname,
            read_only = self.session.read_only,
            "session opened"
        );

        Ok(Box::new(PgSession { client }))
    }
}

/// A live connection wrapping one read transaction.
pub struct PgSession {
    client: Client,
}

#[async_trait]
impl StoreSession for PgSession {
    async fn query(&mut self, statement: &Statement) -> Result<ResultTable> {
        let prepared = self
            .client
            .prepare(statement.sql())
            .await
            .map_err(CourtError::query)?;

        let columns: Vec<String> = prepared
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let params: Vec<&(dyn ToSql + Sync)> =
            statement.params().iter().map(bind_param).collect();

        let rows = self
            .client
            .query(&prepared, &params)
            .await
            .map_err(CourtError::query)?;

        let mut materialized = Vec::with_capacity(rows.len());
        for row in &rows {
            materialized.push(materialize_row(row)?);
        }

        ResultTable::try_new(columns, materialized)
    }

    async fn finish(self: Box<Self>) -> Result<()> {
        // COMMIT closes the transaction on success; after a failed statement
        // the transaction is aborted and the same COMMIT rolls it back. The
        // client (and with it the connection) drops when this returns.
        self.client
            .batch_execute("COMMIT")
            .await
            .map_err(CourtError::query)
    }
}

fn bind_param(param: &SqlParam) -> &(dyn ToSql + Sync) {
    match param {
        SqlParam::Bool(b) => b,
        SqlParam::Int(n) => n,
        SqlParam::Float(f) => f,
        SqlParam::Text(s) => s,
    }
}

fn materialize_row(row: &Row) -> Result<Vec<SqlValue>> {
    let mut values = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        values.push(materialize_cell(row, idx, column)?);
    }
    Ok(values)
}

/// Decode one binary-protocol cell into a [`SqlValue`].
///
/// The supported set is closed; statements in [`crate::db::queries`] cast
/// anything outside it (notably `numeric` aggregates) to `float8` or `int8`.
fn materialize_cell(row: &Row, idx: usize, column: &Column) -> Result<SqlValue> {
    let value = match column.type_().name() {
        "bool" => row
            .try_get::<_, Option<bool>>(idx)
            .map(|v| v.map(SqlValue::Bool)),
        "int2" => row
            .try_get::<_, Option<i16>>(idx)
            .map(|v| v.map(|n| SqlValue::Int(n as i64))),
        "int4" => row
            .try_get::<_, Option<i32>>(idx)
            .map(|v| v.map(|n| SqlValue::Int(n as i64))),
        "int8" => row
            .try_get::<_, Option<i64>>(idx)
            .map(|v| v.map(SqlValue::Int)),
        "float4" => row
            .try_get::<_, Option<f32>>(idx)
            .map(|v| v.map(|f| SqlValue::Float(f as f64))),
        "float8" => row
            .try_get::<_, Option<f64>>(idx)
            .map(|v| v.map(SqlValue::Float)),
        "text" | "varchar" | "bpchar" | "name" => row
            .try_get::<_, Option<String>>(idx)
            .map(|v| v.map(SqlValue::Text)),
        "date" => row
            .try_get::<_, Option<NaiveDate>>(idx)
            .map(|v| v.map(SqlValue::Date)),
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)
            .map(|v| v.map(SqlValue::Timestamp)),
        "timestamptz" => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)
            .map(|v| v.map(|t| SqlValue::Timestamp(t.naive_utc()))),
        other => {
            return Err(CourtError::UnsupportedType {
                column: column.name().to_string(),
                ty: other.to_string(),
            })
        }
    };

    value
        .map(|v| v.unwrap_or(SqlValue::Null))
        .map_err(CourtError::query)
}
