//! Immutable tabular query results.

use crate::db::value::SqlValue;
use crate::error::{CourtError, Result};

/// An immutable query result: ordered column names plus ordered rows.
///
/// Columns keep the store's projection order and rows keep the store's return
/// order; nothing is sorted or deduplicated here. Zero rows is a perfectly
/// valid table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
}

impl ResultTable {
    /// Build a table, rejecting rows whose width does not match the column
    /// list.
    pub fn try_new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Result<Self> {
        for row in &rows {
            if row.len() != columns.len() {
                return Err(CourtError::RowShape {
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A table with the given columns and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<SqlValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate one column as rendered strings; handy for enumerating
    /// selectable values (conferences, seasons, team names).
    pub fn column_values(&self, name: &str) -> Option<Vec<String>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].display()).collect())
    }
}
