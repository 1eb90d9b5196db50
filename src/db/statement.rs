//! Parameterized statements and their cache keys.

use std::fmt;

use crate::db::value::SqlParam;

/// A fully built, parameterized SQL statement.
///
/// The SQL text uses `$1..$n` placeholders; values ride alongside as
/// [`SqlParam`]s and are bound by the store protocol. Two statements are the
/// same cache entry only when both the text and every parameter match —
/// whitespace differences in the text are distinct entries on purpose.
///
/// # Examples
///
/// ```rust
/// use courtside::db::Statement;
///
/// let stmt = Statement::new("SELECT name FROM Teams WHERE conference = $1")
///     .bind("East");
/// assert_eq!(stmt.params().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append one bind parameter (fluent).
    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// The memoization key: SQL text joined with type-tagged parameter
    /// renderings, separated by a unit separator so fragments cannot collide.
    pub fn key(&self) -> StatementKey {
        let mut key = self.sql.clone();
        for param in &self.params {
            key.push('\u{1f}');
            key.push_str(&param.key_fragment());
        }
        StatementKey(key)
    }
}

/// Cache key for a [`Statement`]; exact string equality, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementKey(String);

impl StatementKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
