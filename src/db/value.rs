//! Result cell and bind parameter values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// A single cell in a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    /// Render for text-table output.
    pub fn display(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(b) => b.to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{f:.1}")
                } else {
                    format!("{f}")
                }
            }
            SqlValue::Text(s) => s.clone(),
            SqlValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            SqlValue::Timestamp(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Convert to a JSON value for `--json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Bool(b) => serde_json::Value::Bool(*b),
            SqlValue::Int(n) => serde_json::Value::Number((*n).into()),
            SqlValue::Float(f) => serde_json::json!(*f),
            SqlValue::Text(s) => serde_json::Value::String(s.clone()),
            SqlValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            SqlValue::Timestamp(t) => {
                serde_json::Value::String(t.format("%Y-%m-%d %H:%M:%S").to_string())
            }
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A positional bind parameter for a statement.
///
/// Parameters travel to the store out-of-band through the extended query
/// protocol; they are never interpolated into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlParam {
    /// Render with a type tag for cache-key purposes, so `Text("1")` and
    /// `Int(1)` key differently.
    pub(crate) fn key_fragment(&self) -> String {
        match self {
            SqlParam::Bool(b) => format!("b:{b}"),
            SqlParam::Int(n) => format!("i:{n}"),
            SqlParam::Float(f) => format!("f:{f}"),
            SqlParam::Text(s) => format!("t:{s}"),
        }
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bool(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v as i64)
    }
}

impl From<u16> for SqlParam {
    fn from(v: u16) -> Self {
        SqlParam::Int(v as i64)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Float(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}
