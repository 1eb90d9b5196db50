//! Error types for the courtside CLI

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CourtError>;

#[derive(Error, Debug)]
pub enum CourtError {
    #[error("no config file found (searched: {searched})")]
    ConfigNotFound { searched: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("could not connect to database: {message}")]
    Connection { message: String },

    #[error("query execution failed: {message}")]
    Query { message: String },

    #[error("column {column} has unsupported type {ty}; cast it in the statement")]
    UnsupportedType { column: String, ty: String },

    #[error("row has {got} values but the result has {expected} columns")]
    RowShape { expected: usize, got: usize },

    #[error("invalid identifier: {name}")]
    InvalidIdentifier { name: String },

    #[error("unknown stat category: {value} (expected points, rebounds, assists, steals, or blocks)")]
    UnknownCategory { value: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CourtError {
    /// Wrap a driver-level connect failure, keeping the store's diagnostic.
    pub fn connection(err: impl std::fmt::Display) -> Self {
        CourtError::Connection {
            message: err.to_string(),
        }
    }

    /// Wrap a driver-level execution failure, keeping the store's diagnostic.
    pub fn query(err: impl std::fmt::Display) -> Self {
        CourtError::Query {
            message: err.to_string(),
        }
    }
}
