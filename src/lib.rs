//! Courtside — NBA Database CLI Library
//!
//! A Rust library for browsing a relational NBA statistics database,
//! providing parameterized query building, cached execution, and tabular
//! rendering.
//!
//! ## Features
//!
//! - **Table Browsing**: List and dump the user tables in the database
//! - **Team Data**: Teams by conference or division, with championship counts
//! - **Season Summaries**: Champion, award winners, and per-category leaders
//! - **Player Data**: Per-season averages and career highs
//! - **Head-to-Head**: Full game history between two teams
//! - **Cached Execution**: Each distinct statement hits PostgreSQL once,
//!   with single-flight collapsing of concurrent first calls
//!
//! ## Quick Start
//!
//! ```rust
//! use courtside::{SqlParam, Statement};
//!
//! let stmt = Statement::new("SELECT name FROM Teams WHERE conference = $1").bind("East");
//! assert_eq!(stmt.params(), [SqlParam::Text("East".to_string())]);
//!
//! // Identical statements share one cache entry; different bindings do not.
//! let other = Statement::new("SELECT name FROM Teams WHERE conference = $1").bind("West");
//! assert_ne!(stmt.key(), other.key());
//! ```
//!
//! ## Configuration
//!
//! Connection settings live in `database.toml` (looked up next to the
//! current directory, under the user config dir, or wherever
//! `COURTSIDE_CONFIG` points):
//!
//! ```toml
//! [database]
//! host = "localhost"
//! dbname = "nba"
//! user = "reader"
//!
//! [cache]
//! max_entries = 256
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod output;

// Re-export commonly used types
pub use cli::types::{SeasonYear, StatCategory};
pub use config::AppConfig;
pub use core::QueryExecutor;
pub use db::{ResultTable, SqlParam, SqlValue, Statement};
pub use error::{CourtError, Result};
