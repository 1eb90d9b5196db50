//! Command handlers for the courtside CLI.
//!
//! Each handler builds statements from the catalog in [`crate::db::queries`],
//! runs them through the shared executor, and prints the result. Handlers
//! never assemble SQL from user input themselves.

pub mod matchup;
pub mod players;
pub mod seasons;
pub mod tables;
pub mod teams;

use std::path::Path;

use crate::config::AppConfig;
use crate::core::QueryExecutor;
use crate::db::table::ResultTable;
use crate::output::{self, OutputFormat};

/// Context containing the resources every command needs.
pub struct CommandContext {
    pub executor: QueryExecutor,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve configuration and build the executor once per invocation.
    pub fn new(config_path: Option<&Path>, json: bool) -> crate::error::Result<Self> {
        let config = AppConfig::resolve(config_path)?;
        Ok(Self {
            executor: QueryExecutor::from_config(&config),
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Table
            },
        })
    }

    /// Render a result to stdout in the selected format.
    pub fn print_table(&self, table: &ResultTable) -> crate::error::Result<()> {
        println!("{}", output::render(table, self.format)?);
        Ok(())
    }
}
