//! Table browsing commands.

use anyhow::{bail, Context, Result};

use super::CommandContext;
use crate::db::queries;

/// List the user tables, or dump one of them.
///
/// A dump only accepts names that actually appear in the table list, so the
/// quoted identifier can never name anything the listing would not show.
pub async fn handle_tables(ctx: &CommandContext, show: Option<String>) -> Result<()> {
    let names = ctx
        .executor
        .run(&queries::user_tables())
        .await
        .context("listing tables")?;

    let Some(table) = show else {
        ctx.print_table(&names)?;
        return Ok(());
    };

    let known = names.column_values("relname").unwrap_or_default();
    if !known.iter().any(|n| n == &table) {
        bail!("unknown table: {table} (run `courtside tables` for the list)");
    }

    let dump = ctx
        .executor
        .run(&queries::table_dump(&table)?)
        .await
        .with_context(|| format!("dumping table {table}"))?;
    ctx.print_table(&dump)?;
    Ok(())
}
