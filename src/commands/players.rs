//! Player browsing commands.

use anyhow::{Context, Result};

use super::CommandContext;
use crate::db::queries;

/// List every player name on record.
pub async fn handle_players(ctx: &CommandContext) -> Result<()> {
    let table = ctx
        .executor
        .run(&queries::player_names())
        .await
        .context("listing players")?;
    ctx.print_table(&table)?;
    Ok(())
}

/// One player's per-season averages after a cutoff year.
pub async fn handle_player(ctx: &CommandContext, name: &str, since: u16) -> Result<()> {
    let table = ctx
        .executor
        .run(&queries::player_season_averages(name, since))
        .await
        .with_context(|| format!("loading season averages for {name}"))?;

    if table.is_empty() {
        println!("No recorded seasons after {since} for {name} (names are exact; see `players`).");
        return Ok(());
    }
    ctx.print_table(&table)?;
    Ok(())
}

/// Career highs for every player whose name contains the fragment.
pub async fn handle_career_high(ctx: &CommandContext, fragment: &str) -> Result<()> {
    let table = ctx
        .executor
        .run(&queries::player_career_highs(fragment))
        .await
        .with_context(|| format!("loading career highs matching {fragment}"))?;
    ctx.print_table(&table)?;
    Ok(())
}
