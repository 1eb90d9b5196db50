//! Season browsing commands.

use anyhow::{Context, Result};

use super::CommandContext;
use crate::cli::types::StatCategory;
use crate::db::queries;

/// List every season year on record.
pub async fn handle_seasons(ctx: &CommandContext) -> Result<()> {
    let table = ctx
        .executor
        .run(&queries::season_years())
        .await
        .context("listing seasons")?;
    ctx.print_table(&table)?;
    Ok(())
}

/// Leader board for one category in one season.
pub async fn handle_leaders(
    ctx: &CommandContext,
    year: u16,
    category: StatCategory,
    top: i64,
) -> Result<()> {
    let leaders = ctx
        .executor
        .run(&queries::season_leaders(year, category, top))
        .await
        .with_context(|| format!("loading {category} leaders"))?;
    ctx.print_table(&leaders)?;
    Ok(())
}

/// Full season summary: champion, award winners, and the leader board for
/// each stat category.
pub async fn handle_season(ctx: &CommandContext, year: u16, top: i64) -> Result<()> {
    let champion = ctx
        .executor
        .run(&queries::season_champion(year))
        .await
        .context("loading season champion")?;
    match champion
        .column_values("team")
        .and_then(|teams| teams.into_iter().next())
    {
        Some(team) => println!("Champions of {year}: {team}"),
        None => println!("No champion recorded for {year}"),
    }

    println!();
    println!("Award winners:");
    let awards = ctx
        .executor
        .run(&queries::season_awards(year))
        .await
        .context("loading award winners")?;
    ctx.print_table(&awards)?;

    for category in StatCategory::ALL {
        println!();
        println!("{} leaders:", category.alias());
        let leaders = ctx
            .executor
            .run(&queries::season_leaders(year, category, top))
            .await
            .with_context(|| format!("loading {category} leaders"))?;
        ctx.print_table(&leaders)?;
    }

    Ok(())
}
