//! Head-to-head history command.

use anyhow::{bail, Context, Result};

use super::CommandContext;
use crate::db::queries;

/// All games between two teams.
pub async fn handle_matchup(ctx: &CommandContext, team_a: &str, team_b: &str) -> Result<()> {
    ensure_distinct(team_a, team_b)?;

    let games = ctx
        .executor
        .run(&queries::head_to_head(team_a, team_b))
        .await
        .with_context(|| format!("loading games between {team_a} and {team_b}"))?;

    if games.is_empty() {
        println!("No games on record between {team_a} and {team_b}. Known teams:");
        let teams = ctx
            .executor
            .run(&queries::team_names())
            .await
            .context("listing team names")?;
        ctx.print_table(&teams)?;
        return Ok(());
    }

    ctx.print_table(&games)?;
    Ok(())
}

fn ensure_distinct(team_a: &str, team_b: &str) -> Result<()> {
    if team_a == team_b {
        bail!("pick two different teams");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_team_rejected() {
        assert!(ensure_distinct("Celtics", "Celtics").is_err());
        assert!(ensure_distinct("Celtics", "Heat").is_ok());
    }
}
