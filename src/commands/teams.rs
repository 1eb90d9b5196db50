//! Team browsing commands.

use anyhow::{bail, Context, Result};

use super::CommandContext;
use crate::db::queries::{self, TeamGrouping};

/// Teams overview for one conference or division.
pub async fn handle_teams(
    ctx: &CommandContext,
    conference: Option<String>,
    division: Option<String>,
) -> Result<()> {
    let grouping = resolve_grouping(conference, division)?;
    let table = ctx
        .executor
        .run(&queries::teams_overview(&grouping))
        .await
        .context("loading teams overview")?;
    ctx.print_table(&table)?;
    Ok(())
}

/// List the conferences teams belong to.
pub async fn handle_conferences(ctx: &CommandContext) -> Result<()> {
    let table = ctx
        .executor
        .run(&queries::distinct_conferences())
        .await
        .context("listing conferences")?;
    ctx.print_table(&table)?;
    Ok(())
}

/// List the divisions teams belong to.
pub async fn handle_divisions(ctx: &CommandContext) -> Result<()> {
    let table = ctx
        .executor
        .run(&queries::distinct_divisions())
        .await
        .context("listing divisions")?;
    ctx.print_table(&table)?;
    Ok(())
}

pub(crate) fn resolve_grouping(
    conference: Option<String>,
    division: Option<String>,
) -> Result<TeamGrouping> {
    match (conference, division) {
        (Some(c), None) => Ok(TeamGrouping::Conference(c)),
        (None, Some(d)) => Ok(TeamGrouping::Division(d)),
        (Some(_), Some(_)) => bail!("--conference and --division cannot be combined"),
        (None, None) => {
            bail!("specify --conference or --division (see `conferences` and `divisions`)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_grouping_picks_the_given_side() {
        assert_eq!(
            resolve_grouping(Some("East".to_string()), None).unwrap(),
            TeamGrouping::Conference("East".to_string())
        );
        assert_eq!(
            resolve_grouping(None, Some("Atlantic".to_string())).unwrap(),
            TeamGrouping::Division("Atlantic".to_string())
        );
    }

    #[test]
    fn test_resolve_grouping_rejects_both_and_neither() {
        assert!(resolve_grouping(Some("East".to_string()), Some("Atlantic".to_string())).is_err());
        assert!(resolve_grouping(None, None).is_err());
    }
}
