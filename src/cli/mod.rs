//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use types::SeasonYear;

#[derive(Debug, Parser)]
#[clap(name = "courtside", about = "NBA statistics explorer")]
pub struct Courtside {
    /// Path to database.toml (or set `COURTSIDE_CONFIG`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output results as JSON instead of a text table.
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the user tables in the database.
    Tables {
        /// Dump this table instead of listing names.
        #[clap(long)]
        show: Option<String>,
    },

    /// Teams in one conference or division, with championship counts.
    Teams {
        /// Group by conference (e.g. East).
        #[clap(long, short)]
        conference: Option<String>,

        /// Group by division (e.g. Atlantic).
        #[clap(long, short)]
        division: Option<String>,
    },

    /// List the conferences present in the database.
    Conferences,

    /// List the divisions present in the database.
    Divisions,

    /// List every season year on record.
    Seasons,

    /// Season summary: champion, award winners, and stat leaders.
    Season {
        /// Season year (e.g. 2019).
        year: SeasonYear,

        /// Players per leader board.
        #[clap(long, default_value_t = 5)]
        top: i64,
    },

    /// Leader board for one stat category in one season.
    Leaders {
        /// Season year (e.g. 2019).
        year: SeasonYear,

        /// Stat category: points, rebounds, assists, steals, or blocks.
        #[clap(long, short, default_value = "points")]
        category: types::StatCategory,

        /// Players on the board.
        #[clap(long, default_value_t = 5)]
        top: i64,
    },

    /// List every player name on record.
    Players,

    /// A player's per-season averages.
    Player {
        /// Exact player name (pick one from `players`).
        name: String,

        /// Only seasons after this year.
        #[clap(long, default_value_t = SeasonYear(2015))]
        since: SeasonYear,
    },

    /// Career-high game stats for players matching a name fragment.
    CareerHigh {
        /// Substring of the player name.
        fragment: String,
    },

    /// Head-to-head game history between two teams.
    Matchup {
        /// First team name.
        team_a: String,

        /// Second team name.
        team_b: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_season_command() {
        let cli = Courtside::try_parse_from(["courtside", "season", "2019", "--top", "3"]).unwrap();
        match cli.command {
            Commands::Season { year, top } => {
                assert_eq!(year, SeasonYear::new(2019));
                assert_eq!(top, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Courtside::try_parse_from(["courtside", "players", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Players));
    }

    #[test]
    fn test_parse_matchup_requires_two_teams() {
        assert!(Courtside::try_parse_from(["courtside", "matchup", "Celtics"]).is_err());
        let cli =
            Courtside::try_parse_from(["courtside", "matchup", "Celtics", "Heat"]).unwrap();
        assert!(matches!(cli.command, Commands::Matchup { .. }));
    }

    #[test]
    fn test_parse_invalid_season_year() {
        assert!(Courtside::try_parse_from(["courtside", "season", "not-a-year"]).is_err());
    }

    #[test]
    fn test_parse_leaders_category() {
        let cli = Courtside::try_parse_from([
            "courtside", "leaders", "2019", "--category", "rebounds",
        ])
        .unwrap();
        match cli.command {
            Commands::Leaders { year, category, top } => {
                assert_eq!(year, SeasonYear::new(2019));
                assert_eq!(category, types::StatCategory::Rebounds);
                assert_eq!(top, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(
            Courtside::try_parse_from(["courtside", "leaders", "2019", "--category", "dunks"])
                .is_err()
        );
    }
}
