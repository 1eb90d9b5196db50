//! The NBA statement catalog.
//!
//! Every statement here is fully parameterized: user-supplied values are bound
//! through `$n` placeholders, never spliced into the SQL text. The one place
//! an identifier comes from the user (`table_dump`) validates and quotes it,
//! and the command layer additionally checks it against the live table list.
//!
//! Aggregates that PostgreSQL reports as `numeric` are cast to `float8` so the
//! materializer's closed value set covers every projected column.

use crate::cli::types::StatCategory;
use crate::db::statement::Statement;
use crate::error::{CourtError, Result};

/// How to group the teams overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamGrouping {
    Conference(String),
    Division(String),
}

/// Names of the user tables (system catalogs excluded).
pub fn user_tables() -> Statement {
    Statement::new(
        "SELECT relname FROM pg_class \
         WHERE relkind = 'r' AND relname !~ '^(pg_|sql_)' \
         ORDER BY relname",
    )
}

/// Dump a whole table by name.
///
/// The identifier is validated and double-quoted; callers should only pass
/// names obtained from [`user_tables`].
pub fn table_dump(table: &str) -> Result<Statement> {
    validate_identifier(table)?;
    Ok(Statement::new(format!("SELECT * FROM \"{table}\"")))
}

/// The conferences present in the database.
pub fn distinct_conferences() -> Statement {
    Statement::new("SELECT DISTINCT conference FROM Teams ORDER BY conference")
}

/// The divisions present in the database.
pub fn distinct_divisions() -> Statement {
    Statement::new("SELECT DISTINCT division FROM Teams ORDER BY division")
}

/// Every distinct team name.
pub fn team_names() -> Statement {
    Statement::new("SELECT DISTINCT name FROM Teams ORDER BY name")
}

/// Team, city, arena, coach, owner, and championship count for every team in
/// one conference or division.
pub fn teams_overview(grouping: &TeamGrouping) -> Statement {
    let (column, value) = match grouping {
        TeamGrouping::Conference(name) => ("conference", name.clone()),
        TeamGrouping::Division(name) => ("division", name.clone()),
    };
    Statement::new(format!(
        "SELECT TM.Team, TM.City, TM.Arena, TM.Coach, TM.Owner, COUNT(S.year) AS Champions FROM ( \
             SELECT T.team_id AS ID, T.name AS Team, T.arena_city AS City, \
                    T.arena_name AS Arena, C.name AS Coach, O.name AS Owner \
             FROM Teams T, Coaches C, Owners O \
             WHERE T.team_id = O.team_id \
               AND T.team_id = C.team_id \
               AND T.{column} = $1 \
         ) AS TM \
         LEFT JOIN Seasons AS S ON S.champion_team_id = TM.ID \
         GROUP BY TM.Team, TM.City, TM.Arena, TM.Coach, TM.Owner"
    ))
    .bind(value)
}

/// Every season year on record.
pub fn season_years() -> Statement {
    Statement::new("SELECT DISTINCT year FROM Seasons ORDER BY year")
}

/// The championship team of one season.
pub fn season_champion(year: u16) -> Statement {
    Statement::new(
        "SELECT T.name AS Team, T.arena_city AS City \
         FROM Teams T, Seasons S \
         WHERE S.year = $1::int8 AND S.champion_team_id = T.team_id",
    )
    .bind(year)
}

/// Award winners of one season.
pub fn season_awards(year: u16) -> Statement {
    Statement::new(
        "SELECT A.name AS Award, P.name AS Player \
         FROM Players P, Player_Wins_Award PWA, Awards A \
         WHERE PWA.season = $1::int8 \
           AND PWA.award = A.name \
           AND PWA.player_id = P.player_id",
    )
    .bind(year)
}

/// Top-N players of one season in one stat category.
pub fn season_leaders(year: u16, category: StatCategory, top_n: i64) -> Statement {
    let column = category.average_column();
    let alias = category.alias();
    Statement::new(format!(
        "SELECT P.name AS Player, PSP.{column}::float8 AS {alias} \
         FROM Players P, Player_Season_Performance PSP \
         WHERE PSP.season = $1::int8 \
           AND PSP.player_id = P.player_id \
         ORDER BY PSP.{column} DESC \
         LIMIT $2"
    ))
    .bind(year)
    .bind(top_n)
}

/// Every player name on record.
pub fn player_names() -> Statement {
    Statement::new("SELECT name FROM Players ORDER BY name")
}

/// One player's per-season averages after a cutoff year.
pub fn player_season_averages(name: &str, since_year: u16) -> Statement {
    Statement::new(
        "SELECT P.name AS Player, PSP.season AS Season, \
                PSP.avg_points::float8 AS PPG, PSP.avg_rebounds::float8 AS RPG, \
                PSP.avg_assists::float8 AS APG, PSP.avg_steals::float8 AS SPG, \
                PSP.avg_blocks::float8 AS BPG \
         FROM Players AS P, Player_Season_Performance AS PSP \
         WHERE PSP.season > $1::int8 \
           AND PSP.player_id = P.player_id \
           AND P.name = $2 \
         ORDER BY P.name ASC, PSP.season DESC",
    )
    .bind(since_year)
    .bind(name)
}

/// Career-high game stats for every player whose name contains the fragment.
///
/// The LIKE pattern is assembled in Rust and bound as a parameter, so `%` and
/// friends in the fragment cannot change the statement.
pub fn player_career_highs(name_fragment: &str) -> Statement {
    Statement::new(
        "SELECT P.name AS Player, \
                MAX(PGP.points) AS career_high_points, \
                MAX(PGP.rebounds) AS career_high_rebounds, \
                MAX(PGP.assists) AS career_high_assists, \
                MAX(PGP.steals) AS career_high_steals, \
                MAX(PGP.blocks) AS career_high_blocks \
         FROM Players P, Player_Game_Performance PGP \
         WHERE P.player_id = PGP.player_id \
           AND P.name LIKE $1 \
         GROUP BY P.name",
    )
    .bind(format!("%{name_fragment}%"))
}

/// All games between two teams, in either host/guest orientation.
pub fn head_to_head(team_a: &str, team_b: &str) -> Statement {
    Statement::new(
        "SELECT G.game_date AS Date, H.name AS Host, GU.name AS Guest, \
                G.score AS Score, G.winner AS Winner \
         FROM Games G, Teams H, Teams GU \
         WHERE G.host_team_id = H.team_id \
           AND G.guest_team_id = GU.team_id \
           AND ((H.name = $1 AND GU.name = $2) OR (H.name = $2 AND GU.name = $1))",
    )
    .bind(team_a)
    .bind(team_b)
}

/// Accept only plain `[A-Za-z0-9_]` identifiers of sensible length.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 64 {
        return Err(CourtError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CourtError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    Ok(())
}
