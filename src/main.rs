//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use courtside::{
    cli::{Commands, Courtside},
    commands::{
        matchup::handle_matchup,
        players::{handle_career_high, handle_player, handle_players},
        seasons::{handle_leaders, handle_season, handle_seasons},
        tables::handle_tables,
        teams::{handle_conferences, handle_divisions, handle_teams},
        CommandContext,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = Courtside::parse();
    let ctx = CommandContext::new(app.config.as_deref(), app.json)?;

    match app.command {
        Commands::Tables { show } => handle_tables(&ctx, show).await?,

        Commands::Teams {
            conference,
            division,
        } => handle_teams(&ctx, conference, division).await?,

        Commands::Conferences => handle_conferences(&ctx).await?,

        Commands::Divisions => handle_divisions(&ctx).await?,

        Commands::Seasons => handle_seasons(&ctx).await?,

        Commands::Season { year, top } => handle_season(&ctx, year.as_u16(), top).await?,

        Commands::Leaders {
            year,
            category,
            top,
        } => handle_leaders(&ctx, year.as_u16(), category, top).await?,

        Commands::Players => handle_players(&ctx).await?,

        Commands::Player { name, since } => handle_player(&ctx, &name, since.as_u16()).await?,

        Commands::CareerHigh { fragment } => handle_career_high(&ctx, &fragment).await?,

        Commands::Matchup { team_a, team_b } => handle_matchup(&ctx, &team_a, &team_b).await?,
    }

    Ok(())
}
