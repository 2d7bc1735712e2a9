//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use fantasy_coach::{
    cli::{Commands, FantasyCoach},
    commands::{
        coaching::{handle_insight, handle_lineup, handle_live, handle_sport},
        ingest::handle_ingest,
        projection::{handle_pattern, handle_project, handle_train_status, ProjectParams},
    },
    Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let app = FantasyCoach::parse();

    match app.command {
        Commands::Ingest { file, force, clear } => handle_ingest(&file, force, clear).await?,

        Commands::Pattern {
            player,
            json,
            history,
        } => handle_pattern(&player, json, &history).await?,

        Commands::Project {
            player,
            position,
            opponent,
            week,
            base,
            home,
            weather,
            json,
            history,
        } => {
            handle_project(
                ProjectParams {
                    player_id: player,
                    position,
                    opponent,
                    week,
                    base_projection: base,
                    is_home: home,
                    weather,
                    as_json: json,
                },
                &history,
            )
            .await?
        }

        Commands::TrainStatus { json, history } => handle_train_status(json, &history).await?,

        Commands::Insight {
            player,
            week,
            analytics,
            json,
            history,
        } => handle_insight(&player, week, &analytics, json, &history).await?,

        Commands::Lineup {
            user,
            week,
            lineup,
            analytics,
            json,
            history,
        } => handle_lineup(&user, week, &lineup, &analytics, json, &history).await?,

        Commands::Live { player, stats } => handle_live(player.as_ref(), &stats).await?,

        Commands::Sport {
            sport,
            player,
            position,
            team,
            json,
        } => handle_sport(&sport, &player, &position, &team, json)?,
    }

    Ok(())
}
