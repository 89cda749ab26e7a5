//! Wayfarer CLI - Command-line interface for the Wayfarer itinerary manager.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use wayfarer_cli::commands;
use wayfarer_cli::{Cli, Command, Config, Formatter, ItineraryCommand, Session};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> wayfarer_cli::Result<()> {
    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load()?,
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
        Command::Itinerary(cmd) => {
            // Commands that need the profile's itineraries
            let session = Session::open(&config).await?;
            let result = run_itinerary_command(cmd, &session, &config, &formatter).await;
            session.close().await;
            result?;
        }
    }

    Ok(())
}

async fn run_itinerary_command(
    cmd: ItineraryCommand,
    session: &Session,
    config: &Config,
    formatter: &Formatter,
) -> wayfarer_cli::Result<()> {
    match cmd {
        ItineraryCommand::List(args) => commands::execute_list(args, session, formatter).await,
        ItineraryCommand::Show(args) => commands::execute_show(args, session, formatter).await,
        ItineraryCommand::Create(args) => commands::execute_create(args, session, formatter).await,
        ItineraryCommand::Delete(args) => commands::execute_delete(args, session, formatter).await,
        ItineraryCommand::Favorite(args) => {
            commands::execute_favorite(args, session, formatter).await
        }
        ItineraryCommand::Suggest(args) => {
            commands::execute_suggest(args, session, &config.suggestions, formatter).await
        }
    }
}
