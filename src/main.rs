//! Main entry point for the Class League standings tool
//!
//! Reads match documents (and optionally the team directory) from JSON
//! files, computes the league table and prints it. In watch mode the table
//! is recomputed on every poll and reprinted whenever it changes.

use anyhow::Result;
use clap::Parser;
use class_league::config::AppConfig;
use class_league::matches::JsonFileMatchSource;
use class_league::teams::{InMemoryTeamDirectory, TeamDirectory};
use class_league::{StandingsFeed, StandingsSnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

/// Class League - standings for school class tournaments
#[derive(Parser)]
#[command(
    name = "class-league",
    version,
    about = "Compute league standings from finished school matches",
    long_about = "Class League reads match documents exported from the school site's match \
                 collection, keeps the finished ones, and prints a league table ranked by \
                 points, goal differential, goals scored and team name."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Match documents override
    #[arg(short, long, value_name = "FILE", help = "JSON file with match documents")]
    matches: Option<PathBuf>,

    /// Team directory override
    #[arg(short, long, value_name = "FILE", help = "JSON file with the team directory")]
    teams: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Locale override
    #[arg(long, value_name = "LOCALE", help = "Locale for the team name tie-break")]
    locale: Option<String>,

    /// Reject malformed finished matches
    #[arg(long, help = "Fail on malformed finished matches instead of skipping them")]
    strict: bool,

    /// Print JSON instead of a text table
    #[arg(long, help = "Print the standings as JSON")]
    json: bool,

    /// Keep polling and reprint on change
    #[arg(short, long, help = "Keep polling the match file and reprint on change")]
    watch: bool,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without computing standings")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, config file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(matches) = &args.matches {
        config.feed.matches_path = matches.clone();
    }

    if let Some(teams) = &args.teams {
        config.feed.teams_path = Some(teams.clone());
    }

    if let Some(locale) = &args.locale {
        config.standings.locale = locale.clone();
    }

    if args.strict {
        config.standings.validation = class_league::ValidationPolicy::Reject;
    }

    class_league::config::validate_config(&config)?;
    Ok(config)
}

fn display_startup_banner(config: &AppConfig) {
    info!("Class League standings");
    info!("   Service: {}", config.service.name);
    info!("   Matches: {}", config.feed.matches_path.display());
    if let Some(teams) = &config.feed.teams_path {
        info!("   Teams: {}", teams.display());
    }
    info!(
        "   Scoring: {}/{}/{}",
        config.standings.win_points, config.standings.draw_points, config.standings.loss_points
    );
    info!("   Tie-breakers: {:?}", config.standings.tie_breakers);
    info!("   Locale: {}", config.standings.locale);
    info!("   Validation: {}", config.standings.validation);
}

fn print_snapshot(
    snapshot: &StandingsSnapshot,
    directory: &dyn TeamDirectory,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for (rank, row) in snapshot.table.ranked() {
        let name = directory.display_name(&row.team).unwrap_or(&row.team);
        println!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}",
            rank,
            name,
            row.played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.goals_against,
            row.goal_differential,
            row.points
        );
    }

    if snapshot.table.is_empty() {
        println!("  (no finished matches)");
    }
    for skipped in &snapshot.skipped {
        println!("  skipped {}: {}", skipped.match_id, skipped.reason);
    }

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

async fn watch_standings(
    feed: Arc<StandingsFeed>,
    config: &AppConfig,
    directory: Arc<InMemoryTeamDirectory>,
    json: bool,
) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let poller = {
        let feed = feed.clone();
        let interval = config.poll_interval();
        tokio::spawn(async move { feed.run(interval, shutdown_rx).await })
    };

    let mut updates = feed.updates();
    let printer = async {
        while let Some(snapshot) = updates.next().await {
            if snapshot.revision == 0 {
                continue;
            }
            info!("Standings revision {}", snapshot.revision);
            if let Err(e) = print_snapshot(&snapshot, directory.as_ref(), json) {
                error!("Failed to print standings: {}", e);
            }
        }
    };

    tokio::select! {
        _ = printer => {},
        _ = wait_for_shutdown_signal() => {},
    }

    if let Err(e) = shutdown_tx.send(()) {
        warn!("Failed to send shutdown signal to feed: {}", e);
    }
    poller.await??;

    info!("Class League watch stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without computing standings");
        return Ok(());
    }

    let directory = match &config.feed.teams_path {
        Some(path) => Arc::new(InMemoryTeamDirectory::from_json_file(path)?),
        None => Arc::new(InMemoryTeamDirectory::default()),
    };
    let engine = config.build_engine()?;
    let source = Arc::new(JsonFileMatchSource::new(config.feed.matches_path.clone()));
    let feed = Arc::new(StandingsFeed::new(
        source,
        engine,
        directory.clone(),
        config.standings.validation,
    ));

    if args.watch {
        return watch_standings(feed, &config, directory, args.json).await;
    }

    match feed.refresh().await {
        Ok(snapshot) => print_snapshot(&snapshot, directory.as_ref(), args.json),
        Err(e) => {
            error!("Failed to compute standings: {}", e);
            std::process::exit(1);
        }
    }
}
