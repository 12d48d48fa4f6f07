mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use boardshelf_core::SessionContext;
use boardshelf_core::config::ShelfConfig;
use boardshelf_core::game_night::RsvpStatus;
use boardshelf_core::geo::GeoPoint;
use boardshelf_core::library::{GameTypeFilter, SortKey, StatusFilter};
use boardshelf_core::shelf::Shelf;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "boardshelf")]
#[command(about = "Browse your board game library and plan game nights")]
struct Cli {
    /// Act as this user instead of default_user from config
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your library, with expansions grouped under their base game
    Library {
        /// Only show games whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// owned, on_order, wishlist, played_unowned, want_trade_sell, or all
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// all, base_games, or expansions
        #[arg(short = 't', long = "type", default_value = "all")]
        game_type: GameTypeFilter,

        /// name_asc, name_desc, status, date_added, rating, personal_rating,
        /// min_players, max_players, playing_time, or mechanic
        #[arg(long)]
        sort: Option<SortKey>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Plan and answer game nights
    Nights {
        #[command(subcommand)]
        command: NightsCommand,
    },
    /// Show config and data paths
    Config,
}

#[derive(Subcommand)]
enum NightsCommand {
    /// Upcoming game nights you host or are invited to
    List {
        /// Only nights within --radius of this point ("lat,lon")
        #[arg(long)]
        near: Option<GeoPoint>,

        /// Search radius in km (defaults to search_radius_km from config)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Include nights you're not part of
        #[arg(short, long)]
        all: bool,

        /// Include nights that are over
        #[arg(long)]
        past: bool,
    },
    /// Host a new game night
    New {
        title: String,

        /// Start time (e.g., "2025-03-21T19:00")
        #[arg(short, long)]
        start: String,

        /// Duration (e.g., "90m", "3h", "2h30m"); defaults to 3h
        #[arg(short, long)]
        duration: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Venue name
        #[arg(long)]
        venue: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Venue coordinates ("lat,lon")
        #[arg(long)]
        at: Option<GeoPoint>,

        /// Player cap, host included
        #[arg(short, long)]
        max_players: Option<u32>,

        /// External id of a game to bring (repeatable)
        #[arg(short, long = "game")]
        games: Vec<i64>,
    },
    /// Answer an invitation: going, maybe, declined, or pending
    Rsvp {
        /// Game night id (a unique prefix is enough)
        id: String,

        status: RsvpStatus,

        /// Name to show on the RSVP
        #[arg(long)]
        name: Option<String>,

        /// Email to include as an attendee in exported calendars
        #[arg(long)]
        email: Option<String>,
    },
    /// Export a game night as an .ics file
    Export {
        /// Game night id (a unique prefix is enough)
        id: String,

        /// Output path, or "-" for stdout (defaults to <title>.ics)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let shelf = Shelf::load()?;
    tracing::debug!(data = %shelf.data_path().display(), "loaded config");

    match cli.command {
        Commands::Config => commands::config::run(&shelf),
        Commands::Library {
            search,
            status,
            game_type,
            sort,
            json,
        } => {
            let session = require_session(&shelf, cli.user.as_deref())?;
            let args = commands::library::LibraryArgs {
                search,
                status,
                game_type,
                sort,
                json,
            };
            commands::library::run(&shelf, &session, args).await
        }
        Commands::Nights { command } => {
            let session = require_session(&shelf, cli.user.as_deref())?;
            match command {
                NightsCommand::List {
                    near,
                    radius,
                    all,
                    past,
                } => {
                    let args = commands::nights::ListArgs {
                        near,
                        radius,
                        all,
                        past,
                    };
                    commands::nights::list(&shelf, &session, args).await
                }
                NightsCommand::New {
                    title,
                    start,
                    duration,
                    description,
                    venue,
                    address,
                    at,
                    max_players,
                    games,
                } => {
                    let args = commands::nights::NewArgs {
                        title,
                        start,
                        duration,
                        description,
                        venue,
                        address,
                        at,
                        max_players,
                        games,
                    };
                    commands::nights::new(&shelf, &session, args).await
                }
                NightsCommand::Rsvp {
                    id,
                    status,
                    name,
                    email,
                } => commands::nights::rsvp(&shelf, session, &id, status, name, email).await,
                NightsCommand::Export { id, output } => {
                    commands::nights::export(&shelf, &session, &id, output).await
                }
            }
        }
    }
}

/// Logs go to stderr so stdout stays clean for --json and `export -o -`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn require_session(shelf: &Shelf, user: Option<&str>) -> Result<SessionContext> {
    match shelf.session(user) {
        Some(session) => Ok(session),
        None => {
            let config_path = ShelfConfig::config_path()?;
            anyhow::bail!(
                "No user selected.\n\n\
                Pass one with:\n  \
                boardshelf --user <id> library\n\n\
                or set default_user in {}",
                config_path.display()
            );
        }
    }
}
