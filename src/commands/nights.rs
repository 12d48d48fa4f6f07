use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use boardshelf_core::SessionContext;
use boardshelf_core::game_night::{GameNight, RsvpStatus, Venue, find_game_night};
use boardshelf_core::geo::{GeoPoint, nearby};
use boardshelf_core::ics::{export_filename, generate_ics};
use boardshelf_core::shelf::{RecordSource, Shelf};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use crate::render::{GameNightRender, Render};

const DEFAULT_DURATION: &str = "3h";

pub struct ListArgs {
    pub near: Option<GeoPoint>,
    pub radius: Option<f64>,
    pub all: bool,
    pub past: bool,
}

pub async fn list(shelf: &Shelf, session: &SessionContext, args: ListArgs) -> Result<()> {
    let config = shelf.config();
    let tz = config.time_zone()?;
    let now = Utc::now();

    let mut nights: Vec<GameNight> = shelf
        .game_nights()
        .await?
        .into_iter()
        .filter(|n| args.all || n.involves(&session.user_id))
        .filter(|n| args.past || still_on(n, now))
        .collect();
    nights.sort_by_key(|n| n.starts_at);

    // Distance filtering kicks in with --near, or --radius around the configured home.
    let center = match (args.near, args.radius) {
        (Some(point), _) => Some(point),
        (None, Some(_)) => Some(config.home_point()?.context(
            "--radius needs a center: pass --near LAT,LON or set `home` in config",
        )?),
        (None, None) => None,
    };

    let listed: Vec<(&GameNight, Option<f64>)> = match center {
        Some(center) => {
            let radius = args.radius.unwrap_or(config.search_radius_km);
            nearby(&nights, &center, radius)?
                .into_iter()
                .map(|(night, km)| (night, Some(km)))
                .collect()
        }
        None => nights.iter().map(|night| (night, None)).collect(),
    };

    if listed.is_empty() {
        println!("{}", "No game nights found".dimmed());
        return Ok(());
    }

    for (i, (night, km)) in listed.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", night.render(tz, *km));
    }

    Ok(())
}

/// Whether a night hasn't ended yet. Nights with a broken duration stay listed.
fn still_on(night: &GameNight, now: DateTime<Utc>) -> bool {
    match night.ends_at() {
        Ok(end) => end >= now,
        Err(e) => {
            tracing::warn!(night = %night.id, "{e}");
            true
        }
    }
}

pub struct NewArgs {
    pub title: String,
    pub start: String,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub at: Option<GeoPoint>,
    pub max_players: Option<u32>,
    pub games: Vec<i64>,
}

pub async fn new(shelf: &Shelf, session: &SessionContext, args: NewArgs) -> Result<()> {
    let tz = shelf.config().time_zone()?;
    let starts_at = parse_start(&args.start, tz)?;

    let duration_input = args.duration.as_deref().unwrap_or(DEFAULT_DURATION);
    let duration = humantime::parse_duration(duration_input).with_context(|| {
        format!("Invalid duration '{duration_input}'. Examples: 90m, 3h, 2h30m")
    })?;
    let duration = chrono::Duration::from_std(duration).context("Duration is too long")?;

    if args.venue.is_none() && (args.address.is_some() || args.at.is_some()) {
        anyhow::bail!("--address and --at need a --venue name");
    }

    let mut night = GameNight::new(session, args.title, starts_at, duration, Utc::now())?;
    night.description = args.description;
    night.max_players = args.max_players;
    night.games = args.games;
    night.venue = args.venue.map(|name| Venue {
        name,
        address: args.address,
        coordinates: args.at,
    });

    let summary = night.render(tz, None);
    shelf.add_game_night(night).await?;

    println!("{}", "Created game night".green());
    println!("{}", summary);
    Ok(())
}

pub async fn rsvp(
    shelf: &Shelf,
    session: SessionContext,
    id: &str,
    status: RsvpStatus,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let session = match name {
        Some(name) => session.with_display_name(name),
        None => session,
    };

    let night = shelf.rsvp(id, &session, email, status, Utc::now()).await?;

    let over_cap = night
        .max_players
        .is_some_and(|max| night.going_count() > max as usize);
    if status == RsvpStatus::Going && over_cap {
        println!("{}", "Heads up: this night is over its player cap".yellow());
    }

    println!("{} → {}", night.title.bold(), status.render());
    Ok(())
}

pub async fn export(
    shelf: &Shelf,
    session: &SessionContext,
    id: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let nights = shelf.game_nights().await?;
    let night = find_game_night(&nights, id)?;

    // Planned games are named from the exporting user's library.
    let titles: HashMap<i64, String> = shelf
        .owned_items(session)
        .await?
        .into_iter()
        .map(|item| (item.catalog.external_id, item.display_title()))
        .collect();
    let game_titles: Vec<String> = night
        .games
        .iter()
        .map(|id| titles.get(id).cloned().unwrap_or_else(|| format!("Game #{id}")))
        .collect();

    let ics = generate_ics(night, &game_titles, shelf.config().reminder_minutes)?;

    match output {
        Some(path) if path.as_os_str() == "-" => print!("{}", ics),
        output => {
            let path = output.unwrap_or_else(|| PathBuf::from(export_filename(&night.title)));
            std::fs::write(&path, ics)
                .with_context(|| format!("Could not write {}", path.display()))?;
            println!("Exported {} to {}", night.title.bold(), path.display());
        }
    }

    Ok(())
}

/// Parse "YYYY-MM-DDTHH:MM" (or with a space) in the display zone.
fn parse_start(input: &str, tz: Option<Tz>) -> Result<DateTime<Utc>> {
    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input.trim(), fmt).ok())
        .with_context(|| format!("Invalid start '{}'. Expected YYYY-MM-DDTHH:MM", input))?;

    let resolved = match tz {
        Some(tz) => tz.from_local_datetime(&naive).earliest().map(|t| t.with_timezone(&Utc)),
        None => Local.from_local_datetime(&naive).earliest().map(|t| t.with_timezone(&Utc)),
    };

    resolved.with_context(|| format!("'{}' doesn't exist in the local time zone", input))
}
