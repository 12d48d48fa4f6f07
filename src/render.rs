//! TUI rendering traits for boardshelf types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to boardshelf-core types using owo_colors.

use boardshelf_core::game_night::{GameNight, Rsvp, RsvpStatus};
use boardshelf_core::library::Group;
use boardshelf_core::text::initials;
use boardshelf_core::{OwnedItem, OwnershipStatus};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for OwnershipStatus {
    fn render(&self) -> String {
        let label = format!("[{}]", self.label());
        match self {
            OwnershipStatus::Owned => label.green().to_string(),
            OwnershipStatus::OnOrder => label.cyan().to_string(),
            OwnershipStatus::Wishlist => label.yellow().to_string(),
            OwnershipStatus::PlayedUnowned => label.blue().to_string(),
            OwnershipStatus::WantTradeSell => label.magenta().to_string(),
            OwnershipStatus::Unknown => label.dimmed().to_string(),
        }
    }
}

impl Render for OwnedItem {
    fn render(&self) -> String {
        let mut details = Vec::new();
        if let Some(players) = self.catalog.player_range() {
            details.push(players);
        }
        if let Some(minutes) = self.catalog.playing_time {
            details.push(format!("{minutes} min"));
        }
        if let Some(rating) = self.catalog.rating {
            details.push(format!("★ {rating:.1}"));
        }
        if let Some(mine) = self.personal_rating {
            details.push(format!("mine {mine:.1}"));
        }

        let mut line = format!("{} {}", self.display_title().bold(), self.status.render());
        if !details.is_empty() {
            line.push_str(&format!(" {}", details.join(" · ").dimmed()));
        }
        line
    }
}

impl Render for Group {
    fn render(&self) -> String {
        let mut lines = vec![format!("🎲 {}", self.base.render())];

        for expansion in &self.expansions {
            lines.push(format!("   └ {}", expansion.render()));
        }

        if self.base.is_expansion() {
            lines.push("   (base game not in library)".dimmed().to_string());
        }

        lines.join("\n")
    }
}

impl Render for RsvpStatus {
    fn render(&self) -> String {
        match self {
            RsvpStatus::Going => "going".green().to_string(),
            RsvpStatus::Maybe => "maybe".yellow().to_string(),
            RsvpStatus::Declined => "declined".red().to_string(),
            RsvpStatus::Pending => "pending".dimmed().to_string(),
        }
    }
}

impl Render for Rsvp {
    fn render(&self) -> String {
        format!("({}) {} {}", initials(&self.name).bold(), self.name, self.status.render())
    }
}

/// Rendering for game nights, which needs a display time zone.
pub trait GameNightRender {
    fn render(&self, tz: Option<Tz>, distance_km: Option<f64>) -> String;
}

impl GameNightRender for GameNight {
    fn render(&self, tz: Option<Tz>, distance_km: Option<f64>) -> String {
        let short_id = &self.id.to_string()[..8];
        let mut lines = vec![format!(
            "📅 {} {} {}",
            format_time(self.starts_at, tz).bold(),
            self.title.bold(),
            short_id.dimmed()
        )];

        let mut where_line = format!("   hosted by {}", self.host_name);
        if let Some(ref venue) = self.venue {
            where_line.push_str(&format!(" at {}", venue.name));
        }
        if let Some(km) = distance_km {
            where_line.push_str(&format!(" ({km:.1} km away)"));
        }
        lines.push(where_line.dimmed().to_string());

        let seats = match self.spots_left() {
            _ if self.is_full() => "full".red().to_string(),
            Some(n) => format!("{n} {} left", pluralize("seat", n)),
            None => format!("{} going", self.going_count()),
        };
        lines.push(format!("   {}", seats));

        for rsvp in &self.rsvps {
            lines.push(format!("     {}", rsvp.render()));
        }

        lines.join("\n")
    }
}

/// Format a timestamp in the configured zone, or the machine's local zone.
pub fn format_time(time: DateTime<Utc>, tz: Option<Tz>) -> String {
    const FORMAT: &str = "%a %b %-d %H:%M";
    match tz {
        Some(tz) => time.with_timezone(&tz).format(FORMAT).to_string(),
        None => time.with_timezone(&Local).format(FORMAT).to_string(),
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_time_uses_given_zone() {
        let time = Utc.with_ymd_and_hms(2025, 3, 21, 18, 0, 0).unwrap();
        assert_eq!(format_time(time, Some(chrono_tz::Europe::Paris)), "Fri Mar 21 19:00");
        assert_eq!(format_time(time, Some(chrono_tz::UTC)), "Fri Mar 21 18:00");
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("game", 1), "game");
        assert_eq!(pluralize("game", 0), "games");
        assert_eq!(pluralize("group", 3), "groups");
    }
}
