//! Game nights and RSVPs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ShelfError, ShelfResult};
use crate::geo::{GeoPoint, Located};
use crate::session::SessionContext;

/// A planned evening of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameNight {
    pub id: Uuid,
    pub title: String,
    pub host_id: String,
    pub host_name: String,
    pub starts_at: DateTime<Utc>,
    /// Length in minutes
    pub duration_minutes: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub venue: Option<Venue>,
    /// Player cap, counting everyone who's going (host included)
    #[serde(default)]
    pub max_players: Option<u32>,
    /// External catalog ids of the games planned for the night
    #[serde(default)]
    pub games: Vec<i64>,
    #[serde(default)]
    pub rsvps: Vec<Rsvp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rsvp {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub status: RsvpStatus,
    pub responded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Going,
    Maybe,
    Declined,
    Pending,
}

impl GameNight {
    /// A new night hosted by the session user, who is marked as going.
    ///
    /// The duration must be at least a minute and end within chrono's range.
    pub fn new(
        host: &SessionContext,
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> ShelfResult<Self> {
        let duration_minutes = duration.num_minutes();
        if duration_minutes < 1 {
            return Err(ShelfError::InvalidDuration(
                "a game night must last at least a minute".to_string(),
            ));
        }

        let mut night = GameNight {
            id: Uuid::new_v4(),
            title: title.into(),
            host_id: host.user_id.clone(),
            host_name: host.name().to_string(),
            starts_at,
            duration_minutes,
            description: None,
            venue: None,
            max_players: None,
            games: Vec::new(),
            rsvps: Vec::new(),
        };
        night.ends_at()?;
        night.upsert_rsvp(host, None, RsvpStatus::Going, now);
        Ok(night)
    }

    /// Start plus duration. Fails when a stored duration is out of range.
    pub fn ends_at(&self) -> ShelfResult<DateTime<Utc>> {
        TimeDelta::try_minutes(self.duration_minutes)
            .and_then(|duration| self.starts_at.checked_add_signed(duration))
            .ok_or_else(|| {
                ShelfError::InvalidDuration(format!(
                    "{} minutes from {} is out of range",
                    self.duration_minutes, self.starts_at
                ))
            })
    }

    /// Record a user's response, replacing any earlier one.
    pub fn upsert_rsvp(
        &mut self,
        user: &SessionContext,
        email: Option<String>,
        status: RsvpStatus,
        now: DateTime<Utc>,
    ) {
        match self.rsvps.iter_mut().find(|r| r.user_id == user.user_id) {
            Some(existing) => {
                existing.status = status;
                existing.responded_at = now;
                if let Some(ref name) = user.display_name {
                    existing.name = name.clone();
                }
                if email.is_some() {
                    existing.email = email;
                }
            }
            None => self.rsvps.push(Rsvp {
                user_id: user.user_id.clone(),
                name: user.name().to_string(),
                email,
                status,
                responded_at: now,
            }),
        }
    }

    pub fn rsvp_for(&self, user_id: &str) -> Option<&Rsvp> {
        self.rsvps.iter().find(|r| r.user_id == user_id)
    }

    pub fn going_count(&self) -> usize {
        self.rsvps.iter().filter(|r| r.status == RsvpStatus::Going).count()
    }

    /// Open seats, or None when the night has no cap.
    pub fn spots_left(&self) -> Option<usize> {
        self.max_players
            .map(|max| (max as usize).saturating_sub(self.going_count()))
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == Some(0)
    }

    /// Whether the user hosts or has been asked to (or answered for) this night.
    pub fn involves(&self, user_id: &str) -> bool {
        self.host_id == user_id || self.rsvp_for(user_id).is_some()
    }
}

impl Located for GameNight {
    fn location(&self) -> Option<GeoPoint> {
        self.venue.as_ref().and_then(|v| v.coordinates)
    }
}

/// Find a night by full id or unambiguous id prefix.
pub fn find_game_night<'a>(nights: &'a [GameNight], id: &str) -> ShelfResult<&'a GameNight> {
    let index = find_game_night_index(nights, id)?;
    Ok(&nights[index])
}

pub(crate) fn find_game_night_index(nights: &[GameNight], id: &str) -> ShelfResult<usize> {
    let id = id.trim().to_lowercase();
    let matches: Vec<usize> = nights
        .iter()
        .enumerate()
        .filter(|(_, n)| n.id.to_string().starts_with(&id))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [index] if !id.is_empty() => Ok(*index),
        _ => Err(ShelfError::GameNightNotFound(id)),
    }
}

impl RsvpStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RsvpStatus::Going => "going",
            RsvpStatus::Maybe => "maybe",
            RsvpStatus::Declined => "declined",
            RsvpStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = ShelfError;

    fn from_str(s: &str) -> ShelfResult<Self> {
        match s {
            "going" | "yes" => Ok(RsvpStatus::Going),
            "maybe" => Ok(RsvpStatus::Maybe),
            "declined" | "no" => Ok(RsvpStatus::Declined),
            "pending" => Ok(RsvpStatus::Pending),
            _ => Err(ShelfError::parse(s, "an RSVP (going, maybe, declined, pending)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 21, hour, 0, 0).unwrap()
    }

    fn night() -> GameNight {
        let host = SessionContext::new("host").with_display_name("Hana Host");
        GameNight::new(&host, "Friday Euros", at(18), Duration::hours(4), at(9)).unwrap()
    }

    #[test]
    fn host_is_going_on_a_new_night() {
        let night = night();
        assert_eq!(night.rsvps.len(), 1);
        assert_eq!(night.rsvp_for("host").unwrap().status, RsvpStatus::Going);
        assert_eq!(night.host_name, "Hana Host");
        assert_eq!(night.ends_at().unwrap(), at(22));
    }

    #[test]
    fn upsert_replaces_existing_rsvp() {
        let mut night = night();
        let guest = SessionContext::new("guest");

        night.upsert_rsvp(
            &guest,
            Some("g@example.com".to_string()),
            RsvpStatus::Maybe,
            at(10),
        );
        night.upsert_rsvp(&guest, None, RsvpStatus::Going, at(11));

        assert_eq!(night.rsvps.len(), 2);
        let rsvp = night.rsvp_for("guest").unwrap();
        assert_eq!(rsvp.status, RsvpStatus::Going);
        assert_eq!(rsvp.responded_at, at(11));
        assert_eq!(rsvp.email.as_deref(), Some("g@example.com"));
        assert!(night.involves("guest"));
        assert!(!night.involves("stranger"));
    }

    #[test]
    fn spots_left_counts_going_only() {
        let mut night = night();
        assert_eq!(night.spots_left(), None);
        assert!(!night.is_full());

        night.max_players = Some(2);
        night.upsert_rsvp(&SessionContext::new("a"), None, RsvpStatus::Maybe, at(10));
        assert_eq!(night.spots_left(), Some(1));

        night.upsert_rsvp(&SessionContext::new("b"), None, RsvpStatus::Going, at(10));
        night.upsert_rsvp(&SessionContext::new("c"), None, RsvpStatus::Going, at(10));
        assert_eq!(night.going_count(), 3);
        assert_eq!(night.spots_left(), Some(0));
        assert!(night.is_full());
    }

    #[test]
    fn finds_night_by_prefix() {
        let a = night();
        let b = night();
        let nights = vec![a.clone(), b];

        let prefix = &a.id.to_string()[..8];
        assert_eq!(find_game_night(&nights, prefix).unwrap().id, a.id);
        assert!(matches!(
            find_game_night(&nights, "zzz"),
            Err(ShelfError::GameNightNotFound(_))
        ));
        assert!(find_game_night(&nights, "").is_err());
    }

    #[test]
    fn upsert_keeps_name_when_session_has_none() {
        let mut night = night();
        let named = SessionContext::new("ben").with_display_name("Ben Smith");
        night.upsert_rsvp(&named, None, RsvpStatus::Maybe, at(10));

        night.upsert_rsvp(&SessionContext::new("ben"), None, RsvpStatus::Going, at(11));
        assert_eq!(night.rsvp_for("ben").unwrap().name, "Ben Smith");

        let renamed = SessionContext::new("ben").with_display_name("Benji");
        night.upsert_rsvp(&renamed, None, RsvpStatus::Going, at(12));
        assert_eq!(night.rsvp_for("ben").unwrap().name, "Benji");
    }

    #[test]
    fn new_rejects_short_and_out_of_range_durations() {
        let host = SessionContext::new("host");

        for duration in [Duration::zero(), Duration::seconds(30), Duration::hours(-2)] {
            let result = GameNight::new(&host, "Blink", at(18), duration, at(9));
            assert!(matches!(result, Err(ShelfError::InvalidDuration(_))), "{duration}");
        }

        let forever = Duration::days(365 * 300_000);
        let result = GameNight::new(&host, "Forever", at(18), forever, at(9));
        assert!(matches!(result, Err(ShelfError::InvalidDuration(_))));
    }

    #[test]
    fn ends_at_reports_stored_durations_out_of_range() {
        let mut stored = night();
        stored.duration_minutes = i64::MAX;
        assert!(matches!(stored.ends_at(), Err(ShelfError::InvalidDuration(_))));

        stored.duration_minutes = 60 * 24 * 365 * 300_000;
        assert!(matches!(stored.ends_at(), Err(ShelfError::InvalidDuration(_))));
    }

    #[test]
    fn parses_rsvp_words() {
        assert_eq!("yes".parse::<RsvpStatus>().unwrap(), RsvpStatus::Going);
        assert_eq!("declined".parse::<RsvpStatus>().unwrap(), RsvpStatus::Declined);
        assert!("perhaps".parse::<RsvpStatus>().is_err());
    }
}
