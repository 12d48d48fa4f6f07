//! ICS file generation for game nights.

use crate::error::{ShelfError, ShelfResult};
use crate::game_night::{GameNight, RsvpStatus};
use chrono::TimeDelta;
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};

const ICS_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Generate .ics content for a game night.
///
/// `game_titles` are the display titles of the planned games, listed in the
/// description. `reminder_minutes` adds a display alarm that long before start.
pub fn generate_ics(
    night: &GameNight,
    game_titles: &[String],
    reminder_minutes: Option<i64>,
) -> ShelfResult<String> {
    if night.duration_minutes <= 0 {
        return Err(ShelfError::IcsGenerate(format!(
            "game night '{}' has no duration",
            night.title
        )));
    }

    let ends_at = night.ends_at()?;

    let reminder = match reminder_minutes {
        Some(minutes) => Some(
            TimeDelta::try_minutes(minutes)
                .filter(|_| minutes >= 0)
                .ok_or_else(|| {
                    ShelfError::IcsGenerate(format!("invalid reminder of {minutes} minutes"))
                })?,
        ),
        None => None,
    };

    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@boardshelf", night.id));
    ics_event.summary(&night.title);

    // DTSTAMP - required by RFC 5545
    let dtstamp = chrono::Utc::now().format(ICS_DATETIME_FORMAT).to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    ics_event.add_property(
        "DTSTART",
        night.starts_at.format(ICS_DATETIME_FORMAT).to_string(),
    );
    ics_event.add_property("DTEND", ends_at.format(ICS_DATETIME_FORMAT).to_string());

    if let Some(description) = describe(night, game_titles) {
        ics_event.description(&description);
    }

    if let Some(ref venue) = night.venue {
        let location = match venue.address {
            Some(ref address) => format!("{}, {}", venue.name, address),
            None => venue.name.clone(),
        };
        ics_event.location(&location);

        if let Some(point) = venue.coordinates {
            let geo = format!("{};{}", point.latitude(), point.longitude());
            ics_event.add_property("GEO", geo);
        }
    }

    if let Some(lead) = reminder {
        ics_event.alarm(Alarm::display("Game night", Trigger::before_start(lead)));
    }

    // ORGANIZER - only when the host left an email on their RSVP
    if let Some(email) = night.rsvp_for(&night.host_id).and_then(|r| r.email.as_ref()) {
        let mut prop = Property::new("ORGANIZER", format!("mailto:{}", email));
        prop.add_parameter("CN", &night.host_name);
        ics_event.append_property(prop);
    }

    // ATTENDEE (multi-property - one per RSVP with an email)
    for rsvp in &night.rsvps {
        let Some(ref email) = rsvp.email else {
            continue;
        };
        let mut prop = Property::new("ATTENDEE", format!("mailto:{}", email));
        prop.add_parameter("CN", &rsvp.name);
        prop.add_parameter("PARTSTAT", partstat(rsvp.status));
        ics_event.append_multi_property(prop);
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

fn describe(night: &GameNight, game_titles: &[String]) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(ref text) = night.description {
        if !text.trim().is_empty() {
            parts.push(text.trim().to_string());
        }
    }

    if !game_titles.is_empty() {
        let list: Vec<String> = game_titles.iter().map(|t| format!("- {t}")).collect();
        parts.push(format!("Games:\n{}", list.join("\n")));
    }

    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

fn partstat(status: RsvpStatus) -> &'static str {
    match status {
        RsvpStatus::Going => "ACCEPTED",
        RsvpStatus::Maybe => "TENTATIVE",
        RsvpStatus::Declined => "DECLINED",
        RsvpStatus::Pending => "NEEDS-ACTION",
    }
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with BOARDSHELF
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:BOARDSHELF\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
