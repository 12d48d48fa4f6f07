//! ICS export.
//!
//! Game nights are written as single-event calendars according to RFC 5545.

mod generate;

pub use generate::generate_ics;

/// File name for an exported night, e.g. `friday-euros.ics`.
pub fn export_filename(title: &str) -> String {
    let stem = slug::slugify(title);
    if stem.is_empty() {
        "game-night.ics".to_string()
    } else {
        format!("{stem}.ics")
    }
}
