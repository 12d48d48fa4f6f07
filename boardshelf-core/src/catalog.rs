//! Catalog entries as synced from the external game database.
//!
//! Catalog items are read-only here: the library pipeline groups and sorts
//! by them but never changes them.

use serde::{Deserialize, Serialize};

use crate::text::decode_html_entities;

/// A game (or expansion) in the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Internal row id
    pub id: String,
    /// Numeric id in the external game database
    pub external_id: i64,
    /// Catalog name, possibly HTML-escaped
    pub name: String,
    #[serde(default)]
    pub is_expansion: bool,
    /// External id of the base game this expansion belongs to
    #[serde(default)]
    pub base_external_id: Option<i64>,

    #[serde(default)]
    pub min_players: Option<u32>,
    #[serde(default)]
    pub max_players: Option<u32>,
    /// Typical playing time in minutes
    #[serde(default)]
    pub playing_time: Option<u32>,
    /// Community rating from the external database
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub core_mechanic: Option<String>,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl CatalogItem {
    /// The catalog name with HTML entities decoded.
    pub fn display_name(&self) -> String {
        decode_html_entities(&self.name)
    }

    /// "2-4 players", "1 player", or None when the catalog has no counts.
    pub fn player_range(&self) -> Option<String> {
        match (self.min_players, self.max_players) {
            (Some(min), Some(max)) if min == max => Some(format!("{min} {}", players(min))),
            (Some(min), Some(max)) => Some(format!("{min}-{max} players")),
            (Some(n), None) | (None, Some(n)) => Some(format!("{n} {}", players(n))),
            (None, None) => None,
        }
    }
}

fn players(n: u32) -> &'static str {
    if n == 1 { "player" } else { "players" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(min: Option<u32>, max: Option<u32>) -> CatalogItem {
        CatalogItem {
            id: "c1".to_string(),
            external_id: 13,
            name: "Catan".to_string(),
            is_expansion: false,
            base_external_id: None,
            min_players: min,
            max_players: max,
            playing_time: None,
            rating: None,
            core_mechanic: None,
            year_published: None,
            thumbnail: None,
        }
    }

    #[test]
    fn player_range_formats() {
        assert_eq!(item(Some(3), Some(4)).player_range().as_deref(), Some("3-4 players"));
        assert_eq!(item(Some(1), Some(1)).player_range().as_deref(), Some("1 player"));
        assert_eq!(item(None, Some(5)).player_range().as_deref(), Some("5 players"));
        assert_eq!(item(None, None).player_range(), None);
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let json = r#"{"id":"x","external_id":266192,"name":"Wingspan"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert!(!item.is_expansion);
        assert_eq!(item.base_external_id, None);
        assert_eq!(item.min_players, None);
    }
}
