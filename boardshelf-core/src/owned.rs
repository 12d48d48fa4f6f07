//! A user's owned (or wanted, or played) games.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::error::{ShelfError, ShelfResult};

/// One user's record of a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedItem {
    pub id: String,
    pub user_id: String,
    pub status: OwnershipStatus,
    #[serde(default)]
    pub personal_rating: Option<f64>,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub is_owned: bool,
    #[serde(default)]
    pub is_wishlist: bool,
    /// User-chosen title shown instead of the catalog name
    #[serde(default)]
    pub custom_title: Option<String>,
    /// The catalog entry this record points at
    #[serde(rename = "game")]
    pub catalog: CatalogItem,
}

impl OwnedItem {
    /// Title shown to the user: the custom title when set, otherwise the
    /// decoded catalog name.
    pub fn display_title(&self) -> String {
        match self.custom_title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.catalog.display_name(),
        }
    }

    pub fn is_expansion(&self) -> bool {
        self.catalog.is_expansion
    }
}

/// Where a game stands for its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipStatus {
    Owned,
    OnOrder,
    Wishlist,
    PlayedUnowned,
    WantTradeSell,
    /// Any status value this version doesn't know about
    #[serde(other)]
    Unknown,
}

impl OwnershipStatus {
    pub const ALL: [OwnershipStatus; 5] = [
        OwnershipStatus::Owned,
        OwnershipStatus::OnOrder,
        OwnershipStatus::Wishlist,
        OwnershipStatus::PlayedUnowned,
        OwnershipStatus::WantTradeSell,
    ];

    /// Rank used by the status sort; higher sorts first.
    pub fn priority(self) -> u8 {
        match self {
            OwnershipStatus::Owned => 5,
            OwnershipStatus::OnOrder => 4,
            OwnershipStatus::Wishlist => 3,
            OwnershipStatus::PlayedUnowned => 2,
            OwnershipStatus::WantTradeSell => 1,
            OwnershipStatus::Unknown => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OwnershipStatus::Owned => "owned",
            OwnershipStatus::OnOrder => "on_order",
            OwnershipStatus::Wishlist => "wishlist",
            OwnershipStatus::PlayedUnowned => "played_unowned",
            OwnershipStatus::WantTradeSell => "want_trade_sell",
            OwnershipStatus::Unknown => "unknown",
        }
    }

    /// Human label, e.g. "On order"
    pub fn label(self) -> &'static str {
        match self {
            OwnershipStatus::Owned => "Owned",
            OwnershipStatus::OnOrder => "On order",
            OwnershipStatus::Wishlist => "Wishlist",
            OwnershipStatus::PlayedUnowned => "Played",
            OwnershipStatus::WantTradeSell => "Trade/sell",
            OwnershipStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OwnershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnershipStatus {
    type Err = ShelfError;

    fn from_str(s: &str) -> ShelfResult<Self> {
        OwnershipStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ShelfError::parse(s, "an ownership status"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_wire_status_decodes_to_unknown() {
        let status: OwnershipStatus = serde_json::from_str("\"lent_out\"").unwrap();
        assert_eq!(status, OwnershipStatus::Unknown);
        assert_eq!(status.priority(), 0);
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in OwnershipStatus::ALL {
            assert_eq!(status.as_str().parse::<OwnershipStatus>().unwrap(), status);
        }
        assert!("unknown".parse::<OwnershipStatus>().is_err());
    }

    #[test]
    fn display_title_prefers_custom_title() {
        let json = r#"{
            "id": "o1",
            "user_id": "u1",
            "status": "owned",
            "date_added": "2024-05-01T12:00:00Z",
            "custom_title": "  ",
            "game": {"id": "c1", "external_id": 1, "name": "Tzolk&#039;in"}
        }"#;
        let mut item: OwnedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.display_title(), "Tzolk'in");

        item.custom_title = Some("Gears Game".to_string());
        assert_eq!(item.display_title(), "Gears Game");
    }
}
