//! Search, filter and sort over grouped library entries.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ShelfError, ShelfResult};
use crate::library::group::Group;
use crate::owned::OwnershipStatus;
use crate::text::locale_cmp;

/// Which ownership status a group must carry (on its base or any expansion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OwnershipStatus),
}

/// Base games only, expansions only, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameTypeFilter {
    #[default]
    All,
    BaseGames,
    Expansions,
}

/// Library ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    Status,
    DateAdded,
    Rating,
    PersonalRating,
    MinPlayers,
    MaxPlayers,
    PlayingTime,
    Mechanic,
}

/// Everything that decides what the library listing shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibraryQuery {
    pub search: String,
    pub status: StatusFilter,
    pub game_type: GameTypeFilter,
    pub sort: SortKey,
}

/// Filter groups by search text, type and status, then order them by `query.sort`.
///
/// Never touches `groups`. Equal sort keys without an explicit tie-break keep
/// their input order.
pub fn filter_and_sort(groups: &[Group], query: &LibraryQuery) -> Vec<Group> {
    let needle = query.search.trim().to_lowercase();

    let mut kept: Vec<(String, &Group)> = groups
        .iter()
        .map(|group| (group.base.display_title(), group))
        .filter(|(title, group)| {
            matches_search(title, &needle)
                && matches_type(group, query.game_type)
                && matches_status(group, query.status)
        })
        .collect();

    kept.sort_by(|(title_a, a), (title_b, b)| compare(query.sort, title_a, a, title_b, b));

    kept.into_iter().map(|(_, group)| group.clone()).collect()
}

fn matches_search(title: &str, needle: &str) -> bool {
    needle.is_empty() || title.to_lowercase().contains(needle)
}

fn matches_type(group: &Group, filter: GameTypeFilter) -> bool {
    match filter {
        GameTypeFilter::All => true,
        GameTypeFilter::BaseGames => !group.base.is_expansion(),
        GameTypeFilter::Expansions => group.base.is_expansion() || !group.expansions.is_empty(),
    }
}

fn matches_status(group: &Group, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Only(status) => group.items().any(|item| item.status == status),
    }
}

fn compare(key: SortKey, title_a: &str, a: &Group, title_b: &str, b: &Group) -> Ordering {
    let (a, b) = (&a.base, &b.base);

    match key {
        SortKey::NameAsc => locale_cmp(title_a, title_b),
        SortKey::NameDesc => locale_cmp(title_b, title_a),
        SortKey::Status => b
            .status
            .priority()
            .cmp(&a.status.priority())
            .then_with(|| locale_cmp(title_a, title_b)),
        SortKey::DateAdded => b.date_added.cmp(&a.date_added),
        SortKey::Rating => number(b.catalog.rating).total_cmp(&number(a.catalog.rating)),
        SortKey::PersonalRating => number(b.personal_rating).total_cmp(&number(a.personal_rating)),
        SortKey::MinPlayers => count(a.catalog.min_players).cmp(&count(b.catalog.min_players)),
        SortKey::MaxPlayers => count(a.catalog.max_players).cmp(&count(b.catalog.max_players)),
        SortKey::PlayingTime => count(a.catalog.playing_time).cmp(&count(b.catalog.playing_time)),
        SortKey::Mechanic => locale_cmp(
            a.catalog.core_mechanic.as_deref().unwrap_or(""),
            b.catalog.core_mechanic.as_deref().unwrap_or(""),
        ),
    }
}

fn number(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn count(value: Option<u32>) -> u32 {
    value.unwrap_or(0)
}

// =============================================================================
// Text forms (CLI arguments, config values)
// =============================================================================

impl SortKey {
    pub const ALL: [SortKey; 10] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::Status,
        SortKey::DateAdded,
        SortKey::Rating,
        SortKey::PersonalRating,
        SortKey::MinPlayers,
        SortKey::MaxPlayers,
        SortKey::PlayingTime,
        SortKey::Mechanic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::Status => "status",
            SortKey::DateAdded => "date_added",
            SortKey::Rating => "rating",
            SortKey::PersonalRating => "personal_rating",
            SortKey::MinPlayers => "min_players",
            SortKey::MaxPlayers => "max_players",
            SortKey::PlayingTime => "playing_time",
            SortKey::Mechanic => "mechanic",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ShelfError;

    fn from_str(s: &str) -> ShelfResult<Self> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ShelfError::parse(s, "a sort key"))
    }
}

impl fmt::Display for GameTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            GameTypeFilter::All => "all",
            GameTypeFilter::BaseGames => "base_games",
            GameTypeFilter::Expansions => "expansions",
        })
    }
}

impl FromStr for GameTypeFilter {
    type Err = ShelfError;

    fn from_str(s: &str) -> ShelfResult<Self> {
        match s {
            "all" => Ok(GameTypeFilter::All),
            "base_games" => Ok(GameTypeFilter::BaseGames),
            "expansions" => Ok(GameTypeFilter::Expansions),
            _ => Err(ShelfError::parse(s, "a game type (all, base_games, expansions)")),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ShelfError;

    fn from_str(s: &str) -> ShelfResult<Self> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => Ok(StatusFilter::Only(other.parse()?)),
        }
    }
}
