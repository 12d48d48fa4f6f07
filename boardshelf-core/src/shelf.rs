//! The boardshelf data directory and the record source it provides.
//!
//! Records live as two JSON files under the configured data directory:
//! `library.json` (owned-item rows for every user, each embedding its
//! catalog entry) and `game_nights.json`. A missing file reads as empty.

use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ShelfConfig;
use crate::error::ShelfResult;
use crate::game_night::{GameNight, RsvpStatus, find_game_night_index};
use crate::owned::OwnedItem;
use crate::session::SessionContext;

const LIBRARY_FILE: &str = "library.json";
const GAME_NIGHTS_FILE: &str = "game_nights.json";

/// Where owned items and game nights come from.
pub trait RecordSource {
    /// The session user's owned items, in stored order.
    fn owned_items(
        &self,
        session: &SessionContext,
    ) -> impl Future<Output = ShelfResult<Vec<OwnedItem>>> + Send;

    fn game_nights(&self) -> impl Future<Output = ShelfResult<Vec<GameNight>>> + Send;

    fn save_game_nights(
        &self,
        nights: &[GameNight],
    ) -> impl Future<Output = ShelfResult<()>> + Send;
}

#[derive(Clone)]
pub struct Shelf {
    config: ShelfConfig,
}

impl Shelf {
    pub fn load() -> ShelfResult<Self> {
        Ok(Shelf {
            config: ShelfConfig::load()?,
        })
    }

    pub fn from_config(config: ShelfConfig) -> Self {
        Shelf { config }
    }

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    pub fn data_path(&self) -> PathBuf {
        self.config.data_path()
    }

    /// The data directory in display-friendly form, keeping `~`.
    pub fn display_path(&self) -> PathBuf {
        self.config.data_dir.clone()
    }

    /// Session for `user`, or for the configured default user.
    pub fn session(&self, user: Option<&str>) -> Option<SessionContext> {
        let user_id = user.or(self.config.default_user.as_deref())?;
        let session = SessionContext::new(user_id);

        // The display name belongs to the configured user only.
        match (&self.config.display_name, &self.config.default_user) {
            (Some(name), Some(default)) if default == user_id => {
                Some(session.with_display_name(name.clone()))
            }
            _ => Some(session),
        }
    }

    /// Record an RSVP for the night matching `night_id` (full id or prefix) and persist it.
    pub async fn rsvp(
        &self,
        night_id: &str,
        session: &SessionContext,
        email: Option<String>,
        status: RsvpStatus,
        now: DateTime<Utc>,
    ) -> ShelfResult<GameNight> {
        let mut nights = self.game_nights().await?;
        let index = find_game_night_index(&nights, night_id)?;

        nights[index].upsert_rsvp(session, email, status, now);
        let updated = nights[index].clone();

        self.save_game_nights(&nights).await?;
        tracing::info!(night = %updated.id, user = %session.user_id, %status, "recorded rsvp");
        Ok(updated)
    }

    /// Add a new game night and persist it.
    pub async fn add_game_night(&self, night: GameNight) -> ShelfResult<()> {
        let mut nights = self.game_nights().await?;
        tracing::info!(night = %night.id, title = %night.title, "adding game night");
        nights.push(night);
        self.save_game_nights(&nights).await
    }

    fn file(&self, name: &str) -> PathBuf {
        self.data_path().join(name)
    }
}

impl RecordSource for Shelf {
    async fn owned_items(&self, session: &SessionContext) -> ShelfResult<Vec<OwnedItem>> {
        let all: Vec<OwnedItem> = read_json_array(&self.file(LIBRARY_FILE)).await?;
        let total = all.len();

        let mine: Vec<OwnedItem> = all
            .into_iter()
            .filter(|item| item.user_id == session.user_id)
            .collect();

        tracing::debug!(user = %session.user_id, total, owned = mine.len(), "loaded library");
        Ok(mine)
    }

    async fn game_nights(&self) -> ShelfResult<Vec<GameNight>> {
        read_json_array(&self.file(GAME_NIGHTS_FILE)).await
    }

    async fn save_game_nights(&self, nights: &[GameNight]) -> ShelfResult<()> {
        write_json(&self.file(GAME_NIGHTS_FILE), nights).await
    }
}

async fn read_json_array<T: DeserializeOwned>(path: &Path) -> ShelfResult<Vec<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no records file, treating as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ShelfResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = serde_json::to_string_pretty(value)?;

    // Write beside the target and rename so readers never see a partial file.
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn shelf_in(dir: &Path) -> Shelf {
        Shelf::from_config(ShelfConfig {
            data_dir: dir.to_path_buf(),
            default_user: Some("ana".to_string()),
            display_name: Some("Ana".to_string()),
            ..ShelfConfig::default()
        })
    }

    const LIBRARY: &str = r#"[
        {"id": "1", "user_id": "ana", "status": "owned", "date_added": "2024-01-02T00:00:00Z",
         "game": {"id": "c13", "external_id": 13, "name": "Catan"}},
        {"id": "2", "user_id": "ben", "status": "wishlist", "date_added": "2024-01-03T00:00:00Z",
         "game": {"id": "c822", "external_id": 822, "name": "Carcassonne"}},
        {"id": "3", "user_id": "ana", "status": "on_order", "date_added": "2024-02-01T00:00:00Z",
         "game": {"id": "c325", "external_id": 325, "name": "Seafarers",
                  "is_expansion": true, "base_external_id": 13}}
    ]"#;

    #[tokio::test]
    async fn owned_items_are_scoped_to_the_session_user() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LIBRARY_FILE), LIBRARY).unwrap();
        let shelf = shelf_in(dir.path());

        let ana = shelf.owned_items(&SessionContext::new("ana")).await.unwrap();
        assert_eq!(ana.len(), 2);
        assert!(ana.iter().all(|i| i.user_id == "ana"));

        let nobody = shelf.owned_items(&SessionContext::new("zed")).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let shelf = shelf_in(&dir.path().join("not-created-yet"));

        assert!(shelf.owned_items(&SessionContext::new("ana")).await.unwrap().is_empty());
        assert!(shelf.game_nights().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_library_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LIBRARY_FILE), "{not json").unwrap();
        let shelf = shelf_in(dir.path());

        let err = shelf.owned_items(&SessionContext::new("ana")).await.unwrap_err();
        assert!(matches!(err, crate::error::ShelfError::Serialization(_)));
    }

    #[tokio::test]
    async fn rsvp_persists() {
        let dir = tempfile::tempdir().unwrap();
        let shelf = shelf_in(dir.path());
        let host = shelf.session(None).unwrap();
        let start = Utc.with_ymd_and_hms(2025, 3, 21, 18, 0, 0).unwrap();

        let night =
            GameNight::new(&host, "Friday Euros", start, Duration::hours(3), start).unwrap();
        let id = night.id.to_string();
        shelf.add_game_night(night).await.unwrap();

        let guest = SessionContext::new("ben");
        let updated = shelf
            .rsvp(&id[..8], &guest, None, RsvpStatus::Maybe, start)
            .await
            .unwrap();
        assert_eq!(updated.rsvps.len(), 2);

        let reloaded = shelf.game_nights().await.unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].rsvp_for("ben").unwrap().status, RsvpStatus::Maybe);
        assert_eq!(reloaded[0].host_name, "Ana");
    }

    #[test]
    fn session_uses_default_user_and_display_name() {
        let dir = tempfile::tempdir().unwrap();
        let shelf = shelf_in(dir.path());

        let default = shelf.session(None).unwrap();
        assert_eq!(default.user_id, "ana");
        assert_eq!(default.name(), "Ana");

        let other = shelf.session(Some("ben")).unwrap();
        assert_eq!(other.name(), "ben");

        let no_default = Shelf::from_config(ShelfConfig::default());
        assert!(no_default.session(None).is_none());
    }
}
