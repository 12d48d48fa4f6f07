//! Core types for boardshelf.
//!
//! This crate holds everything the CLI presents:
//! - `library`: grouping owned games into base games with expansions, then
//!   searching, filtering and sorting them
//! - `game_night`: game nights, RSVPs, and `geo` for finding nearby ones
//! - `ics`: iCalendar export for game nights
//! - `shelf`: the data directory and the `RecordSource` it implements

pub mod catalog;
pub mod config;
pub mod error;
pub mod game_night;
pub mod geo;
pub mod ics;
pub mod library;
pub mod owned;
pub mod session;
pub mod shelf;
pub mod text;

pub use catalog::CatalogItem;
pub use error::{ShelfError, ShelfResult};
pub use owned::{OwnedItem, OwnershipStatus};
pub use session::SessionContext;
