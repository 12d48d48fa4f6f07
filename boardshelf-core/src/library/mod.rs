//! The game library pipeline: group owned items into base games with their
//! expansions, then search, filter and sort the groups.

mod filter;
mod group;
mod view;

pub use filter::{GameTypeFilter, LibraryQuery, SortKey, StatusFilter, filter_and_sort};
pub use group::{Group, group_library};
pub use view::LibraryView;
