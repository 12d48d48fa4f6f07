//! Cached library listing.

use crate::library::filter::{LibraryQuery, filter_and_sort};
use crate::library::group::{Group, group_library};
use crate::owned::OwnedItem;

/// A user's library with grouping and the last listing cached.
///
/// Groups are rebuilt whenever the items are replaced. The filtered listing is
/// recomputed only when asked for with a query that differs from the last one.
#[derive(Debug, Default)]
pub struct LibraryView {
    items: Vec<OwnedItem>,
    groups: Vec<Group>,
    listing: Option<(LibraryQuery, Vec<Group>)>,
}

impl LibraryView {
    pub fn new(items: Vec<OwnedItem>) -> Self {
        let mut view = LibraryView::default();
        view.set_items(items);
        view
    }

    pub fn items(&self) -> &[OwnedItem] {
        &self.items
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Replace the underlying items, regrouping and dropping the cached listing.
    pub fn set_items(&mut self, items: Vec<OwnedItem>) {
        self.groups = group_library(&items);
        self.items = items;
        self.listing = None;
        tracing::debug!(items = self.items.len(), groups = self.groups.len(), "regrouped library");
    }

    /// Groups matching `query`, in query order.
    pub fn listing(&mut self, query: &LibraryQuery) -> &[Group] {
        let stale = !matches!(&self.listing, Some((cached, _)) if cached == query);

        if stale {
            let result = filter_and_sort(&self.groups, query);
            tracing::debug!(
                search = %query.search,
                status = %query.status,
                game_type = %query.game_type,
                sort = %query.sort,
                matches = result.len(),
                "recomputed library listing"
            );
            self.listing = Some((query.clone(), result));
        }

        match &self.listing {
            Some((_, groups)) => groups,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::filter::{SortKey, StatusFilter};
    use crate::library::testing::{base, expansion};
    use crate::owned::OwnershipStatus::*;

    fn sample() -> Vec<OwnedItem> {
        vec![
            base("Catan", 13, Owned),
            expansion("Seafarers", 325, 13, Wishlist),
            base("Azul", 230802, Wishlist),
        ]
    }

    #[test]
    fn equal_query_reuses_cached_listing() {
        let mut view = LibraryView::new(sample());
        let query = LibraryQuery {
            sort: SortKey::Status,
            ..LibraryQuery::default()
        };

        let first = view.listing(&query).as_ptr();
        let second = view.listing(&query.clone()).as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn changed_query_recomputes() {
        let mut view = LibraryView::new(sample());

        assert_eq!(view.listing(&LibraryQuery::default()).len(), 2);

        let owned_only = LibraryQuery {
            status: StatusFilter::Only(Owned),
            search: "azul".to_string(),
            ..LibraryQuery::default()
        };
        assert!(view.listing(&owned_only).is_empty());
    }

    #[test]
    fn replacing_items_regroups() {
        let mut view = LibraryView::new(sample());
        let query = LibraryQuery::default();
        assert_eq!(view.listing(&query).len(), 2);

        let mut items = sample();
        items.push(base("Brass", 28720, Owned));
        view.set_items(items);

        assert_eq!(view.groups().len(), 3);
        let names: Vec<_> = view.listing(&query).iter().map(|g| g.base.display_title()).collect();
        assert_eq!(names, vec!["Azul", "Brass", "Catan"]);
    }

    #[test]
    fn empty_library_lists_nothing() {
        let mut view = LibraryView::default();
        assert!(view.listing(&LibraryQuery::default()).is_empty());
        assert!(view.items().is_empty());
    }
}
