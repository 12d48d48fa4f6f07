//! Base game / expansion grouping.

use std::collections::HashMap;

use serde::Serialize;

use crate::owned::OwnedItem;
use crate::text::locale_cmp;

/// A base game and the owned expansions attached to it.
///
/// Orphan expansions (whose base game isn't in the library) head a group of
/// their own with no expansions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub base: OwnedItem,
    pub expansions: Vec<OwnedItem>,
    pub total_count: usize,
}

impl Group {
    fn new(base: OwnedItem) -> Self {
        Group {
            base,
            expansions: Vec::new(),
            total_count: 1,
        }
    }

    fn attach(&mut self, expansion: OwnedItem) {
        self.expansions.push(expansion);
        self.total_count += 1;
    }

    /// Base first, then expansions in attachment order.
    pub fn items(&self) -> impl Iterator<Item = &OwnedItem> {
        std::iter::once(&self.base).chain(self.expansions.iter())
    }
}

/// Partition a flat list of owned items into groups.
///
/// Non-expansions seed one group each, keyed by catalog external id.
/// Expansions attach to the group of their declared base, or become a
/// standalone group when that base isn't owned. The result is ordered by the
/// base item's catalog name.
pub fn group_library(items: &[OwnedItem]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut by_external_id: HashMap<i64, usize> = HashMap::new();

    for item in items.iter().filter(|i| !i.is_expansion()) {
        by_external_id.insert(item.catalog.external_id, groups.len());
        groups.push(Group::new(item.clone()));
    }

    for item in items.iter().filter(|i| i.is_expansion()) {
        let slot = item
            .catalog
            .base_external_id
            .and_then(|base_id| by_external_id.get(&base_id).copied());

        match slot {
            Some(idx) => groups[idx].attach(item.clone()),
            None => groups.push(Group::new(item.clone())),
        }
    }

    groups.sort_by(|a, b| {
        locale_cmp(
            &a.base.catalog.display_name(),
            &b.base.catalog.display_name(),
        )
    });
    groups
}
