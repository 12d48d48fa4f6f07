use anyhow::Result;
use boardshelf_core::SessionContext;
use boardshelf_core::library::{GameTypeFilter, LibraryQuery, LibraryView, SortKey, StatusFilter};
use boardshelf_core::shelf::{RecordSource, Shelf};
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub struct LibraryArgs {
    pub search: Option<String>,
    pub status: StatusFilter,
    pub game_type: GameTypeFilter,
    pub sort: Option<SortKey>,
    pub json: bool,
}

pub async fn run(shelf: &Shelf, session: &SessionContext, args: LibraryArgs) -> Result<()> {
    let items = shelf.owned_items(session).await?;
    let mut view = LibraryView::new(items);
    let library_empty = view.items().is_empty();

    let query = LibraryQuery {
        search: args.search.unwrap_or_default(),
        status: args.status,
        game_type: args.game_type,
        sort: args.sort.unwrap_or(shelf.config().default_sort),
    };

    let groups = view.listing(&query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        if library_empty {
            println!(
                "{}",
                format!("No games in {}'s library", session.name()).dimmed()
            );
        } else {
            println!("{}", "No games match".dimmed());
        }
        return Ok(());
    }

    for group in groups {
        println!("{}", group.render());
    }

    let item_count: usize = groups.iter().map(|g| g.total_count).sum();
    println!();
    println!(
        "{}",
        format!(
            "{} {}, {} {} · sorted by {}",
            groups.len(),
            pluralize("group", groups.len()),
            item_count,
            pluralize("item", item_count),
            query.sort
        )
        .dimmed()
    );

    Ok(())
}
