use anyhow::Result;
use boardshelf_core::config::ShelfConfig;
use boardshelf_core::shelf::Shelf;
use owo_colors::OwoColorize;

pub fn run(shelf: &Shelf) -> Result<()> {
    let config_path = ShelfConfig::config_path()?;
    let config = shelf.config();

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!(
        "  Data:      {} ({})",
        shelf.display_path().display(),
        shelf.data_path().display()
    );

    println!();
    println!("{}", "Settings".bold());
    println!("  User:      {}", config.default_user.as_deref().unwrap_or("(none)"));
    println!("  Name:      {}", config.display_name.as_deref().unwrap_or("(none)"));
    println!("  Sort:      {}", config.default_sort);
    println!("  Home:      {}", config.home.as_deref().unwrap_or("(none)"));
    println!("  Radius:    {} km", config.search_radius_km);
    println!("  Timezone:  {}", config.timezone.as_deref().unwrap_or("(local)"));
    match config.reminder_minutes {
        Some(minutes) => println!("  Reminder:  {} min before", minutes),
        None => println!("  Reminder:  (none)"),
    }

    Ok(())
}
