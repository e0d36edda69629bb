use colored::Colorize;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{load_settings, save_settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = dir;
    }

    std::fs::create_dir_all(&settings.data_dir)?;
    std::fs::create_dir_all(settings.inbox_path())?;
    std::fs::create_dir_all(settings.archive_path())?;

    let conn = get_connection(&settings.db_path())?;
    init_db(&conn)?;
    save_settings(&settings)?;

    println!("{}", "Ticketeer is ready.".green().bold());
    println!("Data dir:  {}", settings.data_dir);
    println!("Database:  {}", settings.db_path().display());
    println!("Inbox:     {}", settings.inbox_path().display());
    println!("Archive:   {}", settings.archive_path().display());
    println!();
    println!("Drop .{} files in the inbox and run `ticketeer run`.", settings.extension);
    Ok(())
}
