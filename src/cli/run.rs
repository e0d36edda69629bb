use colored::Colorize;

use crate::archiver::archive_inbox;
use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::fmt::money;
use crate::pipeline::ImportPipeline;
use crate::settings::load_settings;

pub struct RunOverrides {
    pub inbox: Option<String>,
    pub archive: Option<String>,
    pub data_dir: Option<String>,
    pub chunk_size: Option<usize>,
    pub delimiter: Option<char>,
}

pub fn run(overrides: RunOverrides) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = overrides.data_dir {
        settings.data_dir = dir;
    }
    if let Some(inbox) = overrides.inbox {
        settings.inbox_dir = inbox;
    }
    if let Some(archive) = overrides.archive {
        settings.archive_dir = archive;
    }
    if let Some(chunk_size) = overrides.chunk_size {
        settings.chunk_size = chunk_size;
    }
    if let Some(delimiter) = overrides.delimiter {
        settings.delimiter = delimiter;
    }

    std::fs::create_dir_all(&settings.data_dir)?;
    let mut conn = get_connection(&settings.db_path())?;
    init_db(&conn)?;

    let mut pipeline = ImportPipeline::new(settings.clone());
    let report = pipeline.run(&mut conn)?;

    println!(
        "{} {} file(s), {} record(s) in {} chunk(s)",
        "Imported".green().bold(),
        report.files_processed,
        report.records_written,
        report.chunks_committed,
    );
    if report.files_skipped > 0 {
        println!("{} {} file(s) already imported", "Skipped".yellow(), report.files_skipped);
    }
    println!("Gross: {}   Admin fees: {}", money(report.gross_total), money(report.fee_total));

    // Archival only runs after a completed pipeline.
    let moved = archive_inbox(&settings)?;
    for name in &moved {
        println!("Archived: {name}");
    }
    if moved.is_empty() {
        println!("Nothing to archive.");
    }
    Ok(())
}
