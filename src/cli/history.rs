use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::models::ImportLog;
use crate::settings::load_settings;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = dir;
    }
    let conn = get_connection(&settings.db_path())?;
    init_db(&conn)?;

    let mut stmt = conn.prepare(
        "SELECT id, filename, record_count, checksum, imported_at FROM imports ORDER BY id DESC",
    )?;
    let logs: Vec<ImportLog> = stmt
        .query_map([], |row| {
            Ok(ImportLog {
                id: row.get(0)?,
                filename: row.get(1)?,
                record_count: row.get(2)?,
                checksum: row.get(3)?,
                imported_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<_, _>>()?;

    if logs.is_empty() {
        println!("No files imported yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(["File", "Records", "Imported at", "Checksum"]);
    for log in &logs {
        table.add_row([
            log.filename.clone(),
            log.record_count.to_string(),
            log.imported_at.clone(),
            log.checksum.chars().take(12).collect::<String>(),
        ]);
    }
    println!("{table}");
    Ok(())
}
