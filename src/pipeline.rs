use std::io::BufReader;
use std::path::Path;

use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::archiver::source_files;
use crate::error::{ImportError, Result};
use crate::mapper::map_record;
use crate::settings::Settings;
use crate::sink::BatchSink;
use crate::transformer::{enrich, FeeSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NotStarted,
    Running,
    Completed,
    Failed,
}

/// Outcome of one successful run, for the caller to report on.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub records_written: usize,
    pub chunks_committed: usize,
    pub gross_total: f64,
    pub fee_total: f64,
}

struct FileOutcome {
    records: usize,
    chunks: usize,
    gross: f64,
    fees: f64,
}

/// Drives mapper -> transformer -> sink over every matching inbox file, in
/// name order, one file at a time. A run either completes or fails; there is
/// no internal retry, the caller re-invokes a fresh run after fixing the
/// source data.
pub struct ImportPipeline {
    settings: Settings,
    fees: FeeSchedule,
    status: RunStatus,
}

impl ImportPipeline {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            fees: FeeSchedule::default(),
            status: RunStatus::NotStarted,
        }
    }

    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Run once and report. The first failure in any stage is terminal.
    pub fn run(&mut self, conn: &mut Connection) -> Result<RunReport> {
        self.status = RunStatus::Running;
        let result = self.run_inner(conn);
        self.status = match result {
            Ok(_) => RunStatus::Completed,
            Err(_) => RunStatus::Failed,
        };
        result
    }

    fn run_inner(&self, conn: &mut Connection) -> Result<RunReport> {
        // The csv reader takes a single-byte delimiter; anything wider would
        // be silently truncated.
        if !self.settings.delimiter.is_ascii() {
            return Err(ImportError::Settings(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.settings.delimiter
            )));
        }

        let mut report = RunReport::default();
        for path in source_files(&self.settings.inbox_path(), &self.settings.extension)? {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let checksum = compute_checksum(&path)?;
            if already_imported(conn, &checksum)? {
                report.files_skipped += 1;
                continue;
            }

            let outcome = self.process_file(conn, &path, &name)?;
            conn.execute(
                "INSERT INTO imports (filename, record_count, checksum) VALUES (?1, ?2, ?3)",
                rusqlite::params![name, outcome.records as i64, checksum],
            )?;

            report.files_processed += 1;
            report.records_written += outcome.records;
            report.chunks_committed += outcome.chunks;
            report.gross_total += outcome.gross;
            report.fee_total += outcome.fees;
        }
        Ok(report)
    }

    fn process_file(&self, conn: &mut Connection, path: &Path, name: &str) -> Result<FileOutcome> {
        let file = std::fs::File::open(path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.settings.delimiter as u8)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut sink = BatchSink::new(conn, self.settings.chunk_size);
        let mut gross = 0.0;
        let mut fees = 0.0;
        for result in rdr.records() {
            let record = result?;
            let is_comment = record
                .get(0)
                .map_or(false, |f| f.trim_start().starts_with(&self.settings.comment_prefix));
            if is_comment {
                continue;
            }
            let line = record.position().map_or(0, |p| p.line());
            let mapped = map_record(name, line, &record)?;
            let enriched = enrich(mapped, &self.fees)?;
            gross += enriched.record.gross_value;
            fees += enriched.admin_fee;
            sink.push(enriched)?;
        }
        sink.flush()?;

        Ok(FileOutcome {
            records: sink.rows_written(),
            chunks: sink.commits(),
            gross,
            fees,
        })
    }
}

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

fn already_imported(conn: &Connection, checksum: &str) -> Result<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM imports WHERE checksum = ?1")?;
    Ok(stmt.exists([checksum])?)
}
