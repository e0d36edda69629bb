use rusqlite::Connection;

use crate::error::{ImportError, Result};
use crate::models::EnrichedRecord;

const INSERT_SQL: &str = "INSERT INTO importacao \
    (cliente, cpf, data, evento, hora_importacao, nascimento, tipo_ingresso, valor, taxa_adm) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// Buffers enriched records and writes them out in fixed-size chunks, one
/// transaction per chunk. Owns the connection for the duration of a flush;
/// the transaction never spans two chunks.
pub struct BatchSink<'c> {
    conn: &'c mut Connection,
    chunk_size: usize,
    buffer: Vec<EnrichedRecord>,
    commits: usize,
    rows_written: usize,
}

impl<'c> BatchSink<'c> {
    pub fn new(conn: &'c mut Connection, chunk_size: usize) -> Self {
        Self {
            conn,
            chunk_size: chunk_size.max(1),
            buffer: Vec::new(),
            commits: 0,
            rows_written: 0,
        }
    }

    /// Accept one record, flushing when the buffer reaches the chunk size.
    pub fn push(&mut self, record: EnrichedRecord) -> Result<()> {
        self.buffer.push(record);
        if self.buffer.len() >= self.chunk_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Commit the buffered chunk atomically. On failure the transaction is
    /// rolled back, the buffer stays intact, and the error propagates.
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let records = self.buffer.len();
        self.write_chunk()
            .map_err(|source| ImportError::Persistence { records, source })?;
        self.commits += 1;
        self.rows_written += records;
        self.buffer.clear();
        Ok(())
    }

    fn write_chunk(&mut self) -> std::result::Result<(), rusqlite::Error> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_SQL)?;
            for rec in &self.buffer {
                stmt.execute(rusqlite::params![
                    rec.record.customer_name,
                    rec.record.tax_id,
                    rec.record.event_date.format("%Y-%m-%d").to_string(),
                    rec.record.event_name,
                    rec.imported_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    rec.record.birth_date.format("%Y-%m-%d").to_string(),
                    rec.record.ticket_type,
                    rec.record.gross_value,
                    rec.admin_fee,
                ])?;
            }
        }
        tx.commit()
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}
