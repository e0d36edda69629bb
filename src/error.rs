use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed record at {file}:{line}: {reason}")]
    MalformedRecord {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Cannot transform record {tax_id}: {reason}")]
    Transformation { tax_id: String, reason: String },

    #[error("Failed to commit chunk of {records} records: {source}")]
    Persistence {
        records: usize,
        source: rusqlite::Error,
    },

    #[error("Could not move file to archive: {file}")]
    Archival {
        file: String,
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
