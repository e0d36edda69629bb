pub mod history;
pub mod init;
pub mod run;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ticketeer", about = "Chunked ticket-sale CSV import pipeline.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up ticketeer: choose a data directory and initialize the database.
    Init {
        /// Path for ticketeer data (default: ~/Documents/ticketeer)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Run the import pipeline once, then archive processed files.
    Run {
        /// Directory holding pending source files (default: files)
        #[arg(long)]
        inbox: Option<String>,
        /// Directory receiving processed files (default: imported-files)
        #[arg(long)]
        archive: Option<String>,
        /// Override the data directory holding the database
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Records per transactional chunk (default: 200)
        #[arg(long = "chunk-size")]
        chunk_size: Option<usize>,
        /// Field delimiter (default: ;)
        #[arg(long)]
        delimiter: Option<char>,
    },
    /// List previously imported files.
    History {
        /// Override the data directory holding the database
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
}
