mod archiver;
mod cli;
mod db;
mod error;
mod fmt;
mod mapper;
mod models;
mod pipeline;
mod settings;
mod sink;
mod transformer;

use clap::Parser;

use cli::run::RunOverrides;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Run {
            inbox,
            archive,
            data_dir,
            chunk_size,
            delimiter,
        } => cli::run::run(RunOverrides {
            inbox,
            archive,
            data_dir,
            chunk_size,
            delimiter,
        }),
        Commands::History { data_dir } => cli::history::run(data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
