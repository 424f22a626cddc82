// CLI module for server startup and administrative operations

pub mod export;
pub mod migrate;
pub mod seed;

use clap::{Parser, Subcommand};

/// Ephrathah membership backend
#[derive(Parser)]
#[command(name = "ephrathah-backend")]
#[command(about = "Membership management backend and administrative CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations and start the HTTP server (default)
    Serve,

    /// Run pending database migrations and exit
    Migrate,

    /// Create the demo accounts, skipping usernames that already exist
    Seed,

    /// Write the user roster as CSV
    ExportCsv {
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

impl Cli {
    /// The requested command, `serve` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
