use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod auth;
pub mod init;
pub mod serve;
pub mod slots;

#[derive(Subcommand)]
enum Command {
    /// Create the storage directory and db schema
    Init {},
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "3000")]
        port: String,
    },
    /// Authorize calendar access out-of-band and store the refresh token
    Auth {},
    /// Print the configured slot catalog
    Slots {
        /// Print only slots inside this window (RFC 3339 with offset)
        #[arg(long, requires = "end")]
        start: Option<String>,
        #[arg(long, requires = "start")]
        end: Option<String>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    let storage_path = std::env::var("SLOTBOOK_STORAGE_PATH").unwrap_or("./".to_string());

    // Handle each sub command
    match args.command {
        Some(Command::Init {}) => {
            init::run(&storage_path).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Auth {}) => {
            auth::run().await?;
        }
        Some(Command::Slots { start, end }) => {
            slots::run(start.as_deref(), end.as_deref())?;
        }
        None => {}
    }

    Ok(())
}
