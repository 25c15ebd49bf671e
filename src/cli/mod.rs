use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Set the server port
        #[arg(long, env = "PORT", default_value = "8001")]
        port: u16,
    },
    /// Start a chat session in the terminal
    Chat {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

pub async fn run() -> Result<()> {
    // Values in a local .env file are only defaults, the real
    // environment always wins
    dotenv::dotenv().ok();

    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Command::Serve { host, port } => {
            serve::run(host, port).await?;
        }
        Command::Chat {} => {
            chat::run().await?;
        }
    }

    Ok(())
}
