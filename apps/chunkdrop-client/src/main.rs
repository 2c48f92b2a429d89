//! Chunkdrop Client
//!
//! Waits for the upload server, generates large test files and streams them
//! to the upload endpoint.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chunkdrop_client::generator::generate_file;
use chunkdrop_client::probe::ReadinessProbe;
use chunkdrop_client::uploader::{random_upload_name, upload_file, UploadOutcome};

/// Chunkdrop Client - exercise a running upload server.
#[derive(Parser, Debug)]
#[command(name = "chunkdrop-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the upload server
    #[arg(
        long,
        global = true,
        env = "CHUNKDROP_API_URL",
        default_value = "http://localhost:8000"
    )]
    pub api_url: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available client commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Poll the listing endpoint until the server responds
    Wait {
        /// Number of attempts before giving up
        #[arg(long, default_value = "10")]
        max_retries: u32,

        /// Seconds to wait between attempts
        #[arg(long, default_value = "3")]
        delay: u64,
    },

    /// Write a file filled with `A` bytes
    Generate {
        /// Output path
        #[arg(long, default_value = "large_file.txt")]
        path: PathBuf,

        /// Size in MiB
        #[arg(long, default_value = "4096")]
        size_mb: u64,
    },

    /// Stream a file to the upload endpoint
    Upload {
        /// File to upload
        #[arg(long, default_value = "large_file.txt")]
        path: PathBuf,

        /// Remote filename (defaults to large_file_<random>.txt)
        #[arg(long)]
        name: Option<String>,
    },

    /// Wait for the server, generate a file, then upload it
    Run {
        /// Scratch file path
        #[arg(long, default_value = "large_file.txt")]
        path: PathBuf,

        /// Size in MiB (default: 4GB)
        #[arg(long, default_value = "4096")]
        size_mb: u64,

        /// Number of readiness attempts
        #[arg(long, default_value = "10")]
        max_retries: u32,

        /// Seconds between readiness attempts
        #[arg(long, default_value = "3")]
        delay: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "chunkdrop_client=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Wait { max_retries, delay } => {
            wait(&client, &cli.api_url, max_retries, delay).await?;
        }
        Commands::Generate { path, size_mb } => {
            generate_file(&path, size_mb).await?;
        }
        Commands::Upload { path, name } => {
            let name = name.unwrap_or_else(random_upload_name);
            let outcome = upload_file(&client, &cli.api_url, &path, &name).await?;
            print_outcome(&outcome);
        }
        Commands::Run {
            path,
            size_mb,
            max_retries,
            delay,
        } => {
            wait(&client, &cli.api_url, max_retries, delay).await?;
            generate_file(&path, size_mb).await?;
            let outcome = upload_file(&client, &cli.api_url, &path, &random_upload_name()).await?;
            print_outcome(&outcome);
        }
    }

    Ok(())
}

async fn wait(
    client: &reqwest::Client,
    api_url: &str,
    max_retries: u32,
    delay: u64,
) -> anyhow::Result<()> {
    ReadinessProbe::new(client.clone(), api_url)
        .with_max_retries(max_retries)
        .with_delay(Duration::from_secs(delay))
        .wait()
        .await?;
    println!("API is up and running!");
    Ok(())
}

fn print_outcome(outcome: &UploadOutcome) {
    println!("Upload response: {}", outcome.status.as_u16());
    match &outcome.json {
        Some(json) => println!("Response JSON: {}", json),
        None => println!("Response is not in JSON format."),
    }
}
