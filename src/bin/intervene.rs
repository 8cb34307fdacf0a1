//! intervene: command-line front end for the Intervene API.
//!
//! Usage:
//!   intervene identify [--params <file>]             Submit an identify job (JSON body from file or stdin)
//!   intervene execute [--params <file>]              Submit an execute job
//!   intervene status <job-id> [--kind <kind>]        Fetch a job status
//!   intervene destroy-connection <provider> <user>   Delete a provider connection
//!   intervene hmac-digest <provider> <user>          Print the HMAC digest for a connection
//!
//! Credentials come from `--private-key` or `INTERVENE_PRIVATE_KEY`.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use intervene::{InterveneClient, InterveneClientBuilder};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const TRACING_TARGET: &str = "intervene::cli";

#[derive(Debug, Parser)]
#[command(name = "intervene", version, about = "Command-line client for the Intervene API")]
struct Cli {
    /// Private API key (defaults to INTERVENE_PRIVATE_KEY).
    #[arg(long, global = true)]
    private_key: Option<String>,

    /// API host (defaults to INTERVENE_HOST, then https://api.intervene.run).
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit an identify job.
    Identify {
        /// JSON file with the request body; reads stdin when omitted or "-".
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Submit an execute job.
    Execute {
        /// JSON file with the request body; reads stdin when omitted or "-".
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Fetch the status of a job.
    Status {
        job_id: String,
        /// Check the job kind and type the result accordingly.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Delete the connection between a user and a provider.
    DestroyConnection { provider: String, user_id: String },
    /// Print the HMAC digest for a user's provider connection.
    HmacDigest { provider: String, user_id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Identify,
    Execute,
}

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(target: TRACING_TARGET, error = %error, "command failed");
    } else {
        eprintln!("Error: {error:#}");
    }
    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let client = build_client(&cli).context("failed to configure client")?;

    match cli.command {
        Command::Identify { params } => {
            let body = read_params(params)?;
            print_json(&client.identify(&body).await?)
        }
        Command::Execute { params } => {
            let body = read_params(params)?;
            print_json(&client.execute(&body).await?)
        }
        Command::Status { job_id, kind } => match kind {
            None => print_json(&client.job_status(&job_id).await?),
            Some(KindArg::Identify) => print_json(&client.identify_job_status(&job_id).await?),
            Some(KindArg::Execute) => print_json(&client.execute_job_status(&job_id).await?),
        },
        Command::DestroyConnection { provider, user_id } => {
            print_json(&client.destroy_connection(&provider, &user_id).await?)
        }
        Command::HmacDigest { provider, user_id } => {
            let digest = client.generate_hmac_digest(&provider, &user_id).await?;
            println!("{digest}");
            Ok(())
        }
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<InterveneClient> {
    let mut builder = InterveneClientBuilder::from_env()?;
    if let Some(key) = &cli.private_key {
        builder = builder.private_key(key);
    }
    if let Some(host) = &cli.host {
        builder = builder.host(host);
    }
    Ok(builder.build()?)
}

fn read_params(path: Option<PathBuf>) -> anyhow::Result<serde_json::Value> {
    read_params_from(path, std::io::stdin())
}

/// Read a JSON body from `path`, or from `stdin` when the path is absent or `-`.
fn read_params_from(
    path: Option<PathBuf>,
    mut stdin: impl Read,
) -> anyhow::Result<serde_json::Value> {
    let raw = match path.filter(|p| p.to_str() != Some("-")) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read params from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("params are not valid JSON")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. Level comes from
/// `RUST_LOG` and defaults to `warn`.
fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}
