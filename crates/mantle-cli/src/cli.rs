use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mantle",
    about = "Mantle asset ledger: run transactions against an in-memory store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute a JSON array of transaction requests in order
    Run(RunArgs),
    /// Print the content hash of a property list
    Hash(HashArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// JSON file holding an array of requests
    pub requests: PathBuf,
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Hex-encoded ed25519 public key allowed to sign (repeatable)
    #[arg(long = "key")]
    pub keys: Vec<String>,
}

#[derive(Args)]
pub struct HashArgs {
    /// Properties as `id:S|value,id:D|1.5`
    pub properties: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
