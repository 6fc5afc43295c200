use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use mantle_crypto::{KeyRegistry, VerifyingKey};
use mantle_keeper::{MantleConfig, TransactionKeeper, TransactionRequest, TransactionResponse};
use mantle_types::PropertyList;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(args, &cli.format),
        Command::Hash(args) => cmd_hash(args, &cli.format),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MantleConfig> {
    match path {
        Some(path) => MantleConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(MantleConfig::default()),
    }
}

fn load_requests(path: &Path) -> anyhow::Result<Vec<TransactionRequest>> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    TransactionRequest::decode_batch(&json).with_context(|| format!("decoding {}", path.display()))
}

fn parse_key(hex_key: &str) -> anyhow::Result<VerifyingKey> {
    let bytes = hex::decode(hex_key).with_context(|| format!("key {hex_key:?} is not hex"))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("key {hex_key:?} is not 32 bytes"))?;
    Ok(VerifyingKey::from_bytes(bytes)?)
}

/// Execute `requests` in order against a fresh in-memory keeper.
fn run_batch(
    config: MantleConfig,
    keys: &[VerifyingKey],
    requests: &[TransactionRequest],
) -> anyhow::Result<Vec<TransactionResponse>> {
    let mut authority = KeyRegistry::new();
    for key in keys {
        authority.register(key.clone());
    }
    let mut keeper = TransactionKeeper::in_memory(config, Arc::new(authority))?;
    Ok(requests.iter().map(|r| keeper.transact_request(r)).collect())
}

fn cmd_run(args: RunArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let keys = args
        .keys
        .iter()
        .map(|k| parse_key(k))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let requests = load_requests(&args.requests)?;
    debug!(requests = requests.len(), keys = keys.len(), "running batch");
    let responses = run_batch(config, &keys, &requests)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&responses)?),
        OutputFormat::Text => {
            for (i, (request, response)) in requests.iter().zip(&responses).enumerate() {
                print_response(i + 1, request.body.name(), response);
            }
            let committed = responses.iter().filter(|r| r.success).count();
            println!(
                "\n{} of {} transactions committed",
                committed.to_string().bold(),
                responses.len()
            );
        }
    }
    Ok(())
}

fn print_response(n: usize, action: &str, response: &TransactionResponse) {
    if response.success {
        print!("{} #{n} {}", "✓".green().bold(), action.cyan());
        if let Some(created) = &response.created {
            print!("  {}", created.yellow());
        }
        println!();
        for hash in &response.hashes {
            println!("    revealed {}", hash.dimmed());
        }
    } else {
        let kind = response
            .error_kind
            .map(|k| k.to_string())
            .unwrap_or_default();
        println!("{} #{n} {} {}", "✗".red().bold(), action.cyan(), kind.red());
        if let Some(error) = &response.error {
            println!("    {error}");
        }
    }
}

fn cmd_hash(args: HashArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let properties: PropertyList = args.properties.parse()?;
    let hash = properties.hash_id();
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "properties": properties.to_string(), "hash": hash.to_string() })
        ),
        OutputFormat::Text => println!("{}", hash.to_string().yellow()),
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}
