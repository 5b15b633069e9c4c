//! ETH Key Gen command-line front end
//!
//! Picks an entropy mode, collects optional user text, and prints the
//! resulting credential. All derivation happens in the `eth-keygen` crate.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eth_keygen::{Address, CredentialResult, EntropyMode};

#[derive(Parser)]
#[command(name = "eth-keygen")]
#[command(about = "Generate an Ethereum key pair and address from a BIP-39 mnemonic")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the credential as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new credential
    Generate {
        /// Mix this text into the random entropy
        #[arg(long, value_name = "TEXT", conflicts_with = "prompt")]
        user_entropy: Option<String>,

        /// Read the text to mix in from stdin
        #[arg(long)]
        prompt: bool,
    },
    /// Re-derive a credential from a mnemonic phrase read from stdin
    Recover,
    /// Check an address against its EIP-55 checksum
    CheckAddress { address: String },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,eth_keygen=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn prompt_line(message: &str) -> Result<String> {
    eprint!("{} ", message);
    io::stderr().flush().context("failed to flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn render(credential: &CredentialResult, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(credential).context("failed to encode credential")?;
        println!("{}", out);
        return Ok(());
    }

    println!("Ethereum wallet details ({}):", credential.derivation_path());
    println!();
    println!("Recovery phrase:       {}", credential.mnemonic_phrase().as_str());
    println!("Private key:           {}", credential.private_key_hex().as_str());
    println!("Public key:            {}", credential.public_key_uncompressed_hex());
    println!("Compressed public key: {}", credential.public_key_compressed_hex());
    println!("Address:               {}", credential.address());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate { user_entropy, prompt } => {
            let user_entropy = if prompt {
                Some(prompt_line("Enter a text string as additional entropy:")?)
            } else {
                user_entropy
            };
            let credential = match user_entropy {
                None => CredentialResult::generate(EntropyMode::Random)?,
                Some(text) => CredentialResult::generate(EntropyMode::UserSeeded(&text))?,
            };
            render(&credential, cli.json)?;
            info!("wallet generated");
        }
        Commands::Recover => {
            let phrase = prompt_line("Enter the 12-word recovery phrase:")?;
            let credential = CredentialResult::from_phrase(&phrase).context("invalid recovery phrase")?;
            render(&credential, cli.json)?;
        }
        Commands::CheckAddress { address } => {
            if Address::is_valid_checksum(&address) {
                println!("{}: valid checksum", address);
            } else {
                let parsed: Address = address.parse().context("not an Ethereum address")?;
                warn!("address does not carry a valid checksum");
                println!("{}: no valid checksum, expected {}", address, parsed.to_checksum());
            }
        }
    }

    Ok(())
}
