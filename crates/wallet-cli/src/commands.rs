//! Command definitions and handlers.

use alloy_primitives::{Address, B256};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use exchange_core::config::Config;
use exchange_core::db::{self, WalletRepository};
use exchange_core::Signature;
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use wallet::Wallet;

#[derive(Debug, Parser)]
#[command(name = "wallet-cli", version, about = "Exchange wallet tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a new random wallet
    Generate {
        /// Print the storage record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the public details of a private key
    Inspect {
        #[arg(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
        key: String,
    },
    /// Sign a 32-byte digest with the personal-message prefix
    SignHash {
        /// Digest as 64 hex characters
        #[arg(long)]
        digest: String,
        #[arg(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
        key: String,
    },
    /// Check that a signature over a digest belongs to an address
    Verify {
        #[arg(long)]
        address: String,
        #[arg(long)]
        digest: String,
        /// 65-byte signature as hex
        #[arg(long)]
        signature: String,
    },
    /// Store a wallet in the database
    Save {
        #[arg(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
        key: String,
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        operator: bool,
    },
    /// Load a wallet from the database by address
    Show {
        #[arg(long)]
        address: String,
    },
}

impl Command {
    pub async fn run(self) -> Result<()> {
        let output = match self {
            Command::Generate { json } => generate(json)?,
            Command::Inspect { key } => inspect(&key)?,
            Command::SignHash { digest, key } => sign_hash(&key, &digest)?,
            Command::Verify {
                address,
                digest,
                signature,
            } => verify(&address, &digest, &signature)?,
            Command::Save {
                key,
                admin,
                operator,
            } => {
                let pool = connect().await?;
                save(&pool, &key, admin, operator).await?
            }
            Command::Show { address } => {
                let pool = connect().await?;
                show(&pool, &address).await?
            }
        };

        println!("{}", output);
        Ok(())
    }
}

fn generate(as_json: bool) -> Result<String> {
    let wallet = Wallet::new().context("Failed to generate wallet")?;
    info!(address = %wallet.address_string(), "Generated wallet");

    if as_json {
        return Ok(serde_json::to_string_pretty(&wallet.to_record())?);
    }

    Ok(format!(
        "Address:     {}\nPrivate key: {}",
        wallet.address_string(),
        wallet.private_key()
    ))
}

fn inspect(key: &str) -> Result<String> {
    let wallet = Wallet::from_private_key(key).context("Failed to load wallet")?;
    Ok(wallet.to_string())
}

fn sign_hash(key: &str, digest: &str) -> Result<String> {
    let wallet = Wallet::from_private_key(key).context("Failed to load wallet")?;
    let digest = parse_digest(digest)?;

    let signature = wallet.sign_hash(digest)?;

    let output = json!({
        "address": wallet.address_string(),
        "digest": digest,
        "r": signature.r(),
        "s": signature.s(),
        "v": signature.v(),
        "signature": signature.to_string(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn verify(address: &str, digest: &str, signature: &str) -> Result<String> {
    let address: Address = address
        .trim()
        .parse()
        .with_context(|| format!("Invalid address: {}", address))?;
    let digest = parse_digest(digest)?;
    let signature: Signature = signature.parse().context("Invalid signature")?;

    let recovered = signature
        .recover_address(digest)
        .context("Failed to recover signer")?;

    if recovered != address {
        bail!(
            "Signature does not match: expected {}, recovered {}",
            address.to_checksum(None),
            recovered.to_checksum(None)
        );
    }

    Ok(format!("Valid signature from {}", recovered.to_checksum(None)))
}

async fn save(pool: &PgPool, key: &str, admin: bool, operator: bool) -> Result<String> {
    let wallet = Wallet::from_private_key(key)
        .context("Failed to load wallet")?
        .with_roles(admin, operator);

    let repo = WalletRepository::new(pool.clone());
    let id = repo.upsert(&wallet.to_record()).await?;

    Ok(wallet.with_id(id).to_string())
}

async fn show(pool: &PgPool, address: &str) -> Result<String> {
    let repo = WalletRepository::new(pool.clone());
    let record = repo
        .get_by_address(address)
        .await?
        .with_context(|| format!("No wallet stored for {}", address))?;

    let wallet = Wallet::from_record(&record).context("Stored wallet is invalid")?;
    Ok(wallet.to_string())
}

async fn connect() -> Result<PgPool> {
    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database).await?;

    let skip_migrations = std::env::var("SKIP_MIGRATIONS")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if !skip_migrations {
        info!("Running database migrations...");
        db::run_migrations(&pool).await?;
    }

    Ok(pool)
}

fn parse_digest(value: &str) -> Result<B256> {
    value
        .trim()
        .parse::<B256>()
        .with_context(|| format!("Digest must be 32 bytes of hex: {}", value))
}
