//! CLI administration tool for fingerprint-shortener.
//!
//! Works directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten "https://example.com/page" --host s.example.com --scheme https
//!
//! # Resolve a token
//! cargo run --bin admin -- resolve 9e107d9d372bb6826bd81d3542a419d6
//!
//! # Fetch a record by row id
//! cargo run --bin admin -- row 1
//!
//! # Compute a token without touching the database
//! cargo run --bin admin -- fingerprint "https://example.com/page"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `config::Config`. Only `DATABASE_URL`,
//! `COLLISION_POLICY` and the `DB_*` pool settings matter here.

use fingerprint_shortener::application::services::ShortenerService;
use fingerprint_shortener::config::{self, Config};
use fingerprint_shortener::domain::entities::{HostContext, ShortenOutcome};
use fingerprint_shortener::domain::fingerprint::fingerprint;
use fingerprint_shortener::infrastructure::cache::NullCache;
use fingerprint_shortener::infrastructure::persistence::{SqliteUrlRepository, pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing fingerprint-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL (or return its existing short link)
    Shorten {
        /// URL to shorten
        url: String,

        /// Scheme of the published short URL
        #[arg(long, default_value = "http")]
        scheme: String,

        /// Host (with optional port) of the published short URL
        #[arg(long, default_value = "localhost:8080")]
        host: String,
    },

    /// Resolve a token to its original URL
    Resolve {
        /// 32-character token
        token: String,
    },

    /// Show the record stored under a row id
    Row {
        /// Internal row id
        id: i64,
    },

    /// Print the token for a URL without touching the database
    Fingerprint {
        /// URL to fingerprint
        url: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Fingerprint { url } = &cli.command {
        println!("{}", fingerprint(url));
        return Ok(());
    }

    let config = config::load_from_env()?;
    let pool = open_database(&config).await?;

    match cli.command {
        Commands::Shorten { url, scheme, host } => {
            handle_shorten(service(&pool, &config), &url, HostContext::new(scheme, host)).await?
        }
        Commands::Resolve { token } => handle_resolve(service(&pool, &config), &token).await?,
        Commands::Row { id } => handle_row(service(&pool, &config), id).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Fingerprint { .. } => {}
    }

    Ok(())
}

async fn open_database(config: &Config) -> Result<SqlitePool> {
    let pool = pool::connect(config)
        .await
        .context("Failed to connect to database")?;

    pool::migrate(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

fn service(pool: &SqlitePool, config: &Config) -> ShortenerService<SqliteUrlRepository> {
    let repository =
        SqliteUrlRepository::with_collision_policy(pool.clone(), config.collision_policy);
    ShortenerService::new(Arc::new(repository), Arc::new(NullCache::new()))
}

/// Shortens a URL and prints the short link.
async fn handle_shorten(
    service: ShortenerService<SqliteUrlRepository>,
    url: &str,
    host: HostContext,
) -> Result<()> {
    let short = service
        .shorten(url, &host)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten: {}", e))?;

    let status = match short.outcome {
        ShortenOutcome::Stored => "stored".green(),
        ShortenOutcome::Deduplicated => "already present".yellow(),
    };

    println!("  Original:  {}", short.original.cyan());
    println!("  Shortened: {}", short.shortened.bright_white().bold());
    println!("  Token:     {}", short.fingerprint.bright_black());
    println!("  Status:    {}", status);

    Ok(())
}

/// Resolves a token and prints the original URL.
async fn handle_resolve(service: ShortenerService<SqliteUrlRepository>, token: &str) -> Result<()> {
    match service.resolve(token).await {
        Ok(original) => println!("{}", original),
        Err(e) => {
            println!("{}", format!("{}", e).red());
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Prints the record stored under a row id.
async fn handle_row(service: ShortenerService<SqliteUrlRepository>, id: i64) -> Result<()> {
    let record = service
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  ID:          {}", record.id.to_string().bright_black());
    println!("  Original:    {}", record.original.cyan());
    println!("  Fingerprint: {}", record.fingerprint.bright_white());
    println!(
        "  Created:     {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of stored URLs
/// - Timestamp of the most recent one
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let latest: Option<String> = sqlx::query_scalar("SELECT MAX(created_at) FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  URLs:   {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Latest: {}",
        latest.unwrap_or_else(|| "-".to_string()).bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());
            sqlx::query("SELECT 1").fetch_one(pool).await?;
            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Journal mode: {}", journal_mode.bright_white());
            println!();
        }
    }

    Ok(())
}
