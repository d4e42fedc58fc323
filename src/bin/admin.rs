//! CLI administration tool for clicklink.
//!
//! Inspects the PostgreSQL store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show totals
//! cargo run --bin admin -- stats
//!
//! # Show one record (does not count a click)
//! cargo run --bin admin -- show Xk3_a9Qz
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use clicklink::AppError;
use clicklink::application::services::UrlRegistry;
use clicklink::config::Config;
use clicklink::domain::clock::SystemClock;
use clicklink::infrastructure::persistence::PgUrlRepository;
use clicklink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for inspecting clicklink storage.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show record and click totals
    Stats,

    /// Show the record for a short code
    Show {
        /// Short code to look up
        code: String,
    },

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
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Show { code } => handle_show(&pool, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays record count and total clicks.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let clicks_total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Short URLs:    {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Total clicks:  {}",
        clicks_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Displays one record by code.
async fn handle_show(pool: &PgPool, code: &str) -> Result<()> {
    let registry = UrlRegistry::new(
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomCodeGenerator),
        Arc::new(SystemClock),
        String::new(),
        Duration::from_secs(10),
    );

    let record = match registry.lookup(code).await {
        Ok(record) => record,
        Err(AppError::NotFound { .. }) => {
            println!("{} {}", "No record for code".yellow(), code.cyan());
            return Ok(());
        }
        Err(e) => anyhow::bail!("Database error: {}", e),
    };

    println!("{}", "Short URL".bright_blue().bold());
    println!();
    println!("  Code:      {}", record.short_code.cyan());
    println!("  Short URL: {}", record.short_url.bright_white());
    println!("  Original:  {}", record.original_url.bright_white());
    println!(
        "  Created:   {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Clicks:    {}",
        record.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
