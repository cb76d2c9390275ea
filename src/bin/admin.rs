//! CLI administration tool for tinylink.
//!
//! Manages links and inspects the database without going through the HTTP
//! API. Uses the same services as the server, so validation and code
//! allocation behave identically.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link
//! cargo run --bin admin -- links show promo24
//!
//! # Create a link with a generated or custom code
//! cargo run --bin admin -- links create https://example.com --code promo24
//!
//! # Delete a link
//! cargo run --bin admin -- links delete promo24
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`DATABASE_URL` or `DB_*`, `BASE_URL`, ...).

use tinylink::application::services::LinkService;
use tinylink::config::{self, Config};
use tinylink::domain::entities::Link;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::server::connect_pool;
use tinylink::web::view::format_last_clicked;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylink.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show one link with its statistics
    Show {
        /// Short code
        code: String,
    },

    /// Create a short link
    Create {
        /// Destination URL
        url: String,

        /// Custom code (6-8 letters or digits); generated if omitted
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    let result = match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &config).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::with_timeout(
        Arc::new(pool.clone()),
        config.store_timeout(),
    ));
    let service = LinkService::new(repo);
    let base_url = config.base_url.trim_end_matches('/');

    match action {
        LinkAction::List => list_links(&service, base_url).await,
        LinkAction::Show { code } => show_link(&service, base_url, &code).await,
        LinkAction::Create { url, code } => {
            create_link(&service, base_url, &url, code.as_deref()).await
        }
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await,
    }
}

/// Lists all links in a table.
///
/// ```text
/// 🔗 Links
///
///   Code      Clicks   Last clicked     URL
///   ──────────────────────────────────────────────────────────────
///   promo24   1,204    5 min ago        https://example.com/spring
/// ```
async fn list_links(service: &LinkService<PgLinkRepository>, base_url: &str) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<16} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last clicked".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let now = Utc::now();
    for link in &links {
        println!(
            "  {:<9} {:<8} {:<16} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            format_last_clicked(link.last_clicked, now).bright_black(),
            link.url
        );
    }

    println!();
    println!(
        "  Total: {}  (short links live under {})",
        links.len().to_string().bright_white().bold(),
        base_url.bright_black()
    );
    println!();

    Ok(())
}

async fn show_link(
    service: &LinkService<PgLinkRepository>,
    base_url: &str,
    code: &str,
) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    print_link(&link, base_url);
    Ok(())
}

/// Creates a link through the same path as the API.
async fn create_link(
    service: &LinkService<PgLinkRepository>,
    base_url: &str,
    url: &str,
    code: Option<&str>,
) -> Result<()> {
    println!("{}", "✨ Create Link".bright_blue().bold());
    println!();

    let link = service
        .create_link(Some(url), code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_link(&link, base_url);

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    service: &LinkService<PgLinkRepository>,
    code: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    println!("  Code:   {}", link.code.cyan());
    println!("  URL:    {}", link.url);
    println!("  Clicks: {}", link.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? Its statistics are lost as well")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

fn print_link(link: &Link, base_url: &str) {
    let last_clicked = match link.last_clicked {
        Some(ts) => format!(
            "{} ({})",
            format_last_clicked(Some(ts), Utc::now()),
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => "Never".to_string(),
    };

    println!("  Short URL:    {}", link.short_url(base_url).bright_yellow().bold());
    println!("  Code:         {}", link.code.cyan());
    println!("  URL:          {}", link.url);
    println!("  Clicks:       {}", link.clicks.to_string().bright_green());
    println!("  Last clicked: {}", last_clicked);
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
    );
    println!();
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let (links, clicks): (i64, i64) =
                sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(clicks), 0)::BIGINT FROM links")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
