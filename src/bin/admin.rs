//! CLI administration tool for tinyurl.
//!
//! Provides commands for managing API tokens, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a token allowed to create and delete urls
//! cargo run --bin admin -- token create --name "Editor" -c create -c delete
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Editor"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Print a slug candidate (no database needed)
//! cargo run --bin admin -- slug generate --length 8
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET`: must match the server, or issued tokens will not validate

use tinyurl::application::services::AuthService;
use tinyurl::config::{Config, load_from_env};
use tinyurl::domain::entities::{Capabilities, Capability};
use tinyurl::domain::repositories::{TokenRepository, UrlRepository};
use tinyurl::infrastructure::persistence::{PgTokenRepository, PgUrlRepository};
use tinyurl::utils::slug_generator::{DEFAULT_SLUG_LENGTH, generate_slug};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinyurl.
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
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Slug utilities
    Slug {
        #[command(subcommand)]
        action: SlugAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Editor", "Import job")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Capability to grant (`create`, `delete`); repeatable
        #[arg(short, long = "capability")]
        capabilities: Vec<Capability>,

        /// Skip prompts; grants every capability when none is given
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and apply pending migrations
    Info,
}

/// Slug subcommands.
#[derive(Subcommand)]
enum SlugAction {
    /// Print a random slug candidate
    Generate {
        /// Slug length (1-255)
        #[arg(short, long, default_value_t = DEFAULT_SLUG_LENGTH)]
        length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Slug { action } => handle_slug_action(action),
        command => run_with_database(command).await,
    }
}

/// Runs commands that need PostgreSQL.
async fn run_with_database(command: Commands) -> Result<()> {
    let config = load_from_env()?;
    let pool = connect(&config).await?;

    match command {
        Commands::Token { action } => handle_token_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Slug { action } => handle_slug_action(action)?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL (or DB_USER/DB_PASSWORD/DB_NAME) must be set")?;

    PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")
}

fn handle_slug_action(action: SlugAction) -> Result<()> {
    match action {
        SlugAction::Generate { length } => {
            let slug = generate_slug(length)?;
            println!("{}", slug);
        }
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            name,
            token,
            capabilities,
            yes,
        } => {
            let auth = AuthService::new(repo, config.token_signing_secret.clone());
            create_token(&auth, name, token, capabilities, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Asks which capabilities to grant, all preselected.
fn prompt_capabilities() -> Result<Capabilities> {
    let names: Vec<&str> = Capability::ALL.iter().map(Capability::as_str).collect();
    let chosen = MultiSelect::new()
        .with_prompt("Capabilities (space to toggle)")
        .items(&names)
        .defaults(&[true; Capability::ALL.len()])
        .interact()?;

    Ok(chosen.into_iter().map(|i| Capability::ALL[i]).collect())
}

/// Creates a new API token with interactive prompts.
///
/// # Security
///
/// - Only the HMAC-SHA256 hash (keyed by `TOKEN_SIGNING_SECRET`) is stored
/// - Raw token is displayed once and cannot be retrieved later
/// - Tokens are 48 characters (alphanumeric) for high entropy
async fn create_token(
    auth: &AuthService<PgTokenRepository>,
    name: Option<String>,
    token: Option<String>,
    requested: Vec<Capability>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Editor")
            .interact_text()?,
    };

    let capabilities: Capabilities = if !requested.is_empty() {
        requested.into_iter().collect()
    } else if skip_confirm {
        Capabilities::all()
    } else {
        prompt_capabilities()?
    };

    if capabilities.is_empty() {
        println!(
            "{}",
            "⚠️  This token grants no capabilities; it can only read".yellow()
        );
    }

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:         {}", token_name.cyan());
    println!(
        "  Capabilities: {}",
        capabilities.to_names().join(", ").cyan()
    );
    println!("  Token:        {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    auth.issue_token(&token_name, &token_value, &capabilities)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -X POST -H \"Authorization: Bearer {}\" -H \"Content-Type: application/json\" \\",
        token_value.bright_yellow()
    );
    println!("       -d '{{\"url\":\"https://example.com\",\"slug\":\"promo\"}}' http://localhost:3000/api/urls");
    println!();

    Ok(())
}

/// Lists all API tokens with capabilities and status.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  Name                      Capabilities     Created              Status
///   ───────────────────────────────────────────────────────────────────────────
///   1   Editor                    create, delete   2024-01-15 10:30     ACTIVE
///   2   Import job                create           2024-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<25} {:<16} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Capabilities".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        let capabilities = if token.capabilities.is_empty() {
            "-".to_string()
        } else {
            token.capabilities.join(", ")
        };

        println!(
            "  {:<3} {:<25} {:<16} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            capabilities,
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays url and token counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());

    let urls_count = PgUrlRepository::new(pool.clone())
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count urls: {}", e))?;

    let tokens = PgTokenRepository::new(pool)
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;
    let active_tokens = tokens.iter().filter(|t| !t.is_revoked()).count();

    println!(
        "  Urls:          {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        active_tokens.to_string().bright_green().bold()
    );
    println!(
        "  Revoked:       {}",
        (tokens.len() - active_tokens).to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            PgUrlRepository::new(Arc::new(pool.clone()))
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());

            tinyurl::server::migrate(pool).await?;
            println!("  Migrations: {}", "up to date".green());
            println!();
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
/// - Entropy: ~286 bits
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
