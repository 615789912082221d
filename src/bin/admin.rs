//! CLI administration tool for bloglist.
//!
//! Provides commands for managing users, viewing blog statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new user (password is prompted)
//! cargo run --bin admin -- user create --username mluukkai
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Like and authorship statistics
//! cargo run --bin admin -- stats
//!
//! # Remove expired and revoked sessions
//! cargo run --bin admin -- sessions purge
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `PASSWORD_HASH_ROUNDS` (optional): PBKDF2 iterations for `user create`

use bloglist::application::services::{BlogService, UserService};
use bloglist::domain::list_helper;
use bloglist::domain::repositories::SessionRepository;
use bloglist::infrastructure::persistence::{
    PgBlogRepository, PgSessionRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

const DEFAULT_HASH_ROUNDS: u32 = 100_000;

/// CLI tool for managing bloglist.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show like and authorship statistics
    Stats,

    /// Manage login sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Login name, at least 3 characters
        #[arg(short, long)]
        username: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all users with their blog counts
    List,
}

/// Session subcommands.
#[derive(Subcommand)]
enum SessionAction {
    /// Delete expired and revoked sessions
    Purge {
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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Sessions { action } => handle_session_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> UserService {
    let pool = Arc::new(pool.clone());
    let rounds = std::env::var("PASSWORD_HASH_ROUNDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_HASH_ROUNDS);

    UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgBlogRepository::new(pool)),
        rounds,
    )
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = user_service(pool);

    match action {
        UserAction::Create { username, name } => create_user(&service, username, name).await?,
        UserAction::List => list_users(&service).await?,
    }

    Ok(())
}

/// Registers a user with interactive prompts.
///
/// The password is read twice without echo and goes through the same
/// validation and hashing as `POST /api/users`.
async fn create_user(
    service: &UserService,
    username: Option<String>,
    name: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let name = match name {
        Some(n) => Some(n),
        None => {
            let entered: String = Input::new()
                .with_prompt("Display name (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(entered)
        }
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let user = service
        .register(username, name, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Username: {}", user.username.cyan());
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Username             Name                           Blogs
///   ──────────────────────────────────────────────────────────────
///   1   mluukkai             Matti Luukkainen               2
/// ```
async fn list_users(service: &UserService) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = service
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<5}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Name".bright_white().bold(),
        "Blogs".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    for entry in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            entry.user.id.to_string().bright_black(),
            entry.user.username.cyan(),
            entry.user.name.as_deref().unwrap_or("-"),
            entry.blogs.len().to_string().bright_green()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Runs the list helpers over every stored blog and prints the results.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = BlogService::new(Arc::new(PgBlogRepository::new(Arc::new(pool.clone()))));
    let blogs = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load blogs: {}", e))?;

    println!(
        "  Blogs:        {}",
        blogs.len().to_string().bright_green().bold()
    );
    match list_helper::total_likes(&blogs) {
        Ok(total) => println!(
            "  Total likes:  {}",
            total.to_string().bright_green().bold()
        ),
        Err(e) => println!("  Total likes:  {}", e.to_string().red()),
    }

    match list_helper::favourite_blog(&blogs) {
        Ok(fav) => println!(
            "  Favourite:    {} by {} ({} likes)",
            fav.title.cyan(),
            fav.author,
            fav.likes.to_string().bright_green()
        ),
        Err(e) => println!("  Favourite:    {}", e.to_string().bright_black()),
    }

    match list_helper::most_blogs(&blogs) {
        Ok(top) => println!(
            "  Most blogs:   {} ({} blogs)",
            top.author.cyan(),
            top.count.to_string().bright_green()
        ),
        Err(e) => println!("  Most blogs:   {}", e.to_string().bright_black()),
    }

    match list_helper::most_likes(&blogs) {
        Ok(top) => println!(
            "  Most likes:   {} ({} likes)",
            top.author.cyan(),
            top.likes.to_string().bright_green()
        ),
        Err(e) => println!("  Most likes:   {}", e.to_string().bright_black()),
    }

    println!();

    Ok(())
}

/// Handles session maintenance commands.
async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = PgSessionRepository::new(Arc::new(pool.clone()));

    match action {
        SessionAction::Purge { yes } => {
            println!("{}", "🧹 Purge Sessions".bright_blue().bold());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete all expired and revoked sessions?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let removed = repo
                .purge_expired()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

            println!(
                "{} {}",
                "✅ Sessions removed:".green().bold(),
                removed.to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
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

            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;
            let blogs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
                .fetch_one(pool)
                .await?;
            let sessions: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sessions WHERE revoked_at IS NULL AND expires_at > NOW()",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL:      {}", version.bright_white());
            println!("  Users:           {}", users.to_string().bright_green());
            println!("  Blogs:           {}", blogs.to_string().bright_green());
            println!("  Active sessions: {}", sessions.to_string().bright_green());
            println!();
        }
    }

    Ok(())
}
