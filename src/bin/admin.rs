//! CLI administration tool for contacts-api.
//!
//! Manages accounts, prints statistics and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a confirmed administrator
//! cargo run --bin admin -- user create --username root --email root@example.com --role administrator
//!
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Change a role
//! cargo run --bin admin -- user set-role alice moderator
//!
//! # Deactivate an account
//! cargo run --bin admin -- user deactivate alice
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
//! - `DATABASE_URL` (or `DB_HOST`/`DB_USER`/... ): PostgreSQL connection
//! - `REDIS_URL` (or `REDIS_HOST`/...): cache shared with the API server.
//!   Role and activation changes evict the cached user so the server sees
//!   them on the next request.

use contacts_api::application::services::{UserCache, UserService};
use contacts_api::config::{Config, DEFAULT_CACHE_TTL_SECONDS, mask_connection_string};
use contacts_api::domain::entities::{NewUser, Role};
use contacts_api::domain::repositories::{ContactRepository, ImageRepository, UserRepository};
use contacts_api::infrastructure::persistence::{
    PgContactRepository, PgImageRepository, PgUserRepository,
};
use contacts_api::server::connect_cache;
use contacts_api::infrastructure::security::PasswordHasher;
use contacts_api::utils::gravatar::gravatar_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing contacts-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all accounts
    List,

    /// Create a confirmed account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Password (generated if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// administrator, moderator or user
        #[arg(short, long, default_value = "user")]
        role: Role,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Change a user's role
    SetRole { username: String, role: Role },

    /// Allow a user to log in again
    Activate { username: String },

    /// Block a user from logging in
    Deactivate { username: String },
}

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

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// User service backed by the same cache as the API server.
async fn user_service(repo: Arc<PgUserRepository>) -> UserService {
    let redis_url = Config::load_redis_url();
    let cache = connect_cache(redis_url.as_deref(), DEFAULT_CACHE_TTL_SECONDS).await;

    if redis_url.is_some() && !cache.is_persistent() {
        println!(
            "{}",
            "⚠️  Redis is unreachable; the server may keep serving a cached copy of this user"
                .yellow()
        );
    }

    UserService::new(repo, UserCache::new(cache, DEFAULT_CACHE_TTL_SECONDS))
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::List => list_users(repo).await?,
        UserAction::Create {
            username,
            email,
            password,
            role,
            yes,
        } => create_user(repo, username, email, password, role, yes).await?,
        UserAction::SetRole { username, role } => {
            set_role(&user_service(repo).await, &username, role).await?
        }
        UserAction::Activate { username } => {
            set_active(&user_service(repo).await, &username, true).await?
        }
        UserAction::Deactivate { username } => {
            set_active(&user_service(repo).await, &username, false).await?
        }
    }

    Ok(())
}

/// Lists accounts with role and status.
///
/// ```text
/// 👥 Users
///
///   ID  Username             Email                          Role           Status
///   ───────────────────────────────────────────────────────────────────────────────
///   1   root                 root@example.com               administrator  ACTIVE
///   2   alice                alice@example.com              user           UNCONFIRMED
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
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
        "  {:<3} {:<20} {:<30} {:<14} {:<10}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(81).bright_black());

    for user in &users {
        let status = if !user.is_active {
            "INACTIVE".red()
        } else if !user.is_email_confirmed {
            "UNCONFIRMED".yellow()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<20} {:<30} {:<14} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.role.as_str(),
            status
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates an account that can log in immediately.
///
/// Prompts for missing username and email. A random password is generated
/// and displayed once when none is given.
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Role,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email: String = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = email.trim().to_lowercase();

    let (password, generated) = match password {
        Some(p) => (p, false),
        None => (generate_password(), true),
    };

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!("  Role:     {}", role.as_str().cyan());
    if generated {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  Save this password now! It is not stored in plain text."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let hasher = PasswordHasher::new().context("Failed to initialize password hasher")?;
    let password_hash = hasher
        .hash(&password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = repo
        .create(NewUser {
            username,
            avatar: Some(gravatar_url(&email)),
            email,
            password_hash,
            role,
            is_email_confirmed: true,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id
    );
    println!();

    Ok(())
}

async fn set_role(service: &UserService, username: &str, role: Role) -> Result<()> {
    service
        .set_role(username, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to set role: {}", e))?;

    println!(
        "{} {} is now {}",
        "✅".green(),
        username.cyan(),
        role.as_str().bright_white().bold()
    );

    Ok(())
}

/// Deactivation asks for confirmation (default: No) and signs the user out.
async fn set_active(service: &UserService, username: &str, active: bool) -> Result<()> {
    let user = service
        .get_by_username(username)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if user.is_active == active {
        let state = if active { "active" } else { "inactive" };
        println!("{}", format!("⚠️  {} is already {}", username, state).yellow());
        return Ok(());
    }

    if !active {
        let confirmed = Confirm::new()
            .with_prompt(format!("Deactivate {}?", username))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .change_activation(username, active)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update user: {}", e))?;

    let verb = if active { "activated" } else { "deactivated" };
    println!("{} {} {}", "✅".green(), username.cyan(), verb);

    Ok(())
}

/// Displays user, contact and image counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let users = PgUserRepository::new(pool.clone());
    let contacts = PgContactRepository::new(pool.clone());
    let images = PgImageRepository::new(pool.clone());

    let users_count = users
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;
    let contacts_count = contacts
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count contacts: {}", e))?;
    let images_count = images
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count images: {}", e))?;
    let inactive_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE NOT is_active")
            .fetch_one(pool.as_ref())
            .await?;

    println!(
        "  Users:          {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Inactive users: {}",
        inactive_count.to_string().bright_green().bold()
    );
    println!(
        "  Contacts:       {}",
        contacts_count.to_string().bright_green().bold()
    );
    println!(
        "  Images:         {}",
        images_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

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
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Random 20-character password from letters, digits and a few symbols.
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] =
        b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%^&*";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
