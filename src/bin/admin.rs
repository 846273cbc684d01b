//! CLI administration tool for domain-locale.
//!
//! Validates site configurations, dry-runs the language negotiation for a
//! host and path, and creates editor tokens, without starting the server.
//!
//! # Usage
//!
//! ```bash
//! # Validate the site configuration and list domains and languages
//! cargo run --bin admin -- config check
//!
//! # Show what the front door would do for a request
//! cargo run --bin admin -- resolve --host example.ca --path / --accept-language fr
//!
//! # Create an editor token and print its hash
//! cargo run --bin admin -- token generate --editor alice
//!
//! # Hash an existing token
//! cargo run --bin admin -- token hash "<TOKEN>"
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_CONFIG` (optional): site JSON, the bundled configuration otherwise
//! - `TOKEN_SIGNING_SECRET` (required for `token`): HMAC key for editor tokens

use domain_locale::application::services::Decision;
use domain_locale::domain::{CurrentUser, RawRequest, SiteConfig};
use domain_locale::infrastructure::cache::NullCache;
use domain_locale::infrastructure::memory::{MemoryContentRepository, MemoryTokenRepository};
use domain_locale::state::AppState;
use domain_locale::utils::token::{generate_token, hash_token};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing domain-locale.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Site configuration file (overrides SITE_CONFIG)
    #[arg(long, global = true)]
    site: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Site configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Dry-run the negotiation for one request
    Resolve {
        /// Request host, e.g. example.ca
        #[arg(long)]
        host: String,

        /// Request path, optionally with a query string
        #[arg(long, default_value = "/")]
        path: String,

        /// Accept-Language header value
        #[arg(short = 'l', long)]
        accept_language: Option<String>,

        /// Resolve as this authenticated editor
        #[arg(long)]
        editor: Option<String>,
    },

    /// Manage editor tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate the site configuration
    Check,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Generate a new editor token
    Generate {
        /// Editor id the token belongs to
        #[arg(short, long, default_value = "editor")]
        editor: String,
    },

    /// Print the hash of an existing token
    Hash {
        /// Raw token value
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Check => check_config(cli.site)?,
        },
        Commands::Resolve {
            host,
            path,
            accept_language,
            editor,
        } => resolve(cli.site, host, path, accept_language, editor).await?,
        Commands::Token { action } => handle_token_action(action)?,
    }

    Ok(())
}

fn load_site(path: Option<PathBuf>) -> Result<SiteConfig> {
    let path = path.or_else(|| {
        std::env::var("SITE_CONFIG")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    match path {
        Some(path) => SiteConfig::from_file(&path)
            .with_context(|| format!("Failed to load site configuration {}", path.display())),
        None => SiteConfig::bundled().context("Failed to load bundled site configuration"),
    }
}

fn signing_secret() -> Result<String> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    if secret.is_empty() {
        anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
    }
    Ok(secret)
}

/// Validates the site configuration and prints its domains and languages.
fn check_config(path: Option<PathBuf>) -> Result<()> {
    println!("{}", "Site configuration".bright_blue().bold());
    println!();

    let site = load_site(path)?;
    if let Err(e) = site.validate() {
        println!("{} {}", "✗".red().bold(), e.to_string().red());
        anyhow::bail!("Site configuration is invalid");
    }

    println!("{}", "Domains:".bright_white().bold());
    for domain in &site.domains {
        let marker = if domain.is_default {
            " (default)".green()
        } else {
            "".normal()
        };
        println!(
            "  {:<14} {:<28} {}{}",
            domain.id.cyan(),
            domain.base_url,
            domain.langcodes.join(", ").bright_yellow(),
            marker
        );
    }
    println!();

    println!("{}", "Languages:".bright_white().bold());
    for language in &site.languages {
        let flag = if language.is_neutral() {
            " (neutral)".bright_black()
        } else {
            "".normal()
        };
        println!("  {:<8} {}{}", language.id.cyan(), language.name, flag);
    }
    println!();

    println!(
        "{} {} domains, {} languages, {} prefix aliases",
        "✓".green().bold(),
        site.domains.len(),
        site.languages.len(),
        site.prefix_aliases.len()
    );

    Ok(())
}

/// Runs the decision engine and switcher for one request against the site content.
async fn resolve(
    path: Option<PathBuf>,
    host: String,
    request_path: String,
    accept_language: Option<String>,
    editor: Option<String>,
) -> Result<()> {
    let site = load_site(path)?;
    let content = Arc::new(MemoryContentRepository::new(&site.content));
    let tokens = Arc::new(MemoryTokenRepository::new(&site.editors));
    let state = AppState::new(
        site,
        content.clone(),
        content,
        tokens,
        Arc::new(NullCache::new()),
        String::new(),
    )?;

    let (path_only, query) = match request_path.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q)),
        None => (request_path.clone(), None),
    };

    let mut raw = RawRequest::new(host, path_only)
        .with_query(domain_locale::utils::url::parse_query(query));
    if let Some(value) = accept_language {
        raw = raw.with_accept_language(value);
    }
    if let Some(id) = editor {
        raw = raw.with_user(CurrentUser { id });
    }

    let ctx = state.context_builder.build(raw).await?;

    println!("{}", "Request context".bright_blue().bold());
    println!("  Domain:            {}", ctx.current_domain.id.cyan());
    println!("  Browser langcode:  {}", ctx.browser_langcode.cyan());
    println!(
        "  Path langcode:     {}",
        ctx.requested_langcode.as_deref().unwrap_or("-")
    );
    println!("  Canonical path:    {}", ctx.canonical_path);
    println!(
        "  Route:             {}",
        ctx.route.as_ref().map_or("-", |r| r.path.as_str())
    );
    println!("  Admin route:       {}", ctx.is_admin_route);
    println!();

    let decision = state.negotiator.decide(&ctx)?;

    println!("{}", "Decision".bright_blue().bold());
    match &decision {
        Decision::Redirect {
            location,
            langcode,
            reason,
        } => {
            println!("  {} {}", "307 →".yellow().bold(), location.bright_yellow());
            println!("  Langcode: {}  Reason: {:?}", langcode.cyan(), reason);
        }
        Decision::Serve { langcode, reason } => {
            println!("  {} {}", "200".green().bold(), langcode.cyan());
            println!("  Reason: {:?}", reason);

            let links = state
                .switcher
                .build_switcher_links(&ctx, langcode)
                .await?;
            println!();
            println!("{}", "Switcher".bright_blue().bold());
            for link in &links {
                println!("  {:<8} {:<18} {}", link.langcode.cyan(), link.title, link.href());
            }
        }
    }

    println!();
    println!(
        "  Cacheable: {}",
        if ctx.caching_disabled() {
            "no".red()
        } else {
            "yes".green()
        }
    );

    Ok(())
}

/// Dispatches token management commands.
fn handle_token_action(action: TokenAction) -> Result<()> {
    let secret = signing_secret()?;

    match action {
        TokenAction::Generate { editor } => {
            let token = generate_token()
                .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))?;
            let token_hash = hash_token(&secret, &token);

            println!("{}", "Editor token".bright_blue().bold());
            println!();
            println!("  Editor: {}", editor.cyan());
            println!("  Token:  {}", token.bright_yellow().bold());
            println!("  Hash:   {}", token_hash);
            println!();
            println!(
                "{}",
                "IMPORTANT: Save this token now! Only the hash is stored."
                    .red()
                    .bold()
            );
            println!();
            println!("{}", "Site configuration entry:".bright_white());
            println!(
                "  {}",
                serde_json::json!({ "id": editor, "token_hash": token_hash })
            );
            println!();
            println!("{}", "Or, with a database:".bright_white());
            println!(
                "  INSERT INTO editor_tokens (token_hash, editor_id) VALUES ('{}', '{}');",
                token_hash,
                editor.replace('\'', "''")
            );
        }
        TokenAction::Hash { token } => {
            println!("{}", hash_token(&secret, &token));
        }
    }

    Ok(())
}
