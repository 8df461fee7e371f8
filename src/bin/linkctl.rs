//! Command-line companion for link-redirector.
//!
//! Runs the same resolution and rendering code as the HTTP service, against
//! the store configured in the environment, without starting a server.
//!
//! # Usage
//!
//! ```bash
//! # Show how a path resolves and where it would redirect
//! cargo run --bin linkctl -- resolve /Promo --query utm_campaign=spring
//!
//! # Render a QR code to a file
//! cargo run --bin linkctl -- qr https://example.com --output promo.svg
//!
//! # Check store connectivity
//! cargo run --bin linkctl -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `REDIS_URL` / `REDIS_HOST`, `LINKS_FILE`, `HOME_URL`,
//! `SLUG_PATTERN`, `RESERVED_SLUGS`, `REDIRECT_WITH_QUERY`, `CASE_SENSITIVE`, ...

use link_redirector::application::policy::RedirectPolicy;
use link_redirector::application::services::redirect_target::{
    QR_FLAG, qr_target, redirect_target, wants_qr,
};
use link_redirector::application::services::{LinkResolver, QrRenderer, Resolution};
use link_redirector::config;
use link_redirector::infrastructure::qr::QrCodeEncoder;
use link_redirector::server::build_backends;
use link_redirector::utils::query::QueryPairs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for inspecting link-redirector behaviour.
#[derive(Parser)]
#[command(name = "linkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path against the configured store
    Resolve {
        /// Request path, e.g. "/promo" or "promo"
        path: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// Render text as an SVG QR code
    Qr {
        /// Text to encode, usually a URL
        text: String,

        /// Write the SVG to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check link store connectivity
    Check,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { path, query } => handle_resolve(&path, query).await?,
        Commands::Qr { text, output } => handle_qr(&text, output).await?,
        Commands::Check => handle_check().await?,
    }

    Ok(())
}

/// Resolves `path` and prints the outcome the HTTP service would produce.
async fn handle_resolve(path: &str, query: QueryPairs) -> Result<()> {
    let config = config::load_from_env()?;
    let policy = Arc::new(RedirectPolicy::from_config(&config)?);
    let backends = build_backends(&config).await?;
    let resolver = LinkResolver::new(backends.store, policy.clone());

    let path = normalize_path(path);
    println!("{} {}", "Resolving".bright_blue().bold(), path.cyan());
    println!();

    let resolution = resolver
        .resolve(&path)
        .await
        .context("Link store lookup failed")?;

    match resolution {
        Resolution::Home(url) => {
            println!("{}", "Home redirect".green().bold());
            println!("  Status:   {}", "302".bright_white());
            println!("  Location: {}", url.bright_yellow());
        }
        Resolution::NoMatch => {
            println!("{}", "No match (404)".red().bold());
        }
        Resolution::Found(resolved) => {
            println!("{}", "Link found".green().bold());
            println!("  Slug:     {}", resolved.slug.cyan());
            println!("  URL:      {}", resolved.link.url);
            if resolved.used_fallback {
                println!("  {}", "Found via original-case fallback".yellow());
            }
            println!();

            if wants_qr(&query) {
                let target = qr_target(&resolved.link, &query, policy.redirect_with_query);
                println!("{} ({}=true)", "QR image".bright_white().bold(), QR_FLAG);
                println!("  Encodes:  {}", target.bright_yellow());
            } else {
                let target = redirect_target(&resolved.link, &query, policy.redirect_with_query);
                println!("{}", "Redirect".bright_white().bold());
                println!(
                    "  Status:   {}",
                    policy.redirect_status.as_u16().to_string().bright_white()
                );
                println!("  Location: {}", target.bright_yellow());
            }
        }
    }

    Ok(())
}

/// Renders `text` as SVG to stdout or a file.
async fn handle_qr(text: &str, output: Option<PathBuf>) -> Result<()> {
    let renderer = QrRenderer::new(Arc::new(QrCodeEncoder::new()));
    let svg = renderer.render(text).context("Failed to encode QR code")?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, svg)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {}",
                "✅ QR code written to".green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", svg),
    }

    Ok(())
}

/// Verifies that the configured link store answers.
async fn handle_check() -> Result<()> {
    let config = config::load_from_env()?;
    println!(
        "{} {}",
        "Link store backend:".bright_white(),
        config.store_backend().cyan()
    );

    let backends = build_backends(&config).await?;

    let Some(store) = backends.store else {
        println!("{}", "⚠️  No link store configured".yellow());
        return Ok(());
    };

    if !store.health_check().await {
        println!("{}", "❌ Link store unreachable".red().bold());
        anyhow::bail!("link store health check failed");
    }

    println!("{}", "✅ Link store reachable".green().bold());

    Ok(())
}
