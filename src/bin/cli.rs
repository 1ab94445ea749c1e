//! Command-line front end for dealer-quote-links.
//!
//! Resolves quote links without running the HTTP server, using the same
//! configuration variables as the service.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a dealer (prompts for the identifier when omitted)
//! cargo run --bin cli -- resolve dubbocitytoyota
//!
//! # Machine-readable output, same shape as POST /api/scrape
//! cargo run --bin cli -- resolve dubbocitytoyota --json
//!
//! # Render with headless Chrome
//! cargo run --features browser --bin cli -- resolve dubbocitytoyota --backend browser
//!
//! # Print the dealer page URL without fetching it
//! cargo run --bin cli -- target dubbocitytoyota
//! ```
//!
//! # Exit Codes
//!
//! - `0` - links resolved
//! - `2` - invalid identifier
//! - `3` - no quote link on the page
//! - `4` - page could not be loaded

use dealer_quote_links::api::dto::scrape::ScrapeResponse;
use dealer_quote_links::application::services::{LinkResolver, Resolution};
use dealer_quote_links::config::{self, Config};
use dealer_quote_links::domain::Identifier;
use dealer_quote_links::domain::identifier::validate;
use dealer_quote_links::error::AppError;
use dealer_quote_links::infrastructure::{FetchBackend, build_page_source};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// CLI tool for resolving dealer quote links.
#[derive(Parser)]
#[command(name = "cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the dealer page and derive the campaign links
    Resolve {
        /// Dealer base domain, e.g. "dubbocitytoyota"
        identifier: Option<String>,

        /// Print JSON instead of formatted text
        #[arg(long)]
        json: bool,

        /// Page source backend (overrides FETCH_BACKEND)
        #[arg(short, long)]
        backend: Option<FetchBackend>,
    },

    /// Print the dealer page URL for an identifier
    Target {
        /// Dealer base domain
        identifier: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = config::load_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            identifier,
            json,
            backend,
        } => {
            if let Some(backend) = backend {
                config.fetch_backend = backend;
            }
            let identifier = match identifier {
                Some(identifier) => identifier,
                None => prompt_identifier()?,
            };
            resolve(&config, &identifier, json).await
        }
        Commands::Target { identifier } => print_target(&config, &identifier),
    }
}

/// Asks for an identifier until one passes validation.
fn prompt_identifier() -> Result<String> {
    let identifier = Input::<String>::new()
        .with_prompt("Toyota base domain")
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if validate(input) {
                Ok(())
            } else {
                Err("Use lowercase letters, digits, and hyphens only")
            }
        })
        .interact_text()?;

    Ok(identifier)
}

async fn resolve(config: &Config, identifier: &str, as_json: bool) -> Result<()> {
    let source = build_page_source(
        config.fetch_backend,
        &config.user_agent,
        config.fetch_timeout(),
    )
    .context("Failed to set up page source")?;
    let resolver = LinkResolver::new(source, config.target_template()?);

    if !as_json {
        println!(
            "{} {} {}",
            "🔎 Resolving".bright_blue().bold(),
            identifier.cyan(),
            format!("({})", resolver.backend()).dimmed()
        );
    }

    match resolver.resolve(identifier).await {
        Ok(resolution) if as_json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ScrapeResponse::from(resolution))?
            );
            Ok(())
        }
        Ok(resolution) => {
            print_resolution(&resolution);
            Ok(())
        }
        Err(err) => {
            if as_json {
                let body = json!({
                    "error": err.to_string(),
                    "kind": err.kind(),
                    "dealerPage": err.target_url(),
                });
                eprintln!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_error(&err);
            }
            std::process::exit(exit_code(&err));
        }
    }
}

fn print_resolution(resolution: &Resolution) {
    println!();
    println!("{}", "✅ Links generated".green().bold());
    println!();
    println!("  {}  {}", "Dealer page:".bright_white(), resolution.target_url);
    println!("  {}  {}", "Source URL: ".bright_white(), resolution.source_url);
    println!(
        "  {}  {}",
        "Service URL:".bright_white(),
        resolution.service_url.bright_yellow()
    );
    println!(
        "  {}  {}",
        "Parts URL:  ".bright_white(),
        resolution.parts_url.bright_yellow()
    );
    println!();
}

fn print_error(err: &AppError) {
    eprintln!();
    eprintln!("{} {}", "❌".red(), err.to_string().red().bold());
    if let Some(target_url) = err.target_url() {
        eprintln!("  {}  {}", "Dealer page:".bright_white(), target_url);
    }
    eprintln!();
}

fn exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput { .. } => 2,
        AppError::LinkNotFound { .. } => 3,
        AppError::Upstream { .. } => 4,
    }
}

fn print_target(config: &Config, identifier: &str) -> Result<()> {
    let identifier = Identifier::parse(identifier)?;
    let url = config.target_template()?.build(&identifier)?;
    println!("{}", url);
    Ok(())
}
