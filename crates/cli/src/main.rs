//! Shopfront CLI - drive the storefront widget from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session against the local mock backend
//! shopfront browse
//!
//! # Interactive session against another API origin
//! shopfront --api-url http://shop.internal:8000 browse
//!
//! # Print the catalog once
//! shopfront products --category Books
//! ```
//!
//! # Commands
//!
//! - `browse` - Interactive widget session (search, filter, add, remove, checkout)
//! - `products` - One-shot catalog listing

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_storefront::WidgetConfig;

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront widget in the terminal")]
struct Cli {
    /// Shop API origin (overrides `SHOPFRONT_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive storefront session
    Browse,
    /// List the catalog once
    Products {
        /// Search text matched against product names
        #[arg(short, long)]
        q: Option<String>,

        /// Category filter
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing (logs go to stderr, fragments to stdout)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=warn,shopfront_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match cli.api_url {
        Some(url) => WidgetConfig::for_api_url(&url)?,
        None => WidgetConfig::from_env()?,
    };

    match cli.command {
        Commands::Browse => commands::browse::run(&config).await?,
        Commands::Products { q, category } => {
            commands::products::run(&config, q.as_deref(), category.as_deref()).await?;
        }
    }
    Ok(())
}
