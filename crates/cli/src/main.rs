//! Marketplace Cart CLI - inspect and edit a stored cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! mp-cart show
//!
//! # Show the raw stored record
//! mp-cart show --json
//!
//! # Add a product (or one more unit of it)
//! mp-cart add --id p1 --title Shirt --image-url https://img.test/p1.png --price 50
//!
//! # Change quantities
//! mp-cart increment p1
//! mp-cart decrement p1
//! ```
//!
//! # Commands
//!
//! - `show` - Print the cart
//! - `add` - Add one unit of a product
//! - `increment` - Add one unit of a product already in the cart
//! - `decrement` - Remove one unit, dropping the product at zero

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marketplace_cart::Mutation;
use marketplace_core::{NewLineItem, Price};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{CliConfig, LogFormat};
use error::CliError;

#[derive(Parser)]
#[command(name = "mp-cart")]
#[command(author, version, about = "Marketplace cart tools")]
struct Cli {
    /// Directory holding the stored cart (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show {
        /// Print the stored JSON record instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Display title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price (non-negative decimal)
        #[arg(long)]
        price: Price,
    },
    /// Add one unit of a product already in the cart
    Increment {
        /// Product ID
        id: String,
    },
    /// Remove one unit of a product
    Decrement {
        /// Product ID
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout carries only the cart.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marketplace_cart=info,mp_cart=info".into());

    let (text, json) = match format {
        LogFormat::Text => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text)
        .with(json)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Failed to load configuration: {e}");
            }
            std::process::exit(2);
        }
    };
    if let Some(dir) = cli.storage_dir.clone() {
        config.storage_dir = dir;
    }

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &CliConfig) -> Result<(), CliError> {
    match command {
        Commands::Show { json } => commands::show::run(config, json).await?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            let item = NewLineItem::new(id, title, image_url, price);
            commands::edit::run(config, Mutation::Add(item)).await;
        }
        Commands::Increment { id } => {
            commands::edit::run(config, Mutation::Increment(id.into())).await;
        }
        Commands::Decrement { id } => {
            commands::edit::run(config, Mutation::Decrement(id.into())).await;
        }
    }
    Ok(())
}
