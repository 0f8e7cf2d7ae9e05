//! Zia Mia CLI - manage the shop's customers, flavours and orders.
//!
//! # Usage
//!
//! ```bash
//! # List flavours
//! zm-cli list flavours
//!
//! # Add a flavour
//! zm-cli add flavours -f name=Pistachio -f price=4.5
//!
//! # Mark an order as delivered, then delete it
//! zm-cli update orders 3 -f status=delivered
//! zm-cli delete orders 3
//! ```
//!
//! # Environment Variables
//!
//! - `ZIAMIA_API_KEY` - Bearer key of the record store (required)
//! - `ZIAMIA_STORE_URL` - Record store root (default: `http://localhost:3000/`)
//! - `ZIAMIA_LOG_JSON` - Emit logs as JSON when set

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zia_mia_admin::{ItemService, StoreClient, StoreConfig};

mod commands;
mod render;

use commands::items;

#[derive(Parser)]
#[command(name = "zm-cli")]
#[command(author, version, about = "Zia Mia ice-cream shop admin")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all records of an item type (customers, flavours, orders)
    List { item_type: String },
    /// Show one record
    Show { item_type: String, id: i32 },
    /// Add a record
    Add {
        item_type: String,

        /// Field value as key=value, repeatable
        #[arg(short = 'f', long = "field", value_parser = items::parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Change fields of a record (orders: status only)
    Update {
        item_type: String,
        id: i32,

        /// Field value as key=value, repeatable
        #[arg(short = 'f', long = "field", value_parser = items::parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record
    Delete { item_type: String, id: i32 },
    /// List the valid order statuses
    Statuses,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "zia_mia_cli=info,zia_mia_admin=warn".into());

    let json_output = std::env::var("ZIAMIA_LOG_JSON").is_ok();
    let json_layer =
        json_output.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let text_layer =
        (!json_output).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if matches!(cli.command, Commands::Statuses) {
        items::statuses(&mut out)?;
        return Ok(());
    }

    let config = StoreConfig::from_env()?;
    let client = StoreClient::new(&config)?;
    let service = ItemService::new(Arc::new(client));

    match cli.command {
        Commands::List { item_type } => items::list(&service, &item_type, &mut out).await?,
        Commands::Show { item_type, id } => {
            items::show(&service, &item_type, id, &mut out).await?;
        }
        Commands::Add { item_type, fields } => {
            items::add(&service, &item_type, fields, &mut out).await?;
        }
        Commands::Update {
            item_type,
            id,
            fields,
        } => items::update(&service, &item_type, id, fields, &mut out).await?,
        Commands::Delete { item_type, id } => {
            items::delete(&service, &item_type, id, &mut out).await?;
        }
        Commands::Statuses => items::statuses(&mut out)?,
    }
    Ok(())
}
