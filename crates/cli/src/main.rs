//! SoleStack CLI - DynamoDB provisioning and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create every table the services expect
//! sole-cli provision
//!
//! # Create a single table
//! sole-cli provision --target users
//!
//! # Create an admin account (promotes the account if it already exists)
//! sole-cli admin create -e admin@solestack.dev -p "s3cret!"
//!
//! # Load the sample catalog with matching stock records
//! sole-cli seed products
//! ```
//!
//! # Commands
//!
//! - `provision` - Create DynamoDB tables and their indexes
//! - `admin create` - Create or promote admin accounts
//! - `seed products` - Load the sample catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::provision::ProvisionTarget;

#[derive(Parser)]
#[command(name = "sole-cli")]
#[command(author, version, about = "SoleStack CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create DynamoDB tables and their indexes
    Provision {
        /// Limit provisioning to a single table
        #[arg(long, value_enum)]
        target: Option<ProvisionTarget>,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Load sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an admin account, promoting the user if the email is taken
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load the sample catalog and matching inventory records
    Products,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Provision { target } => commands::provision::run(target).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password } => {
                commands::admin::create_user(&email, &password).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Products => commands::seed::products().await?,
        },
    }
    Ok(())
}
