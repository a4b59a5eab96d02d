mod admin;
mod shop;

use clap::{Parser, Subcommand};
use galleria_core::{CoreError, PageRole};
use tracing_subscriber::EnvFilter;

use crate::admin::AdminCommands;
use crate::shop::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "galleria")]
#[command(about = "2FLY Galleria storefront and admin console")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the entry page
    Landing,
    /// Browse listed products
    Shop {
        /// Category pill to filter by, or ALL
        #[arg(long, default_value = "Earrings")]
        category: String,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Compose the order message from the cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Manage products in the backend
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

impl Commands {
    /// The page-role attribute this command group declares.
    fn role_attribute(&self) -> &'static str {
        match self {
            Commands::Landing => "landing",
            Commands::Shop { .. } | Commands::Cart { .. } | Commands::Checkout { .. } => "shop",
            Commands::Admin { .. } => "admin",
        }
    }

    fn role(&self) -> Result<PageRole, CoreError> {
        self.role_attribute().parse()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = galleria_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        shop::run_landing();
        return Ok(());
    };

    let role = command.role()?;
    tracing::info!(%role, loads_cart = role.loads_cart(), env = %config.env, "starting");

    match command {
        Commands::Landing => shop::run_landing(),
        Commands::Shop { category } => shop::run_shop(&config, &category).await?,
        Commands::Cart { command } => shop::run_cart(&config, command).await?,
        Commands::Checkout {
            name,
            phone,
            address,
            notes,
        } => shop::run_checkout(&config, &name, &phone, &address, &notes)?,
        Commands::Admin { command } => admin::run_admin(&config, command).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
