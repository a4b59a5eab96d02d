//! Landing, shop, cart and checkout command handlers.

use clap::Subcommand;
use galleria_backend::{load_catalog, BackendClient};
use galleria_core::{money, AppConfig, CartStore, CategoryFilter, ContactInfo, FileStorage};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// List cart lines and totals
    Show,
    /// Add a listed product to the cart
    Add {
        #[arg(long)]
        id: String,
        /// Quantity; non-numeric or below 1 counts as 1
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        qty: String,
    },
    /// Set the quantity of a cart line
    Set {
        #[arg(long)]
        id: String,
        #[arg(long, allow_hyphen_values = true)]
        qty: String,
    },
    /// Increase a cart line by one
    Inc {
        #[arg(long)]
        id: String,
    },
    /// Decrease a cart line by one, never below 1
    Dec {
        #[arg(long)]
        id: String,
    },
    /// Remove a cart line
    Remove {
        #[arg(long)]
        id: String,
    },
}

pub(crate) fn run_landing() {
    println!("2FLY.GALLERIA");
    println!("Handmade earrings and accessories.");
    println!();
    println!("Run `galleria shop` to browse the collection.");
}

fn open_cart(config: &AppConfig) -> CartStore<FileStorage> {
    CartStore::load(FileStorage::new(config.cart_dir.clone()))
}

/// List products matching `category`.
///
/// # Errors
///
/// Returns an error if the backend client cannot be built from configuration.
pub(crate) async fn run_shop(config: &AppConfig, category: &str) -> anyhow::Result<()> {
    let client = BackendClient::from_config(config)?;
    let view = load_catalog(client.as_ref()).await;

    if let Some(message) = view.message() {
        println!("{message}");
        return Ok(());
    }

    let filter = CategoryFilter::parse(category);
    let products = view.visible(&filter);
    println!("Category: {filter}");
    if products.is_empty() {
        println!("No products in this category yet.");
        return Ok(());
    }

    println!("{:<8}{:<30}{:<10}PRICE", "ID", "NAME", "CODE");
    for product in products {
        println!(
            "{:<8}{:<30}{:<10}{}",
            product.id.as_str(),
            product.name,
            product.code,
            money(product.price)
        );
    }

    let cart = open_cart(config);
    println!();
    println!("Cart: {} item(s)", cart.total_quantity());
    Ok(())
}

/// Apply a cart command, then print the cart.
///
/// # Errors
///
/// Returns an error if `add` names a product that is not listed, or the
/// catalog cannot be reached for `add`.
pub(crate) async fn run_cart(config: &AppConfig, command: CartCommands) -> anyhow::Result<()> {
    let mut cart = open_cart(config);

    match command {
        CartCommands::Show => {}
        CartCommands::Add { id, qty } => {
            let client = BackendClient::from_config(config)?;
            let view = load_catalog(client.as_ref()).await;
            if let Some(message) = view.message() {
                anyhow::bail!("{message}");
            }
            let product = view
                .find(&id)
                .ok_or_else(|| anyhow::anyhow!("product '{id}' is not listed in the shop"))?;
            cart.add(product, qty.as_str());
            println!("Added {} to cart.", product.name);
        }
        CartCommands::Set { id, qty } => cart.set_quantity(&id, qty.as_str()),
        CartCommands::Inc { id } => cart.increment(&id),
        CartCommands::Dec { id } => cart.decrement(&id),
        CartCommands::Remove { id } => cart.remove(&id),
    }

    print_cart(&cart);
    Ok(())
}

fn print_cart(cart: &CartStore<FileStorage>) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in cart.items() {
        let code = if item.code.is_empty() {
            String::new()
        } else {
            format!(" \u{2013} {}", item.code)
        };
        println!(
            "[{}] {}{} x{} ({} each) = {}",
            item.id,
            item.name,
            code,
            item.quantity,
            money(item.price),
            money(item.line_total())
        );
    }
    println!();
    println!("Subtotal: {}", money(cart.subtotal()));
    println!("Total Quantity: {}", cart.total_quantity());
}

/// Print the order message for the current cart.
///
/// # Errors
///
/// Returns an error if the cart is empty.
pub(crate) fn run_checkout(
    config: &AppConfig,
    name: &str,
    phone: &str,
    address: &str,
    notes: &str,
) -> anyhow::Result<()> {
    let cart = open_cart(config);
    let draft = cart
        .checkout(ContactInfo::new(name, phone, address, notes))
        .ok_or_else(|| anyhow::anyhow!("your cart is empty; add products before checking out"))?;

    tracing::info!(
        lines = draft.items().len(),
        total_quantity = draft.total_quantity(),
        "order composed"
    );
    println!("{}", draft.render());
    Ok(())
}
