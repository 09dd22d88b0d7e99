//! Command-line interface definitions and handlers.
//!
//! The CLI provides the application's views: menu page, cart page,
//! checkout form, receipt, and the account dashboard. Each
//! invocation opens one session against file-backed storage, so separate
//! invocations observe each other's writes the way separate tabs do.

mod checkout;
mod dashboard;
pub mod menu;
pub mod output;
pub mod receipt;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

pub use checkout::CheckoutArgs;

use crate::config::Config;
use crate::domain::{ItemId, OrderId, SalesTab};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::storage::FileStorage;
use crate::sync::SharedStorage;

/// GreenLeaf Bistro ordering CLI
#[derive(Parser, Debug)]
#[command(name = "greenleaf")]
#[command(version)]
pub struct Cli {
    /// Path to a config file (defaults to greenleaf.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the storage directory
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the greenleaf CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the menu
    Menu,

    /// Add a menu item to the cart
    Add {
        /// Menu item id
        item: u32,
        /// Number of units to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },

    /// Inspect and edit the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Complete the order
    Checkout(CheckoutArgs),

    /// List completed orders
    Orders,

    /// Render the receipt for a completed order
    Receipt {
        /// Order id, e.g. GLB-1729000000000
        order_id: String,
    },

    /// Show the sales dashboard
    Dashboard {
        /// Which rollup to show [daily, monthly]
        #[arg(long, default_value = "daily")]
        tab: TabChoice,
    },

    /// Manage sales data
    #[command(subcommand)]
    Sales(SalesCommand),

    /// Create an account on the bistro backend
    #[cfg(feature = "auth")]
    Signup {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Log in to the bistro backend
    #[cfg(feature = "auth")]
    Login {
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },
}

/// Subcommands for `greenleaf cart`.
#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Show the current cart
    Show,
    /// Set a line's quantity (zero removes it)
    Set {
        /// Menu item id
        item: u32,
        /// New quantity
        qty: i64,
    },
    /// Remove a line
    Remove {
        /// Menu item id
        item: u32,
    },
    /// Empty the cart
    Clear,
}

/// Subcommands for `greenleaf sales`.
#[derive(Subcommand, Debug)]
pub enum SalesCommand {
    /// Zero and reseed the rollup windows
    Reset,
    /// Rebuild the rollup by replaying the order ledger
    Rebuild,
}

/// Dashboard tab selection.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum TabChoice {
    #[default]
    Daily,
    Monthly,
}

impl From<TabChoice> for SalesTab {
    fn from(tab: TabChoice) -> Self {
        match tab {
            TabChoice::Daily => SalesTab::Daily,
            TabChoice::Monthly => SalesTab::Monthly,
        }
    }
}

/// Dispatch a parsed CLI invocation.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let dir = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolve_dir());
    let storage = SharedStorage::new(Arc::new(FileStorage::new(dir)));
    let session = Session::open(storage, config.pricing.clone());

    match cli.command {
        Commands::Menu => {
            menu::print_menu();
            Ok(())
        }
        Commands::Add { item, qty } => add_to_cart(&session, item, qty),
        Commands::Cart(command) => cart_command(&session, command),
        Commands::Checkout(args) => checkout_command(&session, &args),
        Commands::Orders => list_orders(&session),
        Commands::Receipt { order_id } => print_receipt(&session, &order_id),
        Commands::Dashboard { tab } => {
            dashboard::print_dashboard(&session.sales().rollup(), tab.into());
            Ok(())
        }
        Commands::Sales(SalesCommand::Reset) => {
            session.sales().reset()?;
            output::success("Sales data reset");
            Ok(())
        }
        Commands::Sales(SalesCommand::Rebuild) => {
            session.sales().rebuild(&session.ledger().orders())?;
            output::success("Sales data rebuilt from the order ledger");
            Ok(())
        }
        #[cfg(feature = "auth")]
        Commands::Signup { name, email } => signup_command(&config, name, email).await,
        #[cfg(feature = "auth")]
        Commands::Login { email } => login_command(&config, email).await,
    }
}

fn add_to_cart(session: &Session, item: u32, qty: u32) -> Result<()> {
    let id = ItemId::new(item);
    let menu_item = menu::find(id).ok_or(Error::UnknownMenuItem { id: item })?;

    for _ in 0..qty.max(1) {
        session
            .cart()
            .add_item(menu_item.id, menu_item.name, menu_item.price)?;
    }

    output::success(format!(
        "Added {} x{} to the cart ({} items, subtotal PKR {})",
        menu_item.name,
        qty.max(1),
        session.cart().item_count(),
        session.cart().subtotal()
    ));
    Ok(())
}

fn cart_command(session: &Session, command: CartCommand) -> Result<()> {
    match command {
        CartCommand::Show => show_cart(session),
        CartCommand::Set { item, qty } => {
            session.cart().set_quantity(ItemId::new(item), qty)?;
            show_cart(session)
        }
        CartCommand::Remove { item } => {
            session.cart().remove_item(ItemId::new(item))?;
            show_cart(session)
        }
        CartCommand::Clear => {
            session.cart().clear()?;
            output::success("Cart cleared");
            Ok(())
        }
    }
}

fn show_cart(session: &Session) -> Result<()> {
    let cart = session.cart().snapshot();
    if cart.is_empty() {
        output::warning("The cart is empty");
        return Ok(());
    }

    output::section("Cart");
    for line in cart.lines() {
        output::field(
            format!("{} x{}", line.name, line.quantity),
            format!("PKR {}", line.line_total()),
        );
    }
    output::field("Subtotal", format!("PKR {}", cart.subtotal()));
    Ok(())
}

fn checkout_command(session: &Session, args: &CheckoutArgs) -> Result<()> {
    // Bail before prompting; finalize re-checks regardless.
    if session.cart().is_empty() {
        return Err(crate::error::CheckoutError::EmptyCart.into());
    }

    let customer = checkout::gather_customer_info(args)?;
    let order = session.checkout(&customer)?;

    output::success(format!("Order {} completed", order.order_id));
    println!();
    print!("{}", receipt::render(&order));
    Ok(())
}

fn list_orders(session: &Session) -> Result<()> {
    let orders = session.ledger().orders();
    if orders.is_empty() {
        output::warning("No completed orders yet");
        return Ok(());
    }

    output::section("Completed orders");
    for order in &orders {
        output::field(
            order.order_id.to_string(),
            format!(
                "{} · {} items · PKR {}",
                order.placed_at.format("%Y-%m-%d %H:%M"),
                order.item_count(),
                order.total
            ),
        );
    }
    Ok(())
}

/// Renders a stored receipt. Never records sales: aggregation happened once
/// at checkout.
fn print_receipt(session: &Session, order_id: &str) -> Result<()> {
    let id = OrderId::from(order_id);
    let order = session.ledger().get(&id).ok_or_else(|| Error::UnknownOrder {
        order_id: order_id.to_string(),
    })?;
    print!("{}", receipt::render(&order));
    Ok(())
}

#[cfg(feature = "auth")]
async fn signup_command(config: &Config, name: Option<String>, email: Option<String>) -> Result<()> {
    use dialoguer::{Input, Password};

    use crate::adapter::auth::HttpAuthClient;
    use crate::port::auth::AuthService;

    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let client = HttpAuthClient::new(&config.auth.base_url)?;
    let message = client.signup(&name, &email, &password).await?;
    output::success(message);
    Ok(())
}

#[cfg(feature = "auth")]
async fn login_command(config: &Config, email: Option<String>) -> Result<()> {
    use dialoguer::{Input, Password};

    use crate::adapter::auth::HttpAuthClient;
    use crate::port::auth::AuthService;

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let client = HttpAuthClient::new(&config.auth.base_url)?;
    let auth = client.login(&email, &password).await?;
    output::success(auth.message);
    output::field("Token", auth.token);
    Ok(())
}
