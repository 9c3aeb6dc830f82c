//! Lumizo CLI - Command-line driver for the storefront state core.
//!
//! # Usage
//!
//! ```bash
//! # Log in as the configured admin
//! lumizo login admin hunter2-but-longer
//!
//! # Quick login by password alone
//! lumizo quick-login hunter2-but-longer
//!
//! # Add a variant selection to the cart
//! lumizo cart add vase-1 --name "Ceramic Vase" --qty 2 \
//!     --variant color=red --variant size=m \
//!     --price 150 --discounted-price 100 --price-type discountedPrice
//!
//! # Inspect the cart
//! lumizo cart list
//! lumizo cart total
//! ```
//!
//! # Commands
//!
//! - `login` / `quick-login` / `logout` / `whoami` - Session operations
//! - `cart add|remove|set|list|total|clear` - Cart operations
//!
//! State persists under `LUMIZO_DATA_DIR` (default `.lumizo`) between
//! invocations, the same way the browser storefront persists across
//! reloads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use lumizo_storefront::config::StorefrontConfig;
use lumizo_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "lumizo")]
#[command(author, version, about = "Lumizo storefront state CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a username and password
    Login {
        /// Login username
        username: String,
        /// Login password
        password: String,
    },
    /// Log in by password alone against the quick-login table
    QuickLogin {
        /// Password shared out-of-band
        password: String,
    },
    /// Log out and delete the persisted session
    Logout,
    /// Show the authenticated identity
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product selection to the cart (merges on re-add)
    Add {
        /// Catalog product ID
        product_id: String,

        /// Product display name
        #[arg(short, long)]
        name: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,

        /// Variant selection as `axis=value` (repeatable)
        #[arg(short = 'V', long = "variant", value_name = "AXIS=VALUE")]
        variants: Vec<String>,

        /// Regular selling price
        #[arg(long)]
        price: Option<rust_decimal::Decimal>,

        /// Maximum retail price
        #[arg(long)]
        mrp: Option<rust_decimal::Decimal>,

        /// Discounted selling price
        #[arg(long)]
        discounted_price: Option<rust_decimal::Decimal>,

        /// Minimum advertised price
        #[arg(long)]
        minimum_price: Option<rust_decimal::Decimal>,

        /// Active price type (`price`, `mrp`, `discountedPrice`, `minimumPrice`)
        #[arg(long, default_value = "price")]
        price_type: String,

        /// Brand name snapshot
        #[arg(long)]
        brand: Option<String>,

        /// Brand image URL snapshot
        #[arg(long)]
        brand_image: Option<String>,

        /// Category name snapshot
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove a line by its identity key
    Remove {
        /// Line identity key (see `cart list`)
        line_id: String,
    },
    /// Replace a line's quantity (zero or less removes it)
    Set {
        /// Line identity key
        line_id: String,
        /// New quantity
        quantity: i64,
    },
    /// List the cart lines
    List,
    /// Print the cart total
    Total,
    /// Empty the cart
    Clear,
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
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::init(config);

    match cli.command {
        Commands::Login { username, password } => {
            commands::session::login(&mut state, &username, &password).await?;
        }
        Commands::QuickLogin { password } => {
            commands::session::quick_login(&mut state, &password).await;
        }
        Commands::Logout => commands::session::logout(&mut state),
        Commands::Whoami => commands::session::whoami(&state),
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                name,
                qty,
                variants,
                price,
                mrp,
                discounted_price,
                minimum_price,
                price_type,
                brand,
                brand_image,
                category,
            } => {
                let request = commands::cart::AddRequest {
                    product_id,
                    name,
                    qty,
                    variants,
                    price,
                    mrp,
                    discounted_price,
                    minimum_price,
                    price_type,
                    brand,
                    brand_image,
                    category,
                };
                commands::cart::add(&mut state, request)?;
            }
            CartAction::Remove { line_id } => commands::cart::remove(&mut state, &line_id),
            CartAction::Set { line_id, quantity } => {
                commands::cart::set_quantity(&mut state, &line_id, quantity);
            }
            CartAction::List => commands::cart::list(&state),
            CartAction::Total => commands::cart::total(&state),
            CartAction::Clear => commands::cart::clear(&mut state),
        },
    }
    Ok(())
}
