//! # Bodega Console Frontend
//!
//! Interactive menu over `bodega-core`.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Seed the store with demo products and one user
//! 3. Run the menu loop until the user quits
//!
//! ## Error Handling
//! Core errors are never fatal: the message is printed and the loop
//! continues. Only stdin/stdout failures end the process.

use std::io::{self, Write};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use bodega_core::pricing::PricingRule;
use bodega_core::product::Product;
use bodega_core::store::Store;
use bodega_core::validation::validate_quantity;
use bodega_core::Money;

/// The single shopper this frontend drives. One logical actor at a time is
/// a core design assumption; a multi-user frontend would prompt for a name.
const CONSOLE_USER: &str = "console";

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut store = Store::new();
    seed(&mut store);

    println!("Welcome to the Bodega!");

    loop {
        print_menu();
        match prompt("Select an option: ")?.as_str() {
            "1" => list_products(&store),
            "2" => add_to_cart(&mut store)?,
            "3" => view_cart(&store),
            "4" => remove_from_cart(&mut store)?,
            "5" => checkout(&mut store),
            "6" => {
                println!("Goodbye!");
                break;
            }
            other => println!("Unknown option '{other}'. Please try again."),
        }
    }

    Ok(())
}

/// Seeds the demo catalog: one product per pricing rule family plus a
/// second normal item, and the single console user.
fn seed(store: &mut Store) {
    store.register_product(Product::new(
        "EA001",
        "Mechanical Keyboard",
        "RGB backlit, hot-swappable switches",
        10,
        5999,
    ));
    store.register_product(Product::new(
        "EA002",
        "Gamer Mouse",
        "6 programmable buttons",
        20,
        2450,
    ));
    store.register_product(Product::new(
        "WE001",
        "Apples",
        "Royal Gala, priced per gram",
        5000,
        2,
    ));
    store.register_product(Product::new(
        "SP001",
        "Soda 1.5L",
        "Multipack promotion: 20% off per 3 units",
        30,
        400,
    ));
    store.register_user(CONSOLE_USER);
    debug!(products = store.products().count(), "store seeded");
}

fn print_menu() {
    println!();
    println!("========== STORE MENU ==========");
    println!("1. List available products");
    println!("2. Add product to cart");
    println!("3. View cart");
    println!("4. Remove item from cart");
    println!("5. Checkout");
    println!("6. Quit");
    println!("================================");
}

/// Reads one trimmed line of input after printing a label.
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn list_products(store: &Store) {
    debug!("list_products");
    println!("\n--- Available Products ---");

    let mut products: Vec<_> = store.products().collect();
    products.sort_by(|a, b| a.sku.cmp(&b.sku));

    for product in products {
        let kind = PricingRule::for_sku(&product.sku)
            .map(|rule| rule.label())
            .unwrap_or("Unpriced");
        println!(
            "[{}] {:<22} | {:>10} | Stock: {:<6} | {}",
            product.sku,
            product.name,
            product.price().to_string(),
            product.available_units,
            kind
        );
    }
}

fn add_to_cart(store: &mut Store) -> io::Result<()> {
    let sku = prompt("Enter the SKU to add: ")?.to_uppercase();
    let quantity_input = prompt("Enter the quantity (grams for by-weight products): ")?;

    let quantity: i64 = match quantity_input.parse() {
        Ok(q) => q,
        Err(_) => {
            println!("Error: quantity must be a whole number.");
            return Ok(());
        }
    };
    if let Err(err) = validate_quantity(quantity) {
        println!("Error: {err}");
        return Ok(());
    }

    debug!(%sku, quantity, "add_to_cart");
    match store.add_to_cart(CONSOLE_USER, &sku, quantity) {
        Ok(update) => println!(
            "Added '{}'. Line total: {} | Cart total: {}",
            sku,
            Money::from_cents(update.line_total_cents),
            Money::from_cents(update.cart_total_cents)
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn view_cart(store: &Store) {
    debug!("view_cart");
    match store.cart_view(CONSOLE_USER) {
        Ok(view) if view.lines.is_empty() => println!("\nThe cart is empty."),
        Ok(view) => {
            println!("\n--- Shopping Cart ---");
            for line in &view.lines {
                println!(
                    "- [{}] {:<22} | Qty: {:<6} | Subtotal: {}",
                    line.sku,
                    line.name,
                    line.quantity,
                    Money::from_cents(line.line_total_cents)
                );
            }
            println!("CART TOTAL: {}", Money::from_cents(view.total_cents));
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn remove_from_cart(store: &mut Store) -> io::Result<()> {
    let sku = prompt("Enter the SKU to remove: ")?.to_uppercase();
    debug!(%sku, "remove_from_cart");
    match store.remove_from_cart(CONSOLE_USER, &sku) {
        Ok(()) => println!("Removed '{sku}' from the cart."),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn checkout(store: &mut Store) {
    debug!("checkout");
    match store.checkout(CONSOLE_USER) {
        Ok(charged) => {
            println!("\n******************************");
            println!("Purchase complete!");
            println!("Total charged: {charged}");
            println!("Store sales to date: {}", store.total_sales());
            println!("******************************");
        }
        Err(err) => println!("Checkout failed: {err}"),
    }
}
