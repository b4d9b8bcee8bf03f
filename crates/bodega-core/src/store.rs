//! # Store
//!
//! The store owns the catalog, the user registry, the running sales total,
//! and the receipt log. It is the single entry point frontends talk to.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Frontend Action          Store Method        State Change  │
//! │  ───────────────          ────────────        ────────────  │
//! │                                                             │
//! │  Seed product ──────────► register_product ─► catalog       │
//! │  Add to cart ───────────► add_to_cart ──────► user's cart   │
//! │  View cart ─────────────► cart_view ────────► (read only)   │
//! │  Remove line ───────────► remove_from_cart ─► user's cart   │
//! │  Checkout ──────────────► checkout ─────────► stock −=,     │
//! │                                               sales +=,     │
//! │                                               cart cleared  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Checkout Atomicity
//! Checkout is all-or-nothing: every line is stock-checked before any
//! decrement is applied. A failing line leaves the cart, the stock, and
//! the sales total exactly as they were.
//!
//! ## Concurrency
//! Single-threaded by design: one logical actor mutates the model at a
//! time. Exposing a shared `Store` behind concurrent handlers requires
//! per-user or per-product mutual exclusion around `add_to_cart` and
//! `checkout` first.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::{Catalog, Product};

// =============================================================================
// User
// =============================================================================

/// A registered shopper: a name and exactly one owned cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Registry key.
    pub name: String,

    /// The user's cart. Cleared (not replaced) on successful checkout.
    pub cart: Cart,
}

impl User {
    /// Creates a user with an empty cart.
    pub fn new(name: impl Into<String>) -> Self {
        User {
            name: name.into(),
            cart: Cart::new(),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Record of one completed checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Name of the user who checked out.
    pub user: String,

    /// Amount charged, in cents.
    pub total_cents: i64,

    /// When the checkout completed.
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Display DTOs
// =============================================================================

/// Totals returned by `add_to_cart`, for immediate display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdate {
    /// Subtotal of the line that was just affected.
    pub line_total_cents: i64,

    /// New grand total of the whole cart.
    pub cart_total_cents: i64,
}

/// One rendered cart row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub line_total_cents: i64,
}

/// Full cart contents plus grand total, shaped for the frontends.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_cents: i64,
}

// =============================================================================
// Store
// =============================================================================

/// Product catalog, user registry, and checkout orchestration.
///
/// Explicit state owned by one instance: construct it, seed it, and pass it
/// by reference into every operation. No ambient or static state.
#[derive(Debug, Default)]
pub struct Store {
    catalog: Catalog,
    users: HashMap<String, User>,
    total_sales: Money,
    receipts: Vec<Receipt>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Store::default()
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Inserts or overwrites a product in the catalog. Last write wins.
    pub fn register_product(&mut self, product: Product) {
        self.catalog.insert(product);
    }

    /// Looks up a product by SKU.
    pub fn product(&self, sku: &str) -> CoreResult<&Product> {
        self.catalog.get(sku)
    }

    /// Iterates over the catalog, for listings.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.catalog.iter()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Registers a user by name. Re-registering an existing name keeps the
    /// existing cart.
    pub fn register_user(&mut self, name: &str) {
        self.users
            .entry(name.to_string())
            .or_insert_with(|| User::new(name));
    }

    /// Looks up a registered user.
    pub fn user(&self, name: &str) -> CoreResult<&User> {
        self.users
            .get(name)
            .ok_or_else(|| CoreError::UserNotFound(name.to_string()))
    }

    fn user_mut(&mut self, name: &str) -> CoreResult<&mut User> {
        self.users
            .get_mut(name)
            .ok_or_else(|| CoreError::UserNotFound(name.to_string()))
    }

    // -------------------------------------------------------------------------
    // Cart Operations
    // -------------------------------------------------------------------------

    /// Adds `quantity` of a product to the user's cart.
    ///
    /// Quantity positivity is the calling boundary's responsibility (see
    /// [`crate::validation::validate_quantity`]); insufficient stock is
    /// still defended against here via the cart.
    ///
    /// Returns the affected line's subtotal and the new cart grand total.
    pub fn add_to_cart(&mut self, user: &str, sku: &str, quantity: i64) -> CoreResult<CartUpdate> {
        let product = self.catalog.get(sku)?;
        let user = self
            .users
            .get_mut(user)
            .ok_or_else(|| CoreError::UserNotFound(user.to_string()))?;

        let line_total = user.cart.add_item(product, quantity)?;
        let cart_total = user.cart.total(&self.catalog)?;

        Ok(CartUpdate {
            line_total_cents: line_total.cents(),
            cart_total_cents: cart_total.cents(),
        })
    }

    /// Removes a line from the user's cart. Silent no-op for absent SKUs.
    pub fn remove_from_cart(&mut self, user: &str, sku: &str) -> CoreResult<()> {
        self.user_mut(user)?.cart.remove_item(sku);
        Ok(())
    }

    /// Renders the user's cart with live prices.
    pub fn cart_view(&self, user: &str) -> CoreResult<CartView> {
        let user = self.user(user)?;

        let mut lines = Vec::with_capacity(user.cart.item_count());
        for item in user.cart.items() {
            let product = self.catalog.get(&item.sku)?;
            lines.push(CartLine {
                sku: item.sku.clone(),
                name: product.name.clone(),
                quantity: item.quantity,
                line_total_cents: item.total(product.price()).cents(),
            });
        }
        let total = user.cart.total(&self.catalog)?;

        Ok(CartView {
            lines,
            total_cents: total.cents(),
        })
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Completes the user's purchase: decrements stock for every line,
    /// accumulates store-wide sales, records a receipt, and empties the
    /// cart. Returns the amount charged.
    ///
    /// All-or-nothing: every line is checked against current stock before
    /// any decrement happens. On `InsufficientStock` nothing changes - not
    /// the cart, not the stock, not the sales total.
    pub fn checkout(&mut self, user: &str) -> CoreResult<Money> {
        let user = self
            .users
            .get_mut(user)
            .ok_or_else(|| CoreError::UserNotFound(user.to_string()))?;

        let total = user.cart.total(&self.catalog)?;

        // Validate every line before touching stock.
        for item in user.cart.items() {
            let product = self.catalog.get(&item.sku)?;
            if !product.has_available(item.quantity) {
                return Err(CoreError::InsufficientStock {
                    sku: item.sku.clone(),
                    available: product.available_units,
                    requested: item.quantity,
                });
            }
        }

        // All lines fit: apply the decrements.
        for item in user.cart.items() {
            self.catalog.get_mut(&item.sku)?.decrement(item.quantity)?;
        }

        self.total_sales += total;
        self.receipts.push(Receipt {
            id: Uuid::new_v4().to_string(),
            user: user.name.clone(),
            total_cents: total.cents(),
            completed_at: Utc::now(),
        });
        user.cart.clear();

        Ok(total)
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    /// Running total of completed sales. Monotonically non-decreasing.
    pub fn total_sales(&self) -> Money {
        self.total_sales
    }

    /// Receipts for every completed checkout, oldest first.
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> Store {
        let mut store = Store::new();
        store.register_product(Product::new("EA1", "Keyboard", "RGB keyboard", 10, 100));
        store.register_product(Product::new("SP1", "Soda 1.5L", "multipack", 50, 10));
        store.register_product(Product::new("WE1", "Apples", "per gram", 5000, 2));
        store.register_user("ana");
        store
    }

    #[test]
    fn test_add_to_cart_returns_line_and_cart_totals() {
        let mut store = seeded_store();

        let update = store.add_to_cart("ana", "EA1", 3).unwrap();
        assert_eq!(update.line_total_cents, 300);
        assert_eq!(update.cart_total_cents, 300);

        let update = store.add_to_cart("ana", "SP1", 6).unwrap();
        assert_eq!(update.line_total_cents, 36); // 0.6 × 6 × 10
        assert_eq!(update.cart_total_cents, 336);
    }

    #[test]
    fn test_add_to_cart_unknown_product() {
        let mut store = seeded_store();
        let err = store.add_to_cart("ana", "EA999", 1).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_add_to_cart_unknown_user() {
        let mut store = seeded_store();
        let err = store.add_to_cart("bob", "EA1", 1).unwrap_err();
        assert!(matches!(err, CoreError::UserNotFound(name) if name == "bob"));
    }

    #[test]
    fn test_reregistering_user_keeps_cart() {
        let mut store = seeded_store();
        store.add_to_cart("ana", "EA1", 2).unwrap();

        store.register_user("ana");
        assert_eq!(store.user("ana").unwrap().cart.item_count(), 1);
    }

    #[test]
    fn test_cart_view() {
        let mut store = seeded_store();
        store.add_to_cart("ana", "EA1", 2).unwrap();
        store.add_to_cart("ana", "WE1", 5).unwrap();

        let view = store.cart_view("ana").unwrap();
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].sku, "EA1");
        assert_eq!(view.lines[0].line_total_cents, 200);
        assert_eq!(view.lines[1].sku, "WE1");
        assert_eq!(view.lines[1].line_total_cents, 10_000); // 5 × 1000 × 2
        assert_eq!(view.total_cents, 10_200);
    }

    #[test]
    fn test_checkout_happy_path() {
        // Spec scenario: EA1 stock 10 price 100; add 3; checkout.
        let mut store = seeded_store();
        store.add_to_cart("ana", "EA1", 3).unwrap();

        let charged = store.checkout("ana").unwrap();
        assert_eq!(charged.cents(), 300);
        assert_eq!(store.product("EA1").unwrap().available_units, 7);
        assert_eq!(store.total_sales().cents(), 300);
        assert!(store.user("ana").unwrap().cart.is_empty());

        let receipts = store.receipts();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].user, "ana");
        assert_eq!(receipts[0].total_cents, 300);
    }

    #[test]
    fn test_checkout_insufficient_stock_changes_nothing() {
        let mut store = seeded_store();
        // Two adds of 6 pass individually; combined 12 exceeds stock of 10.
        store.add_to_cart("ana", "EA1", 6).unwrap();
        store.add_to_cart("ana", "EA1", 6).unwrap();
        store.add_to_cart("ana", "SP1", 3).unwrap();

        let err = store.checkout("ana").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 10, requested: 12, .. }
        ));

        // Atomic failure: cart intact, no stock touched, no sale recorded.
        assert_eq!(store.user("ana").unwrap().cart.item_count(), 2);
        assert_eq!(store.product("EA1").unwrap().available_units, 10);
        assert_eq!(store.product("SP1").unwrap().available_units, 50);
        assert_eq!(store.total_sales().cents(), 0);
        assert!(store.receipts().is_empty());
    }

    #[test]
    fn test_sales_total_accumulates_across_checkouts() {
        let mut store = seeded_store();

        store.add_to_cart("ana", "EA1", 2).unwrap();
        store.checkout("ana").unwrap();
        store.add_to_cart("ana", "SP1", 3).unwrap();
        store.checkout("ana").unwrap();

        // 200 + (0.8 × 3 × 10) = 224
        assert_eq!(store.total_sales().cents(), 224);
        assert_eq!(store.receipts().len(), 2);
    }

    #[test]
    fn test_remove_from_cart() {
        let mut store = seeded_store();
        store.add_to_cart("ana", "EA1", 2).unwrap();

        store.remove_from_cart("ana", "EA1").unwrap();
        assert!(store.user("ana").unwrap().cart.is_empty());

        // Absent SKU: still Ok
        store.remove_from_cart("ana", "EA1").unwrap();
    }

    #[test]
    fn test_catalog_price_edit_affects_pending_cart() {
        let mut store = seeded_store();
        store.add_to_cart("ana", "EA1", 3).unwrap();

        // Re-register at a new price before checkout: live-price contract.
        store.register_product(Product::new("EA1", "Keyboard", "RGB keyboard", 10, 150));
        let charged = store.checkout("ana").unwrap();
        assert_eq!(charged.cents(), 450);
    }
}
