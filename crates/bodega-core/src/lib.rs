//! # bodega-core: Pure Business Logic for Bodega POS
//!
//! This crate is the **heart** of Bodega POS: an in-memory shopping-cart and
//! pricing engine with zero I/O dependencies. Frontends stay thin; every
//! business decision lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                   Bodega POS Architecture                     │
//! │                                                               │
//! │  ┌────────────────────┐      ┌────────────────────┐           │
//! │  │  Console frontend  │      │  Web frontend      │           │
//! │  │  (apps/console)    │      │  (ts-rs bindings)  │           │
//! │  └─────────┬──────────┘      └─────────┬──────────┘           │
//! │            └───────────┬───────────────┘                      │
//! │  ┌─────────────────────▼─────────────────────────────────┐    │
//! │  │            ★ bodega-core (THIS CRATE) ★               │    │
//! │  │                                                       │    │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌───────────────┐ │    │
//! │  │  │ pricing │ │  money  │ │  cart  │ │ store/product │ │    │
//! │  │  │  rules  │ │  cents  │ │ lines  │ │ catalog+users │ │    │
//! │  │  └─────────┘ └─────────┘ └────────┘ └───────────────┘ │    │
//! │  │                                                       │    │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS   │    │
//! │  └───────────────────────────────────────────────────────┘    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`pricing`] - The three pricing rules and their SKU-prefix dispatcher
//! - [`product`] - Products and the SKU → product catalog
//! - [`cart`] - Line items and per-user carts
//! - [`store`] - Catalog + users + checkout orchestration
//! - [`validation`] - Boundary validation for frontend input
//!
//! ## Example Usage
//!
//! ```rust
//! use bodega_core::product::Product;
//! use bodega_core::store::Store;
//!
//! let mut store = Store::new();
//! store.register_product(Product::new("EA1", "Keyboard", "RGB keyboard", 10, 100));
//! store.register_user("ana");
//!
//! let update = store.add_to_cart("ana", "EA1", 3).unwrap();
//! assert_eq!(update.line_total_cents, 300);
//!
//! let charged = store.checkout("ana").unwrap();
//! assert_eq!(charged.cents(), 300);
//! assert_eq!(store.product("EA1").unwrap().available_units, 7);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod product;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bodega_core::Money` instead of
// `use bodega_core::money::Money`

pub use cart::{Cart, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::PricingRule;
pub use product::{Catalog, Product};
pub use store::{CartLine, CartUpdate, CartView, Receipt, Store, User};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity accepted for a single add.
///
/// ## Business Reason
/// Guards against typos (10000 instead of 10) at the input boundary. The
/// ceiling is deliberately high because by-weight quantities are entered in
/// grams, so a legitimate add can be several thousand.
pub const MAX_ITEM_QUANTITY: i64 = 99_999;
