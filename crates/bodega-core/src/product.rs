//! # Product & Catalog
//!
//! Inventory-bearing products and the flat SKU → product catalog.
//!
//! Products are created at seed time and mutated only by checkout's stock
//! decrement. The catalog owns every product; carts refer to products by
//! SKU only and look prices up live (see [`crate::cart`]).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// ## Invariant
/// `available_units` never goes negative: the only mutation path is
/// [`Product::decrement`], which refuses to over-draw.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stock Keeping Unit - unique, immutable business identifier.
    /// The SKU prefix also selects the pricing rule (`EA`/`WE`/`SP`).
    pub sku: String,

    /// Display name shown in listings and on the cart.
    pub name: String,

    /// Longer description for product details.
    pub description: String,

    /// Current stock level. For by-weight products this counts grams.
    pub available_units: i64,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl Product {
    /// Creates a new product.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        available_units: i64,
        price_cents: i64,
    ) -> Self {
        Product {
            sku: sku.into(),
            name: name.into(),
            description: description.into(),
            available_units,
            price_cents,
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns whether at least `quantity` units are in stock.
    #[inline]
    pub fn has_available(&self, quantity: i64) -> bool {
        self.available_units >= quantity
    }

    /// Reduces stock by `quantity`, or fails without any partial effect.
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::product::Product;
    ///
    /// let mut product = Product::new("EA001", "Keyboard", "RGB keyboard", 10, 5999);
    /// product.decrement(3).unwrap();
    /// assert_eq!(product.available_units, 7);
    /// assert!(product.decrement(8).is_err());
    /// assert_eq!(product.available_units, 7); // unchanged on failure
    /// ```
    pub fn decrement(&mut self, quantity: i64) -> CoreResult<()> {
        if !self.has_available(quantity) {
            return Err(CoreError::InsufficientStock {
                sku: self.sku.clone(),
                available: self.available_units,
                requested: quantity,
            });
        }
        self.available_units -= quantity;
        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Flat mapping from SKU to owned product.
///
/// No duplicate check on insert: last write wins, mirroring the seed-time
/// registration contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: HashMap<String, Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Inserts or overwrites a product, keyed by its SKU.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.sku.clone(), product);
    }

    /// Looks up a product by SKU.
    pub fn get(&self, sku: &str) -> CoreResult<&Product> {
        self.products
            .get(sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))
    }

    /// Looks up a product for mutation (stock decrement at checkout).
    pub fn get_mut(&mut self, sku: &str) -> CoreResult<&mut Product> {
        self.products
            .get_mut(sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))
    }

    /// Iterates over all products, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> Product {
        Product::new("EA001", "Mechanical Keyboard", "RGB keyboard", 10, 5999)
    }

    #[test]
    fn test_has_available() {
        let product = keyboard();
        assert!(product.has_available(0));
        assert!(product.has_available(10));
        assert!(!product.has_available(11));
    }

    #[test]
    fn test_decrement() {
        let mut product = keyboard();
        product.decrement(4).unwrap();
        assert_eq!(product.available_units, 6);
    }

    #[test]
    fn test_decrement_insufficient_leaves_stock_unchanged() {
        let mut product = keyboard();
        let err = product.decrement(11).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 10,
                requested: 11,
                ..
            }
        ));
        assert_eq!(product.available_units, 10);
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = Catalog::new();
        catalog.insert(keyboard());

        assert_eq!(catalog.get("EA001").unwrap().name, "Mechanical Keyboard");
        assert!(matches!(
            catalog.get("EA999").unwrap_err(),
            CoreError::ProductNotFound(sku) if sku == "EA999"
        ));
    }

    #[test]
    fn test_catalog_last_write_wins() {
        let mut catalog = Catalog::new();
        catalog.insert(keyboard());
        catalog.insert(Product::new("EA001", "New Keyboard", "replacement", 5, 7999));

        assert_eq!(catalog.len(), 1);
        let product = catalog.get("EA001").unwrap();
        assert_eq!(product.name, "New Keyboard");
        assert_eq!(product.price_cents, 7999);
    }
}
