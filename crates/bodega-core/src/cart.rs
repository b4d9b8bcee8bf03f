//! # Cart
//!
//! Ordered collection of line items, owned by exactly one user.
//!
//! ## Line Item Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  LineItem                                                   │
//! │  ├── sku       non-owning catalog key (the catalog owns     │
//! │  │             the product; the cart never copies it)       │
//! │  ├── quantity  merged across repeated adds of the same SKU  │
//! │  └── rule      resolved ONCE at creation, never re-resolved │
//! │                                                             │
//! │  Totals read the unit price LIVE from the catalog, so a     │
//! │  catalog price edit before checkout changes the computed    │
//! │  total. The rule binding does not change.                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::PricingRule;
use crate::product::{Catalog, Product};

// =============================================================================
// Line Item
// =============================================================================

/// One cart line: a product key, a quantity, and the bound pricing rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// SKU of the product this line refers to.
    pub sku: String,

    /// Quantity in the cart (grams for by-weight products). Always > 0.
    pub quantity: i64,

    /// Pricing rule resolved when the line was first created.
    pub rule: PricingRule,
}

impl LineItem {
    /// Creates a line item, resolving the pricing rule from the product SKU.
    ///
    /// Fails with `NoPricingRule` if the SKU matches no rule prefix.
    pub fn new(product: &Product, quantity: i64) -> CoreResult<Self> {
        Ok(LineItem {
            sku: product.sku.clone(),
            quantity,
            rule: PricingRule::for_sku(&product.sku)?,
        })
    }

    /// Computes this line's subtotal at the given unit price.
    #[inline]
    pub fn total(&self, unit_price: Money) -> Money {
        self.rule.line_total(self.quantity, unit_price)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A user's shopping cart.
///
/// ## Invariants
/// - At most one line item per SKU (adding the same SKU merges quantities)
/// - Insertion order preserved for display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart, merging with an existing line for the
    /// same SKU. Returns the affected line's new subtotal.
    ///
    /// ## Behavior
    /// - Only the incremental `quantity` is checked against availability,
    ///   never the combined line quantity. Repeated adds can therefore
    ///   request more than total stock without being summed-and-rejected;
    ///   checkout is where the combined quantity gets enforced. This
    ///   latitude is part of the documented contract.
    /// - On merge, the existing rule binding is kept (no re-resolution).
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<Money> {
        if !product.has_available(quantity) {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.available_units,
                requested: quantity,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.sku == product.sku) {
            item.quantity += quantity;
            return Ok(item.total(product.price()));
        }

        let item = LineItem::new(product, quantity)?;
        let line_total = item.total(product.price());
        self.items.push(item);
        Ok(line_total)
    }

    /// Removes any line item matching the SKU. Silent no-op if absent.
    pub fn remove_item(&mut self, sku: &str) {
        self.items.retain(|item| item.sku != sku);
    }

    /// Sums every line's subtotal, reading unit prices live from the catalog.
    pub fn total(&self, catalog: &Catalog) -> CoreResult<Money> {
        let mut total = Money::zero();
        for item in &self.items {
            let product = catalog.get(&item.sku)?;
            total += item.total(product.price());
        }
        Ok(total)
    }

    /// The line items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of unique line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all line items (the cart itself survives checkout).
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(Product::new("EA001", "Keyboard", "RGB keyboard", 10, 100));
        catalog.insert(Product::new("SP001", "Soda 1.5L", "multipack", 30, 400));
        catalog
    }

    #[test]
    fn test_add_item_within_stock() {
        let catalog = catalog();
        let mut cart = Cart::new();

        let line_total = cart
            .add_item(catalog.get("EA001").unwrap(), 3)
            .unwrap();
        assert_eq!(line_total.cents(), 300);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(&catalog).unwrap().cents(), 300);
    }

    #[test]
    fn test_add_item_insufficient_stock() {
        let catalog = catalog();
        let mut cart = Cart::new();

        let err = cart.add_item(catalog.get("EA001").unwrap(), 11).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 10,
                requested: 11,
                ..
            }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_duplicate_add_merges_into_one_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let product = catalog.get("EA001").unwrap();

        cart.add_item(product, 2).unwrap();
        cart.add_item(product, 3).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_repeated_adds_only_check_incremental_quantity() {
        // Stock is 10; two adds of 6 each pass individually even though the
        // combined line quantity (12) exceeds stock. Checkout catches it.
        let catalog = catalog();
        let mut cart = Cart::new();
        let product = catalog.get("EA001").unwrap();

        cart.add_item(product, 6).unwrap();
        cart.add_item(product, 6).unwrap();
        assert_eq!(cart.items()[0].quantity, 12);
    }

    #[test]
    fn test_merged_line_reprices_under_bound_rule() {
        // 2 + 4 = 6 units of an SP product: two blocks ⇒ 40% off
        let catalog = catalog();
        let mut cart = Cart::new();
        let product = catalog.get("SP001").unwrap();

        cart.add_item(product, 2).unwrap();
        let line_total = cart.add_item(product, 4).unwrap();
        assert_eq!(line_total.cents(), 1440); // 0.6 × 6 × $4.00
    }

    #[test]
    fn test_remove_item() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.get("EA001").unwrap(), 2).unwrap();

        cart.remove_item("EA001");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_sku_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.get("EA001").unwrap(), 2).unwrap();

        cart.remove_item("SP001");
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(&catalog).unwrap().cents(), 200);
    }

    #[test]
    fn test_total_reads_prices_live() {
        let mut catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.get("EA001").unwrap(), 2).unwrap();
        assert_eq!(cart.total(&catalog).unwrap().cents(), 200);

        // Re-register the product at a new price: the cart total follows.
        catalog.insert(Product::new("EA001", "Keyboard", "RGB keyboard", 10, 150));
        assert_eq!(cart.total(&catalog).unwrap().cents(), 300);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(catalog.get("SP001").unwrap(), 1).unwrap();
        cart.add_item(catalog.get("EA001").unwrap(), 1).unwrap();

        let skus: Vec<&str> = cart.items().iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["SP001", "EA001"]);
    }
}
