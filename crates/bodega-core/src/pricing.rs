//! # Pricing Rules
//!
//! The pricing-rule engine: a closed, fixed set of three pricing policies
//! selected by a SKU-prefix convention.
//!
//! ## Rule Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SKU ──► for_sku() checks rules in fixed priority order:    │
//! │                                                             │
//! │    1. Normal    prefix "EA"   qty × price                   │
//! │    2. ByWeight  prefix "WE"   qty × 1000 × price            │
//! │    3. Special   prefix "SP"   qty × price − block discount  │
//! │                                                             │
//! │  First match wins. No match ⇒ CoreError::NoPricingRule     │
//! │  (catalog data error, not user input error).                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why an Enum?
//! The rule set is closed and fixed, so a tagged enum with a pure function
//! per variant beats trait objects: `Copy`, exhaustive matching, and no
//! virtual dispatch. Rules are stateless and shared freely by line items.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Pricing Constants
// =============================================================================

/// Scaling factor for by-weight pricing: quantities are entered in grams,
/// unit prices are per-kilogram-equivalent after scaling. Fixed design
/// constant, not user-configurable.
pub const GRAMS_PER_KILOGRAM: i64 = 1000;

/// Units per discount block for Special pricing.
pub const SPECIAL_BLOCK_UNITS: i64 = 3;

/// Discount per complete block, in basis points (2000 = 20%).
pub const SPECIAL_BLOCK_DISCOUNT_BPS: u32 = 2000;

/// Cumulative discount cap, in basis points (5000 = 50%).
pub const SPECIAL_MAX_DISCOUNT_BPS: u32 = 5000;

// =============================================================================
// Pricing Rule
// =============================================================================

/// A pricing policy, bound to a line item once when the item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingRule {
    /// Per-unit pricing (SKU prefix `EA`).
    Normal,
    /// Per-weight pricing (SKU prefix `WE`): quantity in grams, scaled by
    /// [`GRAMS_PER_KILOGRAM`].
    ByWeight,
    /// Per-unit pricing with a block discount (SKU prefix `SP`).
    Special,
}

/// Dispatch priority. Checked in order; first applicable rule wins.
const RULE_PRIORITY: [PricingRule; 3] =
    [PricingRule::Normal, PricingRule::ByWeight, PricingRule::Special];

impl PricingRule {
    /// Returns whether this rule applies to the given SKU (case-sensitive).
    pub fn applies_to(&self, sku: &str) -> bool {
        match self {
            PricingRule::Normal => sku.starts_with("EA"),
            PricingRule::ByWeight => sku.starts_with("WE"),
            PricingRule::Special => sku.starts_with("SP"),
        }
    }

    /// Selects the applicable rule for a SKU.
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::pricing::PricingRule;
    ///
    /// assert_eq!(PricingRule::for_sku("EA001").unwrap(), PricingRule::Normal);
    /// assert!(PricingRule::for_sku("XX001").is_err());
    /// ```
    pub fn for_sku(sku: &str) -> CoreResult<Self> {
        RULE_PRIORITY
            .iter()
            .copied()
            .find(|rule| rule.applies_to(sku))
            .ok_or_else(|| CoreError::NoPricingRule(sku.to_string()))
    }

    /// Computes the line total for a quantity at a unit price.
    ///
    /// ## Policies
    /// - **Normal**: `quantity × unit_price`
    /// - **ByWeight**: `quantity × 1000 × unit_price`
    /// - **Special**: `quantity × unit_price`, reduced by 20% per complete
    ///   block of 3 units, capped at 50%. The discount applies to the full
    ///   pre-discount amount, not per-block.
    ///
    /// ## Example
    /// ```rust
    /// use bodega_core::money::Money;
    /// use bodega_core::pricing::PricingRule;
    ///
    /// let price = Money::from_cents(1000); // $10.00
    ///
    /// // 6 units ⇒ 2 blocks ⇒ 40% off: 6 × $10 × 0.6 = $36
    /// let total = PricingRule::Special.line_total(6, price);
    /// assert_eq!(total.cents(), 3600);
    /// ```
    pub fn line_total(&self, quantity: i64, unit_price: Money) -> Money {
        match self {
            PricingRule::Normal => unit_price.multiply_quantity(quantity),
            PricingRule::ByWeight => {
                unit_price.multiply_quantity(quantity * GRAMS_PER_KILOGRAM)
            }
            PricingRule::Special => {
                let blocks = quantity / SPECIAL_BLOCK_UNITS;
                let discount_bps = blocks
                    .saturating_mul(SPECIAL_BLOCK_DISCOUNT_BPS as i64)
                    .min(SPECIAL_MAX_DISCOUNT_BPS as i64) as u32;
                unit_price
                    .multiply_quantity(quantity)
                    .apply_percentage_discount(discount_bps)
            }
        }
    }

    /// Human-readable label for catalog listings.
    pub fn label(&self) -> &'static str {
        match self {
            PricingRule::Normal => "Normal",
            PricingRule::ByWeight => "By weight (qty in grams)",
            PricingRule::Special => "Special (bulk discount)",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
