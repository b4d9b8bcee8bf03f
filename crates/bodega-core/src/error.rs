//! # Error Types
//!
//! Domain-specific error types for bodega-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  bodega-core errors (this file)                             │
//! │  ├── CoreError        - General domain errors               │
//! │  └── ValidationError  - Input validation failures           │
//! │                                                             │
//! │  Flow: ValidationError → CoreError → frontend message       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every error is synchronous, local, and non-fatal: frontends print
//!    the message and continue their interaction loop

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They terminate the single operation that raised them, nothing more.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product SKU does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// User name has not been registered with the store.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No pricing rule prefix matches the SKU.
    ///
    /// ## When This Occurs
    /// A product was registered with a SKU outside the `EA`/`WE`/`SP`
    /// conventions. This is a catalog data error, not a user input error:
    /// the SKU can never be added to a cart until the catalog is fixed.
    #[error("No applicable pricing rule for SKU: {0}")]
    NoPricingRule(String),

    /// Requested quantity exceeds availability, at add-time or checkout-time.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the calling boundary (console input, web form) before business
/// logic runs. The core's numeric methods assume already-validated input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., SKU with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            sku: "EA001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for EA001: available 3, requested 5"
        );

        let err = CoreError::NoPricingRule("XX001".to_string());
        assert_eq!(err.to_string(), "No applicable pricing rule for SKU: XX001");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "sku".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
