//! # Error Types
//!
//! Domain-specific error types for catshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catshop-core errors (this file)                                       │
//! │  ├── CoreError        - Cart document could not be accepted            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catshop-cli errors (in app)                                           │
//! │  └── CliError         - File, config and core failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr + exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails. These errors exist for the boundary, where
//! caller data is checked before it reaches the engine.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning caller input into a [`crate::Cart`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart document is not well-formed JSON or has the wrong shape.
    #[error("Malformed cart document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks a business rule.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// ## When These Occur
/// ```text
/// UI cart JSON
///      │
///      ▼
/// validate_line_item / validate_coupon_value / ...
///      │
///      ├── price -100        → InvalidLineItem
///      ├── type "fixed"      → UnsupportedCouponKind
///      ├── value 150         → InvalidCouponValue
///      └── OK → Cart handed to pricing
/// ```
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A line item has a negative price or quantity, or no id.
    #[error("Invalid line item '{id}': {reason}")]
    InvalidLineItem { id: String, reason: String },

    /// Two line items in one cart share an id.
    #[error("Duplicate line item id '{id}'")]
    DuplicateItemId { id: String },

    /// Coupon kind other than the supported ones.
    #[error("Unsupported coupon kind '{kind}', expected one of: {allowed:?}")]
    UnsupportedCouponKind { kind: String, allowed: Vec<String> },

    /// Coupon percentage outside [0, 100] or not a number.
    #[error("Coupon value must be between 0 and 100, got {value}")]
    InvalidCouponValue { value: f64 },

    /// Coupon minimum amount is negative.
    #[error("Coupon minimum amount must be non-negative, got {min_amount}")]
    InvalidMinAmount { min_amount: i64 },

    /// Line totals do not fit in the money range.
    #[error("Cart subtotal exceeds the representable range")]
    SubtotalOverflow,
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
        let err = ValidationError::InvalidLineItem {
            id: "A".to_string(),
            reason: "price must be non-negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid line item 'A': price must be non-negative"
        );

        let err = ValidationError::InvalidCouponValue { value: 150.0 };
        assert_eq!(
            err.to_string(),
            "Coupon value must be between 0 and 100, got 150"
        );

        let err = ValidationError::UnsupportedCouponKind {
            kind: "fixed".to_string(),
            allowed: vec!["percent".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported coupon kind 'fixed', expected one of: [\"percent\"]"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::SubtotalOverflow;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_json_error_converts_to_core_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::Parse(_)));
    }
}
