//! # Validation Module
//!
//! Boundary checks that run before a cart reaches the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browsing UI (TypeScript)                                     │
//! │  └── Builds line items and coupons, uses generated bindings            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Boundary (THIS MODULE)                                       │
//! │  ├── Shape: CartDocument deserialization                               │
//! │  └── Rules: non-negative prices, known coupon kinds, value in [0,100]  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing (crate::pricing)                                     │
//! │  └── Trusts its input, never fails                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catshop_core::validation::CartDocument;
//!
//! let cart = CartDocument::from_json(r#"{
//!     "items": [{ "id": "A", "name": "Bengal", "price": 2000, "quantity": 2 }],
//!     "coupon": { "type": "percent", "value": 10, "minAmount": 2000 }
//! }"#).unwrap();
//!
//! assert_eq!(cart.items[0].unit_price_cents, 2000);
//! assert_eq!(cart.coupon.unwrap().min_amount_cents, Some(2000));
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::trace;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Cart, Coupon, Discount, LineItem, Percentage};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Coupon kinds the engine knows how to apply.
pub const SUPPORTED_COUPON_KINDS: &[&str] = &["percent"];

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a single line item.
///
/// ## Rules
/// - `id` must not be blank
/// - unit price must be non-negative (zero is allowed: free items)
/// - quantity must be non-negative
///
/// ## Example
/// ```rust
/// use catshop_core::validation::validate_line_item;
/// use catshop_core::LineItem;
///
/// assert!(validate_line_item(&LineItem::new("A", "Bengal", 2000, 1)).is_ok());
/// assert!(validate_line_item(&LineItem::new("A", "Bengal", -1, 1)).is_err());
/// ```
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(invalid_item(item, "id is required"));
    }

    if item.unit_price_cents < 0 {
        return Err(invalid_item(item, "price must be non-negative"));
    }

    if item.quantity < 0 {
        return Err(invalid_item(item, "quantity must be non-negative"));
    }

    Ok(())
}

/// Validates every item of a cart and returns their subtotal.
///
/// On top of [`validate_line_item`], ids must be unique within the cart and
/// the subtotal must fit in [`Money`].
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<Money> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut subtotal = Money::zero();

    for item in items {
        validate_line_item(item)?;

        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::DuplicateItemId {
                id: item.id.clone(),
            });
        }

        subtotal = item
            .unit_price()
            .checked_multiply_quantity(item.quantity)
            .and_then(|line| subtotal.checked_add(line))
            .ok_or(ValidationError::SubtotalOverflow)?;
    }

    Ok(subtotal)
}

fn invalid_item(item: &LineItem, reason: &str) -> ValidationError {
    ValidationError::InvalidLineItem {
        id: item.id.clone(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Coupon Validators
// =============================================================================

/// Validates a coupon kind tag.
///
/// ## Example
/// ```rust
/// use catshop_core::validation::validate_coupon_kind;
///
/// assert!(validate_coupon_kind("percent").is_ok());
/// assert!(validate_coupon_kind("fixed").is_err());
/// ```
pub fn validate_coupon_kind(kind: &str) -> ValidationResult<()> {
    if SUPPORTED_COUPON_KINDS.contains(&kind) {
        return Ok(());
    }

    Err(ValidationError::UnsupportedCouponKind {
        kind: kind.to_string(),
        allowed: SUPPORTED_COUPON_KINDS.iter().map(|k| k.to_string()).collect(),
    })
}

/// Validates a percent value and converts it to a [`Percentage`].
///
/// ## Rules
/// - Must be a finite number between 0 and 100 (inclusive)
/// - Every written digit is kept; nothing is rounded here
///
/// ## Example
/// ```rust
/// use catshop_core::validation::validate_coupon_value;
/// use catshop_core::{Decimal, Percentage};
///
/// assert_eq!(validate_coupon_value(10.0).unwrap(), Percentage::from_bps(1000));
/// assert_eq!(validate_coupon_value(12.345).unwrap().value(), Decimal::new(12_345, 3));
/// assert!(validate_coupon_value(100.5).is_err());
/// assert!(validate_coupon_value(f64::NAN).is_err());
/// ```
pub fn validate_coupon_value(value: f64) -> ValidationResult<Percentage> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::InvalidCouponValue { value });
    }

    Percentage::from_percentage(value).ok_or(ValidationError::InvalidCouponValue { value })
}

/// Validates a coupon minimum amount.
pub fn validate_min_amount(min_amount: i64) -> ValidationResult<Money> {
    if min_amount < 0 {
        return Err(ValidationError::InvalidMinAmount { min_amount });
    }

    Ok(Money::from_cents(min_amount))
}

/// Validates a coupon built in code rather than parsed from a document.
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    match coupon.discount {
        Discount::Percent { rate } if rate < Percentage::ZERO || rate > Percentage::FULL => {
            return Err(ValidationError::InvalidCouponValue {
                value: rate.percentage(),
            });
        }
        Discount::Percent { .. } => {}
    }

    if let Some(min_amount) = coupon.min_amount_cents {
        validate_min_amount(min_amount)?;
    }

    Ok(())
}

// =============================================================================
// Cart Document
// =============================================================================

/// A cart as the browsing UI sends it.
///
/// Field names follow the UI (`price`, `type`, `value` in percent). Use
/// [`CartDocument::into_cart`] to obtain a validated [`Cart`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDocument {
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    pub coupon: Option<CouponInput>,
}

/// A line item as the UI sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub id: String,
    pub name: String,
    /// Unit price in minor units.
    pub price: i64,
    pub quantity: i64,
}

/// A coupon as the UI sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    #[serde(rename = "type")]
    pub kind: String,
    /// Discount in percent, e.g. `10` for 10%.
    pub value: f64,
    pub min_amount: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CartDocument {
    /// Parses and validates a cart document.
    pub fn from_json(json: &str) -> CoreResult<Cart> {
        let document: CartDocument = serde_json::from_str(json)?;
        Ok(document.into_cart()?)
    }

    /// Validates the document and converts it into a [`Cart`].
    pub fn into_cart(self) -> ValidationResult<Cart> {
        let items: Vec<LineItem> = self.items.into_iter().map(LineItem::from).collect();
        let subtotal = validate_line_items(&items)?;

        let coupon = self.coupon.map(Coupon::try_from).transpose()?;

        trace!(items = items.len(), subtotal = %subtotal, "cart document validated");
        Ok(Cart { items, coupon })
    }
}

/// Field mapping only. Item rules are enforced once, for the whole cart, by
/// [`validate_line_items`].
impl From<LineItemInput> for LineItem {
    fn from(input: LineItemInput) -> Self {
        LineItem::new(input.id, input.name, input.price, input.quantity)
    }
}

impl TryFrom<CouponInput> for Coupon {
    type Error = ValidationError;

    fn try_from(input: CouponInput) -> ValidationResult<Self> {
        validate_coupon_kind(&input.kind)?;
        let rate = validate_coupon_value(input.value)?;

        let mut coupon = Coupon::percent(rate);
        if let Some(min_amount) = input.min_amount {
            coupon = coupon.with_min_amount(validate_min_amount(min_amount)?);
        }
        if let Some(expires_at) = input.expires_at {
            coupon = coupon.expiring_at(expires_at);
        }

        Ok(coupon)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
