//! # Domain Types
//!
//! Core domain types used by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │     Coupon      │   │    Discount     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (per cart)  │   │  discount  ─────┼──►│  Percent{rate}  │       │
//! │  │  name           │   │  min_amount?    │   └─────────────────┘       │
//! │  │  unit_price     │   │  expires_at?    │                             │
//! │  │  quantity       │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   Percentage    │   │      Cart       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  percent (dec)  │   │  items          │       │
//! │  │  8000 = 80%     │   │  12.345 = 12.3% │   │  coupon?        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are immutable inputs as far as pricing is concerned. The
//! engine borrows them and never mutates caller data.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_coupon_value;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 8000 bps = 80%, the catalogue's fixed rate (see [`crate::TAX_RATE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction of one (`0.8` for 8000 bps).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A discount rate as a percent number (`10` = 10%).
///
/// The browsing UI sends plain JSON numbers. [`Percentage::from_percentage`]
/// keeps the value exactly as written (`12.345` stays `12.345`), so the
/// discount step never rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(#[ts(type = "number")] Decimal);

impl Percentage {
    /// 0%, a coupon that takes nothing off.
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);

    /// 100%, the largest rate a coupon may carry.
    pub const FULL: Percentage = Percentage(Decimal::ONE_HUNDRED);

    /// Creates a percentage from a decimal percent number.
    #[inline]
    pub const fn new(percent: Decimal) -> Self {
        Percentage(percent)
    }

    /// Creates a percentage from basis points (1000 = 10%).
    pub fn from_bps(bps: u32) -> Self {
        Percentage(Decimal::new(i64::from(bps), 2))
    }

    /// Creates a percentage from a percent number without losing the digits
    /// the caller wrote.
    ///
    /// The float is read through its shortest decimal form, the same text a
    /// JSON encoder produces for it. Returns `None` for non-finite input or
    /// magnitudes a decimal cannot hold. Range checking is the job of
    /// [`crate::validation::validate_coupon_value`].
    ///
    /// ## Example
    /// ```rust
    /// use catshop_core::{Decimal, Percentage};
    ///
    /// let rate = Percentage::from_percentage(12.345).unwrap();
    /// assert_eq!(rate.value(), Decimal::new(12_345, 3));
    /// assert_eq!(Percentage::from_percentage(10.0), Some(Percentage::from_bps(1000)));
    /// assert_eq!(Percentage::from_percentage(f64::NAN), None);
    /// ```
    pub fn from_percentage(pct: f64) -> Option<Self> {
        if !pct.is_finite() {
            return None;
        }

        Decimal::from_str(&pct.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(pct))
            .map(|value| Percentage(value.normalize()))
    }

    /// Returns the percent number (`10` for 10%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction of one (`0.1` for 10%).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns the rate as a percent number (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl TryFrom<f64> for Percentage {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        validate_coupon_value(value)
    }
}

impl From<Percentage> for f64 {
    fn from(rate: Percentage) -> Self {
        rate.percentage()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A purchased line in the cart.
///
/// `id` is unique within one cart only. The same id may appear in another
/// customer's cart with a different price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub name: String,
    /// Unit price in minor currency units.
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price_cents: i64,
        quantity: i64,
    ) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            unit_price_cents,
            quantity,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total (unit price × quantity), saturating at the
    /// bounds of [`Money`].
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Discount
// =============================================================================

/// What a coupon takes off the subtotal.
///
/// Only percentage discounts exist today. New kinds (fixed amount, free
/// shipping) become new variants; the eligibility conditions on [`Coupon`]
/// stay shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Discount {
    /// Takes `rate` off the subtotal before tax.
    Percent { rate: Percentage },
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount coupon together with the conditions under which it applies.
///
/// Absent conditions impose no constraint:
/// - no `min_amount_cents`: any subtotal qualifies
/// - no `expires_at`: the coupon never expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub discount: Discount,

    /// Smallest subtotal (inclusive) the coupon applies to.
    pub min_amount_cents: Option<i64>,

    /// Last instant (inclusive) at which the coupon applies.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Creates an unconditional percentage coupon.
    ///
    /// ## Example
    /// ```rust
    /// use catshop_core::{Coupon, Money, Percentage};
    ///
    /// let coupon = Coupon::percent(Percentage::from_bps(1000))
    ///     .with_min_amount(Money::from_cents(2000));
    /// assert_eq!(coupon.min_amount(), Some(Money::from_cents(2000)));
    /// assert!(coupon.expires_at.is_none());
    /// ```
    pub fn percent(rate: Percentage) -> Self {
        Coupon {
            discount: Discount::Percent { rate },
            min_amount_cents: None,
            expires_at: None,
        }
    }

    /// Requires the subtotal to be at least `min`.
    pub fn with_min_amount(mut self, min: Money) -> Self {
        self.min_amount_cents = Some(min.cents());
        self
    }

    /// Makes the coupon expire after `expires_at`.
    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns the minimum subtotal as Money, if any.
    #[inline]
    pub fn min_amount(&self) -> Option<Money> {
        self.min_amount_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A validated cart: what the boundary hands to the pricing engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<LineItem>,
    pub coupon: Option<Coupon>,
}

impl Cart {
    /// Number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> i64 {
        total_quantity(&self.items)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sums quantities, saturating instead of overflowing.
pub(crate) fn total_quantity(items: &[LineItem]) -> i64 {
    items
        .iter()
        .fold(0i64, |total, item| total.saturating_add(item.quantity))
}

// =============================================================================
// Unit Tests
// =============================================================================
