//! # Pricing Module
//!
//! Turns line items and an optional coupon into the amount due.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Pricing Pipeline                             │
//! │                                                                         │
//! │  items ──► subtotal() ──┬──────────────────────────────┐               │
//! │                         │                              │ no coupon /   │
//! │                         ▼                              │ ineligible    │
//! │              check_eligibility(now) ──► eligible?      │               │
//! │                         │                  │ yes       │               │
//! │                         │                  ▼           │               │
//! │                         │          apply_discount()    │               │
//! │                         │         (no rounding here)   │               │
//! │                         │                  │           │               │
//! │                         │                  ▼           ▼               │
//! │                         └──────────────► finalize() ◄──┘               │
//! │                                    × (1 + TAX_RATE), round once         │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                                          total (Money)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Boundary Rules
//! Both coupon conditions use strict comparisons against the failing side:
//! - a coupon expiring exactly at `now` still applies
//! - a subtotal exactly equal to the minimum still qualifies
//!
//! ## Purity
//! Every function here is deterministic given its inputs and `now`. The
//! clock is read at most once per pricing, and only when the coupon carries
//! an expiry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::clock::{Clock, FixedClock};
use crate::money::{Money, PreciseAmount};
use crate::types::{total_quantity, Coupon, Discount, LineItem, TaxRate};
use crate::TAX_RATE;

// =============================================================================
// Subtotal Aggregator
// =============================================================================

/// Sums `unit price × quantity` over all items. An empty slice yields zero.
///
/// Inputs are trusted: negative prices or quantities are not rejected here.
/// Use [`crate::validation`] at the boundary. A subtotal beyond the range of
/// [`Money`] saturates rather than wrapping.
///
/// ## Example
/// ```rust
/// use catshop_core::pricing::subtotal;
/// use catshop_core::LineItem;
///
/// let items = [
///     LineItem::new("A", "Ragdoll", 2000, 2),
///     LineItem::new("B", "Maine Coon", 5000, 1),
/// ];
/// assert_eq!(subtotal(&items).cents(), 9000);
/// assert_eq!(subtotal(&[]).cents(), 0);
/// ```
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

// =============================================================================
// Coupon Eligibility Checker
// =============================================================================

/// Outcome of checking a coupon against a subtotal and an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    /// Every condition holds; the discount applies.
    Eligible,

    /// `expires_at` lies strictly before the pricing instant.
    Expired {
        #[serde(rename = "expiresAt")]
        #[ts(as = "String")]
        expires_at: DateTime<Utc>,
    },

    /// The subtotal is strictly below the coupon's minimum.
    BelowMinimum {
        #[serde(rename = "minAmount")]
        min_amount: Money,
        subtotal: Money,
    },
}

impl Eligibility {
    /// Returns true for [`Eligibility::Eligible`].
    #[inline]
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Checks a coupon's conditions, reporting which one failed.
///
/// Expiry is checked before the minimum amount.
///
/// ## Example
/// ```rust
/// use catshop_core::pricing::{check_eligibility, Eligibility};
/// use catshop_core::{Coupon, Money, Percentage};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// let coupon = Coupon::percent(Percentage::from_bps(1000))
///     .with_min_amount(Money::from_cents(2000));
///
/// assert_eq!(
///     check_eligibility(Money::from_cents(1000), &coupon, now),
///     Eligibility::BelowMinimum {
///         min_amount: Money::from_cents(2000),
///         subtotal: Money::from_cents(1000),
///     }
/// );
/// assert!(check_eligibility(Money::from_cents(2000), &coupon, now).is_eligible());
/// ```
pub fn check_eligibility(subtotal: Money, coupon: &Coupon, now: DateTime<Utc>) -> Eligibility {
    check_with_clock(subtotal, coupon, &FixedClock::new(now))
}

/// Returns true if `coupon` may be applied to `subtotal` at `now`.
pub fn is_eligible(subtotal: Money, coupon: &Coupon, now: DateTime<Utc>) -> bool {
    check_eligibility(subtotal, coupon, now).is_eligible()
}

// Only touches the clock when the coupon can actually expire.
fn check_with_clock<C: Clock + ?Sized>(subtotal: Money, coupon: &Coupon, clock: &C) -> Eligibility {
    if let Some(expires_at) = coupon.expires_at {
        if expires_at < clock.now() {
            return Eligibility::Expired { expires_at };
        }
    }

    if let Some(min_amount) = coupon.min_amount() {
        if subtotal < min_amount {
            return Eligibility::BelowMinimum {
                min_amount,
                subtotal,
            };
        }
    }

    Eligibility::Eligible
}

// =============================================================================
// Discount Applicator
// =============================================================================

/// Applies the coupon's discount to `subtotal` without rounding.
///
/// Callers decide eligibility first; this function does not look at the
/// coupon's conditions.
pub fn apply_discount(subtotal: Money, coupon: &Coupon) -> PreciseAmount {
    match coupon.discount {
        Discount::Percent { rate } => subtotal.discounted_by(rate),
    }
}

// =============================================================================
// Tax Finalizer
// =============================================================================

/// Adds [`TAX_RATE`] and rounds half away from zero to whole minor units.
///
/// ## Example
/// ```rust
/// use catshop_core::money::{Money, PreciseAmount};
/// use catshop_core::pricing::finalize;
///
/// assert_eq!(finalize(PreciseAmount::from(Money::from_cents(9000))).cents(), 16200);
/// ```
pub fn finalize(amount: PreciseAmount) -> Money {
    amount.with_tax_rounded(TAX_RATE)
}

// =============================================================================
// Pipeline
// =============================================================================

/// Everything the cart screen shows next to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,

    /// `None` when no coupon was supplied.
    pub coupon: Option<Eligibility>,

    /// Subtotal minus the discounted amount, rounded for display. The total
    /// is computed from the unrounded discounted amount, not from this.
    pub discount: Money,

    pub tax_rate: TaxRate,
    pub total: Money,
}

/// Prices a cart and reports how the total was reached.
///
/// The clock is consulted only if `coupon` has an expiry.
pub fn price_cart<C: Clock + ?Sized>(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    clock: &C,
) -> PricingBreakdown {
    let subtotal = subtotal(items);
    let undiscounted = PreciseAmount::from(subtotal);

    let (eligibility, discounted) = match coupon {
        Some(coupon) => {
            let eligibility = check_with_clock(subtotal, coupon, clock);
            if eligibility.is_eligible() {
                (Some(eligibility), apply_discount(subtotal, coupon))
            } else {
                debug!(?eligibility, "coupon not applied");
                (Some(eligibility), undiscounted)
            }
        }
        None => (None, undiscounted),
    };

    let total = finalize(discounted);
    let discount = subtotal.saturating_sub(discounted.round());

    trace!(
        items = items.len(),
        subtotal = %subtotal,
        discount = %discount,
        total = %total,
        "cart priced"
    );

    PricingBreakdown {
        item_count: items.len(),
        total_quantity: total_quantity(items),
        subtotal,
        coupon: eligibility,
        discount,
        tax_rate: TAX_RATE,
        total,
    }
}

/// [`price_cart`] at a fixed instant.
pub fn price_cart_at(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    now: DateTime<Utc>,
) -> PricingBreakdown {
    price_cart(items, coupon, &FixedClock::new(now))
}

/// Computes the final amount due for a cart.
///
/// ```text
/// s = subtotal(items)
/// d = coupon eligible at now ? apply_discount(s, coupon) : s
/// total = finalize(d)
/// ```
///
/// ## Example
/// ```rust
/// use catshop_core::clock::SystemClock;
/// use catshop_core::pricing::calculate_cart_total;
/// use catshop_core::{Coupon, LineItem, Percentage};
///
/// let items = [
///     LineItem::new("A", "Ragdoll", 2000, 2),
///     LineItem::new("B", "Maine Coon", 5000, 1),
/// ];
/// let coupon = Coupon::percent(Percentage::from_bps(1000));
///
/// assert_eq!(calculate_cart_total(&items, None, &SystemClock).cents(), 16200);
/// assert_eq!(calculate_cart_total(&items, Some(&coupon), &SystemClock).cents(), 14580);
/// ```
pub fn calculate_cart_total<C: Clock + ?Sized>(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    clock: &C,
) -> Money {
    price_cart(items, coupon, clock).total
}

/// [`calculate_cart_total`] at a fixed instant.
pub fn calculate_cart_total_at(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    now: DateTime<Utc>,
) -> Money {
    calculate_cart_total(items, coupon, &FixedClock::new(now))
}

// =============================================================================
// Unit Tests
// =============================================================================
