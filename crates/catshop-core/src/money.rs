//! # Money Module
//!
//! Provides the `Money` type for whole minor-unit amounts and
//! `PreciseAmount` for the unrounded intermediate between discount and tax.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + exact decimal rates                │
//! │    9000 × (1 − 0.12345)  = 7888.95        (decimal, unrounded)          │
//! │    7888.95 × 1.8         = 14200.11       (decimal, unrounded)          │
//! │    round(14200.11)       = 14200          the only rounding step        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catshop_core::money::{Money, PreciseAmount};
//! use catshop_core::{Percentage, TaxRate};
//!
//! let subtotal = Money::from_cents(9000);
//! let discounted = subtotal.discounted_by(Percentage::from_bps(1000));
//! let total = discounted.with_tax_rounded(TaxRate::from_bps(8000));
//! assert_eq!(total.cents(), 14580);
//!
//! // Without a discount the subtotal is carried over unchanged.
//! let plain = PreciseAmount::from(subtotal).with_tax_rounded(TaxRate::from_bps(8000));
//! assert_eq!(plain.cents(), 16200);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::{Percentage, TaxRate};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (e.g. a discount amount) are Money too
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No currency**: the catalogue prices in a single currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use catshop_core::money::Money;
    ///
    /// let price = Money::from_cents(5000);
    /// assert_eq!(price.cents(), 5000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use catshop_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2000);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 4000);
    /// assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Adds two amounts, saturating at the i64 bounds.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts two amounts, saturating at the i64 bounds.
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Self {
        Money(self.0.saturating_sub(other.0))
    }

    /// Applies a percentage discount without rounding.
    ///
    /// Computes `self × (1 − rate/100)` in decimal. The result keeps every
    /// fractional minor unit so that tax is applied to the true discounted
    /// value.
    ///
    /// ## Example
    /// ```rust
    /// use catshop_core::money::Money;
    /// use catshop_core::{Decimal, Percentage};
    ///
    /// let discounted = Money::from_cents(999).discounted_by(Percentage::from_bps(1000));
    /// // 999 × 0.9 = 899.1, kept as is
    /// assert_eq!(discounted.value(), Decimal::new(8991, 1));
    /// ```
    pub fn discounted_by(&self, rate: Percentage) -> PreciseAmount {
        let kept = Decimal::ONE - rate.fraction();
        PreciseAmount(saturating_mul(Decimal::from(self.0), kept))
    }
}

// =============================================================================
// Precise Amount
// =============================================================================

/// An unrounded amount of minor units.
///
/// A decimal discount of an integer amount is exact here, so no precision is
/// lost between the discount and the tax step. Only
/// [`PreciseAmount::with_tax_rounded`] and [`PreciseAmount::round`] return
/// to whole minor units, and both round half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreciseAmount(Decimal);

impl PreciseAmount {
    /// Wraps a decimal amount of minor units.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        PreciseAmount(value)
    }

    /// Returns the amount in (fractional) minor units.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to whole minor units, half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use catshop_core::money::PreciseAmount;
    /// use catshop_core::Decimal;
    ///
    /// assert_eq!(PreciseAmount::new(Decimal::new(8995, 1)).round().cents(), 900);
    /// assert_eq!(PreciseAmount::new(Decimal::new(8994999, 4)).round().cents(), 899);
    /// ```
    pub fn round(&self) -> Money {
        money_from_decimal(self.0)
    }

    /// Applies `rate` on top of this amount and rounds the result to whole
    /// minor units, half away from zero.
    ///
    /// This is the only place in the pricing pipeline where precision is
    /// given up.
    ///
    /// ## Example
    /// ```rust
    /// use catshop_core::money::{Money, PreciseAmount};
    /// use catshop_core::{Decimal, TaxRate};
    ///
    /// let amount = PreciseAmount::from(Money::from_cents(1000));
    /// assert_eq!(amount.with_tax_rounded(TaxRate::from_bps(8000)).cents(), 1800);
    ///
    /// // 0.25 × 1.8 = 0.45 → 0, 2.5 × 1.8 = 4.5 → 5
    /// let quarter = PreciseAmount::new(Decimal::new(25, 2));
    /// assert_eq!(quarter.with_tax_rounded(TaxRate::from_bps(8000)).cents(), 0);
    /// let two_and_a_half = PreciseAmount::new(Decimal::new(25, 1));
    /// assert_eq!(two_and_a_half.with_tax_rounded(TaxRate::from_bps(8000)).cents(), 5);
    /// ```
    pub fn with_tax_rounded(&self, rate: TaxRate) -> Money {
        money_from_decimal(saturating_mul(self.0, Decimal::ONE + rate.fraction()))
    }
}

impl From<Money> for PreciseAmount {
    fn from(money: Money) -> Self {
        PreciseAmount(Decimal::from(money.0))
    }
}

fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(if a.is_sign_negative() != b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

// Saturates instead of wrapping when a rounded amount leaves the i64 range.
fn money_from_decimal(value: Decimal) -> Money {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    match rounded.to_i64() {
        Some(cents) => Money(cents),
        None if rounded.is_sign_negative() => Money(i64::MIN),
        None => Money(i64::MAX),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the raw minor-unit value. Currency formatting belongs to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Saturates at the i64 bounds rather than overflowing.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |total, amount| total.saturating_add(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TAX: TaxRate = TaxRate::from_bps(8000);

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(format!("{}", money), "1099");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [4000, 5000].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 9000);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_checked_operations() {
        assert_eq!(
            Money::from_cents(2000).checked_multiply_quantity(2),
            Some(Money::from_cents(4000))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_saturating_operations() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(Money::from_cents(i64::MAX / 2 + 1).multiply_quantity(2), max);
        assert_eq!(Money::from_cents(-2).multiply_quantity(i64::MAX).cents(), i64::MIN);
        assert_eq!(max.saturating_add(Money::from_cents(1)), max);
        assert_eq!(
            Money::from_cents(i64::MIN).saturating_sub(Money::from_cents(1)).cents(),
            i64::MIN
        );

        let total: Money = [max, max, Money::from_cents(-5)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX - 5);
    }

    #[test]
    fn test_discount_is_not_rounded() {
        // 999 × 0.9 = 899.1
        let discounted = Money::from_cents(999).discounted_by(Percentage::from_bps(1000));
        assert_eq!(discounted.value(), Decimal::new(8991, 1));
        assert_eq!(discounted.round().cents(), 899);
    }

    #[test]
    fn test_fractional_percent_is_exact() {
        // 9000 × (1 − 0.12345) = 7888.95
        let rate = Percentage::new(Decimal::new(12_345, 3));
        let discounted = Money::from_cents(9000).discounted_by(rate);
        assert_eq!(discounted.value(), Decimal::new(788_895, 2));

        // 7888.95 × 1.8 = 14200.11 (rounding the rate to 12.35% would give 14199)
        assert_eq!(discounted.with_tax_rounded(TAX).cents(), 14200);
    }

    #[test]
    fn test_full_and_zero_discount() {
        let subtotal = Money::from_cents(9000);
        assert!(subtotal.discounted_by(Percentage::FULL).value().is_zero());
        assert_eq!(
            subtotal.discounted_by(Percentage::ZERO),
            PreciseAmount::from(subtotal)
        );
    }

    #[test]
    fn test_tax_applied_to_unrounded_discount() {
        // 5 × 0.9 = 4.5 → × 1.8 = 8.1 → 8 (rounding 4.5 first would give 9)
        let discounted = Money::from_cents(5).discounted_by(Percentage::from_bps(1000));
        assert_eq!(discounted.with_tax_rounded(TAX).cents(), 8);

        // 999 × 0.9 = 899.1 → × 1.8 = 1618.38 → 1618
        let discounted = Money::from_cents(999).discounted_by(Percentage::from_bps(1000));
        assert_eq!(discounted.with_tax_rounded(TAX).cents(), 1618);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        let amount = |mantissa: i64, scale: u32| PreciseAmount::new(Decimal::new(mantissa, scale));

        assert_eq!(amount(5, 1).round().cents(), 1);
        assert_eq!(amount(4999, 4).round().cents(), 0);
        assert_eq!(amount(-5, 1).round().cents(), -1);
        assert_eq!(amount(-4999, 4).round().cents(), 0);
        assert_eq!(amount(15, 1).round().cents(), 2);
        assert_eq!(amount(25, 1).round().cents(), 3);
    }

    #[test]
    fn test_tax_rounding_at_half() {
        // 2.5 × 1.8 = 4.5 → 5
        assert_eq!(PreciseAmount::new(Decimal::new(25, 1)).with_tax_rounded(TAX).cents(), 5);
        // 7.5 × 1.8 = 13.5 → 14
        assert_eq!(PreciseAmount::new(Decimal::new(75, 1)).with_tax_rounded(TAX).cents(), 14);
    }

    #[test]
    fn test_rounding_saturates() {
        let huge = PreciseAmount::from(Money::from_cents(i64::MAX));
        assert_eq!(huge.with_tax_rounded(TAX).cents(), i64::MAX);

        let tiny = PreciseAmount::from(Money::from_cents(i64::MIN));
        assert_eq!(tiny.with_tax_rounded(TAX).cents(), i64::MIN);

        let beyond_decimal = PreciseAmount::new(Decimal::MAX);
        assert_eq!(beyond_decimal.with_tax_rounded(TAX).cents(), i64::MAX);
    }
}
