//! # catshop-core: Pure Cart Pricing for Catshop
//!
//! This crate is the **heart** of Catshop. It turns the cat breeds a
//! customer picked into the amount they pay, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catshop Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Browsing UI (TypeScript)                       │   │
//! │  │    Breed list ──► Cart ──► Coupon entry ──► Total display      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ cart document (JSON)                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             catshop-cli / any other boundary                    │   │
//! │  │        parse + validate, pick a clock, print the total          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catshop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ subtotal  │  │  boundary │  │   │
//! │  │   │  Coupon   │  │  Precise  │  │ eligible  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL CLOCK • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Coupon, Cart, rates)
//! - [`money`] - Integer money and the unrounded intermediate amount
//! - [`clock`] - Injected source of "now" for coupon expiry
//! - [`pricing`] - Subtotal, eligibility, discount, tax, and the pipeline
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation and the UI cart document
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same items, coupon and instant = same total
//! 2. **No I/O**: the clock is a parameter, never a global
//! 3. **Exact Money**: integer minor units and decimal rates, no floating point
//! 4. **Round Once**: only the final tax step rounds
//!
//! ## Example Usage
//!
//! ```rust
//! use catshop_core::clock::FixedClock;
//! use catshop_core::pricing::calculate_cart_total;
//! use catshop_core::{Coupon, LineItem, Percentage};
//! use chrono::{TimeZone, Utc};
//!
//! let items = [LineItem::new("A", "Sample Product", 5000, 1)];
//! let coupon = Coupon::percent(Percentage::from_bps(1000))
//!     .expiring_at(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
//!
//! // Expired coupon is ignored: 5000 × 1.8
//! assert_eq!(calculate_cart_total(&items, Some(&coupon), &clock).cents(), 9000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, PreciseAmount};
pub use pricing::{calculate_cart_total, calculate_cart_total_at, price_cart, PricingBreakdown};
pub use types::*;

pub use rust_decimal::Decimal;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The tax multiplier applied to every cart: 0.8 (80%).
///
/// ## Business Reason
/// A single reduced rate covers the whole catalogue. It is deliberately not
/// configurable.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(8000);
