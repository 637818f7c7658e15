//! # Money Module
//!
//! Provides the `Money` type and the `extend` rule that every cart total
//! goes through.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floating point:                                            │
//! │    2.99 × 3 = 8.970000000000001  ❌ WRONG!                              │
//! │                                                                         │
//! │  A cart that adds then removes the same item must land on exactly      │
//! │  the total it started from. Floats drift; integers don't.              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    299 cents × 3 = 897 cents, and 897 − 897 = 0, always                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::{extend, Money, Sign};
//!
//! let price = Money::from_cents(199); // $1.99
//! let total = extend(Money::zero(), price, 2, Sign::Add).unwrap();
//! assert_eq!(total.to_string(), "$3.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a permissive removal can drive a cart total below zero
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **sqlx transparent**: stored as a plain INTEGER column
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.price ──► extend(cart.total, price, qty, ±) ──► Cart.total       │
/// │                                                          │              │
/// │                                              submit()    ▼              │
/// │                                                       Order.total      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(299); // Represents $2.99
    /// assert_eq!(price.cents(), 299);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-2, 99)` is -$2.99.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition. `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Checked subtraction. `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Checked multiplication by a quantity. `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_mul(3).unwrap().cents(), 897);
    /// assert!(Money::from_cents(i64::MAX).checked_mul(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Clamps negative values to zero.
    #[inline]
    pub const fn floor_at_zero(self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }
}

// =============================================================================
// Total Extension
// =============================================================================

/// Direction of a cart total adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Items are being added (+1).
    Add,
    /// Items are being removed (−1).
    Remove,
}

/// Computes `total + sign × price × quantity` exactly.
///
/// This is the one place a cart total changes. Both the add and remove
/// paths call it before touching the cart, so an overflow (`None`) leaves
/// the cart as it was.
///
/// ## Example
/// ```rust
/// use storefront_core::money::{extend, Money, Sign};
///
/// let price = Money::from_cents(299);
/// let removed = extend(Money::zero(), price, 1, Sign::Remove).unwrap();
/// assert_eq!(removed.cents(), -299);
/// ```
pub fn extend(total: Money, price: Money, quantity: i64, sign: Sign) -> Option<Money> {
    let delta = price.checked_mul(quantity)?;
    match sign {
        Sign::Add => total.checked_add(delta),
        Sign::Remove => total.checked_sub(delta),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$x.yy`, with a leading minus for negative totals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sums a sequence of amounts. Used to recompute a cart total from its
/// entries in tests and consistency checks.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
