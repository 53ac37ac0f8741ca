//! Bounded number utility
//!
//! `NumberHelper` wraps a single number together with optional lower and
//! upper limits. The limits are applied on every write and on every read, so
//! the value handed back is always inside them.

use num_traits::{FromPrimitive, Num, PrimInt};
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// Fluent wrapper around a number with optional limits
///
/// Modifier methods consume the helper and return it, so calls chain:
///
/// ```rust
/// use fl_helpers::utils::NumberHelper;
///
/// let n = NumberHelper::new(150)
///     .with_lower_limit(Some(10))
///     .with_upper_limit(Some(100));
/// assert_eq!(n.value(), 100);
///
/// let flipped = NumberHelper::new(12)
///     .with_lower_limit(Some(10))
///     .with_upper_limit(Some(20))
///     .flip();
/// assert_eq!(flipped.value(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberHelper<T> {
    value: T,
    lower_limit: Option<T>,
    upper_limit: Option<T>,
}

impl<T> NumberHelper<T>
where
    T: Num + PartialOrd + Copy + FromPrimitive,
{
    /// Limit assumed by `flip` and `randomize` when no lower limit is set
    fn default_lower() -> T {
        T::zero()
    }

    /// Limit assumed by `flip` and `randomize` when no upper limit is set
    fn default_upper() -> T {
        T::from_u8(100).unwrap_or_else(T::one)
    }

    /// Create a helper without limits
    pub fn new(value: T) -> Self {
        Self {
            value,
            lower_limit: None,
            upper_limit: None,
        }
    }

    /// Set or clear (`None`) the lower limit
    #[must_use]
    pub fn with_lower_limit(mut self, limit: Option<T>) -> Self {
        self.lower_limit = limit;
        self.value = self.clamp(self.value);
        self
    }

    /// Set or clear (`None`) the upper limit
    #[must_use]
    pub fn with_upper_limit(mut self, limit: Option<T>) -> Self {
        self.upper_limit = limit;
        self.value = self.clamp(self.value);
        self
    }

    /// Replace the value, clamped into the current limits
    #[must_use]
    pub fn set_value(mut self, value: T) -> Self {
        self.value = self.clamp(value);
        self
    }

    /// The current value, clamped into the current limits
    pub fn value(&self) -> T {
        self.clamp(self.value)
    }

    pub fn lower_limit(&self) -> Option<T> {
        self.lower_limit
    }

    pub fn upper_limit(&self) -> Option<T> {
        self.upper_limit
    }

    /// Mirror the value inside the limits
    ///
    /// With limits 9 and 20, 9 becomes 20, 10 becomes 19 and so on. Missing
    /// limits default to 0 and 100, and a value outside them is first
    /// clamped into that range.
    #[must_use]
    pub fn flip(self) -> Self {
        let (low, high) = self.bounds();
        let mut current = self.value();
        if current < low {
            current = low;
        } else if current > high {
            current = high;
        }
        self.set_value(high - (current - low))
    }

    /// Effective (low, high) bounds, ordered even when the limits were given swapped
    fn bounds(&self) -> (T, T) {
        let low = self.lower_limit.unwrap_or_else(Self::default_lower);
        let high = self.upper_limit.unwrap_or_else(Self::default_upper);
        if high < low {
            (high, low)
        } else {
            (low, high)
        }
    }

    fn clamp(&self, value: T) -> T {
        let (low, high) = match (self.lower_limit, self.upper_limit) {
            (Some(a), Some(b)) if b < a => (Some(b), Some(a)),
            limits => limits,
        };
        let mut value = value;
        if let Some(low) = low {
            if value < low {
                value = low;
            }
        }
        if let Some(high) = high {
            if value > high {
                value = high;
            }
        }
        value
    }
}

impl<T> NumberHelper<T>
where
    T: Num + PartialOrd + Copy + FromPrimitive + SampleUniform,
{
    /// Replace the value with a uniformly drawn number inside the limits
    ///
    /// Missing limits default to 0 and 100.
    #[must_use]
    pub fn randomize(self) -> Self {
        let (low, high) = self.bounds();
        let drawn = rand::thread_rng().gen_range(low..=high);
        self.set_value(drawn)
    }
}

impl NumberHelper<f64> {
    /// Round to `precision` decimals, halves away from zero
    #[must_use]
    pub fn round(self, precision: i32) -> Self {
        let factor = 10f64.powi(precision);
        let rounded = (self.value() * factor).round() / factor;
        self.set_value(rounded)
    }
}

impl<T> NumberHelper<T>
where
    T: PrimInt + FromPrimitive,
{
    pub fn is_odd(&self) -> bool {
        self.value() & T::one() == T::one()
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }
}
