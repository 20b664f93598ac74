//! Closed scalar interval, used for projections.

use num_traits::Float;

/// A closed interval `[min, max]` on the real line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<F> {
    pub min: F,
    pub max: F,
}

impl<F: Float> Interval<F> {
    /// Creates an interval from two bounds in any order.
    #[inline]
    pub fn new(a: F, b: F) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Interval holding a single value.
    #[inline]
    pub fn from_value(v: F) -> Self {
        Self { min: v, max: v }
    }

    /// Returns the interval grown to include `v`.
    #[inline]
    pub fn expand_to_include(self, v: F) -> Self {
        Self {
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }

    #[inline]
    pub fn length(self) -> F {
        self.max - self.min
    }

    #[inline]
    pub fn contains(self, v: F) -> bool {
        v >= self.min && v <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        let i: Interval<f64> = Interval::from_value(2.0).expand_to_include(-1.0).expand_to_include(0.5);
        assert_eq!(i.min, -1.0);
        assert_eq!(i.max, 2.0);
        assert_eq!(i.length(), 3.0);
        assert!(i.contains(0.0));
        assert!(!i.contains(2.5));
    }

    #[test]
    fn test_new_orders_bounds() {
        let i: Interval<f64> = Interval::new(4.0, 1.0);
        assert_eq!(i.min, 1.0);
        assert_eq!(i.max, 4.0);
    }
}
