/// Scalar type used for every coordinate and angle
pub type Scalar = f64;

/// Tolerance used by all "almost" comparisons
pub const PRECISION : Scalar = 1e-6;

/// Check if `n` is within [`PRECISION`] of 0
#[inline]
#[must_use]
pub fn almost_zero(n: Scalar) -> bool {
    n.is_close_to_zero(PRECISION)
}

/// Check if `a` and `b` are within [`PRECISION`] of each other
#[inline]
#[must_use]
pub fn almost_equals(a: Scalar, b: Scalar) -> bool {
    a.is_close_to(b, PRECISION)
}

/// Clamp `value` between `lo` and `hi`.
///
/// Unlike `f64::clamp`, this does not panic when `lo > hi`, `lo` is returned in that case.
#[inline]
#[must_use]
pub fn clamp(value: Scalar, lo: Scalar, hi: Scalar) -> Scalar {
    lo.max(hi.min(value))
}

/// Defines a type that can check if it's approximately equal to another value
pub trait ApproxEq : Sized {
    /// Check if `self` is approximately equal to another value, given an `epsilon`
    fn is_close_to(self, rhs: Self, epsilon: Scalar) -> bool;

    /// Check if `self` is approximately equal to another value, using [`PRECISION`]
    fn almost_equals(self, rhs: Self) -> bool {
        self.is_close_to(rhs, PRECISION)
    }
}

/// Defines a type that can check if it's approximately equal to it's zero identity
pub trait ApproxZero : Sized {
    /// Check if `self` is approximately equal to 0, given an `epsilon`
    fn is_close_to_zero(self, epsilon: Scalar) -> bool;

    /// Check if `self` is approximately equal to 0, using [`PRECISION`]
    fn almost_zero(self) -> bool {
        self.is_close_to_zero(PRECISION)
    }
}

impl ApproxEq for Scalar {
    fn is_close_to(self, rhs: Self, epsilon: Scalar) -> bool {
        (self - rhs).abs() <= epsilon
    }
}

impl ApproxZero for Scalar {
    fn is_close_to_zero(self, epsilon: Scalar) -> bool {
        self.abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn almost_zero_uses_inclusive_bound() {
        assert!(almost_zero(0.0));
        assert!(almost_zero(-0.5 * PRECISION));
        assert!(almost_zero(PRECISION));
        assert!(!almost_zero(2.0 * PRECISION));
        assert!(!almost_zero(-1.0));
    }

    #[test]
    fn almost_equals_scalar() {
        assert!(almost_equals(1.0, 1.0 + 0.5 * PRECISION));
        assert!(!almost_equals(1.0, 1.0 + 3.0 * PRECISION));
        let one: Scalar = 1.0;
        assert!(one.almost_equals(1.0 - 0.5 * PRECISION));
        assert!(one.is_close_to(1.5, 0.5));
        assert!(!one.is_close_to(1.6, 0.5));
    }

    #[test]
    fn clamp_values() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-2.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(3.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn clamp_inverted_bounds_returns_lo() {
        assert_eq!(clamp(0.5, 2.0, 1.0), 2.0);
        assert_eq!(clamp(5.0, 2.0, 1.0), 2.0);
    }
}
