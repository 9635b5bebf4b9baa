use core::ops::*;
use std::fmt::Display;
use static_assertions as sa;
#[cfg(feature = "degenerate_logging")]
use rigid_logging::log_verbose;
use crate::*;

/// 3D vector, used for both points and free vectors
///
/// Operations taking a `target` write their result into it and return it. The receiver is taken by value,
/// so passing the receiver itself as the `target` gives the same result as a distinct target.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec3 {
    pub x : Scalar,
    pub y : Scalar,
    pub z : Scalar,
}

sa::assert_eq_size!(Vec3, [Scalar; 3]);

impl Vec3 {
    /// Create a new vector
    #[inline(always)]
    #[must_use]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to 0
    #[inline(always)]
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Create a vector from an array, in `[x, y, z]` order
    #[inline(always)]
    #[must_use]
    pub const fn from_array(arr: [Scalar; 3]) -> Self {
        Self { x: arr[0], y: arr[1], z: arr[2] }
    }

    /// Get the content of the vector as an array, in `[x, y, z]` order
    #[inline(always)]
    #[must_use]
    pub const fn to_array(self) -> [Scalar; 3] {
        [self.x, self.y, self.z]
    }

    /// Overwrite all components
    #[inline]
    pub fn set(&mut self, x: Scalar, y: Scalar, z: Scalar) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Copy the components of `source` into this vector
    #[inline]
    pub fn copy(&mut self, source: Vec3) -> &mut Self {
        *self = source;
        self
    }

    /// Check if all components are exactly 0
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Calculate the dot product of 2 vectors
    #[inline]
    #[must_use]
    pub fn dot(self, rhs: Self) -> Scalar {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Calculate the square length of the vector
    #[inline]
    #[must_use]
    pub fn len_sq(self) -> Scalar {
        self.dot(self)
    }

    /// Calculate the length of the vector
    #[inline]
    #[must_use]
    pub fn len(self) -> Scalar {
        self.len_sq().sqrt()
    }

    /// Calculate the length of the vector, same as [`Vec3::len`]
    #[inline]
    #[must_use]
    pub fn norm(self) -> Scalar {
        self.len()
    }

    /// Get the vector pointing in the opposite direction
    #[inline]
    #[must_use]
    pub fn negate(self) -> Self {
        -self
    }

    /// Write the vector pointing in the opposite direction into `target`
    #[inline]
    pub fn negate_into(self, target: &mut Vec3) -> &mut Vec3 {
        *target = -self;
        target
    }

    /// Write `self + rhs` into `target`
    #[inline]
    pub fn add_into(self, rhs: Self, target: &mut Vec3) -> &mut Vec3 {
        *target = self + rhs;
        target
    }

    /// Write `self - rhs` into `target`
    #[inline]
    pub fn sub_into(self, rhs: Self, target: &mut Vec3) -> &mut Vec3 {
        *target = self - rhs;
        target
    }

    /// Calculate the (right-handed) cross product `self x rhs`
    #[inline]
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Vec3 { x: self.y * rhs.z - self.z * rhs.y,
               y: self.z * rhs.x - self.x * rhs.z,
               z: self.x * rhs.y - self.y * rhs.x }
    }

    /// Write the cross product `self x rhs` into `target`
    #[inline]
    pub fn cross_into(self, rhs: Self, target: &mut Vec3) -> &mut Vec3 {
        *target = self.cross(rhs);
        target
    }

    /// Normalize the vector in place and return its original length.
    ///
    /// A vector with a length of exactly 0 has all of its components set to 0.
    pub fn normalize(&mut self) -> Scalar {
        let len = self.len();
        if len > 0.0 {
            let inv_len = len.recip();
            *self *= inv_len;
        } else {
            #[cfg(feature = "degenerate_logging")]
            log_verbose!(crate::LOG_CAT, "Normalizing a zero-length vector, components are set to 0");
            *self = Vec3::zero();
        }
        len
    }

    /// Get the unit length version of the vector, or `(1, 0, 0)` if the length is 0
    #[must_use]
    pub fn unit(self) -> Self {
        let mut target = Vec3::new(1.0, 0.0, 0.0);
        self.unit_into(&mut target);
        target
    }

    /// Write the unit length version of the vector into `target`.
    ///
    /// If the length is 0, `target` is left untouched.
    pub fn unit_into(self, target: &mut Vec3) -> &mut Vec3 {
        let len = self.len();
        if len > 0.0 {
            *target = self * len.recip();
        } else {
            #[cfg(feature = "degenerate_logging")]
            log_verbose!(crate::LOG_CAT, "Unit of a zero-length vector, target is left untouched");
        }
        target
    }

    /// Calculate the square distance between 2 points
    #[inline]
    #[must_use]
    pub fn dist_sq(self, other: Self) -> Scalar {
        (other - self).len_sq()
    }

    /// Calculate the distance between 2 points
    #[inline]
    #[must_use]
    pub fn dist(self, other: Self) -> Scalar {
        self.dist_sq(other).sqrt()
    }

    /// Multiply all components with a scalar
    #[inline]
    #[must_use]
    pub fn scale(self, scalar: Scalar) -> Self {
        self * scalar
    }

    /// Write the vector, with all components multiplied by a scalar, into `target`
    #[inline]
    pub fn scale_into(self, scalar: Scalar, target: &mut Vec3) -> &mut Vec3 {
        *target = self * scalar;
        target
    }

    /// Multiply the vector with another vector, component-wise
    #[inline]
    #[must_use]
    pub fn component_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    /// Write the component-wise product of 2 vectors into `target`
    #[inline]
    pub fn component_mul_into(self, rhs: Self, target: &mut Vec3) -> &mut Vec3 {
        *target = self * rhs;
        target
    }

    /// Calculate `self + other * scalar`
    #[inline]
    #[must_use]
    pub fn add_scaled(self, scalar: Scalar, other: Self) -> Self {
        self + other * scalar
    }

    /// Write `self + other * scalar` into `target`
    #[inline]
    pub fn add_scaled_into(self, scalar: Scalar, other: Self, target: &mut Vec3) -> &mut Vec3 {
        *target = self.add_scaled(scalar, other);
        target
    }

    /// Linearly interpolate between 2 vectors.
    ///
    /// `t` is not clamped, values outside of `[0, 1]` extrapolate.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: Scalar) -> Self {
        Vec3 { x: self.x + (other.x - self.x) * t,
               y: self.y + (other.y - self.y) * t,
               z: self.z + (other.z - self.z) * t }
    }

    /// Write the linear interpolation between 2 vectors into `target`
    #[inline]
    pub fn lerp_into(self, other: Self, t: Scalar, target: &mut Vec3) -> &mut Vec3 {
        *target = self.lerp(other, t);
        target
    }

    /// Calculate 2 tangents that are orthogonal to the vector and to each other.
    ///
    /// The tangents are not normalized. A zero-length vector returns `(1, 0, 0)` and `(0, 1, 0)`.
    #[must_use]
    pub fn tangents(self) -> (Vec3, Vec3) {
        let len = self.len();
        if len > 0.0 {
            let n = self * len.recip();
            // Pick the helper axis least aligned with `n`, so the cross product doesn't degenerate
            let helper = if n.x.abs() < 0.9 { Vec3::new(1.0, 0.0, 0.0) } else { Vec3::new(0.0, 1.0, 0.0) };
            let t1 = n.cross(helper);
            let t2 = n.cross(t1);
            (t1, t2)
        } else {
            #[cfg(feature = "degenerate_logging")]
            log_verbose!(crate::LOG_CAT, "Tangents of a zero-length vector, using the x and y axes");
            (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0))
        }
    }

    /// Write 2 tangents of the vector into `t1` and `t2`, see [`Vec3::tangents`]
    pub fn tangents_into(self, t1: &mut Vec3, t2: &mut Vec3) {
        (*t1, *t2) = self.tangents();
    }

    /// Check if the vector points in the opposite direction of `other`, within [`PRECISION`]
    #[inline]
    #[must_use]
    pub fn is_antiparallel_to(self, other: Self) -> bool {
        (-self).almost_equals(other)
    }
}

impl Index<usize> for Vec3 {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of range: {index}"),
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl AddAssign for Vec3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl SubAssign for Vec3 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Vec3 { x: self.x * rhs.x, y: self.y * rhs.y, z: self.z * rhs.z }
    }
}

impl MulAssign for Vec3 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Scalar> for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Scalar) -> Self {
        Vec3 { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

impl MulAssign<Scalar> for Vec3 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Scalar {
    type Output = Vec3;

    #[inline(always)]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Vec3 { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl ApproxEq for Vec3 {
    fn is_close_to(self, rhs: Self, epsilon: Scalar) -> bool {
        self.x.is_close_to(rhs.x, epsilon) &&
        self.y.is_close_to(rhs.y, epsilon) &&
        self.z.is_close_to(rhs.z, epsilon)
    }
}

impl ApproxZero for Vec3 {
    fn is_close_to_zero(self, epsilon: Scalar) -> bool {
        self.x.is_close_to_zero(epsilon) &&
        self.y.is_close_to_zero(epsilon) &&
        self.z.is_close_to_zero(epsilon)
    }
}

impl From<[Scalar; 3]> for Vec3 {
    fn from(arr: [Scalar; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vec3> for [Scalar; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {}, {})", self.x, self.y, self.z))
    }
}
