use core::ops::*;
use std::fmt::Display;
use static_assertions as sa;
#[cfg(feature = "degenerate_logging")]
use rigid_logging::log_verbose;
use crate::*;

/// Quaternion, stored in `x, y, z, w` order, with `w` being the real part.
///
/// A quaternion only represents a rotation when it has unit length, arithmetic does not enforce this.
/// Operations taking a `target` write their result into it and return it, the receiver may be passed as its own `target`.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Quat {
    pub x : Scalar,
    pub y : Scalar,
    pub z : Scalar,
    pub w : Scalar,
}

sa::assert_eq_size!(Quat, [Scalar; 4]);

/// `1 - cos(angle)` below which slerp falls back to a linear interpolation
const SLERP_LINEAR_THRESHOLD : Scalar = 1e-6;
/// `xy + zw` above which (or below its negation) the euler extraction is at a gimbal pole
const EULER_POLE_THRESHOLD : Scalar = 0.499;
/// Sine of the half angle below which the axis of a rotation is returned unnormalized
const AXIS_ANGLE_SIN_THRESHOLD : Scalar = 0.001;

impl Quat {
    /// Create a new quaternion
    #[inline(always)]
    #[must_use]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar, w: Scalar) -> Self {
        Self { x, y, z, w }
    }

    /// Create the identity quaternion, i.e. no rotation
    #[inline(always)]
    #[must_use]
    pub const fn identity() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }

    /// Create a quaternion with all components set to 0
    #[inline(always)]
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 }
    }

    /// Create a quaternion from an array, in `[x, y, z, w]` order
    #[inline(always)]
    #[must_use]
    pub const fn from_array(arr: [Scalar; 4]) -> Self {
        Self { x: arr[0], y: arr[1], z: arr[2], w: arr[3] }
    }

    /// Get the content of the quaternion as an array, in `[x, y, z, w]` order
    #[inline(always)]
    #[must_use]
    pub const fn to_array(self) -> [Scalar; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Overwrite all components
    #[inline]
    pub fn set(&mut self, x: Scalar, y: Scalar, z: Scalar, w: Scalar) -> &mut Self {
        *self = Quat::new(x, y, z, w);
        self
    }

    /// Copy the components of `source` into this quaternion
    #[inline]
    pub fn copy(&mut self, source: Quat) -> &mut Self {
        *self = source;
        self
    }

    /// Create a rotation of `angle` radians around `axis`.
    ///
    /// The axis is expected to be normalized, this is not checked.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: Scalar) -> Self {
        let (sin, cos) = (angle * 0.5).sin_cos();
        Quat { x: axis.x * sin, y: axis.y * sin, z: axis.z * sin, w: cos }
    }

    /// Set the quaternion to a rotation of `angle` radians around `axis`, see [`Quat::from_axis_angle`]
    pub fn set_from_axis_angle(&mut self, axis: Vec3, angle: Scalar) -> &mut Self {
        *self = Self::from_axis_angle(axis, angle);
        self
    }

    /// Get the axis and angle (in radians) of the rotation.
    ///
    /// The quaternion is normalized in place first. For (near) zero rotations, the axis is not normalized.
    pub fn to_axis_angle(&mut self) -> (Vec3, Scalar) {
        self.normalize();

        let w = clamp(self.w, -1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (1.0 - w * w).sqrt();

        let xyz = Vec3::new(self.x, self.y, self.z);
        if s < AXIS_ANGLE_SIN_THRESHOLD {
            (xyz, angle)
        } else {
            (xyz * s.recip(), angle)
        }
    }

    /// Create the shortest rotation that rotates `u` onto `v`.
    ///
    /// When `u` and `v` are antiparallel, the result is a half turn around a tangent of `u`.
    #[must_use]
    pub fn from_vectors(u: Vec3, v: Vec3) -> Self {
        if u.is_antiparallel_to(v) {
            let (mut t1, _) = u.tangents();
            t1.normalize();
            Self::from_axis_angle(t1, core::f64::consts::PI)
        } else {
            let a = u.cross(v);
            let mut q = Quat { x: a.x, y: a.y, z: a.z, w: (u.len_sq() * v.len_sq()).sqrt() + u.dot(v) };
            q.normalize();
            q
        }
    }

    /// Set the quaternion to the shortest rotation that rotates `u` onto `v`, see [`Quat::from_vectors`]
    pub fn set_from_vectors(&mut self, u: Vec3, v: Vec3) -> &mut Self {
        *self = Self::from_vectors(u, v);
        self
    }

    /// Write the product `self * rhs` into `target`
    #[inline]
    pub fn multiply_into(self, rhs: Quat, target: &mut Quat) -> &mut Quat {
        *target = self * rhs;
        target
    }

    /// Calculate the 4D dot product of 2 quaternions
    #[inline]
    #[must_use]
    pub fn dot(self, rhs: Self) -> Scalar {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Calculate the square magnitude of the quaternion
    #[inline]
    #[must_use]
    pub fn norm_sq(self) -> Scalar {
        self.dot(self)
    }

    /// Calculate the magnitude of the quaternion
    #[inline]
    #[must_use]
    pub fn norm(self) -> Scalar {
        self.norm_sq().sqrt()
    }

    /// Get the conjugate of the quaternion
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Quat { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    /// Write the conjugate of the quaternion into `target`
    #[inline]
    pub fn conjugate_into(self, target: &mut Quat) -> &mut Quat {
        *target = self.conjugate();
        target
    }

    /// Get the inverse of the quaternion.
    ///
    /// For a unit quaternion, this is the same as the conjugate.
    #[inline]
    #[must_use]
    pub fn inverse(self) -> Self {
        let inv_norm_sq = self.norm_sq().recip();
        let conj = self.conjugate();
        Quat { x: conj.x * inv_norm_sq, y: conj.y * inv_norm_sq, z: conj.z * inv_norm_sq, w: conj.w * inv_norm_sq }
    }

    /// Write the inverse of the quaternion into `target`
    #[inline]
    pub fn inverse_into(self, target: &mut Quat) -> &mut Quat {
        *target = self.inverse();
        target
    }

    /// Normalize the quaternion in place.
    ///
    /// A quaternion with a magnitude of exactly 0 has all of its components set to 0.
    pub fn normalize(&mut self) -> &mut Self {
        let norm = self.norm();
        if norm == 0.0 {
            #[cfg(feature = "degenerate_logging")]
            log_verbose!(crate::LOG_CAT, "Normalizing a zero quaternion, components are set to 0");
            *self = Quat::zero();
        } else {
            self.scale_in_place(norm.recip());
        }
        self
    }

    /// Approximately normalize the quaternion in place, works best when the quaternion is already close to unit length.
    pub fn normalize_fast(&mut self) -> &mut Self {
        let f = (3.0 - self.norm_sq()) * 0.5;
        if f == 0.0 {
            #[cfg(feature = "degenerate_logging")]
            log_verbose!(crate::LOG_CAT, "Fast normalization factor is 0, components are set to 0");
            *self = Quat::zero();
        } else {
            self.scale_in_place(f);
        }
        self
    }

    #[inline]
    fn scale_in_place(&mut self, s: Scalar) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
        self.w *= s;
    }

    /// Rotate a vector by the quaternion, i.e. `q * v * q^-1` for a unit quaternion
    #[must_use]
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        let Quat { x: qx, y: qy, z: qz, w: qw } = self;

        // q * v
        let ix =  qw * v.x + qy * v.z - qz * v.y;
        let iy =  qw * v.y + qz * v.x - qx * v.z;
        let iz =  qw * v.z + qx * v.y - qy * v.x;
        let iw = -qx * v.x - qy * v.y - qz * v.z;

        // (q * v) * conj(q)
        Vec3 { x: ix * qw + iw * -qx + iy * -qz - iz * -qy,
               y: iy * qw + iw * -qy + iz * -qx - ix * -qz,
               z: iz * qw + iw * -qz + ix * -qy - iy * -qx }
    }

    /// Write the vector rotated by the quaternion into `target`
    #[inline]
    pub fn rotate_vector_into(self, v: Vec3, target: &mut Vec3) -> &mut Vec3 {
        *target = self.rotate_vector(v);
        target
    }

    /// Convert the quaternion to euler angles (in radians), as `(bank, heading, attitude)` in `(x, y, z)`.
    ///
    /// Only [`AxisOrder::YZX`] is supported, every other order is extracted as `YZX`.
    /// Close to the poles (attitude near +-90 degrees), the bank is fixed to 0 and the full remaining rotation is put in the heading.
    #[must_use]
    pub fn to_euler(self, order: AxisOrder) -> Vec3 {
        match order {
            AxisOrder::YZX => self.to_euler_yzx(),
            _ => {
                #[cfg(feature = "degenerate_logging")]
                log_verbose!(crate::LOG_CAT, "Euler extraction for order {} is not supported, using YZX", order);
                self.to_euler_yzx()
            }
        }
    }

    /// Write the euler angles of the quaternion into `target`, see [`Quat::to_euler`]
    #[inline]
    pub fn to_euler_into(self, order: AxisOrder, target: &mut Vec3) -> &mut Vec3 {
        *target = self.to_euler(order);
        target
    }

    fn to_euler_yzx(self) -> Vec3 {
        let Quat { x, y, z, w } = self;
        let test = x * y + z * w;

        let pole = if test > EULER_POLE_THRESHOLD {
            Some((2.0 * x.atan2(w), core::f64::consts::FRAC_PI_2))
        } else if test < -EULER_POLE_THRESHOLD {
            Some((-2.0 * x.atan2(w), -core::f64::consts::FRAC_PI_2))
        } else {
            None
        };

        match pole {
            Some((heading, attitude)) if !heading.is_nan() => {
                #[cfg(feature = "degenerate_logging")]
                log_verbose!(crate::LOG_CAT, "Euler extraction at a gimbal pole, bank is set to 0");
                Vec3::new(0.0, heading, attitude)
            },
            _ => {
                let sqx = x * x;
                let sqy = y * y;
                let sqz = z * z;
                let heading = (2.0 * y * w - 2.0 * x * z).atan2(1.0 - 2.0 * sqy - 2.0 * sqz);
                let attitude = clamp(2.0 * test, -1.0, 1.0).asin();
                let bank = (2.0 * x * w - 2.0 * y * z).atan2(1.0 - 2.0 * sqx - 2.0 * sqz);
                Vec3::new(bank, heading, attitude)
            }
        }
    }

    /// Create a quaternion from euler angles (in radians) around the x, y and z axes, applied in the given order
    #[must_use]
    pub fn from_euler(x: Scalar, y: Scalar, z: Scalar, order: AxisOrder) -> Self {
        let (s1, c1) = (x * 0.5).sin_cos();
        let (s2, c2) = (y * 0.5).sin_cos();
        let (s3, c3) = (z * 0.5).sin_cos();

        match order {
            AxisOrder::XYZ => Quat { x: s1 * c2 * c3 + c1 * s2 * s3,
                                     y: c1 * s2 * c3 - s1 * c2 * s3,
                                     z: c1 * c2 * s3 + s1 * s2 * c3,
                                     w: c1 * c2 * c3 - s1 * s2 * s3 },
            AxisOrder::YXZ => Quat { x: s1 * c2 * c3 + c1 * s2 * s3,
                                     y: c1 * s2 * c3 - s1 * c2 * s3,
                                     z: c1 * c2 * s3 - s1 * s2 * c3,
                                     w: c1 * c2 * c3 + s1 * s2 * s3 },
            AxisOrder::ZXY => Quat { x: s1 * c2 * c3 - c1 * s2 * s3,
                                     y: c1 * s2 * c3 + s1 * c2 * s3,
                                     z: c1 * c2 * s3 + s1 * s2 * c3,
                                     w: c1 * c2 * c3 - s1 * s2 * s3 },
            AxisOrder::ZYX => Quat { x: s1 * c2 * c3 - c1 * s2 * s3,
                                     y: c1 * s2 * c3 + s1 * c2 * s3,
                                     z: c1 * c2 * s3 - s1 * s2 * c3,
                                     w: c1 * c2 * c3 + s1 * s2 * s3 },
            AxisOrder::YZX => Quat { x: s1 * c2 * c3 + c1 * s2 * s3,
                                     y: c1 * s2 * c3 + s1 * c2 * s3,
                                     z: c1 * c2 * s3 - s1 * s2 * c3,
                                     w: c1 * c2 * c3 - s1 * s2 * s3 },
            AxisOrder::XZY => Quat { x: s1 * c2 * c3 - c1 * s2 * s3,
                                     y: c1 * s2 * c3 - s1 * c2 * s3,
                                     z: c1 * c2 * s3 + s1 * s2 * c3,
                                     w: c1 * c2 * c3 + s1 * s2 * s3 },
        }
    }

    /// Set the quaternion from euler angles, see [`Quat::from_euler`]
    pub fn set_from_euler(&mut self, x: Scalar, y: Scalar, z: Scalar, order: AxisOrder) -> &mut Self {
        *self = Self::from_euler(x, y, z, order);
        self
    }

    /// Spherically interpolate between 2 quaternions, along the shortest arc.
    ///
    /// When both quaternions are nearly identical, the components are interpolated linearly instead.
    #[must_use]
    pub fn slerp(self, to: Quat, t: Scalar) -> Self {
        let mut to = to;
        let mut cosom = self.dot(to);
        if cosom < 0.0 {
            cosom = -cosom;
            to = -to;
        }

        let (scale0, scale1) = if 1.0 - cosom > SLERP_LINEAR_THRESHOLD {
            let omega = cosom.acos();
            let sinom = omega.sin();
            (((1.0 - t) * omega).sin() / sinom, (t * omega).sin() / sinom)
        } else {
            #[cfg(feature = "degenerate_logging")]
            log_verbose!(crate::LOG_CAT, "Slerp between nearly identical quaternions, interpolating linearly");
            (1.0 - t, t)
        };

        Quat { x: scale0 * self.x + scale1 * to.x,
               y: scale0 * self.y + scale1 * to.y,
               z: scale0 * self.z + scale1 * to.z,
               w: scale0 * self.w + scale1 * to.w }
    }

    /// Write the spherical interpolation between 2 quaternions into `target`, see [`Quat::slerp`]
    #[inline]
    pub fn slerp_into(self, to: Quat, t: Scalar, target: &mut Quat) -> &mut Quat {
        *target = self.slerp(to, t);
        target
    }

    /// Advance the orientation by one explicit euler step and return the new orientation.
    ///
    /// The result is not normalized, repeated integration drifts away from unit length.
    #[must_use]
    pub fn integrate(self, angular_velocity: Vec3, dt: Scalar, angular_factor: Vec3) -> Self {
        let mut target = self;
        self.integrate_into(angular_velocity, dt, angular_factor, &mut target);
        target
    }

    /// Add the change in orientation over `dt` to `target`, i.e. `target += dt * 0.5 * (w * factor) * self`.
    ///
    /// `target` is accumulated into, not overwritten, so it is expected to already hold the orientation.
    pub fn integrate_into(self, angular_velocity: Vec3, dt: Scalar, angular_factor: Vec3, target: &mut Quat) -> &mut Quat {
        let a = angular_velocity * angular_factor;
        let Quat { x: bx, y: by, z: bz, w: bw } = self;
        let half_dt = dt * 0.5;

        target.x += half_dt * (a.x * bw + a.y * bz - a.z * by);
        target.y += half_dt * (a.y * bw + a.z * bx - a.x * bz);
        target.z += half_dt * (a.z * bw + a.x * by - a.y * bx);
        target.w += half_dt * (-a.x * bx - a.y * by - a.z * bz);
        target
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<usize> for Quat {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Quat index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Quat {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Quat index out of range: {index}"),
        }
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product, the result first rotates by `rhs` and then by `self`
    fn mul(self, rhs: Self) -> Self {
        let Quat { x: ax, y: ay, z: az, w: aw } = self;
        let Quat { x: bx, y: by, z: bz, w: bw } = rhs;

        Quat { x: ax * bw + aw * bx + ay * bz - az * by,
               y: ay * bw + aw * by + az * bx - ax * bz,
               z: az * bw + aw * bz + ax * by - ay * bx,
               w: aw * bw - ax * bx - ay * by - az * bz }
    }
}

impl MulAssign for Quat {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline(always)]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate_vector(rhs)
    }
}

impl Neg for Quat {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Quat { x: -self.x, y: -self.y, z: -self.z, w: -self.w }
    }
}

impl ApproxEq for Quat {
    fn is_close_to(self, rhs: Self, epsilon: Scalar) -> bool {
        self.x.is_close_to(rhs.x, epsilon) &&
        self.y.is_close_to(rhs.y, epsilon) &&
        self.z.is_close_to(rhs.z, epsilon) &&
        self.w.is_close_to(rhs.w, epsilon)
    }
}

impl ApproxZero for Quat {
    fn is_close_to_zero(self, epsilon: Scalar) -> bool {
        self.x.is_close_to_zero(epsilon) &&
        self.y.is_close_to_zero(epsilon) &&
        self.z.is_close_to_zero(epsilon) &&
        self.w.is_close_to_zero(epsilon)
    }
}

impl From<[Scalar; 4]> for Quat {
    fn from(arr: [Scalar; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Quat> for [Scalar; 4] {
    fn from(q: Quat) -> Self {
        q.to_array()
    }
}

impl Display for Quat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {}, {}, {})", self.x, self.y, self.z, self.w))
    }
}
