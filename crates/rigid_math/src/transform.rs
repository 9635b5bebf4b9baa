use std::fmt::Display;
use crate::*;

/// Rigid transform: a position and an orientation in world space
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    pub position : Vec3,
    pub rotation : Quat,
}

impl Transform {
    /// Create a new transform
    #[inline(always)]
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Convert a world-space point to the local space of the transform
    #[inline]
    #[must_use]
    pub fn point_to_local(&self, world_point: Vec3) -> Vec3 {
        point_to_local_frame(self.position, self.rotation, world_point)
    }

    /// Write a world-space point, converted to the local space of the transform, into `target`
    #[inline]
    pub fn point_to_local_into<'a>(&self, world_point: Vec3, target: &'a mut Vec3) -> &'a mut Vec3 {
        *target = self.point_to_local(world_point);
        target
    }

    /// Convert a point in the local space of the transform to world space
    #[inline]
    #[must_use]
    pub fn point_to_world(&self, local_point: Vec3) -> Vec3 {
        point_to_world_frame(self.position, self.rotation, local_point)
    }

    /// Write a local-space point, converted to world space, into `target`
    #[inline]
    pub fn point_to_world_into<'a>(&self, local_point: Vec3, target: &'a mut Vec3) -> &'a mut Vec3 {
        *target = self.point_to_world(local_point);
        target
    }

    /// Rotate a local-space vector into world space, the position is ignored
    #[inline]
    #[must_use]
    pub fn vector_to_world(&self, local_vector: Vec3) -> Vec3 {
        vector_to_world_frame(self.rotation, local_vector)
    }

    /// Write a local-space vector, rotated into world space, into `target`
    #[inline]
    pub fn vector_to_world_into<'a>(&self, local_vector: Vec3, target: &'a mut Vec3) -> &'a mut Vec3 {
        *target = self.vector_to_world(local_vector);
        target
    }

    /// Rotate a world-space vector into the local space of the transform, the position is ignored
    #[inline]
    #[must_use]
    pub fn vector_to_local(&self, world_vector: Vec3) -> Vec3 {
        vector_to_local_frame(self.rotation, world_vector)
    }

    /// Write a world-space vector, rotated into local space, into `target`
    #[inline]
    pub fn vector_to_local_into<'a>(&self, world_vector: Vec3, target: &'a mut Vec3) -> &'a mut Vec3 {
        *target = self.vector_to_local(world_vector);
        target
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{{ position: {}, rotation: {} }}", self.position, self.rotation))
    }
}

/// Convert a world-space point to the local space of a frame at `position` with orientation `rotation`
#[must_use]
pub fn point_to_local_frame(position: Vec3, rotation: Quat, world_point: Vec3) -> Vec3 {
    rotation.conjugate().rotate_vector(world_point - position)
}

/// Convert a point in the local space of a frame at `position` with orientation `rotation` to world space
#[must_use]
pub fn point_to_world_frame(position: Vec3, rotation: Quat, local_point: Vec3) -> Vec3 {
    rotation.rotate_vector(local_point) + position
}

/// Rotate a vector from the local space of a frame with orientation `rotation` into world space
#[must_use]
pub fn vector_to_world_frame(rotation: Quat, local_vector: Vec3) -> Vec3 {
    rotation.rotate_vector(local_vector)
}

/// Rotate a world-space vector into the local space of a frame with orientation `rotation`
#[must_use]
pub fn vector_to_local_frame(rotation: Quat, world_vector: Vec3) -> Vec3 {
    // Negating `w` gives the same rotation as the conjugate
    let mut inv = rotation;
    inv.w = -inv.w;
    inv.rotate_vector(world_vector)
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;
    use crate::*;

    fn quarter_turn_z() -> Quat {
        Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2)
    }

    #[test]
    fn point_to_world_and_back() {
        let transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), quarter_turn_z());

        let world = transform.point_to_world(Vec3::new(1.0, 0.0, 0.0));
        assert!(world.almost_equals(Vec3::new(1.0, 3.0, 3.0)), "got {world}");

        let local = transform.point_to_local(world);
        assert!(local.almost_equals(Vec3::new(1.0, 0.0, 0.0)), "got {local}");

        let mut target = Vec3::zero();
        transform.point_to_world_into(Vec3::new(0.0, 1.0, 0.0), &mut target);
        assert!(target.almost_equals(Vec3::new(0.0, 2.0, 3.0)));
        let mut aliased = target;
        transform.point_to_local_into(aliased, &mut aliased);
        assert!(aliased.almost_equals(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn vectors_ignore_position() {
        let transform = Transform::new(Vec3::new(10.0, -4.0, 7.0), quarter_turn_z());

        let world = transform.vector_to_world(Vec3::new(1.0, 0.0, 0.0));
        assert!(world.almost_equals(Vec3::new(0.0, 1.0, 0.0)));

        let local = transform.vector_to_local(world);
        assert!(local.almost_equals(Vec3::new(1.0, 0.0, 0.0)));

        let mut target = Vec3::zero();
        transform.vector_to_world_into(Vec3::new(0.0, 1.0, 0.0), &mut target);
        assert!(target.almost_equals(Vec3::new(-1.0, 0.0, 0.0)));
        transform.vector_to_local_into(Vec3::new(-1.0, 0.0, 0.0), &mut target);
        assert!(target.almost_equals(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn free_functions_match_methods() {
        let position = Vec3::new(-1.0, 0.5, 2.0);
        let rotation = Quat::from_euler(0.3, -0.2, 1.1, AxisOrder::XYZ);
        let transform = Transform::new(position, rotation);
        let p = Vec3::new(0.25, -3.0, 4.0);

        assert_eq!(point_to_world_frame(position, rotation, p), transform.point_to_world(p));
        assert_eq!(point_to_local_frame(position, rotation, p), transform.point_to_local(p));
        assert_eq!(vector_to_world_frame(rotation, p), transform.vector_to_world(p));
        assert_eq!(vector_to_local_frame(rotation, p), transform.vector_to_local(p));

        assert!(point_to_local_frame(position, rotation, point_to_world_frame(position, rotation, p)).almost_equals(p));
        assert!(vector_to_local_frame(rotation, vector_to_world_frame(rotation, p)).almost_equals(p));
    }

    #[test]
    fn vector_to_local_keeps_rotation() {
        let rotation = quarter_turn_z();
        let before = rotation;
        let _ = vector_to_local_frame(rotation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rotation, before);
    }

    #[test]
    fn display() {
        let transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::identity());
        assert_eq!(transform.to_string(), "{ position: (1, 2, 3), rotation: (0, 0, 0, 1) }");
    }
}
