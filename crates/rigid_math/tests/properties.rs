use rand::{rngs::StdRng, Rng, SeedableRng};
use rigid_math::*;

const ITERATIONS : usize = 256;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED_0F_0D1E)
}

fn random_vec(rng: &mut StdRng, range: Scalar) -> Vec3 {
    Vec3::new(rng.gen_range(-range..range), rng.gen_range(-range..range), rng.gen_range(-range..range))
}

fn random_unit_vec(rng: &mut StdRng) -> Vec3 {
    loop {
        let v = random_vec(rng, 1.0);
        if v.len_sq() > 0.01 {
            return v.unit();
        }
    }
}

fn random_rotation(rng: &mut StdRng) -> Quat {
    let axis = random_unit_vec(rng);
    Quat::from_axis_angle(axis, rng.gen_range(-3.0..3.0))
}

#[test]
fn cross_is_antisymmetric() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let a = random_vec(&mut rng, 10.0);
        let b = random_vec(&mut rng, 10.0);
        assert!(a.cross(b).almost_equals(-b.cross(a)));
        assert!(a.cross(b).dot(a).is_close_to(0.0, 1e-9));
    }
}

#[test]
fn dot_is_symmetric() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let a = random_vec(&mut rng, 10.0);
        let b = random_vec(&mut rng, 10.0);
        assert_eq!(a.dot(b), b.dot(a));
    }
}

#[test]
fn tangents_form_right_handed_basis() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let v = random_vec(&mut rng, 10.0);
        let (t1, t2) = v.tangents();
        let n = v.unit();
        assert!(t1.dot(n).is_close_to(0.0, 1e-9));
        assert!(t2.dot(n).is_close_to(0.0, 1e-9));
        assert!(t1.cross(t2).dot(n) > 0.0, "tangents of {v} are not right-handed");
    }
}

#[test]
fn quat_times_inverse_is_identity() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let q = random_rotation(&mut rng);
        assert!((q * q.inverse()).almost_equals(Quat::identity()), "failed for {q}");
        assert!(q.inverse().almost_equals(q.conjugate()));
    }
}

#[test]
fn normalize_is_idempotent() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let v = random_vec(&mut rng, 5.0);
        let mut q = Quat::new(v.x, v.y, v.z, rng.gen_range(-5.0..5.0));
        q.normalize();
        let once = q;
        q.normalize();
        assert!(q.almost_equals(once));
        assert!(q.norm().almost_equals(1.0));
    }
}

#[test]
fn axis_angle_round_trip() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let axis = random_unit_vec(&mut rng);
        let angle = rng.gen_range(0.01..3.1);
        let mut q = Quat::from_axis_angle(axis, angle);
        let (res_axis, res_angle) = q.to_axis_angle();
        assert!(res_axis.almost_equals(axis), "axis {res_axis} != {axis}");
        assert!(res_angle.almost_equals(angle), "angle {res_angle} != {angle}");
    }
}

#[test]
fn rotation_preserves_length() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let q = random_rotation(&mut rng);
        let v = random_vec(&mut rng, 10.0);
        assert!(q.rotate_vector(v).len().almost_equals(v.len()));
    }
}

#[test]
fn from_vectors_rotates_onto_target() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let u = random_unit_vec(&mut rng);
        let v = random_unit_vec(&mut rng);
        if u.dot(v) < -0.99 {
            continue;
        }
        let q = Quat::from_vectors(u, v);
        assert!(q.rotate_vector(u).almost_equals(v), "{u} -> {v}");
    }
}

#[test]
fn slerp_hits_endpoints() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        // Slerp takes the shortest arc, so the end point might be the antipodal quaternion
        let b_short = if a.dot(b) < 0.0 { -b } else { b };

        assert!(a.slerp(b, 0.0).almost_equals(a));
        assert!(a.slerp(b, 1.0).almost_equals(b_short));
        assert!(a.slerp(a, rng.gen_range(0.0..1.0)).almost_equals(a));
        assert!(a.slerp(b, rng.gen_range(0.0..1.0)).norm().almost_equals(1.0));
    }
}

#[test]
fn yzx_euler_round_trip() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let bank = rng.gen_range(-3.0..3.0);
        let heading = rng.gen_range(-3.0..3.0);
        let attitude = rng.gen_range(-1.4..1.4);

        let q = Quat::from_euler(bank, heading, attitude, AxisOrder::YZX);
        let euler = q.to_euler(AxisOrder::YZX);
        assert!(euler.almost_equals(Vec3::new(bank, heading, attitude)), "got {euler} for ({bank}, {heading}, {attitude})");
    }
}

#[test]
fn transform_round_trip() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let transform = Transform::new(random_vec(&mut rng, 100.0), random_rotation(&mut rng));
        let p = random_vec(&mut rng, 100.0);

        assert!(transform.point_to_local(transform.point_to_world(p)).is_close_to(p, 1e-9));
        assert!(transform.vector_to_world(transform.vector_to_local(p)).is_close_to(p, 1e-9));
        assert!(transform.point_to_world(p).dist(transform.position).is_close_to(p.len(), 1e-9));
    }
}
