use criterion::{black_box, criterion_main, criterion_group, Criterion};

use rigid_math::*;

fn quat_benchmark(c: &mut Criterion) {
    let a = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 2.0).unit(), 0.7);
    let b = Quat::from_euler(0.3, -1.2, 0.5, AxisOrder::XYZ);
    let v = Vec3::new(1.0, -4.0, 2.5);

    c.bench_function("quat: multiply", |bench| bench.iter(|| black_box(a) * black_box(b)));

    c.bench_function("quat: rotate vector", |bench| bench.iter(|| black_box(a).rotate_vector(black_box(v))));

    c.bench_function("quat: slerp", |bench| bench.iter(|| black_box(a).slerp(black_box(b), black_box(0.35))));

    c.bench_function("quat: to euler (YZX)", |bench| bench.iter(|| black_box(a).to_euler(AxisOrder::YZX)));

    c.bench_function("quat: from euler (XYZ)", |bench| bench.iter(|| Quat::from_euler(black_box(0.3), black_box(-1.2), black_box(0.5), AxisOrder::XYZ)));

    c.bench_function("quat: normalize", |bench| bench.iter(|| {
        let mut q = black_box(Quat::new(1.0, 2.0, 3.0, 4.0));
        *q.normalize()
    }));

    c.bench_function("quat: normalize fast", |bench| bench.iter(|| {
        let mut q = black_box(Quat::new(0.01, 0.02, 0.03, 1.01));
        *q.normalize_fast()
    }));

    c.bench_function("quat: integrate 1000 steps", |bench| bench.iter(|| {
        let omega = Vec3::new(0.0, 1.0, 0.5);
        let factor = Vec3::new(1.0, 1.0, 1.0);
        let mut q = Quat::identity();
        for i in 0..1000 {
            q = q.integrate(black_box(omega), 0.001, factor);
            if i % 10 == 0 {
                q.normalize();
            }
        }
        q
    }));
}

fn transform_benchmark(c: &mut Criterion) {
    let transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_euler(0.3, -1.2, 0.5, AxisOrder::YZX));
    let p = Vec3::new(-2.0, 0.5, 4.0);

    c.bench_function("transform: point to world", |bench| bench.iter(|| transform.point_to_world(black_box(p))));

    c.bench_function("transform: point to local", |bench| bench.iter(|| transform.point_to_local(black_box(p))));
}

criterion_group!(benches, quat_benchmark, transform_benchmark);
criterion_main!(benches);
