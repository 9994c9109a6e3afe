use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

use rs_bvh::accelerators::bvh::{BVHAccel, SplitMethod};
use rs_bvh::core::geometry::{Bounds3f, Point3f, Ray};
use rs_bvh::core::primitive::Primitive;
use rs_bvh::core::rng::Rng;
use rs_bvh::shapes::sphere::Sphere;

fn random_spheres(rng: &mut Rng, n: usize) -> Vec<Arc<dyn Primitive + Send + Sync>> {
    let world = Bounds3f::new(
        Point3f::new(-100.0, -100.0, -100.0),
        Point3f::new(100.0, 100.0, 100.0),
    );
    (0..n)
        .map(|_| {
            let center = rng.uniform_point_in(&world);
            Arc::new(Sphere::new(center, rng.uniform_float_range(0.5, 3.0)))
                as Arc<dyn Primitive + Send + Sync>
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut rng = Rng::with_seed(0);
    let prims = random_spheres(&mut rng, 2000);
    let mut group = c.benchmark_group("BVH build");
    for method in &[SplitMethod::Naive, SplitMethod::SAH] {
        group.bench_with_input(BenchmarkId::from_parameter(method), method, |b, &method| {
            b.iter(|| BVHAccel::new(prims.clone(), 4, method))
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut rng = Rng::with_seed(1);
    let prims = random_spheres(&mut rng, 10_000);
    let rays: Vec<Ray> = (0..1024)
        .map(|_| Ray::new(Point3f::new(0.0, 0.0, -150.0), rng.uniform_direction()))
        .collect();
    let mut group = c.benchmark_group("BVH query");
    group.throughput(Throughput::Elements(rays.len() as u64));
    for method in &[SplitMethod::Naive, SplitMethod::SAH] {
        let bvh = BVHAccel::new(prims.clone(), 4, *method);
        group.bench_function(BenchmarkId::from_parameter(method), |b| {
            b.iter(|| rays.iter().filter(|ray| bvh.intersect(ray).is_hit()).count())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
