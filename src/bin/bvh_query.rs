// command line options
use clap::Parser;
// others
use anyhow::{bail, Context};
// pbrt
use rs_bvh::accelerators::bvh::BVHAccel;
use rs_bvh::core::geometry::{Bounds3f, Point3f, Ray, Vector3f};
use rs_bvh::core::interaction::SurfaceInteraction;
use rs_bvh::core::parallel::intersect_rays;
use rs_bvh::core::paramset::ParamSet;
use rs_bvh::core::pbrt::Float;
use rs_bvh::core::primitive::Primitive;
use rs_bvh::core::rng::Rng;
use rs_bvh::core::scene::Scene;
use rs_bvh::shapes::sphere::Sphere;
use rs_bvh::shapes::triangle::create_triangle_mesh;
// std
use std::sync::Arc;
use std::time::Instant;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a BVH over a random scene and shoot random rays at it.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// split method used to build the BVH (naive or sah)
    #[arg(long = "splitmethod", default_value = "sah")]
    splitmethod: String,
    /// maximum number of primitives per leaf (accepted, not enforced)
    #[arg(long = "maxnodeprims", default_value_t = 4, allow_negative_numbers = true)]
    maxnodeprims: i32,
    /// number of random spheres
    #[arg(long = "primitives", default_value_t = 1000)]
    primitives: usize,
    /// number of random triangles
    #[arg(long = "triangles", default_value_t = 0)]
    triangles: usize,
    /// number of random rays
    #[arg(long = "rays", default_value_t = 100_000)]
    rays: usize,
    /// seed for the random scene and rays
    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,
    /// use specified number of threads for the queries
    #[arg(short = 't', long = "nthreads", default_value_t = 0)]
    nthreads: u8,
    /// test every primitive instead of using the BVH
    #[arg(long = "check")]
    check: bool,
    /// compare every BVH result with a test against every primitive
    #[arg(long = "verify")]
    verify: bool,
    /// show a progress bar while querying
    #[arg(long = "progress")]
    progress: bool,
}

fn random_scene(
    rng: &mut Rng,
    world: &Bounds3f,
    n_spheres: usize,
    n_triangles: usize,
) -> anyhow::Result<Vec<Arc<dyn Primitive + Send + Sync>>> {
    let mut prims: Vec<Arc<dyn Primitive + Send + Sync>> =
        Vec::with_capacity(n_spheres + n_triangles);
    for _ in 0..n_spheres {
        let center: Point3f = rng.uniform_point_in(world);
        let radius: Float = rng.uniform_float_range(0.5, 3.0);
        prims.push(Arc::new(Sphere::new(center, radius)));
    }
    if n_triangles > 0 {
        let mut p: Vec<Point3f> = Vec::with_capacity(3 * n_triangles);
        for _ in 0..n_triangles {
            let center: Point3f = rng.uniform_point_in(world);
            for _ in 0..3 {
                let offset: Vector3f = Vector3f::new(
                    rng.uniform_float_range(-3.0, 3.0),
                    rng.uniform_float_range(-3.0, 3.0),
                    rng.uniform_float_range(-3.0, 3.0),
                );
                p.push(center + offset);
            }
        }
        let vertex_indices: Vec<usize> = (0..3 * n_triangles).collect();
        prims.extend(create_triangle_mesh(vertex_indices, p).context("random triangle mesh")?);
    }
    Ok(prims)
}

fn random_rays(rng: &mut Rng, world: &Bounds3f, n_rays: usize) -> Vec<Ray> {
    (0..n_rays)
        .map(|_| {
            let origin: Point3f = rng.uniform_point_in(world);
            let target: Point3f = rng.uniform_point_in(world);
            let d: Vector3f = target - origin;
            if d.length_squared() > 0.0 {
                Ray::new(origin, d.normalize())
            } else {
                Ray::new(origin, rng.uniform_direction())
            }
        })
        .collect()
}

fn count_hits(hits: &[SurfaceInteraction]) -> usize {
    hits.iter().filter(|si| si.is_hit()).count()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // handle command line options
    let args = Cli::parse();
    let num_cores = num_cpus::get();
    println!(
        "bvh_query version {} [Detected {} cores]",
        VERSION, num_cores
    );
    let mut rng: Rng = Rng::with_seed(args.seed);
    let world: Bounds3f = Bounds3f::new(
        Point3f::new(-100.0, -100.0, -100.0),
        Point3f::new(100.0, 100.0, 100.0),
    );
    let prims = random_scene(&mut rng, &world, args.primitives, args.triangles)?;
    let rays: Vec<Ray> = random_rays(&mut rng, &world, args.rays);
    println!(
        "{} primitives ({} spheres, {} triangles), {} rays",
        prims.len(),
        args.primitives,
        args.triangles,
        rays.len()
    );
    let mut scene: Scene = Scene::new(prims.clone());
    if args.check {
        // test every primitive, single threaded
        let start = Instant::now();
        let hits: Vec<SurfaceInteraction> =
            rays.iter().map(|ray| scene.intersect_linear(ray)).collect();
        println!(
            "check mode: {} hits in {:.3} secs",
            count_hits(&hits),
            start.elapsed().as_secs_f64()
        );
        return Ok(());
    }
    let mut ps: ParamSet = ParamSet::default();
    ps.add_string(String::from("splitmethod"), args.splitmethod.clone());
    ps.add_int(String::from("maxnodeprims"), args.maxnodeprims);
    let start = Instant::now();
    let bvh: BVHAccel = BVHAccel::create(prims, &ps).context("building the BVH")?;
    ps.report_unused();
    println!(
        "BVH ({}): {} nodes, {} leaves, depth {}, built in {:.3} secs",
        bvh.split_method(),
        bvh.total_nodes(),
        bvh.leaf_count(),
        bvh.depth(),
        start.elapsed().as_secs_f64()
    );
    scene.set_bvh(bvh);
    let bvh: &BVHAccel = match scene.bvh() {
        Some(bvh) => bvh,
        None => bail!("scene has no BVH"),
    };
    let start = Instant::now();
    let hits: Vec<SurfaceInteraction> = intersect_rays(bvh, &rays, args.nthreads, args.progress);
    println!(
        "{} hits in {:.3} secs",
        count_hits(&hits),
        start.elapsed().as_secs_f64()
    );
    if args.verify {
        let mut mismatches: usize = 0;
        for (ray, si) in rays.iter().zip(hits.iter()) {
            let reference: SurfaceInteraction = scene.intersect_linear(ray);
            if reference.distance != si.distance {
                log::error!(
                    "{:?}: BVH distance {} differs from {}",
                    ray,
                    si.distance,
                    reference.distance
                );
                mismatches += 1;
            }
        }
        if mismatches > 0 {
            bail!("{} of {} rays differ from the linear scan", mismatches, rays.len());
        }
        println!("verified {} rays against the linear scan", rays.len());
    }
    Ok(())
}
