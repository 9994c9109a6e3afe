//! Nearest-hit queries for many rays at once.
//!
//! A finished **BVHAccel** is never mutated, so worker threads can
//! share it without locking. Rays are handed out in blocks through a
//! **BlockQueue**, each worker sends the hits of a block back through
//! a channel and the calling thread puts them in place.

// pbrt
use crate::accelerators::bvh::BVHAccel;
use crate::blockqueue::BlockQueue;
use crate::core::geometry::Ray;
use crate::core::interaction::SurfaceInteraction;
use crate::core::primitive::Primitive;

/// Number of rays a worker traces before reporting back.
pub const RAYS_PER_BLOCK: usize = 256;

/// Intersect all *rays* with *bvh* using `num_threads` worker threads
/// (0 means one per CPU). The result has one entry per ray, in the
/// order of the input.
pub fn intersect_rays<'a>(
    bvh: &'a BVHAccel,
    rays: &[Ray],
    num_threads: u8,
    show_progress: bool,
) -> Vec<SurfaceInteraction<'a>> {
    let num_cores: usize = if num_threads == 0_u8 {
        num_cpus::get()
    } else {
        num_threads as usize
    };
    let mut hits: Vec<SurfaceInteraction<'a>> = vec![SurfaceInteraction::default(); rays.len()];
    if rays.is_empty() {
        return hits;
    }
    log::debug!(
        "Intersecting {} rays with {:?} thread(s) ...",
        rays.len(),
        num_cores
    );
    let block_queue = BlockQueue::new(rays.len(), RAYS_PER_BLOCK);
    let bq = &block_queue;
    let hits_ref = &mut hits;
    crossbeam::scope(|scope| {
        let (block_tx, block_rx) = crossbeam_channel::bounded(num_cores);
        // spawn worker threads
        for _ in 0..num_cores {
            let block_tx = block_tx.clone();
            scope.spawn(move |_| {
                while let Some((start, end)) = bq.next() {
                    let block_hits: Vec<SurfaceInteraction<'a>> =
                        rays[start..end].iter().map(|ray| bvh.intersect(ray)).collect();
                    // send results through the channel to main thread
                    block_tx
                        .send((start, block_hits))
                        .unwrap_or_else(|_| panic!("Failed to send block of hits"));
                }
            });
        }
        drop(block_tx);
        // collect
        let mut pb = if show_progress {
            Some(pbr::ProgressBar::new(bq.len() as u64))
        } else {
            None
        };
        for (start, block_hits) in block_rx.iter() {
            hits_ref[start..start + block_hits.len()].copy_from_slice(&block_hits);
            if let Some(ref mut pb) = pb {
                pb.inc();
            }
        }
        if let Some(ref mut pb) = pb {
            pb.finish();
        }
    })
    .unwrap_or_else(|_| panic!("A ray intersection worker panicked"));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accelerators::bvh::SplitMethod;
    use crate::core::geometry::{Point3f, Vector3f};
    use crate::core::primitive::Primitive;
    use crate::core::rng::Rng;
    use crate::shapes::sphere::Sphere;
    use std::sync::Arc;

    #[test]
    fn parallel_results_match_serial_in_order() {
        let mut rng = Rng::with_seed(11);
        let prims: Vec<Arc<dyn Primitive + Send + Sync>> = (0..64)
            .map(|_| {
                let center = Point3f::new(
                    rng.uniform_float_range(-10.0, 10.0),
                    rng.uniform_float_range(-10.0, 10.0),
                    rng.uniform_float_range(-10.0, 10.0),
                );
                Arc::new(Sphere::new(center, rng.uniform_float_range(0.2, 1.5)))
                    as Arc<dyn Primitive + Send + Sync>
            })
            .collect();
        let bvh = BVHAccel::new(prims, 4, SplitMethod::SAH);
        let rays: Vec<Ray> = (0..1000)
            .map(|_| Ray::new(Point3f::new(0.0, 0.0, -30.0), rng.uniform_direction()))
            .collect();
        for &num_threads in &[1_u8, 3_u8, 0_u8] {
            let hits = intersect_rays(&bvh, &rays, num_threads, false);
            assert_eq!(hits.len(), rays.len());
            for (ray, hit) in rays.iter().zip(hits.iter()) {
                let serial = bvh.intersect(ray);
                assert_eq!(hit.distance, serial.distance);
                assert_eq!(hit.p, serial.p);
            }
        }
    }

    #[test]
    fn no_rays_no_hits() {
        let bvh = BVHAccel::new(Vec::new(), 4, SplitMethod::Naive);
        assert!(intersect_rays(&bvh, &[], 2, false).is_empty());
        let rays = vec![Ray::new(Point3f::default(), Vector3f::new(1.0, 0.0, 0.0)); 3];
        let hits = intersect_rays(&bvh, &rays, 2, false);
        assert!(hits.iter().all(|si| !si.is_hit()));
    }
}
