//! # Scene
//!
//! The **Scene** stores the geometric primitives and, once built, the
//! bounding volume hierarchy over them. Without a hierarchy every
//! query tests all primitives one after the other ("check mode"),
//! which is slow but serves as the reference for the accelerated
//! queries.
//!

// std
use std::sync::Arc;
// pbrt
use crate::accelerators::bvh::{BVHAccel, SplitMethod};
use crate::core::geometry::{bnd3_union_bnd3f, Bounds3f, Ray};
use crate::core::interaction::SurfaceInteraction;
use crate::core::primitive::Primitive;

// see scene.h

pub struct Scene {
    primitives: Vec<Arc<dyn Primitive + Sync + Send>>,
    aggregate: Option<BVHAccel>,
    world_bound: Bounds3f,
}

impl Scene {
    pub fn new(primitives: Vec<Arc<dyn Primitive + Sync + Send>>) -> Self {
        let world_bound: Bounds3f = primitives
            .iter()
            .fold(Bounds3f::default(), |b, prim| {
                bnd3_union_bnd3f(&b, &prim.world_bound())
            });
        Scene {
            primitives,
            aggregate: None,
            world_bound,
        }
    }
    /// Build (or rebuild) the hierarchy used by **intersect()**.
    pub fn build_bvh(&mut self, max_prims_in_node: usize, split_method: SplitMethod) {
        self.aggregate = Some(BVHAccel::new(
            self.primitives.clone(),
            max_prims_in_node,
            split_method,
        ));
    }
    /// Use an already built hierarchy for **intersect()**.
    pub fn set_bvh(&mut self, bvh: BVHAccel) {
        self.aggregate = Some(bvh);
    }
    pub fn bvh(&self) -> Option<&BVHAccel> {
        self.aggregate.as_ref()
    }
    pub fn primitives(&self) -> &[Arc<dyn Primitive + Sync + Send>] {
        &self.primitives
    }
    pub fn world_bound(&self) -> Bounds3f {
        self.world_bound
    }
    pub fn intersect(&self, ray: &Ray) -> SurfaceInteraction<'_> {
        match self.aggregate {
            Some(ref bvh) => bvh.intersect(ray),
            None => self.intersect_linear(ray),
        }
    }
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        match self.aggregate {
            Some(ref bvh) => bvh.intersect_p(ray),
            None => self.primitives.iter().any(|prim| prim.intersect_p(ray)),
        }
    }
    /// Test every primitive, keep the closest hit. The first of equally
    /// distant hits wins.
    pub fn intersect_linear(&self, ray: &Ray) -> SurfaceInteraction<'_> {
        let mut closest: SurfaceInteraction = SurfaceInteraction::default();
        for prim in &self.primitives {
            let si: SurfaceInteraction = prim.intersect(ray);
            if si.distance < closest.distance {
                closest = si;
            }
        }
        closest
    }
}
