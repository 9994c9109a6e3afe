//! The geometry of a particular point on a surface hit by a ray is
//! represented by a **SurfaceInteraction**. The acceleration
//! structure only looks at the hit distance, everything else is
//! payload for whoever consumes the nearest hit.
//!
//! A default-constructed interaction means "no hit": its distance is
//! [`INFINITY`](crate::core::pbrt::INFINITY), so combining two
//! results is a plain comparison of distances.

// std
use std::fmt;
// pbrt
use crate::core::geometry::{Normal3f, Point3f};
use crate::core::pbrt::{Float, INFINITY};
use crate::core::primitive::Primitive;

// see interaction.h

#[derive(Clone, Copy)]
pub struct SurfaceInteraction<'a> {
    /// distance along the ray, `INFINITY` if nothing was hit
    pub distance: Float,
    pub p: Point3f,
    pub n: Normal3f,
    /// the primitive which was hit
    pub primitive: Option<&'a (dyn Primitive + Send + Sync)>,
}

impl<'a> Default for SurfaceInteraction<'a> {
    fn default() -> Self {
        SurfaceInteraction {
            distance: INFINITY,
            p: Point3f::default(),
            n: Normal3f::default(),
            primitive: None,
        }
    }
}

impl<'a> SurfaceInteraction<'a> {
    pub fn new(
        distance: Float,
        p: Point3f,
        n: Normal3f,
        primitive: &'a (dyn Primitive + Send + Sync),
    ) -> Self {
        SurfaceInteraction {
            distance,
            p,
            n,
            primitive: Some(primitive),
        }
    }
    pub fn is_hit(&self) -> bool {
        self.distance < INFINITY
    }
    /// Does this interaction refer to *primitive*? Compares addresses
    /// only, so two equal but distinct primitives are not the same.
    pub fn hit_primitive(&self, primitive: &(dyn Primitive + Send + Sync)) -> bool {
        match self.primitive {
            Some(hit) => std::ptr::eq(
                hit as *const (dyn Primitive + Send + Sync) as *const u8,
                primitive as *const (dyn Primitive + Send + Sync) as *const u8,
            ),
            None => false,
        }
    }
}

impl<'a> fmt::Debug for SurfaceInteraction<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceInteraction")
            .field("distance", &self.distance)
            .field("p", &self.p)
            .field("n", &self.n)
            .field("primitive", &self.primitive.map(|p| p.world_bound()))
            .finish()
    }
}
