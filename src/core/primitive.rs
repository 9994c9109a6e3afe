//! The **Primitive** trait is the bridge between the geometry a host
//! application provides and the acceleration structure. The BVH only
//! needs two things from a primitive: a bounding box and the closest
//! intersection with a ray.

// pbrt
use crate::core::geometry::{Bounds3f, Ray};
use crate::core::interaction::SurfaceInteraction;

// see primitive.h

pub trait Primitive {
    /// Bounds in world space. Must not change while a hierarchy
    /// references the primitive.
    fn world_bound(&self) -> Bounds3f;
    /// Closest intersection with *ray* in `(0, ray.t_max)`, or the
    /// default (no hit) interaction.
    fn intersect(&self, ray: &Ray) -> SurfaceInteraction<'_>;
    /// Any intersection at all, used for shadow rays.
    fn intersect_p(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_hit()
    }
}
