//! # rs_bvh
//!
//! A bounding volume hierarchy (BVH) over ray traceable primitives,
//! following the design of the [PBRT book][book]'s acceleration
//! structures.
//!
//! The hierarchy is built once from a list of primitives, splitting
//! either at the median of the sorted primitives or where the surface
//! area heuristic (SAH) is cheapest, and then answers read-only
//! nearest-hit queries. See [BVHAccel] for the details.
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_bvh::accelerators::bvh::{BVHAccel, SplitMethod};
//! use rs_bvh::core::geometry::{Point3f, Ray, Vector3f};
//! use rs_bvh::core::primitive::Primitive;
//! use rs_bvh::shapes::sphere::Sphere;
//!
//! let prims: Vec<Arc<dyn Primitive + Send + Sync>> = vec![
//!     Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 5.0), 1.0)),
//!     Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 10.0), 1.0)),
//!     Arc::new(Sphere::new(Point3f::new(5.0, 0.0, 5.0), 1.0)),
//! ];
//! let bvh = BVHAccel::new(prims, 4, SplitMethod::SAH);
//! let ray = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, 1.0));
//! let si = bvh.intersect(&ray);
//! assert!(si.is_hit());
//! assert!((si.distance - 4.0).abs() < 1e-5);
//! ```
//!
//! [book]: http://www.pbrt.org
//! [BVHAccel]: accelerators/bvh/struct.BVHAccel.html

#[macro_use]
extern crate impl_ops;

pub mod accelerators;
pub mod blockqueue;
pub mod core;
pub mod shapes;
