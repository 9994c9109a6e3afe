//! Concrete primitives which can be stored in a bounding volume
//! hierarchy. All of them implement the
//! [`Primitive`](crate::core::primitive::Primitive) trait, so the
//! hierarchy never needs any details about the underlying shape.
//!
//! - Sphere
//! - Triangle
//!
//! ## Spheres
//!
//! Spheres are a special case of a general type of surfaces called
//! quadrics. They are the simplest type of curved surfaces that is
//! useful to a ray tracer and are a good starting point for general
//! ray intersection routines.
//!
//! ## Triangle Meshes
//!
//! While a natural representation would be to have a **Triangle**
//! shape implementation where each triangle stored the positions of
//! its three vertices, a more memory-efficient representation is to
//! separately store entire triangle meshes with an array of vertex
//! positions where each individual triangle just stores three offsets
//! into this array for its three vertices.
//!
//! ```rust
//! use rs_bvh::core::geometry::{Point3f, Ray, Vector3f};
//! use rs_bvh::core::primitive::Primitive;
//! use rs_bvh::shapes::triangle::create_triangle_mesh;
//!
//! let tris = create_triangle_mesh(
//!     vec![0, 1, 2],
//!     vec![
//!         Point3f::new(0.0, 0.0, 1.0),
//!         Point3f::new(1.0, 0.0, 1.0),
//!         Point3f::new(0.0, 1.0, 1.0),
//!     ],
//! )
//! .unwrap();
//! let ray = Ray::new(Point3f::new(0.25, 0.25, 0.0), Vector3f::new(0.0, 0.0, 1.0));
//! assert!(tris[0].intersect_p(&ray));
//! ```

pub mod sphere;
pub mod triangle;
