// std
use std::mem;
use std::sync::Arc;
// pbrt
use crate::core::error::{BvhError, Result};
use crate::core::geometry::{bnd3_union_pnt3f, pnt3_permutef, vec3_cross_vec3};
use crate::core::geometry::{vec3_max_componentf, vec3_max_dimensionf, vec3_permutef};
use crate::core::geometry::{Bounds3f, Normal3f, Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::pbrt::gamma;
use crate::core::pbrt::Float;
use crate::core::primitive::Primitive;

// see triangle.h

#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// the total number of triangles in the mesh
    pub n_triangles: usize,
    /// vector of vertex indices
    pub vertex_indices: Vec<usize>,
    /// the total number of vertices in the mesh
    pub n_vertices: usize,
    /// vector of *n_vertices* vertex positions
    pub p: Vec<Point3f>,
}

impl TriangleMesh {
    /// Checks that the indices come in triples and all refer to
    /// existing vertices.
    pub fn new(vertex_indices: Vec<usize>, p: Vec<Point3f>) -> Result<Self> {
        if vertex_indices.len() % 3 != 0 {
            return Err(BvhError::InvalidParameter {
                name: String::from("indices"),
                value: vertex_indices.len().to_string(),
                reason: "number of vertex indices is not a multiple of 3",
            });
        }
        if let Some(bad) = vertex_indices.iter().find(|&&index| index >= p.len()) {
            return Err(BvhError::InvalidParameter {
                name: String::from("indices"),
                value: bad.to_string(),
                reason: "vertex index out of range",
            });
        }
        Ok(TriangleMesh {
            n_triangles: vertex_indices.len() / 3,
            vertex_indices,
            n_vertices: p.len(),
            p,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Triangle {
    mesh: Arc<TriangleMesh>,
    pub id: usize,
}

impl Triangle {
    pub fn new(mesh: Arc<TriangleMesh>, tri_number: usize) -> Self {
        Triangle {
            mesh,
            id: tri_number,
        }
    }
    pub fn vertices(&self) -> [Point3f; 3] {
        [
            self.mesh.p[self.mesh.vertex_indices[self.id * 3]],
            self.mesh.p[self.mesh.vertex_indices[self.id * 3 + 1]],
            self.mesh.p[self.mesh.vertex_indices[self.id * 3 + 2]],
        ]
    }
    /// Watertight ray/triangle test. Returns the hit distance and the
    /// barycentric coordinates of the hit point.
    pub fn intersect_t(&self, ray: &Ray) -> Option<(Float, [Float; 3])> {
        // get triangle vertices in _p0_, _p1_, and _p2_
        let [p0, p1, p2] = self.vertices();
        // translate vertices based on ray origin
        let o: Vector3f = Vector3f::from(ray.o);
        let mut p0t: Point3f = p0 - o;
        let mut p1t: Point3f = p1 - o;
        let mut p2t: Point3f = p2 - o;
        // permute components of triangle vertices and ray direction
        let kz: usize = vec3_max_dimensionf(&ray.d.abs());
        let kx: usize = (kz + 1) % 3;
        let ky: usize = (kx + 1) % 3;
        let d: Vector3f = vec3_permutef(&ray.d, kx, ky, kz);
        p0t = pnt3_permutef(&p0t, kx, ky, kz);
        p1t = pnt3_permutef(&p1t, kx, ky, kz);
        p2t = pnt3_permutef(&p2t, kx, ky, kz);
        // apply shear transformation to translated vertex positions
        let sx: Float = -d.x / d.z;
        let sy: Float = -d.y / d.z;
        let sz: Float = 1.0 / d.z;
        p0t.x += sx * p0t.z;
        p0t.y += sy * p0t.z;
        p1t.x += sx * p1t.z;
        p1t.y += sy * p1t.z;
        p2t.x += sx * p2t.z;
        p2t.y += sy * p2t.z;
        // compute edge function coefficients _e0_, _e1_, and _e2_
        let mut e0: Float = p1t.x * p2t.y - p1t.y * p2t.x;
        let mut e1: Float = p2t.x * p0t.y - p2t.y * p0t.x;
        let mut e2: Float = p0t.x * p1t.y - p0t.y * p1t.x;
        // fall back to double precision test at triangle edges
        if mem::size_of::<Float>() == mem::size_of::<f32>() && (e0 == 0.0 || e1 == 0.0 || e2 == 0.0)
        {
            e0 = (p1t.x as f64 * p2t.y as f64 - p1t.y as f64 * p2t.x as f64) as Float;
            e1 = (p2t.x as f64 * p0t.y as f64 - p2t.y as f64 * p0t.x as f64) as Float;
            e2 = (p0t.x as f64 * p1t.y as f64 - p0t.y as f64 * p1t.x as f64) as Float;
        }
        // perform triangle edge and determinant tests
        if (e0 < 0.0 || e1 < 0.0 || e2 < 0.0) && (e0 > 0.0 || e1 > 0.0 || e2 > 0.0) {
            return None;
        }
        let det: Float = e0 + e1 + e2;
        if det == 0.0 {
            return None;
        }
        // compute scaled hit distance to triangle and test against ray $t$ range
        p0t.z *= sz;
        p1t.z *= sz;
        p2t.z *= sz;
        let t_scaled: Float = e0 * p0t.z + e1 * p1t.z + e2 * p2t.z;
        if det < 0.0 && (t_scaled >= 0.0 || t_scaled < ray.t_max * det) {
            return None;
        } else if det > 0.0 && (t_scaled <= 0.0 || t_scaled > ray.t_max * det) {
            return None;
        }
        // compute barycentric coordinates and $t$ value for triangle intersection
        let inv_det: Float = 1.0 / det;
        let b0: Float = e0 * inv_det;
        let b1: Float = e1 * inv_det;
        let b2: Float = e2 * inv_det;
        let t: Float = t_scaled * inv_det;
        // ensure that computed triangle $t$ is conservatively greater than zero
        let max_zt: Float = vec3_max_componentf(&Vector3f::new(p0t.z, p1t.z, p2t.z).abs());
        let delta_z: Float = gamma(3_i32) * max_zt;
        let max_xt: Float = vec3_max_componentf(&Vector3f::new(p0t.x, p1t.x, p2t.x).abs());
        let max_yt: Float = vec3_max_componentf(&Vector3f::new(p0t.y, p1t.y, p2t.y).abs());
        let delta_x: Float = gamma(5_i32) * (max_xt + max_zt);
        let delta_y: Float = gamma(5_i32) * (max_yt + max_zt);
        let delta_e: Float =
            2.0 * (gamma(2_i32) * max_xt * max_yt + delta_y * max_xt + delta_x * max_yt);
        let max_e: Float = vec3_max_componentf(&Vector3f::new(e0, e1, e2).abs());
        let delta_t: Float = 3.0
            * (gamma(3_i32) * max_e * max_zt + delta_e * max_zt + delta_z * max_e)
            * inv_det.abs();
        if t <= delta_t {
            return None;
        }
        Some((t, [b0, b1, b2]))
    }
    /// Geometric normal, oriented by the winding order of the vertices.
    pub fn normal(&self) -> Normal3f {
        let [p0, p1, p2] = self.vertices();
        let dp02: Vector3f = p0 - p2;
        let dp12: Vector3f = p1 - p2;
        Normal3f::from(vec3_cross_vec3(&dp02, &dp12).normalize())
    }
}

impl Primitive for Triangle {
    fn world_bound(&self) -> Bounds3f {
        let [p0, p1, p2] = self.vertices();
        bnd3_union_pnt3f(&Bounds3f::new(p0, p1), &p2)
    }
    fn intersect(&self, ray: &Ray) -> SurfaceInteraction<'_> {
        match self.intersect_t(ray) {
            Some((t, [b0, b1, b2])) => {
                let [p0, p1, p2] = self.vertices();
                // interpolate hit point
                let p_hit: Point3f = p0 * b0 + p1 * b1 + p2 * b2;
                SurfaceInteraction::new(t, p_hit, self.normal(), self)
            }
            None => SurfaceInteraction::default(),
        }
    }
    fn intersect_p(&self, ray: &Ray) -> bool {
        self.intersect_t(ray).is_some()
    }
}

/// Create one **Triangle** primitive per index triple.
pub fn create_triangle_mesh(
    vertex_indices: Vec<usize>,
    p: Vec<Point3f>,
) -> Result<Vec<Arc<dyn Primitive + Send + Sync>>> {
    let mesh: Arc<TriangleMesh> = Arc::new(TriangleMesh::new(vertex_indices, p)?);
    let mut tris: Vec<Arc<dyn Primitive + Send + Sync>> = Vec::with_capacity(mesh.n_triangles);
    for i in 0..mesh.n_triangles {
        tris.push(Arc::new(Triangle::new(mesh.clone(), i)));
    }
    Ok(tris)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Vec<Arc<dyn Primitive + Send + Sync>> {
        // two triangles covering [0,1]x[0,1] at z = 2
        create_triangle_mesh(
            vec![0, 1, 2, 0, 2, 3],
            vec![
                Point3f::new(0.0, 0.0, 2.0),
                Point3f::new(1.0, 0.0, 2.0),
                Point3f::new(1.0, 1.0, 2.0),
                Point3f::new(0.0, 1.0, 2.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn mesh_validation() {
        assert!(matches!(
            TriangleMesh::new(vec![0, 1], vec![Point3f::default(); 3]),
            Err(BvhError::InvalidParameter { .. })
        ));
        assert!(matches!(
            TriangleMesh::new(vec![0, 1, 3], vec![Point3f::default(); 3]),
            Err(BvhError::InvalidParameter { .. })
        ));
        assert_eq!(quad().len(), 2);
    }

    #[test]
    fn hit_inside_triangle() {
        let tris = quad();
        let ray = Ray::new(Point3f::new(0.75, 0.25, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        let si = tris[0].intersect(&ray);
        assert!(si.is_hit());
        assert!((si.distance - 2.0).abs() < 1e-5);
        assert!((si.p.x - 0.75).abs() < 1e-5);
        assert!((si.p.y - 0.25).abs() < 1e-5);
        assert!(si.hit_primitive(tris[0].as_ref()));
        // the other half of the quad is missed
        assert!(!tris[1].intersect_p(&ray));
    }

    #[test]
    fn miss_outside_and_behind() {
        let tris = quad();
        let ray = Ray::new(Point3f::new(2.0, 0.5, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(!tris[0].intersect_p(&ray));
        let ray = Ray::new(Point3f::new(0.75, 0.25, 3.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(!tris[0].intersect_p(&ray));
        let mut ray = Ray::new(Point3f::new(0.75, 0.25, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        ray.t_max = 1.0;
        assert!(!tris[0].intersect_p(&ray));
    }

    #[test]
    fn bounds_and_normal() {
        let tri = Triangle::new(
            Arc::new(
                TriangleMesh::new(
                    vec![0, 1, 2],
                    vec![
                        Point3f::new(0.0, 0.0, 0.0),
                        Point3f::new(1.0, 0.0, 0.0),
                        Point3f::new(0.0, 2.0, 0.0),
                    ],
                )
                .unwrap(),
            ),
            0,
        );
        let b = tri.world_bound();
        assert_eq!(b.p_min, Point3f::new(0.0, 0.0, 0.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 2.0, 0.0));
        assert!((tri.normal().z.abs() - 1.0).abs() < 1e-6);
    }
}
