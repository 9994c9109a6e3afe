// pbrt
use crate::core::geometry::{vec3_dot_vec3f, Bounds3f, Normal3f, Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::pbrt::quadratic;
use crate::core::pbrt::Float;
use crate::core::primitive::Primitive;

// see sphere.h

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Point3f,
    pub radius: Float,
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere {
            center: Point3f::default(),
            radius: 1.0,
        }
    }
}

impl Sphere {
    pub fn new(center: Point3f, radius: Float) -> Self {
        Sphere {
            center,
            radius: radius.abs(),
        }
    }
    /// Parametric distance of the closest hit in `(0, ray.t_max)`.
    pub fn intersect_t(&self, ray: &Ray) -> Option<Float> {
        // compute quadratic sphere coefficients
        let oc: Vector3f = ray.o - self.center;
        let a: Float = ray.d.length_squared();
        let b: Float = 2.0 * vec3_dot_vec3f(&ray.d, &oc);
        let c: Float = oc.length_squared() - self.radius * self.radius;
        // solve quadratic equation for _t_ values
        let (t0, t1) = quadratic(a, b, c)?;
        // check quadric shape _t0_ and _t1_ for nearest intersection
        if t0 >= ray.t_max || t1 <= 0.0 {
            return None;
        }
        let mut t_shape_hit: Float = t0;
        if t_shape_hit <= 0.0 {
            t_shape_hit = t1;
            if t_shape_hit >= ray.t_max {
                return None;
            }
        }
        Some(t_shape_hit)
    }
}

impl Primitive for Sphere {
    fn world_bound(&self) -> Bounds3f {
        let r: Vector3f = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }
    fn intersect(&self, ray: &Ray) -> SurfaceInteraction<'_> {
        match self.intersect_t(ray) {
            Some(t) => {
                let p_hit: Point3f = ray.position(t);
                let n: Normal3f = Normal3f::from((p_hit - self.center).normalize());
                SurfaceInteraction::new(t, p_hit, n, self)
            }
            None => SurfaceInteraction::default(),
        }
    }
    fn intersect_p(&self, ray: &Ray) -> bool {
        self.intersect_t(ray).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_from_outside() {
        let sphere = Sphere::new(Point3f::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, 1.0));
        let si = sphere.intersect(&ray);
        assert!(si.is_hit());
        assert!((si.distance - 4.0).abs() < 1e-5);
        assert!((si.n.z + 1.0).abs() < 1e-5);
        assert!(si.hit_primitive(&sphere));
    }

    #[test]
    fn hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Point3f::default(), 2.0);
        let ray = Ray::new(Point3f::default(), Vector3f::new(1.0, 0.0, 0.0));
        let t = sphere.intersect_t(&ray).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn misses() {
        let sphere = Sphere::new(Point3f::new(0.0, 0.0, 5.0), 1.0);
        // behind the origin
        let ray = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, -1.0));
        assert!(!sphere.intersect(&ray).is_hit());
        // off to the side
        let ray = Ray::new(Point3f::new(3.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(!sphere.intersect_p(&ray));
        // segment too short
        let mut ray = Ray::new(Point3f::default(), Vector3f::new(0.0, 0.0, 1.0));
        ray.t_max = 3.5;
        assert!(!sphere.intersect_p(&ray));
    }

    #[test]
    fn bounds_enclose_sphere() {
        let sphere = Sphere::new(Point3f::new(1.0, 2.0, 3.0), -0.5);
        let b = sphere.world_bound();
        assert_eq!(b.p_min, Point3f::new(0.5, 1.5, 2.5));
        assert_eq!(b.p_max, Point3f::new(1.5, 2.5, 3.5));
    }
}
