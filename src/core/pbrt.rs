//! Type definition of Float, the sentinels used for "no hit" and
//! cost initialization, and small numeric helpers which are used
//! almost everywhere else in the code.

// see pbrt.h

pub type Float = f32;

/// Distance of a ray that hit nothing. Compares greater than every
/// finite hit distance.
pub const INFINITY: Float = std::f32::INFINITY;
pub const MACHINE_EPSILON: Float = std::f32::EPSILON * 0.5;

/// Error propagation.
pub fn gamma(n: i32) -> Float {
    (n as Float * MACHINE_EPSILON) / (1.0 - n as Float * MACHINE_EPSILON)
}

/// Linear interpolation between *a* and *b*.
pub fn lerp(t: Float, a: Float, b: Float) -> Float {
    (1.0 - t) * a + t * b
}

/// Find solution(s) of the quadratic equation at<sup>2</sup> + bt + c = 0.
/// The roots are returned in ascending order.
pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    // find quadratic discriminant
    let discrim: f64 = b as f64 * b as f64 - 4.0 * a as f64 * c as f64;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim: f64 = discrim.sqrt();
    // compute quadratic _t_ values
    let q: f64 = if b < 0.0 {
        -0.5 * (b as f64 - root_discrim)
    } else {
        -0.5 * (b as f64 + root_discrim)
    };
    let mut t0: Float = (q / a as f64) as Float;
    let mut t1: Float = (c as f64 / q) as Float;
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    Some((t0, t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinity_is_farther_than_any_finite_distance() {
        assert!(std::f32::MAX < INFINITY);
        assert!(!(INFINITY < INFINITY));
    }

    #[test]
    fn quadratic_roots_are_sorted() {
        // (t - 1)(t - 3) = t^2 - 4t + 3
        let (t0, t1) = quadratic(1.0, -4.0, 3.0).unwrap();
        assert!((t0 - 1.0).abs() < 1e-6);
        assert!((t1 - 3.0).abs() < 1e-6);
        assert!(quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn lerp_between_endpoints() {
        assert_eq!(lerp(0.0, 2.0, 4.0), 2.0);
        assert_eq!(lerp(0.25, 0.0, 4.0), 1.0);
        assert_eq!(lerp(1.0, 2.0, 4.0), 4.0);
    }
}
