//! Random Number Generator
//!
//! A small PCG32 generator. It is used to scatter test geometry and
//! rays reproducibly, so the same seed always gives the same scene.

use hexf::*;

// pbrt
use crate::core::geometry::{Bounds3f, Point3f, Vector3f};
use crate::core::pbrt::{lerp, Float};

// see rng.h

pub const FLOAT_ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1");
pub const PCG32_DEFAULT_STATE: u64 = 0x853c_49e6_748f_ea9b;
pub const PCG32_DEFAULT_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;
pub const PCG32_MULT: u64 = 0x5851_f42d_4c95_7f2d;

/// Random number generator
#[derive(Debug, Copy, Clone)]
pub struct Rng {
    state: u64,
    inc: u64,
}

impl Default for Rng {
    fn default() -> Self {
        Rng::new()
    }
}

impl Rng {
    pub fn new() -> Self {
        Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Rng::new();
        rng.set_sequence(seed);
        rng
    }
    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0_u64;
        self.inc = initseq.wrapping_shl(1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }
    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate: u64 = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted: u32 = (oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27) as u32;
        let rot: u32 = oldstate.wrapping_shr(59) as u32;
        xorshifted.wrapping_shr(rot) | xorshifted.wrapping_shl(rot.wrapping_neg() & 31)
    }
    /// Uniform value in `[0, 1)`.
    pub fn uniform_float(&mut self) -> Float {
        (self.uniform_uint32() as Float * hexf32!("0x1.0p-32") as Float)
            .min(FLOAT_ONE_MINUS_EPSILON)
    }
    /// Uniform value in `[a, b)`.
    pub fn uniform_float_range(&mut self, a: Float, b: Float) -> Float {
        lerp(self.uniform_float(), a, b)
    }
    pub fn uniform_point_in(&mut self, bounds: &Bounds3f) -> Point3f {
        let t: Point3f = Point3f::new(
            self.uniform_float(),
            self.uniform_float(),
            self.uniform_float(),
        );
        bounds.lerp(&t)
    }
    /// Uniformly distributed direction on the unit sphere.
    pub fn uniform_direction(&mut self) -> Vector3f {
        let z: Float = 1.0 - 2.0 * self.uniform_float();
        let r: Float = (1.0 as Float - z * z).max(0.0).sqrt();
        let phi: Float = 2.0 * std::f32::consts::PI * self.uniform_float();
        Vector3f::new(r * phi.cos(), r * phi.sin(), z)
    }
}
