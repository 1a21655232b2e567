//! Random number streams for path simulation.
//!
//! Each block of paths owns an independent xoshiro256++ generator. Block `i`
//! starts from the simulation seed advanced by `i` jumps of 2^128 draws, so
//! blocks never overlap and the assignment depends only on the seed and the
//! block index, never on which thread runs the block.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Paths simulated from one generator stream.
pub const PATHS_PER_STREAM: usize = 4096;

/// Generators for `count` disjoint sub-streams of `seed`, in block order.
pub(crate) fn stream_rngs(seed: u64, count: usize) -> Vec<Xoshiro256PlusPlus> {
    let mut base = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let stream = base.clone();
            base.jump();
            stream
        })
        .collect()
}

/// Standard normal draws via the Box-Muller transform.
///
/// Each pair of uniforms yields two normals; the second is held for the
/// next call.
pub(crate) struct BoxMuller<R> {
    rng: R,
    spare: Option<f64>,
}

impl<R: Rng> BoxMuller<R> {
    pub(crate) fn new(rng: R) -> Self {
        Self { rng, spare: None }
    }

    pub(crate) fn sample(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // u1 in (0, 1] keeps ln(u1) finite.
        let u1 = 1.0 - self.rng.gen::<f64>();
        let u2 = self.rng.gen::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = TAU * u2;
        self.spare = Some(radius * angle.sin());
        radius * angle.cos()
    }
}
