use nalgebra::Vector3;

use super::SampleGenerator;

// odd multipliers spreading coordinates over the seed space
const MIX: [u64; 3] = [0x9E37_79B9_7F4A_7C15, 0xC2B2_AE3D_27D4_EB4F, 0x1656_67B1_9E37_79F9];

/// Uniform random samples in `<0;sample>`.
///
/// Every voxel has its own generator seeded from the base seed and its coordinates,
/// so the result does not depend on the order slices are filled in.
pub struct NoiseGenerator {
    sample: u16,
    seed: u64,
}

impl NoiseGenerator {
    pub fn new(sample: u16, seed: Option<u64>) -> NoiseGenerator {
        let seed = seed.unwrap_or_else(|| fastrand::u64(..));
        NoiseGenerator { sample, seed }
    }
}

impl SampleGenerator for NoiseGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16 {
        let voxel_seed = coords
            .iter()
            .zip(MIX)
            .fold(self.seed, |acc, (&c, m)| acc ^ (c as u64).wrapping_add(1).wrapping_mul(m));
        let rng = fastrand::Rng::with_seed(voxel_seed);
        rng.u16(..=self.sample)
    }
}
