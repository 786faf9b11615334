use nalgebra::Vector3;

use super::SampleGenerator;

/// Generate solid volume
/// All samples are the same, except for a zero border `pad` voxels wide
pub struct SolidGenerator {
    sample: u16,
    pad: usize,
    dims: Vector3<usize>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<usize>, sample: u16, pad: usize) -> SolidGenerator {
        SolidGenerator { sample, pad, dims }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16 {
        let inside = coords
            .iter()
            .zip(self.dims.iter())
            .all(|(&c, &dim)| c >= self.pad && c + self.pad < dim);
        if inside {
            self.sample
        } else {
            0
        }
    }
}
