use nalgebra::Vector3;

use super::SampleGenerator;

/// Density rising linearly along x, zero at the first slice and `sample` at the last
pub struct RampGenerator {
    sample: u16,
    width: usize,
}

impl RampGenerator {
    pub fn new(dims: Vector3<usize>, sample: u16) -> RampGenerator {
        RampGenerator {
            sample,
            width: dims.x,
        }
    }
}

impl SampleGenerator for RampGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16 {
        if self.width <= 1 {
            return self.sample;
        }
        let t = coords.x as f32 / (self.width - 1) as f32;
        (t * self.sample as f32).round() as u16
    }
}
