use std::ops::RangeInclusive;

use log::debug;
use nalgebra::{vector, Vector3};

use super::SampleGenerator;

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

/// Generate volume with a number of randomly placed shapes.
/// Overlapping shapes: the first one listed wins.
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn new(
        dims: Vector3<usize>,
        n_of_shapes: usize,
        sample: u16,
        obj_size: usize,
        seed: Option<u64>,
    ) -> ShapesGenerator {
        let size = vector![obj_size, obj_size, obj_size];
        let variance = obj_size / 4;
        let sample_variance = sample / 10;

        let shape_gen =
            ShapeInfoGenerator::new(dims, size, variance, sample, sample_variance, seed);
        let shapes = shape_gen.get_shapes(n_of_shapes);
        debug!("Generated {} shapes", shapes.len());
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16 {
        self.shapes
            .iter()
            .filter(|shape| shape.contains_box(coords))
            .find_map(|shape| shape.render_at(coords - shape.position_low))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume, occupies `position_low..position_high`
#[derive(Debug, Clone)]
pub struct ShapeInfo {
    pub position_low: Vector3<usize>,
    pub position_high: Vector3<usize>,
    pub shape_type: ShapeType,
    pub sample: u16,
}

impl ShapeInfo {
    fn contains_box(&self, coords: Vector3<usize>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] < self.position_high[i])
    }

    /// `None` if the offset is outside of the shape
    fn render_at(&self, offset: Vector3<usize>) -> Option<u16> {
        match self.shape_type {
            ShapeType::Cuboid => Some(self.sample),
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    // Ellipsoid inscribed in the bounding box, measured at voxel centers
    fn render_sphere(&self, offset: Vector3<usize>) -> Option<u16> {
        let size = (self.position_high - self.position_low).cast::<f32>();
        let half = size / 2.0;
        let p = offset.cast::<f32>() + vector![0.5, 0.5, 0.5] - half;

        let d = p.component_div(&half).norm_squared();
        (d <= 1.0).then_some(self.sample)
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<usize>,
    size: Vector3<usize>,
    size_variance: usize,
    sample: u16,
    sample_variance: u16,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<usize>,
        size: Vector3<usize>,
        size_variance: usize,
        sample: u16,
        sample_variance: u16,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        match self.rng.u8(0..N_OF_SHAPE_KINDS) {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    fn random_vector(&self, ranges: [RangeInclusive<usize>; 3]) -> Vector3<usize> {
        let [x, y, z] = ranges;
        vector![self.rng.usize(x), self.rng.usize(y), self.rng.usize(z)]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        // Sizes are at least one voxel and never larger than the volume
        let size_range = |i: usize| {
            let max_size = self.vol_dims[i];
            let low = self.size[i].saturating_sub(self.size_variance).clamp(1, max_size);
            let high = (self.size[i] + self.size_variance).clamp(low, max_size);
            low..=high
        };
        let size = self.random_vector([size_range(0), size_range(1), size_range(2)]);

        // Spawn shape in positions it fits
        let pos_range = |i: usize| 0..=(self.vol_dims[i] - size[i]);
        let position_low = self.random_vector([pos_range(0), pos_range(1), pos_range(2)]);

        ShapeInfo {
            position_low,
            position_high: position_low + size,
            shape_type,
            sample: self.random_sample(),
        }
    }

    fn random_sample(&self) -> u16 {
        // Saturating, there is no overflow
        let low = self.sample.saturating_sub(self.sample_variance);
        let high = self.sample.saturating_add(self.sample_variance);
        self.rng.u16(low..=high)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn shapes_fit_in_volume() {
        let dims = vector![20, 10, 5];
        let gen = ShapeInfoGenerator::new(dims, vector![8, 8, 8], 2, 1000, 100, Some(11));
        for shape in gen.get_shapes(50) {
            for i in 0..3 {
                assert!(shape.position_low[i] < shape.position_high[i]);
                assert!(shape.position_high[i] <= dims[i]);
            }
            assert!((900..=1100).contains(&shape.sample));
        }
    }

    #[test]
    fn sphere_is_empty_in_corners() {
        let shape = ShapeInfo {
            position_low: vector![2, 2, 2],
            position_high: vector![8, 8, 8],
            shape_type: ShapeType::Sphere,
            sample: 50,
        };
        assert_eq!(shape.render_at(vector![0, 0, 0]), None);
        assert_eq!(shape.render_at(vector![3, 3, 3]), Some(50));
    }

    #[test]
    fn background_is_zero() {
        let gen = ShapesGenerator::new(vector![16, 16, 16], 0, 100, 4, Some(1));
        assert_eq!(gen.sample_at(vector![3, 3, 3]), 0);
    }

    #[test]
    fn same_seed_same_volume() {
        let a = ShapesGenerator::new(vector![16, 16, 16], 5, 100, 4, Some(9));
        let b = ShapesGenerator::new(vector![16, 16, 16], 5, 100, 4, Some(9));
        for x in 0..16 {
            let coords = vector![x, x, 15 - x];
            assert_eq!(a.sample_at(coords), b.sample_at(coords));
        }
    }
}
