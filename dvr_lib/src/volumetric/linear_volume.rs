use log::debug;
use nalgebra::{vector, Point3, Vector3};

use crate::{
    common::ValueRange,
    error::{DvrError, Result},
};

use super::{parse, RawFormat, Volume};

/// Volume with samples stored linearly, x is the fastest growing axis.
///
/// Immutable once built. A new dataset means a new `LinearVolume`.
pub struct LinearVolume {
    size: Vector3<usize>,
    data: Vec<f32>,
    range: ValueRange,
}

impl std::fmt::Debug for LinearVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearVolume")
            .field("size", &self.size)
            .field("data len", &self.data.len())
            .field("range", &self.range)
            .finish()
    }
}

impl LinearVolume {
    /// Build from normalized samples.
    /// `data` must hold exactly `width * height * depth` values.
    pub fn new(size: Vector3<usize>, data: Vec<f32>) -> Result<LinearVolume> {
        if size.iter().any(|&d| d == 0) {
            return Err(DvrError::InvalidDimensions {
                width: size.x,
                height: size.y,
                depth: size.z,
            });
        }

        let expected = super::sample_count(size).ok_or(DvrError::InvalidDimensions {
            width: size.x,
            height: size.y,
            depth: size.z,
        })?;
        if data.len() != expected {
            return Err(DvrError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let range = ValueRange::from_samples(data.iter().copied());

        debug!("New linear volume, size {size:?}, values {range:?}");

        Ok(LinearVolume { size, data, range })
    }

    /// Decode raw 16-bit samples
    pub fn from_raw(
        width: usize,
        height: usize,
        depth: usize,
        bytes: &[u8],
        format: RawFormat,
    ) -> Result<LinearVolume> {
        parse::decode_samples(vector![width, height, depth], bytes, format)
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    /// Clamped access, never out of bounds
    fn get_clamped(&self, x: usize, y: usize, z: usize) -> f32 {
        let x = x.min(self.size.x - 1);
        let y = y.min(self.size.y - 1);
        let z = z.min(self.size.z - 1);
        self.data[self.get_3d_index(x, y, z)]
    }

    pub fn voxels(&self) -> &[f32] {
        &self.data
    }

    /// Smallest and largest sample
    pub fn value_range(&self) -> ValueRange {
        self.range
    }
}

/// Continuous voxel coordinate of a texture coordinate.
/// Returns lower voxel index and interpolation weight.
fn texel(coord: f32, size: usize) -> (usize, f32) {
    let c = (coord * size as f32 - 0.5).clamp(0.0, (size - 1) as f32);
    let low = c.floor();
    (low as usize, c - low)
}

impl Volume for LinearVolume {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(self.get_3d_index(x, y, z)).copied()
    }

    fn sample_at(&self, pos: Point3<f32>) -> f32 {
        let (x, x_t) = texel(pos.x, self.size.x);
        let (y, y_t) = texel(pos.y, self.size.y);
        let (z, z_t) = texel(pos.z, self.size.z);

        // Corners past the last voxel get clamped, weights are zero there anyway
        let c000 = self.get_clamped(x, y, z);
        let c100 = self.get_clamped(x + 1, y, z);
        let c010 = self.get_clamped(x, y + 1, z);
        let c110 = self.get_clamped(x + 1, y + 1, z);
        let c001 = self.get_clamped(x, y, z + 1);
        let c101 = self.get_clamped(x + 1, y, z + 1);
        let c011 = self.get_clamped(x, y + 1, z + 1);
        let c111 = self.get_clamped(x + 1, y + 1, z + 1);

        // x lines
        let c00 = c000 * (1.0 - x_t) + c100 * x_t;
        let c10 = c010 * (1.0 - x_t) + c110 * x_t;
        let c01 = c001 * (1.0 - x_t) + c101 * x_t;
        let c11 = c011 * (1.0 - x_t) + c111 * x_t;

        // y plane
        let c0 = c00 * (1.0 - y_t) + c10 * y_t;
        let c1 = c01 * (1.0 - y_t) + c11 * y_t;

        c0 * (1.0 - z_t) + c1 * z_t
    }
}
