//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks
//!
//! Builders panic on invalid sizes.

use nalgebra::{vector, Vector3};

use crate::{
    color,
    transfer_function::IsoControlPoint,
    volumetric::LinearVolume,
};

/// Cube with `side` voxels per axis, every voxel set to `value`
pub fn uniform_volume(side: usize, value: f32) -> LinearVolume {
    uniform_volume_sized(vector![side, side, side], value)
}

pub fn uniform_volume_sized(size: Vector3<usize>, value: f32) -> LinearVolume {
    let data = vec![value; size.x * size.y * size.z];
    LinearVolume::new(size, data).expect("uniform volume")
}

/// Values spread evenly over `<0;1)` in storage order.
/// Every histogram bin gets the same count when the voxel count is a multiple of the bin count.
pub fn spread_volume(size: Vector3<usize>) -> LinearVolume {
    let count = size.x * size.y * size.z;
    let data = (0..count)
        .map(|i| (i as f32 + 0.5) / count as f32)
        .collect();
    LinearVolume::new(size, data).expect("spread volume")
}

/// Density rising linearly along x, `0` at the first slice, `1` at the last
pub fn ramp_volume(size: Vector3<usize>) -> LinearVolume {
    let last = size.x.saturating_sub(1).max(1) as f32;
    let data = (0..size.x * size.y * size.z)
        .map(|i| (i % size.x) as f32 / last)
        .collect();
    LinearVolume::new(size, data).expect("ramp volume")
}

pub fn red_point(density: f32, opacity: f32) -> IsoControlPoint {
    IsoControlPoint::new("red", density, opacity, color::new(1.0, 0.0, 0.0))
}

/// Samples as little endian bytes
pub fn le_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}
