//! # Histogram
//!
//! Density histogram of the current volume, optionally restricted to the
//! side of the cutting plane that is rendered.
//!
//! Binning runs on a worker thread, see [`HistogramClient`].

mod worker;

pub use worker::{HistogramClient, HistogramRequest, HistogramResponse};

use crate::{
    cutting_plane::PlaneUniform,
    defaults::HISTOGRAM_BINS,
    volumetric::{LinearVolume, Volume},
};

/// Voxel counts over `<0;1>` in equally wide bins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBins {
    counts: Vec<u64>,
    total: u64,
}

impl HistogramBins {
    pub fn empty() -> HistogramBins {
        HistogramBins {
            counts: vec![0; HISTOGRAM_BINS],
            total: 0,
        }
    }

    /// Bin `i` covers `<i/N; (i+1)/N)`, the last one is closed
    pub fn bin_of(value: f32) -> usize {
        let bin = (value.clamp(0.0, 1.0) * HISTOGRAM_BINS as f32).floor() as usize;
        bin.min(HISTOGRAM_BINS - 1)
    }

    pub fn add(&mut self, value: f32) {
        self.counts[Self::bin_of(value)] += 1;
        self.total += 1;
    }

    /// Bins the whole volume, or only voxels included by `plane`
    pub fn from_volume(volume: &LinearVolume, plane: Option<&PlaneUniform>) -> HistogramBins {
        let mut bins = HistogramBins::empty();
        let voxels = volume.voxels();

        match plane {
            None => voxels.iter().for_each(|&v| bins.add(v)),
            Some(plane) => {
                let size = volume.get_size();
                let mut index = 0;
                for z in 0..size.z {
                    for y in 0..size.y {
                        for x in 0..size.x {
                            let p = volume.voxel_position(x, y, z);
                            if plane.includes(&p) {
                                bins.add(voxels[index]);
                            }
                            index += 1;
                        }
                    }
                }
            }
        }

        bins
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of binned voxels
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Nothing was binned, the plot shows "no data"
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Density interval of bin `i`
    pub fn bin_range(i: usize) -> (f32, f32) {
        let width = 1.0 / HISTOGRAM_BINS as f32;
        (i as f32 * width, (i + 1) as f32 * width)
    }

    /// Bar heights in `<0;1>` on a square root scale
    pub fn sqrt_heights(&self) -> Vec<f32> {
        let max = (self.max_count() as f32).sqrt();
        if max == 0.0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&c| (c as f32).sqrt() / max)
            .collect()
    }
}

impl Default for HistogramBins {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn bin_edges() {
        assert_eq!(HistogramBins::bin_of(0.0), 0);
        assert_eq!(HistogramBins::bin_of(0.0099), 0);
        assert_eq!(HistogramBins::bin_of(0.5), 50);
        assert_eq!(HistogramBins::bin_of(1.0), 99);
        assert_eq!(HistogramBins::bin_of(-3.0), 0);
        assert_eq!(HistogramBins::bin_of(f32::NAN), 0);
    }

    #[test]
    fn uniform_volume_single_bin() {
        let vol = uniform_volume(4, 0.5);
        let bins = HistogramBins::from_volume(&vol, None);
        assert_eq!(bins.total(), 64);
        assert_eq!(bins.counts()[50], 64);
        assert_eq!(bins.max_count(), 64);
        assert_eq!(bins.counts().len(), 100);
    }

    #[test]
    fn plane_filters_half() {
        let vol = uniform_volume(4, 0.5);
        let plane = PlaneUniform::new(point![0.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
        let bins = HistogramBins::from_volume(&vol, Some(&plane));
        assert_eq!(bins.total(), 32);

        let flipped = PlaneUniform::new(point![0.0, 0.0, 0.0], vector![-1.0, 0.0, 0.0]);
        let other = HistogramBins::from_volume(&vol, Some(&flipped));
        assert_eq!(other.total(), 32);
    }

    #[test]
    fn no_data() {
        let vol = uniform_volume(4, 0.5);
        let plane = PlaneUniform::new(point![10.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
        let bins = HistogramBins::from_volume(&vol, Some(&plane));
        assert!(bins.is_empty());
        assert!(bins.sqrt_heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn sqrt_scale() {
        let mut bins = HistogramBins::empty();
        for _ in 0..4 {
            bins.add(0.1);
        }
        bins.add(0.9);

        let h = bins.sqrt_heights();
        assert_eq!(h[10], 1.0);
        assert_eq!(h[90], 0.5);
        assert_eq!(h[50], 0.0);
    }

    #[test]
    fn bin_ranges() {
        let (low, high) = HistogramBins::bin_range(99);
        assert!((low - 0.99).abs() < 1e-6);
        assert!((high - 1.0).abs() < 1e-6);
    }
}
