//! Volume store
//!
//! Decoded voxel data ([`LinearVolume`]), sampling ([`Volume`]),
//! file decoding ([`parse`]) and the session-owned [`VolumeStore`].

mod data_source;
mod linear_volume;
pub mod parse;
mod store;
mod volume;

pub use data_source::DataSource;
pub use linear_volume::LinearVolume;
pub use parse::{dat_parser, raw_parser, Endianness, RawFormat};
pub use store::VolumeStore;
pub use volume::Volume;

use std::path::Path;

use nalgebra::Vector3;

use crate::error::Result;

/// Number of voxels, `None` when it does not fit in `usize`
pub(crate) fn sample_count(size: Vector3<usize>) -> Option<usize> {
    size.x.checked_mul(size.y)?.checked_mul(size.z)
}

/// Read and decode volume from file
///
/// # Params
/// * `path` - file to read, memory mapped
/// * `parser` - decodes the bytes, see [`dat_parser`] and [`raw_parser`]
pub fn from_file<P, PF>(path: P, parser: PF) -> Result<LinearVolume>
where
    P: AsRef<Path>,
    PF: FnOnce(&[u8]) -> Result<LinearVolume>,
{
    let ds = DataSource::from_file(path)?;
    parser(ds.get_slice())
}
