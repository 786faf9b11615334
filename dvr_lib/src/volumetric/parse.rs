//! Decoding of volume files
//!
//! Two layouts are supported:
//! * headerless raw stream of unsigned 16-bit samples, dimensions known upfront ([`raw_parser`])
//! * `.dat` container, three little-endian `u16` dimensions followed by 12-bit samples ([`dat_parser`])
//!
//! Samples are x-fastest in both.

use log::{debug, warn};
use nalgebra::{vector, Vector3};
use nom::{
    multi::count,
    number::complete::{be_u16, le_u16},
    sequence::tuple,
    IResult,
};

use crate::{
    defaults,
    error::{DvrError, Result},
};

use super::LinearVolume;

/// Byte order of samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    Big,
    #[default]
    Little,
}

/// How raw samples are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFormat {
    pub endianness: Endianness,
    /// Sample value mapped to density `1.0`, larger values are clamped
    pub sample_max: u16,
}

impl Default for RawFormat {
    fn default() -> Self {
        Self {
            endianness: Endianness::Little,
            sample_max: u16::MAX,
        }
    }
}

const DAT_HEADER_LEN: usize = 3 * 2;

/// Returns parser of headerless data with given dimensions
pub fn raw_parser(
    size: Vector3<usize>,
    format: RawFormat,
) -> impl FnOnce(&[u8]) -> Result<LinearVolume> {
    move |slice| decode_samples(size, slice, format)
}

/// Parser of the `.dat` container
pub fn dat_parser(slice: &[u8]) -> Result<LinearVolume> {
    let (rest, size) = dat_header(slice)
        .map_err(|_| DvrError::Parse(format!("header needs {DAT_HEADER_LEN} bytes")))?;

    let size = vector![size.0 as usize, size.1 as usize, size.2 as usize];
    debug!("dat header: {size:?}");

    let format = RawFormat {
        endianness: Endianness::Little,
        sample_max: defaults::DAT_SAMPLE_MAX,
    };
    decode_samples(size, rest, format)
}

fn dat_header(s: &[u8]) -> IResult<&[u8], (u16, u16, u16)> {
    tuple((le_u16, le_u16, le_u16))(s)
}

fn samples(s: &[u8], n: usize, endianness: Endianness) -> IResult<&[u8], Vec<u16>> {
    match endianness {
        Endianness::Little => count(le_u16, n)(s),
        Endianness::Big => count(be_u16, n)(s),
    }
}

/// Decode and normalize samples.
/// The whole volume is validated before anything is built.
pub fn decode_samples(
    size: Vector3<usize>,
    slice: &[u8],
    format: RawFormat,
) -> Result<LinearVolume> {
    let invalid = || DvrError::InvalidDimensions {
        width: size.x,
        height: size.y,
        depth: size.z,
    };
    if size.iter().any(|&d| d == 0) || format.sample_max == 0 {
        return Err(invalid());
    }

    let n_of_samples = super::sample_count(size).ok_or_else(invalid)?;
    let expected = n_of_samples.checked_mul(2).ok_or_else(invalid)?;
    if slice.len() < expected {
        return Err(DvrError::SizeMismatch {
            expected,
            actual: slice.len(),
        });
    }
    if slice.len() > expected {
        warn!(
            "Ignoring {} trailing bytes after volume data",
            slice.len() - expected
        );
    }

    let (_rest, raw) = samples(slice, n_of_samples, format.endianness)
        .map_err(|e| DvrError::Parse(e.to_string()))?;

    let max = format.sample_max as f32;
    let data = raw
        .into_iter()
        .map(|s| (s as f32 / max).min(1.0))
        .collect();

    LinearVolume::new(size, data)
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::{test_helpers::le_bytes, volumetric::Volume};

    #[test]
    fn raw_little_endian() {
        let bytes = le_bytes(&[0, u16::MAX, 32768, 0, 0, 0, 0, u16::MAX]);
        let vol = raw_parser(vector![2, 2, 2], RawFormat::default())(&bytes).unwrap();

        assert_eq!(vol.get_data(0, 0, 0), Some(0.0));
        assert_eq!(vol.get_data(1, 0, 0), Some(1.0));
        assert!((vol.get_data(0, 1, 0).unwrap() - 0.5).abs() < 1e-4);
        assert_eq!(vol.get_data(1, 1, 1), Some(1.0));
    }

    #[test]
    fn raw_big_endian() {
        let bytes: Vec<u8> = [0x00, 0xff].repeat(8);
        let format = RawFormat {
            endianness: Endianness::Big,
            sample_max: 255,
        };
        let vol = raw_parser(vector![2, 2, 2], format)(&bytes).unwrap();
        assert!(vol.voxels().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn undersized_data_fails() {
        let bytes = le_bytes(&[1, 2, 3]);
        let res = raw_parser(vector![2, 2, 2], RawFormat::default())(&bytes);
        assert!(matches!(
            res,
            Err(DvrError::SizeMismatch {
                expected: 16,
                actual: 6
            })
        ));
    }

    #[test]
    fn overflowing_dimensions_fail() {
        let side = usize::MAX / 2;
        let res = LinearVolume::from_raw(side, 4, 1, &[0u8; 4], RawFormat::default());
        assert!(matches!(res, Err(DvrError::InvalidDimensions { .. })));

        let res = raw_parser(vector![usize::MAX / 2 + 1, 1, 1], RawFormat::default())(&[0u8; 4]);
        assert!(matches!(res, Err(DvrError::InvalidDimensions { .. })));
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut bytes = le_bytes(&[7; 8]);
        bytes.push(0xAB);
        let vol = raw_parser(vector![2, 2, 2], RawFormat::default())(&bytes).unwrap();
        assert_eq!(vol.voxel_count(), 8);
    }

    #[test]
    fn dat_container() {
        let mut bytes = le_bytes(&[2, 1, 1]);
        bytes.extend(le_bytes(&[4095, 5000]));
        let vol = dat_parser(&bytes).unwrap();

        assert_eq!(vol.get_size(), vector![2, 1, 1]);
        assert_eq!(vol.get_data(0, 0, 0), Some(1.0));
        // Values above 12 bits are clamped
        assert_eq!(vol.get_data(1, 0, 0), Some(1.0));
    }

    #[test]
    fn dat_truncated_header() {
        assert!(matches!(dat_parser(&[1, 0, 1]), Err(DvrError::Parse(_))));
    }

    #[test]
    fn dat_zero_dimension() {
        let bytes = le_bytes(&[0, 4, 4]);
        assert!(matches!(
            dat_parser(&bytes),
            Err(DvrError::InvalidDimensions { .. })
        ));
    }
}
