use byteorder::{ByteOrder, LittleEndian};
use nalgebra::Vector3;

/// Output container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFormat {
    /// Three little-endian `u16` dimensions, then samples
    Dat,
    /// Samples only, dimensions are passed to the reader separately
    Raw,
}

pub const DAT_HEADER_LEN: usize = 3 * 2;

pub fn generate_header(format: HeaderFormat, dims: Vector3<usize>) -> Result<Vec<u8>, String> {
    match format {
        HeaderFormat::Dat => generate_dat_header(dims),
        HeaderFormat::Raw => Ok(Vec::new()),
    }
}

/// `.dat` header
/// little-endian, total length 6B
/// 1. resolution -- 3x 16bit ints (x,y,z)
/// 2. data -- x*y*z 16bit values, x fastest
fn generate_dat_header(dims: Vector3<usize>) -> Result<Vec<u8>, String> {
    let mut vec = vec![0; DAT_HEADER_LEN];

    for (i, &dim) in dims.iter().enumerate() {
        let dim = u16::try_from(dim).map_err(|_| format!("dimension {dim} does not fit in u16"))?;
        LittleEndian::write_u16(&mut vec[2 * i..2 * i + 2], dim);
    }

    Ok(vec)
}
