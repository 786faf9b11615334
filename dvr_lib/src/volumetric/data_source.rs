use std::{fs::File, path::Path};

use log::debug;
use memmap::{Mmap, MmapOptions};

use crate::error::{DvrError, Result};

/// Raw bytes of a volume, owned or memory mapped
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    pub fn from_file<P>(path: P) -> Result<DataSource>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(DvrError::NotAFile(path.display().to_string()));
        }

        let file = File::open(path)?;

        // Empty files cannot be mapped
        if file.metadata()?.len() == 0 {
            return Ok(DataSource::Vec(Vec::new()));
        }

        // Safety: the map is read only and the file is not modified while mapped
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        debug!("Mapped {} ({} B)", path.display(), mmap.len());

        Ok(DataSource::Mmap(mmap))
    }
}
