use std::sync::Arc;

use log::info;

use crate::error::Result;

use super::{LinearVolume, Volume};

/// Owns the current volume.
///
/// Volumes are replaced wholesale. A load that fails leaves the previous volume in place.
#[derive(Default)]
pub struct VolumeStore {
    current: Option<Arc<LinearVolume>>,
    generation: u64,
}

impl VolumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `load` and install its result.
    /// Nothing changes on error.
    pub fn load_with<F>(&mut self, load: F) -> Result<Arc<LinearVolume>>
    where
        F: FnOnce() -> Result<LinearVolume>,
    {
        let volume = load()?;
        Ok(self.install(volume))
    }

    pub fn install(&mut self, volume: LinearVolume) -> Arc<LinearVolume> {
        let volume = Arc::new(volume);
        self.generation += 1;
        info!(
            "Installed volume #{} of size {:?}",
            self.generation,
            volume.get_size()
        );
        self.current = Some(Arc::clone(&volume));
        volume
    }

    pub fn current(&self) -> Option<&Arc<LinearVolume>> {
        self.current.as_ref()
    }

    /// Counts installed volumes
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;
    use crate::error::DvrError;

    #[test]
    fn failed_load_keeps_previous() {
        let mut store = VolumeStore::new();
        assert!(store.current().is_none());

        store
            .load_with(|| LinearVolume::new(vector![1, 1, 2], vec![0.0, 1.0]))
            .unwrap();
        assert_eq!(store.generation(), 1);

        let res = store.load_with(|| {
            Err(DvrError::SizeMismatch {
                expected: 2,
                actual: 0,
            })
        });
        assert!(res.is_err());
        assert_eq!(store.generation(), 1);
        assert_eq!(store.current().unwrap().get_size(), vector![1, 1, 2]);
    }
}
