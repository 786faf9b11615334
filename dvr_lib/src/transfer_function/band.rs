/// Shape of the band around a control point density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IsoFalloff {
    /// Weight falls linearly from 1 at the point to 0 at the band edge
    #[default]
    Linear,
    /// Full weight inside the band, nothing outside
    Binary,
}

impl IsoFalloff {
    /// Index used by the settings form: linear = 0, binary = 1
    pub fn from_index(index: u8) -> Option<IsoFalloff> {
        match index {
            0 => Some(IsoFalloff::Linear),
            1 => Some(IsoFalloff::Binary),
            _ => None,
        }
    }
}

/// Half-width and falloff of the band each control point covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoBand {
    pub range: f32,
    pub falloff: IsoFalloff,
}

impl IsoBand {
    pub fn new(range: f32, falloff: IsoFalloff) -> Self {
        Self { range, falloff }
    }

    /// Weight of a sample `distance` away from the point density, in `<0;1>`
    pub fn weight(&self, distance: f32) -> f32 {
        let distance = distance.abs();
        match self.falloff {
            IsoFalloff::Binary => {
                if distance <= self.range {
                    1.0
                } else {
                    0.0
                }
            }
            IsoFalloff::Linear if self.range > 0.0 => f32::max(0.0, 1.0 - distance / self.range),
            IsoFalloff::Linear => {
                if distance == 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}
