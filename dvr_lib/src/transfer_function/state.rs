use nalgebra::vector;

use crate::{
    color::{self, RGB, RGBA},
    defaults::{SENTINEL_DENSITY, TF_SLOTS},
};

use super::{IsoBand, IsoControlPoint};

/// One uniform slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfSlot {
    pub density: f32,
    pub opacity: f32,
    pub color: RGB,
}

impl TfSlot {
    /// Padding slot, never matches anything
    pub fn sentinel() -> Self {
        Self {
            density: SENTINEL_DENSITY,
            opacity: 0.0,
            color: color::black(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.density >= 0.0
    }
}

impl From<&IsoControlPoint> for TfSlot {
    fn from(point: &IsoControlPoint) -> Self {
        Self {
            density: point.density,
            opacity: point.opacity,
            color: point.color,
        }
    }
}

/// Control point matched by a first-hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoHit {
    pub slot: usize,
    pub weight: f32,
    pub color: RGB,
}

/// Fixed-size serialization of the transfer function.
///
/// Slots are sorted by density, ascending. Unused slots are sentinels
/// (density `-1`, opacity `0`, black) and always come last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferFunctionState {
    slots: [TfSlot; TF_SLOTS],
}

impl TransferFunctionState {
    /// No points, renders nothing
    pub fn transparent() -> Self {
        Self {
            slots: [TfSlot::sentinel(); TF_SLOTS],
        }
    }

    /// Sort by density and keep the lowest `TF_SLOTS` points
    pub fn from_points(points: &[IsoControlPoint]) -> Self {
        let mut sorted: Vec<&IsoControlPoint> = points.iter().collect();
        sorted.sort_by(|a, b| a.density.total_cmp(&b.density));

        let mut state = Self::transparent();
        for (slot, point) in state.slots.iter_mut().zip(sorted) {
            *slot = point.into();
        }
        state
    }

    pub fn slots(&self) -> &[TfSlot; TF_SLOTS] {
        &self.slots
    }

    pub fn active_slots(&self) -> impl Iterator<Item = (usize, &TfSlot)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    pub fn n_of_active(&self) -> usize {
        self.active_slots().count()
    }

    /// `uIsoValues`-style array
    pub fn densities(&self) -> [f32; TF_SLOTS] {
        self.slots.map(|s| s.density)
    }

    pub fn opacities(&self) -> [f32; TF_SLOTS] {
        self.slots.map(|s| s.opacity)
    }

    pub fn colors(&self) -> [RGB; TF_SLOTS] {
        self.slots.map(|s| s.color)
    }

    /// Colour and opacity of a sample.
    ///
    /// Opacity is the sum of weighted slot opacities, clamped to 1.
    /// Colour is the opacity-weighted average of slot colours.
    pub fn lookup(&self, density: f32, band: IsoBand) -> RGBA {
        let mut weighted_color = color::black();
        let mut total = 0.0;

        for (_, slot) in self.active_slots() {
            let w = band.weight(density - slot.density) * slot.opacity;
            if w > 0.0 {
                weighted_color += slot.color * w;
                total += w;
            }
        }

        if total <= 0.0 {
            return color::zero();
        }

        let rgb = weighted_color / total;
        vector![rgb.x, rgb.y, rgb.z, f32::min(total, 1.0)]
    }

    /// Slot whose band contains `density` with the largest weight.
    /// Ties go to the lower density slot.
    pub fn iso_match(&self, density: f32, band: IsoBand) -> Option<IsoHit> {
        let mut best: Option<IsoHit> = None;

        for (i, slot) in self.active_slots() {
            let weight = band.weight(density - slot.density);
            if weight <= 0.0 {
                continue;
            }
            let better = match best {
                Some(b) => weight > b.weight,
                None => true,
            };
            if better {
                best = Some(IsoHit {
                    slot: i,
                    weight,
                    color: slot.color,
                });
            }
        }

        best
    }
}

impl Default for TransferFunctionState {
    fn default() -> Self {
        Self::transparent()
    }
}
