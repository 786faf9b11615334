use log::warn;
use nalgebra::{Point3, Vector3};

use crate::{
    color::{self, RGB},
    defaults::{
        BACKGROUND_COLOR, FOREGROUND_COLOR, ISO_RANGE, MIN_ISO_RANGE, MIN_STEP_SIZE, RENDER_MODE,
        STEP_SIZE,
    },
    transfer_function::{IsoBand, IsoFalloff},
};

use super::{Light, RenderMode, RenderModeKind, RenderOptions};

/// User editable parameters of the raycaster
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub background: RGB,
    pub foreground: RGB,
    pub mode: RenderModeKind,
    pub(crate) step_size: f32,
    pub(crate) iso_range: f32,
    pub iso_falloff: IsoFalloff,
}

impl RenderSettings {
    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    /// Clamped up to the minimum step. Non-finite values are ignored.
    pub fn set_step_size(&mut self, step_size: f32) -> bool {
        if !step_size.is_finite() {
            warn!("Ignoring step size {step_size}");
            return false;
        }
        self.step_size = step_size.max(MIN_STEP_SIZE);
        true
    }

    pub fn iso_range(&self) -> f32 {
        self.iso_range
    }

    /// Clamped into `<MIN_ISO_RANGE;1>`. Non-finite values are ignored.
    pub fn set_iso_range(&mut self, iso_range: f32) -> bool {
        if !iso_range.is_finite() {
            warn!("Ignoring iso range {iso_range}");
            return false;
        }
        self.iso_range = iso_range.clamp(MIN_ISO_RANGE, 1.0);
        true
    }

    pub fn band(&self) -> IsoBand {
        IsoBand::new(self.iso_range, self.iso_falloff)
    }

    /// Current mode with its parameters
    pub fn mode(&self, options: &RenderOptions) -> RenderMode {
        let band = self.band();
        match self.mode {
            RenderModeKind::MaximumIntensity => RenderMode::MaximumIntensity {
                foreground: self.foreground,
            },
            RenderModeKind::MaximumIntensityTf => RenderMode::MaximumIntensityTf { band },
            RenderModeKind::Accumulative => RenderMode::Accumulative {
                band,
                early_termination: options.early_ray_termination,
            },
            RenderModeKind::AccumulativeAlphaBlending => {
                RenderMode::AccumulativeAlphaBlending { band }
            }
            RenderModeKind::FirstHitPositions => RenderMode::FirstHitPositions { band },
            RenderModeKind::FirstHitNormals => RenderMode::FirstHitNormals { band },
            RenderModeKind::FirstHitSolidColor => RenderMode::FirstHitSolidColor { band },
            RenderModeKind::PhongShaded => RenderMode::PhongShaded {
                band,
                light: Light::default(),
            },
        }
    }

    /// Apply the render related fields, returns true if anything changed
    pub fn apply(&mut self, update: &SettingsUpdate) -> bool {
        let before = self.clone();

        if let Some(c) = update.background_color {
            self.background = color::saturate(c);
        }
        if let Some(c) = update.foreground_color {
            self.foreground = color::saturate(c);
        }
        if let Some(mode) = update.render_mode {
            self.mode = mode;
        }
        if let Some(falloff) = update.iso_falloff_mode {
            self.iso_falloff = falloff;
        }
        if let Some(step) = update.step_size {
            self.set_step_size(step);
        }

        *self != before
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: RGB::from(BACKGROUND_COLOR),
            foreground: RGB::from(FOREGROUND_COLOR),
            mode: RENDER_MODE,
            step_size: STEP_SIZE,
            iso_range: ISO_RANGE,
            iso_falloff: IsoFalloff::default(),
        }
    }
}

/// Partial settings, only present fields are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    pub background_color: Option<RGB>,
    pub foreground_color: Option<RGB>,
    pub render_mode: Option<RenderModeKind>,
    pub cutting_plane_enabled: Option<bool>,
    pub cutting_plane_flipped: Option<bool>,
    pub cutting_plane_position: Option<Point3<f32>>,
    /// XYZ Euler angles, radians
    pub cutting_plane_rotation: Option<Vector3<f32>>,
    pub iso_falloff_mode: Option<IsoFalloff>,
    pub step_size: Option<f32>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == SettingsUpdate::default()
    }

    /// Touches the cutting plane
    pub fn has_plane_fields(&self) -> bool {
        self.cutting_plane_enabled.is_some()
            || self.cutting_plane_flipped.is_some()
            || self.cutting_plane_position.is_some()
            || self.cutting_plane_rotation.is_some()
    }
}
