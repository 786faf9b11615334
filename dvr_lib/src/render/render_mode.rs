use crate::{
    color::RGB,
    defaults::{AMBIENT, DIFFUSE, SHININESS, SPECULAR},
    transfer_function::IsoBand,
};

/// Render mode as picked in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderModeKind {
    MaximumIntensity,
    MaximumIntensityTf,
    Accumulative,
    AccumulativeAlphaBlending,
    FirstHitPositions,
    FirstHitNormals,
    FirstHitSolidColor,
    #[default]
    PhongShaded,
}

impl RenderModeKind {
    /// In UI order
    pub const ALL: [RenderModeKind; 8] = [
        RenderModeKind::MaximumIntensity,
        RenderModeKind::MaximumIntensityTf,
        RenderModeKind::Accumulative,
        RenderModeKind::AccumulativeAlphaBlending,
        RenderModeKind::FirstHitPositions,
        RenderModeKind::FirstHitNormals,
        RenderModeKind::FirstHitSolidColor,
        RenderModeKind::PhongShaded,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<RenderModeKind> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderModeKind::MaximumIntensity => "Maximum Intensity Projection",
            RenderModeKind::MaximumIntensityTf => "Maximum Intensity Projection (TF)",
            RenderModeKind::Accumulative => "Accumulative (TF)",
            RenderModeKind::AccumulativeAlphaBlending => "Accumulative (Experimental) (TF)",
            RenderModeKind::FirstHitPositions => "First-Hit Positions (TF*)",
            RenderModeKind::FirstHitNormals => "First-Hit Normals (TF*)",
            RenderModeKind::FirstHitSolidColor => "First-Hit Solid Color (TF*)",
            RenderModeKind::PhongShaded => "Phong Shaded (TF*)",
        }
    }
}

/// Phong coefficients, light sits at the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            ambient: AMBIENT,
            diffuse: DIFFUSE,
            specular: SPECULAR,
            shininess: SHININESS,
        }
    }
}

/// Render mode with the parameters it reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderMode {
    MaximumIntensity { foreground: RGB },
    MaximumIntensityTf { band: IsoBand },
    Accumulative { band: IsoBand, early_termination: bool },
    AccumulativeAlphaBlending { band: IsoBand },
    FirstHitPositions { band: IsoBand },
    FirstHitNormals { band: IsoBand },
    FirstHitSolidColor { band: IsoBand },
    PhongShaded { band: IsoBand, light: Light },
}

impl RenderMode {
    pub fn kind(&self) -> RenderModeKind {
        match self {
            RenderMode::MaximumIntensity { .. } => RenderModeKind::MaximumIntensity,
            RenderMode::MaximumIntensityTf { .. } => RenderModeKind::MaximumIntensityTf,
            RenderMode::Accumulative { .. } => RenderModeKind::Accumulative,
            RenderMode::AccumulativeAlphaBlending { .. } => {
                RenderModeKind::AccumulativeAlphaBlending
            }
            RenderMode::FirstHitPositions { .. } => RenderModeKind::FirstHitPositions,
            RenderMode::FirstHitNormals { .. } => RenderModeKind::FirstHitNormals,
            RenderMode::FirstHitSolidColor { .. } => RenderModeKind::FirstHitSolidColor,
            RenderMode::PhongShaded { .. } => RenderModeKind::PhongShaded,
        }
    }
}
