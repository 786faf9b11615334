use crate::color::RGB;

/// One editable point of the transfer function.
///
/// `density` is the x axis of the editor, `opacity` the y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct IsoControlPoint {
    pub id: String,
    pub density: f32,
    pub opacity: f32,
    pub color: RGB,
}

impl IsoControlPoint {
    /// Density and opacity get clamped to `<0;1>`
    pub fn new(id: impl Into<String>, density: f32, opacity: f32, color: RGB) -> Self {
        Self {
            id: id.into(),
            density: clamp_unit(density),
            opacity: clamp_unit(opacity),
            color: crate::color::saturate(color),
        }
    }
}

/// Clamp into `<0;1>`, NaN becomes zero
pub(crate) fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
