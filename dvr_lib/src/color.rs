//! Colour helpers
//!
//! Colours are linear floats, components in `<0;1>`.

use nalgebra::{vector, Vector3, Vector4};

use crate::error::{DvrError, Result};

pub type RGB = Vector3<f32>;
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32) -> RGB {
    vector![r, g, b]
}

pub fn black() -> RGB {
    vector![0.0, 0.0, 0.0]
}

pub fn white() -> RGB {
    vector![1.0, 1.0, 1.0]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

/// Linear interpolation between `a` and `b`, `t = 0` gives `a`
pub fn mix(a: RGB, b: RGB, t: f32) -> RGB {
    a * (1.0 - t) + b * t
}

/// Clamp every component into `<0;1>`
pub fn saturate(c: RGB) -> RGB {
    c.map(|v| v.clamp(0.0, 1.0))
}

/// Parse `#rrggbb` (leading `#` optional, case insensitive)
pub fn from_hex(hex: &str) -> Result<RGB> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(DvrError::InvalidColor(hex.to_owned()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| DvrError::InvalidColor(hex.to_owned()))
    };

    Ok(vector![channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Format as lowercase `#rrggbb`
pub fn to_hex(color: RGB) -> String {
    let [r, g, b] = to_bytes(color);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Quantize to 8 bits per channel
pub fn to_bytes(color: RGB) -> [u8; 3] {
    let c = saturate(color);
    [
        (c.x * 255.0).round() as u8,
        (c.y * 255.0).round() as u8,
        (c.z * 255.0).round() as u8,
    ]
}
