//! # Default values
//!
//! Used as initial values and as limits.

use crate::render::RenderModeKind;

// Render resolution
pub const RENDER_WIDTH: usize = 640;
pub const RENDER_HEIGHT: usize = 480;

// Raymarching
pub const STEP_SIZE: f32 = 1.0;
/// Smaller step sizes are clamped up to this value
pub const MIN_STEP_SIZE: f32 = 0.01;
/// Max densities below this are treated as "no sample" in plain MIP
pub const MIP_THRESHOLD: f32 = 1e-3;
/// Accumulated opacity at which rays stop
pub const ERT_OPACITY: f32 = 0.99;

pub const RENDER_MODE: RenderModeKind = RenderModeKind::PhongShaded;

// Colors
pub const BACKGROUND_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const FOREGROUND_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Transfer function
pub const ISO_RANGE: f32 = 0.05;
/// Smaller iso ranges are clamped up to this value
pub const MIN_ISO_RANGE: f32 = 1e-3;
pub const MAX_CONTROL_POINTS: usize = 5;
pub const MIN_CONTROL_POINTS: usize = 1;
/// Number of control point slots passed to the raycaster
pub const TF_SLOTS: usize = 4;
/// Density of unused slots
pub const SENTINEL_DENSITY: f32 = -1.0;

/// Initial control points: (density, opacity, color)
pub const CONTROL_POINTS: [(f32, f32, &str); 3] = [
    (0.1, 0.5, "#ff8246"),
    (0.3, 1.0, "#ffffff"),
    (0.48, 0.5, "#0000ff"),
];

/// Where new control points appear
pub const NEW_POINT_DENSITY: f32 = 0.5;
pub const NEW_POINT_OPACITY: f32 = 0.5;
/// Colours handed out to new control points, in rotation
pub const NEW_POINT_COLORS: [&str; 8] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3", "#54a0ff", "#5f27cd",
];

// Histogram
pub const HISTOGRAM_BINS: usize = 100;

// Camera
/// Vertical field of view, in degrees
pub const FOV_Y: f32 = 75.0;
/// Initial orbit radius relative to the largest volume dimension
pub const FRAMING_FACTOR: f32 = 1.1;
/// Pixels of drag per radian
pub const DRAG_SPEED: f32 = 100.0;
/// Wheel units per world unit of zoom
pub const ZOOM_SPEED: f32 = 10.0;
/// Auto-rotate step, in drag pixels per frame
pub const AUTO_ROTATE_STEP: f32 = 0.5;

// Phong
pub const AMBIENT: f32 = 0.2;
pub const DIFFUSE: f32 = 0.7;
pub const SPECULAR: f32 = 0.3;
pub const SHININESS: f32 = 32.0;

/// Divisor of `.dat` samples, data uses 12 bits
pub const DAT_SAMPLE_MAX: u16 = 4095;
