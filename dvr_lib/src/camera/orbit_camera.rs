use std::f32::consts::FRAC_PI_2;

use nalgebra::{point, vector, Point3, Vector3};

use crate::defaults::{AUTO_ROTATE_STEP, DRAG_SPEED, FOV_Y, FRAMING_FACTOR, ZOOM_SPEED};

use super::PerspectiveCamera;

/// Camera orbiting the origin on a sphere.
///
/// `phi` turns around the Z axis, `theta` is the elevation, clamped to the poles.
/// Radius stays within half and double of the initial framing radius.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    phi: f32,
    theta: f32,
    radius: f32,
    min_radius: f32,
    max_radius: f32,
    // last pointer position while dragging
    drag: Option<(f32, f32)>,
    auto_rotate: bool,
    controls_enabled: bool,
}

impl OrbitCamera {
    pub fn new(radius: f32) -> OrbitCamera {
        OrbitCamera {
            phi: 0.0,
            theta: 0.0,
            radius,
            min_radius: radius / 2.0,
            max_radius: radius * 2.0,
            drag: None,
            auto_rotate: false,
            controls_enabled: true,
        }
    }

    /// Frames a volume of the given extent
    pub fn for_extent(extent: Vector3<f32>) -> OrbitCamera {
        OrbitCamera::new(FRAMING_FACTOR * extent.max())
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        point![
            -self.radius * cos_t * sin_p,
            -self.radius * cos_t * cos_p,
            self.radius * sin_t
        ]
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn radius_limits(&self) -> (f32, f32) {
        (self.min_radius, self.max_radius)
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.phi, self.theta)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Snapshot for rendering, looking at the origin with `-Z` up
    pub fn perspective(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(
            self.position(),
            Point3::origin(),
            vector![0.0, 0.0, -1.0],
            FOV_Y,
            aspect,
        )
    }

    /// Offsets in drag pixels and wheel units
    pub fn update(&mut self, dx: f32, dy: f32, dz: f32) {
        self.phi += dx / DRAG_SPEED;
        self.theta += dy / DRAG_SPEED;
        self.radius += dz / ZOOM_SPEED;

        self.theta = self.theta.clamp(-FRAC_PI_2, FRAC_PI_2);
        self.radius = self.radius.clamp(self.min_radius, self.max_radius);
    }

    /// Returns true if a drag started
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if !self.controls_enabled {
            return false;
        }
        self.drag = Some((x, y));
        true
    }

    /// Returns true if the camera moved
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        if !self.controls_enabled {
            return false;
        }
        match self.drag {
            Some((last_x, last_y)) => {
                self.drag = Some((x, y));
                self.update(last_x - x, last_y - y, 0.0);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// `wheel_delta` is positive when scrolling up (zooming in)
    pub fn wheel(&mut self, wheel_delta: f32) -> bool {
        if !self.controls_enabled {
            return false;
        }
        self.update(0.0, 0.0, -wheel_delta);
        true
    }

    /// Disabling cancels a drag in progress
    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
        if !enabled {
            self.drag = None;
        }
    }

    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.auto_rotate = auto_rotate;
    }

    /// Per frame step, returns true if the camera moved
    pub fn tick(&mut self) -> bool {
        if self.auto_rotate && !self.is_dragging() {
            self.update(AUTO_ROTATE_STEP, 0.0, 0.0);
            true
        } else {
            false
        }
    }
}
