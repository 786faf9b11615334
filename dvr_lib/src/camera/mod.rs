//! # Cameras
//!
//! [`OrbitCamera`] holds the interactive state (angles, radius, drag),
//! [`PerspectiveCamera`] is the per-frame snapshot that generates rays.

mod orbit_camera;
mod perspective_camera;

pub use orbit_camera::OrbitCamera;
pub use perspective_camera::PerspectiveCamera;

use nalgebra::Point3;

use crate::common::Ray;

pub trait Camera {
    fn get_position(&self) -> Point3<f32>;

    /// Ray through a point of the screen.
    /// `pixel_coord` is normalized, `(0, 0)` is the top left corner.
    fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray;
}
