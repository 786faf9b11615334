use nalgebra::{Point3, Vector3};

use crate::common::{BoundBox, Ray, ViewportBox};

use super::Camera;

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    position: Point3<f32>,
    direction: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    /// Vertical field of view, in degrees
    fov_y: f32,
    aspect: f32,
    // ray
    dir_00: Vector3<f32>, // Vector from camera point to the top left corner of the image plane
    du: Vector3<f32>,     // Image plane width, left to right
    dv: Vector3<f32>,     // Image plane height, top to bottom
}

impl PerspectiveCamera {
    /// Camera at `position` looking at `target`.
    /// Falls back to `+Y` as up vector when `up` is parallel to the view direction.
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y: f32,
        aspect: f32,
    ) -> PerspectiveCamera {
        let direction = (target - position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -Vector3::z());

        let right = direction
            .cross(&up)
            .try_normalize(1e-6)
            .or_else(|| direction.cross(&Vector3::y()).try_normalize(1e-6))
            .unwrap_or_else(Vector3::x);
        let up = right.cross(&direction);

        let img_height = 2.0 * f32::tan(f32::to_radians(0.5 * fov_y));
        let img_width = img_height * aspect;

        let du = right * img_width;
        let dv = -up * img_height;
        let dir_00 = direction - 0.5 * du - 0.5 * dv;

        PerspectiveCamera {
            position,
            direction,
            right,
            up,
            fov_y,
            aspect,
            dir_00,
            du,
            dv,
        }
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Screen region covered by the box, normalized.
    /// The whole screen if any corner lies behind the camera.
    pub fn project_box(&self, bound_box: BoundBox) -> ViewportBox {
        let img_width = self.du.norm();
        let img_height = self.dv.norm();

        let mut viewport = ViewportBox::new();
        for corner in bound_box {
            let v = corner - self.position;
            let depth = v.dot(&self.direction);
            if depth <= f32::EPSILON {
                return ViewportBox::full();
            }

            let x = v.dot(&self.right) / depth / img_width + 0.5;
            let y = 0.5 - v.dot(&self.up) / depth / img_height;
            viewport.add_point(x, y);
        }
        viewport
    }
}

impl Camera for PerspectiveCamera {
    fn get_position(&self) -> Point3<f32> {
        self.position
    }

    fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray {
        let dir = self.dir_00 + self.du * pixel_coord.0 + self.dv * pixel_coord.1;
        Ray::new(self.position, dir)
    }
}
