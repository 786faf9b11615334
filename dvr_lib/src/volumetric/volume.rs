use nalgebra::{point, vector, Point3, Vector3};

use crate::common::{BoundBox, Ray};

/// Scalar volume, samples normalized to `<0;1>`.
///
/// The volume is centered on the world origin, one voxel is one world unit.
/// Samples are addressed either by integer voxel coordinates ([`Volume::get_data`])
/// or by texture coordinates in `<0;1>^3` ([`Volume::sample_at`]).
pub trait Volume {
    /// Data dimensions, in voxels
    fn get_size(&self) -> Vector3<usize>;

    /// Voxel value, `None` outside of the volume
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32>;

    /// Trilinear interpolation, clamped to the edge voxels.
    /// `pos` in texture coordinates.
    fn sample_at(&self, pos: Point3<f32>) -> f32;

    /// Size of the bounding box in world units
    fn get_extent(&self) -> Vector3<f32> {
        self.get_size().map(|v| v as f32)
    }

    fn get_bound_box(&self) -> BoundBox {
        BoundBox::centered(self.get_extent())
    }

    /// Largest dimension, used to frame the camera
    fn get_max(&self) -> f32 {
        self.get_extent().max()
    }

    fn voxel_count(&self) -> usize {
        let size = self.get_size();
        size.x * size.y * size.z
    }

    /// World position of the center of voxel `(x, y, z)`
    fn voxel_position(&self, x: usize, y: usize, z: usize) -> Point3<f32> {
        let half = self.get_extent() * 0.5;
        point![
            x as f32 + 0.5 - half.x,
            y as f32 + 0.5 - half.y,
            z as f32 + 0.5 - half.z
        ]
    }

    /// World coordinates to texture coordinates
    fn world_to_texture(&self, pos: Point3<f32>) -> Point3<f32> {
        let extent = self.get_extent();
        let t = pos.coords.component_div(&extent) + vector![0.5, 0.5, 0.5];
        Point3::from(t)
    }

    /// Central differences, one voxel apart.
    /// Result is in density per voxel, pointing towards higher density.
    fn gradient_at(&self, pos: Point3<f32>) -> Vector3<f32> {
        let size = self.get_size().map(|v| v as f32);
        let dx = vector![1.0 / size.x, 0.0, 0.0];
        let dy = vector![0.0, 1.0 / size.y, 0.0];
        let dz = vector![0.0, 0.0, 1.0 / size.z];

        vector![
            self.sample_at(pos + dx) - self.sample_at(pos - dx),
            self.sample_at(pos + dy) - self.sample_at(pos - dy),
            self.sample_at(pos + dz) - self.sample_at(pos - dz)
        ] * 0.5
    }

    fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        self.get_bound_box().intersect(ray)
    }
}
