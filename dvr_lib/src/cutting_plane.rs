//! # Cutting plane
//!
//! Excludes one half-space of the volume from rendering and from the histogram.
//!
//! Position and orientation come from an interactive gizmo. The orientation is
//! a set of XYZ Euler angles, the plane normal is the orientation applied to `+Z`.
//! Flipping negates the normal, the Euler angles are never touched.

use nalgebra::{Point3, Rotation3, Unit, Vector3};

/// Gizmo interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneMode {
    #[default]
    None,
    Translate,
    Rotate,
}

impl PlaneMode {
    /// `None -> Translate -> Rotate -> None`
    pub fn next(self) -> PlaneMode {
        match self {
            PlaneMode::None => PlaneMode::Translate,
            PlaneMode::Translate => PlaneMode::Rotate,
            PlaneMode::Rotate => PlaneMode::None,
        }
    }

    /// Gizmo takes pointer input in this mode
    pub fn is_active(self) -> bool {
        self != PlaneMode::None
    }
}

/// Plane as uploaded to the raycaster and the histogram worker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneUniform {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl PlaneUniform {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> PlaneUniform {
        PlaneUniform { position, normal }
    }

    pub fn signed_distance(&self, p: &Point3<f32>) -> f32 {
        (p - self.position).dot(&self.normal)
    }

    /// Points on the plane itself are excluded
    pub fn includes(&self, p: &Point3<f32>) -> bool {
        self.signed_distance(p) > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CuttingPlane {
    pub position: Point3<f32>,
    /// XYZ Euler angles, radians
    pub orientation: Vector3<f32>,
    pub enabled: bool,
    pub flipped: bool,
    mode: PlaneMode,
    // restored when the plane gets enabled again
    last_mode: PlaneMode,
}

impl CuttingPlane {
    pub fn new() -> CuttingPlane {
        CuttingPlane {
            position: Point3::origin(),
            orientation: Vector3::zeros(),
            enabled: false,
            flipped: false,
            mode: PlaneMode::None,
            last_mode: PlaneMode::Translate,
        }
    }

    pub fn mode(&self) -> PlaneMode {
        self.mode
    }

    /// Rotation of the gizmo, X applied last
    pub fn rotation(&self) -> Rotation3<f32> {
        let o = self.orientation;
        Rotation3::from_axis_angle(&Vector3::x_axis(), o.x)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), o.y)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), o.z)
    }

    /// World normal, flip applied
    pub fn normal(&self) -> Unit<Vector3<f32>> {
        let n = self.rotation() * Vector3::z_axis();
        if self.flipped {
            Unit::new_unchecked(-n.into_inner())
        } else {
            n
        }
    }

    /// `None` while the plane is disabled
    pub fn uniform(&self) -> Option<PlaneUniform> {
        self.enabled
            .then(|| PlaneUniform::new(self.position, self.normal().into_inner()))
    }

    pub fn set_transform(&mut self, position: Point3<f32>, orientation: Vector3<f32>) {
        self.position = position;
        self.orientation = orientation;
    }

    /// Enabling restores the last gizmo mode, disabling hides the gizmo
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.mode = self.last_mode;
        } else {
            self.mode = PlaneMode::None;
        }
    }

    pub fn set_mode(&mut self, mode: PlaneMode) {
        self.mode = mode;
        if mode.is_active() {
            self.last_mode = mode;
        }
    }

    pub fn cycle_mode(&mut self) -> PlaneMode {
        self.set_mode(self.mode.next());
        self.mode
    }
}

impl Default for CuttingPlane {
    fn default() -> Self {
        Self::new()
    }
}
