pub use criterion::{black_box, Criterion};
pub use dvr_lib::{
    cutting_plane::CuttingPlane,
    render::{RenderModeKind, RenderOptions, RenderSettings, Renderer, Uniforms},
    transfer_function::TransferFunction,
    volumetric::{LinearVolume, Volume},
    OrbitCamera, PerspectiveCamera,
};
pub use nalgebra::{point, vector};

pub const WIDTH: usize = 256;
pub const HEIGHT: usize = 256;
pub const RESOLUTION: (usize, usize) = (WIDTH, HEIGHT);

/// Side of the synthetic benchmark volume
pub const VOLUME_SIDE: usize = 64;

/// Ball with density falling off from the center, empty corners
pub fn get_volume() -> LinearVolume {
    let n = VOLUME_SIDE;
    let center = (n as f32 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let d = vector![x as f32 - center, y as f32 - center, z as f32 - center].norm();
                data.push((1.0 - d / center).max(0.0));
            }
        }
    }
    LinearVolume::new(vector![n, n, n], data).unwrap()
}

pub fn get_renderer(mode: RenderModeKind, early_ray_termination: bool) -> Renderer<LinearVolume> {
    let render_options = RenderOptions::builder()
        .resolution(RESOLUTION)
        .early_ray_termination(early_ray_termination)
        .build_unchecked();

    let volume = std::sync::Arc::new(get_volume());
    let mut renderer = Renderer::new(volume, render_options);

    let settings = RenderSettings {
        mode,
        ..Default::default()
    };
    let tf = TransferFunction::default();
    renderer.set_uniforms(Uniforms::new(
        &settings,
        &render_options,
        tf.state(),
        &CuttingPlane::default(),
    ));
    renderer
}

pub fn get_camera(renderer: &Renderer<LinearVolume>) -> PerspectiveCamera {
    let orbit = OrbitCamera::for_extent(renderer.volume().get_extent());
    orbit.perspective(renderer.render_options().aspect())
}
