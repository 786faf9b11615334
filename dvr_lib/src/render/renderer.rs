use std::sync::Arc;

use log::trace;

use crate::{
    camera::{Camera, PerspectiveCamera},
    color,
    error::{DvrError, Result},
    volumetric::Volume,
};

use super::{RenderOptions, Raycaster, Uniforms};

/// Draw call: runs the raycaster for every pixel of an RGB8 framebuffer
pub struct Renderer<V>
where
    V: Volume,
{
    raycaster: Raycaster<V>,
    render_options: RenderOptions,
}

impl<V> Renderer<V>
where
    V: Volume,
{
    pub fn new(volume: Arc<V>, render_options: RenderOptions) -> Renderer<V> {
        Renderer {
            raycaster: Raycaster::new(volume, Uniforms::default()),
            render_options,
        }
    }

    pub fn volume(&self) -> &Arc<V> {
        self.raycaster.volume()
    }

    pub fn uniforms(&self) -> &Uniforms {
        self.raycaster.uniforms()
    }

    pub fn set_uniforms(&mut self, uniforms: Uniforms) {
        self.raycaster.set_uniforms(uniforms);
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    pub fn set_render_options(&mut self, opts: RenderOptions) {
        self.render_options = opts;
    }

    /// Camera matching the render aspect ratio is expected.
    /// Buffer row 0 is the top of the image.
    pub fn render_to_buffer(&self, camera: &PerspectiveCamera, buffer: &mut [u8]) -> Result<()> {
        let expected = self.render_options.buffer_len();
        if buffer.len() != expected {
            return Err(DvrError::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        let (img_w, img_h) = self.render_options.resolution;
        let (image_width, image_height) = (img_w as f32, img_h as f32);

        // Pixels the box cannot reach keep the background
        let bg = color::to_bytes(self.uniforms().background);
        for pixel in buffer.chunks_exact_mut(3) {
            pixel.copy_from_slice(&bg);
        }

        let tile = camera.project_box(self.volume().get_bound_box());
        let (xs, ys) = tile.get_pixel_range(self.render_options.resolution);
        trace!("Rendering pixels {xs:?} x {ys:?}");

        for y in ys {
            let y_norm = (y as f32 + 0.5) / image_height;
            let row = &mut buffer[y * img_w * 3..(y + 1) * img_w * 3];
            for x in xs.clone() {
                let pixel_coord = ((x as f32 + 0.5) / image_width, y_norm);
                let ray = camera.get_ray(pixel_coord);
                let rgb = color::to_bytes(self.raycaster.shade(&ray));
                row[x * 3..x * 3 + 3].copy_from_slice(&rgb);
            }
        }

        Ok(())
    }
}
