use crate::{
    defaults::{RENDER_HEIGHT, RENDER_WIDTH},
    error::{DvrError, Result},
};

/// Options of the draw call, not edited by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub resolution: (usize, usize),
    /// Stop accumulating once the ray is nearly opaque
    pub early_ray_termination: bool,
}

impl RenderOptions {
    pub fn new(resolution: (usize, usize), early_ray_termination: bool) -> RenderOptions {
        RenderOptions {
            resolution,
            early_ray_termination,
        }
    }

    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }

    /// RGB8 framebuffer length
    pub fn buffer_len(&self) -> usize {
        self.resolution.0 * self.resolution.1 * 3
    }

    pub fn aspect(&self) -> f32 {
        self.resolution.0 as f32 / self.resolution.1.max(1) as f32
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::new((RENDER_WIDTH, RENDER_HEIGHT), true)
    }
}

#[derive(Debug, Default)]
pub struct RenderOptionsBuilder {
    resolution: Option<(usize, usize)>,
    early_ray_termination: Option<bool>,
}

impl RenderOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: (usize, usize)) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn early_ray_termination(mut self, enabled: bool) -> Self {
        self.early_ray_termination = Some(enabled);
        self
    }

    /// Fails on missing or zero resolution
    pub fn build(self) -> Result<RenderOptions> {
        let resolution = self
            .resolution
            .ok_or(DvrError::InvalidRenderOptions("resolution not set"))?;
        if resolution.0 == 0 || resolution.1 == 0 {
            return Err(DvrError::InvalidRenderOptions("resolution is zero"));
        }

        Ok(RenderOptions {
            resolution,
            early_ray_termination: self.early_ray_termination.unwrap_or(true),
        })
    }

    /// Missing values are taken from defaults
    pub fn build_unchecked(self) -> RenderOptions {
        let default = RenderOptions::default();
        RenderOptions {
            resolution: self.resolution.unwrap_or(default.resolution),
            early_ray_termination: self
                .early_ray_termination
                .unwrap_or(default.early_ray_termination),
        }
    }
}
