//! Per-pixel fragment program
//!
//! Rays are marched front to back in every mode, from the point where they
//! enter the volume box (or the camera, when it sits inside) to the exit point.
//! The segment is split into equal steps no longer than the configured step size,
//! samples are taken in the middle of each step.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};

use crate::{
    color::{self, RGB},
    common::Ray,
    cutting_plane::{CuttingPlane, PlaneUniform},
    defaults::{ERT_OPACITY, MIN_STEP_SIZE, MIP_THRESHOLD},
    transfer_function::{IsoBand, TransferFunctionState},
    volumetric::Volume,
};

use super::{Light, RenderMode, RenderOptions, RenderSettings};

/// Everything the fragment program reads, snapshot of the session state
#[derive(Debug, Clone, PartialEq)]
pub struct Uniforms {
    pub mode: RenderMode,
    pub background: RGB,
    pub step_size: f32,
    pub transfer_function: TransferFunctionState,
    pub plane: Option<PlaneUniform>,
}

impl Uniforms {
    pub fn new(
        settings: &RenderSettings,
        options: &RenderOptions,
        transfer_function: &TransferFunctionState,
        plane: &CuttingPlane,
    ) -> Uniforms {
        Uniforms {
            mode: settings.mode(options),
            background: settings.background,
            step_size: settings.step_size(),
            transfer_function: *transfer_function,
            plane: plane.uniform(),
        }
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Uniforms::new(
            &RenderSettings::default(),
            &RenderOptions::default(),
            &TransferFunctionState::default(),
            &CuttingPlane::default(),
        )
    }
}

/// One sample along the ray
#[derive(Debug, Clone, Copy)]
struct Sample {
    world: Point3<f32>,
    tex: Point3<f32>,
    density: f32,
}

pub struct Raycaster<V>
where
    V: Volume,
{
    volume: Arc<V>,
    uniforms: Uniforms,
}

impl<V> Raycaster<V>
where
    V: Volume,
{
    pub fn new(volume: Arc<V>, uniforms: Uniforms) -> Raycaster<V> {
        Raycaster { volume, uniforms }
    }

    pub fn volume(&self) -> &Arc<V> {
        &self.volume
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn set_uniforms(&mut self, uniforms: Uniforms) {
        self.uniforms = uniforms;
    }

    /// Colour of the pixel the ray passes through
    pub fn shade(&self, ray: &Ray) -> RGB {
        let bg = self.uniforms.background;

        let (t_near, t_far) = match self.volume.intersect(ray) {
            Some(t) => t,
            None => return bg,
        };
        let t_start = f32::max(t_near, 0.0);
        let length = t_far - t_start;
        if length.is_nan() {
            return bg;
        }

        // NaN and too small steps fall to the minimum
        let step = match self.uniforms.step_size {
            s if s >= MIN_STEP_SIZE => s,
            _ => MIN_STEP_SIZE,
        };
        let n_of_steps = f32::max((length / step).ceil(), 1.0) as usize;
        let dt = length / n_of_steps as f32;

        let samples = (0..n_of_steps)
            .map(|i| ray.point_from_t(t_start + (i as f32 + 0.5) * dt))
            .filter(|p| self.is_included(p))
            .map(|world| {
                let tex = self.volume.world_to_texture(world);
                Sample {
                    world,
                    tex,
                    density: self.volume.sample_at(tex),
                }
            });

        let tf = &self.uniforms.transfer_function;

        match self.uniforms.mode {
            RenderMode::MaximumIntensity { foreground } => {
                let max = samples.map(|s| s.density).fold(0.0, f32::max);
                if max <= MIP_THRESHOLD {
                    bg
                } else {
                    color::mix(bg, foreground, max)
                }
            }
            RenderMode::MaximumIntensityTf { band } => {
                let max = samples.map(|s| s.density).reduce(f32::max);
                match max {
                    Some(m) => {
                        let c = tf.lookup(m, band);
                        color::mix(bg, c.xyz(), c.w)
                    }
                    None => bg,
                }
            }
            RenderMode::Accumulative {
                band,
                early_termination,
            } => {
                // Opacities are defined per unit step
                let correct = |a: f32| 1.0 - (1.0 - a).powf(dt);
                let limit = if early_termination {
                    ERT_OPACITY
                } else {
                    f32::INFINITY
                };
                self.accumulate(samples, band, limit, |a, _| correct(a))
            }
            RenderMode::AccumulativeAlphaBlending { band } => {
                // Opacity weighted by the density itself
                self.accumulate(samples, band, f32::INFINITY, |a, s| a * s)
            }
            RenderMode::FirstHitPositions { band } => {
                self.first_hit(samples, band, |sample, _| sample.tex.coords)
            }
            RenderMode::FirstHitNormals { band } => self.first_hit(samples, band, |sample, _| {
                self.normal_at(sample, ray).add_scalar(1.0) * 0.5
            }),
            RenderMode::FirstHitSolidColor { band } => {
                self.first_hit(samples, band, |_, hit_color| hit_color)
            }
            RenderMode::PhongShaded { band, light } => {
                self.first_hit(samples, band, |sample, hit_color| {
                    self.phong(sample, ray, hit_color, &light)
                })
            }
        }
    }

    fn is_included(&self, p: &Point3<f32>) -> bool {
        match &self.uniforms.plane {
            Some(plane) => plane.includes(p),
            None => true,
        }
    }

    /// Front to back "over" compositing
    fn accumulate<I, F>(&self, samples: I, band: IsoBand, limit: f32, opacity: F) -> RGB
    where
        I: Iterator<Item = Sample>,
        F: Fn(f32, f32) -> f32,
    {
        let tf = &self.uniforms.transfer_function;
        let mut accum_color = color::black();
        let mut accum_alpha = 0.0;

        for sample in samples {
            let c = tf.lookup(sample.density, band);
            if c.w <= 0.0 {
                continue;
            }

            let a = opacity(c.w, sample.density).clamp(0.0, 1.0);
            accum_color += (1.0 - accum_alpha) * a * c.xyz();
            accum_alpha += (1.0 - accum_alpha) * a;

            if accum_alpha >= limit {
                break;
            }
        }

        accum_color + (1.0 - accum_alpha) * self.uniforms.background
    }

    /// First sample matching a control point, shaded by `hit_color`
    fn first_hit<I, F>(&self, mut samples: I, band: IsoBand, hit_color: F) -> RGB
    where
        I: Iterator<Item = Sample>,
        F: Fn(&Sample, RGB) -> RGB,
    {
        let tf = &self.uniforms.transfer_function;
        let bg = self.uniforms.background;

        let hit = samples.find_map(|s| tf.iso_match(s.density, band).map(|hit| (s, hit)));
        match hit {
            Some((sample, hit)) => {
                let c = color::saturate(hit_color(&sample, hit.color));
                color::mix(bg, c, hit.weight)
            }
            None => bg,
        }
    }

    /// Surface normal, facing the viewer where the gradient vanishes
    fn normal_at(&self, sample: &Sample, ray: &Ray) -> Vector3<f32> {
        let grad = self.volume.gradient_at(sample.tex);
        match (-grad).try_normalize(1e-6) {
            Some(n) => n,
            None => -ray.direction,
        }
    }

    /// Headlight Phong, two-sided
    fn phong(&self, sample: &Sample, ray: &Ray, base: RGB, light: &Light) -> RGB {
        let to_eye = (ray.origin - sample.world)
            .try_normalize(1e-6)
            .unwrap_or(-ray.direction);

        let mut n = self.normal_at(sample, ray);
        if n.dot(&to_eye) < 0.0 {
            n = -n;
        }

        // Light at the eye, half vector equals view vector
        let n_dot_l = f32::max(n.dot(&to_eye), 0.0);
        let specular = light.specular * n_dot_l.powf(light.shininess);

        base * (light.ambient + light.diffuse * n_dot_l) + color::white() * specular
    }
}
