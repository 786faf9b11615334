//! # Session
//!
//! Owns all viewer state and the raycasting engine, and is the only thing a
//! UI layer talks to. Every state change schedules a repaint; repaints are
//! coalesced and performed by [`Session::frame`], called once per display frame.
//!
//! Settings arriving before a volume is loaded are stored and pushed into the
//! engine once it exists.

use std::{path::Path, sync::Arc};

use log::{debug, info};
use nalgebra::{Point3, Vector3};
use parking_lot::Mutex;

use crate::{
    camera::OrbitCamera,
    color::RGB,
    cutting_plane::{CuttingPlane, PlaneMode},
    error::Result,
    histogram::{HistogramBins, HistogramClient},
    render::{
        FrameScheduler, RenderModeKind, RenderOptions, RenderSettings, Renderer, SettingsUpdate,
        Uniforms,
    },
    transfer_function::{EditRejected, IsoControlPoint, TransferFunction},
    volumetric::{self, LinearVolume, RawFormat, Volume, VolumeStore},
};

pub struct Session {
    store: VolumeStore,
    transfer_function: TransferFunction,
    plane: CuttingPlane,
    settings: RenderSettings,
    render_options: RenderOptions,
    camera: Option<OrbitCamera>,
    // user switch, the plane gizmo overrides it while active
    controls_enabled: bool,
    auto_rotate: bool,
    histogram: HistogramClient,
    scheduler: FrameScheduler,
    engine: Option<Renderer<LinearVolume>>,
    framebuffer: Arc<Mutex<Vec<u8>>>,
}

impl Session {
    /// Starts the histogram worker
    pub fn new(render_options: RenderOptions) -> Result<Session> {
        let framebuffer = Arc::new(Mutex::new(vec![0; render_options.buffer_len()]));
        Ok(Session {
            store: VolumeStore::new(),
            transfer_function: TransferFunction::default(),
            plane: CuttingPlane::new(),
            settings: RenderSettings::default(),
            render_options,
            camera: None,
            controls_enabled: true,
            auto_rotate: false,
            histogram: HistogramClient::new()?,
            scheduler: FrameScheduler::new(),
            engine: None,
            framebuffer,
        })
    }

    // Volume

    /// Decode raw 16-bit samples and install them.
    /// On error the previous volume stays.
    pub fn load_volume(
        &mut self,
        width: usize,
        height: usize,
        depth: usize,
        bytes: &[u8],
        format: RawFormat,
    ) -> Result<()> {
        let volume = self
            .store
            .load_with(|| LinearVolume::from_raw(width, height, depth, bytes, format))?;
        self.volume_installed(volume);
        Ok(())
    }

    /// Read a file through `parser`, see [`volumetric::dat_parser`] and [`volumetric::raw_parser`]
    pub fn load_file<P, PF>(&mut self, path: P, parser: PF) -> Result<()>
    where
        P: AsRef<Path>,
        PF: FnOnce(&[u8]) -> Result<LinearVolume>,
    {
        let volume = self
            .store
            .load_with(|| volumetric::from_file(path, parser))?;
        self.volume_installed(volume);
        Ok(())
    }

    pub fn install_volume(&mut self, volume: LinearVolume) {
        let volume = self.store.install(volume);
        self.volume_installed(volume);
    }

    pub fn volume(&self) -> Option<&Arc<LinearVolume>> {
        self.store.current()
    }

    /// Engine exists, a volume has been loaded
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    fn volume_installed(&mut self, volume: Arc<LinearVolume>) {
        let mut camera = OrbitCamera::for_extent(volume.get_extent());
        camera.set_auto_rotate(self.auto_rotate);
        self.camera = Some(camera);
        self.sync_controls();

        self.engine = Some(Renderer::new(Arc::clone(&volume), self.render_options));
        info!("Engine ready for volume {:?}", volume.get_size());

        self.push_uniforms();
        self.request_histogram();
        self.request_repaint();
    }

    // Settings

    /// Applies present fields only. Returns true if anything changed.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> bool {
        let render_changed = self.settings.apply(&update);

        let plane_before = self.plane.clone();
        if let Some(position) = update.cutting_plane_position {
            self.plane.position = position;
        }
        if let Some(rotation) = update.cutting_plane_rotation {
            self.plane.orientation = rotation;
        }
        if let Some(flipped) = update.cutting_plane_flipped {
            self.plane.flipped = flipped;
        }
        if let Some(enabled) = update.cutting_plane_enabled {
            self.plane.set_enabled(enabled);
            self.sync_controls();
        }
        let plane_changed = self.plane != plane_before;

        if plane_changed && (self.plane.enabled || plane_before.enabled) {
            self.request_histogram();
        }
        if render_changed || plane_changed {
            self.push_uniforms();
            self.request_repaint();
        }
        render_changed || plane_changed
    }

    pub fn set_iso_range(&mut self, iso_range: f32) {
        if self.settings.set_iso_range(iso_range) {
            self.push_uniforms();
            self.request_repaint();
        }
    }

    /// Back to the initial render settings, the cutting plane gets disabled
    pub fn reset_settings(&mut self) {
        let plane_was_enabled = self.plane.enabled;
        self.settings = RenderSettings::default();
        self.plane.set_enabled(false);
        self.plane.set_mode(PlaneMode::None);
        self.sync_controls();

        if plane_was_enabled {
            self.request_histogram();
        }
        self.push_uniforms();
        self.request_repaint();
    }

    pub fn set_render_options(&mut self, render_options: RenderOptions) {
        self.render_options = render_options;
        self.framebuffer
            .lock()
            .resize(render_options.buffer_len(), 0);
        if let Some(engine) = &mut self.engine {
            engine.set_render_options(render_options);
        }
        self.push_uniforms();
        self.request_repaint();
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Labels of the render modes, indexed by [`RenderModeKind::index`]
    pub fn render_mode_labels() -> [&'static str; 8] {
        RenderModeKind::ALL.map(|k| k.label())
    }

    // Transfer function

    /// Returns id of the new point, `None` if the function is full
    pub fn add_control_point(&mut self) -> Option<String> {
        let result = self.transfer_function.add_point();
        match result {
            Ok(id) => {
                self.transfer_function_changed();
                Some(id)
            }
            Err(e) => {
                self.edit_rejected(e);
                None
            }
        }
    }

    pub fn remove_control_point(&mut self, id: &str) -> bool {
        let result = self.transfer_function.remove_point(id);
        self.edit_done(result)
    }

    pub fn move_control_point(&mut self, id: &str, density: f32, opacity: f32) -> bool {
        let result = self.transfer_function.move_point(id, density, opacity);
        self.edit_done(result)
    }

    pub fn set_control_point_color(&mut self, id: &str, color: RGB) -> bool {
        let result = self.transfer_function.set_color(id, color);
        self.edit_done(result)
    }

    pub fn control_points(&self) -> &[IsoControlPoint] {
        self.transfer_function.points()
    }

    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer_function
    }

    fn edit_done(&mut self, result: std::result::Result<(), EditRejected>) -> bool {
        match result {
            Ok(()) => {
                self.transfer_function_changed();
                true
            }
            Err(e) => {
                self.edit_rejected(e);
                false
            }
        }
    }

    fn edit_rejected(&self, e: EditRejected) {
        debug!("Control point edit rejected: {e}");
    }

    fn transfer_function_changed(&mut self) {
        self.push_uniforms();
        self.request_repaint();
    }

    // Cutting plane

    pub fn cutting_plane(&self) -> &CuttingPlane {
        &self.plane
    }

    /// `none -> translate -> rotate -> none`
    pub fn cycle_plane_mode(&mut self) -> PlaneMode {
        let mode = self.plane.cycle_mode();
        self.sync_controls();
        self.request_repaint();
        mode
    }

    pub fn set_plane_mode(&mut self, mode: PlaneMode) {
        self.plane.set_mode(mode);
        self.sync_controls();
        self.request_repaint();
    }

    /// Gizmo moved or rotated the plane
    pub fn plane_gizmo_moved(&mut self, position: Point3<f32>, orientation: Vector3<f32>) {
        self.update_settings(SettingsUpdate {
            cutting_plane_position: Some(position),
            cutting_plane_rotation: Some(orientation),
            ..Default::default()
        });
    }

    // Camera

    pub fn camera(&self) -> Option<&OrbitCamera> {
        self.camera.as_ref()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if let Some(camera) = &mut self.camera {
            camera.pointer_down(x, y);
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let moved = match &mut self.camera {
            Some(camera) => camera.pointer_move(x, y),
            None => false,
        };
        if moved {
            self.request_repaint();
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(camera) = &mut self.camera {
            camera.pointer_up();
            if camera.auto_rotate() {
                self.scheduler.request();
            }
        }
    }

    pub fn wheel(&mut self, wheel_delta: f32) {
        let moved = match &mut self.camera {
            Some(camera) => camera.wheel(wheel_delta),
            None => false,
        };
        if moved {
            self.request_repaint();
        }
    }

    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
        self.sync_controls();
    }

    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.auto_rotate = auto_rotate;
        if let Some(camera) = &mut self.camera {
            camera.set_auto_rotate(auto_rotate);
            if auto_rotate && !camera.is_dragging() {
                self.scheduler.request();
            }
        }
    }

    /// Orbit controls are off while the plane gizmo takes pointer input
    fn sync_controls(&mut self) {
        let enabled = self.controls_enabled && !self.plane.mode().is_active();
        if let Some(camera) = &mut self.camera {
            camera.set_controls_enabled(enabled);
        }
    }

    // Histogram

    /// Latest bins, `None` until the first result arrives
    pub fn histogram(&self) -> Option<&HistogramBins> {
        self.histogram.bins()
    }

    /// Collect finished histograms, true if the bins changed
    pub fn poll_histogram(&mut self) -> bool {
        self.histogram.poll()
    }

    /// Block until the newest histogram is done
    pub fn wait_histogram(&mut self, timeout: std::time::Duration) -> bool {
        self.histogram.wait(timeout)
    }

    fn request_histogram(&mut self) {
        match self.store.current() {
            Some(volume) => {
                let id = self
                    .histogram
                    .request(Arc::clone(volume), self.plane.uniform());
                debug!("Requested histogram {id}");
            }
            None => debug!("No volume, histogram not requested"),
        }
    }

    // Rendering

    pub fn request_repaint(&mut self) {
        self.scheduler.request();
    }

    pub fn is_repaint_scheduled(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    /// Number of frames rendered
    pub fn frames(&self) -> u64 {
        self.scheduler.frames()
    }

    /// Shared RGB8 framebuffer, row 0 is the top of the image
    pub fn framebuffer(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.framebuffer)
    }

    /// Frame callback.
    /// Advances auto-rotation, collects histograms and renders if a repaint is pending.
    /// Returns true if a new image was rendered.
    pub fn frame(&mut self) -> Result<bool> {
        if let Some(camera) = &mut self.camera {
            if camera.tick() {
                self.scheduler.request();
            }
        }

        self.histogram.poll();

        if !self.scheduler.is_scheduled() {
            return Ok(false);
        }

        let (engine, camera) = match (&self.engine, &self.camera) {
            (Some(engine), Some(camera)) => (engine, camera),
            _ => {
                // nothing to draw yet, keep the request for later
                return Ok(false);
            }
        };

        self.scheduler.take();
        let perspective = camera.perspective(self.render_options.aspect());
        let mut buffer = self.framebuffer.lock();
        engine.render_to_buffer(&perspective, &mut buffer[..])?;
        Ok(true)
    }

    fn push_uniforms(&mut self) {
        match &mut self.engine {
            Some(engine) => {
                engine.set_uniforms(Uniforms::new(
                    &self.settings,
                    &self.render_options,
                    self.transfer_function.state(),
                    &self.plane,
                ));
            }
            None => debug!("Engine not initialized, uniforms kept for later"),
        }
    }
}
