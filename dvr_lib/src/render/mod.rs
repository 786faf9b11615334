//! # Raycasting engine
//!
//! [`Raycaster`] is the fragment program, pure given its [`Uniforms`].
//! [`Renderer`] runs it over a framebuffer.
//! The session builds uniforms from [`RenderSettings`], the transfer function
//! and the cutting plane, the engine never writes back.

mod frame;
mod raycaster;
mod render_mode;
mod render_options;
mod renderer;
mod settings;

pub use frame::FrameScheduler;
pub use raycaster::{Raycaster, Uniforms};
pub use render_mode::{Light, RenderMode, RenderModeKind};
pub use render_options::{RenderOptions, RenderOptionsBuilder};
pub use renderer::Renderer;
pub use settings::{RenderSettings, SettingsUpdate};
