//! # dvr_lib
//!
//! Direct volume rendering of scalar 16-bit datasets.
//!
//! The crate is split into the state a viewer edits interactively
//! ([`transfer_function`], [`cutting_plane`], [`render::RenderSettings`], [`camera`])
//! and the raycasting engine ([`render`]) which consumes an immutable snapshot of
//! that state per frame. [`session::Session`] ties everything together and is the
//! single entry point for a UI layer.
//!
//! Histograms of the loaded volume are binned on a worker thread, see [`histogram`].

pub mod camera;
pub mod color;
pub mod common;
pub mod cutting_plane;
pub mod defaults;
pub mod error;
pub mod histogram;
pub mod render;
pub mod session;
pub mod test_helpers;
pub mod transfer_function;
pub mod volumetric;

pub use camera::{OrbitCamera, PerspectiveCamera};
pub use error::{DvrError, Result};
pub use session::Session;
