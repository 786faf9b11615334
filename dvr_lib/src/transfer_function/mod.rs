//! # Transfer function
//!
//! Sparse set of control points edited by the user and its fixed-size
//! serialization consumed by the raycaster.
//!
//! Every accepted edit rebuilds the [`TransferFunctionState`].
//! Rejected edits leave the model untouched and report why.

mod band;
mod point;
mod state;

pub use band::{IsoBand, IsoFalloff};
pub use point::IsoControlPoint;
pub use state::{IsoHit, TfSlot, TransferFunctionState};

use log::debug;
use thiserror::Error;

use crate::{
    color::{self, RGB},
    defaults::{
        CONTROL_POINTS, MAX_CONTROL_POINTS, MIN_CONTROL_POINTS, NEW_POINT_COLORS,
        NEW_POINT_DENSITY, NEW_POINT_OPACITY,
    },
};

/// Why a control point edit was not applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditRejected {
    #[error("transfer function is full")]
    TooManyPoints,
    #[error("the last control point cannot be removed")]
    LastPoint,
    #[error("no control point with id '{0}'")]
    UnknownPoint(String),
}

pub type EditResult = std::result::Result<(), EditRejected>;

#[derive(Debug, Clone)]
pub struct TransferFunction {
    points: Vec<IsoControlPoint>,
    // source of fresh ids and colour rotation
    next_id: usize,
    state: TransferFunctionState,
}

impl TransferFunction {
    /// Build from points, truncated to the allowed maximum.
    /// Empty input yields an empty (transparent) function.
    pub fn from_points(mut points: Vec<IsoControlPoint>) -> Self {
        points.truncate(MAX_CONTROL_POINTS);
        let state = TransferFunctionState::from_points(&points);
        Self {
            next_id: points.len() + 1,
            points,
            state,
        }
    }

    pub fn points(&self) -> &[IsoControlPoint] {
        &self.points
    }

    /// Points ordered by density, as the editor plots them
    pub fn sorted_points(&self) -> Vec<&IsoControlPoint> {
        let mut sorted: Vec<_> = self.points.iter().collect();
        sorted.sort_by(|a, b| a.density.total_cmp(&b.density));
        sorted
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&IsoControlPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn state(&self) -> &TransferFunctionState {
        &self.state
    }

    /// Add a point at the default position with the next rotation colour.
    /// Returns the id of the new point.
    pub fn add_point(&mut self) -> Result<String, EditRejected> {
        let color_hex = NEW_POINT_COLORS[self.next_id % NEW_POINT_COLORS.len()];
        let color = color::from_hex(color_hex).unwrap_or_else(|_| color::white());
        self.add_point_with(NEW_POINT_DENSITY, NEW_POINT_OPACITY, color)
    }

    pub fn add_point_with(
        &mut self,
        density: f32,
        opacity: f32,
        color: RGB,
    ) -> Result<String, EditRejected> {
        if self.points.len() >= MAX_CONTROL_POINTS {
            return Err(EditRejected::TooManyPoints);
        }

        let id = self.fresh_id();
        self.points
            .push(IsoControlPoint::new(id.clone(), density, opacity, color));
        self.rebuild();
        debug!("Added control point {id}");
        Ok(id)
    }

    pub fn remove_point(&mut self, id: &str) -> EditResult {
        let index = self.index_of(id)?;
        if self.points.len() <= MIN_CONTROL_POINTS {
            return Err(EditRejected::LastPoint);
        }

        self.points.remove(index);
        self.rebuild();
        Ok(())
    }

    /// Density and opacity are clamped to `<0;1>`
    pub fn move_point(&mut self, id: &str, density: f32, opacity: f32) -> EditResult {
        let index = self.index_of(id)?;
        let p = &mut self.points[index];
        p.density = point::clamp_unit(density);
        p.opacity = point::clamp_unit(opacity);
        self.rebuild();
        Ok(())
    }

    pub fn set_color(&mut self, id: &str, color: RGB) -> EditResult {
        let index = self.index_of(id)?;
        self.points[index].color = color::saturate(color);
        self.rebuild();
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize, EditRejected> {
        self.points
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EditRejected::UnknownPoint(id.to_owned()))
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = format!("iso{}", self.next_id);
            self.next_id += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn rebuild(&mut self) {
        self.state = TransferFunctionState::from_points(&self.points);
    }
}

impl Default for TransferFunction {
    /// The three initial points of the editor
    fn default() -> Self {
        let points = CONTROL_POINTS
            .iter()
            .enumerate()
            .map(|(i, &(density, opacity, hex))| {
                let color = color::from_hex(hex).unwrap_or_else(|_| color::white());
                IsoControlPoint::new(format!("iso{}", i + 1), density, opacity, color)
            })
            .collect();
        Self::from_points(points)
    }
}
