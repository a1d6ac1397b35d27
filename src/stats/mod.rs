mod bounds;
mod levels;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::levels::*;
}

use bevy::log::debug;
use bevy_math::DVec3;
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, AnalysisSettings};
use prelude::*;

/// Bounding box and most common coordinate levels of a mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub vertex_count: usize,
    pub bounds: Bounds,
    /// Truncation length the level lists were built with.
    pub top_levels: usize,
    pub x_levels: Vec<LevelCount>,
    pub y_levels: Vec<LevelCount>,
    pub z_levels: Vec<LevelCount>,
}

impl Report {
    pub fn levels(&self, axis: Axis) -> &[LevelCount] {
        match axis {
            Axis::X => &self.x_levels,
            Axis::Y => &self.y_levels,
            Axis::Z => &self.z_levels,
        }
    }
}

pub fn analyze(vertices: &[DVec3]) -> Result<Report, AnalysisError> {
    analyze_with(vertices, &AnalysisSettings::default())
}

pub fn analyze_with(
    vertices: &[DVec3],
    settings: &AnalysisSettings,
) -> Result<Report, AnalysisError> {
    let bounds = Bounds::from_vertices(vertices).ok_or(AnalysisError::NoGeometryFound)?;

    let levels = |axis: Axis| {
        let histogram: LevelHistogram = vertices.iter().map(|v| v[axis.index()]).collect();
        debug!("{} distinct {} levels", histogram.distinct_levels(), axis.label());
        histogram.ranked(settings.top_levels)
    };

    Ok(Report {
        vertex_count: vertices.len(),
        bounds,
        top_levels: settings.top_levels,
        x_levels: levels(Axis::X),
        y_levels: levels(Axis::Y),
        z_levels: levels(Axis::Z),
    })
}
