//! Bounding box and common coordinate levels of STL meshes.
//!
//! An STL file (binary or ASCII) is decoded into its vertices, three per
//! triangle, and summarized per axis: the extent of the mesh and the
//! coordinate values, rounded to hundredths, that the most vertices share.
//!
//! ```no_run
//! use stl_levels::{analyze_path, AnalysisSettings};
//!
//! let report = analyze_path("benchy.stl", &AnalysisSettings::default())?;
//! println!("{}", report);
//! # Ok::<(), stl_levels::AnalysisError>(())
//! ```

mod asset;
mod error;
mod render;
mod settings;
mod start;

pub mod stats;
pub mod stl;

use std::path::Path;

pub use asset::{StlAsset, StlAssetLoader, StlAssetLoaderError, StlPlugin};
pub use error::AnalysisError;
pub use settings::AnalysisSettings;
pub use start::{analyze_stl, analyze_stl_json, render_stl_report};
pub use stats::Report;

pub mod prelude {
    pub use super::stats::prelude::*;
    pub use super::stl::{StlFormat, StlGeometry};
    pub use super::{analyze_bytes, analyze_path, AnalysisError, AnalysisSettings, Report};
}

/// Decodes the STL file at `path` and summarizes it.
pub fn analyze_path(
    path: impl AsRef<Path>,
    settings: &AnalysisSettings,
) -> Result<Report, AnalysisError> {
    let geometry = stl::read_path(path)?;
    stats::analyze_with(&geometry.vertices, settings)
}

/// Decodes an STL held in memory and summarizes it.
pub fn analyze_bytes(bytes: &[u8], settings: &AnalysisSettings) -> Result<Report, AnalysisError> {
    let geometry = stl::read_bytes(bytes)?;
    stats::analyze_with(&geometry.vertices, settings)
}
