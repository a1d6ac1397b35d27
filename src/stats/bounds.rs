use bevy_math::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub extent: f64,
}

/// Axis-aligned box around a vertex set.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds {
    /// Single pass over `vertices`; `None` when there is nothing to bound.
    /// NaN coordinates do not move the box.
    pub fn from_vertices(vertices: &[DVec3]) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }

        let mut bounds = Bounds {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        };
        for v in vertices {
            for j in 0..3 {
                bounds.min[j] = bounds.min[j].min(v[j]);
                bounds.max[j] = bounds.max[j].max(v[j]);
            }
        }
        Some(bounds)
    }

    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn axis(&self, axis: Axis) -> AxisRange {
        let j = axis.index();
        AxisRange {
            min: self.min[j],
            max: self.max[j],
            extent: self.extent()[j],
        }
    }
}
