//! Plain-text layout of a [`Report`].

use std::fmt;

use crate::stats::prelude::*;
use crate::stats::Report;

fn extent_name(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "Width",
        Axis::Y => "Depth",
        Axis::Z => "Height",
    }
}

/// Level tables are listed Z first: layer heights are usually what matters.
const LEVEL_ORDER: [Axis; 3] = [Axis::Z, Axis::X, Axis::Y];

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Bounding Box ===")?;
        for axis in Axis::ALL {
            let range = self.bounds.axis(axis);
            writeln!(
                f,
                "{}: {:.2} to {:.2} ({}: {:.2})",
                axis.label(),
                range.min,
                range.max,
                extent_name(axis),
                range.extent
            )?;
        }

        for axis in LEVEL_ORDER {
            writeln!(f)?;
            writeln!(
                f,
                "=== Common {} Levels (Top {}) ===",
                axis.label(),
                self.top_levels
            )?;
            for level in self.levels(axis) {
                writeln!(
                    f,
                    "{} = {:.2} : {} vertices",
                    axis.label(),
                    level.value,
                    level.count
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bevy_math::DVec3;

    use crate::stats::analyze;

    #[test]
    fn text_layout() {
        let report = analyze(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 5.0, 1.0),
            DVec3::new(-1.0, 3.0, 4.0),
            DVec3::new(2.0, 5.0, 0.25),
        ])
        .unwrap();

        let expected = "\
=== Bounding Box ===
X: -1.00 to 2.00 (Width: 3.00)
Y: 0.00 to 5.00 (Depth: 5.00)
Z: 0.00 to 4.00 (Height: 4.00)

=== Common Z Levels (Top 10) ===
Z = 0.00 : 1 vertices
Z = 1.00 : 1 vertices
Z = 4.00 : 1 vertices
Z = 0.25 : 1 vertices

=== Common X Levels (Top 10) ===
X = 2.00 : 2 vertices
X = 0.00 : 1 vertices
X = -1.00 : 1 vertices

=== Common Y Levels (Top 10) ===
Y = 5.00 : 2 vertices
Y = 0.00 : 1 vertices
Y = 3.00 : 1 vertices
";
        assert_eq!(report.to_string(), expected);
    }
}
