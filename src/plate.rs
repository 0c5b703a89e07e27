//! Surface plate dimensions and where the stations of each line land on it

use crate::error::{MoodyError, Result};
use crate::geometry::{Line, LineKind};
use crate::rounding::round_to;
use nalgebra::{Point2, Vector2};
use serde::Serialize;

/// Suggested number of stations per line, the station-0 reference included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StationCounts {
    pub diagonal:   usize,
    pub horizontal: usize,
    pub vertical:   usize,
}

/// Surface plate layout
///
/// ```text
/// |<------- width ------->|
/// +-----------------------+ -
/// | \                   / | ^
/// |   \   diagonal    /   | height
/// |     \           /     | v
/// +-----------------------+ -
/// ^ origin, +x east, +y north
/// ```
///
/// All values are in inches and derived once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfacePlateConfig {
    height_inches: f64,
    width_inches: f64,
    reflector_foot_spacing_inches: f64,
    diagonal_inches: f64,
    diagonal_inset: f64,
    suggested_station_counts: StationCounts,
}

impl SurfacePlateConfig {
    pub fn new(height_inches: f64, width_inches: f64,
            reflector_foot_spacing_inches: f64) -> Result<Self> {
        for (name, value) in [
            ("height_inches", height_inches),
            ("width_inches", width_inches),
            ("reflector_foot_spacing_inches", reflector_foot_spacing_inches),
        ] {
            if !value.is_finite() || value <= 0. {
                return Err(MoodyError::InvalidDimension { name, value });
            }
        }

        let spacing = reflector_foot_spacing_inches;
        let diagonal_inches = height_inches.hypot(width_inches);

        // The inset is worked out against the diagonal as read off a tape,
        // to the nearest tenth of an inch
        let measured_diagonal = round_to(diagonal_inches, 1);
        let mut diagonal_inset = (measured_diagonal % spacing) / 2.;
        if diagonal_inset < spacing / 4. {
            // Don't start the reflector foot right on the corner
            diagonal_inset += spacing / 2.;
        }

        let suggested_station_counts = StationCounts {
            diagonal: ((measured_diagonal - 2. * diagonal_inset) / spacing)
                .floor() as usize,
            horizontal: (width_inches / spacing).floor() as usize,
            vertical:   (height_inches / spacing).floor() as usize,
        };

        for (axis, stations) in [
            ("diagonal", suggested_station_counts.diagonal),
            ("width", suggested_station_counts.horizontal),
            ("height", suggested_station_counts.vertical),
        ] {
            if stations < 2 {
                return Err(MoodyError::PlateTooSmall { axis, stations });
            }
        }

        Ok(Self {
            height_inches,
            width_inches,
            reflector_foot_spacing_inches,
            diagonal_inches,
            diagonal_inset,
            suggested_station_counts,
        })
    }

    pub fn height_inches(&self) -> f64 {
        self.height_inches
    }

    pub fn width_inches(&self) -> f64 {
        self.width_inches
    }

    pub fn reflector_foot_spacing_inches(&self) -> f64 {
        self.reflector_foot_spacing_inches
    }

    pub fn diagonal_inches(&self) -> f64 {
        self.diagonal_inches
    }

    /// Margin left at each end of the diagonal when sizing its station count
    ///
    /// Only the count depends on it. [`station_positions`] centers the
    /// stations on the full diagonal, so on a plate whose diagonal is not a
    /// whole number of spacings past the inset the first station sits further
    /// in than this.
    ///
    /// [`station_positions`]: Self::station_positions
    pub fn diagonal_inset(&self) -> f64 {
        self.diagonal_inset
    }

    pub fn suggested_station_counts(&self) -> StationCounts {
        self.suggested_station_counts
    }

    /// Suggested station count for `line`
    pub fn station_count(&self, line: Line) -> usize {
        let counts = self.suggested_station_counts;
        match line {
            Line::TopStartingDiagonal | Line::BottomStartingDiagonal => counts.diagonal,
            Line::NorthPerimeter | Line::SouthPerimeter |
                Line::HorizontalCenter => counts.horizontal,
            Line::EastPerimeter | Line::WestPerimeter |
                Line::VerticalCenter => counts.vertical,
        }
    }

    /// Number of operator readings `line` takes. Station 0 is the implied
    /// zero reference so this is one less than the station count.
    pub fn expected_readings(&self, line: Line) -> usize {
        self.station_count(line) - 1
    }

    /// Footprint coordinates of `stations` stations along `line`
    ///
    /// The span covered by the stations is centered on the line. Diagonals
    /// step along the plate's diagonal angle, the other lines step along the
    /// axis they run on.
    pub fn station_positions(&self, line: Line, stations: usize) -> Vec<Point2<f64>> {
        let segment = line.segment();
        let scale = |(x, y): (f64, f64)| {
            Point2::new(x * self.width_inches, y * self.height_inches)
        };
        let start = scale(segment.start.unit_position());
        let end   = scale(segment.end.unit_position());

        let delta  = end - start;
        let length = delta.norm();

        let step = match line.kind() {
            LineKind::Diagonal => {
                let angle = delta.y.atan2(delta.x);
                Vector2::new(angle.cos(), angle.sin())
            }
            LineKind::Perimeter | LineKind::Center(_) => {
                // Axis aligned, keep the fixed coordinate exact
                if delta.x == 0. {
                    Vector2::new(0., delta.y.signum())
                } else {
                    Vector2::new(delta.x.signum(), 0.)
                }
            }
        };

        let spacing = self.reflector_foot_spacing_inches;
        let span    = stations.saturating_sub(1) as f64 * spacing;
        let offset  = (length - span) / 2.;

        (0..stations)
            .map(|ii| start + step * (offset + ii as f64 * spacing))
            .collect()
    }
}
