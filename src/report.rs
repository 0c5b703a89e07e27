//! Plate-wide reduction of all eight lines
//!
//! Lines are reduced in the order the survey ties them together:
//!
//! 1. the two diagonals, on their own readings alone
//! 2. the four perimeters, pinned to the diagonal endpoints at the corners
//! 3. the two center lines, pinned to the perimeter midpoints
//! 4. the intersection values are spliced onto the perimeter and center
//!    display columns
//! 5. the lowest height on the plate becomes the baseline for every line
//!
//! Each step reads values produced by the one before it.

use crate::error::{MoodyError, Result};
use crate::geometry::{Line, Orientation};
use crate::plate::SurfacePlateConfig;
use crate::rounding::round_to;
use crate::table::{
    perimeter_mid_station_value, Correction, DraftTable, FinalizedTable, Linkage,
};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Raw autocollimator readings in arc-seconds for every line, as entered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyReadings {
    pub top_starting_diagonal:    Vec<f64>,
    pub bottom_starting_diagonal: Vec<f64>,
    pub north_perimeter:          Vec<f64>,
    pub east_perimeter:           Vec<f64>,
    pub south_perimeter:          Vec<f64>,
    pub west_perimeter:           Vec<f64>,
    pub horizontal_center:        Vec<f64>,
    pub vertical_center:          Vec<f64>,
}

impl SurveyReadings {
    pub fn get(&self, line: Line) -> &[f64] {
        match line {
            Line::TopStartingDiagonal    => &self.top_starting_diagonal,
            Line::BottomStartingDiagonal => &self.bottom_starting_diagonal,
            Line::NorthPerimeter         => &self.north_perimeter,
            Line::EastPerimeter          => &self.east_perimeter,
            Line::SouthPerimeter         => &self.south_perimeter,
            Line::WestPerimeter          => &self.west_perimeter,
            Line::HorizontalCenter       => &self.horizontal_center,
            Line::VerticalCenter         => &self.vertical_center,
        }
    }

    pub fn get_mut(&mut self, line: Line) -> &mut Vec<f64> {
        match line {
            Line::TopStartingDiagonal    => &mut self.top_starting_diagonal,
            Line::BottomStartingDiagonal => &mut self.bottom_starting_diagonal,
            Line::NorthPerimeter         => &mut self.north_perimeter,
            Line::EastPerimeter          => &mut self.east_perimeter,
            Line::SouthPerimeter         => &mut self.south_perimeter,
            Line::WestPerimeter          => &mut self.west_perimeter,
            Line::HorizontalCenter       => &mut self.horizontal_center,
            Line::VerticalCenter         => &mut self.vertical_center,
        }
    }

    /// Check every line has the number of readings `plate` calls for
    pub fn validate(&self, plate: &SurfacePlateConfig) -> Result<()> {
        for line in Line::ALL {
            let expected = plate.expected_readings(line);
            let actual = self.get(line).len();
            if actual != expected {
                return Err(MoodyError::CardinalityMismatch { line, expected, actual });
            }
        }

        Ok(())
    }
}

/// The reduced survey: one finalized table per line
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    plate: SurfacePlateConfig,
    lowest_value_across_all_tables: f64,

    /// Indexed by [`Line::index`]
    tables: Vec<FinalizedTable>,
}

impl Report {
    pub fn build(plate: &SurfacePlateConfig, readings: &SurveyReadings) -> Result<Self> {
        readings.validate(plate)?;

        let spacing = plate.reflector_foot_spacing_inches();
        let draft = |line: Line, correction: Correction| {
            DraftTable::new(line, readings.get(line), spacing, correction)
        };

        // Diagonals stand on their own
        tracing::debug!("reducing diagonals");
        let top    = draft(Line::TopStartingDiagonal, Correction::Diagonal)?;
        let bottom = draft(Line::BottomStartingDiagonal, Correction::Diagonal)?;

        // Corner heights, as the diagonals put them
        let northwest = first(top.datum_displacement());
        let southeast = last(top.datum_displacement());
        let northeast = first(bottom.datum_displacement());
        let southwest = last(bottom.datum_displacement());

        // Perimeters run corner to corner
        tracing::debug!(northwest, northeast, southeast, southwest, "reducing perimeters");
        let perimeter = |line: Line, start: f64, end: f64| {
            draft(line, Correction::Perimeter(Linkage {
                first_value_of_column5: start,
                last_value_of_column6:  end,
            }))
        };
        let north = perimeter(Line::NorthPerimeter, northwest, northeast)?;
        let east  = perimeter(Line::EastPerimeter, northeast, southeast)?;
        let south = perimeter(Line::SouthPerimeter, southwest, southeast)?;
        let west  = perimeter(Line::WestPerimeter, northwest, southwest)?;

        // Center lines run between the midpoints of the perimeters they cross
        let midpoint = |table: &DraftTable| -> Result<f64> {
            Ok(round_to(perimeter_mid_station_value(table.datum_displacement())?, 2))
        };
        let (west_mid, east_mid)   = (midpoint(&west)?, midpoint(&east)?);
        let (north_mid, south_mid) = (midpoint(&north)?, midpoint(&south)?);

        tracing::debug!(west_mid, east_mid, north_mid, south_mid, "reducing center lines");
        let center = |line: Line, orientation: Orientation, start: f64, end: f64| {
            draft(line, Correction::Center {
                linkage: Linkage {
                    first_value_of_column5: start,
                    last_value_of_column6:  end,
                },
                orientation,
            })
        };
        let horizontal = center(Line::HorizontalCenter, Orientation::Horizontal, west_mid, east_mid)?;
        let vertical   = center(Line::VerticalCenter, Orientation::Vertical, north_mid, south_mid)?;

        // Show the intersection points at either end of the display columns
        tracing::debug!("splicing intersections");
        let north      = north.with_splice(northwest, northeast);
        let east       = east.with_splice(northeast, southeast);
        let south      = south.with_splice(southwest, southeast);
        let west       = west.with_splice(northwest, southwest);
        let horizontal = horizontal.with_splice(west_mid, east_mid);
        let vertical   = vertical.with_splice(north_mid, south_mid);

        let drafts = [top, bottom, north, east, south, west, horizontal, vertical];
        debug_assert!(drafts.iter().zip(Line::ALL).all(|(t, l)| t.line() == l));

        // The lowest point anywhere on the plate becomes the baseline
        let lowest_value_across_all_tables = drafts.iter()
            .map(DraftTable::lowest_value)
            .fold(f64::INFINITY, f64::min);

        tracing::debug!(lowest_value_across_all_tables, "finalizing tables");
        let tables: Vec<FinalizedTable> = drafts.into_iter()
            .map(|draft| {
                let positions = plate.station_positions(draft.line(), draft.num_stations());
                FinalizedTable::finalize(draft, lowest_value_across_all_tables, positions)
            })
            .collect();

        let report = Self {
            plate: *plate,
            lowest_value_across_all_tables,
            tables,
        };

        tracing::debug!(
            lowest = report.lowest_value_across_all_tables,
            flatness_inches = report.flatness(),
            "survey reduced"
        );

        Ok(report)
    }

    pub fn plate(&self) -> &SurfacePlateConfig {
        &self.plate
    }

    pub fn lowest_value_across_all_tables(&self) -> f64 {
        self.lowest_value_across_all_tables
    }

    pub fn table(&self, line: Line) -> &FinalizedTable {
        &self.tables[line.index()]
    }

    /// All tables in [`Line::ALL`] order
    pub fn tables(&self) -> &[FinalizedTable] {
        &self.tables
    }

    /// Vertices of every line, concatenated in [`Line::ALL`] order
    pub fn vertices(&self, z_scale: f64) -> Vec<Point3<f64>> {
        self.tables.iter()
            .flat_map(|table| table.vertices(z_scale))
            .collect()
    }

    /// Peak to valley height across every station of the plate, in inches
    pub fn flatness(&self) -> f64 {
        let mut min_z = f64::MAX;
        let mut max_z = f64::MIN;
        for vertex in self.vertices(1.) {
            min_z = min_z.min(vertex.z);
            max_z = max_z.max(vertex.z);
        }

        max_z - min_z
    }
}

fn first(column: &[f64]) -> f64 {
    column[0]
}

fn last(column: &[f64]) -> f64 {
    column[column.len() - 1]
}
