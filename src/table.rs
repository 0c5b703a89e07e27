//! Per-line reduction tables
//!
//! A line goes through two stages. [`DraftTable`] holds everything that can be
//! worked out from the line's own readings and the boundary values handed to
//! it by its neighbours (columns 1 through 6). [`FinalizedTable`] adds the
//! baseline columns 7 and 8, which need the lowest height across the whole
//! plate and so can only be produced by the report once every line exists.
//!
//! | Column | Contents                                        |
//! |--------|-------------------------------------------------|
//! | 1      | station number                                  |
//! | 2      | autocollimator reading (arc-seconds)            |
//! | 3      | angular displacement from the station 1 reading |
//! | 4      | cumulative displacement                         |
//! | 5      | correction factor                               |
//! | 6      | displacement from the datum plane               |
//! | 7      | displacement from the baseline                  |
//! | 8      | displacement from the baseline in inches        |

use crate::error::{MoodyError, Result};
use crate::geometry::{Line, Orientation};
use crate::rounding::round_to;
use nalgebra::{Point2, Point3};
use serde::Serialize;
use std::f64::consts::PI;
use std::ops::Deref;

/// One arc-second in radians
pub const ARC_SECOND_RADIANS: f64 = PI / 648_000.;

/// Value at the middle of `values`: the middle element for odd lengths, the
/// mean of the two middle elements for even lengths.
pub fn mid_station_value(values: &[f64]) -> Result<f64> {
    let len = values.len();
    if len == 0 {
        return Err(MoodyError::DegenerateMidpoint);
    }

    if len % 2 == 1 {
        Ok(values[len / 2])
    } else {
        Ok((values[len / 2 - 1] + values[len / 2]) / 2.)
    }
}

/// Mid-station value as the perimeter and center worksheets take it
///
/// Odd lengths agree with [`mid_station_value`]. For even lengths the sheets
/// average the element at `(len / 2 - 1) / 2` with the one at `len / 2`, which
/// is not the middle pair. Kept as the sheets have it.
pub fn perimeter_mid_station_value(values: &[f64]) -> Result<f64> {
    let len = values.len();
    if len == 0 {
        return Err(MoodyError::DegenerateMidpoint);
    }

    if len % 2 == 1 {
        Ok(values[len / 2])
    } else {
        Ok((values[(len / 2 - 1) / 2] + values[len / 2]) / 2.)
    }
}

/// Boundary values a perimeter or center line inherits from its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Linkage {
    /// What column 5 (and so column 6) should read at the first station
    pub first_value_of_column5: f64,

    /// What column 6 should read at the last station
    pub last_value_of_column6: f64,
}

/// How a line's correction factor (column 5) is worked out
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Correction {
    /// Zero the line's net drift and center it on its middle station
    Diagonal,

    /// Spread the mismatch with the inherited end values linearly along the line
    Perimeter(Linkage),

    /// As [`Correction::Perimeter`], plus the column 6a shift
    Center {
        linkage:     Linkage,
        orientation: Orientation,
    },
}

impl Correction {
    /// Compute column 5 from column 4, returning the per-station step and the
    /// rounded column
    fn column5(&self, cumulative: &[f64]) -> Result<(f64, Vec<f64>)> {
        let stations = cumulative.len();
        let last = cumulative[stations - 1];
        let steps = (stations - 1) as f64;

        match *self {
            Self::Diagonal => {
                let step = -last / steps;
                let center = 0.5 * last - mid_station_value(cumulative)?;

                let column = (0..stations)
                    .map(|ii| round_to(step * ii as f64 + center, 2))
                    .collect();
                Ok((step, column))
            }
            Self::Perimeter(linkage) | Self::Center { linkage, .. } => {
                let difference = linkage.last_value_of_column6 - last;
                let step = (linkage.first_value_of_column5 - difference) / steps;

                let column = (0..stations)
                    .map(|ii| round_to(difference + (stations - 1 - ii) as f64 * step, 2))
                    .collect();
                Ok((step, column))
            }
        }
    }
}

/// Intersection values spliced onto the ends of the display columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Splice {
    pub leading:  f64,
    pub trailing: f64,
}

/// Columns 1 through 6 of a line
#[derive(Debug, Clone, Serialize)]
pub struct DraftTable {
    line: Line,
    reflector_foot_spacing_inches: f64,
    correction: Correction,

    /// Column 2, with the station-0 zero reference in front
    readings: Vec<f64>,

    /// Column 3
    angular_displacement: Vec<f64>,

    /// Column 4
    cumulative_displacement: Vec<f64>,

    /// Per-station step used to build column 5
    correction_step: f64,

    /// Column 5
    correction_factor: Vec<f64>,

    /// Column 6
    datum_displacement: Vec<f64>,

    /// Column 6a, center lines only
    shifted_datum_displacement: Option<Vec<f64>>,

    splice: Option<Splice>,
}

impl DraftTable {
    /// Reduce `readings` (arc-seconds, as entered) for `line`
    pub fn new(line: Line, readings: &[f64], reflector_foot_spacing_inches: f64,
            correction: Correction) -> Result<Self> {
        if readings.is_empty() {
            return Err(MoodyError::EmptyReadings { line });
        }
        if let Some((index, &value)) = readings.iter().enumerate()
                .find(|(_, r)| !r.is_finite()) {
            return Err(MoodyError::InvalidReading { line, index, value });
        }
        if readings.len() > 1 && readings.iter().all(|&r| r == readings[0]) {
            tracing::warn!(%line, "all readings are identical");
        }

        // Station 0 is the fixed zero reference
        let readings: Vec<f64> = std::iter::once(0.)
            .chain(readings.iter().copied())
            .collect();

        let angular_displacement = angular_displacement(&readings);
        let cumulative_displacement = cumulative_displacement(&angular_displacement);
        let (correction_step, correction_factor) =
            correction.column5(&cumulative_displacement)?;

        let datum_displacement: Vec<f64> = cumulative_displacement.iter()
            .zip(&correction_factor)
            .map(|(cum, cf)| round_to(cum + cf, 2))
            .collect();

        let shifted_datum_displacement = match correction {
            Correction::Center { orientation: Orientation::Horizontal, .. } => {
                let mid = perimeter_mid_station_value(&datum_displacement)?;
                Some(datum_displacement.iter().map(|v| round_to(v - mid, 2)).collect())
            }
            Correction::Center { orientation: Orientation::Vertical, .. } => {
                Some(datum_displacement.clone())
            }
            Correction::Diagonal | Correction::Perimeter(_) => None,
        };

        tracing::debug!(%line, stations = readings.len(), correction_step,
            "reduced line");

        Ok(Self {
            line,
            reflector_foot_spacing_inches,
            correction,
            readings,
            angular_displacement,
            cumulative_displacement,
            correction_step,
            correction_factor,
            datum_displacement,
            shifted_datum_displacement,
            splice: None,
        })
    }

    /// Attach the intersection values shown at either end of the display
    /// columns
    pub fn with_splice(mut self, leading: f64, trailing: f64) -> Self {
        self.splice = Some(Splice { leading, trailing });
        self
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn correction(&self) -> Correction {
        self.correction
    }

    pub fn reflector_foot_spacing_inches(&self) -> f64 {
        self.reflector_foot_spacing_inches
    }

    pub fn num_stations(&self) -> usize {
        self.readings.len()
    }

    /// Column 1
    pub fn station_numbers(&self) -> Vec<usize> {
        (1..=self.num_stations()).collect()
    }

    /// Column 2
    pub fn readings(&self) -> &[f64] {
        &self.readings
    }

    /// Column 3
    pub fn angular_displacement(&self) -> &[f64] {
        &self.angular_displacement
    }

    /// Column 4
    pub fn cumulative_displacement(&self) -> &[f64] {
        &self.cumulative_displacement
    }

    pub fn correction_step(&self) -> f64 {
        self.correction_step
    }

    /// Column 5
    pub fn correction_factor(&self) -> &[f64] {
        &self.correction_factor
    }

    /// Column 6
    pub fn datum_displacement(&self) -> &[f64] {
        &self.datum_displacement
    }

    /// Column 6a
    pub fn shifted_datum_displacement(&self) -> Option<&[f64]> {
        self.shifted_datum_displacement.as_deref()
    }

    pub fn splice(&self) -> Option<Splice> {
        self.splice
    }

    /// Heights the baseline is taken from: column 6a where the line has one,
    /// column 6 otherwise
    pub fn heights(&self) -> &[f64] {
        self.shifted_datum_displacement.as_deref()
            .unwrap_or(&self.datum_displacement)
    }

    /// Lowest of [`DraftTable::heights`]
    pub fn lowest_value(&self) -> f64 {
        self.heights().iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Column 5 with the leading intersection value in front
    pub fn spliced_correction_factor(&self) -> Vec<f64> {
        let mut column = Vec::with_capacity(self.correction_factor.len() + 1);
        if let Some(splice) = self.splice {
            column.push(splice.leading);
        }
        column.extend_from_slice(&self.correction_factor);
        column
    }

    /// Column 6 with the intersection values on both ends
    pub fn spliced_datum_displacement(&self) -> Vec<f64> {
        let mut column = Vec::with_capacity(self.datum_displacement.len() + 2);
        if let Some(splice) = self.splice {
            column.push(splice.leading);
        }
        column.extend_from_slice(&self.datum_displacement);
        if let Some(splice) = self.splice {
            column.push(splice.trailing);
        }
        column
    }
}

/// Column 3: each reading relative to the first real station's reading
fn angular_displacement(readings: &[f64]) -> Vec<f64> {
    let zero = readings.get(1).copied().unwrap_or(0.);

    readings.iter().enumerate()
        .map(|(ii, reading)| if ii == 0 { 0. } else { round_to(reading - zero, 2) })
        .collect()
}

/// Column 4: running sum over the already rounded column 3
fn cumulative_displacement(angular: &[f64]) -> Vec<f64> {
    let mut sum = 0.;
    angular.iter()
        .map(|displacement| {
            sum = round_to(sum + displacement, 2);
            sum
        })
        .collect()
}

/// A line with its baseline columns
///
/// Only the report builds these, after the plate-wide lowest height is known.
#[derive(Debug, Clone, Serialize)]
pub struct FinalizedTable {
    #[serde(flatten)]
    draft: DraftTable,

    lowest_value_across_all_tables: f64,

    /// Column 7
    baseline_displacement: Vec<f64>,

    /// Column 8
    baseline_linear_displacement: Vec<f64>,

    /// Station locations on the plate footprint
    positions: Vec<Point2<f64>>,
}

impl FinalizedTable {
    pub(crate) fn finalize(draft: DraftTable, lowest_value_across_all_tables: f64,
            positions: Vec<Point2<f64>>) -> Self {
        let lift = lowest_value_across_all_tables.abs();

        let baseline_displacement: Vec<f64> = draft.heights().iter()
            .map(|height| round_to(height + lift, 2))
            .collect();

        // Tilt over one foot spacing, as a height
        let baseline_linear_displacement = baseline_displacement.iter()
            .map(|v| round_to(v * ARC_SECOND_RADIANS.sin()
                * draft.reflector_foot_spacing_inches, 8))
            .collect();

        Self {
            draft,
            lowest_value_across_all_tables,
            baseline_displacement,
            baseline_linear_displacement,
            positions,
        }
    }

    pub fn draft(&self) -> &DraftTable {
        &self.draft
    }

    pub fn lowest_value_across_all_tables(&self) -> f64 {
        self.lowest_value_across_all_tables
    }

    /// Column 7
    pub fn baseline_displacement(&self) -> &[f64] {
        &self.baseline_displacement
    }

    /// Column 8
    pub fn baseline_linear_displacement(&self) -> &[f64] {
        &self.baseline_linear_displacement
    }

    pub fn positions(&self) -> &[Point2<f64>] {
        &self.positions
    }

    /// `(x, y, z)` per station, `z` being column 8 times `z_scale`
    pub fn vertices(&self, z_scale: f64) -> Vec<Point3<f64>> {
        self.positions.iter()
            .zip(&self.baseline_linear_displacement)
            .map(|(xy, z)| Point3::new(xy.x, xy.y, z * z_scale))
            .collect()
    }
}

impl Deref for FinalizedTable {
    type Target = DraftTable;

    fn deref(&self) -> &DraftTable {
        &self.draft
    }
}
