//! moody - Moody method reduction of surface plate autocollimator surveys
//!
//! Readings taken along the eight lines of the Union Jack pattern (two
//! diagonals, four perimeter edges, two center lines) are reduced line by line
//! into heights above the lowest point of the plate:
//!
//! - **Rounding** - worksheet precision rounding applied to every column
//! - **Geometry** - identity and orientation of the eight lines
//! - **Plate** - derived plate constants and station placement
//! - **Table** - the per-line column pipeline
//! - **Report** - cross-line wiring and the plate-wide baseline
//! - **Uncertainty** - Monte Carlo spread of the flatness
//!
//! # Example
//!
//! ```text
//! use moody::{Survey, Line};
//!
//! let survey = Survey::load_from_file("data/union_jack_48x72.toml")?;
//! let report = survey.report()?;
//!
//! let top = report.table(Line::TopStartingDiagonal);
//! println!("{:?}", top.baseline_linear_displacement());
//! println!("flatness {:.1} uin", report.flatness() * 1e6);
//! ```

pub mod error;
pub mod geometry;
pub mod plate;
pub mod report;
pub mod rounding;
pub mod survey;
pub mod table;
pub mod uncertainty;

// Re-export commonly used types
pub use error::{MoodyError, Result};
pub use geometry::{Direction, Line, LineKind, LineSegment, Orientation};
pub use plate::{StationCounts, SurfacePlateConfig};
pub use report::{Report, SurveyReadings};
pub use rounding::round_to;
pub use survey::Survey;
pub use table::{
    mid_station_value, perimeter_mid_station_value, Correction, DraftTable,
    FinalizedTable, Linkage,
};
pub use uncertainty::{estimate_flatness, Bounds, FlatnessEstimate};
