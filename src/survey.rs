//! Survey files
//!
//! A survey is a TOML file holding the plate dimensions, the readings for
//! every line and optionally how to run the uncertainty estimate:
//!
//! ```toml
//! [plate]
//! height_inches = 48.0
//! width_inches = 72.0
//! reflector_foot_spacing_inches = 4.0
//!
//! [readings]
//! top_starting_diagonal = [6.5, 6.0, 5.0]
//! # ... one array per line
//!
//! [uncertainty]
//! reading_arcsec = 0.1
//! trials = 200
//! seed = 7
//! ```

use crate::error::{MoodyError, Result};
use crate::plate::SurfacePlateConfig;
use crate::report::{Report, SurveyReadings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// `[plate]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateSection {
    pub height_inches: f64,
    pub width_inches: f64,
    pub reflector_foot_spacing_inches: f64,
}

/// `[uncertainty]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintySection {
    /// Half width of the uniform error applied to every reading
    pub reading_arcsec: f64,

    #[serde(default = "default_trials")]
    pub trials: usize,

    pub seed: Option<u64>,
}

fn default_trials() -> usize {
    100
}

/// A complete survey file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub plate: PlateSection,
    pub readings: SurveyReadings,

    #[serde(default)]
    pub uncertainty: Option<UncertaintySection>,
}

impl Survey {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MoodyError::ConfigInvalid {
            key: "survey".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| MoodyError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read survey file {}: {}", path.display(), e),
        })?;

        let survey = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded survey");
        Ok(survey)
    }

    pub fn plate_config(&self) -> Result<SurfacePlateConfig> {
        SurfacePlateConfig::new(
            self.plate.height_inches,
            self.plate.width_inches,
            self.plate.reflector_foot_spacing_inches,
        )
    }

    /// Reduce the survey
    pub fn report(&self) -> Result<Report> {
        Report::build(&self.plate_config()?, &self.readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
[plate]
height_inches = 8.0
width_inches = 12.0
reflector_foot_spacing_inches = 4.0

[readings]
top_starting_diagonal = [1.0, 1.5]
bottom_starting_diagonal = [2.0, 2.5]
north_perimeter = [1.0, 1.2]
east_perimeter = [0.5]
south_perimeter = [1.1, 0.9]
west_perimeter = [0.7]
horizontal_center = [1.0, 1.0]
vertical_center = [0.4]
"#;

    #[test]
    fn parses_without_uncertainty() {
        let survey = Survey::from_toml_str(SMALL).unwrap();
        assert_eq!(survey.plate.width_inches, 12.);
        assert_eq!(survey.readings.east_perimeter, vec![0.5]);
        assert!(survey.uncertainty.is_none());
    }

    #[test]
    fn uncertainty_trials_default() {
        let content = format!("{SMALL}\n[uncertainty]\nreading_arcsec = 0.2\n");
        let survey = Survey::from_toml_str(&content).unwrap();
        let uncertainty = survey.uncertainty.unwrap();
        assert_eq!(uncertainty.reading_arcsec, 0.2);
        assert_eq!(uncertainty.trials, 100);
        assert_eq!(uncertainty.seed, None);
    }

    #[test]
    fn small_survey_reduces() {
        let survey = Survey::from_toml_str(SMALL).unwrap();
        let report = survey.report().unwrap();
        assert_eq!(report.tables().len(), 8);
    }

    #[test]
    fn missing_line_is_a_config_error() {
        let content = SMALL.replace("vertical_center = [0.4]\n", "");
        assert!(matches!(Survey::from_toml_str(&content),
            Err(MoodyError::ConfigInvalid { .. })));
    }
}
