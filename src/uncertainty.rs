//! Monte Carlo estimate of how far the flatness can move given the
//! resolution of the autocollimator
//!
//! Every reading is resampled within its bounds, the whole survey is reduced
//! again, and the spread of the resulting flatness values is reported.

use crate::error::{MoodyError, Result};
use crate::geometry::Line;
use crate::plate::SurfacePlateConfig;
use crate::report::{Report, SurveyReadings};
use rand::Rng;
use serde::Serialize;

/// Different bounds a value can have
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// An exact value
    Constant(f64),

    /// A uniformly sampled inclusive range [min, max]
    Range(f64, f64),
}

impl Bounds {
    /// Bounds for a reading of `value` known to within `uncertainty`
    pub fn around(value: f64, uncertainty: f64) -> Self {
        if uncertainty == 0. {
            Self::Constant(value)
        } else {
            Self::Range(value - uncertainty, value + uncertainty)
        }
    }

    /// Randomly sample the bounds for a value
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Constant(val)   => val,
            Self::Range(min, max) => rng.gen_range(min..=max),
        }
    }
}

/// Spread of the flatness over all trials, in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlatnessEstimate {
    /// Flatness of the readings as entered
    pub nominal: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub trials: usize,
}

/// Reduce `trials` perturbed copies of `readings`, each reading drawn
/// uniformly within `reading_uncertainty_arcsec` of its entered value
pub fn estimate_flatness<R: Rng + ?Sized>(plate: &SurfacePlateConfig,
        readings: &SurveyReadings, reading_uncertainty_arcsec: f64, trials: usize,
        rng: &mut R) -> Result<FlatnessEstimate> {
    if trials == 0 {
        return Err(MoodyError::InvalidUncertainty {
            reason: "at least one trial is required".to_string(),
        });
    }
    if !reading_uncertainty_arcsec.is_finite() || reading_uncertainty_arcsec < 0. {
        return Err(MoodyError::InvalidUncertainty {
            reason: format!("reading uncertainty must be a non-negative number of \
                arc-seconds, got {}", reading_uncertainty_arcsec),
        });
    }

    let nominal = Report::build(plate, readings)?.flatness();

    // Every range must be representable, or sampling it overflows
    for line in Line::ALL {
        for &reading in readings.get(line) {
            let (low, high) = (reading - reading_uncertainty_arcsec,
                reading + reading_uncertainty_arcsec);
            if !(high - low).is_finite() {
                return Err(MoodyError::InvalidUncertainty {
                    reason: format!("reading uncertainty {} arc-sec is too large to \
                        sample around the {} reading {}", reading_uncertainty_arcsec,
                        line, reading),
                });
            }
        }
    }

    let mut min = f64::MAX;
    let mut max = f64::MIN;
    let mut sum = 0.;
    let mut perturbed = readings.clone();
    for trial in 0..trials {
        // Resample every reading
        for line in Line::ALL {
            let entered = readings.get(line);
            for (slot, &reading) in perturbed.get_mut(line).iter_mut().zip(entered) {
                *slot = Bounds::around(reading, reading_uncertainty_arcsec).sample(rng);
            }
        }

        let flatness = Report::build(plate, &perturbed)?.flatness();
        tracing::trace!(trial, flatness, "uncertainty trial");

        min = min.min(flatness);
        max = max.max(flatness);
        sum += flatness;
    }

    let estimate = FlatnessEstimate {
        nominal,
        min,
        max,
        mean: sum / trials as f64,
        trials,
    };
    tracing::info!(?estimate, "flatness uncertainty estimated");

    Ok(estimate)
}
