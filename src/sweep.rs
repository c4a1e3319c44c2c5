//! Frequency grids, sweep configuration and post-processing helpers.

use crate::errors::{ImpedanceError, Result};
use crate::math::{CScalar, Scalar};

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` samples spaced evenly in decades from `10^start_exp` to `10^stop_exp`.
#[must_use]
pub fn logspace(start_exp: Scalar, stop_exp: Scalar, n: usize) -> Vec<Scalar> {
    linspace(start_exp, stop_exp, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

/// Generates `n` logarithmically spaced samples between `start` and `stop` (Hz).
///
/// # Panics
///
/// Panics unless both bounds are positive.
#[must_use]
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    assert!(start_hz > 0.0 && stop_hz > 0.0);
    logspace(start_hz.log10(), stop_hz.log10(), n)
}

/// Magnitude of complex sequence.
#[must_use]
pub fn mag<'a>(values: impl IntoIterator<Item = &'a CScalar>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.norm()).collect()
}

/// Magnitude in dB (20*log10(|x|)), clamping very small values.
#[must_use]
pub fn mag_db<'a>(values: impl IntoIterator<Item = &'a CScalar>) -> Vec<Scalar> {
    const MIN: Scalar = 1e-300;
    values
        .into_iter()
        .map(|v| 20.0 * (v.norm().max(MIN)).log10())
        .collect()
}

/// Phase in radians of complex sequence.
#[must_use]
pub fn phase_rad<'a>(values: impl IntoIterator<Item = &'a CScalar>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.arg()).collect()
}

/// Phase in degrees of complex sequence.
#[must_use]
pub fn phase_deg<'a>(values: impl IntoIterator<Item = &'a CScalar>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.arg().to_degrees()).collect()
}

/// Spacing of the points of a sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    /// Equal steps in hertz.
    Linear,
    /// Equal steps in decades.
    #[default]
    Logarithmic,
}

/// Frequency grid description for an impedance sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// First frequency (Hz).
    pub start_hz: Scalar,
    /// Last frequency (Hz).
    pub stop_hz: Scalar,
    /// Number of points, endpoints included.
    pub points: usize,
    /// Point spacing.
    pub spacing: Spacing,
}

impl SweepConfig {
    /// Creates a logarithmic sweep configuration.
    #[must_use]
    pub fn logarithmic(start_hz: Scalar, stop_hz: Scalar, points: usize) -> Self {
        Self {
            start_hz,
            stop_hz,
            points,
            spacing: Spacing::Logarithmic,
        }
    }

    /// Creates a linear sweep configuration.
    #[must_use]
    pub fn linear(start_hz: Scalar, stop_hz: Scalar, points: usize) -> Self {
        Self {
            start_hz,
            stop_hz,
            points,
            spacing: Spacing::Linear,
        }
    }

    /// Checks the bounds and point count.
    pub fn validate(&self) -> Result<()> {
        if self.points == 0 {
            return Err(ImpedanceError::Configuration("sweep needs at least one point".into()));
        }
        if !self.start_hz.is_finite() || !self.stop_hz.is_finite() {
            return Err(ImpedanceError::Configuration(format!(
                "sweep bounds must be finite, got {}..{}",
                self.start_hz, self.stop_hz
            )));
        }
        if self.start_hz < 0.0 || self.stop_hz < self.start_hz {
            return Err(ImpedanceError::Configuration(format!(
                "sweep bounds must satisfy 0 <= start <= stop, got {}..{}",
                self.start_hz, self.stop_hz
            )));
        }
        if self.spacing == Spacing::Logarithmic && self.start_hz <= 0.0 {
            return Err(ImpedanceError::Configuration(
                "logarithmic sweeps need a positive start frequency".into(),
            ));
        }
        Ok(())
    }

    /// Frequencies (Hz) of the sweep.
    pub fn frequencies(&self) -> Result<Vec<Scalar>> {
        self.validate()?;
        Ok(match self.spacing {
            Spacing::Linear => linspace(self.start_hz, self.stop_hz, self.points),
            Spacing::Logarithmic => logspace_hz(self.start_hz, self.stop_hz, self.points),
        })
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::logarithmic(1.0e3, 1.0e9, 1000)
    }
}
