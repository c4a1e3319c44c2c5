//! Frequency-domain evaluation of impedance trees.

use std::io;
use std::io::Write;

use log::trace;
use nalgebra::DVector;

use crate::constants::angular_frequency;
use crate::errors::{ImpedanceError, Result};
use crate::math::{reciprocal, CScalar, Scalar};

use super::network::{ConnectionKind, Impedance};
use super::overrides::Overrides;

/// Complex impedance response over a frequency grid.
pub type Response = DVector<CScalar>;

/// Frequencies an impedance can be evaluated at.
///
/// A scalar frequency yields a complex scalar; a sequence yields a [`Response`]
/// of the same length.
pub trait Frequencies {
    /// Shape of the evaluated impedance.
    type Output;

    /// Evaluates `z` at these frequencies (Hz).
    fn evaluate_on(self, z: &Impedance, overrides: &Overrides) -> Result<Self::Output>;
}

impl Frequencies for Scalar {
    type Output = CScalar;

    fn evaluate_on(self, z: &Impedance, overrides: &Overrides) -> Result<CScalar> {
        z.impedance_at(self, overrides)
    }
}

impl Frequencies for &[Scalar] {
    type Output = Response;

    fn evaluate_on(self, z: &Impedance, overrides: &Overrides) -> Result<Response> {
        z.response(self, overrides)
    }
}

impl Frequencies for &Vec<Scalar> {
    type Output = Response;

    fn evaluate_on(self, z: &Impedance, overrides: &Overrides) -> Result<Response> {
        z.response(self, overrides)
    }
}

impl Frequencies for Vec<Scalar> {
    type Output = Response;

    fn evaluate_on(self, z: &Impedance, overrides: &Overrides) -> Result<Response> {
        z.response(&self, overrides)
    }
}

impl<const N: usize> Frequencies for [Scalar; N] {
    type Output = Response;

    fn evaluate_on(self, z: &Impedance, overrides: &Overrides) -> Result<Response> {
        z.response(&self, overrides)
    }
}

impl Frequencies for &DVector<Scalar> {
    type Output = Response;

    fn evaluate_on(self, z: &Impedance, overrides: &Overrides) -> Result<Response> {
        z.response(self.as_slice(), overrides)
    }
}

impl Impedance {
    /// Complex impedance (ohms) at `frequencies` (Hz).
    ///
    /// Element values come from `overrides` by label first, then from the
    /// stored value. A capacitor at 0 Hz evaluates to an infinite reactance
    /// instead of failing.
    pub fn evaluate<F: Frequencies>(&self, frequencies: F, overrides: &Overrides) -> Result<F::Output> {
        frequencies.evaluate_on(self, overrides)
    }

    /// Complex impedance at a single frequency (Hz).
    pub fn impedance_at(&self, hz: Scalar, overrides: &Overrides) -> Result<CScalar> {
        let response = self.response(std::slice::from_ref(&hz), overrides)?;
        Ok(response[0])
    }

    /// Complex impedance at every frequency of `frequencies` (Hz).
    pub fn response(&self, frequencies: &[Scalar], overrides: &Overrides) -> Result<Response> {
        validate_frequencies(frequencies)?;
        trace!("evaluating {self} at {} frequencies", frequencies.len());
        self.response_unchecked(frequencies, overrides)
    }

    /// Evaluates the frequency axis on the rayon pool; results match [`Self::response`].
    #[cfg(feature = "parallel")]
    pub fn evaluate_par(&self, frequencies: &[Scalar], overrides: &Overrides) -> Result<Response> {
        use rayon::prelude::*;

        validate_frequencies(frequencies)?;
        let points = frequencies
            .par_iter()
            .map(|&hz| {
                self.response_unchecked(std::slice::from_ref(&hz), overrides)
                    .map(|z| z[0])
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DVector::from_vec(points))
    }

    fn response_unchecked(&self, frequencies: &[Scalar], overrides: &Overrides) -> Result<Response> {
        let n = frequencies.len();
        match self {
            Self::Element(element) => {
                let value = element.resolve_value(overrides)?;
                let kind = element.kind();
                Ok(DVector::from_iterator(
                    n,
                    frequencies
                        .iter()
                        .map(|&hz| kind.impedance(value, angular_frequency(hz))),
                ))
            }
            Self::Composite(node) => {
                let mut total = Response::zeros(n);
                match node.connection_kind() {
                    ConnectionKind::Series => {
                        for child in node.children() {
                            total += child.response_unchecked(frequencies, overrides)?;
                        }
                        Ok(total)
                    }
                    ConnectionKind::Parallel => {
                        for child in node.children() {
                            total += child.response_unchecked(frequencies, overrides)?.map(reciprocal);
                        }
                        Ok(total.map(reciprocal))
                    }
                }
            }
        }
    }
}

fn validate_frequencies(frequencies: &[Scalar]) -> Result<()> {
    match frequencies.iter().find(|hz| !hz.is_finite() || **hz < 0.0) {
        Some(hz) => Err(ImpedanceError::Configuration(format!(
            "frequencies must be finite and non-negative, got {hz}"
        ))),
        None => Ok(()),
    }
}

/// Result of evaluating an impedance at a single frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    /// Cyclic frequency in Hz.
    pub frequency_hz: Scalar,
    /// Complex impedance in ohms.
    pub impedance: CScalar,
}

/// Evaluates `z` across `frequencies` (Hz), pairing each frequency with its impedance.
pub fn sweep_impedance(
    z: &Impedance,
    frequencies: &[Scalar],
    overrides: &Overrides,
) -> Result<Vec<FrequencyPoint>> {
    let response = z.response(frequencies, overrides)?;
    Ok(frequencies
        .iter()
        .zip(response.iter())
        .map(|(&frequency_hz, &impedance)| FrequencyPoint {
            frequency_hz,
            impedance,
        })
        .collect())
}

/// Writes `FrequencyPoint` vector to a CSV writer.
pub fn write_frequency_points_csv<W: Write>(mut w: W, points: &[FrequencyPoint]) -> io::Result<()> {
    writeln!(w, "f_hz,ReZ,ImZ")?;
    for p in points {
        writeln!(w, "{:.16e},{:.16e},{:.16e}", p.frequency_hz, p.impedance.re, p.impedance.im)?;
    }
    Ok(())
}
