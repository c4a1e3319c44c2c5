//! Closed-form break frequencies between two lumped elements.

use log::debug;

use crate::constants::TWO_PI;
use crate::errors::{ImpedanceError, Result};
use crate::math::Scalar;

use super::component::ElementKind;
use super::network::Impedance;
use super::overrides::Overrides;

impl Impedance {
    /// Frequency (Hz) at which the impedance magnitudes of two elements of this tree are equal.
    ///
    /// `labels` holds exactly two whitespace-separated element labels, e.g.
    /// `"R1 C1"`. The order of the labels does not matter.
    pub fn break_frequency(&self, labels: &str, overrides: &Overrides) -> Result<Scalar> {
        let labels: Vec<&str> = labels.split_whitespace().collect();
        let [a, b] = labels.as_slice() else {
            return Err(ImpedanceError::Configuration(format!(
                "expected two element labels for the break frequency calculation, got {}",
                labels.len()
            )));
        };
        let a = self.find(a)?;
        let b = self.find(b)?;
        break_frequency_between(&a, &b, overrides)
    }
}

/// Frequency (Hz) at which the impedance magnitudes of elements `a` and `b` are equal.
///
/// Supported pairs are R-L (`R/2πL`), R-C (`1/2πRC`) and L-C (`1/2π√LC`).
pub fn break_frequency_between(a: &Impedance, b: &Impedance, overrides: &Overrides) -> Result<Scalar> {
    let (Some(first), Some(second)) = (a.as_element(), b.as_element()) else {
        return Err(ImpedanceError::UnsupportedPair(format!(
            "break frequencies are defined between lumped elements only, got '{a}' and '{b}'"
        )));
    };

    let mut pair = [
        (first.kind(), first.resolve_value(overrides)?),
        (second.kind(), second.resolve_value(overrides)?),
    ];
    pair.sort_by_key(|(kind, _)| rank(*kind));

    let f = match pair {
        [(ElementKind::Resistor, r), (ElementKind::Inductor, l)] => r / TWO_PI / l,
        [(ElementKind::Resistor, r), (ElementKind::Capacitor, c)] => 1.0 / TWO_PI / r / c,
        [(ElementKind::Inductor, l), (ElementKind::Capacitor, c)] => 1.0 / TWO_PI / (l * c).sqrt(),
        _ => {
            return Err(ImpedanceError::UnsupportedPair(format!(
                "expected two lumped elements of different kinds, got '{}' and '{}'",
                first.label(),
                second.label()
            )))
        }
    };
    debug!("break frequency of {} and {}: {f} Hz", first.label(), second.label());
    Ok(f)
}

const fn rank(kind: ElementKind) -> u8 {
    match kind {
        ElementKind::Resistor => 0,
        ElementKind::Inductor => 1,
        ElementKind::Capacitor => 2,
    }
}
