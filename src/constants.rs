//! Baseline constants and unit conversions.

use std::f64::consts::PI;

/// Two times π, the factor between cyclic and angular frequency.
pub const TWO_PI: f64 = 2.0 * PI;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    TWO_PI * hz
}

/// Returns the linear frequency in hertz for an angular frequency `omega`.
#[inline]
#[must_use]
pub fn cyclic_frequency(omega: f64) -> f64 {
    omega / TWO_PI
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn angular_and_cyclic_are_inverse() {
        let hz = 42.0e3;
        assert_relative_eq!(cyclic_frequency(angular_frequency(hz)), hz, max_relative = 1.0e-12);
    }
}
