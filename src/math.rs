//! Shared numerical primitives.

use num_complex::Complex;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances.
pub type CScalar = Complex<Scalar>;

/// Reciprocal that follows the limits of an ideal network.
///
/// An infinite impedance (open circuit) becomes zero admittance and a zero
/// impedance (short circuit) becomes an infinite admittance. The plain
/// complex division yields `NaN` in both cases.
#[must_use]
pub fn reciprocal(z: CScalar) -> CScalar {
    if z.is_infinite() {
        CScalar::new(0.0, 0.0)
    } else if z.re == 0.0 && z.im == 0.0 {
        CScalar::new(Scalar::INFINITY, 0.0)
    } else {
        z.inv()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn reciprocal_of_open_circuit_is_zero() {
        let y = reciprocal(CScalar::new(0.0, Scalar::NEG_INFINITY));
        assert_eq!(y, CScalar::new(0.0, 0.0));
    }

    #[test]
    fn reciprocal_of_short_is_infinite() {
        assert!(reciprocal(CScalar::new(0.0, 0.0)).is_infinite());
    }

    #[test]
    fn reciprocal_matches_division() {
        let z = CScalar::new(3.0, 4.0);
        let y = reciprocal(z);
        assert_relative_eq!(y.re, 0.12, epsilon = 1.0e-12);
        assert_relative_eq!(y.im, -0.16, epsilon = 1.0e-12);
    }
}
