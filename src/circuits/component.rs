use std::fmt;

use log::trace;

use crate::errors::{ImpedanceError, Result};
use crate::math::{CScalar, Scalar};

use super::overrides::Overrides;

/// Kind of lumped element.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Ideal resistor (ohms).
    Resistor,
    /// Ideal inductor (henries).
    Inductor,
    /// Ideal capacitor (farads).
    Capacitor,
}

impl ElementKind {
    /// Reference designator prefix (`R`, `L` or `C`).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Resistor => "R",
            Self::Inductor => "L",
            Self::Capacitor => "C",
        }
    }

    /// Unit symbol of the element value.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Resistor => "Ω",
            Self::Inductor => "H",
            Self::Capacitor => "F",
        }
    }

    /// Impedance of an element of this kind with `value` at angular frequency `omega`.
    ///
    /// A capacitor at `omega == 0` evaluates to `0 - j∞`.
    #[must_use]
    pub fn impedance(self, value: Scalar, omega: Scalar) -> CScalar {
        match self {
            Self::Resistor => CScalar::new(value, 0.0),
            Self::Inductor => CScalar::new(0.0, omega * value),
            Self::Capacitor => CScalar::new(0.0, -1.0 / (omega * value)),
        }
    }
}

/// Subscript appended to a reference designator, e.g. the `1` of `R1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscript(String);

impl Subscript {
    /// Text of the subscript.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Subscript {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Subscript {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for Subscript {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<char> for Subscript {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

macro_rules! subscript_from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Subscript {
            fn from(value: $t) -> Self {
                Self(value.to_string())
            }
        })*
    };
}

subscript_from_integer!(i32, i64, u32, u64, usize);

/// Element value as supplied by the caller.
///
/// Integer and real inputs are kept apart so the display form matches what was
/// written: `50` stays `50` while `10.0` stays `10.0`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Integral value.
    Integer(i64),
    /// Real value.
    Real(Scalar),
}

impl Value {
    /// Numeric value as a scalar.
    #[must_use]
    pub fn as_scalar(self) -> Scalar {
        match self {
            Self::Integer(v) => v as Scalar,
            Self::Real(v) => v,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => f.write_str(&format_real(v)),
        }
    }
}

/// Shortest round-trip text of `x`.
///
/// Decimal notation carries at least one fractional digit. Exponent notation
/// (`1e-06`, `2.5e+16`) is used when the decimal exponent is below -4 or at
/// least 16, with a signed exponent of at least two digits.
#[must_use]
pub fn format_real(x: Scalar) -> String {
    if x.is_nan() {
        return "nan".to_owned();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_owned();
    }

    let sci = format!("{x:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let mut text = format!("{x}");
        if !text.contains('.') {
            text.push_str(".0");
        }
        text
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

/// Lumped R, L or C leaf of an impedance tree.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    kind: ElementKind,
    subscript: Option<Subscript>,
    value: Option<Value>,
    label: String,
}

impl Element {
    /// Creates an element of `kind` with no subscript and no value.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            subscript: None,
            value: None,
            label: kind.prefix().to_owned(),
        }
    }

    /// Creates a resistor.
    #[must_use]
    pub fn resistor() -> Self {
        Self::new(ElementKind::Resistor)
    }

    /// Creates an inductor.
    #[must_use]
    pub fn inductor() -> Self {
        Self::new(ElementKind::Inductor)
    }

    /// Creates a capacitor.
    #[must_use]
    pub fn capacitor() -> Self {
        Self::new(ElementKind::Capacitor)
    }

    /// Sets the subscript, which also fixes the label.
    #[must_use]
    pub fn with_subscript(mut self, subscript: impl Into<Subscript>) -> Self {
        let subscript = subscript.into();
        self.label = format!("{}{}", self.kind.prefix(), subscript);
        self.subscript = Some(subscript);
        self
    }

    /// Sets the stored value in the kind's unit.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Element kind.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Subscript, if one was given.
    #[must_use]
    pub const fn subscript(&self) -> Option<&Subscript> {
        self.subscript.as_ref()
    }

    /// Stored value, if one was given.
    #[must_use]
    pub const fn value(&self) -> Option<Value> {
        self.value
    }

    /// Prefix followed by the subscript, e.g. `R1`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value used for evaluation: the override for this label, else the stored value.
    pub fn resolve_value(&self, overrides: &Overrides) -> Result<Scalar> {
        if let Some(v) = overrides.get(&self.label) {
            trace!("{} overridden with {v}", self.label);
            return Ok(v);
        }
        self.value
            .map(Value::as_scalar)
            .ok_or_else(|| ImpedanceError::MissingValue {
                label: self.label.clone(),
            })
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}[{}{}]", self.label, v, self.kind.unit()),
            None => f.write_str(&self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::angular_frequency;

    #[test]
    fn label_joins_prefix_and_subscript() {
        assert_eq!(Element::resistor().with_subscript("test").label(), "Rtest");
        assert_eq!(Element::inductor().with_subscript(2).label(), "L2");
        assert_eq!(Element::capacitor().label(), "C");
    }

    #[test]
    fn display_includes_value_and_unit() {
        let r = Element::resistor().with_subscript("1").with_value(50);
        assert_eq!(r.to_string(), "R1[50Ω]");
        assert_eq!(Element::inductor().with_value(2e-6).to_string(), "L[2e-06H]");
        assert_eq!(Element::capacitor().with_subscript("x").to_string(), "Cx");
    }

    #[test]
    fn real_values_keep_decimal_form() {
        assert_eq!(format_real(10.0), "10.0");
        assert_eq!(format_real(0.5), "0.5");
        assert_eq!(format_real(1e-6), "1e-06");
        assert_eq!(format_real(2.2e-9), "2.2e-09");
        assert_eq!(format_real(0.0001), "0.0001");
        assert_eq!(format_real(1e16), "1e+16");
        assert_eq!(format_real(1e15), "1000000000000000.0");
        assert_eq!(format_real(-600e-3), "-0.6");
    }

    #[test]
    fn resistor_is_frequency_independent() {
        let z = ElementKind::Resistor.impedance(50.0, angular_frequency(42e3));
        assert_relative_eq!(z.re, 50.0);
        assert_relative_eq!(z.im, 0.0);
    }

    #[test]
    fn reactive_elements_have_opposite_signs() {
        let omega = angular_frequency(42e3);
        let zl = ElementKind::Inductor.impedance(1e-6, omega);
        let zc = ElementKind::Capacitor.impedance(1e-9, omega);
        assert_relative_eq!(zl.im, omega * 1e-6, max_relative = 1.0e-12);
        assert_relative_eq!(zc.im, -1.0 / (omega * 1e-9), max_relative = 1.0e-12);
    }

    #[test]
    fn capacitor_at_dc_is_open() {
        let z = ElementKind::Capacitor.impedance(1e-9, 0.0);
        assert!(z.norm().is_infinite());
    }

    #[test]
    fn override_takes_precedence() {
        let r = Element::resistor().with_subscript("1").with_value(10);
        let overrides = Overrides::new().with("R1", 20.0);
        assert_relative_eq!(r.resolve_value(&overrides).unwrap(), 20.0);
        assert_relative_eq!(r.resolve_value(&Overrides::new()).unwrap(), 10.0);
    }

    #[test]
    fn unresolved_value_is_reported() {
        let c = Element::capacitor().with_subscript("x");
        let err = c.resolve_value(&Overrides::new()).unwrap_err();
        assert_eq!(err, ImpedanceError::MissingValue { label: "Cx".into() });
    }
}
