//! Bode magnitude data for impedance trees.
//!
//! Rendering is left to the caller. This module resolves the requested
//! sub-impedances, evaluates them over a frequency grid and computes the text
//! and anchor of each curve annotation, so any plotting backend can draw the
//! result directly.

use std::io;
use std::io::Write;
use std::str::FromStr;

use log::debug;
use nalgebra::DVector;

use crate::circuits::{ElementKind, Impedance, Overrides};
use crate::errors::{ImpedanceError, Result};
use crate::math::Scalar;

/// One entry of a whitespace-separated line list: `label` or `label:position_hz`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    /// Label of the sub-impedance to draw.
    pub label: String,
    /// Horizontal annotation position (Hz), if given.
    pub position_hz: Option<Scalar>,
}

impl FromStr for LineSpec {
    type Err = ImpedanceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            None => Ok(Self {
                label: s.to_owned(),
                position_hz: None,
            }),
            Some((label, position)) => {
                let position_hz = position.parse::<Scalar>().map_err(|e| {
                    ImpedanceError::Configuration(format!(
                        "invalid annotation position '{position}' for '{label}': {e}"
                    ))
                })?;
                Ok(Self {
                    label: label.to_owned(),
                    position_hz: Some(position_hz),
                })
            }
        }
    }
}

/// Parses a whitespace-separated line list.
///
/// A label given more than once keeps its first place in the list and takes
/// the last position given.
pub fn parse_line_specs(spec: &str) -> Result<Vec<LineSpec>> {
    let mut specs: Vec<LineSpec> = Vec::new();
    for token in spec.split_whitespace() {
        let parsed: LineSpec = token.parse()?;
        match specs.iter_mut().find(|s| s.label == parsed.label) {
            Some(existing) => existing.position_hz = parsed.position_hz,
            None => specs.push(parsed),
        }
    }
    Ok(specs)
}

/// Drawing role of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStyle {
    /// Impedance curve of the network or one of its sub-networks.
    Impedance,
    /// Reference asymptote, typically a single R, L or C.
    Reference,
}

/// Evaluated curve of one sub-impedance.
#[derive(Debug, Clone, PartialEq)]
pub struct BodeTrace {
    /// Label the trace was requested by.
    pub label: String,
    /// Drawing role.
    pub style: TraceStyle,
    /// Annotation text in TeX math notation.
    pub annotation: String,
    /// Index into the frequency grid where the annotation sits.
    pub annotation_index: usize,
    /// Impedance magnitude (ohms).
    pub magnitude: DVector<Scalar>,
    /// Impedance phase (degrees).
    pub phase_deg: DVector<Scalar>,
}

/// Frequency grid and every trace of one Bode magnitude plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BodeData {
    /// Frequencies (Hz).
    pub frequencies: Vec<Scalar>,
    /// Root trace first, then `zlines`, then `refzlines`.
    pub traces: Vec<BodeTrace>,
}

impl BodeData {
    /// Resolves and evaluates the root plus the requested sub-impedances.
    ///
    /// `zlines` entries default to an annotation at the last frequency and
    /// `refzlines` entries to the first. An entry naming the root only sets
    /// the root annotation position. Unknown labels and unresolved element
    /// values are errors.
    pub fn build(
        root: &Impedance,
        frequencies: &[Scalar],
        zlines: &str,
        refzlines: &str,
        overrides: &Overrides,
    ) -> Result<Self> {
        let (Some(&first), Some(&last)) = (frequencies.first(), frequencies.last()) else {
            return Err(ImpedanceError::Configuration(
                "bode data needs at least one frequency".into(),
            ));
        };

        let mut zlines = parse_line_specs(zlines)?;
        let reflines = parse_line_specs(refzlines)?;

        let root_label = root.label();
        let root_position = root_label
            .as_deref()
            .and_then(|label| zlines.iter().position(|s| s.label == label))
            .map(|i| zlines.remove(i).position_hz.unwrap_or(last))
            .unwrap_or(last);

        let mut traces = Vec::with_capacity(1 + zlines.len() + reflines.len());
        traces.push(trace_for(
            root,
            root_label.unwrap_or_else(|| root.to_string()),
            TraceStyle::Impedance,
            nearest_index(frequencies, root_position),
            frequencies,
            overrides,
        )?);

        for (specs, style, default_hz) in [
            (&zlines, TraceStyle::Impedance, last),
            (&reflines, TraceStyle::Reference, first),
        ] {
            for spec in specs {
                let z = root.find(&spec.label)?;
                let index = nearest_index(frequencies, spec.position_hz.unwrap_or(default_hz));
                traces.push(trace_for(&z, spec.label.clone(), style, index, frequencies, overrides)?);
            }
        }

        debug!("bode data for {root}: {} traces over {} points", traces.len(), frequencies.len());
        Ok(Self {
            frequencies: frequencies.to_vec(),
            traces,
        })
    }

    /// Trace requested by `label`.
    #[must_use]
    pub fn trace(&self, label: &str) -> Option<&BodeTrace> {
        self.traces.iter().find(|t| t.label == label)
    }

    /// Frequency and magnitude at which `trace` is annotated.
    #[must_use]
    pub fn anchor(&self, trace: &BodeTrace) -> (Scalar, Scalar) {
        let i = trace.annotation_index;
        (self.frequencies[i], trace.magnitude[i])
    }
}

fn trace_for(
    z: &Impedance,
    label: String,
    style: TraceStyle,
    annotation_index: usize,
    frequencies: &[Scalar],
    overrides: &Overrides,
) -> Result<BodeTrace> {
    let response = z.response(frequencies, overrides)?;
    Ok(BodeTrace {
        label,
        style,
        annotation: annotation_for(z),
        annotation_index,
        magnitude: response.map(|v| v.norm()),
        phase_deg: response.map(|v| v.arg().to_degrees()),
    })
}

/// Index of the grid frequency closest to `hz`; the first one on ties.
///
/// Returns 0 for an empty grid.
#[must_use]
pub fn nearest_index(frequencies: &[Scalar], hz: Scalar) -> usize {
    frequencies
        .iter()
        .enumerate()
        .fold((0, Scalar::INFINITY), |(best, best_distance), (i, f)| {
            let distance = (f - hz).abs();
            if distance < best_distance {
                (i, distance)
            } else {
                (best, best_distance)
            }
        })
        .0
}

/// TeX annotation for `z`: `1/ωC` for capacitors, `ωL` for inductors, the label otherwise.
#[must_use]
pub fn annotation_for(z: &Impedance) -> String {
    let subscript = z.subscript().map(|s| s.to_string()).unwrap_or_default();
    let symbol = format!("{}_{{{}}}", z.prefix(), subscript);
    match z.as_element().map(|e| e.kind()) {
        Some(ElementKind::Capacitor) => format!("$\\frac{{1}}{{\\omega {symbol}}}$"),
        Some(ElementKind::Inductor) => format!("$\\omega {symbol}$"),
        _ => format!("${symbol}$"),
    }
}

/// Writes the frequency grid and one magnitude column per trace as CSV.
pub fn write_bode_csv<W: Write>(mut w: W, data: &BodeData) -> io::Result<()> {
    write!(w, "f_hz")?;
    for trace in &data.traces {
        write!(w, ",|{}|", trace.label)?;
    }
    writeln!(w)?;
    for (i, f) in data.frequencies.iter().enumerate() {
        write!(w, "{f:.16e}")?;
        for trace in &data.traces {
            write!(w, ",{:.16e}", trace.magnitude[i])?;
        }
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::Element;
    use crate::sweep::logspace;

    fn network() -> Impedance {
        ((Element::resistor().with_value(10)
            | Element::capacitor().with_value(0.2e-9)
            | Element::inductor().with_subscript("a").with_value(100e-9))
        .assign_label("p")
        .unwrap()
            + Element::inductor().with_subscript("b").with_value(5e-9))
        .assign_label(1)
        .unwrap()
    }

    #[test]
    fn parses_positions() {
        let specs = parse_line_specs("Zin:100e6 Zdie  Zpkg").unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].label, "Zin");
        assert_relative_eq!(specs[0].position_hz.unwrap(), 100e6);
        assert_eq!(specs[1].position_hz, None);
    }

    #[test]
    fn repeated_label_takes_last_position() {
        let specs = parse_line_specs("R:1 C R:5").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].label, "R");
        assert_eq!(specs[0].position_hz, Some(5.0));
    }

    #[test]
    fn malformed_position_is_rejected() {
        assert!(matches!(
            "Zp:soon".parse::<LineSpec>(),
            Err(ImpedanceError::Configuration(_))
        ));
    }

    #[test]
    fn annotations_follow_element_kind() {
        let c: Impedance = Element::capacitor().with_subscript("d").into();
        let l: Impedance = Element::inductor().with_subscript("p").into();
        let r: Impedance = Element::resistor().with_subscript(1).into();
        assert_eq!(annotation_for(&c), "$\\frac{1}{\\omega C_{d}}$");
        assert_eq!(annotation_for(&l), "$\\omega L_{p}$");
        assert_eq!(annotation_for(&r), "$R_{1}$");
        assert_eq!(annotation_for(&network()), "$Z_{1}$");
    }

    #[test]
    fn nearest_index_picks_closest() {
        let ff = [1.0, 10.0, 100.0];
        assert_eq!(nearest_index(&ff, 12.0), 1);
        assert_eq!(nearest_index(&ff, 1e9), 2);
        assert_eq!(nearest_index(&ff, -5.0), 0);
    }

    #[test]
    fn root_comes_first_with_default_positions() {
        let z = network();
        let ff = logspace(6.0, 9.0, 100);
        let data = BodeData::build(&z, &ff, "Zp", "R C La Lb", &Overrides::new()).unwrap();
        let labels: Vec<&str> = data.traces.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Z1", "Zp", "R", "C", "La", "Lb"]);
        assert_eq!(data.traces[0].annotation_index, 99);
        assert_eq!(data.trace("Zp").unwrap().annotation_index, 99);
        assert_eq!(data.trace("R").unwrap().annotation_index, 0);
        assert_eq!(data.trace("C").unwrap().style, TraceStyle::Reference);
        let (f, m) = data.anchor(data.trace("R").unwrap());
        assert_relative_eq!(f, 1e6, max_relative = 1e-12);
        assert_relative_eq!(m, 10.0, max_relative = 1e-12);
    }

    #[test]
    fn root_position_comes_from_zlines() {
        let z = network();
        let ff = logspace(6.0, 9.0, 4);
        let data = BodeData::build(&z, &ff, "Z1:1e7", "", &Overrides::new()).unwrap();
        assert_eq!(data.traces.len(), 1);
        assert_eq!(data.traces[0].annotation_index, 1);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let z = network();
        let ff = logspace(6.0, 9.0, 4);
        assert!(matches!(
            BodeData::build(&z, &ff, "Zq", "", &Overrides::new()),
            Err(ImpedanceError::Lookup { .. })
        ));
        assert!(BodeData::build(&z, &[], "", "", &Overrides::new()).is_err());
    }

    #[test]
    fn missing_values_are_errors() {
        let z = Element::resistor().with_subscript("x") + Element::capacitor().with_value(1e-9);
        let ff = logspace(3.0, 6.0, 4);
        assert!(matches!(
            BodeData::build(&z, &ff, "", "C", &Overrides::new()),
            Err(ImpedanceError::MissingValue { .. })
        ));
        assert!(BodeData::build(&z, &ff, "", "C", &Overrides::from([("Rx", 1.0)])).is_ok());
    }

    #[test]
    fn csv_has_one_column_per_trace() {
        let z = network();
        let ff = logspace(6.0, 9.0, 3);
        let data = BodeData::build(&z, &ff, "Zp", "", &Overrides::new()).unwrap();
        let mut out = Vec::new();
        write_bode_csv(&mut out, &data).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("f_hz,|Z1|,|Zp|"));
        assert_eq!(lines.count(), 3);
    }
}
