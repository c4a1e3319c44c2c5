//! Convenience re-exports for building and evaluating impedance networks.

pub use crate::bode::{annotation_for, parse_line_specs, BodeData, BodeTrace, LineSpec, TraceStyle};
pub use crate::circuits::{
    analysis::{sweep_impedance, write_frequency_points_csv, FrequencyPoint, Frequencies, Response},
    breakfreq::break_frequency_between,
    component::{Element, ElementKind, Subscript, Value},
    network::{combine, Composite, ConnectionKind, Impedance},
    overrides::Overrides,
};
pub use crate::constants::{angular_frequency, cyclic_frequency, TWO_PI};
pub use crate::errors::ImpedanceError;
pub use crate::math::{CScalar, Scalar};
pub use crate::sweep::{
    linspace, logspace, logspace_hz, mag, mag_db, phase_deg, phase_rad, Spacing, SweepConfig,
};
