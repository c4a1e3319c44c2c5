//! Impedance trees built from lumped elements and their evaluation.

/// Frequency-domain evaluation of impedance trees.
pub mod analysis;
/// Closed-form break frequencies.
pub mod breakfreq;
/// Lumped element definitions.
pub mod component;
/// Series/parallel composition, labeling and lookup.
pub mod network;
/// Evaluation-scoped value overrides.
pub mod overrides;

pub use analysis::{sweep_impedance, FrequencyPoint, Frequencies, Response};
pub use breakfreq::break_frequency_between;
pub use component::{Element, ElementKind, Subscript, Value};
pub use network::{combine, Composite, ConnectionKind, Impedance};
pub use overrides::Overrides;
