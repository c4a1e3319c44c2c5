#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Constants and frequency conversions.
pub mod constants;
/// Shared numeric type aliases and helpers.
pub mod math;
/// Lumped elements, impedance trees and their evaluation.
pub mod circuits;
/// Frequency grids, sweep configuration and post-processing helpers.
pub mod sweep;
/// Bode magnitude data for plotting backends.
pub mod bode;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
