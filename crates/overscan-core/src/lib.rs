//! Overscan analysis for CCD calibration frames.
//!
//! Profiles the overscan band of a frame, finds where light leakage from the
//! exposed area dies out, and judges whether the band can serve as a bias
//! estimate, optionally against bias, dark, flat and science references.

pub mod analysis;
pub mod combine;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod plateau;
pub mod profile;
pub mod region;
pub mod subtract;

mod stats;

pub use analysis::{analyze, OverscanAnalyzer, Rationale, UsabilityVerdict};
pub use config::AnalyzerConfig;
pub use error::{OverscanError, Result};
pub use frame::{FrameImage, FrameKind, PixelUnit};
pub use profile::ProfileVector;
pub use region::{Axis, OverscanRegion};
