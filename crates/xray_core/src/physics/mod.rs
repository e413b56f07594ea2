//! Photon interaction data.
//!
//! - [`attenuation`]: Tabulated total mass attenuation with log-log interpolation

pub mod attenuation;

pub use attenuation::AttenuationTable;
