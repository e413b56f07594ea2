//! # xray_core: Element Data and X-ray Interaction Lookups
//!
//! Provides the physics behind the calculation service:
//! - Electron shell enumeration with fixed wire codes (`types::shell`)
//! - A validated element dataset of atomic weights, edge energies and
//!   attenuation tables (`dataset`)
//! - Log-log interpolation of tabulated total mass attenuation (`physics`)
//! - The [`XrayLibrary`] lookup trait and its dataset-backed implementation
//!   [`XrayDatabase`] (`library`)
//!
//! ## Units
//!
//! Energies are in keV, cross sections in cm²/g, atomic weights in g/mol.
//!
//! ## Usage Examples
//!
//! ```rust
//! use xray_core::{XrayDatabase, XrayLibrary};
//!
//! let db = XrayDatabase::bundled().unwrap();
//!
//! // Iron K edge
//! let edge = db.edge_energy(26, 0).unwrap();
//! assert!((edge - 7.112).abs() < 1e-9);
//!
//! // Silicon at 10 keV
//! let cs = db.cs_total(14, 10.0).unwrap();
//! assert!((cs - 33.89).abs() < 0.5);
//!
//! // Out-of-range input is an error, not a panic
//! assert!(db.atomic_weight(0).is_err());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod dataset;
pub mod library;
pub mod physics;
pub mod types;

pub use dataset::{Dataset, Element};
pub use library::{XrayDatabase, XrayLibrary};
pub use physics::AttenuationTable;
pub use types::{DatasetError, Shell, TableError, XrayError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
