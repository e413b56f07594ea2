//! The lookup interface consumed by the calculation service.
//!
//! [`XrayLibrary`] is the seam between request handling and physics: the
//! service only ever sees this trait, so any implementation (the bundled
//! [`XrayDatabase`], or a stub in tests) can back it.

use std::path::Path;

use crate::dataset::Dataset;
use crate::types::{DatasetError, Shell, XrayError};

/// Pure X-ray lookup functions.
///
/// Implementations must be side-effect free: the same arguments always give
/// the same result, and concurrent calls need no coordination.
pub trait XrayLibrary: Send + Sync {
    /// Version string of the loaded library.
    fn version(&self) -> &str;

    /// Absorption edge energy (keV) of `shell` for atomic number `z`.
    fn edge_energy(&self, z: i32, shell: i32) -> Result<f64, XrayError>;

    /// Total mass attenuation coefficient (cm²/g) of atomic number `z` at
    /// `energy` keV.
    fn cs_total(&self, z: i32, energy: f64) -> Result<f64, XrayError>;

    /// Standard atomic weight (g/mol) of atomic number `z`.
    fn atomic_weight(&self, z: i32) -> Result<f64, XrayError>;
}

/// [`XrayLibrary`] backed by a validated element dataset.
///
/// # Examples
///
/// ```
/// use xray_core::{XrayDatabase, XrayLibrary};
///
/// let db = XrayDatabase::bundled().unwrap();
/// assert_eq!(db.edge_energy(26, 0).unwrap(), 7.112);
/// assert_eq!(db.cs_total(26, 7.112).unwrap(), 407.6);
/// assert_eq!(db.atomic_weight(999).unwrap_err().to_string(), "Z out of range");
/// ```
#[derive(Debug, Clone)]
pub struct XrayDatabase {
    dataset: Dataset,
    version: String,
}

impl XrayDatabase {
    /// Wrap an already validated dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let version = format!("{}+data.{}", crate::VERSION, dataset.version());
        Self { dataset, version }
    }

    /// Load the reference dataset compiled into the crate.
    pub fn bundled() -> Result<Self, DatasetError> {
        Dataset::bundled().map(Self::from_dataset)
    }

    /// Load a dataset file.
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        Dataset::from_file(path).map(Self::from_dataset)
    }

    /// Underlying dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl XrayLibrary for XrayDatabase {
    fn version(&self) -> &str {
        &self.version
    }

    fn edge_energy(&self, z: i32, shell: i32) -> Result<f64, XrayError> {
        let element = self.dataset.get(z).ok_or(XrayError::ZOutOfRange(z))?;
        let shell_id = Shell::try_from(shell)?;
        element
            .edge(shell_id)
            .ok_or(XrayError::InvalidShell { z, shell })
    }

    fn cs_total(&self, z: i32, energy: f64) -> Result<f64, XrayError> {
        let table = self
            .dataset
            .get(z)
            .and_then(|e| e.attenuation())
            .ok_or(XrayError::ZOutOfRange(z))?;
        if !(energy.is_finite() && energy > 0.0) {
            return Err(XrayError::NonPositiveEnergy(energy));
        }
        table
            .interpolate(energy)
            .map_err(|_| XrayError::EnergyOutOfRange(energy))
    }

    fn atomic_weight(&self, z: i32) -> Result<f64, XrayError> {
        self.dataset
            .get(z)
            .map(|e| e.weight())
            .ok_or(XrayError::ZOutOfRange(z))
    }
}
