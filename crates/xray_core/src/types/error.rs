//! Error types for structured error handling.
//!
//! This module provides:
//! - `XrayError`: Per-call failures from the lookup functions
//! - `TableError`: Failures building or evaluating an attenuation table
//! - `DatasetError`: Failures while reading or validating an element dataset

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the lookup functions for invalid input.
///
/// The display strings are part of the HTTP contract: they are passed through
/// verbatim as the `error` field of a rejected request.
///
/// # Variants
/// - `ZOutOfRange`: Atomic number not covered by the dataset
/// - `UnknownShell`: Shell code outside the shell enumeration
/// - `InvalidShell`: Known shell without a tabulated edge for the element
/// - `NonPositiveEnergy`: Photon energy is zero, negative or not finite
/// - `EnergyOutOfRange`: Photon energy outside the element's attenuation table
///
/// # Examples
/// ```
/// use xray_core::types::XrayError;
///
/// assert_eq!(XrayError::ZOutOfRange(999).to_string(), "Z out of range");
/// assert_eq!(
///     XrayError::UnknownShell(-1).to_string(),
///     "Unknown shell macro provided"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XrayError {
    /// Atomic number outside the range covered by the dataset.
    #[error("Z out of range")]
    ZOutOfRange(i32),

    /// Shell code that does not name any shell.
    #[error("Unknown shell macro provided")]
    UnknownShell(i32),

    /// Shell exists but has no edge tabulated for this element.
    #[error("Invalid shell for this atomic number")]
    InvalidShell {
        /// Atomic number
        z: i32,
        /// Shell code
        shell: i32,
    },

    /// Photon energy must be a finite value above zero.
    #[error("Energy must be strictly positive")]
    NonPositiveEnergy(f64),

    /// Photon energy outside the tabulated range.
    #[error("Spline extrapolation is not allowed")]
    EnergyOutOfRange(f64),
}

/// Errors from building or evaluating an attenuation table.
///
/// # Examples
/// ```
/// use xray_core::types::TableError;
///
/// let err = TableError::OutOfBounds { energy: 900.0, min: 0.1, max: 500.0 };
/// assert!(err.to_string().contains("outside tabulated range"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Query energy outside the tabulated range.
    #[error("Energy {energy} keV outside tabulated range [{min}, {max}]")]
    OutOfBounds {
        /// The query energy
        energy: f64,
        /// Lowest tabulated energy
        min: f64,
        /// Highest tabulated energy
        max: f64,
    },

    /// Too few points to interpolate.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Energy or value is zero, negative or not finite.
    #[error("Point {index} must have a finite positive energy and value")]
    InvalidPoint {
        /// Index of the offending point
        index: usize,
    },

    /// Energies out of order, or repeated where no edge step can be.
    #[error("Energies are not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where the violation was detected
        index: usize,
    },
}

/// Errors raised while loading an element dataset.
///
/// Any of these at process start means the library is unavailable and the
/// service must not start.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid TOML or does not match the record layout.
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] toml::de::Error),

    /// The dataset declares no version string.
    #[error("Dataset version must not be empty")]
    MissingVersion,

    /// The dataset contains no element records.
    #[error("Dataset contains no elements")]
    Empty,

    /// Element records must be listed by atomic number starting from 1.
    #[error("Element records out of sequence: expected Z = {expected}, found Z = {found}")]
    OutOfSequence {
        /// Atomic number expected at this position
        expected: u32,
        /// Atomic number found
        found: u32,
    },

    /// An element record has an empty symbol.
    #[error("Element Z = {z} has an empty symbol")]
    EmptySymbol {
        /// Atomic number
        z: u32,
    },

    /// Atomic weight is zero, negative or not finite.
    #[error("Element Z = {z} has invalid atomic weight {weight}")]
    InvalidWeight {
        /// Atomic number
        z: u32,
        /// Offending weight
        weight: f64,
    },

    /// Edge table uses a label that is not a shell name.
    #[error("Element Z = {z} has unknown edge label '{label}'")]
    UnknownEdgeLabel {
        /// Atomic number
        z: u32,
        /// Offending label
        label: String,
    },

    /// Edge energy is zero, negative or not finite.
    #[error("Element Z = {z} has invalid {shell} edge energy {energy}")]
    InvalidEdgeEnergy {
        /// Atomic number
        z: u32,
        /// Shell label
        shell: &'static str,
        /// Offending energy
        energy: f64,
    },

    /// An outer subshell edge lies above an inner one.
    #[error("Element Z = {z}: {shell} edge must not lie above {inner} edge")]
    EdgeOrdering {
        /// Atomic number
        z: u32,
        /// Shell whose edge is too high
        shell: &'static str,
        /// Inner shell it was compared against
        inner: &'static str,
    },

    /// The attenuation table is malformed.
    #[error("Element Z = {z} has an invalid attenuation table: {source}")]
    Attenuation {
        /// Atomic number
        z: u32,
        /// What is wrong with the table
        #[source]
        source: TableError,
    },

    /// An edge inside the table's range has no upward step in the table.
    #[error("Element Z = {z}: attenuation table must step up at the {shell} edge ({energy} keV)")]
    MissingEdgeStep {
        /// Atomic number
        z: u32,
        /// Shell label
        shell: &'static str,
        /// Edge energy in keV
        energy: f64,
    },
}
