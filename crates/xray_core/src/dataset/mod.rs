//! Element dataset: atomic weights, absorption edge energies and total
//! mass attenuation tables.
//!
//! The dataset is a TOML document with a `version` string and one
//! `[[element]]` record per atomic number:
//!
//! ```toml
//! version = "2024.2"
//!
//! [[element]]
//! z = 8
//! symbol = "O"
//! weight = 15.9994
//! edges = { K = 0.5431, L1 = 0.0416 }
//! attenuation = [
//!     [0.5, 1952.0],
//!     [0.5431, 1561.0],
//!     [0.5431, 2.351e4],
//!     [1.0, 4590.0],
//! ]
//! ```
//!
//! Records must be listed in order starting from Z = 1. Edge energies are in
//! keV. Within a principal shell they must not rise from inner to outer
//! subshells, and the K edge, when present, must be the highest edge of the
//! element. `attenuation` lists `[energy keV, mu cm²/g]` points in ascending
//! energy. Every edge strictly inside the table's range must appear twice,
//! the value below the edge first and a larger value above it.
//!
//! A copy of the reference data is compiled into the crate and available via
//! [`Dataset::bundled`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::physics::AttenuationTable;
use crate::types::{DatasetError, Shell};

/// Reference dataset compiled into the crate.
const BUNDLED: &str = include_str!("../../data/elements.toml");

#[derive(Debug, Deserialize)]
struct RawDataset {
    version: String,
    #[serde(default)]
    element: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    z: u32,
    symbol: String,
    weight: f64,
    #[serde(default)]
    edges: BTreeMap<String, f64>,
    #[serde(default)]
    attenuation: Vec<[f64; 2]>,
}

/// A validated element record.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    z: u32,
    symbol: String,
    weight: f64,
    edges: BTreeMap<Shell, f64>,
    attenuation: Option<AttenuationTable>,
}

impl Element {
    /// Atomic number.
    #[inline]
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Chemical symbol.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Standard atomic weight in g/mol.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Edge energy in keV for `shell`, if tabulated.
    pub fn edge(&self, shell: Shell) -> Option<f64> {
        self.edges.get(&shell).copied()
    }

    /// Tabulated edges, innermost shell first.
    pub fn edges(&self) -> impl Iterator<Item = (Shell, f64)> + '_ {
        self.edges.iter().map(|(shell, energy)| (*shell, *energy))
    }

    /// Total mass attenuation table, if tabulated.
    pub fn attenuation(&self) -> Option<&AttenuationTable> {
        self.attenuation.as_ref()
    }

    fn from_raw(raw: RawElement) -> Result<Self, DatasetError> {
        let z = raw.z;
        if raw.symbol.trim().is_empty() {
            return Err(DatasetError::EmptySymbol { z });
        }
        if !(raw.weight.is_finite() && raw.weight > 0.0) {
            return Err(DatasetError::InvalidWeight {
                z,
                weight: raw.weight,
            });
        }

        let mut edges = BTreeMap::new();
        for (label, energy) in raw.edges {
            let shell: Shell = label
                .parse()
                .map_err(|_| DatasetError::UnknownEdgeLabel { z, label })?;
            if !(energy.is_finite() && energy > 0.0) {
                return Err(DatasetError::InvalidEdgeEnergy {
                    z,
                    shell: shell.label(),
                    energy,
                });
            }
            edges.insert(shell, energy);
        }

        let attenuation = if raw.attenuation.is_empty() {
            None
        } else {
            let table = AttenuationTable::new(&raw.attenuation)
                .map_err(|source| DatasetError::Attenuation { z, source })?;
            Some(table)
        };

        let element = Self {
            z,
            symbol: raw.symbol.trim().to_string(),
            weight: raw.weight,
            edges,
            attenuation,
        };
        element.check_edge_order()?;
        element.check_edge_steps()?;
        Ok(element)
    }

    /// Within one principal shell energies never rise with subshell index,
    /// and nothing exceeds the K edge.
    fn check_edge_order(&self) -> Result<(), DatasetError> {
        let mut previous: Option<(Shell, f64)> = None;
        for (shell, energy) in self.edges() {
            if let Some((inner, inner_energy)) = previous {
                if inner.principal() == shell.principal() && energy > inner_energy {
                    return Err(DatasetError::EdgeOrdering {
                        z: self.z,
                        shell: shell.label(),
                        inner: inner.label(),
                    });
                }
            }
            previous = Some((shell, energy));
        }

        if let Some(k_edge) = self.edge(Shell::K) {
            if let Some((shell, _)) = self
                .edges()
                .find(|(shell, energy)| *shell != Shell::K && *energy >= k_edge)
            {
                return Err(DatasetError::EdgeOrdering {
                    z: self.z,
                    shell: shell.label(),
                    inner: Shell::K.label(),
                });
            }
        }
        Ok(())
    }

    /// Every edge inside the table's range is a step up in the table.
    fn check_edge_steps(&self) -> Result<(), DatasetError> {
        let Some(table) = &self.attenuation else {
            return Ok(());
        };
        let (min, max) = table.domain();
        for (shell, energy) in self.edges() {
            if energy <= min || energy >= max {
                continue;
            }
            let stepped = table
                .steps()
                .any(|(at, below, above)| at == energy && above > below);
            if !stepped {
                return Err(DatasetError::MissingEdgeStep {
                    z: self.z,
                    shell: shell.label(),
                    energy,
                });
            }
        }
        Ok(())
    }
}

/// A validated, immutable element dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    version: String,
    elements: Vec<Element>,
}

impl Dataset {
    /// Load the reference dataset compiled into the crate.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_toml_str(BUNDLED)
    }

    /// Parse and validate a dataset from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = toml::from_str(content)?;

        let version = raw.version.trim().to_string();
        if version.is_empty() {
            return Err(DatasetError::MissingVersion);
        }
        if raw.element.is_empty() {
            return Err(DatasetError::Empty);
        }

        let elements = raw
            .element
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let expected = idx as u32 + 1;
                if record.z != expected {
                    return Err(DatasetError::OutOfSequence {
                        expected,
                        found: record.z,
                    });
                }
                Element::from_raw(record)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { version, elements })
    }

    /// Read, parse and validate a dataset file.
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Dataset version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Highest atomic number in the dataset.
    pub fn max_z(&self) -> u32 {
        self.elements.len() as u32
    }

    /// Element record for atomic number `z`.
    pub fn get(&self, z: i32) -> Option<&Element> {
        let idx = usize::try_from(z).ok()?.checked_sub(1)?;
        self.elements.get(idx)
    }

    /// All element records in order of atomic number.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}
