//! Tabulated total mass attenuation.
//!
//! Each element carries a table of `(energy, mu)` points, energy in keV and
//! `mu` in cm²/g, sorted by energy. An absorption edge appears as two points
//! at the same energy: the value just below the edge first, then the value
//! just above it. Between points the table is interpolated linearly in
//! `ln(energy)` / `ln(mu)`, which follows the power-law fall of the
//! photoelectric cross section between edges.

use crate::types::TableError;

/// Log-log interpolated attenuation table for one element.
///
/// # Example
///
/// ```
/// use xray_core::physics::attenuation::AttenuationTable;
///
/// let table = AttenuationTable::new(&[[1.0, 100.0], [2.0, 40.0], [2.0, 300.0], [4.0, 60.0]])
///     .unwrap();
/// assert_eq!(table.domain(), (1.0, 4.0));
///
/// // Exactly at the edge the value above it applies.
/// assert_eq!(table.interpolate(2.0).unwrap(), 300.0);
/// assert!(table.interpolate(8.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttenuationTable {
    /// Photon energies in keV, non-decreasing
    energies: Vec<f64>,
    /// Mass attenuation coefficients in cm²/g
    values: Vec<f64>,
}

impl AttenuationTable {
    /// Build a table from `[energy, mu]` points in ascending energy order.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - fewer than two points
    /// * `InvalidPoint` - an energy or value is not finite and positive
    /// * `NonMonotonicData` - energies decrease, more than two points share
    ///   an energy, or the table starts or ends on a repeated energy
    pub fn new(points: &[[f64; 2]]) -> Result<Self, TableError> {
        if points.len() < 2 {
            return Err(TableError::InsufficientData {
                got: points.len(),
                need: 2,
            });
        }

        if let Some(index) = points
            .iter()
            .position(|[e, mu]| !(e.is_finite() && *e > 0.0 && mu.is_finite() && *mu > 0.0))
        {
            return Err(TableError::InvalidPoint { index });
        }

        let (energies, values): (Vec<f64>, Vec<f64>) =
            points.iter().map(|[e, mu]| (*e, *mu)).unzip();

        for (i, w) in energies.windows(2).enumerate() {
            if w[1] < w[0] {
                return Err(TableError::NonMonotonicData { index: i + 1 });
            }
        }
        for (i, w) in energies.windows(3).enumerate() {
            if w[0] == w[2] {
                return Err(TableError::NonMonotonicData { index: i + 2 });
            }
        }
        let n = energies.len();
        if energies[0] == energies[1] {
            return Err(TableError::NonMonotonicData { index: 1 });
        }
        if energies[n - 2] == energies[n - 1] {
            return Err(TableError::NonMonotonicData { index: n - 1 });
        }

        Ok(Self { energies, values })
    }

    /// Lowest and highest tabulated energy.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.energies[0], self.energies[self.energies.len() - 1])
    }

    /// Number of points, edge pairs counted twice.
    #[inline]
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// Always false for a constructed table.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Energies at which the table steps, with the values below and above.
    pub fn steps(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.energies
            .windows(2)
            .zip(self.values.windows(2))
            .filter(|(e, _)| e[0] == e[1])
            .map(|(e, v)| (e[0], v[0], v[1]))
    }

    /// Index `i` with `energies[i] <= energy < energies[i + 1]`, clamped to
    /// `[0, n - 2]`. At an edge this lands on the point above the edge.
    #[inline]
    fn find_segment(&self, energy: f64) -> usize {
        let pos = self.energies.partition_point(|&e| e <= energy);
        if pos == 0 {
            0
        } else if pos >= self.energies.len() {
            self.energies.len() - 2
        } else {
            pos - 1
        }
    }

    /// Attenuation at `energy` keV.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `energy` lies outside [`domain`](Self::domain).
    pub fn interpolate(&self, energy: f64) -> Result<f64, TableError> {
        let (min, max) = self.domain();
        if !(min..=max).contains(&energy) {
            return Err(TableError::OutOfBounds { energy, min, max });
        }

        let i = self.find_segment(energy);
        let (e0, e1) = (self.energies[i], self.energies[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        if energy == e0 {
            return Ok(y0);
        }
        if energy == e1 || e1 <= e0 {
            return Ok(y1);
        }

        let t = (energy / e0).ln() / (e1 / e0).ln();
        Ok((y0.ln() + t * (y1 / y0).ln()).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn edge_table() -> AttenuationTable {
        AttenuationTable::new(&[
            [1.0, 1000.0],
            [2.0, 150.0],
            [3.0, 50.0],
            [3.0, 400.0],
            [10.0, 20.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_knots_are_reproduced() {
        let table = edge_table();
        assert_relative_eq!(table.interpolate(1.0).unwrap(), 1000.0, max_relative = 1e-12);
        assert_relative_eq!(table.interpolate(2.0).unwrap(), 150.0, max_relative = 1e-12);
        assert_relative_eq!(table.interpolate(10.0).unwrap(), 20.0, max_relative = 1e-12);
    }

    #[test]
    fn test_power_law_is_exact() {
        // mu = 1000 * E^-3 is a straight line in log-log space
        let table = AttenuationTable::new(&[[1.0, 1000.0], [4.0, 1000.0 / 64.0]]).unwrap();
        for e in [1.5, 2.0, 3.3] {
            assert_relative_eq!(
                table.interpolate(e).unwrap(),
                1000.0 * f64::powi(e, -3),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_edge_takes_value_above() {
        let table = edge_table();
        assert_eq!(table.interpolate(3.0).unwrap(), 400.0);
        assert!(table.interpolate(3.0 - 1e-9).unwrap() < 51.0);
        assert!(table.interpolate(3.0 + 1e-9).unwrap() > 399.0);
    }

    #[test]
    fn test_steps() {
        let steps: Vec<_> = edge_table().steps().collect();
        assert_eq!(steps, vec![(3.0, 50.0, 400.0)]);
    }

    #[test]
    fn test_out_of_bounds() {
        let table = edge_table();
        assert_eq!(table.domain(), (1.0, 10.0));
        assert_eq!(
            table.interpolate(0.5),
            Err(TableError::OutOfBounds {
                energy: 0.5,
                min: 1.0,
                max: 10.0
            })
        );
        assert!(table.interpolate(10.5).is_err());
        assert!(table.interpolate(f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_short_table() {
        assert_eq!(
            AttenuationTable::new(&[[1.0, 1.0]]),
            Err(TableError::InsufficientData { got: 1, need: 2 })
        );
    }

    #[test]
    fn test_rejects_bad_points() {
        assert_eq!(
            AttenuationTable::new(&[[1.0, 1.0], [2.0, 0.0]]),
            Err(TableError::InvalidPoint { index: 1 })
        );
        assert_eq!(
            AttenuationTable::new(&[[-1.0, 1.0], [2.0, 1.0]]),
            Err(TableError::InvalidPoint { index: 0 })
        );
        assert!(AttenuationTable::new(&[[1.0, f64::NAN], [2.0, 1.0]]).is_err());
    }

    #[test]
    fn test_rejects_decreasing_energy() {
        assert_eq!(
            AttenuationTable::new(&[[1.0, 3.0], [3.0, 2.0], [2.0, 1.0]]),
            Err(TableError::NonMonotonicData { index: 2 })
        );
    }

    #[test]
    fn test_rejects_triple_energy() {
        assert_eq!(
            AttenuationTable::new(&[[1.0, 3.0], [2.0, 2.0], [2.0, 3.0], [2.0, 4.0], [3.0, 1.0]]),
            Err(TableError::NonMonotonicData { index: 3 })
        );
    }

    #[test]
    fn test_rejects_step_at_either_end() {
        assert!(AttenuationTable::new(&[[1.0, 3.0], [1.0, 5.0], [2.0, 1.0]]).is_err());
        assert!(AttenuationTable::new(&[[1.0, 3.0], [2.0, 1.0], [2.0, 5.0]]).is_err());
    }
}
