use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

// --- Physics Types ---

/// A single atomic configuration, as handed over by the host framework.
///
/// Positions are in framework units (Angstrom). Atomic numbers are metadata
/// carried along for the predictor backend; the numeric pipeline never reads
/// them. Atom order is significant and preserved end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub positions: Vec<Point3<f64>>,
    pub atomic_numbers: Vec<u8>,
}

impl Configuration {
    pub fn new(positions: Vec<Point3<f64>>, atomic_numbers: Vec<u8>) -> Self {
        Self {
            positions,
            atomic_numbers,
        }
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flattens the positions into the predictor's 3N layout, scaling every
    /// coordinate by `scale` (framework length -> model length).
    pub fn to_model_coords(&self, scale: f64) -> Vec<f64> {
        let mut coords = Vec::with_capacity(3 * self.positions.len());
        for p in &self.positions {
            coords.push(p.x * scale);
            coords.push(p.y * scale);
            coords.push(p.z * scale);
        }
        coords
    }
}

/// Everything one `calculate` call produces, in framework units.
/// A fresh value is returned per call; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct CalcResults {
    /// Potential energy (eV).
    pub energy: f64,
    /// Per-atom forces (eV/Angstrom), same atom order as the input.
    pub forces: Vec<Vector3<f64>>,
    /// Finite-difference stress estimate. Only the diagonal is populated;
    /// off-diagonal entries are always zero by construction.
    pub stress: Matrix3<f64>,
}
