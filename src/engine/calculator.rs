use anyhow::Result;
use log::{debug, warn};
use nalgebra::{Matrix3, Vector3};

use crate::core::domain::{CalcResults, Configuration};
use crate::core::units::UnitConversion;
use crate::engine::predictor::{Predictor, PredictorError};

/// Step added to every coordinate along one axis when estimating stress,
/// in model length units. A fixed design parameter, not derived from the
/// configuration.
pub const STRESS_STEP: f64 = 1e-4;

/// Bridges the host framework to a pretrained predictor: converts positions
/// into model units, delegates, converts energy and forces back, and
/// estimates a diagonal-only stress tensor by finite differences of the
/// predicted energy.
pub struct Calculator {
    predictor: Box<dyn Predictor>,
    units: UnitConversion,
}

impl Calculator {
    /// Wraps a predictor with a unit-conversion layer.
    ///
    /// Factors are taken on faith; a misconfigured factor silently produces
    /// physically wrong numbers, hence the advisory.
    pub fn new(predictor: Box<dyn Predictor>, units: UnitConversion) -> Self {
        warn!(
            "Please remember to specify the proper conversion factors if your \
             model does not use 'kcal/mol' and 'Ang' as units."
        );
        Self { predictor, units }
    }

    /// Evaluates energy, forces and stress for one configuration.
    ///
    /// Runs one baseline predictor call plus three perturbed calls, one per
    /// Cartesian axis. All four block sequentially; any predictor failure
    /// aborts the whole call. An empty configuration is forwarded as-is and
    /// behaves however the predictor decides.
    pub fn calculate(&self, config: &Configuration) -> Result<CalcResults> {
        let n = config.len();
        debug!("{}: evaluating {} atoms", self.predictor.name(), n);

        // 1. Framework -> model length units, flat 3N layout.
        let coords = config.to_model_coords(self.units.length_factor());

        // 2. Baseline prediction.
        let base = self.predictor.predict(&coords)?;
        if base.forces.len() != 3 * n {
            return Err(PredictorError::ForceCountMismatch {
                expected: 3 * n,
                actual: base.forces.len(),
            }
            .into());
        }

        // 3. Model -> framework units (eV, eV/Ang).
        let energy = self.units.convert_energy(base.energy);
        let forces: Vec<Vector3<f64>> = base
            .forces
            .chunks_exact(3)
            .map(|f| {
                Vector3::new(
                    self.units.convert_force(f[0]),
                    self.units.convert_force(f[1]),
                    self.units.convert_force(f[2]),
                )
            })
            .collect();

        // 4. Diagonal stress: forward difference of the energy against the
        //    shared unperturbed baseline, one axis at a time.
        let mut stress = Matrix3::zeros();
        for axis in 0..3 {
            let mut perturbed = coords.clone();
            for atom in perturbed.chunks_exact_mut(3) {
                atom[axis] += STRESS_STEP;
            }

            // Forces from perturbation calls are discarded.
            let shifted = self.predictor.predict(&perturbed)?;
            let e_shifted = self.units.convert_energy(shifted.energy);

            stress[(axis, axis)] =
                (e_shifted - energy) / (STRESS_STEP * self.units.length_factor());
        }

        Ok(CalcResults {
            energy,
            forces,
            stress,
        })
    }

    /// Name of the wrapped predictor backend.
    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }
}
