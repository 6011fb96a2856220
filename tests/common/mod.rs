use std::sync::{Arc, Mutex};

use anyhow::Result;
use gdml_bridge::engine::predictor::{Prediction, Predictor};

/// Returns zero energy and zero forces for any input.
pub struct ZeroPredictor;

impl Predictor for ZeroPredictor {
    fn predict(&self, coords: &[f64]) -> Result<Prediction> {
        Ok(Prediction {
            energy: 0.0,
            forces: vec![0.0; coords.len()],
        })
    }

    fn name(&self) -> &str {
        "Zero Stub"
    }
}

/// Always returns the same fixed prediction, whatever the input.
pub struct ConstPredictor {
    pub energy: f64,
    pub forces: Vec<f64>,
}

impl Predictor for ConstPredictor {
    fn predict(&self, _coords: &[f64]) -> Result<Prediction> {
        Ok(Prediction {
            energy: self.energy,
            forces: self.forces.clone(),
        })
    }

    fn name(&self) -> &str {
        "Const Stub"
    }
}

/// energy = k * sum(x_i^2) over the x coordinates only, with the matching
/// analytic forces (f_x = -2kx, f_y = f_z = 0).
pub struct QuadraticX {
    pub k: f64,
}

impl Predictor for QuadraticX {
    fn predict(&self, coords: &[f64]) -> Result<Prediction> {
        let mut energy = 0.0;
        let mut forces = vec![0.0; coords.len()];
        for (i, atom) in coords.chunks_exact(3).enumerate() {
            energy += self.k * atom[0] * atom[0];
            forces[3 * i] = -2.0 * self.k * atom[0];
        }

        Ok(Prediction { energy, forces })
    }

    fn name(&self) -> &str {
        "Quadratic-X Stub"
    }
}

/// Wraps another predictor and records every coordinate vector it sees.
pub struct RecordingPredictor<P> {
    pub inner: P,
    pub calls: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl<P> RecordingPredictor<P> {
    pub fn new(inner: P) -> (Self, Arc<Mutex<Vec<Vec<f64>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                inner,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl<P: Predictor> Predictor for RecordingPredictor<P> {
    fn predict(&self, coords: &[f64]) -> Result<Prediction> {
        self.calls.lock().unwrap().push(coords.to_vec());
        self.inner.predict(coords)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Fails unconditionally, to exercise error propagation.
pub struct FailingPredictor;

impl Predictor for FailingPredictor {
    fn predict(&self, _coords: &[f64]) -> Result<Prediction> {
        anyhow::bail!("backend exploded")
    }

    fn name(&self) -> &str {
        "Failing Stub"
    }
}
