use anyhow::Result;
use thiserror::Error;

/// The raw output of one predictor call, in model units.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Potential energy (model energy unit).
    pub energy: f64,
    /// Flat force components, 3 per atom, same atom order as the input
    /// coordinate vector.
    pub forces: Vec<f64>,
}

/// Violations of the predictor call contract.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("force component count mismatch: expected {expected}, got {actual}")]
    ForceCountMismatch { expected: usize, actual: usize },

    #[error("model file not found: {0}")]
    ModelNotFound(String),
}

/// A generic interface for pretrained force-field predictors.
/// Implementations must be thread-safe (Sync).
///
/// Any internal batching or parallelism is configured once at construction
/// and never varied per call; this side only ever issues single-configuration
/// requests. `predict` must be deterministic: identical coordinates yield
/// identical output, since the stress estimate compares energies across four
/// separate calls.
pub trait Predictor: Send + Sync {
    /// Evaluates one configuration given as a flat 3N coordinate vector in
    /// model length units. Returns energy and forces in model units.
    fn predict(&self, coords: &[f64]) -> Result<Prediction>;

    /// Returns the name of the backend (e.g., "sGDML (Pipe)").
    fn name(&self) -> &str;
}
