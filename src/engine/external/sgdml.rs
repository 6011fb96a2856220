use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

use crate::engine::predictor::{Prediction, Predictor, PredictorError};

/// Out-of-process wrapper for the sGDML reference predictor.
/// Streams one configuration per request over stdin and parses the reply
/// from stdout, so no scratch files touch disk.
///
/// Request body: one line with the atom count, then one `x y z` line per
/// atom in model length units. Reply: one energy line, then one force
/// triple per atom, both in model units. Lines that are blank or start
/// with `#` are ignored on the way back.
pub struct SgdmlPredictor {
    executable: String,
    model_path: PathBuf,
    n_bulk: usize,
}

impl SgdmlPredictor {
    /// Creates a predictor bound to one model file.
    ///
    /// # Arguments
    /// * `executable` - Predictor binary (e.g., "sgdml-predict").
    /// * `model_path` - Serialized model blob; contents are opaque here and
    ///   owned entirely by the backend.
    /// * `n_bulk` - Batch size the backend prepares once at startup. Never
    ///   varied per call.
    pub fn new(executable: &str, model_path: &Path, n_bulk: usize) -> Result<Self> {
        if !model_path.is_file() {
            return Err(PredictorError::ModelNotFound(model_path.display().to_string()).into());
        }

        Ok(Self {
            executable: executable.to_string(),
            model_path: model_path.to_path_buf(),
            n_bulk,
        })
    }

    /// Builds the request body for a flat 3N coordinate vector.
    pub fn format_request(coords: &[f64]) -> Result<String> {
        if coords.len() % 3 != 0 {
            bail!(
                "coordinate vector length {} is not a multiple of 3",
                coords.len()
            );
        }

        let mut s = String::with_capacity(32 + coords.len() * 24);
        s.push_str(&format!("{}\n", coords.len() / 3));
        for triple in coords.chunks_exact(3) {
            s.push_str(&format!(
                "{:.12e} {:.12e} {:.12e}\n",
                triple[0], triple[1], triple[2]
            ));
        }

        Ok(s)
    }

    /// Executes the backend via stdin/stdout piping.
    fn run_process(&self, input_data: &str) -> Result<String> {
        let mut child = Command::new(&self.executable)
            .arg("--model")
            .arg(&self.model_path)
            .arg("--n-bulk")
            .arg(self.n_bulk.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn predictor executable")?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input_data.as_bytes())
                .context("Failed to write to predictor stdin")?;
        }

        let output = child
            .wait_with_output()
            .context("Failed to read predictor output")?;

        if !output.status.success() {
            let err_msg = String::from_utf8_lossy(&output.stderr);
            bail!("Predictor exited with error: {}", err_msg);
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Parses the reply: one energy line, then `natoms` force triples.
    pub fn parse_reply(output: &str, natoms: usize) -> Result<Prediction> {
        let mut lines = output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        let energy_line = lines
            .next()
            .ok_or_else(|| anyhow::anyhow!("Empty reply from predictor"))?;
        let energy: f64 = energy_line
            .split_whitespace()
            .last()
            .unwrap_or(energy_line)
            .parse()
            .with_context(|| format!("Failed to parse energy line: '{}'", energy_line))?;

        let mut forces = Vec::with_capacity(3 * natoms);
        for line in lines.take(natoms) {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                bail!("Malformed force line: '{}'", line);
            }
            for part in &parts[..3] {
                let f: f64 = part
                    .parse()
                    .with_context(|| format!("Failed to parse force component '{}'", part))?;
                if f.is_nan() {
                    bail!("Predictor returned NaN force component");
                }
                forces.push(f);
            }
        }

        // STRICT VALIDATION: the backend must echo exactly one triple per atom.
        if forces.len() != 3 * natoms {
            return Err(PredictorError::ForceCountMismatch {
                expected: 3 * natoms,
                actual: forces.len(),
            }
            .into());
        }

        Ok(Prediction { energy, forces })
    }
}

impl Predictor for SgdmlPredictor {
    fn name(&self) -> &str {
        "sGDML (Pipe)"
    }

    fn predict(&self, coords: &[f64]) -> Result<Prediction> {
        let request = Self::format_request(coords)?;
        let reply = self.run_process(&request)?;
        Self::parse_reply(&reply, coords.len() / 3)
    }
}
