use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::info;
use nalgebra::Point3;
use serde::Deserialize;

use gdml_bridge::core::chemistry;
use gdml_bridge::core::domain::Configuration;
use gdml_bridge::core::units::{UnitConversion, KCAL_PER_MOL};
use gdml_bridge::engine::calculator::Calculator;
use gdml_bridge::engine::external::sgdml::SgdmlPredictor;

// --- CLI Definitions ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate energy, forces and stress for an XYZ geometry with a pretrained sGDML model", long_about = None)]
struct Args {
    /// Path to a serialized sGDML model file
    #[arg(short, long)]
    model: PathBuf,

    /// Geometry to evaluate (XYZ format, Angstrom)
    #[arg(short, long)]
    geometry: PathBuf,

    /// Predictor executable to delegate to
    #[arg(short, long, default_value = "sgdml-predict")]
    exec: String,

    /// Optional JSON file overriding unit factors and batch size
    #[arg(short, long)]
    params: Option<PathBuf>,
}

/// Tunables a user can override from a JSON params file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct CalcParams {
    /// Model energy unit -> eV
    e_to_ev: f64,
    /// Model force unit -> eV/Angstrom
    f_to_ev_ang: f64,
    /// Batch size prepared by the predictor backend
    n_bulk: usize,
}

impl Default for CalcParams {
    fn default() -> Self {
        Self {
            e_to_ev: KCAL_PER_MOL,
            f_to_ev_ang: KCAL_PER_MOL,
            n_bulk: 1,
        }
    }
}

// --- Initialization Helpers ---

fn load_params(path: &Path) -> Result<CalcParams> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read params file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse params file {}", path.display()))
}

/// Reads a plain XYZ file: atom count, comment line, then `Sym x y z` rows.
fn read_xyz(path: &Path) -> Result<Configuration> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read geometry file {}", path.display()))?;
    let mut lines = data.lines();

    let natoms: usize = lines
        .next()
        .ok_or_else(|| anyhow!("Empty XYZ file"))?
        .trim()
        .parse()
        .context("First XYZ line must be the atom count")?;
    let _comment = lines.next();

    let mut positions = Vec::with_capacity(natoms);
    let mut atomic_numbers = Vec::with_capacity(natoms);

    for line in lines.take(natoms) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            bail!("Malformed XYZ row: '{}'", line);
        }

        let z = chemistry::atomic_number(parts[0])
            .ok_or_else(|| anyhow!("Unknown element symbol '{}'", parts[0]))?;
        let x: f64 = parts[1].parse().context("Bad x coordinate")?;
        let y: f64 = parts[2].parse().context("Bad y coordinate")?;
        let zc: f64 = parts[3].parse().context("Bad z coordinate")?;

        atomic_numbers.push(z);
        positions.push(Point3::new(x, y, zc));
    }

    if positions.len() != natoms {
        bail!(
            "XYZ atom count mismatch: header says {}, found {}",
            natoms,
            positions.len()
        );
    }

    Ok(Configuration::new(positions, atomic_numbers))
}

fn check_dependencies(exec: &str) -> Result<()> {
    // We attempt to run `<exec> --help`. If the backend is not in PATH, this fails.
    match Command::new(exec).arg("--help").output() {
        Ok(_) => Ok(()),
        Err(_) => Err(anyhow!(
            "Dependency Check Failed: '{}' executable not found in PATH.\n\
             Energy evaluations are delegated to the sGDML predictor.\n\
             Please install it or add it to your system PATH.",
            exec
        )),
    }
}

// --- Main ---

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = check_dependencies(&args.exec) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let params = match &args.params {
        Some(p) => load_params(p)?,
        None => CalcParams::default(),
    };
    info!(
        "Using factors e_to_ev={:.9}, f_to_ev_ang={:.9}, n_bulk={}",
        params.e_to_ev, params.f_to_ev_ang, params.n_bulk
    );

    let predictor = SgdmlPredictor::new(&args.exec, &args.model, params.n_bulk)?;
    let calculator = Calculator::new(
        Box::new(predictor),
        UnitConversion::new(params.e_to_ev, params.f_to_ev_ang),
    );

    let config = read_xyz(&args.geometry)?;
    let results = calculator.calculate(&config)?;

    println!("Backend: {}", calculator.predictor_name());
    println!("Energy:  {:.8} eV", results.energy);
    println!("Forces (eV/Ang):");
    for (i, f) in results.forces.iter().enumerate() {
        let sym = chemistry::symbol(config.atomic_numbers[i]).unwrap_or("?");
        println!(
            "  {:>4} {:<3} {:>14.8} {:>14.8} {:>14.8}",
            i, sym, f.x, f.y, f.z
        );
    }
    println!("Stress diagonal (eV/Ang):");
    println!(
        "  {:>14.8} {:>14.8} {:>14.8}",
        results.stress[(0, 0)],
        results.stress[(1, 1)],
        results.stress[(2, 2)]
    );

    Ok(())
}
