// --- Unit Constants ---

/// 1 kcal/mol expressed in eV. sGDML models are fitted in kcal/mol and
/// Angstrom unless stated otherwise, so this is the default for both the
/// energy and the force factor.
pub const KCAL_PER_MOL: f64 = 0.043_364_104;

/// Conversion factors between the model's native unit system and the
/// framework's (eV / Angstrom).
///
/// The length factor is never set directly: it is rederived from the force
/// and energy factors in the constructor, so force and length conversions
/// cannot drift out of sync. Factors are accepted as given, without
/// validation; a wrong factor produces wrong numbers, not errors (the
/// calculator emits a one-time advisory instead).
#[derive(Debug, Clone, Copy)]
pub struct UnitConversion {
    e_to_ev: f64,
    f_to_ev_ang: f64,
    ang_to_r: f64,
}

impl UnitConversion {
    /// Builds the factor set from the model-to-eV energy factor and the
    /// model-to-eV/Angstrom force factor.
    pub fn new(e_to_ev: f64, f_to_ev_ang: f64) -> Self {
        Self {
            e_to_ev,
            f_to_ev_ang,
            ang_to_r: f_to_ev_ang / e_to_ev,
        }
    }

    /// Model energy unit -> eV.
    #[inline]
    pub fn convert_energy(&self, e: f64) -> f64 {
        e * self.e_to_ev
    }

    /// Model force unit -> eV/Angstrom.
    #[inline]
    pub fn convert_force(&self, f: f64) -> f64 {
        f * self.f_to_ev_ang
    }

    /// Angstrom -> model length unit.
    #[inline]
    pub fn to_model_length(&self, x: f64) -> f64 {
        x * self.ang_to_r
    }

    /// The derived Angstrom-to-model-length factor.
    #[inline]
    pub fn length_factor(&self) -> f64 {
        self.ang_to_r
    }
}

impl Default for UnitConversion {
    /// kcal/mol energies, kcal/mol/Angstrom forces, Angstrom lengths.
    fn default() -> Self {
        Self::new(KCAL_PER_MOL, KCAL_PER_MOL)
    }
}
