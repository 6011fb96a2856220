use approx::assert_abs_diff_eq;
use gdml_bridge::core::chemistry;
use gdml_bridge::core::domain::Configuration;
use gdml_bridge::core::units::{UnitConversion, KCAL_PER_MOL};
use nalgebra::Point3;

#[test]
fn test_length_factor_is_derived() {
    // ang_to_r = f_to_ev_ang / e_to_ev
    let units = UnitConversion::new(2.0, 4.0);
    assert_abs_diff_eq!(units.length_factor(), 2.0);
    assert_abs_diff_eq!(units.to_model_length(1.5), 3.0);
}

#[test]
fn test_identity_factors() {
    let units = UnitConversion::new(1.0, 1.0);
    assert_eq!(units.convert_energy(0.125), 0.125);
    assert_eq!(units.convert_force(-3.5), -3.5);
    assert_eq!(units.length_factor(), 1.0);
}

#[test]
fn test_default_is_kcal_mol() {
    let units = UnitConversion::default();
    assert_abs_diff_eq!(units.convert_energy(1.0), KCAL_PER_MOL);
    // Equal energy and force factors cancel in the length factor.
    assert_abs_diff_eq!(units.length_factor(), 1.0);
}

#[test]
fn test_flatten_preserves_atom_order() {
    let config = Configuration::new(
        vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, 0.5, 0.0)],
        vec![8, 1],
    );

    let coords = config.to_model_coords(2.0);
    assert_eq!(coords, vec![2.0, 4.0, 6.0, -2.0, 1.0, 0.0]);
    assert_eq!(config.len(), 2);
}

#[test]
fn test_empty_configuration() {
    let config = Configuration::new(vec![], vec![]);
    assert!(config.is_empty());
    assert!(config.to_model_coords(1.0).is_empty());
}

#[test]
fn test_symbol_lookup() {
    assert_eq!(chemistry::atomic_number("H"), Some(1));
    assert_eq!(chemistry::atomic_number("c"), Some(6));
    assert_eq!(chemistry::atomic_number("Mg"), Some(12));
    assert_eq!(chemistry::atomic_number("Xx"), None);

    assert_eq!(chemistry::symbol(8), Some("O"));
    assert_eq!(chemistry::symbol(0), None);
    assert_eq!(chemistry::symbol(120), None);
}
