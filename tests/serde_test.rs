//! Serialization of configuration types (requires the `serde` feature).

#![cfg(feature = "serde")]

use emwave_rs::{
    Component, EmVariable, EmWaveParameters, EquationTerms, FieldFamily, LinearOptics, Part,
    ProblemDescription, SpeciesCoefficient, Unknown,
};

#[test]
fn test_problem_description_from_json_config() {
    let e1r = EmVariable::new(FieldFamily::Electric, Component::X, Part::Real);
    let problem = ProblemDescription::full_wave(2)
        .with_mesh_motion(true)
        .with_species(1)
        .with_equation(e1r, EquationTerms::new(Some(0.5), None));

    let json = serde_json::to_string(&problem).expect("serialize");
    let parsed: ProblemDescription = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(parsed, problem);
    assert_eq!(parsed.equation_terms(e1r), Some(&EquationTerms::new(Some(0.5), None)));
    assert!(parsed.is_active(Unknown::MeshDisplacement(Component::Y)));
    assert!(!parsed.is_active(Unknown::MeshDisplacement(Component::Z)));
}

#[test]
fn test_parameters_and_optics_from_json() {
    let params: EmWaveParameters = serde_json::from_str(
        r#"{ "omega": 2.0, "permeability": 1.0, "base_permittivity": 1.0 }"#,
    )
    .expect("parameters");
    assert_eq!(params, EmWaveParameters::normalized(2.0));

    let optics = LinearOptics::new(1.45, 0.0).with_species(vec![SpeciesCoefficient {
        reference: 0.1,
        dn_dc: 0.2,
        dk_dc: 0.0,
    }]);
    let json = serde_json::to_value(&optics).expect("serialize");
    assert_eq!(json["n_0"], 1.45);
    let parsed: LinearOptics = serde_json::from_value(json).expect("deserialize");
    assert_eq!(parsed, optics);
}
