//! Far-field boundary condition tests.
//!
//! Verifies the impedance identities, the matched-impedance reduction to
//! n̂ × (E + E_inc), and the analytic boundary Jacobian against central
//! differences on a tetrahedron face.

use approx::assert_relative_eq;
use emwave_rs::{
    AssemblyError, BoundaryPoint, Component, ConstantOptics, ElementDofs, EmVariable, EmWaveConfig,
    EmWaveParameters, FarFieldData, FarFieldKind, FieldFamily, FieldState, InterfaceCoefficients,
    LinearTetrahedron, OpticalConstants, Part, ProblemDescription, Unknown, apply_em_farfield,
    status_code,
};
use num_complex::Complex64;

const TOL: f64 = 1e-12;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Boundary point on z = 0 with E = (1+2i, 3-i, 0.5).
fn flat_point() -> BoundaryPoint {
    BoundaryPoint {
        local_coords: [0.3, 0.3, 0.0],
        normal: [0.0, 0.0, 1.0],
        fields: FieldState {
            e_real: [1.0, 3.0, 0.5],
            e_imag: [2.0, -1.0, 0.0],
            ..FieldState::default()
        },
        phi: vec![0.4, 0.3, 0.3, 0.0],
        time: 0.0,
        position: [0.3, 0.3, 0.0],
    }
}

#[test]
fn test_impedance_identities() {
    let params = EmWaveParameters::new(1.2e15);
    let media = [
        OpticalConstants::VACUUM,
        OpticalConstants::new(1.5, 0.0),
        OpticalConstants::new(3.6, 0.2),
        OpticalConstants::new(0.2, 3.4),
    ];
    for a in media {
        for b in media {
            let z1 = params.impedance(a);
            let z2 = params.impedance(b);

            // Z = sqrt(μ/ε)
            let eps = params.permittivity(a);
            assert_relative_eq!((z1 * z1 * eps).re, params.permeability, max_relative = 1e-12);

            let coeffs = InterfaceCoefficients::new(z1, z2);
            let diff = coeffs.transmission - coeffs.reflection;
            assert!((diff - c(1.0, 0.0)).norm() < TOL, "τ - Γ = 1");
        }
    }
}

#[test]
fn test_matched_impedance_reduces_to_cross_product() {
    let params = EmWaveParameters::normalized(1.0);
    let problem = ProblemDescription::full_wave(3);
    let interior = ConstantOptics::new(1.5, 0.2);
    let config = EmWaveConfig::new(&params, &problem, &interior);

    let data = FarFieldData::new(
        interior.constants,
        [c(0.2, 0.0), c(0.0, -0.4), c(1.0, 0.0)],
    );

    let z = params.impedance(interior.constants);
    let coeffs = InterfaceCoefficients::new(z, z);
    assert!(coeffs.reflection.norm() < TOL);
    assert!((coeffs.transmission - c(1.0, 0.0)).norm() < TOL);

    let point = flat_point();
    let re = apply_em_farfield(&point, FarFieldKind::ElectricReal, &data, &config).expect("real");
    let im = apply_em_farfield(&point, FarFieldKind::ElectricImag, &data, &config).expect("imag");

    // n̂ × (E + inc) with n̂ = z: (-(E+inc)_y, (E+inc)_x, 0)
    let expected_re = [-3.0, 1.2, 0.0];
    let expected_im = [1.4, 2.0, 0.0];
    for p in 0..3 {
        assert!((re.residual[p] - expected_re[p]).abs() < TOL, "Re f[{p}] = {}", re.residual[p]);
        assert!((im.residual[p] - expected_im[p]).abs() < TOL, "Im f[{p}] = {}", im.residual[p]);
    }
}

#[test]
fn test_residual_flag_off_leaves_residual_zero() {
    let params = EmWaveParameters::normalized(1.0);
    let problem = ProblemDescription::full_wave(3);
    let optics = ConstantOptics::new(1.5, 0.0);
    let config = EmWaveConfig::new(&params, &problem, &optics).with_residual(false);

    let data = FarFieldData::absorbing(OpticalConstants::VACUUM);
    let out = apply_em_farfield(&flat_point(), FarFieldKind::MagneticReal, &data, &config)
        .expect("jacobian only");
    assert_eq!(out.residual, [0.0; 3]);

    let e1r = EmVariable::new(FieldFamily::Electric, Component::X, Part::Real);
    assert!(out.derivative(0, e1r, 0) != 0.0);
}

#[test]
fn test_raw_inputs_are_validated() {
    let result = FarFieldKind::from_id(7);
    assert_eq!(result, Err(AssemblyError::InvalidBoundaryKind(7)));
    assert_eq!(status_code(&result), -2);

    let result = FarFieldData::from_slice(&[1.0; 7]);
    assert!(matches!(
        result,
        Err(AssemblyError::BoundaryDataLength {
            expected: 8,
            actual: 7
        })
    ));

    let data = FarFieldData::from_slice(&[1.2, 0.1, 0.0, 1.0, 0.0, 0.5, 0.0, 0.0]).expect("valid");
    assert_eq!(data.incident[0], c(0.0, 0.5));
    assert_eq!(data.incident[1], c(1.0, 0.0));
}

/// Residual of `kind` at a face point of the reference tetrahedron.
fn face_residual(
    tet: &LinearTetrahedron,
    dofs: &ElementDofs,
    kind: FarFieldKind,
    data: &FarFieldData,
    config: &EmWaveConfig<'_, ConstantOptics>,
) -> [f64; 3] {
    let point = tet.boundary_point(3, &[0.2, 0.5, 0.0], 0.0, dofs);
    apply_em_farfield(&point, kind, data, config)
        .expect("far field")
        .residual
}

#[test]
fn test_jacobian_matches_finite_differences() {
    let params = EmWaveParameters::normalized(1.7).with_permeability(1.1);
    let problem = ProblemDescription::full_wave(3);
    let interior = ConstantOptics::new(2.1, 0.15);
    let config = EmWaveConfig::new(&params, &problem, &interior);
    let data = FarFieldData::new(
        OpticalConstants::new(1.0, 0.02),
        [c(0.3, -0.1), c(-0.2, 0.4), c(0.05, 0.0)],
    );

    let tet = LinearTetrahedron::new([
        [0.0, 0.0, 0.0],
        [1.0, 0.1, 0.0],
        [0.2, 1.0, 0.1],
        [0.1, 0.2, 0.9],
    ]);
    let dofs = ElementDofs::from_fn(LinearTetrahedron::N_NODES, 0, |u, j| {
        (0.9 * u.slot() as f64 - 0.4 * j as f64).cos()
    });
    let h = 1e-6;

    for kind in FarFieldKind::ALL {
        let point = tet.boundary_point(3, &[0.2, 0.5, 0.0], 0.0, &dofs);
        let out = apply_em_farfield(&point, kind, &data, &config).expect("far field");

        for var in EmVariable::all() {
            for j in 0..LinearTetrahedron::N_NODES {
                let mut plus = dofs.clone();
                let mut minus = dofs.clone();
                plus.values_mut(Unknown::Em(var)).expect("em")[j] += h;
                minus.values_mut(Unknown::Em(var)).expect("em")[j] -= h;
                let rp = face_residual(&tet, &plus, kind, &data, &config);
                let rm = face_residual(&tet, &minus, kind, &data, &config);

                for p in 0..3 {
                    let fd = (rp[p] - rm[p]) / (2.0 * h);
                    let an = out.derivative(p, var, j);
                    assert!(
                        (an - fd).abs() < 1e-7,
                        "{kind}: d f[{p}] / d {var}[{j}]: analytic {an:e}, finite difference {fd:e}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_magnetic_unknowns_have_no_boundary_sensitivity() {
    let params = EmWaveParameters::normalized(1.0);
    let problem = ProblemDescription::full_wave(3);
    let optics = ConstantOptics::new(1.3, 0.05);
    let config = EmWaveConfig::new(&params, &problem, &optics);
    let data = FarFieldData::absorbing(OpticalConstants::VACUUM);

    for kind in FarFieldKind::ALL {
        let out = apply_em_farfield(&flat_point(), kind, &data, &config).expect("far field");
        for var in EmVariable::all().filter(|v| v.family == FieldFamily::Magnetic) {
            for p in 0..3 {
                for j in 0..4 {
                    assert_eq!(out.derivative(p, var, j), 0.0);
                }
            }
        }
    }
}
