//! Impedance-mismatch far-field residual and Jacobian.

use num_complex::Complex64;

use crate::algebra::{DIM, complex_cross, permutation, to_complex};
use crate::assembly::EmWaveConfig;
use crate::error::Result;
use crate::material::{InterfaceCoefficients, OpticalModel};
use crate::types::{Component, EmVariable, FieldFamily, Part, Unknown};

use super::{BoundaryPoint, FarFieldData, FarFieldKind, FarFieldOutput};

/// Evaluate a far-field boundary condition at one surface point.
///
/// # Arguments
///
/// * `point` - Interior field state, normal and basis values
/// * `kind` - Residual form and emitted part
/// * `data` - Exterior medium and incident field
/// * `config` - Shared parameters, interior optics and assembly flags
///
/// # Returns
///
/// The three residual components and, if requested, their derivatives with
/// respect to every active interior E unknown. Degenerate impedance pairs
/// (Z₁ + Z₂ ≈ 0) are not guarded here.
pub fn apply_em_farfield<M: OpticalModel + ?Sized>(
    point: &BoundaryPoint,
    kind: FarFieldKind,
    data: &FarFieldData,
    config: &EmWaveConfig<'_, M>,
) -> Result<FarFieldOutput> {
    let params = config.params;
    let interior = config.optics.evaluate(&point.material_point()).constants;

    let z1 = params.impedance(interior);
    let z2 = params.impedance(data.exterior);
    let ratio = InterfaceCoefficients::new(z1, z2).transfer_ratio();

    let normal = to_complex(&point.normal);
    let e1 = point.fields.complex(FieldFamily::Electric);

    let mut out = FarFieldOutput::zeros(point.n_dof());

    if config.assemble_residual {
        let f: [Complex64; DIM] = match kind.family() {
            FieldFamily::Electric => {
                let n_cross_e = complex_cross(&normal, &e1);
                let n_cross_inc = complex_cross(&normal, &data.incident);
                std::array::from_fn(|p| ratio * n_cross_e[p] + n_cross_inc[p])
            }
            FieldFamily::Magnetic => {
                std::array::from_fn(|p| -e1[p] / z2 * ratio - data.incident[p] / z2)
            }
        };
        for p in 0..DIM {
            out.residual[p] = kind.part().of(f[p]);
        }
    }

    if config.assemble_jacobian {
        let response = response_matrix(kind, &point.normal, ratio, z2);
        let (real, imag) = kind.part().indicators();

        for r in Component::ALL {
            // ∂E_r/∂Er_{r,j} = φ_j, ∂E_r/∂Ei_{r,j} = i φ_j
            for (part, factor) in [(Part::Real, Complex64::new(1.0, 0.0)), (Part::Imag, Complex64::i())] {
                let var = EmVariable::new(FieldFamily::Electric, r, part);
                if !config.problem.is_active(Unknown::Em(var)) {
                    continue;
                }
                for p in 0..DIM {
                    let c = factor * response[p][r.index()];
                    let d = real * c.re + imag * c.im;
                    for (j, phi) in point.phi.iter().enumerate() {
                        out.jacobian[p][(var.slot(), j)] = d * phi;
                    }
                }
            }
        }
    }

    Ok(out)
}

/// Linear response C with f_p = Σ_r C_pr E_r + (incident terms).
fn response_matrix(
    kind: FarFieldKind,
    normal: &[f64; DIM],
    ratio: Complex64,
    z2: Complex64,
) -> [[Complex64; DIM]; DIM] {
    let mut c = [[Complex64::new(0.0, 0.0); DIM]; DIM];
    match kind.family() {
        FieldFamily::Electric => {
            for (p, row) in c.iter_mut().enumerate() {
                for (r, entry) in row.iter_mut().enumerate() {
                    let n_eps: f64 = (0..DIM)
                        .map(|q| f64::from(permutation(p, q, r)) * normal[q])
                        .sum();
                    *entry = ratio * n_eps;
                }
            }
        }
        FieldFamily::Magnetic => {
            for (p, row) in c.iter_mut().enumerate() {
                row[p] = -ratio / z2;
            }
        }
    }
    c
}
