//! Volume residual and analytic Jacobian of one EM equation.
//!
//! For equation `d` built from unknown `u` with partner `u*` and cross field
//! `X`, each test function `i` receives
//!
//! R_i = (a·u + c·u*) φ_i det J h3 w m_adv
//!     - Σ_{p,q} ε_{p,q,d} ∂φ_i/∂x_p X_q det J h3 w m_dif
//!
//! and the Jacobian blocks are formed in closed form:
//!
//! | Block | Entry (i, j) |
//! |-------|--------------|
//! | u | φ_i a φ_j det J h3 w m_adv |
//! | u* | φ_i c φ_j det J h3 w m_adv |
//! | X_b | -Σ_p ε_{p,b,d} ∂φ_i/∂x_p φ_j det J h3 w m_dif |
//! | T, c_w | φ_i (∂a u + ∂c u*) det J h3 w m_adv |
//! | x_b | coefficient + geometric sensitivity, see [`GeometricSensitivity`] |

use crate::algebra::{DIM, permutation};
use crate::element::ElementContext;
use crate::equations::{CouplingCoefficients, EquationTerms, ProblemDescription};
use crate::error::Result;
use crate::material::{OpticalModel, OpticalProperties, OpticalSensitivity, SensitivityRequest};
use crate::types::{Component, Unknown};

use super::{EmWaveConfig, EquationSelection, LocalAccumulator, TimeStep};

/// Curl contraction Σ_{p,q} ε_{p,q,dir} g[p] x[q].
#[inline]
pub fn curl_term(g: &[f64; DIM], x: &[f64; DIM], dir: usize) -> f64 {
    let mut sum = 0.0;
    for p in 0..DIM {
        for q in 0..DIM {
            sum += permutation(p, q, dir) as f64 * g[p] * x[q];
        }
    }
    sum
}

/// Mesh sensitivity of the diffusion term for one (i, j, b) entry, split by
/// geometric source. Multipliers are not applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometricSensitivity {
    /// Through ∂(∂φ_i/∂x_p)/∂x_{b,j}
    pub basis_gradient: f64,
    /// Through ∂(det J)/∂x_{b,j}
    pub jacobian_determinant: f64,
    /// Through ∂h3/∂x_{b,j}
    pub volume_scale: f64,
}

impl GeometricSensitivity {
    /// Diffusion sensitivity of test function `i` to mesh dof `(b, j)`.
    pub fn diffusion(
        element: &ElementContext,
        cross: &[f64; DIM],
        dir: usize,
        i: usize,
        j: usize,
        b: usize,
    ) -> Self {
        let basis = &element.basis;
        let q = &element.quadrature;

        let d_grad = &basis.d_grad_phi_dmesh[i][j];
        let dg = [d_grad[0][b], d_grad[1][b], d_grad[2][b]];
        let curl = curl_term(&basis.grad_phi[i], cross, dir);

        Self {
            basis_gradient: -curl_term(&dg, cross, dir) * basis.det_j * q.h3 * q.weight,
            jacobian_determinant: -curl * basis.d_det_j_dmesh[j][b] * q.h3 * q.weight,
            volume_scale: -curl * basis.det_j * q.dh3_dq[b] * basis.phi[j] * q.weight,
        }
    }

    /// Sum of all geometric contributions.
    #[inline]
    pub fn total(&self) -> f64 {
        self.basis_gradient + self.jacobian_determinant + self.volume_scale
    }
}

/// Add the contribution of one equation at one quadrature point.
///
/// An inactive equation is a no-op returning `Ok(())`. A selection whose
/// conjugate is not the partner of its variable, or an accumulator sized for
/// a different element, is rejected before anything is accumulated.
///
/// # Arguments
///
/// * `step` - Time context; `time` is forwarded to the optical model
/// * `element` - Basis, geometry and field state at the quadrature point
/// * `selection` - Equation row, primary unknown and its partner
/// * `config` - Parameters, problem description, optics and assembly flags
/// * `acc` - Caller-owned accumulator, added to in place
pub fn assemble_emwave<M: OpticalModel + ?Sized>(
    step: &TimeStep,
    element: &ElementContext,
    selection: &EquationSelection,
    config: &EmWaveConfig<'_, M>,
    acc: &mut LocalAccumulator,
) -> Result<()> {
    if let Err(e) = selection.validate() {
        log::error!("EM assembly rejected selection {selection:?}: {e}");
        return Err(e);
    }

    let problem = config.problem;
    let Some(terms) = problem.equation_terms(selection.equation).copied() else {
        log::trace!("Equation {} inactive, skipping", selection.equation);
        return Ok(());
    };

    if let Err(e) = acc.check_shape(element.n_dof(), problem.n_species()) {
        log::error!("EM assembly of {}: {e}", selection.equation);
        return Err(e);
    }

    if !config.assemble_residual && !config.assemble_jacobian {
        return Ok(());
    }

    let request = if config.assemble_jacobian {
        problem.sensitivity_request()
    } else {
        SensitivityRequest::NONE
    };
    let optics = config
        .optics
        .evaluate(&element.material_point(step.time, request));

    let var = selection.variable;
    let kernel = Kernel {
        element,
        selection,
        terms,
        coeff: CouplingCoefficients::for_variable(var, config.params, optics.constants),
        emf: element.fields.value(var),
        emf_conj: element.fields.value(selection.conjugate),
        cross: *element.fields.vector(var.family.partner(), var.part),
        dir: var.component.index(),
    };

    if config.assemble_residual {
        kernel.residual(acc);
    }
    if config.assemble_jacobian {
        kernel.jacobian(problem, &optics, acc);
    }
    Ok(())
}

// =============================================================================
// Kernel
// =============================================================================

/// Per-call state shared by the residual and Jacobian passes.
struct Kernel<'a> {
    element: &'a ElementContext,
    selection: &'a EquationSelection,
    terms: EquationTerms,
    coeff: CouplingCoefficients,
    emf: f64,
    emf_conj: f64,
    cross: [f64; DIM],
    dir: usize,
}

impl Kernel<'_> {
    fn residual(&self, acc: &mut LocalAccumulator) {
        let basis = &self.element.basis;
        let measure = self.element.measure();
        let pointwise = self.coeff.apply(self.emf, self.emf_conj);

        for i in 0..basis.n_dof() {
            let mut r = 0.0;
            if let Some(m_adv) = self.terms.advection {
                r += pointwise * basis.phi[i] * measure * m_adv;
            }
            if let Some(m_dif) = self.terms.diffusion {
                r -= curl_term(&basis.grad_phi[i], &self.cross, self.dir) * measure * m_dif;
            }
            acc.add_residual(self.selection.equation, i, r);
        }
    }

    fn jacobian(
        &self,
        problem: &ProblemDescription,
        optics: &OpticalProperties,
        acc: &mut LocalAccumulator,
    ) {
        let eq = self.selection.equation;
        let basis = &self.element.basis;
        let phi = &basis.phi;
        let n_dof = basis.n_dof();
        let measure = self.element.measure();

        if let Some(m_adv) = self.terms.advection {
            let scale = measure * m_adv;

            let self_blocks = [
                (self.selection.variable, self.coeff.advection),
                (self.selection.conjugate, self.coeff.conjugate),
            ];
            for (unknown, coefficient) in self_blocks {
                if !problem.is_active(Unknown::Em(unknown)) {
                    continue;
                }
                for i in 0..n_dof {
                    for j in 0..n_dof {
                        acc.add_jacobian(eq, unknown.into(), i, j, phi[i] * coefficient * phi[j] * scale);
                    }
                }
            }

            // Temperature and species; mesh is handled with its geometry
            for sens in &optics.sensitivities {
                if matches!(sens.source, Unknown::MeshDisplacement(_)) || !problem.is_active(sens.source) {
                    continue;
                }
                for i in 0..n_dof {
                    for j in 0..n_dof {
                        let d = self.coefficient_sensitivity(sens, j);
                        acc.add_jacobian(eq, sens.source, i, j, phi[i] * d * scale);
                    }
                }
            }
        }

        if let Some(m_dif) = self.terms.diffusion {
            let scale = measure * m_dif;
            for b in Component::ALL {
                let unknown = Unknown::Em(self.selection.variable.cross_field(b));
                if !problem.is_active(unknown) {
                    continue;
                }
                for i in 0..n_dof {
                    let g = &basis.grad_phi[i];
                    let c: f64 = (0..DIM)
                        .map(|p| permutation(p, b.index(), self.dir) as f64 * g[p])
                        .sum();
                    for j in 0..n_dof {
                        acc.add_jacobian(eq, unknown, i, j, -c * phi[j] * scale);
                    }
                }
            }
        }

        for b in problem.mesh_components() {
            self.mesh_jacobian(b, optics, acc);
        }
    }

    /// ∂(a u + c u*)/∂(source_j) through the optical constants.
    fn coefficient_sensitivity(&self, sens: &OpticalSensitivity, j: usize) -> f64 {
        let d_n = sens.d_n.get(j).copied().unwrap_or(0.0);
        let d_k = sens.d_k.get(j).copied().unwrap_or(0.0);
        self.coeff.sensitivity(self.emf, self.emf_conj, d_n, d_k)
    }

    fn mesh_jacobian(&self, b: Component, optics: &OpticalProperties, acc: &mut LocalAccumulator) {
        let unknown = Unknown::MeshDisplacement(b);
        let bi = b.index();
        let eq = self.selection.equation;
        let basis = &self.element.basis;
        let q = &self.element.quadrature;
        let measure = self.element.measure();
        let pointwise = self.coeff.apply(self.emf, self.emf_conj);
        let sens = optics.sensitivity(unknown);

        for i in 0..basis.n_dof() {
            for j in 0..basis.n_dof() {
                let mut d = 0.0;

                if let Some(m_adv) = self.terms.advection {
                    let coefficient =
                        sens.map_or(0.0, |s| self.coefficient_sensitivity(s, j)) * measure;
                    let geometric = pointwise
                        * (basis.d_det_j_dmesh[j][bi] * q.h3 + basis.det_j * q.dh3_dq[bi] * basis.phi[j])
                        * q.weight;
                    d += basis.phi[i] * (coefficient + geometric) * m_adv;
                }

                if let Some(m_dif) = self.terms.diffusion {
                    let geometric =
                        GeometricSensitivity::diffusion(self.element, &self.cross, self.dir, i, j, bi);
                    d += geometric.total() * m_dif;
                }

                acc.add_jacobian(eq, unknown, i, j, d);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementDofs, LinearTetrahedron, ScaleFactor};
    use crate::equations::{EmWaveParameters, EquationTerms};
    use crate::error::AssemblyError;
    use crate::material::ConstantOptics;
    use crate::types::{EmVariable, FieldFamily, Part};

    const TOL: f64 = 1e-12;

    fn e1r() -> EmVariable {
        EmVariable::new(FieldFamily::Electric, Component::X, Part::Real)
    }

    fn centroid(dofs: &ElementDofs) -> ElementContext {
        LinearTetrahedron::reference().context_at(&[0.25; 3], 1.0 / 6.0, ScaleFactor::Cartesian, dofs)
    }

    #[test]
    fn test_curl_term_matches_cross_product() {
        let g = [1.0, 2.0, 3.0];
        let x = [-0.5, 0.25, 4.0];
        let c = crate::algebra::cross(&g, &x);
        for dir in 0..3 {
            assert!((curl_term(&g, &x, dir) - c[dir]).abs() < TOL);
        }
    }

    #[test]
    fn test_residual_hand_computed() {
        let e1i = e1r().conjugate();
        let h3r = EmVariable::new(FieldFamily::Magnetic, Component::Z, Part::Real);
        let dofs = ElementDofs::from_fn(4, 0, |u, _| match u {
            Unknown::Em(v) if v == e1i => 2.0,
            Unknown::Em(v) if v == h3r => 1.0,
            _ => 0.0,
        });
        let element = centroid(&dofs);

        let params = EmWaveParameters::normalized(1.0);
        let problem = ProblemDescription::full_wave(3);
        let optics = ConstantOptics::vacuum();
        let config = EmWaveConfig::new(&params, &problem, &optics).with_jacobian(false);

        let mut acc = LocalAccumulator::new(4, 0);
        assemble_emwave(
            &TimeStep::new(0.0),
            &element,
            &EquationSelection::for_variable(e1r()),
            &config,
            &mut acc,
        )
        .expect("assembly");

        // (c·u*) φ_i |J| w - (∇φ_i × H)_x |J| w with c = 1, u* = 2, H = z
        let expected = [0.25, 1.0 / 12.0, -1.0 / 12.0, 1.0 / 12.0];
        for (r, e) in acc.residual(e1r()).iter().zip(expected) {
            assert!((r - e).abs() < TOL, "residual {r} != {e}");
        }
        assert!(acc.jacobian(e1r(), Unknown::Em(e1i)).nrows() == 4);
        assert!(acc.jacobian(e1r(), Unknown::Em(e1i))[(0, 0)] == 0.0);
    }

    #[test]
    fn test_term_multipliers_scale_contributions() {
        let dofs = ElementDofs::from_fn(4, 0, |u, j| match u {
            Unknown::Em(v) => 0.1 * (v.slot() + j) as f64,
            _ => 0.0,
        });
        let element = centroid(&dofs);
        let params = EmWaveParameters::normalized(1.5);
        let optics = ConstantOptics::new(1.4, 0.05);

        let assemble = |terms: EquationTerms| {
            let problem = ProblemDescription::full_wave(3).with_equation(e1r(), terms);
            let config = EmWaveConfig::new(&params, &problem, &optics);
            let mut acc = LocalAccumulator::new(4, 0);
            assemble_emwave(
                &TimeStep::new(0.0),
                &element,
                &EquationSelection::for_variable(e1r()),
                &config,
                &mut acc,
            )
            .expect("assembly");
            acc.residual(e1r()).to_vec()
        };

        let adv = assemble(EquationTerms::advection_only(1.0));
        let dif = assemble(EquationTerms::diffusion_only(1.0));
        let mixed = assemble(EquationTerms::new(Some(2.0), Some(-0.5)));
        for i in 0..4 {
            assert!((mixed[i] - (2.0 * adv[i] - 0.5 * dif[i])).abs() < TOL);
        }
    }

    #[test]
    fn test_dof_mismatch_is_rejected() {
        let element = centroid(&ElementDofs::zeros(4, 0));
        let params = EmWaveParameters::normalized(1.0);
        let problem = ProblemDescription::full_wave(3);
        let optics = ConstantOptics::vacuum();
        let config = EmWaveConfig::new(&params, &problem, &optics);

        let mut acc = LocalAccumulator::new(3, 0);
        let result = assemble_emwave(
            &TimeStep::new(0.0),
            &element,
            &EquationSelection::for_variable(e1r()),
            &config,
            &mut acc,
        );
        assert_eq!(
            result,
            Err(AssemblyError::DofMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert!(acc.is_zero());
    }

    #[test]
    fn test_geometric_sensitivity_total() {
        let g = GeometricSensitivity {
            basis_gradient: 1.0,
            jacobian_determinant: -0.25,
            volume_scale: 0.5,
        };
        assert!((g.total() - 1.25).abs() < TOL);
    }
}
