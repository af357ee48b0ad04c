//! Element context for one quadrature-point evaluation.
//!
//! The mesh, basis functions and quadrature belong to the surrounding
//! framework. At each quadrature point it hands the assembler a read-only
//! [`ElementContext`]:
//!
//! - basis values φ_j and physical gradients ∇φ_j,
//! - Jacobian determinant det J and quadrature weight,
//! - volume scale factor h3 (1 for Cartesian, r for axisymmetric) and ∂h3/∂x,
//! - mesh sensitivities ∂(det J)/∂x_{b,j} and ∂(∂φ_i/∂x_p)/∂x_{b,j},
//! - the field state interpolated at the point.
//!
//! One interpolation is shared by every unknown of the element, so the
//! dof count of an active unknown is the basis size.
//!
//! [`LinearTetrahedron`] builds all of the above analytically and serves as
//! a reference implementation of the framework side.

mod state;
mod tet4;

pub use state::{ElementDofs, FieldState};
pub use tet4::{LinearTetrahedron, ScaleFactor};

use crate::equations::ProblemDescription;
use crate::material::{MaterialPoint, SensitivityRequest};
use crate::types::Unknown;

/// Basis functions and geometry at one quadrature point.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisFunctions {
    /// φ_j
    pub phi: Vec<f64>,
    /// ∂φ_j/∂x_p, indexed `[j][p]`
    pub grad_phi: Vec<[f64; 3]>,
    /// Jacobian determinant of the reference-to-physical map
    pub det_j: f64,
    /// ∂(det J)/∂x_{b,j}, indexed `[j][b]`
    pub d_det_j_dmesh: Vec<[f64; 3]>,
    /// ∂(∂φ_i/∂x_p)/∂x_{b,j}, indexed `[i][j][p][b]`
    pub d_grad_phi_dmesh: Vec<Vec<[[f64; 3]; 3]>>,
}

impl BasisFunctions {
    /// Number of local dofs.
    #[inline]
    pub fn n_dof(&self) -> usize {
        self.phi.len()
    }
}

/// Quadrature point data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraturePoint {
    /// Quadrature weight
    pub weight: f64,
    /// Physical position
    pub position: [f64; 3],
    /// Volume scale factor h3
    pub h3: f64,
    /// ∂h3/∂x_b; a mesh dof (b, j) moves h3 by `dh3_dq[b] · φ_j`
    pub dh3_dq: [f64; 3],
}

impl QuadraturePoint {
    /// Cartesian point: h3 = 1, no scale-factor sensitivity.
    pub fn cartesian(weight: f64, position: [f64; 3]) -> Self {
        Self {
            weight,
            position,
            h3: 1.0,
            dh3_dq: [0.0; 3],
        }
    }
}

/// Everything the volume assembler reads at one quadrature point.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementContext {
    pub quadrature: QuadraturePoint,
    pub basis: BasisFunctions,
    pub fields: FieldState,
}

impl ElementContext {
    /// Create a new context.
    pub fn new(quadrature: QuadraturePoint, basis: BasisFunctions, fields: FieldState) -> Self {
        Self {
            quadrature,
            basis,
            fields,
        }
    }

    /// Number of local dofs of the shared interpolation.
    #[inline]
    pub fn n_dof(&self) -> usize {
        self.basis.n_dof()
    }

    /// Local dof count of an unknown: the basis size if active, else zero.
    pub fn dof_count(&self, problem: &ProblemDescription, unknown: Unknown) -> usize {
        if problem.is_active(unknown) {
            self.n_dof()
        } else {
            0
        }
    }

    /// Weighted volume measure det J · h3 · w.
    #[inline]
    pub fn measure(&self) -> f64 {
        self.basis.det_j * self.quadrature.h3 * self.quadrature.weight
    }

    /// Material point handed to the optical model.
    pub fn material_point(&self, time: f64, request: SensitivityRequest) -> MaterialPoint<'_> {
        MaterialPoint {
            time,
            position: self.quadrature.position,
            temperature: self.fields.temperature,
            mass_fractions: &self.fields.mass_fractions,
            phi: &self.basis.phi,
            request,
        }
    }
}
