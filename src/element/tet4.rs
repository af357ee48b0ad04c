//! Linear (P1) tetrahedron with analytic mesh sensitivities.
//!
//! The reference element has vertices (0,0,0), (1,0,0), (0,1,0), (0,0,1)
//! and shape functions
//!
//! φ₀ = 1 - ξ - η - ζ,  φ₁ = ξ,  φ₂ = η,  φ₃ = ζ
//!
//! The map x(ξ) = Σ_j x_j φ_j(ξ) is affine, so the Jacobian
//! J_{bm} = ∂x_b/∂ξ_m is constant per element. Physical gradients are
//! g_j = J^{-T} ∇̂φ_j. Moving vertex j along axis b gives
//!
//! ∂(det J)/∂x_{b,j} = det J · g_j[b]
//! ∂g_i[p]/∂x_{b,j} = -g_i[b] · g_j[p]

use crate::boundary::BoundaryPoint;
use crate::types::Component;

use super::{BasisFunctions, ElementContext, ElementDofs, QuadraturePoint};

/// Reference gradients ∇̂φ_j.
const REFERENCE_GRADIENTS: [[f64; 3]; 4] = [
    [-1.0, -1.0, -1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Volume scale factor h3 of the coordinate system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleFactor {
    /// h3 = 1
    #[default]
    Cartesian,
    /// h3 = x_axis (axisymmetric, radius along `axis`)
    Radial(Component),
}

impl ScaleFactor {
    /// h3 and ∂h3/∂x at a position.
    pub fn evaluate(&self, position: &[f64; 3]) -> (f64, [f64; 3]) {
        match self {
            Self::Cartesian => (1.0, [0.0; 3]),
            Self::Radial(axis) => {
                let mut dh3 = [0.0; 3];
                dh3[axis.index()] = 1.0;
                (position[axis.index()], dh3)
            }
        }
    }
}

/// Four-node affine tetrahedron.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearTetrahedron {
    /// Vertex coordinates, indexed `[j][b]`
    pub vertices: [[f64; 3]; 4],
}

impl LinearTetrahedron {
    /// Number of nodes (= local dofs per unknown).
    pub const N_NODES: usize = 4;

    /// Create from vertex coordinates.
    pub fn new(vertices: [[f64; 3]; 4]) -> Self {
        Self { vertices }
    }

    /// The reference tetrahedron itself.
    pub fn reference() -> Self {
        Self::new([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Shape function values at reference coordinates ξ.
    pub fn shape_functions(xi: &[f64; 3]) -> [f64; 4] {
        [1.0 - xi[0] - xi[1] - xi[2], xi[0], xi[1], xi[2]]
    }

    /// Single-point centroid rule (exact for linears), weights sum to 1/6.
    pub fn centroid_rule() -> Vec<([f64; 3], f64)> {
        vec![([0.25; 3], 1.0 / 6.0)]
    }

    /// Four-point rule, exact for quadratics.
    pub fn four_point_rule() -> Vec<([f64; 3], f64)> {
        let a = 0.585_410_196_624_968_5;
        let b = 0.138_196_601_125_010_5;
        let w = 1.0 / 24.0;
        vec![
            ([b, b, b], w),
            ([a, b, b], w),
            ([b, a, b], w),
            ([b, b, a], w),
        ]
    }

    /// Jacobian J_{bm} = ∂x_b/∂ξ_m.
    pub fn jacobian(&self) -> [[f64; 3]; 3] {
        let v = &self.vertices;
        let mut jac = [[0.0; 3]; 3];
        for (b, row) in jac.iter_mut().enumerate() {
            for (m, entry) in row.iter_mut().enumerate() {
                *entry = v[m + 1][b] - v[0][b];
            }
        }
        jac
    }

    /// Jacobian determinant (6 × signed volume).
    pub fn det_j(&self) -> f64 {
        det3(&self.jacobian())
    }

    /// Signed volume.
    pub fn volume(&self) -> f64 {
        self.det_j() / 6.0
    }

    /// Physical position of reference coordinates ξ.
    pub fn position_at(&self, xi: &[f64; 3]) -> [f64; 3] {
        let phi = Self::shape_functions(xi);
        let mut x = [0.0; 3];
        for (vertex, p) in self.vertices.iter().zip(phi) {
            for b in 0..3 {
                x[b] += vertex[b] * p;
            }
        }
        x
    }

    /// Physical gradients g_j = J^{-T} ∇̂φ_j.
    pub fn gradients(&self) -> [[f64; 3]; 4] {
        let jac = self.jacobian();
        let det = det3(&jac);
        debug_assert!(det.abs() > 0.0, "degenerate tetrahedron");
        let inv = inverse3(&jac, det);

        let mut grads = [[0.0; 3]; 4];
        for (g, ref_g) in grads.iter_mut().zip(REFERENCE_GRADIENTS.iter()) {
            for p in 0..3 {
                // g[p] = Σ_m (J^{-1})_{mp} ĝ[m]
                g[p] = (0..3).map(|m| inv[m][p] * ref_g[m]).sum();
            }
        }
        grads
    }

    /// Basis functions, geometry and mesh sensitivities at ξ.
    pub fn basis_at(&self, xi: &[f64; 3]) -> BasisFunctions {
        let det_j = self.det_j();
        let grads = self.gradients();

        let d_det_j_dmesh = grads
            .iter()
            .map(|g| [det_j * g[0], det_j * g[1], det_j * g[2]])
            .collect();

        let d_grad_phi_dmesh = grads
            .iter()
            .map(|gi| {
                grads
                    .iter()
                    .map(|gj| {
                        let mut d = [[0.0; 3]; 3];
                        for (p, row) in d.iter_mut().enumerate() {
                            for (b, entry) in row.iter_mut().enumerate() {
                                *entry = -gi[b] * gj[p];
                            }
                        }
                        d
                    })
                    .collect()
            })
            .collect();

        BasisFunctions {
            phi: Self::shape_functions(xi).to_vec(),
            grad_phi: grads.to_vec(),
            det_j,
            d_det_j_dmesh,
            d_grad_phi_dmesh,
        }
    }

    /// Quadrature point data at ξ.
    pub fn quadrature_point(&self, xi: &[f64; 3], weight: f64, scale: ScaleFactor) -> QuadraturePoint {
        let position = self.position_at(xi);
        let (h3, dh3_dq) = scale.evaluate(&position);
        QuadraturePoint {
            weight,
            position,
            h3,
            dh3_dq,
        }
    }

    /// Full element context at ξ with fields interpolated from `dofs`.
    pub fn context_at(
        &self,
        xi: &[f64; 3],
        weight: f64,
        scale: ScaleFactor,
        dofs: &ElementDofs,
    ) -> ElementContext {
        let basis = self.basis_at(xi);
        let fields = dofs.interpolate(&basis.phi);
        ElementContext::new(self.quadrature_point(xi, weight, scale), basis, fields)
    }

    /// Contexts for every point of a quadrature rule.
    pub fn contexts(
        &self,
        rule: &[([f64; 3], f64)],
        scale: ScaleFactor,
        dofs: &ElementDofs,
    ) -> Vec<ElementContext> {
        rule.iter()
            .map(|(xi, w)| self.context_at(xi, *w, scale, dofs))
            .collect()
    }

    /// Outward unit normal of the face opposite vertex `face`.
    pub fn face_normal(&self, face: usize) -> [f64; 3] {
        let v = &self.vertices;
        let others: Vec<usize> = (0..4).filter(|&j| j != face % 4).collect();
        let (a, b, c) = (v[others[0]], v[others[1]], v[others[2]]);
        let ab = sub(&b, &a);
        let ac = sub(&c, &a);
        let mut n = crate::algebra::cross(&ab, &ac);

        // Point away from the opposite vertex
        let inward = sub(&v[face % 4], &a);
        if dot(&n, &inward) > 0.0 {
            n = [-n[0], -n[1], -n[2]];
        }
        let len = dot(&n, &n).sqrt();
        [n[0] / len, n[1] / len, n[2] / len]
    }

    /// Boundary point at reference coordinates ξ lying on face `face`.
    pub fn boundary_point(
        &self,
        face: usize,
        xi: &[f64; 3],
        time: f64,
        dofs: &ElementDofs,
    ) -> BoundaryPoint {
        let phi = Self::shape_functions(xi).to_vec();
        BoundaryPoint {
            local_coords: *xi,
            normal: self.face_normal(face),
            fields: dofs.interpolate(&phi),
            phi,
            time,
            position: self.position_at(xi),
        }
    }
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Inverse through the adjugate.
fn inverse3(m: &[[f64; 3]; 3], det: f64) -> [[f64; 3]; 3] {
    let inv_det = 1.0 / det;
    let mut inv = [[0.0; 3]; 3];
    for (r, row) in inv.iter_mut().enumerate() {
        for (c, entry) in row.iter_mut().enumerate() {
            // Cofactor of (c, r)
            let (r0, r1) = ((c + 1) % 3, (c + 2) % 3);
            let (c0, c1) = ((r + 1) % 3, (r + 2) % 3);
            *entry = (m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]) * inv_det;
        }
    }
    inv
}

fn sub(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
