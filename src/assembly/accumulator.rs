//! Dense per-element residual and Jacobian storage.

use faer::Mat;

use crate::error::{AssemblyError, Result};
use crate::types::{EmVariable, Unknown};

/// Local residual `[equation][dof]` and Jacobian
/// `[equation][unknown slot]` blocks of size `n_dof × n_dof`.
///
/// Zero on creation; the assembler only ever adds to it.
#[derive(Clone, Debug)]
pub struct LocalAccumulator {
    n_dof: usize,
    n_species: usize,
    residual: Vec<Vec<f64>>,
    jacobian: Vec<Vec<Mat<f64>>>,
}

impl LocalAccumulator {
    /// Zeroed accumulator for `n_dof` local dofs and `n_species` species.
    pub fn new(n_dof: usize, n_species: usize) -> Self {
        let n_unknowns = Unknown::count(n_species);
        Self {
            n_dof,
            n_species,
            residual: vec![vec![0.0; n_dof]; EmVariable::COUNT],
            jacobian: (0..EmVariable::COUNT)
                .map(|_| (0..n_unknowns).map(|_| Mat::zeros(n_dof, n_dof)).collect())
                .collect(),
        }
    }

    /// Number of local dofs.
    #[inline]
    pub fn n_dof(&self) -> usize {
        self.n_dof
    }

    /// Number of species blocks.
    #[inline]
    pub fn n_species(&self) -> usize {
        self.n_species
    }

    /// Number of Jacobian unknown slots.
    #[inline]
    pub fn n_unknowns(&self) -> usize {
        Unknown::count(self.n_species)
    }

    /// Check this accumulator fits an element with `n_dof` dofs and a
    /// problem with `n_species` species.
    pub fn check_shape(&self, n_dof: usize, n_species: usize) -> Result<()> {
        if self.n_dof != n_dof {
            return Err(AssemblyError::DofMismatch {
                expected: self.n_dof,
                actual: n_dof,
            });
        }
        if self.n_species < n_species {
            return Err(AssemblyError::DofMismatch {
                expected: self.n_unknowns(),
                actual: Unknown::count(n_species),
            });
        }
        Ok(())
    }

    /// Residual row of an equation.
    #[inline]
    pub fn residual(&self, equation: EmVariable) -> &[f64] {
        &self.residual[equation.slot()]
    }

    /// Jacobian block of an equation with respect to an unknown.
    #[inline]
    pub fn jacobian(&self, equation: EmVariable, unknown: Unknown) -> &Mat<f64> {
        &self.jacobian[equation.slot()][unknown.slot()]
    }

    /// Add to residual entry `i` of an equation.
    #[inline]
    pub fn add_residual(&mut self, equation: EmVariable, i: usize, value: f64) {
        self.residual[equation.slot()][i] += value;
    }

    /// Add to Jacobian entry `(i, j)` of an (equation, unknown) block.
    #[inline]
    pub fn add_jacobian(&mut self, equation: EmVariable, unknown: Unknown, i: usize, j: usize, value: f64) {
        self.jacobian[equation.slot()][unknown.slot()][(i, j)] += value;
    }

    /// Largest absolute entry-wise difference to another accumulator of the
    /// same shape, over residual and Jacobian.
    pub fn max_abs_difference(&self, other: &Self) -> f64 {
        let residual = self
            .residual
            .iter()
            .flatten()
            .zip(other.residual.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);

        let mut jacobian: f64 = 0.0;
        for (row_a, row_b) in self.jacobian.iter().zip(&other.jacobian) {
            for (a, b) in row_a.iter().zip(row_b) {
                for j in 0..a.ncols().min(b.ncols()) {
                    for i in 0..a.nrows().min(b.nrows()) {
                        jacobian = jacobian.max((a[(i, j)] - b[(i, j)]).abs());
                    }
                }
            }
        }
        residual.max(jacobian)
    }

    /// Whether every entry is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.residual.iter().flatten().all(|&v| v == 0.0)
            && self.jacobian.iter().flatten().all(|m| {
                (0..m.ncols()).all(|j| (0..m.nrows()).all(|i| m[(i, j)] == 0.0))
            })
    }
}
