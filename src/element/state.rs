//! Field state at a point and nodal dof storage.

use num_complex::Complex64;

use crate::types::{EmVariable, FieldFamily, Part, Unknown};

/// The unknowns evaluated at one point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldState {
    /// Re E
    pub e_real: [f64; 3],
    /// Im E
    pub e_imag: [f64; 3],
    /// Re H
    pub h_real: [f64; 3],
    /// Im H
    pub h_imag: [f64; 3],
    /// Temperature
    pub temperature: f64,
    /// Species mass fractions
    pub mass_fractions: Vec<f64>,
}

impl FieldState {
    /// One (family, part) vector.
    #[inline]
    pub fn vector(&self, family: FieldFamily, part: Part) -> &[f64; 3] {
        match (family, part) {
            (FieldFamily::Electric, Part::Real) => &self.e_real,
            (FieldFamily::Electric, Part::Imag) => &self.e_imag,
            (FieldFamily::Magnetic, Part::Real) => &self.h_real,
            (FieldFamily::Magnetic, Part::Imag) => &self.h_imag,
        }
    }

    fn vector_mut(&mut self, family: FieldFamily, part: Part) -> &mut [f64; 3] {
        match (family, part) {
            (FieldFamily::Electric, Part::Real) => &mut self.e_real,
            (FieldFamily::Electric, Part::Imag) => &mut self.e_imag,
            (FieldFamily::Magnetic, Part::Real) => &mut self.h_real,
            (FieldFamily::Magnetic, Part::Imag) => &mut self.h_imag,
        }
    }

    /// Value of one scalar EM unknown.
    #[inline]
    pub fn value(&self, var: EmVariable) -> f64 {
        self.vector(var.family, var.part)[var.component.index()]
    }

    /// Set one scalar EM unknown.
    pub fn set(&mut self, var: EmVariable, value: f64) {
        self.vector_mut(var.family, var.part)[var.component.index()] = value;
    }

    /// Complex amplitude of a field family: Re + i Im.
    pub fn complex(&self, family: FieldFamily) -> [Complex64; 3] {
        let re = self.vector(family, Part::Real);
        let im = self.vector(family, Part::Imag);
        [
            Complex64::new(re[0], im[0]),
            Complex64::new(re[1], im[1]),
            Complex64::new(re[2], im[2]),
        ]
    }
}

/// Nodal values of the field unknowns of one element.
///
/// Mesh coordinates are held by the element geometry, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementDofs {
    n_dof: usize,
    em: Vec<Vec<f64>>,
    temperature: Vec<f64>,
    mass_fractions: Vec<Vec<f64>>,
}

impl ElementDofs {
    /// All-zero dofs.
    pub fn zeros(n_dof: usize, n_species: usize) -> Self {
        Self {
            n_dof,
            em: vec![vec![0.0; n_dof]; EmVariable::COUNT],
            temperature: vec![0.0; n_dof],
            mass_fractions: vec![vec![0.0; n_dof]; n_species],
        }
    }

    /// Fill every stored unknown from a function of (unknown, dof).
    pub fn from_fn(n_dof: usize, n_species: usize, f: impl Fn(Unknown, usize) -> f64) -> Self {
        let mut dofs = Self::zeros(n_dof, n_species);
        for var in EmVariable::all() {
            for j in 0..n_dof {
                dofs.em[var.slot()][j] = f(Unknown::Em(var), j);
            }
        }
        for j in 0..n_dof {
            dofs.temperature[j] = f(Unknown::Temperature, j);
        }
        for (w, values) in dofs.mass_fractions.iter_mut().enumerate() {
            for (j, v) in values.iter_mut().enumerate() {
                *v = f(Unknown::MassFraction(w), j);
            }
        }
        dofs
    }

    /// Number of dofs per unknown.
    #[inline]
    pub fn n_dof(&self) -> usize {
        self.n_dof
    }

    /// Number of species.
    #[inline]
    pub fn n_species(&self) -> usize {
        self.mass_fractions.len()
    }

    /// Nodal values of an unknown; `None` for mesh displacement or an
    /// unknown species.
    pub fn values(&self, unknown: Unknown) -> Option<&[f64]> {
        match unknown {
            Unknown::Em(var) => Some(&self.em[var.slot()]),
            Unknown::Temperature => Some(&self.temperature),
            Unknown::MeshDisplacement(_) => None,
            Unknown::MassFraction(w) => self.mass_fractions.get(w).map(Vec::as_slice),
        }
    }

    /// Mutable nodal values of an unknown.
    pub fn values_mut(&mut self, unknown: Unknown) -> Option<&mut [f64]> {
        match unknown {
            Unknown::Em(var) => Some(&mut self.em[var.slot()]),
            Unknown::Temperature => Some(&mut self.temperature),
            Unknown::MeshDisplacement(_) => None,
            Unknown::MassFraction(w) => self.mass_fractions.get_mut(w).map(Vec::as_mut_slice),
        }
    }

    /// Interpolate every unknown at a point with basis values `phi`.
    pub fn interpolate(&self, phi: &[f64]) -> FieldState {
        let dot = |values: &[f64]| values.iter().zip(phi).map(|(u, p)| u * p).sum::<f64>();

        let mut state = FieldState {
            temperature: dot(&self.temperature),
            mass_fractions: self.mass_fractions.iter().map(|c| dot(c)).collect(),
            ..FieldState::default()
        };
        for var in EmVariable::all() {
            state.set(var, dot(&self.em[var.slot()]));
        }
        state
    }
}
