//! Which equations, terms and coupled unknowns are active for a material block.

use crate::material::SensitivityRequest;
use crate::types::{Component, EmVariable, Unknown};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Term multipliers for one active equation.
///
/// `None` switches a term type off; `Some(m)` scales it by `m`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquationTerms {
    /// Pointwise (coefficient × field) term
    pub advection: Option<f64>,
    /// Curl (permutation-tensor) term
    pub diffusion: Option<f64>,
}

impl EquationTerms {
    /// Both term types active with unit multipliers.
    pub const FULL: Self = Self {
        advection: Some(1.0),
        diffusion: Some(1.0),
    };

    /// Create with explicit multipliers.
    pub const fn new(advection: Option<f64>, diffusion: Option<f64>) -> Self {
        Self {
            advection,
            diffusion,
        }
    }

    /// Only the pointwise term.
    pub const fn advection_only(multiplier: f64) -> Self {
        Self::new(Some(multiplier), None)
    }

    /// Only the curl term.
    pub const fn diffusion_only(multiplier: f64) -> Self {
        Self::new(None, Some(multiplier))
    }
}

impl Default for EquationTerms {
    fn default() -> Self {
        Self::FULL
    }
}

/// Problem description for one material block.
///
/// Replaces global "equation active" and "variable active" tables with an
/// explicit value passed into every assembly call.
///
/// # Example
///
/// ```
/// use emwave_rs::equations::{EquationTerms, ProblemDescription};
/// use emwave_rs::types::{Component, EmVariable, FieldFamily, Part, Unknown};
///
/// let problem = ProblemDescription::full_wave(3)
///     .with_temperature(true)
///     .with_species(2);
///
/// let e1r = EmVariable::new(FieldFamily::Electric, Component::X, Part::Real);
/// assert_eq!(problem.equation_terms(e1r), Some(&EquationTerms::FULL));
/// assert!(problem.is_active(Unknown::MassFraction(1)));
/// assert!(!problem.is_active(Unknown::MeshDisplacement(Component::X)));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProblemDescription {
    dim: usize,
    equations: [Option<EquationTerms>; EmVariable::COUNT],
    em_variables: [bool; EmVariable::COUNT],
    temperature: bool,
    mesh_motion: bool,
    n_species: usize,
}

impl ProblemDescription {
    /// Empty problem of spatial dimension `dim` (clamped to 1..=3).
    pub fn new(dim: usize) -> Self {
        Self {
            dim: dim.clamp(1, 3),
            equations: [None; EmVariable::COUNT],
            em_variables: [false; EmVariable::COUNT],
            temperature: false,
            mesh_motion: false,
            n_species: 0,
        }
    }

    /// All twelve equations with both terms, all twelve EM unknowns active.
    pub fn full_wave(dim: usize) -> Self {
        Self {
            equations: [Some(EquationTerms::FULL); EmVariable::COUNT],
            em_variables: [true; EmVariable::COUNT],
            ..Self::new(dim)
        }
    }

    /// Activate an equation (and its unknown) with the given terms.
    pub fn with_equation(mut self, var: EmVariable, terms: EquationTerms) -> Self {
        self.equations[var.slot()] = Some(terms);
        self.em_variables[var.slot()] = true;
        self
    }

    /// Deactivate an equation; its unknown stays as it was.
    pub fn without_equation(mut self, var: EmVariable) -> Self {
        self.equations[var.slot()] = None;
        self
    }

    /// Set whether an EM unknown is part of the solution vector.
    pub fn with_variable(mut self, var: EmVariable, active: bool) -> Self {
        self.em_variables[var.slot()] = active;
        self
    }

    /// Set whether temperature is an active unknown.
    pub fn with_temperature(mut self, active: bool) -> Self {
        self.temperature = active;
        self
    }

    /// Set whether mesh displacement unknowns are active.
    pub fn with_mesh_motion(mut self, active: bool) -> Self {
        self.mesh_motion = active;
        self
    }

    /// Set the number of species mass-fraction unknowns.
    pub fn with_species(mut self, n_species: usize) -> Self {
        self.n_species = n_species;
        self
    }

    /// Spatial dimension of the mesh.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of species.
    #[inline]
    pub fn n_species(&self) -> usize {
        self.n_species
    }

    /// Terms of an equation, `None` if the equation is inactive.
    #[inline]
    pub fn equation_terms(&self, var: EmVariable) -> Option<&EquationTerms> {
        self.equations[var.slot()].as_ref()
    }

    /// Whether an unknown is part of the problem.
    pub fn is_active(&self, unknown: Unknown) -> bool {
        match unknown {
            Unknown::Em(var) => self.em_variables[var.slot()],
            Unknown::Temperature => self.temperature,
            Unknown::MeshDisplacement(c) => self.mesh_motion && c.index() < self.dim,
            Unknown::MassFraction(w) => w < self.n_species,
        }
    }

    /// Active mesh-displacement components.
    pub fn mesh_components(&self) -> impl Iterator<Item = Component> + '_ {
        Component::ALL
            .into_iter()
            .take(self.dim)
            .filter(move |_| self.mesh_motion)
    }

    /// Total number of Jacobian unknown slots.
    #[inline]
    pub fn n_unknowns(&self) -> usize {
        Unknown::count(self.n_species)
    }

    /// Sensitivities the optical model must provide for a Jacobian pass.
    pub fn sensitivity_request(&self) -> SensitivityRequest {
        SensitivityRequest {
            temperature: self.temperature,
            mesh_components: if self.mesh_motion { self.dim } else { 0 },
            n_species: self.n_species,
        }
    }
}
