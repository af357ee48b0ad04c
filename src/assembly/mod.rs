//! Element-level residual and Jacobian assembly for the EM wave equations.
//!
//! The entry point is [`assemble_emwave`], which adds the contribution of
//! one equation at one quadrature point to a caller-owned
//! [`LocalAccumulator`]. [`assemble_element`] loops it over every equation
//! and quadrature point of an element; [`assemble_elements`] and
//! [`assemble_elements_parallel`] do the same for many elements.
//!
//! # Example
//!
//! ```
//! use emwave_rs::assembly::{EmWaveConfig, EquationSelection, LocalAccumulator, TimeStep, assemble_emwave};
//! use emwave_rs::element::{ElementDofs, LinearTetrahedron, ScaleFactor};
//! use emwave_rs::equations::{EmWaveParameters, ProblemDescription};
//! use emwave_rs::material::ConstantOptics;
//! use emwave_rs::types::{Component, EmVariable, FieldFamily, Part};
//!
//! let params = EmWaveParameters::normalized(1.0);
//! let problem = ProblemDescription::full_wave(3);
//! let optics = ConstantOptics::vacuum();
//! let config = EmWaveConfig::new(&params, &problem, &optics);
//!
//! let tet = LinearTetrahedron::reference();
//! let dofs = ElementDofs::zeros(LinearTetrahedron::N_NODES, 0);
//! let element = tet.context_at(&[0.25; 3], 1.0 / 6.0, ScaleFactor::Cartesian, &dofs);
//!
//! let e1r = EmVariable::new(FieldFamily::Electric, Component::X, Part::Real);
//! let mut acc = LocalAccumulator::new(element.n_dof(), problem.n_species());
//! assemble_emwave(&TimeStep::new(0.0), &element, &EquationSelection::for_variable(e1r), &config, &mut acc)
//!     .unwrap();
//! ```

mod accumulator;
mod batch;
mod volume;

pub use accumulator::LocalAccumulator;
pub use batch::{assemble_element, assemble_elements};
#[cfg(feature = "parallel")]
pub use batch::assemble_elements_parallel;
pub use volume::{GeometricSensitivity, assemble_emwave, curl_term};

use crate::equations::{EmWaveParameters, ProblemDescription};
use crate::error::{AssemblyError, Result};
use crate::material::OpticalModel;
use crate::types::EmVariable;

/// Time-stepping context of the surrounding solver.
///
/// Only `time` enters the frequency-domain terms; it is forwarded to the
/// optical model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStep {
    /// Current time
    pub time: f64,
    /// Implicit/explicit blend factor θ
    pub theta: f64,
    /// Time step size
    pub dt: f64,
}

impl TimeStep {
    /// Steady evaluation at `time` (θ = 1, dt = 0).
    pub fn new(time: f64) -> Self {
        Self {
            time,
            theta: 1.0,
            dt: 0.0,
        }
    }

    /// Set θ and dt.
    pub fn with_step(mut self, theta: f64, dt: f64) -> Self {
        self.theta = theta;
        self.dt = dt;
        self
    }
}

/// Which equation row is assembled and which unknown it is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EquationSelection {
    /// Residual row
    pub equation: EmVariable,
    /// Primary unknown
    pub variable: EmVariable,
    /// Real/imaginary partner of the primary unknown
    pub conjugate: EmVariable,
}

impl EquationSelection {
    /// The natural selection for a variable: its own equation and partner.
    pub const fn for_variable(variable: EmVariable) -> Self {
        Self {
            equation: variable,
            variable,
            conjugate: variable.conjugate(),
        }
    }

    /// All twelve natural selections in slot order.
    pub fn all() -> impl Iterator<Item = Self> {
        EmVariable::all().map(Self::for_variable)
    }

    /// Build from raw framework ids, validating each one.
    pub fn from_ids(equation: usize, variable: usize, conjugate: usize) -> Result<Self> {
        let selection = Self {
            equation: EmVariable::try_from(equation)?,
            variable: EmVariable::try_from(variable)?,
            conjugate: EmVariable::try_from(conjugate)?,
        };
        selection.validate()?;
        Ok(selection)
    }

    /// Check that the conjugate is the partner of the variable.
    pub fn validate(&self) -> Result<()> {
        if self.conjugate != self.variable.conjugate() {
            return Err(AssemblyError::mismatched_conjugate(
                self.variable,
                self.conjugate,
            ));
        }
        Ok(())
    }
}

/// Configuration for EM assembly.
///
/// Borrowed, read-only state shared by every element of a material block.
pub struct EmWaveConfig<'a, M: OpticalModel + ?Sized> {
    /// Frequency and material constants
    pub params: &'a EmWaveParameters,
    /// Active equations, terms and unknowns
    pub problem: &'a ProblemDescription,
    /// Optical constants resolver
    pub optics: &'a M,
    /// Whether to assemble the residual
    pub assemble_residual: bool,
    /// Whether to assemble the Jacobian
    pub assemble_jacobian: bool,
}

impl<'a, M: OpticalModel + ?Sized> EmWaveConfig<'a, M> {
    /// Create a new configuration assembling both residual and Jacobian.
    pub fn new(params: &'a EmWaveParameters, problem: &'a ProblemDescription, optics: &'a M) -> Self {
        Self {
            params,
            problem,
            optics,
            assemble_residual: true,
            assemble_jacobian: true,
        }
    }

    /// Set whether the residual is assembled.
    pub fn with_residual(mut self, assemble: bool) -> Self {
        self.assemble_residual = assemble;
        self
    }

    /// Set whether the Jacobian is assembled.
    pub fn with_jacobian(mut self, assemble: bool) -> Self {
        self.assemble_jacobian = assemble;
        self
    }
}

impl<M: OpticalModel + ?Sized> Clone for EmWaveConfig<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: OpticalModel + ?Sized> Copy for EmWaveConfig<'_, M> {}

impl<M: OpticalModel + ?Sized> std::fmt::Debug for EmWaveConfig<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmWaveConfig")
            .field("params", self.params)
            .field("problem", self.problem)
            .field("optics", &self.optics.name())
            .field("assemble_residual", &self.assemble_residual)
            .field("assemble_jacobian", &self.assemble_jacobian)
            .finish()
    }
}
