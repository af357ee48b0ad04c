//! # emwave-rs
//!
//! Element-level assembly for time-harmonic electromagnetic waves.
//!
//! This crate provides the building blocks for a frequency-domain Maxwell
//! solver in real/imaginary split form:
//! - Permutation-tensor algebra (Levi-Civita, Kronecker, complex cross product)
//! - Field-variable and coupled-unknown types with dense slot numbering
//! - Optical material models (n, k) with per-dof sensitivities
//! - Volume residual and analytic Jacobian of the twelve scalar equations
//! - Far-field impedance-mismatch boundary conditions
//! - A reference linear tetrahedron producing element contexts
//!
//! Mesh handling, global assembly and linear solves belong to the caller.

pub mod algebra;
pub mod assembly;
pub mod boundary;
pub mod element;
pub mod equations;
pub mod error;
pub mod material;
pub mod types;

// Re-export main types for convenience
pub use algebra::{complex_cross, kronecker, permutation};
pub use assembly::{
    EmWaveConfig, EquationSelection, GeometricSensitivity, LocalAccumulator, TimeStep,
    assemble_element, assemble_elements, assemble_emwave,
};
#[cfg(feature = "parallel")]
pub use assembly::assemble_elements_parallel;
pub use boundary::{BoundaryPoint, FarFieldData, FarFieldKind, FarFieldOutput, apply_em_farfield};
pub use element::{
    BasisFunctions, ElementContext, ElementDofs, FieldState, LinearTetrahedron, QuadraturePoint,
    ScaleFactor,
};
pub use equations::{
    CouplingCoefficients, EPSILON_0, EmWaveParameters, EquationTerms, MU_0, ProblemDescription,
};
pub use error::{AssemblyError, Result, status_code};
pub use material::{
    ConstantOptics, InterfaceCoefficients, LinearOptics, MaterialPoint, OpticalConstants,
    OpticalModel, OpticalProperties, OpticalSensitivity, SensitivityRequest, SpeciesCoefficient,
};
pub use types::{Component, EmVariable, FieldFamily, Part, Unknown};
