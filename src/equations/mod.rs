//! Time-harmonic Maxwell equations in real/imaginary split form.
//!
//! With fields E, H ∝ exp(iωt) the curl equations become
//!
//! ∇ × H = iωε E
//! ∇ × E = -iωμ H
//!
//! Splitting every component into real and imaginary parts gives twelve
//! scalar equations. Each one is assembled in weak form as
//!
//! (a·u + c·u*) φ_i  -  Σ_{p,q} ε_{p,q,d} ∂φ_i/∂x_p X_q
//!
//! where `u` is the primary unknown, `u*` its real/imaginary partner, `d`
//! its component, and `X` the partner field (H for an E equation, E for an H
//! equation). The coefficients `a` (advection) and `c` (conjugate) come from
//! the lookup table in [`CouplingCoefficients`].

mod em_wave;
mod problem;

pub use em_wave::{CouplingCoefficients, EPSILON_0, EmWaveParameters, MU_0};
pub use problem::{EquationTerms, ProblemDescription};
