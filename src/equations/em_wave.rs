//! Physical parameters and coupling coefficients of the EM wave equations.

use num_complex::Complex64;

use crate::material::{OpticalConstants, complex_permittivity, impedance};
use crate::types::{EmVariable, FieldFamily, Part};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vacuum permeability μ₀ (H/m).
pub const MU_0: f64 = 4.0e-7 * std::f64::consts::PI;

/// Vacuum permittivity ε₀ (F/m).
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;

/// Parameters shared by every element of a frequency-domain EM problem.
///
/// These are read-only during assembly.
///
/// # Example
///
/// ```
/// use emwave_rs::equations::{EmWaveParameters, MU_0};
///
/// // 1550 nm light
/// let omega = 2.0 * std::f64::consts::PI * 2.998e8 / 1.55e-6;
/// let params = EmWaveParameters::new(omega);
/// assert_eq!(params.permeability, MU_0);
///
/// // Nondimensional setup
/// let unit = EmWaveParameters::normalized(1.0);
/// assert_eq!(unit.base_permittivity, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmWaveParameters {
    /// Angular frequency ω (rad/s)
    pub omega: f64,
    /// Magnetic permeability μ, constant across the domain
    pub permeability: f64,
    /// Base permittivity scaling the relative permittivity (n + ik)²
    pub base_permittivity: f64,
}

impl EmWaveParameters {
    /// SI parameters: μ = μ₀, ε_base = ε₀.
    pub fn new(omega: f64) -> Self {
        Self {
            omega,
            permeability: MU_0,
            base_permittivity: EPSILON_0,
        }
    }

    /// Nondimensional parameters: μ = 1, ε_base = 1.
    pub fn normalized(omega: f64) -> Self {
        Self {
            omega,
            permeability: 1.0,
            base_permittivity: 1.0,
        }
    }

    /// Set the magnetic permeability.
    pub fn with_permeability(mut self, permeability: f64) -> Self {
        self.permeability = permeability;
        self
    }

    /// Set the base permittivity.
    pub fn with_base_permittivity(mut self, base_permittivity: f64) -> Self {
        self.base_permittivity = base_permittivity;
        self
    }

    /// Complex permittivity ε = (n + ik)² ε_base of a medium.
    #[inline]
    pub fn permittivity(&self, optics: OpticalConstants) -> Complex64 {
        complex_permittivity(optics, self.base_permittivity)
    }

    /// Wave impedance Z = sqrt(μ/ε) of a medium.
    #[inline]
    pub fn impedance(&self, optics: OpticalConstants) -> Complex64 {
        impedance(self.permeability, self.permittivity(optics))
    }
}

/// Pointwise coefficients of one scalar EM equation and their exact
/// derivatives with respect to `n` and `k`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CouplingCoefficients {
    /// Coefficient of the primary unknown
    pub advection: f64,
    /// Coefficient of the real/imaginary partner
    pub conjugate: f64,
    /// ∂(advection)/∂n
    pub d_advection_dn: f64,
    /// ∂(advection)/∂k
    pub d_advection_dk: f64,
    /// ∂(conjugate)/∂n
    pub d_conjugate_dn: f64,
    /// ∂(conjugate)/∂k
    pub d_conjugate_dk: f64,
}

impl CouplingCoefficients {
    /// Coefficient table for a variable.
    ///
    /// | family | part | advection | conjugate |
    /// |--------|------|-----------|-----------|
    /// | E | Real | ω Im ε | +ω Re ε |
    /// | E | Imag | ω Im ε | -ω Re ε |
    /// | H | Real | 0 | -ω μ |
    /// | H | Imag | 0 | +ω μ |
    ///
    /// With ε = (n + ik)² ε_base the derivatives follow from
    /// ∂ε/∂n = 2(n + ik) ε_base and ∂ε/∂k = 2i(n + ik) ε_base.
    pub fn for_variable(
        var: EmVariable,
        params: &EmWaveParameters,
        optics: OpticalConstants,
    ) -> Self {
        let omega = params.omega;
        match var.family {
            FieldFamily::Electric => {
                let m = optics.complex_index();
                let eps = m * m * params.base_permittivity;
                let deps_dn = 2.0 * m * params.base_permittivity;
                let deps_dk = Complex64::i() * deps_dn;
                let sign = match var.part {
                    Part::Real => 1.0,
                    Part::Imag => -1.0,
                };
                Self {
                    advection: omega * eps.im,
                    conjugate: sign * omega * eps.re,
                    d_advection_dn: omega * deps_dn.im,
                    d_advection_dk: omega * deps_dk.im,
                    d_conjugate_dn: sign * omega * deps_dn.re,
                    d_conjugate_dk: sign * omega * deps_dk.re,
                }
            }
            FieldFamily::Magnetic => {
                let conjugate = match var.part {
                    Part::Real => -omega * params.permeability,
                    Part::Imag => omega * params.permeability,
                };
                Self {
                    conjugate,
                    ..Self::default()
                }
            }
        }
    }

    /// Chain-rule the pointwise term `a·u + c·u*` through `(∂n, ∂k)`.
    #[inline]
    pub fn sensitivity(&self, emf: f64, emf_conj: f64, d_n: f64, d_k: f64) -> f64 {
        emf * (self.d_advection_dn * d_n + self.d_advection_dk * d_k)
            + emf_conj * (self.d_conjugate_dn * d_n + self.d_conjugate_dk * d_k)
    }

    /// Pointwise term `a·u + c·u*`.
    #[inline]
    pub fn apply(&self, emf: f64, emf_conj: f64) -> f64 {
        self.advection * emf + self.conjugate * emf_conj
    }
}
