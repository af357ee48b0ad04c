//! Complex permittivity, impedance and interface coefficients.
//!
//! ε = (n + ik)² ε_base
//! Z = sqrt(μ / ε)
//!
//! At an interface between an interior medium (Z₁) and an exterior medium
//! (Z₂) a normally incident plane wave is split into
//!
//! Γ = (Z₂ - Z₁) / (Z₂ + Z₁)     (reflection)
//! τ = 2 Z₂ / (Z₂ + Z₁)          (transmission)
//!
//! so that τ = 1 + Γ for any pair.

use num_complex::Complex64;

use super::OpticalConstants;
use crate::error::{AssemblyError, Result};

/// Complex permittivity ε = (n + ik)² ε_base.
#[inline]
pub fn complex_permittivity(optics: OpticalConstants, base_permittivity: f64) -> Complex64 {
    let m = optics.complex_index();
    m * m * base_permittivity
}

/// Wave impedance Z = sqrt(μ / ε), principal branch.
#[inline]
pub fn impedance(permeability: f64, permittivity: Complex64) -> Complex64 {
    (Complex64::new(permeability, 0.0) / permittivity).sqrt()
}

/// Reflection and transmission coefficients of an impedance pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterfaceCoefficients {
    /// Reflection coefficient Γ
    pub reflection: Complex64,
    /// Transmission coefficient τ
    pub transmission: Complex64,
}

impl InterfaceCoefficients {
    /// Coefficients for an interior impedance `z1` and exterior impedance `z2`.
    ///
    /// The denominators are not guarded: callers must ensure `z1 + z2` and
    /// `1 + Γ` are away from zero (see [`checked`](Self::checked)).
    pub fn new(z1: Complex64, z2: Complex64) -> Self {
        let sum = z2 + z1;
        Self {
            reflection: (z2 - z1) / sum,
            transmission: 2.0 * z2 / sum,
        }
    }

    /// Like [`new`](Self::new), but reject pairs whose denominators fall
    /// below `tolerance` relative to the impedance magnitudes.
    ///
    /// Intended for upstream validation of material pairs before any
    /// far-field assembly is attempted.
    pub fn checked(z1: Complex64, z2: Complex64, tolerance: f64) -> Result<Self> {
        let scale = z1.norm().max(z2.norm());
        let sum = (z2 + z1).norm();
        if !(scale > 0.0) || sum <= tolerance * scale {
            log::warn!(
                "rejecting degenerate impedance pair Z1 = {z1}, Z2 = {z2} (|Z1 + Z2| = {sum:e})"
            );
            return Err(AssemblyError::DegenerateImpedance(sum));
        }
        let coeffs = Self::new(z1, z2);
        let one_plus_gamma = (1.0 + coeffs.reflection).norm();
        if one_plus_gamma <= tolerance {
            log::warn!("rejecting impedance pair with |1 + Γ| = {one_plus_gamma:e}");
            return Err(AssemblyError::DegenerateImpedance(one_plus_gamma));
        }
        Ok(coeffs)
    }

    /// τ / (1 + Γ), the factor applied to the interior field.
    #[inline]
    pub fn transfer_ratio(&self) -> Complex64 {
        self.transmission / (1.0 + self.reflection)
    }
}
