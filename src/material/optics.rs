//! Reference optical models.

use super::{
    MaterialPoint, OpticalConstants, OpticalModel, OpticalProperties, OpticalSensitivity,
};
use crate::types::Unknown;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constant optical constants, independent of the local state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstantOptics {
    pub constants: OpticalConstants,
}

impl ConstantOptics {
    /// Create a model with fixed `n` and `k`.
    pub const fn new(n: f64, k: f64) -> Self {
        Self {
            constants: OpticalConstants::new(n, k),
        }
    }

    /// Lossless vacuum (n = 1, k = 0).
    pub const fn vacuum() -> Self {
        Self {
            constants: OpticalConstants::VACUUM,
        }
    }
}

impl OpticalModel for ConstantOptics {
    fn evaluate(&self, _point: &MaterialPoint<'_>) -> OpticalProperties {
        OpticalProperties::constant(self.constants)
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

/// Linear dependence of `n` and `k` on one species mass fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeciesCoefficient {
    /// Reference mass fraction c₀
    pub reference: f64,
    /// ∂n/∂c
    pub dn_dc: f64,
    /// ∂k/∂c
    pub dk_dc: f64,
}

/// Optical constants linearised about a reference state.
///
/// n = n₀ + ∂n/∂T (T - T₀) + ∇n · (x - x₀) + Σ_w ∂n/∂c_w (c_w - c_w,₀)
///
/// and likewise for k. Useful for thermo-optic and composition-dependent
/// media, and as an analytic model for Jacobian verification.
///
/// # Example
/// ```
/// use emwave_rs::material::LinearOptics;
///
/// // Thermo-optic glass: n rises 1e-5 per kelvin above 293 K
/// let glass = LinearOptics::new(1.45, 0.0).with_temperature(293.0, 1e-5, 0.0);
/// assert_eq!(glass.n_0, 1.45);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearOptics {
    /// Reference refractive index
    pub n_0: f64,
    /// Reference extinction coefficient
    pub k_0: f64,
    /// Reference temperature T₀
    pub t_0: f64,
    /// Thermo-optic coefficient ∂n/∂T
    pub dn_dt: f64,
    /// ∂k/∂T
    pub dk_dt: f64,
    /// Reference position x₀
    pub x_0: [f64; 3],
    /// Spatial gradient ∇n
    pub dn_dx: [f64; 3],
    /// Spatial gradient ∇k
    pub dk_dx: [f64; 3],
    /// Per-species coefficients; species beyond this list have no effect
    pub species: Vec<SpeciesCoefficient>,
}

impl LinearOptics {
    /// Create a model with constant `(n₀, k₀)` and no dependencies.
    pub fn new(n_0: f64, k_0: f64) -> Self {
        Self {
            n_0,
            k_0,
            t_0: 0.0,
            dn_dt: 0.0,
            dk_dt: 0.0,
            x_0: [0.0; 3],
            dn_dx: [0.0; 3],
            dk_dx: [0.0; 3],
            species: Vec::new(),
        }
    }

    /// Set the temperature dependence.
    pub fn with_temperature(mut self, t_0: f64, dn_dt: f64, dk_dt: f64) -> Self {
        self.t_0 = t_0;
        self.dn_dt = dn_dt;
        self.dk_dt = dk_dt;
        self
    }

    /// Set the spatial gradient about a reference position.
    pub fn with_gradient(mut self, x_0: [f64; 3], dn_dx: [f64; 3], dk_dx: [f64; 3]) -> Self {
        self.x_0 = x_0;
        self.dn_dx = dn_dx;
        self.dk_dx = dk_dx;
        self
    }

    /// Set the species dependence.
    pub fn with_species(mut self, species: Vec<SpeciesCoefficient>) -> Self {
        self.species = species;
        self
    }

    /// Optical constants at a state, without sensitivities.
    pub fn constants_at(
        &self,
        temperature: f64,
        position: &[f64; 3],
        mass_fractions: &[f64],
    ) -> OpticalConstants {
        let dt = temperature - self.t_0;
        let mut n = self.n_0 + self.dn_dt * dt;
        let mut k = self.k_0 + self.dk_dt * dt;

        for b in 0..3 {
            let dx = position[b] - self.x_0[b];
            n += self.dn_dx[b] * dx;
            k += self.dk_dx[b] * dx;
        }

        for (coeff, &c) in self.species.iter().zip(mass_fractions) {
            let dc = c - coeff.reference;
            n += coeff.dn_dc * dc;
            k += coeff.dk_dc * dc;
        }

        OpticalConstants::new(n, k)
    }

    fn pointwise_derivatives(&self, source: Unknown) -> (f64, f64) {
        match source {
            Unknown::Temperature => (self.dn_dt, self.dk_dt),
            Unknown::MeshDisplacement(c) => (self.dn_dx[c.index()], self.dk_dx[c.index()]),
            Unknown::MassFraction(w) => self
                .species
                .get(w)
                .map_or((0.0, 0.0), |s| (s.dn_dc, s.dk_dc)),
            Unknown::Em(_) => (0.0, 0.0),
        }
    }
}

impl OpticalModel for LinearOptics {
    fn evaluate(&self, point: &MaterialPoint<'_>) -> OpticalProperties {
        let constants = self.constants_at(point.temperature, &point.position, point.mass_fractions);

        // Position is interpolated from the nodal coordinates, so a mesh
        // displacement of dof j moves the point by φ_j.
        let sensitivities = point
            .request
            .sources()
            .map(|source| {
                let (dn, dk) = self.pointwise_derivatives(source);
                OpticalSensitivity::from_pointwise(source, dn, dk, point.phi)
            })
            .collect();

        OpticalProperties {
            constants,
            sensitivities,
        }
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
