//! Optical material properties and their sensitivities.
//!
//! The assembler never evaluates a material model itself. It asks an
//! [`OpticalModel`] for the refractive index `n` and extinction coefficient
//! `k` at the quadrature point, together with a bundle of per-dof
//! sensitivities:
//!
//! ```text
//! ∂n/∂u_j, ∂k/∂u_j   for u ∈ {T, x_b, c_w},  j = local dof
//! ```
//!
//! The bundle is consumed generically, so a new sensitivity source only
//! needs a new [`Unknown`] slot, not a change to the curl-term logic.
//!
//! # Available Models
//!
//! | Model | Description |
//! |-------|-------------|
//! | [`ConstantOptics`] | Fixed `(n, k)`, no sensitivities |
//! | [`LinearOptics`] | Linearised in temperature, position and species |

mod impedance;
mod optics;

pub use impedance::{InterfaceCoefficients, complex_permittivity, impedance};
pub use optics::{ConstantOptics, LinearOptics, SpeciesCoefficient};

use num_complex::Complex64;

use crate::types::{Component, Unknown};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Refractive index and extinction coefficient of a medium.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpticalConstants {
    /// Refractive index n
    pub n: f64,
    /// Extinction coefficient k
    pub k: f64,
}

impl OpticalConstants {
    /// Create a new pair of optical constants.
    pub const fn new(n: f64, k: f64) -> Self {
        Self { n, k }
    }

    /// Lossless vacuum: n = 1, k = 0.
    pub const VACUUM: Self = Self::new(1.0, 0.0);

    /// Complex refractive index n + ik.
    #[inline]
    pub fn complex_index(&self) -> Complex64 {
        Complex64::new(self.n, self.k)
    }
}

/// Which sensitivities the caller needs from the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensitivityRequest {
    /// Temperature is an active unknown
    pub temperature: bool,
    /// Number of active mesh-displacement components (0 when the mesh is fixed)
    pub mesh_components: usize,
    /// Number of active species
    pub n_species: usize,
}

impl SensitivityRequest {
    /// No sensitivities at all (residual-only evaluation).
    pub const NONE: Self = Self {
        temperature: false,
        mesh_components: 0,
        n_species: 0,
    };

    /// Every requested source, in Jacobian slot order.
    pub fn sources(&self) -> impl Iterator<Item = Unknown> + '_ {
        let temperature = self.temperature.then_some(Unknown::Temperature);
        let mesh = Component::ALL
            .into_iter()
            .take(self.mesh_components)
            .map(Unknown::MeshDisplacement);
        let species = (0..self.n_species).map(Unknown::MassFraction);
        temperature.into_iter().chain(mesh).chain(species)
    }
}

/// State at the point where the optical model is evaluated.
#[derive(Clone, Copy, Debug)]
pub struct MaterialPoint<'a> {
    /// Current time
    pub time: f64,
    /// Physical position of the quadrature point
    pub position: [f64; 3],
    /// Temperature at the point
    pub temperature: f64,
    /// Species mass fractions at the point
    pub mass_fractions: &'a [f64],
    /// Basis values φ_j at the point, used to expand pointwise derivatives
    /// into per-dof sensitivities
    pub phi: &'a [f64],
    /// Sensitivities the caller will consume
    pub request: SensitivityRequest,
}

/// Per-dof sensitivities of `n` and `k` to one source unknown.
#[derive(Clone, Debug, PartialEq)]
pub struct OpticalSensitivity {
    /// Unknown the derivative is taken against
    pub source: Unknown,
    /// ∂n/∂u_j
    pub d_n: Vec<f64>,
    /// ∂k/∂u_j
    pub d_k: Vec<f64>,
}

impl OpticalSensitivity {
    /// Expand pointwise derivatives through the basis:
    /// u(x) = Σ u_j φ_j(x) ⇒ ∂n/∂u_j = (dn/du) φ_j.
    pub fn from_pointwise(source: Unknown, dn_du: f64, dk_du: f64, phi: &[f64]) -> Self {
        Self {
            source,
            d_n: phi.iter().map(|p| dn_du * p).collect(),
            d_k: phi.iter().map(|p| dk_du * p).collect(),
        }
    }
}

/// Output of an optical model at one quadrature point.
#[derive(Clone, Debug, PartialEq)]
pub struct OpticalProperties {
    /// Optical constants (n, k)
    pub constants: OpticalConstants,
    /// Sensitivity bundle; sources that are absent have zero sensitivity
    pub sensitivities: Vec<OpticalSensitivity>,
}

impl OpticalProperties {
    /// Properties without any sensitivities.
    pub fn constant(constants: OpticalConstants) -> Self {
        Self {
            constants,
            sensitivities: Vec::new(),
        }
    }

    /// Sensitivity entry for a given source, if the model produced one.
    pub fn sensitivity(&self, source: Unknown) -> Option<&OpticalSensitivity> {
        self.sensitivities.iter().find(|s| s.source == source)
    }
}

/// Resolver for refractive index and extinction coefficient.
///
/// Implementations must be thread-safe (`Send + Sync`) so elements can be
/// assembled in parallel against a shared model.
pub trait OpticalModel: Send + Sync {
    /// Evaluate `(n, k)` and the requested sensitivities at a point.
    fn evaluate(&self, point: &MaterialPoint<'_>) -> OpticalProperties;

    /// Name of this model for debugging and logging.
    fn name(&self) -> &'static str;
}
