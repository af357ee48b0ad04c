//! Far-field (absorbing/transmitting) boundary conditions for the EM system.
//!
//! At an outer boundary the interior medium (impedance Z₁) meets an exterior
//! medium (Z₂) from which a plane wave may be incident. The boundary residual
//! enforces the impedance-mismatch relation between the interior field and
//! the incident field, projected onto the real or imaginary part.
//!
//! # Available Boundary Conditions
//!
//! | Kind | Raw id | Residual |
//! |------|--------|----------|
//! | `ElectricReal` | 0 | Re[ τ/(1+Γ) n̂ × E + n̂ × E_inc ] |
//! | `ElectricImag` | 1 | Im[ τ/(1+Γ) n̂ × E + n̂ × E_inc ] |
//! | `MagneticReal` | 2 | Re[ -E/Z₂ · τ/(1+Γ) - E_inc/Z₂ ] |
//! | `MagneticImag` | 3 | Im[ -E/Z₂ · τ/(1+Γ) - E_inc/Z₂ ] |
//!
//! Both residual families are built from the interior electric field, so
//! the Jacobian is taken with respect to the real and imaginary E unknowns.

mod farfield;

pub use farfield::apply_em_farfield;

use std::fmt;

use faer::Mat;
use num_complex::Complex64;

use crate::element::FieldState;
use crate::error::{AssemblyError, Result};
use crate::material::{MaterialPoint, OpticalConstants, SensitivityRequest};
use crate::types::{EmVariable, FieldFamily, Part};

/// Far-field boundary condition kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FarFieldKind {
    /// Real part of the electric (n̂ × E) form
    ElectricReal,
    /// Imaginary part of the electric form
    ElectricImag,
    /// Real part of the magnetic (E/Z) form
    MagneticReal,
    /// Imaginary part of the magnetic form
    MagneticImag,
}

impl FarFieldKind {
    /// All kinds in raw-id order.
    pub const ALL: [FarFieldKind; 4] = [
        Self::ElectricReal,
        Self::ElectricImag,
        Self::MagneticReal,
        Self::MagneticImag,
    ];

    /// Parse a raw framework id.
    pub fn from_id(id: usize) -> Result<Self> {
        Self::ALL.get(id).copied().ok_or_else(|| {
            log::error!("Unknown far-field boundary condition id {id}");
            AssemblyError::InvalidBoundaryKind(id)
        })
    }

    /// Raw framework id.
    pub const fn id(self) -> usize {
        match self {
            Self::ElectricReal => 0,
            Self::ElectricImag => 1,
            Self::MagneticReal => 2,
            Self::MagneticImag => 3,
        }
    }

    /// Which residual form is used.
    pub const fn family(self) -> FieldFamily {
        match self {
            Self::ElectricReal | Self::ElectricImag => FieldFamily::Electric,
            Self::MagneticReal | Self::MagneticImag => FieldFamily::Magnetic,
        }
    }

    /// Which part of the complex residual is emitted.
    pub const fn part(self) -> Part {
        match self {
            Self::ElectricReal | Self::MagneticReal => Part::Real,
            Self::ElectricImag | Self::MagneticImag => Part::Imag,
        }
    }

    /// Name of this boundary condition for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ElectricReal => "EM_ER_FARFIELD",
            Self::ElectricImag => "EM_EI_FARFIELD",
            Self::MagneticReal => "EM_HR_FARFIELD",
            Self::MagneticImag => "EM_HI_FARFIELD",
        }
    }
}

impl fmt::Display for FarFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<usize> for FarFieldKind {
    type Error = AssemblyError;

    fn try_from(id: usize) -> Result<Self> {
        Self::from_id(id)
    }
}

/// Exterior medium and incident field of a far-field boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FarFieldData {
    /// Exterior optical constants (n₂, k₂)
    pub exterior: OpticalConstants,
    /// Complex incident field
    pub incident: [Complex64; 3],
}

impl FarFieldData {
    /// Length of the flat data array.
    pub const LEN: usize = 8;

    /// Create from exterior constants and an incident field.
    pub fn new(exterior: OpticalConstants, incident: [Complex64; 3]) -> Self {
        Self { exterior, incident }
    }

    /// Exterior medium without an incident wave.
    pub fn absorbing(exterior: OpticalConstants) -> Self {
        Self::new(exterior, [Complex64::new(0.0, 0.0); 3])
    }

    /// Parse `[n₂, k₂, Re inc_x, Re inc_y, Re inc_z, Im inc_x, Im inc_y, Im inc_z]`.
    ///
    /// Extra trailing values are ignored.
    pub fn from_slice(data: &[f64]) -> Result<Self> {
        if data.len() < Self::LEN {
            let e = AssemblyError::BoundaryDataLength {
                expected: Self::LEN,
                actual: data.len(),
            };
            log::error!("Far-field data rejected: {e}");
            return Err(e);
        }
        Ok(Self::new(
            OpticalConstants::new(data[0], data[1]),
            [
                Complex64::new(data[2], data[5]),
                Complex64::new(data[3], data[6]),
                Complex64::new(data[4], data[7]),
            ],
        ))
    }

    /// Flat representation, inverse of [`from_slice`](Self::from_slice).
    pub fn to_array(&self) -> [f64; Self::LEN] {
        let inc = &self.incident;
        [
            self.exterior.n,
            self.exterior.k,
            inc[0].re,
            inc[1].re,
            inc[2].re,
            inc[0].im,
            inc[1].im,
            inc[2].im,
        ]
    }
}

/// Context for far-field boundary evaluation at one surface quadrature point.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryPoint {
    /// Local element coordinates of the point
    pub local_coords: [f64; 3],
    /// Outward unit normal
    pub normal: [f64; 3],
    /// Interior field state at the point
    pub fields: FieldState,
    /// Basis values φ_j at the point
    pub phi: Vec<f64>,
    /// Current time
    pub time: f64,
    /// Physical position
    pub position: [f64; 3],
}

impl BoundaryPoint {
    /// Number of local dofs.
    #[inline]
    pub fn n_dof(&self) -> usize {
        self.phi.len()
    }

    /// Material point for the interior optical model (no sensitivities).
    pub fn material_point(&self) -> MaterialPoint<'_> {
        MaterialPoint {
            time: self.time,
            position: self.position,
            temperature: self.fields.temperature,
            mass_fractions: &self.fields.mass_fractions,
            phi: &self.phi,
            request: SensitivityRequest::NONE,
        }
    }
}

/// Residual and Jacobian of a far-field condition at one point.
///
/// `jacobian[p]` is indexed `(EM unknown slot, dof)`. The output is written,
/// not accumulated.
#[derive(Clone, Debug)]
pub struct FarFieldOutput {
    /// One value per spatial component
    pub residual: [f64; 3],
    /// ∂residual[p]/∂u_j
    pub jacobian: [Mat<f64>; 3],
}

impl FarFieldOutput {
    /// Zeroed output for `n_dof` local dofs.
    pub fn zeros(n_dof: usize) -> Self {
        Self {
            residual: [0.0; 3],
            jacobian: std::array::from_fn(|_| Mat::zeros(EmVariable::COUNT, n_dof)),
        }
    }

    /// ∂residual[p]/∂(var, j).
    #[inline]
    pub fn derivative(&self, p: usize, var: EmVariable, j: usize) -> f64 {
        self.jacobian[p][(var.slot(), j)]
    }
}
