//! Coupled unknowns that can appear as Jacobian columns.

use std::fmt;

use super::{Component, EmVariable};

/// Number of unknown slots before the species block:
/// 12 EM unknowns, temperature, three mesh-displacement components.
pub const N_FIXED_UNKNOWNS: usize = EmVariable::COUNT + 1 + 3;

/// Any unknown the EM residual can be differentiated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// One of the twelve EM field unknowns
    Em(EmVariable),
    /// Temperature
    Temperature,
    /// Mesh displacement along one axis
    MeshDisplacement(Component),
    /// Mass fraction of species `w`
    MassFraction(usize),
}

impl Unknown {
    /// Dense Jacobian block index.
    ///
    /// Species blocks start at [`N_FIXED_UNKNOWNS`] and are offset by the
    /// species index.
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            Self::Em(var) => var.slot(),
            Self::Temperature => EmVariable::COUNT,
            Self::MeshDisplacement(c) => EmVariable::COUNT + 1 + c.index(),
            Self::MassFraction(w) => N_FIXED_UNKNOWNS + w,
        }
    }

    /// Inverse of [`slot`](Self::slot).
    pub fn from_slot(slot: usize) -> Self {
        if let Some(var) = EmVariable::from_slot(slot) {
            return Self::Em(var);
        }
        if slot == EmVariable::COUNT {
            return Self::Temperature;
        }
        match Component::from_index(slot.wrapping_sub(EmVariable::COUNT + 1)) {
            Some(c) => Self::MeshDisplacement(c),
            None => Self::MassFraction(slot - N_FIXED_UNKNOWNS),
        }
    }

    /// Total number of slots for a problem with `n_species` species.
    #[inline]
    pub const fn count(n_species: usize) -> usize {
        N_FIXED_UNKNOWNS + n_species
    }
}

impl From<EmVariable> for Unknown {
    fn from(var: EmVariable) -> Self {
        Self::Em(var)
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Em(var) => write!(f, "{var}"),
            Self::Temperature => write!(f, "TEMPERATURE"),
            Self::MeshDisplacement(c) => write!(f, "MESH_DISPLACEMENT{}", c.index() + 1),
            Self::MassFraction(w) => write!(f, "MASS_FRACTION[{w}]"),
        }
    }
}
