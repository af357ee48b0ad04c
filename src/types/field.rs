//! EM field variable variants.

use std::fmt;

use crate::error::AssemblyError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Field family
// =============================================================================

/// Electric or magnetic field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldFamily {
    /// Electric field E
    Electric,
    /// Magnetic field H
    Magnetic,
}

impl FieldFamily {
    /// The other family (E ↔ H).
    ///
    /// An E equation is driven by the curl of H and vice versa.
    #[inline]
    pub const fn partner(self) -> Self {
        match self {
            Self::Electric => Self::Magnetic,
            Self::Magnetic => Self::Electric,
        }
    }

    const fn offset(self) -> usize {
        match self {
            Self::Electric => 0,
            Self::Magnetic => 6,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Self::Electric => 'E',
            Self::Magnetic => 'H',
        }
    }
}

// =============================================================================
// Real / imaginary part
// =============================================================================

/// Real or imaginary part of a complex field amplitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Part {
    Real,
    Imag,
}

impl Part {
    /// The other part (Real ↔ Imag).
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Self::Real => Self::Imag,
            Self::Imag => Self::Real,
        }
    }

    /// Indicator constants (real, imag): (1, 0) for `Real`, (0, 1) for `Imag`.
    #[inline]
    pub const fn indicators(self) -> (f64, f64) {
        match self {
            Self::Real => (1.0, 0.0),
            Self::Imag => (0.0, 1.0),
        }
    }

    /// Select this part of a complex number.
    #[inline]
    pub fn of(self, z: num_complex::Complex64) -> f64 {
        match self {
            Self::Real => z.re,
            Self::Imag => z.im,
        }
    }

    const fn offset(self) -> usize {
        match self {
            Self::Real => 0,
            Self::Imag => 3,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Imag => "IMAG",
        }
    }
}

// =============================================================================
// Cartesian component
// =============================================================================

/// Cartesian component of a vector field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Component {
    X,
    Y,
    Z,
}

impl Component {
    /// All three components in index order.
    pub const ALL: [Component; 3] = [Component::X, Component::Y, Component::Z];

    /// Index 0, 1 or 2.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Component from an index, `None` if out of range.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }
}

// =============================================================================
// EM variable
// =============================================================================

/// One of the twelve scalar EM unknowns.
///
/// Slots follow the framework's variable numbering: the three components of
/// each (family, part) pair are contiguous, E before H, real before imag:
///
/// | slot | 0..3 | 3..6 | 6..9 | 9..12 |
/// |------|------|------|------|-------|
/// | var  | E real | E imag | H real | H imag |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmVariable {
    pub family: FieldFamily,
    pub component: Component,
    pub part: Part,
}

impl EmVariable {
    /// Number of scalar EM unknowns.
    pub const COUNT: usize = 12;

    /// Create a new variable selector.
    #[inline]
    pub const fn new(family: FieldFamily, component: Component, part: Part) -> Self {
        Self {
            family,
            component,
            part,
        }
    }

    /// Dense slot in `0..12`.
    #[inline]
    pub const fn slot(self) -> usize {
        self.family.offset() + self.part.offset() + self.component.index()
    }

    /// Inverse of [`slot`](Self::slot).
    pub const fn from_slot(slot: usize) -> Option<Self> {
        if slot >= Self::COUNT {
            return None;
        }
        let family = if slot < 6 {
            FieldFamily::Electric
        } else {
            FieldFamily::Magnetic
        };
        let part = if slot % 6 < 3 { Part::Real } else { Part::Imag };
        let component = match Component::from_index(slot % 3) {
            Some(c) => c,
            None => return None,
        };
        Some(Self::new(family, component, part))
    }

    /// All twelve variables in slot order.
    pub fn all() -> impl Iterator<Item = EmVariable> {
        (0..Self::COUNT).filter_map(Self::from_slot)
    }

    /// Real/imaginary partner with the same family and component.
    #[inline]
    pub const fn conjugate(self) -> Self {
        Self::new(self.family, self.component, self.part.flip())
    }

    /// Component `component` of the field whose curl drives this variable's
    /// equation: the other family, same part.
    #[inline]
    pub const fn cross_field(self, component: Component) -> Self {
        Self::new(self.family.partner(), component, self.part)
    }

    /// Same family and part, different component.
    #[inline]
    pub const fn with_component(self, component: Component) -> Self {
        Self::new(self.family, component, self.part)
    }
}

impl fmt::Display for EmVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{}",
            self.family.symbol(),
            self.component.index() + 1,
            self.part.label()
        )
    }
}

impl TryFrom<usize> for EmVariable {
    type Error = AssemblyError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        Self::from_slot(id).ok_or(AssemblyError::InvalidVariable(id))
    }
}

impl From<EmVariable> for usize {
    #[inline]
    fn from(var: EmVariable) -> usize {
        var.slot()
    }
}
