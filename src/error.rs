//! Error types for element assembly.
//!
//! Only configuration problems are errors. An inactive equation or term is a
//! zero contribution, not a failure, and numerical degeneracy of the
//! far-field impedance pair is a caller precondition (see
//! [`InterfaceCoefficients::checked`](crate::material::InterfaceCoefficients::checked)).

use thiserror::Error;

/// Errors raised by the volume and boundary assemblers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// Raw field-variable id outside the twelve EM unknowns.
    #[error("Invalid EM variable id: {0}")]
    InvalidVariable(usize),

    /// Raw far-field boundary condition id outside the four known kinds.
    #[error("Invalid far-field boundary condition id: {0}")]
    InvalidBoundaryKind(usize),

    /// Conjugate selector is not the real/imaginary partner of the variable.
    #[error("Conjugate selector {conjugate} does not pair with variable {variable}")]
    MismatchedConjugate { variable: String, conjugate: String },

    /// Far-field data array is too short.
    #[error("Far-field data needs {expected} values, got {actual}")]
    BoundaryDataLength { expected: usize, actual: usize },

    /// Accumulator was sized for a different element.
    #[error("Accumulator sized for {expected} dofs, element has {actual}")]
    DofMismatch { expected: usize, actual: usize },

    /// Interior/exterior impedance pair too close to cancelling.
    #[error("Degenerate impedance pair: |Z1 + Z2| = {0:e}")]
    DegenerateImpedance(f64),
}

impl AssemblyError {
    /// Create a mismatched-conjugate error from anything displayable.
    pub fn mismatched_conjugate(
        variable: impl std::fmt::Display,
        conjugate: impl std::fmt::Display,
    ) -> Self {
        Self::MismatchedConjugate {
            variable: variable.to_string(),
            conjugate: conjugate.to_string(),
        }
    }

    /// Negative status code handed back to integer-status callers.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidVariable(_) | Self::MismatchedConjugate { .. } => -1,
            Self::InvalidBoundaryKind(_) | Self::BoundaryDataLength { .. } => -2,
            Self::DofMismatch { .. } => -3,
            Self::DegenerateImpedance(_) => -4,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Collapse an assembly result into the integer status convention:
/// `0` on success, negative on a configuration error.
pub fn status_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.status_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_negative() {
        let errors = [
            AssemblyError::InvalidVariable(12),
            AssemblyError::InvalidBoundaryKind(7),
            AssemblyError::mismatched_conjugate("E1r", "E2i"),
            AssemblyError::BoundaryDataLength {
                expected: 8,
                actual: 3,
            },
            AssemblyError::DofMismatch {
                expected: 4,
                actual: 10,
            },
            AssemblyError::DegenerateImpedance(0.0),
        ];
        for e in &errors {
            assert!(e.status_code() < 0, "{e} should map to a negative status");
        }
    }

    #[test]
    fn test_status_of_ok_is_zero() {
        let ok: Result<()> = Ok(());
        assert_eq!(status_code(&ok), 0);

        let err: Result<()> = Err(AssemblyError::InvalidVariable(99));
        assert_eq!(status_code(&err), -1);
    }

    #[test]
    fn test_error_messages() {
        let e = AssemblyError::BoundaryDataLength {
            expected: 8,
            actual: 2,
        };
        assert_eq!(e.to_string(), "Far-field data needs 8 values, got 2");
    }
}
