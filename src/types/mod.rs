//! Strongly-typed selectors for the electromagnetic unknowns.
//!
//! The twelve scalar EM unknowns are not a flat list of ids but a tagged
//! variant:
//!
//! ```text
//! EmVariable { family: E | H, component: X | Y | Z, part: Real | Imag }
//! ```
//!
//! Everything the assembler needs (the real/imaginary partner, the field
//! family that drives the curl term, the Jacobian slot) is derived from the
//! variant, so every dispatch site is an exhaustive `match`.
//!
//! # Example
//!
//! ```
//! use emwave_rs::types::{Component, EmVariable, FieldFamily, Part};
//!
//! let e2r = EmVariable::new(FieldFamily::Electric, Component::Y, Part::Real);
//! assert_eq!(e2r.conjugate().part, Part::Imag);
//! assert_eq!(e2r.cross_field(Component::Z).family, FieldFamily::Magnetic);
//! assert_eq!(e2r.to_string(), "E2_REAL");
//! ```

mod field;
mod unknown;

pub use field::{Component, EmVariable, FieldFamily, Part};
pub use unknown::{N_FIXED_UNKNOWNS, Unknown};
