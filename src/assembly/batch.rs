//! Whole-element and multi-element assembly.

use crate::element::ElementContext;
use crate::error::{AssemblyError, Result};
use crate::material::OpticalModel;

use super::{EmWaveConfig, EquationSelection, LocalAccumulator, TimeStep, assemble_emwave};

/// Assemble every equation over every quadrature point of one element.
///
/// # Arguments
///
/// * `step` - Time context
/// * `points` - Element contexts, one per quadrature point
/// * `config` - Assembly configuration
///
/// # Returns
///
/// A freshly allocated accumulator holding the element's contribution.
pub fn assemble_element<M: OpticalModel + ?Sized>(
    step: &TimeStep,
    points: &[ElementContext],
    config: &EmWaveConfig<'_, M>,
) -> Result<LocalAccumulator> {
    let n_dof = points.first().map_or(0, ElementContext::n_dof);
    let mut acc = LocalAccumulator::new(n_dof, config.problem.n_species());

    for point in points {
        if point.n_dof() != n_dof {
            let e = AssemblyError::DofMismatch {
                expected: n_dof,
                actual: point.n_dof(),
            };
            log::error!("Inconsistent quadrature points in element: {e}");
            return Err(e);
        }
        for selection in EquationSelection::all() {
            assemble_emwave(step, point, &selection, config, &mut acc)?;
        }
    }
    Ok(acc)
}

/// Assemble many elements serially.
pub fn assemble_elements<M: OpticalModel + ?Sized>(
    step: &TimeStep,
    elements: &[Vec<ElementContext>],
    config: &EmWaveConfig<'_, M>,
) -> Result<Vec<LocalAccumulator>> {
    log::debug!(
        "Assembling {} elements with optics '{}'",
        elements.len(),
        config.optics.name()
    );
    elements
        .iter()
        .map(|points| assemble_element(step, points, config))
        .collect()
}

/// Parallel version of [`assemble_elements`] using Rayon.
///
/// Each element gets its own accumulator, so results are identical to the
/// serial version. Scattering into the global system stays with the caller.
#[cfg(feature = "parallel")]
pub fn assemble_elements_parallel<M: OpticalModel + ?Sized>(
    step: &TimeStep,
    elements: &[Vec<ElementContext>],
    config: &EmWaveConfig<'_, M>,
) -> Result<Vec<LocalAccumulator>> {
    use rayon::prelude::*;

    log::debug!(
        "Assembling {} elements in parallel with optics '{}'",
        elements.len(),
        config.optics.name()
    );
    elements
        .par_iter()
        .map(|points| assemble_element(step, points, config))
        .collect()
}
