use approx::abs_diff_eq;

use crate::models::Particle;
use crate::utils::SimulationError;

/// Default absolute tolerance used when checking results against a reference answer.
pub const REFERENCE_TOLERANCE: f32 = 1e-2;

/// Compares simulated particles against a reference answer, field by field.
///
/// Particles are matched by position in the slices.
///
/// # Errors
///
/// Returns [`SimulationError::ParticleCountMismatch`] if the lengths differ and
/// [`SimulationError::ReferenceMismatch`] for the first field that differs by more
/// than `tolerance`.
///
/// # Examples
///
/// ```
/// use rs_quadsim::io::{compare_particles, parse_particles};
///
/// let expected = parse_particles("1 0 0 0 0\n1 1 1 0 0\n");
/// let mut actual = expected.clone();
/// actual[1].position.x += 0.001;
/// assert!(compare_particles(&actual, &expected, 0.01).is_ok());
/// assert!(compare_particles(&actual, &expected, 0.0001).is_err());
/// ```
pub fn compare_particles(
    actual: &[Particle],
    expected: &[Particle],
    tolerance: f32,
) -> Result<(), SimulationError> {
    if actual.len() != expected.len() {
        return Err(SimulationError::ParticleCountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let fields = [
            ("mass", a.mass, e.mass),
            ("position.x", a.position.x, e.position.x),
            ("position.y", a.position.y, e.position.y),
            ("velocity.x", a.velocity.x, e.velocity.x),
            ("velocity.y", a.velocity.y, e.velocity.y),
        ];
        if let Some(&(field, got, want)) = fields
            .iter()
            .find(|(_, got, want)| !abs_diff_eq!(*got, *want, epsilon = tolerance))
        {
            return Err(SimulationError::ReferenceMismatch {
                particle_id: i,
                field,
                expected: want,
                actual: got,
            });
        }
    }
    Ok(())
}
