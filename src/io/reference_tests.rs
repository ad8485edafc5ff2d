use crate::io::{compare_particles, generate_particles, REFERENCE_TOLERANCE};
use crate::utils::SimulationError;

#[test]
fn test_identical_sets_match() {
    let particles = generate_particles(10, 5.0, 1);
    assert!(compare_particles(&particles, &particles, 0.0).is_ok());
}

#[test]
fn test_count_mismatch() {
    let particles = generate_particles(10, 5.0, 1);
    match compare_particles(&particles[..9], &particles, REFERENCE_TOLERANCE) {
        Err(SimulationError::ParticleCountMismatch { expected, actual }) => {
            assert_eq!(expected, 10);
            assert_eq!(actual, 9);
        }
        other => panic!("Expected a count mismatch, got {:?}", other),
    }
}

#[test]
fn test_reports_first_mismatching_field() {
    let expected = generate_particles(5, 5.0, 2);
    let mut actual = expected.clone();
    actual[3].velocity.y += 0.5;
    actual[4].mass += 1.0;
    match compare_particles(&actual, &expected, REFERENCE_TOLERANCE) {
        Err(SimulationError::ReferenceMismatch { particle_id, field, expected: want, actual: got }) => {
            assert_eq!(particle_id, 3);
            assert_eq!(field, "velocity.y");
            assert_eq!(want, 0.0);
            assert_eq!(got, 0.5);
        }
        other => panic!("Expected a field mismatch, got {:?}", other),
    }
}

#[test]
fn test_nan_never_matches() {
    let expected = generate_particles(1, 5.0, 3);
    let mut actual = expected.clone();
    actual[0].position.x = f32::NAN;
    assert!(compare_particles(&actual, &expected, 1.0).is_err());
}
