use approx::assert_abs_diff_eq;
use crate::models::{Particle, Vector2D};
use crate::utils::SimulationError;

#[test]
fn test_new_valid() {
    let particle = Particle::new(7, 2.0, Vector2D::new(1.0, -1.0), Vector2D::new(0.5, 0.0))
        .expect("Failed to create particle with valid parameters");
    assert_eq!(particle.id, 7);
    assert_eq!(particle.mass, 2.0);
}

#[test]
fn test_new_invalid_mass() {
    let result = Particle::new(0, -1.0, Vector2D::ZERO, Vector2D::ZERO);
    assert!(result.is_err(), "Particle creation should fail for negative mass");
    if let Err(err) = result {
        match err {
            SimulationError::InvalidMass => (),
            _ => panic!("Unexpected error type for invalid mass"),
        }
    }
}

#[test]
fn test_integrate_zero_force_keeps_velocity() {
    let particle = Particle::new(0, 1.0, Vector2D::new(1.0, 1.0), Vector2D::new(2.0, 0.0)).unwrap();
    let next = particle.integrate(Vector2D::ZERO, 0.2);
    assert_eq!(next.velocity, particle.velocity);
    assert_abs_diff_eq!(next.position.x, 1.4, epsilon = 1e-6);
    assert_eq!(next.position.y, 1.0);
    assert_eq!(next.id, particle.id);
}

#[test]
fn test_integrate_scales_by_inverse_mass() {
    let light = Particle::new(0, 1.0, Vector2D::ZERO, Vector2D::ZERO).unwrap();
    let heavy = Particle::new(1, 4.0, Vector2D::ZERO, Vector2D::ZERO).unwrap();
    let force = Vector2D::new(1.0, 0.0);
    let light_next = light.integrate(force, 1.0);
    let heavy_next = heavy.integrate(force, 1.0);
    assert_eq!(light_next.velocity.x, 4.0 * heavy_next.velocity.x);
}
