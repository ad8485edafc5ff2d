use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Particle, Vector2D};

/// Scatters `count` unit-mass particles at rest, uniformly over the square
/// `[-space_size / 2, space_size / 2]²`.
///
/// The same seed always produces the same particles. A space size that is not
/// a positive finite number puts every particle at the origin.
///
/// # Examples
///
/// ```
/// use rs_quadsim::io::generate_particles;
///
/// let particles = generate_particles(100, 10.0, 42);
/// assert_eq!(particles.len(), 100);
/// assert!(particles.iter().all(|p| p.position.x.abs() <= 5.0 && p.position.y.abs() <= 5.0));
/// assert_eq!(particles, generate_particles(100, 10.0, 42));
/// ```
pub fn generate_particles(count: usize, space_size: f32, seed: u64) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = space_size * 0.5;
    (0..count)
        .map(|id| {
            let position = if half.is_finite() && half > 0.0 {
                Vector2D::new(rng.random_range(-half..=half), rng.random_range(-half..=half))
            } else {
                Vector2D::ZERO
            };
            Particle {
                id,
                mass: 1.0,
                position,
                velocity: Vector2D::ZERO,
            }
        })
        .collect()
}

