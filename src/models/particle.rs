use crate::models::Vector2D;
use crate::utils::SimulationError;

/// A point mass in the simulation plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Stable identity, assigned at load time and never reused.
    pub id: usize,
    /// Particle's mass.
    pub mass: f32,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Particle {
    /// Creates a new Particle.
    ///
    /// # Errors
    ///
    /// Returns an error if `mass` is non-positive or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::models::{Particle, Vector2D};
    ///
    /// let particle = Particle::new(3, 1.5, Vector2D::new(1.0, 2.0), Vector2D::ZERO)
    ///     .expect("Failed to create particle");
    /// assert_eq!(particle.id, 3);
    /// assert!(Particle::new(0, 0.0, Vector2D::ZERO, Vector2D::ZERO).is_err());
    /// ```
    pub fn new(
        id: usize,
        mass: f32,
        position: Vector2D,
        velocity: Vector2D,
    ) -> Result<Self, SimulationError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::InvalidMass);
        }
        Ok(Particle {
            id,
            mass,
            position,
            velocity,
        })
    }

    /// Advances the particle by one explicit Euler step under `force`.
    ///
    /// The velocity is updated first and the new velocity moves the position
    /// (semi-implicit Euler).
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::models::{Particle, Vector2D};
    ///
    /// let p = Particle::new(0, 2.0, Vector2D::ZERO, Vector2D::ZERO).unwrap();
    /// let next = p.integrate(Vector2D::new(4.0, 0.0), 0.5);
    /// assert_eq!(next.velocity, Vector2D::new(1.0, 0.0));
    /// assert_eq!(next.position, Vector2D::new(0.5, 0.0));
    /// ```
    pub fn integrate(&self, force: Vector2D, delta_time: f32) -> Particle {
        let mut result = *self;
        result.velocity += force * (delta_time / self.mass);
        result.position += result.velocity * delta_time;
        result
    }
}
