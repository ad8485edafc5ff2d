use crate::models::{Particle, Vector2D};
use crate::utils::{DECAY_START_FRACTION, GRAVITATIONAL_CONSTANT, MIN_FORCE_DISTANCE, MIN_INTERACTION_DISTANCE};

/// Computes the force `attractor` exerts on `target`.
///
/// The law is inverse-square attraction with a hard cutoff at `cull_radius`:
/// - pairs closer than [`MIN_INTERACTION_DISTANCE`] or farther than `cull_radius`
///   exert no force,
/// - the distance is clamped to [`MIN_FORCE_DISTANCE`] before computing the magnitude,
/// - over the last quarter of the cull radius the force decays linearly to zero.
///
/// Swapping `target` and `attractor` negates the result.
///
/// # Examples
///
/// ```
/// use rs_quadsim::models::{Particle, Vector2D};
/// use rs_quadsim::particles::compute_force;
///
/// let a = Particle::new(0, 1.0, Vector2D::new(0.0, 0.0), Vector2D::ZERO).unwrap();
/// let b = Particle::new(1, 1.0, Vector2D::new(1.0, 0.0), Vector2D::ZERO).unwrap();
///
/// let force = compute_force(&a, &b, 10.0);
/// assert!((force.x - 0.01).abs() < 1e-7);
/// assert_eq!(force.y, 0.0);
/// assert_eq!(compute_force(&b, &a, 10.0), -force);
/// ```
#[inline]
pub fn compute_force(target: &Particle, attractor: &Particle, cull_radius: f32) -> Vector2D {
    let mut dir = attractor.position - target.position;
    let mut dist = dir.length();
    if dist < MIN_INTERACTION_DISTANCE {
        return Vector2D::ZERO;
    }
    dir *= 1.0 / dist;
    if dist > cull_radius {
        return Vector2D::ZERO;
    }
    if dist < MIN_FORCE_DISTANCE {
        dist = MIN_FORCE_DISTANCE;
    }
    let mut force = dir * target.mass * attractor.mass * (GRAVITATIONAL_CONSTANT / (dist * dist));
    let decay_start = cull_radius * DECAY_START_FRACTION;
    if dist > decay_start {
        let decay = 1.0 - (dist - decay_start) / (cull_radius * (1.0 - DECAY_START_FRACTION));
        force *= decay;
    }
    force
}

/// Sums the force every candidate exerts on `target`, skipping `target` itself by id.
///
/// Candidates are summed in slice order, so the result is reproducible for a
/// given candidate list.
pub fn accumulate_force(target: &Particle, candidates: &[Particle], cull_radius: f32) -> Vector2D {
    candidates
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .fold(Vector2D::ZERO, |mut force, candidate| {
            force += compute_force(target, candidate, cull_radius);
            force
        })
}
