//! This module advances a population of particles under the cutoff force law.
//! Every step builds a fresh quadtree over the current particles, gathers each
//! particle's neighbours within the cull radius from it, and integrates the
//! summed force into a separate output buffer so that the whole step sees one
//! consistent snapshot of the input.
//!
//! # Example
//!
//! ```
//! use rs_quadsim::models::{Particle, Vector2D};
//! use rs_quadsim::particles::Simulation;
//! use rs_quadsim::utils::StepParameters;
//!
//! let particles = vec![
//!     Particle::new(0, 1.0, Vector2D::new(0.0, 0.0), Vector2D::ZERO).unwrap(),
//!     Particle::new(1, 1.0, Vector2D::new(1.0, 0.0), Vector2D::ZERO).unwrap(),
//! ];
//! let params = StepParameters::new(Some(0.2), Some(10.0)).unwrap();
//!
//! let mut sim = Simulation::new(particles, params).expect("Failed to initialize simulation");
//! sim.simulate(10).expect("Simulation failed");
//!
//! // The pair attracts each other.
//! assert!(sim.particles()[0].position.x > 0.0);
//! assert!(sim.particles()[1].position.x < 1.0);
//! ```
use log::debug;

use crate::models::{Particle, Vector2D};
use crate::particles::accumulate_force;
use crate::spatial::QuadTree;
use crate::utils::{SimulationError, StepParameters};

/// Applies `force` to `particle` over `delta_time` and returns the updated copy.
#[inline]
pub fn update_particle(particle: &Particle, force: Vector2D, delta_time: f32) -> Particle {
    particle.integrate(force, delta_time)
}

/// Advances every particle by one step, writing results into `new_particles`.
///
/// `tree` must have been built over `particles`. Each output slot depends only on
/// the tree and on the input slice, never on other output slots, so the order
/// in which particles are processed does not change the result.
///
/// # Panics
///
/// Panics if `new_particles` is shorter than `particles`.
pub fn simulate_step(
    tree: &QuadTree,
    particles: &[Particle],
    new_particles: &mut [Particle],
    params: StepParameters,
) {
    let mut nearby = Vec::new();
    for (i, pi) in particles.iter().enumerate() {
        new_particles[i] = step_particle(tree, pi, params, &mut nearby);
    }
}

/// Computes the next state of a single particle against the step's tree.
///
/// `nearby` is scratch space for the neighbour query and is cleared first.
pub fn step_particle(
    tree: &QuadTree,
    particle: &Particle,
    params: StepParameters,
    nearby: &mut Vec<Particle>,
) -> Particle {
    nearby.clear();
    tree.query_into(nearby, particle.position, params.cull_radius);
    let force = accumulate_force(particle, nearby, params.cull_radius);
    update_particle(particle, force, params.delta_time)
}

/// Reference O(N²) step that sums the force of every other particle directly.
///
/// The force law already ignores pairs beyond the cull radius, so this produces
/// the same motion as [`simulate_step`] up to floating-point summation order.
pub fn simulate_step_brute_force(
    particles: &[Particle],
    new_particles: &mut [Particle],
    params: StepParameters,
) {
    for (i, pi) in particles.iter().enumerate() {
        let force = accumulate_force(pi, particles, params.cull_radius);
        new_particles[i] = update_particle(pi, force, params.delta_time);
    }
}

/// A particle population together with the parameters that advance it.
///
/// Holds two buffers: the current snapshot and scratch space the next step is
/// written into. They are swapped after every step.
pub struct Simulation {
    particles: Vec<Particle>,
    scratch: Vec<Particle>,
    pub params: StepParameters,
    /// Validate the quadtree after every build.
    pub check_tree: bool,
}

impl Simulation {
    /// Creates a simulation over `particles`.
    ///
    /// # Errors
    ///
    /// Returns an error if the step parameters are invalid.
    pub fn new(particles: Vec<Particle>, params: StepParameters) -> Result<Self, SimulationError> {
        params.validate()?;
        let scratch = particles.clone();
        Ok(Simulation {
            particles,
            scratch,
            params,
            check_tree: false,
        })
    }

    /// Enables tree validation after every build.
    pub fn with_tree_check(mut self, check_tree: bool) -> Self {
        self.check_tree = check_tree;
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn into_particles(self) -> Vec<Particle> {
        self.particles
    }

    /// Builds the quadtree over the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns the invariant violation if tree checking is enabled and fails.
    pub fn build_tree(&self) -> Result<QuadTree, SimulationError> {
        let tree = QuadTree::build(&self.particles);
        if self.check_tree {
            tree.check_tree()?;
        }
        Ok(tree)
    }

    /// Advances the simulation by one time step using a tree built by [`Simulation::build_tree`].
    pub fn step_with_tree(&mut self, tree: &QuadTree) {
        simulate_step(tree, &self.particles, &mut self.scratch, self.params);
        std::mem::swap(&mut self.particles, &mut self.scratch);
    }

    /// Advances the simulation by one time step.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::models::{Particle, Vector2D};
    /// use rs_quadsim::particles::Simulation;
    /// use rs_quadsim::utils::StepParameters;
    ///
    /// let lone = Particle::new(0, 1.0, Vector2D::new(2.0, 3.0), Vector2D::new(1.0, 0.0)).unwrap();
    /// let mut sim = Simulation::new(vec![lone], StepParameters::default()).unwrap();
    /// sim.step().expect("Step failed");
    /// // No neighbours, so the particle just drifts.
    /// assert_eq!(sim.particles()[0].velocity, Vector2D::new(1.0, 0.0));
    /// assert!((sim.particles()[0].position.x - 2.2).abs() < 1e-6);
    /// ```
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let tree = self.build_tree()?;
        self.step_with_tree(&tree);
        Ok(())
    }

    /// Runs the simulation for a specified number of steps.
    pub fn simulate(&mut self, steps: usize) -> Result<(), SimulationError> {
        for i in 0..steps {
            self.step()?;
            debug!("completed step {} of {}", i + 1, steps);
        }
        Ok(())
    }
}
