use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assert_float_eq;
use crate::models::{Particle, Vector2D};
use crate::particles::{simulate_step, simulate_step_brute_force, step_particle, Simulation};
use crate::spatial::QuadTree;
use crate::utils::{SimulationError, StepParameters};

fn particle(id: usize, x: f32, y: f32) -> Particle {
    Particle::new(id, 1.0, Vector2D::new(x, y), Vector2D::ZERO).unwrap()
}

fn scattered(count: usize, space_size: f32, seed: u64) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|id| {
            let position = Vector2D::new(rng.random_range(0.0..space_size), rng.random_range(0.0..space_size));
            let velocity = Vector2D::new(rng.random_range(-0.1..0.1), rng.random_range(-0.1..0.1));
            let mass = rng.random_range(0.5..2.0);
            Particle::new(id, mass, position, velocity).unwrap()
        })
        .collect()
}

fn step_once(particles: &[Particle], params: StepParameters) -> Vec<Particle> {
    let tree = QuadTree::build(particles);
    let mut next = particles.to_vec();
    simulate_step(&tree, particles, &mut next, params);
    next
}

#[test]
fn test_two_bodies_attract_symmetrically() {
    let particles = vec![particle(0, 0.0, 0.0), particle(1, 1.0, 0.0)];
    let params = StepParameters::new(Some(0.2), Some(10.0)).unwrap();
    let next = step_once(&particles, params);

    let moved_0 = next[0].position.x - particles[0].position.x;
    let moved_1 = next[1].position.x - particles[1].position.x;
    assert!(moved_0 > 0.0, "particle 0 should move toward +x");
    assert!(moved_1 < 0.0, "particle 1 should move toward -x");
    assert_relative_eq!(moved_0, -moved_1, max_relative = 1e-3);
    assert_relative_eq!(moved_0, 0.0004, max_relative = 1e-4);
    assert_eq!(next[0].position.y, 0.0);
    assert_eq!(next[1].position.y, 0.0);
    assert_relative_eq!(next[0].velocity.x, -next[1].velocity.x, max_relative = 1e-6);
    assert_float_eq(next[0].velocity.x, 0.002, 1e-7, Some("velocity after one step"));
}

#[test]
fn test_lone_particle_is_unchanged() {
    let particles = vec![particle(0, 4.0, -1.0)];
    let next = step_once(&particles, StepParameters::default());
    assert_eq!(next[0], particles[0]);
}

#[test]
fn test_particles_beyond_cull_radius_do_not_interact() {
    let particles = vec![particle(0, 0.0, 0.0), particle(1, 5.0, 0.0)];
    let params = StepParameters::new(None, Some(2.0)).unwrap();
    let next = step_once(&particles, params);
    assert_eq!(next, particles);
}

#[test]
fn test_matches_brute_force_for_scattered_particles() {
    let params = StepParameters::new(Some(0.2), Some(2.5)).unwrap();
    for seed in 0..5 {
        let particles = scattered(20, 10.0, seed);
        let via_tree = step_once(&particles, params);
        let mut via_pairs = particles.clone();
        simulate_step_brute_force(&particles, &mut via_pairs, params);

        for (a, b) in via_tree.iter().zip(&via_pairs) {
            assert_eq!(a.id, b.id);
            assert_abs_diff_eq!(a.position.x, b.position.x, epsilon = 1e-4);
            assert_abs_diff_eq!(a.position.y, b.position.y, epsilon = 1e-4);
            assert_abs_diff_eq!(a.velocity.x, b.velocity.x, epsilon = 1e-4);
            assert_abs_diff_eq!(a.velocity.y, b.velocity.y, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_matches_brute_force_for_larger_population() {
    let params = StepParameters::for_space_size(20.0);
    let particles = scattered(300, 20.0, 17);
    let via_tree = step_once(&particles, params);
    let mut via_pairs = particles.clone();
    simulate_step_brute_force(&particles, &mut via_pairs, params);
    for (a, b) in via_tree.iter().zip(&via_pairs) {
        assert_abs_diff_eq!(a.position.x, b.position.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.position.y, b.position.y, epsilon = 1e-4);
    }
}

#[test]
fn test_processing_order_does_not_change_result() {
    let params = StepParameters::new(Some(0.2), Some(2.5)).unwrap();
    let particles = scattered(200, 10.0, 3);
    let tree = QuadTree::build(&particles);

    let mut forward = particles.clone();
    simulate_step(&tree, &particles, &mut forward, params);

    let mut reversed = particles.clone();
    let mut nearby = Vec::new();
    for i in (0..particles.len()).rev() {
        reversed[i] = step_particle(&tree, &particles[i], params, &mut nearby);
    }

    for (a, b) in forward.iter().zip(&reversed) {
        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
        assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
        assert_eq!(a.velocity.x.to_bits(), b.velocity.x.to_bits());
        assert_eq!(a.velocity.y.to_bits(), b.velocity.y.to_bits());
    }
}

#[test]
fn test_input_snapshot_is_not_mutated() {
    let params = StepParameters::new(Some(0.2), Some(2.5)).unwrap();
    let particles = scattered(50, 10.0, 9);
    let before = particles.clone();
    let _ = step_once(&particles, params);
    assert_eq!(particles, before);
}

#[test]
fn test_step_conserves_momentum() {
    let params = StepParameters::new(Some(0.2), Some(2.5)).unwrap();
    let particles = scattered(100, 10.0, 4);
    let momentum = |ps: &[Particle]| {
        ps.iter().fold(Vector2D::ZERO, |acc, p| acc + p.velocity * p.mass)
    };
    let next = step_once(&particles, params);
    let before = momentum(&particles);
    let after = momentum(&next);
    assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-4);
    assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-4);
}

#[test]
fn test_simulation_matches_brute_force_over_several_steps() {
    let params = StepParameters::new(Some(0.2), Some(2.5)).unwrap();
    let particles = scattered(20, 10.0, 12);

    let mut sim = Simulation::new(particles.clone(), params).unwrap().with_tree_check(true);
    sim.simulate(5).expect("Simulation failed");

    let mut current = particles;
    let mut next = current.clone();
    for _ in 0..5 {
        simulate_step_brute_force(&current, &mut next, params);
        std::mem::swap(&mut current, &mut next);
    }

    for (a, b) in sim.particles().iter().zip(&current) {
        assert_eq!(a.id, b.id);
        assert_abs_diff_eq!(a.position.x, b.position.x, epsilon = 1e-3);
        assert_abs_diff_eq!(a.position.y, b.position.y, epsilon = 1e-3);
    }
}

#[test]
fn test_simulation_keeps_ids_in_place() {
    let particles = scattered(30, 10.0, 1);
    let mut sim = Simulation::new(particles, StepParameters::for_space_size(10.0)).unwrap();
    sim.simulate(3).unwrap();
    for (i, p) in sim.particles().iter().enumerate() {
        assert_eq!(p.id, i);
    }
}

#[test]
fn test_empty_simulation_steps() {
    let mut sim = Simulation::new(Vec::new(), StepParameters::default()).unwrap();
    sim.simulate(3).expect("Empty simulation should step");
    assert!(sim.into_particles().is_empty());
}

#[test]
fn test_coincident_particles_step_without_force() {
    let particles: Vec<Particle> = (0..12).map(|i| particle(i, 1.0, 1.0)).collect();
    let mut sim = Simulation::new(particles.clone(), StepParameters::default()).unwrap();
    sim.step().expect("Step failed");
    assert_eq!(sim.particles(), particles.as_slice());
}

#[test]
fn test_new_rejects_invalid_parameters() {
    let params = StepParameters { delta_time: 0.2, cull_radius: -1.0 };
    match Simulation::new(Vec::new(), params) {
        Err(SimulationError::InvalidRadius) => (),
        Err(e) => panic!("Unexpected error: {}", e),
        Ok(_) => panic!("Expected invalid radius to be rejected"),
    }
}
