use crate::utils;

/// Gravitational constant of the cutoff force law.
pub const GRAVITATIONAL_CONSTANT: f32 = 0.01;

/// Maximum number of particles a quadtree leaf holds before it is subdivided.
pub const LEAF_CAPACITY: usize = 8;

/// Subdivision depth past which an over-full leaf is emitted instead of recursing.
///
/// Halving a finite `f32` extent reaches zero width in under 280 levels, and a
/// box that no longer splits becomes a leaf on its own, so finite inputs never
/// hit this limit.
pub const MAX_TREE_DEPTH: usize = 320;

/// Slack allowed when checking that a leaf particle lies inside its node box.
pub const TREE_CHECK_TOLERANCE: f32 = 1e-4;

/// Pairs closer than this exert no force on each other.
pub const MIN_INTERACTION_DISTANCE: f32 = 1e-3;

/// Distances below this are clamped before computing the force magnitude.
pub const MIN_FORCE_DISTANCE: f32 = 0.1;

/// Fraction of the cull radius after which the force linearly decays to zero.
pub const DECAY_START_FRACTION: f32 = 0.75;

/// Side length in pixels of exported frames.
pub const FRAME_SIZE: u32 = 512;

pub const DEFAULT_STEP_PARAMETERS: utils::StepParameters = utils::StepParameters {
    delta_time: 0.2,
    cull_radius: 1.0,
};
