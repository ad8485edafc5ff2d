use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::models::Vector2D;

/// Represents errors that can occur while building, checking or stepping a simulation.
#[derive(Debug)]
pub enum SimulationError {
    /// Indicates an invalid mass value (e.g., negative or zero mass).
    InvalidMass,
    /// Indicates an invalid time step (negative or non-finite).
    InvalidTimeStep,
    /// Indicates an invalid cull radius (non-positive or non-finite).
    InvalidRadius,
    /// A leaf of the quadtree holds a particle outside its node box.
    TreeInvariantViolation {
        particle_id: usize,
        position: Vector2D,
        bmin: Vector2D,
        bmax: Vector2D,
    },
    /// A particle differs from the reference answer by more than the allowed tolerance.
    ReferenceMismatch {
        particle_id: usize,
        field: &'static str,
        expected: f32,
        actual: f32,
    },
    /// The reference answer holds a different number of particles.
    ParticleCountMismatch { expected: usize, actual: usize },
    /// Reading or writing a file failed.
    Io { path: PathBuf, source: io::Error },
    /// Encoding or writing a frame failed.
    ImageExport(String),
}

impl SimulationError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SimulationError::Io { path: path.into(), source }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::InvalidMass => write!(f, "Invalid mass value"),
            SimulationError::InvalidTimeStep => write!(f, "Invalid time step"),
            SimulationError::InvalidRadius => write!(f, "Invalid cull radius"),
            SimulationError::TreeInvariantViolation { particle_id, position, bmin, bmax } => write!(
                f,
                "particle: {}({}, {}) outside of min: ({}, {}) max: ({}, {})",
                particle_id, position.x, position.y, bmin.x, bmin.y, bmax.x, bmax.y
            ),
            SimulationError::ReferenceMismatch { particle_id, field, expected, actual } => write!(
                f,
                "particle {} mismatch on {}: expected {}, got {}",
                particle_id, field, expected, actual
            ),
            SimulationError::ParticleCountMismatch { expected, actual } => write!(
                f,
                "particle count mismatch: expected {}, got {}",
                expected, actual
            ),
            SimulationError::Io { path, source } => write!(f, "error accessing file \"{}\": {}", path.display(), source),
            SimulationError::ImageExport(msg) => write!(f, "Image export error: {}", msg),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimulationError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<image::ImageError> for SimulationError {
    fn from(e: image::ImageError) -> Self {
        SimulationError::ImageExport(e.to_string())
    }
}
