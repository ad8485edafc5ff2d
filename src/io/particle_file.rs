//! Plain-text particle lists: one particle per line, `mass px py vx vy`,
//! separated by whitespace. Blank lines are ignored, so a particle's id is its
//! 0-based index among the non-blank lines.
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{info, warn};

use crate::models::{Particle, Vector2D};
use crate::utils::SimulationError;

/// Parses particles from the text format.
///
/// Missing or malformed numeric fields read as `0`. Blank lines are skipped
/// and do not consume an id.
///
/// # Examples
///
/// ```
/// use rs_quadsim::io::parse_particles;
///
/// let particles = parse_particles("1 0 0 0 0\n2.5 1 -1 0.5 0\n");
/// assert_eq!(particles.len(), 2);
/// assert_eq!(particles[1].id, 1);
/// assert_eq!(particles[1].mass, 2.5);
/// assert_eq!(particles[1].position.y, -1.0);
/// ```
pub fn parse_particles(contents: &str) -> Vec<Particle> {
    let mut particles = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace().map(|field| {
            field.parse::<f32>().unwrap_or_else(|_| {
                warn!("line {}: malformed field {:?}, reading it as 0", line_no + 1, field);
                0.0
            })
        });
        let mut next = || fields.next().unwrap_or(0.0);
        let mass = next();
        let position = Vector2D::new(next(), next());
        let velocity = Vector2D::new(next(), next());
        particles.push(Particle {
            id: particles.len(),
            mass,
            position,
            velocity,
        });
    }
    particles
}

/// Loads particles from the file at `path`.
///
/// # Errors
///
/// Returns [`SimulationError::Io`] if the file cannot be read.
pub fn load_particles(path: impl AsRef<Path>) -> Result<Vec<Particle>, SimulationError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| SimulationError::io(path, e))?;
    let particles = parse_particles(&contents);
    info!("loaded {} particles from {}", particles.len(), path.display());
    Ok(particles)
}

/// Writes particles in the text format.
///
/// Values are written in their shortest round-trip form, so loading the output
/// yields bit-identical particles.
pub fn write_particles<W: Write>(writer: &mut W, particles: &[Particle]) -> std::io::Result<()> {
    for p in particles {
        writeln!(
            writer,
            "{} {} {} {} {}",
            p.mass, p.position.x, p.position.y, p.velocity.x, p.velocity.y
        )?;
    }
    Ok(())
}

/// Saves particles to the file at `path`, replacing any existing content.
///
/// # Errors
///
/// Returns [`SimulationError::Io`] if the file cannot be created or written.
pub fn save_particles(path: impl AsRef<Path>, particles: &[Particle]) -> Result<(), SimulationError> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|e| SimulationError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_particles(&mut writer, particles)
        .and_then(|_| writer.flush())
        .map_err(|e| SimulationError::io(path, e))?;
    info!("saved {} particles to {}", particles.len(), path.display());
    Ok(())
}
