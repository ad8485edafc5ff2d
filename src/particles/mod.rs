mod forces;
mod particle_simulation;

pub use forces::*;
pub use particle_simulation::*;

#[cfg(test)]
mod particle_simulation_tests;
