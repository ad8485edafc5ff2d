mod vector_2d;
mod particle;

pub use vector_2d::*;
pub use particle::*;

#[cfg(test)]
mod particle_tests;
