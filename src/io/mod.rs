mod particle_file;
mod reference;
mod scenario;

pub use particle_file::*;
pub use reference::*;
pub use scenario::*;

#[cfg(test)]
mod reference_tests;
