pub mod errors;
mod constants;
mod step_config;

pub use errors::*;
pub use constants::*;
pub use step_config::*;
