// src/utils/step_config.rs
use crate::utils::{
    DEFAULT_STEP_PARAMETERS,
    errors::SimulationError
};

/// Parameters consumed by a single simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParameters {
    /// Length of one time step.
    pub delta_time: f32,
    /// Distance beyond which two particles exert no force on each other.
    pub cull_radius: f32,
}

impl Default for StepParameters {
    fn default() -> Self {
        DEFAULT_STEP_PARAMETERS
    }
}

impl StepParameters {
    /// Creates step parameters, falling back to the defaults for unset values.
    ///
    /// # Errors
    ///
    /// Returns an error if the time step is negative or the cull radius is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_quadsim::utils::StepParameters;
    ///
    /// let params = StepParameters::new(None, Some(2.5)).unwrap();
    /// assert_eq!(params.delta_time, 0.2);
    /// assert_eq!(params.cull_radius, 2.5);
    /// ```
    pub fn new(delta_time: Option<f32>, cull_radius: Option<f32>) -> Result<Self, SimulationError> {
        let default = DEFAULT_STEP_PARAMETERS;
        let params = Self {
            delta_time: delta_time.unwrap_or(default.delta_time),
            cull_radius: cull_radius.unwrap_or(default.cull_radius),
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters used by the benchmark scenes: the cull radius is a quarter of the space size.
    ///
    /// ```
    /// use rs_quadsim::utils::StepParameters;
    ///
    /// let params = StepParameters::for_space_size(10.0);
    /// assert_eq!(params.cull_radius, 2.5);
    /// assert_eq!(params.delta_time, 0.2);
    /// ```
    pub fn for_space_size(space_size: f32) -> Self {
        Self {
            delta_time: DEFAULT_STEP_PARAMETERS.delta_time,
            cull_radius: space_size / 4.0,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.delta_time.is_finite() || self.delta_time < 0.0 {
            return Err(SimulationError::InvalidTimeStep);
        }
        if !self.cull_radius.is_finite() || self.cull_radius <= 0.0 {
            return Err(SimulationError::InvalidRadius);
        }
        Ok(())
    }
}
