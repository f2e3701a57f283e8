use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Bad or out-of-range launch input. The run never starts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Projected range or height cannot produce a usable scale.
    /// Recovered by falling back to the default scale.
    #[error("degenerate scale: range={range} m, height={height} m on {width}x{surface_height} px")]
    DegenerateScale {
        range: f64,
        height: f64,
        width: f64,
        surface_height: f64,
    },

    /// Arithmetic failure in the middle of a run. The run moves to `Failed`.
    #[error("tick computation failed at t={time:.3} s: {reason}")]
    TickComputation { time: f64, reason: String },

    #[error("invalid speed multiplier: {0} (must be finite and > 0)")]
    InvalidMultiplier(f64),

    #[error("invalid gravity: {0} m/s^2 (must be finite and > 0)")]
    InvalidGravity(f64),
}

impl SimError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidMultiplier(_) | Self::InvalidGravity(_)
        )
    }
}
