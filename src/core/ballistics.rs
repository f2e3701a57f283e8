use crate::core::constants::{MAX_ANGLE_DEG, MIN_ANGLE_DEG};
use crate::core::error::{Result, SimError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchParameters {
    pub speed_mps: f64,
    pub angle_deg: f64,
    pub height_m: f64,
}

impl LaunchParameters {
    pub fn new(speed_mps: f64, angle_deg: f64, height_m: f64) -> Self {
        Self {
            speed_mps,
            angle_deg,
            height_m,
        }
    }

    /// Checks the launch contract: speed > 0, angle in [0, 90], height >= 0.
    pub fn validate(&self) -> Result<()> {
        if !self.speed_mps.is_finite()
            || !self.angle_deg.is_finite()
            || !self.height_m.is_finite()
        {
            return Err(SimError::Validation(
                "inputs must be finite numbers".to_string(),
            ));
        }
        if self.height_m < 0.0 {
            return Err(SimError::Validation(format!(
                "initial height must be non-negative, got {}",
                self.height_m
            )));
        }
        if self.speed_mps <= 0.0 {
            return Err(SimError::Validation(format!(
                "speed must be greater than zero, got {}",
                self.speed_mps
            )));
        }
        if !(MIN_ANGLE_DEG..=MAX_ANGLE_DEG).contains(&self.angle_deg) {
            return Err(SimError::Validation(format!(
                "angle must be between {MIN_ANGLE_DEG} and {MAX_ANGLE_DEG} degrees, got {}",
                self.angle_deg
            )));
        }
        Ok(())
    }
}

/// Closed-form values shown next to the animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySummary {
    pub flight_time_s: f64,
    pub max_height_m: f64,
    pub range_m: f64,
}

pub fn velocity_components(params: LaunchParameters) -> (f64, f64) {
    let theta = params.angle_deg.to_radians();
    let vx = params.speed_mps * theta.cos();
    let vy = params.speed_mps * theta.sin();
    (vx, vy)
}

pub fn trajectory_at_time(params: LaunchParameters, gravity: f64, time_s: f64) -> (f64, f64) {
    let (vx, vy) = velocity_components(params);
    let x = vx * time_s;
    let y = params.height_m + (vy * time_s) - (0.5 * gravity * time_s * time_s);
    (x, y)
}

/// Positive root of y(t) = 0.
pub fn flight_time(params: LaunchParameters, gravity: f64) -> Result<f64> {
    if !gravity.is_finite() || gravity <= 0.0 {
        return Err(SimError::InvalidGravity(gravity));
    }

    let (_, vy) = velocity_components(params);
    let disc = vy * vy + 2.0 * gravity * params.height_m;
    if disc < 0.0 {
        return Err(SimError::Validation(format!(
            "no real landing time: vy^2 + 2*g*h is negative ({disc})"
        )));
    }

    Ok((vy + disc.sqrt()) / gravity)
}

pub fn max_height(params: LaunchParameters, gravity: f64) -> f64 {
    let (_, vy) = velocity_components(params);
    params.height_m + (vy * vy) / (2.0 * gravity)
}

pub fn summarize(params: LaunchParameters, gravity: f64) -> Result<TrajectorySummary> {
    params.validate()?;
    let t_land = flight_time(params, gravity)?;
    let (range, _) = trajectory_at_time(params, gravity, t_land);

    Ok(TrajectorySummary {
        flight_time_s: t_land,
        max_height_m: max_height(params, gravity),
        range_m: range,
    })
}

pub fn sample_trajectory(
    params: LaunchParameters,
    gravity: f64,
    time_of_flight_s: f64,
    samples: usize,
) -> Vec<(f64, f64)> {
    let sample_count = samples.max(2);
    (0..=sample_count)
        .map(|i| {
            let t = (i as f64 * time_of_flight_s) / sample_count as f64;
            let (x, y) = trajectory_at_time(params, gravity, t);
            (x, y.max(0.0))
        })
        .collect()
}
