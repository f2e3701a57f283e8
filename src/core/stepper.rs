//! Discrete-time trajectory stepper.
//!
//! `advance` is the pure transition: it takes a run and the active scale plan
//! and returns the next run plus what the tick produced. `TrajectoryStepper`
//! owns one run at a time and wraps that transition with start/reset/rescale.

use tracing::{debug, error, info};

use crate::core::ballistics::{self, LaunchParameters, TrajectorySummary};
use crate::core::error::{Result, SimError};
use crate::core::planet::GravityField;
use crate::core::window::{ScalePlan, SurfacePoint, SurfaceSize, plan_scale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Landed,
    Failed,
}

impl RunStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Running => "Running",
            Self::Landed => "Landed",
            Self::Failed => "Simulation error",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Landed | Self::Failed)
    }
}

/// One emitted sample, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryPoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Emitted(SurfacePoint),
    Landed,
    Failed(SimError),
    /// The run is not in `Running`; nothing happened.
    Inactive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationRun {
    params: LaunchParameters,
    gravity: GravityField,
    current_time: f64,
    time_step: f64,
    points: Vec<TrajectoryPoint>,
    status: RunStatus,
    failure: Option<SimError>,
}

impl SimulationRun {
    pub fn new(params: LaunchParameters, gravity: GravityField, time_step: f64) -> Result<Self> {
        params.validate()?;
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimError::Validation(format!(
                "time step must be finite and > 0, got {time_step}"
            )));
        }
        Ok(Self {
            params,
            gravity,
            current_time: 0.0,
            time_step,
            points: Vec::new(),
            status: RunStatus::Running,
            failure: None,
        })
    }

    pub fn params(&self) -> LaunchParameters {
        self.params
    }

    pub fn gravity(&self) -> GravityField {
        self.gravity
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn failure(&self) -> Option<&SimError> {
        self.failure.as_ref()
    }

    /// Applies to the next tick only; elapsed time and points are untouched.
    pub(crate) fn set_time_step(&mut self, time_step: f64) {
        self.time_step = time_step;
    }

    fn fail(mut self, reason: impl Into<String>) -> (Self, TickOutcome) {
        let err = SimError::TickComputation {
            time: self.current_time,
            reason: reason.into(),
        };
        error!(error = %err, "simulation run failed");
        self.status = RunStatus::Failed;
        self.failure = Some(err.clone());
        (self, TickOutcome::Failed(err))
    }
}

/// One simulation tick.
pub fn advance(mut run: SimulationRun, plan: &ScalePlan) -> (SimulationRun, TickOutcome) {
    if run.status != RunStatus::Running {
        return (run, TickOutcome::Inactive);
    }
    if !plan.surface.is_measurable() {
        return run.fail("surface is not measurable");
    }
    if !plan.pixels_per_meter.is_finite() || plan.pixels_per_meter <= 0.0 {
        return run.fail(format!("invalid scale {}", plan.pixels_per_meter));
    }
    if !run.current_time.is_finite() {
        return run.fail("simulation time overflowed");
    }

    let (x, y) = ballistics::trajectory_at_time(run.params, run.gravity.gravity(), run.current_time);
    if !x.is_finite() || !y.is_finite() {
        return run.fail(format!("non-finite position ({x}, {y})"));
    }

    if y < 0.0 {
        run.status = RunStatus::Landed;
        info!(
            t = run.current_time,
            points = run.points.len(),
            "projectile landed"
        );
        return (run, TickOutcome::Landed);
    }

    let point = plan.to_surface(x, y);
    if !point.x.is_finite() || !point.y.is_finite() {
        return run.fail(format!("non-finite surface point ({}, {})", point.x, point.y));
    }

    run.points.push(TrajectoryPoint {
        t: run.current_time,
        x,
        y,
    });
    debug!(t = run.current_time, x, y, "tick");
    run.current_time += run.time_step;

    (run, TickOutcome::Emitted(point))
}

/// Owns the active run, its summary and the scale plan it is drawn with.
#[derive(Debug)]
pub struct TrajectoryStepper {
    run: Option<SimulationRun>,
    summary: Option<TrajectorySummary>,
    plan: ScalePlan,
}

impl TrajectoryStepper {
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            run: None,
            summary: None,
            plan: ScalePlan::unscaled(surface),
        }
    }

    pub fn start(
        &mut self,
        params: LaunchParameters,
        gravity: GravityField,
        time_step: f64,
    ) -> Result<TrajectorySummary> {
        let run = SimulationRun::new(params, gravity, time_step)?;
        let summary = ballistics::summarize(params, gravity.gravity())?;
        self.plan = plan_scale(summary.range_m, summary.max_height_m, self.plan.surface);
        self.summary = Some(summary);
        self.run = Some(run);
        info!(
            speed = params.speed_mps,
            angle = params.angle_deg,
            height = params.height_m,
            gravity = gravity.gravity(),
            "run started"
        );
        Ok(summary)
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.run.take() {
            Some(run) => {
                let (run, outcome) = advance(run, &self.plan);
                self.run = Some(run);
                outcome
            }
            None => TickOutcome::Inactive,
        }
    }

    pub fn reset(&mut self) {
        self.run = None;
        self.summary = None;
        self.plan = ScalePlan::unscaled(self.plan.surface);
    }

    pub fn set_time_step(&mut self, time_step: f64) {
        if let Some(run) = self.run.as_mut() {
            run.set_time_step(time_step);
        }
    }

    /// Refits the plan for a new surface; the run keeps its points in meters.
    pub fn rescale(&mut self, surface: SurfaceSize) {
        self.plan = match self.summary {
            Some(summary) => plan_scale(summary.range_m, summary.max_height_m, surface),
            None => ScalePlan::unscaled(surface),
        };
    }

    pub fn status(&self) -> RunStatus {
        self.run.as_ref().map_or(RunStatus::Idle, SimulationRun::status)
    }

    pub fn run(&self) -> Option<&SimulationRun> {
        self.run.as_ref()
    }

    pub fn summary(&self) -> Option<TrajectorySummary> {
        self.summary
    }

    pub fn plan(&self) -> &ScalePlan {
        &self.plan
    }

    /// Every emitted point projected with the current plan.
    pub fn surface_points(&self) -> Vec<SurfacePoint> {
        self.run
            .as_ref()
            .map(|run| {
                run.points()
                    .iter()
                    .map(|p| self.plan.to_surface(p.x, p.y))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Consumes the stepper into the sequence of points still to come.
    pub fn into_ticks(self) -> Ticks {
        Ticks {
            stepper: self,
            done: false,
        }
    }
}

/// Lazy, one-shot sequence of surface points; ends on landing or failure.
#[derive(Debug)]
pub struct Ticks {
    stepper: TrajectoryStepper,
    done: bool,
}

impl Ticks {
    pub fn status(&self) -> RunStatus {
        self.stepper.status()
    }

    pub fn into_stepper(self) -> TrajectoryStepper {
        self.stepper
    }
}

impl Iterator for Ticks {
    type Item = SurfacePoint;

    fn next(&mut self) -> Option<SurfacePoint> {
        if self.done {
            return None;
        }
        match self.stepper.tick() {
            TickOutcome::Emitted(point) => Some(point),
            TickOutcome::Landed | TickOutcome::Failed(_) | TickOutcome::Inactive => {
                self.done = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Ticks {}
