//! Control surface used by a UI: start, stop, reset, retime, resize, regravitate.
//!
//! The UI owns the clock. It calls `pump` with the wall time since its last
//! frame, and the session delivers the due simulation ticks one after another.
//! Nothing here blocks.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::core::ballistics::{LaunchParameters, TrajectorySummary};
use crate::core::constants::{
    BASE_TICK_INTERVAL_MS, BASE_TIME_STEP_S, DEFAULT_SPEED_MULTIPLIER, EXTREME_HEIGHT_M,
    EXTREME_SPEED_MPS, MAX_CATCH_UP_TICKS, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER,
};
use crate::core::error::{Result, SimError};
use crate::core::grid::CoordinateGrid;
use crate::core::planet::GravityField;
use crate::core::stepper::{RunStatus, SimulationRun, TickOutcome, TrajectoryStepper};
use crate::core::units::{format_duration, format_length};
use crate::core::window::{ScalePlan, SurfacePoint, SurfaceSize};

/// Valid but unusually large input that needs an explicit go-ahead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExtremeInput {
    Speed(f64),
    Height(f64),
}

impl ExtremeInput {
    pub fn message(&self) -> String {
        match self {
            Self::Speed(v) => format!("launch speed {v} m/s is very high"),
            Self::Height(h) => format!("initial height {h} m is very high"),
        }
    }
}

pub fn extreme_inputs(params: &LaunchParameters) -> Vec<ExtremeInput> {
    let mut found = Vec::new();
    if params.speed_mps > EXTREME_SPEED_MPS {
        found.push(ExtremeInput::Speed(params.speed_mps));
    }
    if params.height_m > EXTREME_HEIGHT_M {
        found.push(ExtremeInput::Height(params.height_m));
    }
    found
}

#[derive(Clone, Debug, PartialEq)]
pub enum StartOutcome {
    Started(TrajectorySummary),
    /// Nothing changed; call again with the inputs acknowledged.
    NeedsConfirmation(Vec<ExtremeInput>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryText {
    pub max_height: String,
    pub range: String,
    pub flight_time: String,
}

impl From<TrajectorySummary> for SummaryText {
    fn from(summary: TrajectorySummary) -> Self {
        Self {
            max_height: format_length(summary.max_height_m),
            range: format_length(summary.range_m),
            flight_time: format_duration(summary.flight_time_s),
        }
    }
}

/// Never zero, and saturates instead of overflowing.
pub fn tick_interval(multiplier: f64) -> Duration {
    Duration::try_from_secs_f64(BASE_TICK_INTERVAL_MS / multiplier / 1000.0)
        .unwrap_or(Duration::MAX)
        .max(Duration::from_nanos(1))
}

pub fn time_step(multiplier: f64) -> f64 {
    BASE_TIME_STEP_S * multiplier
}

/// Turns elapsed wall time into due tick callbacks at a fixed interval.
#[derive(Clone, Debug, PartialEq)]
pub struct Metronome {
    interval: Duration,
    pending: Duration,
}

impl Metronome {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// New interval, measured from now.
    pub fn rearm(&mut self, interval: Duration) {
        self.interval = interval;
        self.pending = Duration::ZERO;
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.pending = self.pending.saturating_add(elapsed);
    }

    pub fn take_due(&mut self) -> bool {
        if self.interval.is_zero() || self.pending < self.interval {
            return false;
        }
        self.pending -= self.interval;
        true
    }

    pub fn clear(&mut self) {
        self.pending = Duration::ZERO;
    }
}

#[derive(Debug)]
pub struct Session {
    stepper: TrajectoryStepper,
    grid: CoordinateGrid,
    gravity: GravityField,
    multiplier: f64,
    metronome: Metronome,
    paused: bool,
    started_at: Option<DateTime<Local>>,
}

impl Session {
    pub fn new(surface: SurfaceSize, gravity: GravityField) -> Self {
        let stepper = TrajectoryStepper::new(surface);
        let grid = CoordinateGrid::new(stepper.plan());
        Self {
            stepper,
            grid,
            gravity,
            multiplier: DEFAULT_SPEED_MULTIPLIER,
            metronome: Metronome::new(tick_interval(DEFAULT_SPEED_MULTIPLIER)),
            paused: false,
            started_at: None,
        }
    }

    pub fn start(
        &mut self,
        params: LaunchParameters,
        gravity: GravityField,
        surface: SurfaceSize,
        acknowledged: bool,
    ) -> Result<StartOutcome> {
        params.validate()?;

        let advisories = extreme_inputs(&params);
        if !advisories.is_empty() && !acknowledged {
            for advisory in &advisories {
                warn!(advisory = %advisory.message(), "launch needs confirmation");
            }
            return Ok(StartOutcome::NeedsConfirmation(advisories));
        }

        let summary = self.stepper.start(params, gravity, time_step(self.multiplier))?;
        self.stepper.rescale(surface);

        self.gravity = gravity;
        self.paused = false;
        self.metronome.rearm(tick_interval(self.multiplier));
        self.grid.rebuild(self.stepper.plan());
        self.started_at = Some(Local::now());
        Ok(StartOutcome::Started(summary))
    }

    /// Halts ticking before the next scheduled tick; the run is kept.
    pub fn stop(&mut self) {
        if self.stepper.status() == RunStatus::Running && !self.paused {
            self.paused = true;
            self.metronome.clear();
            info!(t = self.current_time(), "run paused");
        }
    }

    pub fn resume(&mut self) {
        if self.stepper.status() == RunStatus::Running && self.paused {
            self.paused = false;
            self.metronome.rearm(tick_interval(self.multiplier));
            info!(t = self.current_time(), "run resumed");
        }
    }

    pub fn reset(&mut self) {
        self.stepper.reset();
        self.paused = false;
        self.metronome.clear();
        self.started_at = None;
        self.grid.rebuild(self.stepper.plan());
        info!("session reset");
    }

    /// Retimes future ticks. Elapsed simulation time and points are kept.
    ///
    /// Accepts `MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER` only.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> Result<()> {
        if !(MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER).contains(&multiplier) {
            return Err(SimError::InvalidMultiplier(multiplier));
        }
        self.multiplier = multiplier;
        self.stepper.set_time_step(time_step(multiplier));
        self.metronome.rearm(tick_interval(multiplier));
        info!(
            multiplier,
            interval_ms = tick_interval(multiplier).as_secs_f64() * 1000.0,
            "speed multiplier changed"
        );
        Ok(())
    }

    pub fn on_resize(&mut self, surface: SurfaceSize) {
        self.stepper.rescale(surface);
        self.grid.rebuild(self.stepper.plan());
    }

    /// Stores the new gravity; an actively ticking run restarts with it.
    pub fn on_gravity_change(&mut self, gravity: GravityField) -> Result<Option<TrajectorySummary>> {
        self.gravity = gravity;
        if !self.is_ticking() {
            return Ok(None);
        }
        let Some(params) = self.stepper.run().map(SimulationRun::params) else {
            return Ok(None);
        };

        info!(gravity = gravity.gravity(), "gravity changed, restarting run");
        let surface = self.stepper.plan().surface;
        match self.start(params, gravity, surface, true)? {
            StartOutcome::Started(summary) => Ok(Some(summary)),
            StartOutcome::NeedsConfirmation(_) => Ok(None),
        }
    }

    /// Exactly one simulation tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            return TickOutcome::Inactive;
        }
        let outcome = self.stepper.tick();
        if matches!(outcome, TickOutcome::Landed | TickOutcome::Failed(_)) {
            self.metronome.clear();
        }
        outcome
    }

    /// Delivers every tick that fell due during `elapsed`, in order.
    pub fn pump(&mut self, elapsed: Duration) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        if !self.is_ticking() {
            return outcomes;
        }

        self.metronome.accumulate(elapsed);
        while self.is_ticking() && self.metronome.take_due() {
            if outcomes.len() as u32 >= MAX_CATCH_UP_TICKS {
                self.metronome.clear();
                break;
            }
            outcomes.push(self.tick());
        }
        outcomes
    }

    pub fn status(&self) -> RunStatus {
        self.stepper.status()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_ticking(&self) -> bool {
        self.stepper.status() == RunStatus::Running && !self.paused
    }

    pub fn run(&self) -> Option<&SimulationRun> {
        self.stepper.run()
    }

    pub fn current_time(&self) -> f64 {
        self.stepper.run().map_or(0.0, SimulationRun::current_time)
    }

    pub fn failure(&self) -> Option<&SimError> {
        self.stepper.run().and_then(SimulationRun::failure)
    }

    pub fn summary(&self) -> Option<TrajectorySummary> {
        self.stepper.summary()
    }

    pub fn summary_text(&self) -> Option<SummaryText> {
        self.stepper.summary().map(SummaryText::from)
    }

    pub fn plan(&self) -> &ScalePlan {
        self.stepper.plan()
    }

    pub fn scale_readout(&self) -> String {
        self.stepper.plan().readout()
    }

    pub fn grid(&self) -> &CoordinateGrid {
        &self.grid
    }

    pub fn surface_points(&self) -> Vec<SurfacePoint> {
        self.stepper.surface_points()
    }

    pub fn gravity(&self) -> GravityField {
        self.gravity
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn tick_interval(&self) -> Duration {
        self.metronome.interval()
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// Where the ball is drawn: the last emitted point, or the launch point
    /// before the first tick.
    pub fn ball_position(&self) -> Option<SurfacePoint> {
        let run = self.stepper.run()?;
        match run.points().last() {
            Some(p) => Some(self.plan().to_surface(p.x, p.y)),
            None => Some(self.plan().to_surface(0.0, run.params().height_m)),
        }
    }
}
