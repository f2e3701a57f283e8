//! Simulation and presentation-scaling engine.
//!
//! Everything here is UI-agnostic: callers feed validated numbers and a surface
//! size in pixels, and get back surface-space points, a scale plan, tick marks
//! and formatted label strings.

pub mod ballistics;
pub mod constants;
pub mod error;
pub mod grid;
pub mod planet;
pub mod session;
pub mod stepper;
pub mod units;
pub mod window;

pub use ballistics::{LaunchParameters, TrajectorySummary};
pub use error::{Result, SimError};
pub use grid::{Axis, AxisKind, CoordinateGrid, GridElement, TickMark};
pub use planet::{GravityField, Planet};
pub use session::{ExtremeInput, Session, StartOutcome};
pub use stepper::{RunStatus, SimulationRun, TickOutcome, TrajectoryStepper};
pub use window::{ScalePlan, SurfacePoint, SurfaceSize};
