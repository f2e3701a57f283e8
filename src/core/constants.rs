/// Pixels reserved between each axis and the surface edge.
pub const AXIS_MARGIN_PX: f64 = 20.0;
/// Both edges of one axis.
pub const TOTAL_MARGIN_PX: f64 = 2.0 * AXIS_MARGIN_PX;
/// Keeps the apex and landing point off the surface edge.
pub const SCALE_SAFETY_FACTOR: f64 = 0.9;
/// Pixels per meter used when the trajectory gives nothing to fit.
pub const DEFAULT_SCALE: f64 = 1.0;
pub const TARGET_TICK_COUNT: f64 = 8.0;
/// Hard ceiling on tick marks per axis.
pub const MAX_TICKS_PER_AXIS: usize = 512;

pub const BASE_TICK_INTERVAL_MS: f64 = 10.0;
pub const BASE_TIME_STEP_S: f64 = 0.1;
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;
pub const MAX_SPEED_MULTIPLIER: f64 = 5.0;
/// Upper bound on ticks delivered by a single `Session::pump`.
pub const MAX_CATCH_UP_TICKS: u32 = 64;

pub const EXTREME_SPEED_MPS: f64 = 1000.0;
pub const EXTREME_HEIGHT_M: f64 = 1000.0;

pub const MIN_ANGLE_DEG: f64 = 0.0;
pub const MAX_ANGLE_DEG: f64 = 90.0;
