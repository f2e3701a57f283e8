use tracing::warn;

use crate::core::constants::{
    AXIS_MARGIN_PX, DEFAULT_SCALE, SCALE_SAFETY_FACTOR, TOTAL_MARGIN_PX,
};
use crate::core::error::SimError;
use crate::core::units::{LengthUnit, TickUnit, format_readout, readout_unit};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True once the surface has a real, positive extent in both directions.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn x_axis_y(&self) -> f64 {
        self.height - AXIS_MARGIN_PX
    }

    pub fn y_axis_x(&self) -> f64 {
        AXIS_MARGIN_PX
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

/// Meter-to-pixel mapping plus the units chosen for the readout and ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalePlan {
    pub pixels_per_meter: f64,
    pub surface: SurfaceSize,
    /// Unit of the "1 px = ..." readout.
    pub display_unit: LengthUnit,
    pub tick_unit: TickUnit,
    /// Set when the trajectory could not be fitted and a fallback scale was used.
    pub fallback: Option<SimError>,
}

impl ScalePlan {
    /// Plan used before any run exists.
    pub fn unscaled(surface: SurfaceSize) -> Self {
        Self::with_scale(DEFAULT_SCALE, surface, None)
    }

    fn with_scale(pixels_per_meter: f64, surface: SurfaceSize, fallback: Option<SimError>) -> Self {
        let meters_per_px = 1.0 / pixels_per_meter;
        Self {
            pixels_per_meter,
            surface,
            display_unit: readout_unit(meters_per_px),
            tick_unit: TickUnit::for_span(surface.width / pixels_per_meter),
            fallback,
        }
    }

    pub fn meters_per_pixel(&self) -> f64 {
        1.0 / self.pixels_per_meter
    }

    /// Factor taking meters into `display_unit`.
    pub fn unit_conversion_factor(&self) -> f64 {
        self.display_unit.per_meter()
    }

    pub fn rounding_threshold(&self) -> f64 {
        self.tick_unit.threshold
    }

    /// Meters covered by the full surface width.
    pub fn visible_span_m(&self) -> f64 {
        self.surface.width / self.pixels_per_meter
    }

    pub fn readout(&self) -> String {
        format_readout(self.meters_per_pixel())
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn to_surface(&self, x_m: f64, y_m: f64) -> SurfacePoint {
        SurfacePoint {
            x: self.surface.y_axis_x() + x_m * self.pixels_per_meter,
            y: self.surface.x_axis_y() - y_m * self.pixels_per_meter,
        }
    }

    pub fn to_world(&self, point: SurfacePoint) -> (f64, f64) {
        (
            (point.x - self.surface.y_axis_x()) / self.pixels_per_meter,
            (self.surface.x_axis_y() - point.y) / self.pixels_per_meter,
        )
    }
}

fn axis_scale(extent_m: f64, pixels: f64) -> Option<f64> {
    if !extent_m.is_finite() || extent_m <= 0.0 || !pixels.is_finite() || pixels <= 0.0 {
        return None;
    }
    let scale = pixels / extent_m;
    (scale.is_finite() && scale > 0.0).then_some(scale)
}

/// Fits a trajectory with the given range and apex into the surface.
///
/// The smaller of the two axis scales wins, shrunk by the safety factor. When
/// one extent is unusable the other one decides; when neither is, the default
/// scale is used and the reason is kept on the plan.
pub fn plan_scale(max_range_m: f64, max_height_m: f64, surface: SurfaceSize) -> ScalePlan {
    let x_scale = axis_scale(max_range_m, surface.width - TOTAL_MARGIN_PX);
    let y_scale = axis_scale(max_height_m, surface.height - TOTAL_MARGIN_PX);

    let fitted = match (x_scale, y_scale) {
        (Some(x), Some(y)) => Some(x.min(y) * SCALE_SAFETY_FACTOR),
        (Some(s), None) | (None, Some(s)) => Some(s * SCALE_SAFETY_FACTOR),
        (None, None) => None,
    }
    .filter(|s| s.is_finite() && *s > 0.0);

    let degenerate = x_scale.is_none() || y_scale.is_none() || fitted.is_none();
    let fallback = degenerate.then(|| SimError::DegenerateScale {
        range: max_range_m,
        height: max_height_m,
        width: surface.width,
        surface_height: surface.height,
    });
    if let Some(reason) = &fallback {
        warn!(%reason, "scale fallback");
    }

    ScalePlan::with_scale(fitted.unwrap_or(DEFAULT_SCALE), surface, fallback)
}
