//! Coordinate grid: axis lines, axis captions and tick marks.
//!
//! The grid owns its element list and replaces it wholesale on every rebuild,
//! so drawing the current list never shows leftovers from a previous size or
//! scale.

use tracing::debug;

use crate::core::constants::{MAX_TICKS_PER_AXIS, TARGET_TICK_COUNT};
use crate::core::units::{LengthUnit, format_tick};
use crate::core::window::{ScalePlan, SurfacePoint, SurfaceSize};

const TICK_HALF_LENGTH_PX: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    X,
    Y,
}

impl AxisKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickMark {
    /// Surface x for the horizontal axis, surface y for the vertical one.
    pub pixel_position: f64,
    pub label_text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub kind: AxisKind,
    pub unit: LengthUnit,
    pub ticks: Vec<TickMark>,
}

impl Axis {
    pub fn caption(&self) -> String {
        format!("{} [{}]", self.kind.name(), self.unit)
    }
}

/// Something the UI draws; positions are in surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum GridElement {
    AxisLine {
        from: SurfacePoint,
        to: SurfacePoint,
    },
    AxisCaption {
        axis: AxisKind,
        text: String,
        anchor: SurfacePoint,
    },
    TickLine {
        axis: AxisKind,
        from: SurfacePoint,
        to: SurfacePoint,
    },
    TickLabel {
        axis: AxisKind,
        text: String,
        anchor: SurfacePoint,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateGrid {
    x_axis: Axis,
    y_axis: Axis,
    elements: Vec<GridElement>,
}

impl CoordinateGrid {
    pub fn new(plan: &ScalePlan) -> Self {
        let (x_axis, y_axis) = build_axes(plan);
        let elements = layout(plan.surface, &x_axis, &y_axis);
        Self {
            x_axis,
            y_axis,
            elements,
        }
    }

    /// Replaces every element with a fresh layout for `plan`.
    pub fn rebuild(&mut self, plan: &ScalePlan) {
        *self = Self::new(plan);
        debug!(
            x_ticks = self.x_axis.ticks.len(),
            y_ticks = self.y_axis.ticks.len(),
            elements = self.elements.len(),
            "grid rebuilt"
        );
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    pub fn elements(&self) -> &[GridElement] {
        &self.elements
    }
}

fn build_axes(plan: &ScalePlan) -> (Axis, Axis) {
    let surface = plan.surface;
    let base = plan.tick_unit.unit;
    if !surface.is_measurable() {
        return (empty_axis(AxisKind::X, base), empty_axis(AxisKind::Y, base));
    }

    let meter_step = plan
        .tick_unit
        .meter_step(plan.visible_span_m(), TARGET_TICK_COUNT);
    let pixel_step = meter_step * plan.pixels_per_meter;

    let x_axis = build_axis(AxisKind::X, base, meter_step, pixel_step, |i| {
        let x = surface.y_axis_x() + i * pixel_step;
        (x < surface.width).then_some(x)
    });
    let y_axis = build_axis(AxisKind::Y, base, meter_step, pixel_step, |i| {
        let y = surface.x_axis_y() - i * pixel_step;
        (y > 0.0).then_some(y)
    });
    (x_axis, y_axis)
}

fn empty_axis(kind: AxisKind, unit: LengthUnit) -> Axis {
    Axis {
        kind,
        unit,
        ticks: Vec::new(),
    }
}

fn build_axis(
    kind: AxisKind,
    base: LengthUnit,
    meter_step: f64,
    pixel_step: f64,
    position: impl Fn(f64) -> Option<f64>,
) -> Axis {
    let mut axis = empty_axis(kind, base);
    if !pixel_step.is_finite() || pixel_step <= 0.0 {
        return axis;
    }

    let mut escalated = false;
    for i in 1..=MAX_TICKS_PER_AXIS {
        let Some(pixel_position) = position(i as f64) else {
            break;
        };
        let label = format_tick(i as f64 * meter_step, base);
        escalated |= label.escalated;
        axis.ticks.push(TickMark {
            pixel_position,
            label_text: label.text,
        });
    }

    if escalated {
        axis.unit = LengthUnit::Kilometer;
    }
    axis
}

fn point(x: f64, y: f64) -> SurfacePoint {
    SurfacePoint { x, y }
}

fn layout(surface: SurfaceSize, x_axis: &Axis, y_axis: &Axis) -> Vec<GridElement> {
    if !surface.is_measurable() {
        return Vec::new();
    }

    let axis_y = surface.x_axis_y();
    let axis_x = surface.y_axis_x();
    let mut elements = vec![
        GridElement::AxisLine {
            from: point(0.0, axis_y),
            to: point(surface.width, axis_y),
        },
        GridElement::AxisLine {
            from: point(axis_x, 0.0),
            to: point(axis_x, surface.height),
        },
        GridElement::AxisCaption {
            axis: AxisKind::X,
            text: x_axis.caption(),
            anchor: point(surface.width - 30.0, surface.height - 40.0),
        },
        GridElement::AxisCaption {
            axis: AxisKind::Y,
            text: y_axis.caption(),
            anchor: point(35.0, 5.0),
        },
    ];

    for tick in &x_axis.ticks {
        let x = tick.pixel_position;
        elements.push(GridElement::TickLine {
            axis: AxisKind::X,
            from: point(x, axis_y - TICK_HALF_LENGTH_PX),
            to: point(x, axis_y + TICK_HALF_LENGTH_PX),
        });
        elements.push(GridElement::TickLabel {
            axis: AxisKind::X,
            text: tick.label_text.clone(),
            anchor: point(x - 20.0, axis_y + TICK_HALF_LENGTH_PX),
        });
    }

    for tick in &y_axis.ticks {
        let y = tick.pixel_position;
        elements.push(GridElement::TickLine {
            axis: AxisKind::Y,
            from: point(axis_x - TICK_HALF_LENGTH_PX, y),
            to: point(axis_x + TICK_HALF_LENGTH_PX, y),
        });
        elements.push(GridElement::TickLabel {
            axis: AxisKind::Y,
            text: tick.label_text.clone(),
            anchor: point(35.0, y - 7.0),
        });
    }

    elements
}
