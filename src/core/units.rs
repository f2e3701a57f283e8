//! Unit ladders and label formatting.
//!
//! Three independent ladders live here: the summary ladders for lengths and
//! durations, the live scale readout, and the axis tick labels. They are
//! evaluated separately, so one screen can show height in cm, range in m and
//! flight time in ms at the same time.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Megameter,
}

impl LengthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Megameter => "Mm",
        }
    }

    /// Multiplier taking meters into this unit.
    pub fn per_meter(self) -> f64 {
        match self {
            Self::Millimeter => 1000.0,
            Self::Centimeter => 100.0,
            Self::Meter => 1.0,
            Self::Kilometer => 0.001,
            Self::Megameter => 1e-6,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Microsecond => "μs",
            Self::Millisecond => "ms",
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
        }
    }

    pub fn per_second(self) -> f64 {
        match self {
            Self::Microsecond => 1e6,
            Self::Millisecond => 1000.0,
            Self::Second => 1.0,
            Self::Minute => 1.0 / 60.0,
            Self::Hour => 1.0 / 3600.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unit and decimal places for a height or range shown in the summary panel.
pub fn summary_length_unit(meters: f64) -> (LengthUnit, usize) {
    if meters >= 1e6 {
        (LengthUnit::Megameter, 1)
    } else if meters >= 1000.0 {
        (LengthUnit::Kilometer, 1)
    } else if meters >= 0.1 {
        (LengthUnit::Meter, 2)
    } else if meters >= 0.001 {
        (LengthUnit::Centimeter, 2)
    } else {
        (LengthUnit::Millimeter, 1)
    }
}

pub fn summary_time_unit(seconds: f64) -> (TimeUnit, usize) {
    if seconds >= 3600.0 {
        (TimeUnit::Hour, 1)
    } else if seconds >= 60.0 {
        (TimeUnit::Minute, 1)
    } else if seconds >= 0.1 {
        (TimeUnit::Second, 2)
    } else if seconds >= 0.001 {
        (TimeUnit::Millisecond, 2)
    } else {
        (TimeUnit::Microsecond, 1)
    }
}

pub fn format_length(meters: f64) -> String {
    let (unit, decimals) = summary_length_unit(meters);
    format!("{:.*} {}", decimals, meters * unit.per_meter(), unit)
}

pub fn format_duration(seconds: f64) -> String {
    let (unit, decimals) = summary_time_unit(seconds);
    format!("{:.*} {}", decimals, seconds * unit.per_second(), unit)
}

/// Unit for the "1 px = ..." readout, keyed on meters per pixel.
pub fn readout_unit(meters_per_px: f64) -> LengthUnit {
    if meters_per_px > 1000.0 {
        LengthUnit::Kilometer
    } else if meters_per_px < 0.1 {
        LengthUnit::Centimeter
    } else {
        LengthUnit::Meter
    }
}

pub fn format_readout(meters_per_px: f64) -> String {
    let unit = readout_unit(meters_per_px);
    format!("1 px = {:.2} {}", meters_per_px * unit.per_meter(), unit)
}

pub fn format_multiplier(multiplier: f64) -> String {
    format!("{multiplier:.1}x")
}

/// Base unit and rounding step for axis ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickUnit {
    pub unit: LengthUnit,
    /// Tick spacing is rounded to a multiple of this, in `unit`.
    pub threshold: f64,
}

impl TickUnit {
    /// Picks the base unit from the meters spanned by the surface width.
    pub fn for_span(span_m: f64) -> Self {
        if span_m > 1000.0 {
            Self {
                unit: LengthUnit::Kilometer,
                threshold: 0.1,
            }
        } else if span_m < 0.1 {
            Self {
                unit: LengthUnit::Centimeter,
                threshold: 1.0,
            }
        } else {
            Self {
                unit: LengthUnit::Meter,
                threshold: 1.0,
            }
        }
    }

    /// Tick spacing in meters for roughly `target_ticks` ticks across `span_m`.
    ///
    /// Rounding happens in `unit`, so km steps land on whole 0.1 km and cm
    /// steps on whole centimeters.
    pub fn meter_step(self, span_m: f64, target_ticks: f64) -> f64 {
        let span_in_unit = span_m * self.unit.per_meter();
        let step_in_unit = (span_in_unit / target_ticks / self.threshold)
            .round_ties_even()
            .max(1.0)
            * self.threshold;
        step_in_unit / self.unit.per_meter()
    }
}

/// A formatted tick label plus whether it escalated to kilometers on its own.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub escalated: bool,
}

/// Four-tier magnitude formatting applied to both axes alike.
pub fn format_tick(meters: f64, base: LengthUnit) -> TickLabel {
    let display = meters * base.per_meter();
    let km = meters * LengthUnit::Kilometer.per_meter();

    if display >= 10_000.0 {
        TickLabel {
            text: format!("{km:.1} km"),
            escalated: base != LengthUnit::Kilometer,
        }
    } else if display >= 1000.0 {
        TickLabel {
            text: format!("{km:.1} km"),
            escalated: false,
        }
    } else if display >= 100.0 {
        TickLabel {
            text: format!("{display:.0} {base}"),
            escalated: false,
        }
    } else if display >= 10.0 {
        TickLabel {
            text: format!("{display:.1} {base}"),
            escalated: false,
        }
    } else {
        TickLabel {
            text: format!("{display:.2} {base}"),
            escalated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_ladder_boundaries() {
        assert_eq!(format_length(0.0005), "0.5 mm");
        assert_eq!(format_length(0.001), "0.10 cm");
        assert_eq!(format_length(0.05), "5.00 cm");
        assert_eq!(format_length(0.1), "0.10 m");
        assert_eq!(format_length(40.7747), "40.77 m");
        assert_eq!(format_length(2500.0), "2.5 km");
        assert_eq!(format_length(3_200_000.0), "3.2 Mm");
    }

    #[test]
    fn time_ladder_boundaries() {
        assert_eq!(format_duration(0.0004), "400.0 μs");
        assert_eq!(format_duration(0.05), "50.00 ms");
        assert_eq!(format_duration(45.0), "45.00 s");
        assert_eq!(format_duration(120.0), "2.0 min");
        assert_eq!(format_duration(5400.0), "1.5 h");
    }

    #[test]
    fn ladders_are_independent() {
        // A shot can land in cm range with a flight time in ms.
        assert_eq!(format_length(0.02), "2.00 cm");
        assert_eq!(format_duration(0.02), "20.00 ms");
        assert_eq!(format_length(2.0), "2.00 m");
    }

    #[test]
    fn readout_switches_units_on_meters_per_pixel() {
        assert_eq!(format_readout(2500.0), "1 px = 2.50 km");
        assert_eq!(format_readout(0.05), "1 px = 5.00 cm");
        assert_eq!(format_readout(0.25), "1 px = 0.25 m");
        assert_eq!(format_readout(1000.0), "1 px = 1000.00 m");
    }

    #[test]
    fn tick_unit_selection() {
        assert_eq!(TickUnit::for_span(5000.0).unit, LengthUnit::Kilometer);
        assert_eq!(TickUnit::for_span(0.05).unit, LengthUnit::Centimeter);
        assert_eq!(TickUnit::for_span(50.0).unit, LengthUnit::Meter);
    }

    #[test]
    fn tick_step_rounds_to_threshold() {
        let meters = TickUnit::for_span(100.0);
        // 12.5 rounds to even
        assert_eq!(meters.meter_step(100.0, 8.0), 12.0);
        assert_eq!(meters.meter_step(200.0, 8.0), 25.0);
        // never below one threshold
        assert_eq!(meters.meter_step(2.0, 8.0), 1.0);

        let km = TickUnit::for_span(4000.0);
        let step = km.meter_step(4000.0, 8.0);
        assert!((step - 500.0).abs() < 1e-9, "step={step}");

        // 5 km / 8 = 0.625 km -> 0.6 km
        let km = TickUnit::for_span(5000.0);
        let step = km.meter_step(5000.0, 8.0);
        assert!((step - 600.0).abs() < 1e-9, "step={step}");

        let cm = TickUnit::for_span(0.08);
        let step = cm.meter_step(0.08, 8.0);
        assert!((step - 0.01).abs() < 1e-12, "step={step}");
    }

    #[test]
    fn tick_label_tiers() {
        let m = LengthUnit::Meter;
        assert_eq!(format_tick(3.456, m).text, "3.46 m");
        assert_eq!(format_tick(34.56, m).text, "34.6 m");
        assert_eq!(format_tick(345.6, m).text, "346 m");
        assert_eq!(format_tick(3456.0, m).text, "3.5 km");

        let big = format_tick(12_345.0, m);
        assert_eq!(big.text, "12.3 km");
        assert!(big.escalated);
    }

    #[test]
    fn tick_labels_in_base_units() {
        assert_eq!(format_tick(0.05, LengthUnit::Centimeter).text, "5.00 cm");
        assert_eq!(format_tick(1500.0, LengthUnit::Kilometer).text, "1.50 km");
        let label = format_tick(20_000_000.0, LengthUnit::Kilometer);
        assert_eq!(label.text, "20000.0 km");
        assert!(!label.escalated);
    }

    #[test]
    fn multiplier_text() {
        assert_eq!(format_multiplier(1.0), "1.0x");
        assert_eq!(format_multiplier(2.46), "2.5x");
    }
}
