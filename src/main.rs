use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use parabolic_flight::core::ballistics::{TrajectorySummary, sample_trajectory};
use parabolic_flight::core::session::{StartOutcome, SummaryText, extreme_inputs};
use parabolic_flight::core::units::{TickUnit, format_multiplier};
use parabolic_flight::core::{
    GravityField, LaunchParameters, Planet, Session, SurfaceSize, TickOutcome,
};
use plotters::prelude::*;
use tracing_subscriber::EnvFilter;

const PLOT_SAMPLES: usize = 200;
const PLOT_SIZE: (u32, u32) = (960, 540);

#[derive(Parser, Debug)]
#[command(name = "parabolic_flight")]
#[command(version)]
#[command(about = "Projectile flight under constant gravity", long_about = None)]
struct Cli {
    /// Launch speed (m/s); prompted when omitted
    #[arg(short = 'v', long)]
    speed: Option<f64>,

    /// Launch angle (degrees, 0-90); prompted when omitted
    #[arg(short = 'a', long)]
    angle: Option<f64>,

    /// Initial height (m); prompted when omitted
    #[arg(long)]
    height: Option<f64>,

    /// Gravity preset (Earth, Moon, Mars, Venus, Jupiter, Mercury)
    #[arg(short = 'p', long)]
    planet: Option<String>,

    /// Custom gravity (m/s^2), overrides --planet
    #[arg(short = 'g', long)]
    gravity: Option<f64>,

    /// Drawing surface width (px)
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Drawing surface height (px)
    #[arg(long = "height-px", default_value_t = 600.0)]
    height_px: f64,

    /// Simulation speed multiplier (0.1-5.0)
    #[arg(short = 'm', long, default_value_t = 1.0)]
    multiplier: f64,

    /// Print every emitted point
    #[arg(long)]
    steps: bool,

    /// Write an SVG plot of the trajectory
    #[arg(long, value_name = "FILE.svg")]
    plot: Option<PathBuf>,

    /// Accept very large speed or height without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// List gravity presets and exit
    #[arg(long)]
    list_planets: bool,
}

fn parse_number(value: &str, label: &str) -> Result<f64, String> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("Invalid {label}: '{value}'. Expected a number."))
}

fn read_f64(prompt: &str) -> Result<f64, String> {
    loop {
        print!("{prompt}");
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {e}"))?;

        let mut line = String::new();
        let bytes = io::stdin()
            .read_line(&mut line)
            .map_err(|e| format!("Could not read input: {e}"))?;

        if bytes == 0 {
            return Err("Input ended unexpectedly (EOF).".to_string());
        }

        match parse_number(&line, "number") {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 45 or 12,5)."),
        }
    }
}

fn read_yes_no(prompt: &str) -> Result<bool, String> {
    print!("{prompt} [y/N]: ");
    io::stdout()
        .flush()
        .map_err(|e| format!("Failed to flush stdout: {e}"))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("Could not read input: {e}"))?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn launch_parameters(cli: &Cli) -> Result<LaunchParameters, String> {
    let speed = match cli.speed {
        Some(v) => v,
        None => read_f64("Speed (m/s): ")?,
    };
    let angle = match cli.angle {
        Some(v) => v,
        None => read_f64("Angle (degrees): ")?,
    };
    let height = match cli.height {
        Some(v) => v,
        None => read_f64("Initial height (m): ")?,
    };
    Ok(LaunchParameters::new(speed, angle, height))
}

fn gravity_field(planet: Option<&str>, gravity: Option<f64>) -> Result<GravityField, Box<dyn Error>> {
    if let Some(g) = gravity {
        return Ok(GravityField::new(g)?);
    }
    match planet {
        Some(name) => Planet::by_name(name)
            .map(|p| p.field())
            .ok_or_else(|| format!("Unknown planet '{name}'. Try --list-planets.").into()),
        None => Ok(GravityField::default()),
    }
}

fn print_planets() {
    for planet in Planet::presets() {
        println!("{:<8} {:>6.2} m/s^2", planet.name, planet.gravity_mps2);
    }
}

fn print_summary(session: &Session, text: &SummaryText) {
    println!();
    println!("Max height:  {}", text.max_height);
    println!("Range:       {}", text.range);
    println!("Flight time: {}", text.flight_time);
    println!("Scale:       {}", session.scale_readout());
    println!(
        "Axes:        {} / {}",
        session.grid().x_axis().caption(),
        session.grid().y_axis().caption()
    );
}

/// Drives the session tick by tick until the run ends.
fn run_headless(session: &mut Session, print_steps: bool) -> usize {
    let mut emitted = 0usize;
    while session.is_ticking() {
        match session.tick() {
            TickOutcome::Emitted(point) => {
                emitted += 1;
                if print_steps {
                    let p = session.run().and_then(|run| run.points().last().copied());
                    if let Some(p) = p {
                        println!(
                            "t={:>8.3} s  x={:>12.3} m  y={:>12.3} m  px=({:.1}, {:.1})",
                            p.t, p.x, p.y, point.x, point.y
                        );
                    }
                }
            }
            TickOutcome::Landed | TickOutcome::Inactive => break,
            TickOutcome::Failed(err) => {
                eprintln!("Simulation failed: {err}");
                break;
            }
        }
    }
    emitted
}

fn write_plot(
    path: &Path,
    params: LaunchParameters,
    gravity: f64,
    summary: TrajectorySummary,
) -> Result<(), Box<dyn Error>> {
    let unit = TickUnit::for_span(summary.range_m.max(summary.max_height_m)).unit;
    let k = unit.per_meter();
    let points: Vec<(f64, f64)> =
        sample_trajectory(params, gravity, summary.flight_time_s, PLOT_SAMPLES)
            .into_iter()
            .map(|(x, y)| (x * k, y * k))
            .collect();
    let x_max = (summary.range_m * k).max(f64::EPSILON) * 1.05;
    let y_max = (summary.max_height_m * k).max(f64::EPSILON) * 1.1;

    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Trajectory, {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
            ("sans-serif", 22),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc(format!("x [{unit}]"))
        .y_desc(format!("y [{unit}]"))
        .draw()?;
    chart.draw_series(LineSeries::new(points, &BLUE))?;
    root.present()?;
    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program}");
    println!("  {program} --speed <m/s> --angle <deg> --height <m> [--planet <name>]");
    println!();
    println!("Examples:");
    println!("  {program} -v 20 -a 45 --height 0");
    println!("  {program} -v 5 -a 30 --height 2 --planet moon --plot moon.svg");
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_planets {
        print_planets();
        return Ok(());
    }

    let gravity = gravity_field(cli.planet.as_deref(), cli.gravity)?;
    let params = launch_parameters(&cli)?;
    params.validate()?;

    let surface = SurfaceSize::new(cli.width, cli.height_px);
    let mut session = Session::new(surface, gravity);
    session.set_speed_multiplier(cli.multiplier)?;

    let mut acknowledged = cli.yes;
    let advisories = extreme_inputs(&params);
    if !acknowledged && !advisories.is_empty() {
        for advisory in &advisories {
            println!("Warning: {}.", advisory.message());
        }
        acknowledged = read_yes_no("Continue?")?;
        if !acknowledged {
            println!("Launch cancelled.");
            return Ok(());
        }
    }

    let summary = match session.start(params, gravity, surface, acknowledged)? {
        StartOutcome::Started(summary) => summary,
        StartOutcome::NeedsConfirmation(_) => return Ok(()),
    };
    print_summary(&session, &SummaryText::from(summary));

    if cli.steps {
        println!();
    }
    let emitted = run_headless(&mut session, cli.steps);
    println!(
        "\nStatus: {} after {} points (speed {})",
        session.status().label(),
        emitted,
        format_multiplier(session.multiplier())
    );

    if let Some(path) = cli.plot.as_deref() {
        write_plot(path, params, gravity.gravity(), summary)?;
        println!("Plot written to {}", path.display());
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        print_usage("parabolic_flight");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_comma_decimal_separator() {
        assert_eq!(parse_number("12,5", "speed"), Ok(12.5));
        assert_eq!(parse_number(" 45\n", "angle"), Ok(45.0));
        let err = parse_number("fast", "speed").expect_err("not a number");
        assert!(err.contains("Invalid speed"));
    }

    #[test]
    fn explicit_gravity_wins_over_planet() {
        let field = gravity_field(Some("Moon"), Some(3.0)).expect("valid gravity");
        assert_eq!(field.gravity(), 3.0);

        let field = gravity_field(Some("moon"), None).expect("preset");
        assert_eq!(field.gravity(), 1.62);

        assert_eq!(gravity_field(None, None).unwrap().gravity(), 9.81);
        assert!(gravity_field(Some("Pluto"), None).is_err());
        assert!(gravity_field(None, Some(-9.81)).is_err());
    }

    #[test]
    fn headless_run_lands() {
        let surface = SurfaceSize::new(800.0, 600.0);
        let mut session = Session::new(surface, GravityField::default());
        session
            .start(
                LaunchParameters::new(20.0, 45.0, 0.0),
                GravityField::default(),
                surface,
                false,
            )
            .unwrap();

        assert_eq!(run_headless(&mut session, false), 29);
        assert_eq!(session.status().label(), "Landed");
    }

    #[test]
    fn plot_is_written_as_svg() {
        let path = std::env::temp_dir().join("parabolic_flight_plot_test.svg");
        let params = LaunchParameters::new(20.0, 45.0, 0.0);
        let summary = parabolic_flight::core::ballistics::summarize(params, 9.81).unwrap();

        write_plot(&path, params, 9.81, summary).expect("plot");
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("x [m]"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from([
            "parabolic_flight",
            "-v",
            "20",
            "-a",
            "45",
            "--height",
            "1.5",
            "--planet",
            "Mars",
            "--height-px",
            "480",
            "--steps",
        ]);
        assert_eq!(cli.speed, Some(20.0));
        assert_eq!(cli.height, Some(1.5));
        assert_eq!(cli.planet.as_deref(), Some("Mars"));
        assert_eq!(cli.height_px, 480.0);
        assert!(cli.steps);
        assert!(!cli.yes);
    }
}
