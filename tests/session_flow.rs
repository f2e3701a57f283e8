use std::time::Duration;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use parabolic_flight::core::ballistics::{summarize, trajectory_at_time};
use parabolic_flight::core::units::{format_duration, format_length};
use parabolic_flight::core::window::plan_scale;
use parabolic_flight::core::{
    GravityField, LaunchParameters, Planet, RunStatus, Session, StartOutcome, SurfaceSize,
    TickOutcome, TrajectoryStepper,
};

fn surface() -> SurfaceSize {
    SurfaceSize::new(840.0, 440.0)
}

fn earth() -> GravityField {
    GravityField::default()
}

fn started(params: LaunchParameters, gravity: GravityField) -> Session {
    let mut session = Session::new(surface(), gravity);
    let outcome = session
        .start(params, gravity, surface(), false)
        .expect("valid launch");
    assert!(matches!(outcome, StartOutcome::Started(_)));
    session
}

fn tick_n(session: &mut Session, n: usize) {
    for _ in 0..n {
        assert!(matches!(session.tick(), TickOutcome::Emitted(_)));
    }
}

#[test]
fn flat_ground_throw_matches_closed_form() {
    let summary = summarize(LaunchParameters::new(20.0, 45.0, 0.0), 9.81).unwrap();
    assert_abs_diff_eq!(summary.flight_time_s, 2.883, epsilon = 0.001);
    assert_abs_diff_eq!(summary.range_m, 40.77, epsilon = 0.01);
    // v^2 sin^2(45) / 2g
    assert_abs_diff_eq!(summary.max_height_m, 10.19, epsilon = 0.01);
}

#[test]
fn lower_gravity_flies_longer_higher_and_farther() {
    let params = LaunchParameters::new(5.0, 30.0, 2.0);
    let moon = summarize(params, Planet::by_name("Moon").unwrap().gravity_mps2).unwrap();
    let earth = summarize(params, 9.81).unwrap();

    assert!(moon.flight_time_s > 2.0 * earth.flight_time_s);
    assert!(moon.max_height_m > earth.max_height_m);
    assert!(moon.range_m > earth.range_m);
}

#[test]
fn flight_time_is_the_landing_root() {
    for &gravity in &[1.62, 9.81, 24.79] {
        for &speed in &[1.0, 5.0, 20.0, 150.0] {
            for &angle in &[0.0, 15.0, 45.0, 80.0, 90.0] {
                for &height in &[0.0, 2.0, 50.0] {
                    if angle == 0.0 && height == 0.0 {
                        continue;
                    }
                    let params = LaunchParameters::new(speed, angle, height);
                    let summary = summarize(params, gravity).unwrap();
                    let tof = summary.flight_time_s;

                    let (_, y_land) = trajectory_at_time(params, gravity, tof);
                    assert_abs_diff_eq!(y_land, 0.0, epsilon = 1e-6 * (1.0 + summary.max_height_m));

                    for i in 1..20 {
                        let t = tof * f64::from(i) / 20.0;
                        let (_, y) = trajectory_at_time(params, gravity, t);
                        assert!(y > 0.0, "y({t})={y} for {params:?} g={gravity}");
                    }

                    assert!(summary.max_height_m >= height);
                    assert!(summary.range_m >= 0.0);
                }
            }
        }
    }
}

#[test]
fn run_never_emits_below_ground_and_lands_on_the_first_negative_tick() {
    let params = LaunchParameters::new(17.0, 62.0, 3.5);
    let mut session = started(params, earth());

    let outcomes = session.pump(Duration::from_secs(60));
    assert_eq!(outcomes.last(), Some(&TickOutcome::Landed));
    assert_eq!(session.status(), RunStatus::Landed);

    let run = session.run().unwrap();
    assert!(run.points().iter().all(|p| p.y >= 0.0));
    let last = run.points().last().unwrap();
    let (_, next_y) = trajectory_at_time(params, 9.81, last.t + run.time_step());
    assert!(next_y < 0.0);

    let axis_y = session.plan().surface.x_axis_y();
    assert!(session.surface_points().iter().all(|p| p.y <= axis_y + 1e-9));
}

#[test]
fn scale_is_positive_for_every_measurable_surface() {
    for &(w, h) in &[(41.0, 41.0), (100.0, 600.0), (800.0, 600.0), (1920.0, 1080.0)] {
        for &range in &[0.001, 1.0, 40.77, 1000.0, 1.0e6] {
            for &apex in &[0.001, 10.19, 5000.0] {
                let plan = plan_scale(range, apex, SurfaceSize::new(w, h));
                assert!(plan.pixels_per_meter.is_finite());
                assert!(plan.pixels_per_meter > 0.0);
                assert!(!plan.is_fallback());
            }
        }
    }
}

#[test]
fn multiplier_change_keeps_time_and_points() {
    let mut session = started(LaunchParameters::new(20.0, 45.0, 0.0), earth());
    tick_n(&mut session, 10);

    let time_before = session.current_time();
    let points_before = session.run().unwrap().points().to_vec();

    session.set_speed_multiplier(4.0).unwrap();
    assert_relative_eq!(session.current_time(), time_before);
    assert_eq!(session.run().unwrap().points(), points_before.as_slice());
    assert_relative_eq!(session.run().unwrap().time_step(), 0.4);
    assert_relative_eq!(session.tick_interval().as_secs_f64(), 0.0025, max_relative = 1e-6);

    tick_n(&mut session, 1);
    assert_relative_eq!(session.current_time(), time_before + 0.4, max_relative = 1e-12);
}

#[test]
fn resize_reprojects_the_whole_trail() {
    let mut session = started(LaunchParameters::new(20.0, 45.0, 0.0), earth());
    tick_n(&mut session, 12);
    let small = session.surface_points();

    session.on_resize(SurfaceSize::new(1680.0, 880.0));
    let large = session.surface_points();

    assert_eq!(small.len(), large.len());
    let summary = session.summary().unwrap();
    let refit = plan_scale(summary.range_m, summary.max_height_m, SurfaceSize::new(1680.0, 880.0));
    assert_relative_eq!(session.plan().pixels_per_meter, refit.pixels_per_meter);
    assert!(session.plan().pixels_per_meter > 2.0 * 17.0);
    for (p, q) in session.run().unwrap().points().iter().zip(&large) {
        let expected = session.plan().to_surface(p.x, p.y);
        assert_relative_eq!(q.x, expected.x);
        assert_relative_eq!(q.y, expected.y);
    }
    assert_eq!(session.status(), RunStatus::Running);
}

#[test]
fn grid_rebuild_at_the_same_size_is_stable() {
    let mut session = started(LaunchParameters::new(20.0, 45.0, 0.0), earth());
    let before = session.grid().clone();

    session.on_resize(surface());
    session.on_resize(surface());
    assert_eq!(session.grid(), &before);
}

#[test]
fn extreme_launch_waits_for_confirmation() {
    let params = LaunchParameters::new(1500.0, 45.0, 0.0);
    let mut session = Session::new(surface(), earth());

    let outcome = session.start(params, earth(), surface(), false).unwrap();
    assert!(matches!(outcome, StartOutcome::NeedsConfirmation(ref list) if list.len() == 1));
    assert_eq!(session.status(), RunStatus::Idle);
    assert!(session.summary().is_none());

    let outcome = session.start(params, earth(), surface(), true).unwrap();
    assert!(matches!(outcome, StartOutcome::Started(_)));
    assert_eq!(session.status(), RunStatus::Running);
}

#[test]
fn invalid_launch_is_rejected_without_touching_the_run() {
    let mut session = started(LaunchParameters::new(20.0, 45.0, 0.0), earth());
    tick_n(&mut session, 3);

    let err = session
        .start(LaunchParameters::new(20.0, 120.0, 0.0), earth(), surface(), true)
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(session.run().unwrap().points().len(), 3);
    assert_eq!(session.status(), RunStatus::Running);
}

#[test]
fn gravity_change_restarts_only_a_ticking_run() {
    let mars = Planet::by_name("Mars").unwrap().field();

    let mut idle = Session::new(surface(), earth());
    assert_eq!(idle.on_gravity_change(mars), Ok(None));
    assert_eq!(idle.gravity(), mars);
    assert_eq!(idle.status(), RunStatus::Idle);

    let mut session = started(LaunchParameters::new(20.0, 45.0, 0.0), earth());
    tick_n(&mut session, 5);
    let summary = session.on_gravity_change(mars).unwrap().expect("restarted");

    assert_eq!(session.current_time(), 0.0);
    assert!(session.run().unwrap().points().is_empty());
    assert_eq!(session.run().unwrap().gravity(), mars);
    assert!(summary.flight_time_s > 2.883);
}

#[test]
fn summary_strings_use_the_unit_ladders() {
    assert_eq!(format_length(0.0005), "0.5 mm");
    assert_eq!(format_length(2500.0), "2.5 km");
    assert_eq!(format_duration(45.0), "45.00 s");
    assert_eq!(format_duration(120.0), "2.0 min");

    let session = started(LaunchParameters::new(20.0, 45.0, 0.0), earth());
    let text = session.summary_text().unwrap();
    assert_eq!(text.range, "40.77 m");
    assert_eq!(text.flight_time, "2.88 s");
}

#[test]
fn headless_iteration_yields_the_same_trail() {
    let params = LaunchParameters::new(20.0, 45.0, 0.0);
    let mut stepper = TrajectoryStepper::new(surface());
    stepper.start(params, earth(), 0.1).unwrap();

    let mut ticks = stepper.into_ticks();
    let streamed: Vec<_> = ticks.by_ref().collect();
    assert_eq!(ticks.status(), RunStatus::Landed);

    let stepper = ticks.into_stepper();
    assert_eq!(streamed, stepper.surface_points());
    assert_eq!(streamed.len(), 29);
}
