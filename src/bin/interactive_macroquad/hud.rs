use macroquad::prelude::*;
use parabolic_flight::core::units::{format_duration, format_multiplier};

use crate::constants::{HEADER_COLOR, SURFACE_LEFT, TITLE_Y};
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, screen_h: f32, font: Option<&Font>) {
    draw_header(state, font);
    draw_summary_block(state, screen_h, font);
}

fn draw_header(state: &AppRuntime, font: Option<&Font>) {
    draw_ui_text(
        "Parabolic Flight",
        SURFACE_LEFT,
        TITLE_Y,
        30,
        HEADER_COLOR,
        font,
    );
    let planet = state.planet();
    let right = format!("{} | g = {:.2} m/s^2", planet.name, planet.gravity_mps2);
    let size = measure_text(&right, font, 22, 1.0);
    draw_ui_text(
        &right,
        screen_width() - size.width - 16.0,
        TITLE_Y,
        22,
        DARKGRAY,
        font,
    );
}

fn draw_summary_block(state: &AppRuntime, screen_h: f32, font: Option<&Font>) {
    let session = &state.session;
    let (max_height, range, flight_time) = match session.summary_text() {
        Some(text) => (text.max_height, text.range, text.flight_time),
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };

    draw_ui_text(
        &format!("Max height: {max_height} | Range: {range} | Flight time: {flight_time}"),
        SURFACE_LEFT,
        screen_h - 62.0,
        22,
        HEADER_COLOR,
        font,
    );

    let status = if session.is_paused() {
        "Paused"
    } else {
        session.status().label()
    };
    draw_ui_text(
        &format!(
            "{} | t = {} | Speed {} | {}",
            status,
            format_duration(session.current_time()),
            format_multiplier(session.multiplier()),
            session.scale_readout()
        ),
        SURFACE_LEFT,
        screen_h - 36.0,
        20,
        BLUE,
        font,
    );

    let (line, color) = match session.failure() {
        Some(err) => (format!("Simulation error: {err}"), RED),
        None => (state.status_line.clone(), DARKGRAY),
    };
    draw_ui_text(&line, SURFACE_LEFT, screen_h - 12.0, 18, color, font);
}
