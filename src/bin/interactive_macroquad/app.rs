use macroquad::prelude::*;
use parabolic_flight::core::SurfaceSize;
use tracing::warn;

use crate::constants::{
    INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES, SURFACE_BOTTOM_MARGIN,
    SURFACE_LEFT, SURFACE_RIGHT_MARGIN, SURFACE_TOP, UI_FONT_PATH, WINDOW_BG,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::gameplay::{apply_actions, apply_keyboard_adjustments, step_active_flight};
use crate::hud::draw_hud;
use crate::render::{draw_ball, draw_grid, draw_surface_background, draw_trail, rgb};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Parabolic Flight".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

/// Drawing area left over after the panel and the text rows.
fn surface_size(screen_w: f32, screen_h: f32) -> SurfaceSize {
    SurfaceSize::new(
        f64::from((screen_w - SURFACE_LEFT - SURFACE_RIGHT_MARGIN).max(0.0)),
        f64::from((screen_h - SURFACE_TOP - SURFACE_BOTTOM_MARGIN).max(0.0)),
    )
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!(path = UI_FONT_PATH, %err, "falling back to default font");
            None
        }
    };

    let mut state = AppRuntime::new(surface_size(screen_width(), screen_height()));
    let origin = vec2(SURFACE_LEFT, SURFACE_TOP);

    loop {
        let frame_dt = get_frame_time();
        let screen_h = screen_height();
        state.sync_surface(surface_size(screen_width(), screen_h));

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions);
        apply_keyboard_adjustments(&mut state, frame_dt);
        state.sync_sim_speed();
        step_active_flight(&mut state, frame_dt);

        let planet = state.planet();
        clear_background(WINDOW_BG);
        draw_surface_background(origin, state.surface, rgb(planet.background_rgb));
        draw_grid(
            state.session.grid(),
            origin,
            rgb(planet.grid_line_rgb),
            ui_font.as_ref(),
        );
        draw_trail(&state.session.surface_points(), origin);
        draw_ball(state.session.ball_position(), origin);
        draw_hud(&state, screen_h, ui_font.as_ref());

        next_frame().await;
    }
}
