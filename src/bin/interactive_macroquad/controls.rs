use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};
use parabolic_flight::core::RunStatus;
use parabolic_flight::core::constants::{MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER};

use crate::constants::{
    MAX_HEIGHT_SLIDER_M, MAX_SPEED_SLIDER_MPS, PANEL_HEIGHT, PANEL_WIDTH, PANEL_X, PANEL_Y,
};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) launch_pause: bool,
    pub(crate) reset: bool,
    pub(crate) prev_planet: bool,
    pub(crate) next_planet: bool,
    pub(crate) confirm: bool,
    pub(crate) cancel: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            launch_pause: self.launch_pause || other.launch_pause,
            reset: self.reset || other.reset,
            prev_planet: self.prev_planet || other.prev_planet,
            next_planet: self.next_planet || other.next_planet,
            confirm: self.confirm || other.confirm,
            cancel: self.cancel || other.cancel,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        launch_pause: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        prev_planet: is_key_pressed(KeyCode::P),
        next_planet: is_key_pressed(KeyCode::N),
        confirm: is_key_pressed(KeyCode::Enter),
        cancel: is_key_pressed(KeyCode::Escape),
    }
}

fn launch_button_label(state: &AppRuntime) -> &'static str {
    if state.session.is_ticking() {
        "Pause (Space)"
    } else if state.session.is_paused() {
        "Resume (Space)"
    } else if state.session.status().is_terminal() {
        "Relaunch (Space)"
    } else {
        "Launch (Space)"
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let planet = state.planet();
    let launch_label = launch_button_label(state);
    let inputs_locked = state.session.status() == RunStatus::Running;

    let mut actions = FrameActions::default();
    widgets::Window::new(
        hash!(),
        vec2(PANEL_X, PANEL_Y),
        vec2(PANEL_WIDTH, PANEL_HEIGHT),
    )
    .label("Launch Controls")
    .ui(&mut *root_ui(), |ui| {
        ui.label(None, &format!("Planet: {}", planet.name));
        ui.label(None, &format!("g = {:.2} m/s^2", planet.gravity_mps2));
        if ui.button(None, "Prev Planet (P)") {
            actions.prev_planet = true;
        }
        if ui.button(None, "Next Planet (N)") {
            actions.next_planet = true;
        }
        ui.separator();
        ui.slider(
            hash!(),
            "Speed (m/s)",
            1.0..MAX_SPEED_SLIDER_MPS,
            &mut state.config.speed_mps,
        );
        ui.slider(hash!(), "Angle (deg)", 0.0..90.0, &mut state.config.angle_deg);
        ui.slider(
            hash!(),
            "Height (m)",
            0.0..MAX_HEIGHT_SLIDER_M,
            &mut state.config.height_m,
        );
        ui.slider(
            hash!(),
            "Simulation Speed",
            MIN_SPEED_MULTIPLIER as f32..MAX_SPEED_MULTIPLIER as f32,
            &mut state.sim_speed,
        );
        if inputs_locked {
            ui.label(None, "Launch inputs apply to the next launch");
        }
        ui.separator();
        if ui.button(None, launch_label) {
            actions.launch_pause = true;
        }
        if ui.button(None, "Reset (R)") {
            actions.reset = true;
        }

        if let Some(advisories) = &state.pending_confirmation {
            ui.separator();
            for advisory in advisories {
                ui.label(None, &format!("Warning: {}", advisory.message()));
            }
            if ui.button(None, "Launch anyway (Enter)") {
                actions.confirm = true;
            }
            if ui.button(None, "Cancel (Esc)") {
                actions.cancel = true;
            }
        }
    });

    actions
}
