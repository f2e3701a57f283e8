use std::time::Duration;

use macroquad::prelude::*;
use parabolic_flight::core::{StartOutcome, TickOutcome};
use tracing::debug;

use crate::constants::{
    HEIGHT_KEY_RATE_MPS, MAX_HEIGHT_SLIDER_M, MAX_SPEED_SLIDER_MPS, SPEED_KEY_RATE_MPS2,
};
use crate::controls::FrameActions;
use crate::state::AppRuntime;

fn launch(state: &mut AppRuntime, acknowledged: bool) {
    let params = state.config.params();
    let gravity = state.planet().field();
    match state
        .session
        .start(params, gravity, state.surface, acknowledged)
    {
        Ok(StartOutcome::Started(_)) => {
            state.pending_confirmation = None;
            state.status_line = format!("Launched on {}", state.planet().name);
        }
        Ok(StartOutcome::NeedsConfirmation(advisories)) => {
            state.status_line = "Confirm the launch or cancel".to_string();
            state.pending_confirmation = Some(advisories);
        }
        Err(err) => {
            state.pending_confirmation = None;
            state.status_line = err.to_string();
        }
    }
}

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if state.pending_confirmation.is_some() {
        if actions.confirm {
            launch(state, true);
        } else if actions.cancel {
            state.pending_confirmation = None;
            state.status_line = "Launch cancelled".to_string();
        }
    } else if actions.launch_pause {
        if state.session.is_ticking() {
            state.session.stop();
            state.status_line = "Paused".to_string();
        } else if state.session.is_paused() {
            state.session.resume();
            state.status_line = "Resumed".to_string();
        } else {
            launch(state, false);
        }
    }

    if actions.reset {
        state.session.reset();
        state.pending_confirmation = None;
        state.status_line = "Ready".to_string();
    }

    if actions.prev_planet {
        state.prev_planet();
    } else if actions.next_planet {
        state.next_planet();
    }
}

pub(crate) fn apply_keyboard_adjustments(state: &mut AppRuntime, frame_dt: f32) {
    if !is_mouse_button_down(MouseButton::Left) {
        if is_key_down(KeyCode::W) {
            state.config.height_m += HEIGHT_KEY_RATE_MPS * frame_dt;
        }
        if is_key_down(KeyCode::S) {
            state.config.height_m -= HEIGHT_KEY_RATE_MPS * frame_dt;
        }
        if is_key_down(KeyCode::D) {
            state.config.speed_mps += SPEED_KEY_RATE_MPS2 * frame_dt;
        }
        if is_key_down(KeyCode::A) {
            state.config.speed_mps -= SPEED_KEY_RATE_MPS2 * frame_dt;
        }
    }
    state.config.height_m = state.config.height_m.clamp(0.0, MAX_HEIGHT_SLIDER_M);
    state.config.speed_mps = state.config.speed_mps.clamp(1.0, MAX_SPEED_SLIDER_MPS);
}

/// Feeds the frame time to the session and reacts to the ticks it ran.
pub(crate) fn step_active_flight(state: &mut AppRuntime, frame_dt: f32) {
    let elapsed = Duration::from_secs_f32(frame_dt.max(0.0));
    let outcomes = state.session.pump(elapsed);
    if outcomes.is_empty() {
        return;
    }
    debug!(ticks = outcomes.len(), "frame ticks");

    for outcome in outcomes {
        match outcome {
            TickOutcome::Landed => {
                state.status_line = format!("Landed after {:.2} s", state.session.current_time());
            }
            TickOutcome::Failed(err) => state.status_line = err.to_string(),
            TickOutcome::Emitted(_) | TickOutcome::Inactive => {}
        }
    }
}
