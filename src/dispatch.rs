use std::time::Instant;

use crate::error::Result;
use crate::playback::PlaybackState;
use crate::state::AppState;
use crate::ui::{Action, Frame, ParamAction, PlaybackAction};

/// Dispatch an action. Returns true if the app should quit.
pub fn dispatch_action(action: &Action, state: &mut AppState, app_frame: &mut Frame, now: Instant) -> Result<bool> {
    match action {
        Action::Quit => return Ok(true),
        Action::Nav(_) => {} // Handled by PaneManager
        Action::Param(a) => dispatch_param(a, state, app_frame)?,
        Action::Playback(a) => dispatch_playback(*a, state, app_frame, now),
        Action::None => {}
    }
    Ok(false)
}

fn dispatch_param(action: &ParamAction, state: &mut AppState, app_frame: &mut Frame) -> Result<()> {
    match action {
        ParamAction::Nudge(name, steps) => {
            if state.params.nudge(name, *steps)? {
                param_changed(name, state, app_frame)?;
            }
        }
        ParamAction::Set(name, value) => {
            if state.params.set(name, *value)? {
                param_changed(name, state, app_frame)?;
            }
        }
        ParamAction::ResetAll => {
            state.params.reset_all();
            state.refresh()?;
            log::info!("Parameters reset to defaults");
            app_frame.push_message("Reset all parameters".to_string());
        }
    }
    Ok(())
}

/// Redraw and report a slider change. While playing the next tick would pick it up anyway.
fn param_changed(name: &str, state: &mut AppState, app_frame: &mut Frame) -> Result<()> {
    let param = state.params.param(name)?;
    let message = format!("{} = {:.2}", param.label, param.value());
    log::debug!("{}", message);
    state.refresh()?;
    app_frame.push_message(message);
    Ok(())
}

fn dispatch_playback(action: PlaybackAction, state: &mut AppState, app_frame: &mut Frame, now: Instant) {
    let scheduler = &mut state.scheduler;
    match action {
        PlaybackAction::TogglePause => match scheduler.state() {
            PlaybackState::Playing => {
                scheduler.pause();
                app_frame.push_message("Paused".to_string());
            }
            PlaybackState::Paused => {
                scheduler.resume(now);
                app_frame.push_message("Resumed".to_string());
            }
            PlaybackState::Stopped => {
                scheduler.restart(now);
                app_frame.push_message("Playing from start".to_string());
            }
        },
        PlaybackAction::Restart => {
            scheduler.restart(now);
            app_frame.push_message("Restarted".to_string());
        }
    }
    log::debug!("Playback {:?} -> {:?}", action, scheduler.state());
}
