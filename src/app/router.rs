//! Screen activation and the pollers that hang off each screen.
//!
//! Every activation starts from a clean slate: all polls are torn down
//! before the target screen registers its own. That is the only ordering
//! guarantee between screens, and it is enough to keep two screens from
//! ever polling at the same time.

use crate::app::action::Action;
use crate::app::state::{AppState, Screen};
use crate::backend::poller::{PollKind, PollSpec};
use crate::backend::types::Gesture;
use crate::features::games::GameKind;

pub fn activate(state: &mut AppState, target: Screen) -> Vec<Action> {
    let mut actions = vec![state.teardown_polls()];

    let screen = if target.requires_auth() && state.user.is_none() {
        tracing::debug!("{} requires login", target.title());
        Screen::Login
    } else {
        target
    };
    tracing::debug!("activating {}", screen.title());
    state.screen = screen;
    state.dirty = true;

    match screen {
        Screen::Login | Screen::Register => {
            state.auth_form.submitting = false;
            state.auth_form.clear_secrets();
            state.auth_form.focus = crate::app::state::FormField::Email;
        }
        Screen::Settings => state.reload_settings(),
        _ => {}
    }

    if screen.uses_camera() {
        let spec = PollSpec::status(screen, state.config.polling.status());
        actions.extend(state.register_poll(spec));
        if state.camera.active {
            actions.extend(start_camera_features(state, screen));
        }
    }
    actions
}

/// Gesture detection plus whatever the screen drives from the camera.
pub fn start_camera_features(state: &mut AppState, screen: Screen) -> Vec<Action> {
    if !screen.uses_camera() || !state.camera.active || state.screen != screen {
        return Vec::new();
    }
    let mut actions = start_gesture_detection(state, screen);
    match screen {
        Screen::Whiteboard => actions.extend(start_drawing(state)),
        Screen::Presentation => state.presentation.init(),
        Screen::Games => actions.extend(init_game(state)),
        _ => {}
    }
    actions
}

pub fn start_gesture_detection(state: &mut AppState, screen: Screen) -> Vec<Action> {
    let spec = PollSpec::gesture(screen, state.config.polling.gesture());
    let actions = state.register_poll(spec);
    state.screen_states.entry(screen).or_default().gesture_active = true;
    state.set_gesture_display(screen, Gesture::Unknown);
    actions
}

fn start_drawing(state: &mut AppState) -> Vec<Action> {
    state.whiteboard.start_session();
    let spec = PollSpec::position(Screen::Whiteboard, state.config.polling.drawing(), true);
    state.register_poll(spec)
}

/// Reset the selected game; basketball also needs the hand to aim.
pub fn init_game(state: &mut AppState) -> Vec<Action> {
    state.games.init_current();
    let mut actions = Vec::new();
    match state.games.current {
        Some(GameKind::Basketball) => {
            let spec = PollSpec::position(Screen::Games, state.config.polling.aim(), false);
            actions.extend(state.register_poll(spec));
        }
        _ => actions.extend(state.unregister_poll(Screen::Games, PollKind::Position)),
    }
    actions
}

/// Stop every gesture and position poll on every screen. Status polls stay.
pub fn stop_camera_features(state: &mut AppState) -> Vec<Action> {
    let mut ids = Vec::new();
    for st in state.screen_states.values_mut() {
        for kind in [PollKind::Gesture, PollKind::Position] {
            if let Some(slot) = st.slots.remove(&kind) {
                ids.push(slot.id);
            }
        }
        st.gesture_active = false;
    }
    state.gesture_display.clear();
    state.whiteboard.lift_pen();
    state.dirty = true;
    if ids.is_empty() {
        Vec::new()
    } else {
        vec![Action::StopPolls(ids)]
    }
}

/// Pick a game. Like any screen change this tears everything down first.
pub fn select_game(state: &mut AppState, kind: GameKind) -> Vec<Action> {
    state.games.select(kind);
    let actions = activate(state, Screen::Games);
    state.games.camera_notice = state.screen == Screen::Games && !state.camera.active;
    if state.games.camera_notice {
        tracing::debug!("{} selected with the camera off", kind.title());
    }
    actions
}
