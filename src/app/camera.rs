//! Client-side mirror of the server's camera session.
//!
//! Status poll results, the post-start watch, and start/stop/restart
//! outcomes all funnel through here. Controls are derived from the session
//! at render time so the UI never shows a stale button.

use crate::app::action::Action;
use crate::app::router;
use crate::app::state::AppState;
use crate::backend::client::CameraCommand;
use crate::backend::poller::{PollKind, PollSpec};
use crate::backend::types::{CameraStatus, CommandResponse};

pub const STATUS_FAILED: &str = "Failed to check camera status";
pub const INIT_TIMED_OUT: &str = "Camera initialization timed out";
pub const INIT_NOT_ACTIVE: &str = "Camera initialization completed but camera is not active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraTransition {
    BecameActive,
    BecameInactive,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraControls {
    pub start: bool,
    pub stop: bool,
    pub restart: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraSession {
    pub active: bool,
    pub requested: bool,
    pub error: Option<String>,
    pub initializing: bool,
    /// Consecutive status reports that said "initializing".
    pub initializing_polls: u32,
    /// Command sent but not answered yet.
    pub pending: Option<CameraCommand>,
}

impl CameraSession {
    pub fn apply_status(&mut self, status: &CameraStatus) -> CameraTransition {
        let was_active = self.active;
        self.active = status.active;
        self.requested = status.requested;
        self.error = status.error.clone();
        self.initializing = status.initializing;
        match (was_active, self.active) {
            (false, true) => CameraTransition::BecameActive,
            (true, false) => CameraTransition::BecameInactive,
            _ => CameraTransition::Unchanged,
        }
    }

    /// Count one more "initializing" report; `true` once the budget is spent.
    pub fn note_initializing(&mut self, budget: u32) -> bool {
        if !self.initializing {
            self.initializing_polls = 0;
            return false;
        }
        self.initializing_polls += 1;
        if self.initializing_polls > budget {
            self.initializing = false;
            self.error = Some(INIT_TIMED_OUT.to_string());
            return true;
        }
        false
    }

    /// Roll back to a safe "off" state after a failed status check.
    pub fn mark_unreachable(&mut self) -> CameraTransition {
        let was_active = self.active;
        self.active = false;
        self.initializing = false;
        self.error = Some(STATUS_FAILED.to_string());
        if was_active {
            CameraTransition::BecameInactive
        } else {
            CameraTransition::Unchanged
        }
    }

    pub fn begin_initializing(&mut self) {
        self.requested = true;
        self.initializing = true;
        self.initializing_polls = 0;
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = CameraSession::default();
    }

    pub fn controls(&self) -> CameraControls {
        if self.pending.is_some() {
            return CameraControls {
                start: false,
                stop: false,
                restart: false,
            };
        }
        CameraControls {
            start: !self.active,
            stop: self.active,
            restart: self.active,
        }
    }

    pub fn status_text(&self) -> String {
        match self.pending {
            Some(CameraCommand::Start) => return "Starting...".to_string(),
            Some(CameraCommand::Stop) => return "Stopping...".to_string(),
            Some(CameraCommand::Restart) => return "Restarting...".to_string(),
            None => {}
        }
        if self.active {
            "Active".to_string()
        } else if self.initializing {
            "Initializing...".to_string()
        } else if let Some(err) = &self.error {
            format!("Error: {}", err)
        } else {
            "Camera is off".to_string()
        }
    }

    /// The feed URL is only meaningful while the camera runs.
    pub fn video_source<'a>(&self, feed_url: &'a str) -> Option<&'a str> {
        if self.active && !feed_url.is_empty() {
            Some(feed_url)
        } else {
            None
        }
    }
}

/// A status poll result that passed the freshness check.
pub fn on_status(state: &mut AppState, result: Result<CameraStatus, String>) -> Vec<Action> {
    let mut actions = Vec::new();
    state.dirty = true;
    let transition = match result {
        Ok(status) => {
            let transition = state.camera.apply_status(&status);
            if state
                .camera
                .note_initializing(state.config.camera.init_timeout_polls)
            {
                tracing::warn!(
                    "camera still initializing after {} checks, giving up",
                    state.config.camera.init_timeout_polls
                );
                actions.extend(state.unregister_poll(state.screen, PollKind::Status));
            }
            transition
        }
        Err(e) => {
            tracing::warn!("camera status unavailable: {}", e);
            state.camera.mark_unreachable()
        }
    };
    actions.extend(apply_transition(state, transition));
    actions
}

fn apply_transition(state: &mut AppState, transition: CameraTransition) -> Vec<Action> {
    match transition {
        CameraTransition::BecameActive => {
            tracing::info!("camera became active");
            let screen = state.screen;
            router::start_camera_features(state, screen)
        }
        CameraTransition::BecameInactive => {
            tracing::info!("camera became inactive");
            router::stop_camera_features(state)
        }
        CameraTransition::Unchanged => {
            // A failed check leaves the camera off; nothing may keep polling.
            if !state.camera.active {
                router::stop_camera_features(state)
            } else {
                Vec::new()
            }
        }
    }
}

pub fn request(state: &mut AppState, command: CameraCommand) -> Vec<Action> {
    if state.camera.pending.is_some() {
        return Vec::new();
    }
    let allowed = {
        let controls = state.camera.controls();
        match command {
            CameraCommand::Start => controls.start,
            CameraCommand::Stop => controls.stop,
            CameraCommand::Restart => controls.restart,
        }
    };
    if !allowed {
        return Vec::new();
    }
    tracing::info!("camera {} requested", command.verb());
    state.camera.pending = Some(command);
    state.dirty = true;
    vec![Action::Camera(command)]
}

pub fn on_command_finished(
    state: &mut AppState,
    command: CameraCommand,
    result: Result<CommandResponse, String>,
) -> Vec<Action> {
    state.camera.pending = None;
    state.dirty = true;
    let response = match result {
        Ok(resp) if resp.success => resp,
        Ok(resp) => {
            let reason = resp
                .reason()
                .map(str::to_string)
                .unwrap_or_else(|| failure_message(command).to_string());
            return command_failed(state, command, reason);
        }
        Err(e) => {
            tracing::warn!("camera {} error: {}", command.verb(), e);
            return command_failed(state, command, error_message(command).to_string());
        }
    };
    if let Some(msg) = &response.message {
        tracing::info!("camera {}: {}", command.verb(), msg);
    }

    match command {
        CameraCommand::Start => {
            state.camera.begin_initializing();
            state.startup_watch_active = true;
            vec![Action::WatchCameraStartup]
        }
        CameraCommand::Stop => {
            state.camera.clear();
            let mut actions = router::stop_camera_features(state);
            if state.startup_watch_active {
                state.startup_watch_active = false;
                actions.push(Action::StopCameraStartupWatch);
            }
            actions
        }
        CameraCommand::Restart => {
            state.camera.begin_initializing();
            let screen = state.screen;
            if screen.uses_camera() && state.poll_slot(screen, PollKind::Status).is_none() {
                let spec = PollSpec::status(screen, state.config.polling.status());
                state.register_poll(spec)
            } else {
                Vec::new()
            }
        }
    }
}

fn command_failed(state: &mut AppState, command: CameraCommand, reason: String) -> Vec<Action> {
    // A failed stop leaves the running session untouched.
    if command != CameraCommand::Stop {
        state.camera.error = Some(reason.clone());
    }
    state.notify_error("Camera", reason);
    Vec::new()
}

fn failure_message(command: CameraCommand) -> &'static str {
    match command {
        CameraCommand::Start => "Failed to start camera",
        CameraCommand::Stop => "Failed to stop camera",
        CameraCommand::Restart => "Failed to restart camera",
    }
}

fn error_message(command: CameraCommand) -> &'static str {
    match command {
        CameraCommand::Start => "An error occurred while starting the camera",
        CameraCommand::Stop => "An error occurred while stopping the camera",
        CameraCommand::Restart => "An error occurred while restarting the camera",
    }
}

/// One tick of the watch that follows a successful start.
pub fn on_startup_status(
    state: &mut AppState,
    attempt: u32,
    result: Result<CameraStatus, String>,
) -> Vec<Action> {
    if !state.startup_watch_active {
        return Vec::new();
    }
    state.dirty = true;
    let budget = state.config.camera.init_timeout_polls;
    let status = match result {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("startup status check {} failed: {}", attempt, e);
            let transition = state.camera.mark_unreachable();
            let mut actions = finish_watch(state);
            actions.extend(apply_transition(state, transition));
            state.notify_error("Camera", STATUS_FAILED);
            return actions;
        }
    };

    if status.active {
        let transition = state.camera.apply_status(&status);
        state.camera.initializing_polls = 0;
        let mut actions = finish_watch(state);
        actions.extend(apply_transition(state, transition));
        return actions;
    }
    if let Some(err) = status.error.clone() {
        state.camera.apply_status(&status);
        let actions = finish_watch(state);
        state.notify_error("Camera", err);
        return actions;
    }
    if !status.initializing {
        state.camera.apply_status(&status);
        state.camera.error = Some(INIT_NOT_ACTIVE.to_string());
        let actions = finish_watch(state);
        state.notify_error("Camera", INIT_NOT_ACTIVE);
        return actions;
    }

    state.camera.initializing = true;
    if attempt >= budget {
        tracing::warn!("camera startup watch exhausted after {} checks", attempt);
        state.camera.initializing = false;
        state.camera.error = Some(INIT_TIMED_OUT.to_string());
        let actions = finish_watch(state);
        state.notify_error("Camera", INIT_TIMED_OUT);
        return actions;
    }
    Vec::new()
}

fn finish_watch(state: &mut AppState) -> Vec<Action> {
    state.startup_watch_active = false;
    vec![Action::StopCameraStartupWatch]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Screen;
    use crate::config::{AppConfig, SettingsStore};

    fn state_on(screen: Screen) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(
            AppConfig::default(),
            SettingsStore::new(dir.path().join("settings.toml")),
        );
        state.user = Some("ada@example.com".to_string());
        router::activate(&mut state, screen);
        (dir, state)
    }

    fn status(active: bool, initializing: bool, error: Option<&str>) -> CameraStatus {
        CameraStatus {
            active,
            requested: true,
            error: error.map(str::to_string),
            initializing,
        }
    }

    fn has_kind(state: &AppState, kind: PollKind) -> bool {
        state.active_polls().iter().any(|(_, k, _)| *k == kind)
    }

    #[test]
    fn test_apply_status_transitions() {
        let mut cam = CameraSession::default();
        assert_eq!(cam.apply_status(&status(true, false, None)), CameraTransition::BecameActive);
        assert_eq!(cam.apply_status(&status(true, false, None)), CameraTransition::Unchanged);
        assert_eq!(cam.apply_status(&status(false, false, None)), CameraTransition::BecameInactive);
    }

    #[test]
    fn test_controls_follow_session() {
        let mut cam = CameraSession::default();
        assert_eq!(cam.controls(), CameraControls { start: true, stop: false, restart: false });
        cam.active = true;
        assert_eq!(cam.controls(), CameraControls { start: false, stop: true, restart: true });
        cam.pending = Some(CameraCommand::Stop);
        assert!(!cam.controls().stop);
        assert_eq!(cam.status_text(), "Stopping...");
    }

    #[test]
    fn test_becoming_active_starts_features_on_whiteboard() {
        let (_dir, mut state) = state_on(Screen::Whiteboard);
        on_status(&mut state, Ok(status(true, false, None)));
        assert!(has_kind(&state, PollKind::Gesture));
        let slot = state.poll_slot(Screen::Whiteboard, PollKind::Position);
        assert!(slot.is_some());
    }

    #[test]
    fn test_inactive_status_stops_gesture_and_position_polls() {
        let (_dir, mut state) = state_on(Screen::Whiteboard);
        on_status(&mut state, Ok(status(true, false, None)));
        let actions = on_status(&mut state, Ok(status(false, false, None)));
        assert!(!has_kind(&state, PollKind::Gesture));
        assert!(!has_kind(&state, PollKind::Position));
        assert!(has_kind(&state, PollKind::Status));
        assert!(matches!(actions.last(), Some(Action::StopPolls(ids)) if ids.len() == 2));
    }

    #[test]
    fn test_status_failure_rolls_back() {
        let (_dir, mut state) = state_on(Screen::Dashboard);
        on_status(&mut state, Ok(status(true, false, None)));
        on_status(&mut state, Err("HTTP error! status: 500".to_string()));
        assert!(!state.camera.active);
        assert_eq!(state.camera.error.as_deref(), Some(STATUS_FAILED));
        assert!(!has_kind(&state, PollKind::Gesture));
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_initializing_budget_stops_status_poll() {
        let (_dir, mut state) = state_on(Screen::Dashboard);
        let budget = state.config.camera.init_timeout_polls;
        for _ in 0..budget {
            on_status(&mut state, Ok(status(false, true, None)));
        }
        assert!(has_kind(&state, PollKind::Status));
        on_status(&mut state, Ok(status(false, true, None)));
        assert!(!has_kind(&state, PollKind::Status));
        assert_eq!(state.camera.error.as_deref(), Some(INIT_TIMED_OUT));
    }

    #[test]
    fn test_startup_watch_ends_after_budget() {
        let (_dir, mut state) = state_on(Screen::Dashboard);
        request(&mut state, CameraCommand::Start);
        let actions = on_command_finished(
            &mut state,
            CameraCommand::Start,
            Ok(CommandResponse { success: true, message: None, error: None }),
        );
        assert_eq!(actions, vec![Action::WatchCameraStartup]);

        let budget = state.config.camera.init_timeout_polls;
        for attempt in 1..budget {
            assert!(on_startup_status(&mut state, attempt, Ok(status(false, true, None))).is_empty());
        }
        let actions = on_startup_status(&mut state, budget, Ok(status(false, true, None)));
        assert_eq!(actions, vec![Action::StopCameraStartupWatch]);
        assert!(!state.startup_watch_active);
        assert_eq!(state.camera.error.as_deref(), Some(INIT_TIMED_OUT));

        // Late ticks are ignored once the watch ended.
        assert!(on_startup_status(&mut state, budget + 1, Ok(status(true, false, None))).is_empty());
        assert!(!state.camera.active);
    }

    #[test]
    fn test_startup_watch_success_starts_gesture_poll() {
        let (_dir, mut state) = state_on(Screen::Presentation);
        state.startup_watch_active = true;
        let actions = on_startup_status(&mut state, 2, Ok(status(true, false, None)));
        assert_eq!(actions[0], Action::StopCameraStartupWatch);
        assert!(state.camera.active);
        assert!(has_kind(&state, PollKind::Gesture));
    }

    #[test]
    fn test_startup_watch_reports_not_active() {
        let (_dir, mut state) = state_on(Screen::Dashboard);
        state.startup_watch_active = true;
        on_startup_status(&mut state, 1, Ok(status(false, false, None)));
        assert_eq!(state.camera.error.as_deref(), Some(INIT_NOT_ACTIVE));
        assert_eq!(
            state.notification.as_ref().map(|n| n.message.as_str()),
            Some(INIT_NOT_ACTIVE)
        );
    }

    #[test]
    fn test_failed_start_surfaces_server_reason() {
        let (_dir, mut state) = state_on(Screen::Dashboard);
        request(&mut state, CameraCommand::Start);
        on_command_finished(
            &mut state,
            CameraCommand::Start,
            Ok(CommandResponse {
                success: false,
                message: None,
                error: Some("No camera found".to_string()),
            }),
        );
        assert_eq!(state.camera.error.as_deref(), Some("No camera found"));
        assert!(state.camera.pending.is_none());
        assert!(state.notification.is_some());
    }

    #[test]
    fn test_stop_clears_session_and_dependents() {
        let (_dir, mut state) = state_on(Screen::Games);
        on_status(&mut state, Ok(status(true, false, None)));
        assert!(has_kind(&state, PollKind::Gesture));
        request(&mut state, CameraCommand::Stop);
        on_command_finished(
            &mut state,
            CameraCommand::Stop,
            Ok(CommandResponse { success: true, message: None, error: None }),
        );
        assert!(!state.camera.active);
        assert!(!has_kind(&state, PollKind::Gesture));
    }

    #[test]
    fn test_request_ignores_hidden_controls() {
        let (_dir, mut state) = state_on(Screen::Dashboard);
        assert!(request(&mut state, CameraCommand::Stop).is_empty());
        assert_eq!(
            request(&mut state, CameraCommand::Start),
            vec![Action::Camera(CameraCommand::Start)]
        );
        assert!(request(&mut state, CameraCommand::Start).is_empty());
    }
}
