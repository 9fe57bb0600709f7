use crate::app::action::Action;
use crate::app::camera;
use crate::app::dispatch;
use crate::app::event::{AppEvent, AuthRequest, PollPayload};
use crate::app::router;
use crate::app::state::*;
use crate::backend::client::CameraCommand;
use crate::backend::poller::PollKind;
use crate::backend::types::{AuthStatus, CommandResponse, Gesture, SettingsUpdate};
use crate::features::games::GameKind;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::AuthChecked(result) => handle_auth_checked(state, result),
        AppEvent::AuthFinished {
            request,
            email,
            result,
        } => handle_auth_finished(state, request, email, result),
        AppEvent::LogoutFinished(result) => handle_logout(state, result),
        AppEvent::CameraCommandFinished { command, result } => {
            camera::on_command_finished(state, command, result)
        }
        AppEvent::StartupStatus { attempt, result } => {
            camera::on_startup_status(state, attempt, result)
        }
        AppEvent::PollResult {
            poll_id,
            seq,
            payload,
        } => match state.accept_poll_result(poll_id, seq) {
            Some((screen, kind)) => handle_poll_payload(state, screen, kind, payload),
            None => vec![],
        },
        AppEvent::SettingsSynced(result) => {
            match result {
                Ok(resp) if resp.success => state.notify("Settings", "Settings saved successfully!"),
                Ok(resp) => {
                    let reason = resp.reason().unwrap_or("Failed to save settings").to_string();
                    state.notify_error("Settings", reason);
                }
                Err(e) => {
                    tracing::warn!("settings sync failed: {}", e);
                    state.notify_error("Settings", "An error occurred while saving settings");
                }
            }
            vec![]
        }
        AppEvent::Timer(timer) => dispatch::on_timer(state, timer),
        AppEvent::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            vec![]
        }
    }
}

fn handle_auth_checked(state: &mut AppState, result: Result<AuthStatus, String>) -> Vec<Action> {
    match result {
        Ok(status) if status.authenticated => {
            let user = status.email.unwrap_or_else(|| "User".to_string());
            tracing::info!("session restored for {}", user);
            state.user = Some(user);
            router::activate(state, Screen::Dashboard)
        }
        Ok(_) => router::activate(state, Screen::Login),
        Err(e) => {
            tracing::warn!("auth check failed: {}", e);
            router::activate(state, Screen::Login)
        }
    }
}

fn handle_auth_finished(
    state: &mut AppState,
    request: AuthRequest,
    email: String,
    result: Result<CommandResponse, String>,
) -> Vec<Action> {
    state.auth_form.submitting = false;
    let title = match request {
        AuthRequest::Login => "Login",
        AuthRequest::Register => "Register",
    };
    match result {
        Ok(resp) if resp.success => {
            tracing::info!("{} succeeded for {}", request.name(), email);
            state.user = Some(email);
            state.auth_form.clear_secrets();
            let message = match request {
                AuthRequest::Login => "Login successful!",
                AuthRequest::Register => "Registered & logged in!",
            };
            let actions = router::activate(state, Screen::Dashboard);
            state.notify(title, message);
            actions
        }
        Ok(resp) => {
            let fallback = match request {
                AuthRequest::Login => "Login failed",
                AuthRequest::Register => "Registration failed",
            };
            let reason = resp.reason().unwrap_or(fallback).to_string();
            state.notify_error(title, reason);
            vec![]
        }
        Err(e) => {
            tracing::warn!("{} request failed: {}", request.name(), e);
            state.notify_error(title, e);
            vec![]
        }
    }
}

fn handle_logout(state: &mut AppState, result: Result<CommandResponse, String>) -> Vec<Action> {
    match result {
        Ok(resp) if resp.success => {
            tracing::info!("logged out");
            state.user = None;
            let mut actions = Vec::new();
            if state.startup_watch_active {
                state.startup_watch_active = false;
                actions.push(Action::StopCameraStartupWatch);
            }
            actions.extend(router::activate(state, Screen::Login));
            state.notify("Logout", "Logged out.");
            actions
        }
        Ok(resp) => {
            let reason = resp.reason().unwrap_or("Logout failed").to_string();
            state.notify_error("Logout", reason);
            vec![]
        }
        Err(e) => {
            tracing::warn!("logout failed: {}", e);
            state.notify_error("Logout", "An error occurred during logout");
            vec![]
        }
    }
}

fn handle_poll_payload(
    state: &mut AppState,
    screen: Screen,
    kind: PollKind,
    payload: PollPayload,
) -> Vec<Action> {
    match payload {
        PollPayload::Status(result) => camera::on_status(state, result),
        PollPayload::Gesture(Ok(gesture)) => {
            state.set_gesture_display(screen, gesture);
            if screen == state.screen {
                dispatch::dispatch(state, screen, gesture)
            } else {
                vec![]
            }
        }
        PollPayload::Gesture(Err(_)) => {
            state.set_gesture_display(screen, Gesture::Unknown);
            vec![]
        }
        PollPayload::Position(Ok(position)) => {
            if screen == Screen::Games
                && state.games.current == Some(GameKind::Basketball)
                && state.games.basketball.aim(position)
            {
                state.dirty = true;
            }
            vec![]
        }
        PollPayload::DrawSample(Ok(sample)) => {
            if let Some(gesture) = sample.gesture {
                state.set_gesture_display(screen, gesture);
            }
            let outcome = state.whiteboard.apply_sample(sample.position, sample.gesture);
            tracing::trace!("drawing sample: {:?}", outcome);
            state.dirty = true;
            vec![]
        }
        PollPayload::Position(Err(e)) | PollPayload::DrawSample(Err(e)) => {
            tracing::debug!("{} poll on {} failed: {}", kind.name(), screen.title(), e);
            state.whiteboard.lift_pen();
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // The notification popup captures all input while visible
    if state.notification.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.dismiss_notification();
        }
        return vec![];
    }

    match state.screen {
        Screen::Login => return handle_form_key(state, AuthRequest::Login, key),
        Screen::Register => return handle_form_key(state, AuthRequest::Register, key),
        _ => {}
    }

    if let Some(actions) = handle_screen_key(state, key) {
        return actions;
    }

    if state.screen.uses_camera() {
        let command = match key.code {
            KeyCode::F(5) => Some(CameraCommand::Start),
            KeyCode::F(6) => Some(CameraCommand::Stop),
            KeyCode::F(7) => Some(CameraCommand::Restart),
            _ => None,
        };
        if let Some(command) = command {
            return camera::request(state, command);
        }
    }

    match key.code {
        KeyCode::Char('d') => navigate(state, Screen::Dashboard),
        KeyCode::Char('w') => navigate(state, Screen::Whiteboard),
        KeyCode::Char('g') => navigate(state, Screen::Games),
        KeyCode::Char('p') => navigate(state, Screen::Presentation),
        KeyCode::Char('s') => navigate(state, Screen::Settings),
        KeyCode::Char('o') => navigate(state, Screen::Profile),
        KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => {
            router::activate(state, Screen::Help)
        }
        KeyCode::Char('l') if state.user.is_some() => vec![Action::Logout],
        KeyCode::Char('q') => vec![Action::Quit],
        KeyCode::Esc => {
            let home = if state.user.is_some() {
                Screen::Dashboard
            } else {
                Screen::Login
            };
            router::activate(state, home)
        }
        _ => vec![],
    }
}

fn navigate(state: &mut AppState, screen: Screen) -> Vec<Action> {
    if screen.requires_auth() && state.user.is_none() {
        let actions = router::activate(state, Screen::Login);
        state.notify_error("Login", "Login first!");
        return actions;
    }
    router::activate(state, screen)
}

/// Keys owned by the current screen. `None` lets the global bindings run.
fn handle_screen_key(state: &mut AppState, key: KeyEvent) -> Option<Vec<Action>> {
    match state.screen {
        Screen::Whiteboard => match key.code {
            KeyCode::Char('u') => {
                state.whiteboard.undo();
                Some(vec![])
            }
            KeyCode::Char('x') => {
                state.whiteboard.clear();
                Some(vec![])
            }
            KeyCode::Char('c') => {
                state.whiteboard.cycle_color();
                Some(vec![])
            }
            _ => None,
        },
        Screen::Games => {
            let game = match key.code {
                KeyCode::Char('1') => GameKind::Rps,
                KeyCode::Char('2') => GameKind::Basketball,
                KeyCode::Char('3') => GameKind::Spells,
                _ => return None,
            };
            Some(router::select_game(state, game))
        }
        Screen::Presentation => match key.code {
            KeyCode::Left => {
                state.presentation.retreat();
                Some(vec![])
            }
            KeyCode::Right => {
                state.presentation.advance();
                Some(vec![])
            }
            KeyCode::Char(' ') => {
                state.presentation.toggle();
                Some(vec![])
            }
            _ => None,
        },
        Screen::Settings => handle_settings_key(state, key),
        _ => None,
    }
}

fn handle_settings_key(state: &mut AppState, key: KeyEvent) -> Option<Vec<Action>> {
    let current = state.settings.gesture_sensitivity as i32;
    match key.code {
        KeyCode::Left | KeyCode::Char('-') => {
            state.settings.set_sensitivity(current - 1);
            Some(vec![])
        }
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            state.settings.set_sensitivity(current + 1);
            Some(vec![])
        }
        KeyCode::Char('t') => {
            let theme = state.settings.theme.toggled();
            state.apply_theme(theme);
            Some(vec![])
        }
        KeyCode::Enter => Some(save_settings(state)),
        _ => None,
    }
}

fn save_settings(state: &mut AppState) -> Vec<Action> {
    let settings = state.settings;
    if let Err(e) = state.settings_store.save(&settings) {
        tracing::warn!("failed to save settings: {:#}", e);
        state.notify_error("Settings", format!("Could not save settings: {}", e));
        return vec![];
    }
    state.apply_theme(settings.theme);
    tracing::info!(
        "settings saved: sensitivity {}, theme {}",
        settings.gesture_sensitivity,
        settings.theme.as_str()
    );
    vec![Action::SyncSettings(SettingsUpdate {
        sensitivity: settings.gesture_sensitivity,
        theme: settings.theme.as_str().to_string(),
    })]
}

fn handle_form_key(state: &mut AppState, request: AuthRequest, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::F(2) => {
            let other = match request {
                AuthRequest::Login => Screen::Register,
                AuthRequest::Register => Screen::Login,
            };
            router::activate(state, other)
        }
        KeyCode::F(1) => router::activate(state, Screen::Help),
        KeyCode::Tab | KeyCode::Down => {
            state.auth_form.cycle_focus(request, true);
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.auth_form.cycle_focus(request, false);
            vec![]
        }
        KeyCode::Enter => submit_form(state, request),
        KeyCode::Backspace => {
            let input = state.auth_form.focused_input();
            if key.modifiers.contains(KeyModifiers::ALT) {
                input.delete_word_back();
            } else {
                input.delete_back();
            }
            vec![]
        }
        KeyCode::Delete => {
            state.auth_form.focused_input().delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.auth_form.focused_input().move_left();
            vec![]
        }
        KeyCode::Right => {
            state.auth_form.focused_input().move_right();
            vec![]
        }
        KeyCode::Home => {
            state.auth_form.focused_input().move_home();
            vec![]
        }
        KeyCode::End => {
            state.auth_form.focused_input().move_end();
            vec![]
        }
        KeyCode::Char(c) => {
            state.auth_form.focused_input().insert_char(c);
            vec![]
        }
        _ => vec![],
    }
}

fn submit_form(state: &mut AppState, request: AuthRequest) -> Vec<Action> {
    if state.auth_form.submitting {
        return vec![];
    }
    let title = match request {
        AuthRequest::Login => "Login",
        AuthRequest::Register => "Register",
    };
    match state.auth_form.validate(request) {
        Ok(email) => {
            state.auth_form.submitting = true;
            vec![Action::Authenticate {
                request,
                email,
                password: state.auth_form.password.text.clone(),
            }]
        }
        Err(reason) => {
            state.notify_error(title, reason);
            vec![]
        }
    }
}
