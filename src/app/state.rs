use crate::app::action::Action;
use crate::app::camera::CameraSession;
use crate::app::event::{AuthRequest, PollId};
use crate::backend::poller::{PollKind, PollSpec};
use crate::backend::types::Gesture;
use crate::config::{AppConfig, Settings, SettingsStore, ThemeMode};
use crate::features::games::Games;
use crate::features::presentation::Presentation;
use crate::features::whiteboard::{Rgb, Whiteboard, PALETTE};
use chrono::Local;
use std::collections::BTreeMap;

/// Top-level views. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    Whiteboard,
    Games,
    Presentation,
    Settings,
    Profile,
    Help,
}

impl Screen {
    pub const ALL: [Screen; 9] = [
        Screen::Login,
        Screen::Register,
        Screen::Dashboard,
        Screen::Whiteboard,
        Screen::Games,
        Screen::Presentation,
        Screen::Settings,
        Screen::Profile,
        Screen::Help,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Dashboard => "Dashboard",
            Self::Whiteboard => "Whiteboard",
            Self::Games => "Games",
            Self::Presentation => "Presentation",
            Self::Settings => "Settings",
            Self::Profile => "Profile",
            Self::Help => "Help",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Register | Self::Help)
    }

    /// Screens that show the camera and react to gestures.
    pub fn uses_camera(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Whiteboard | Self::Games | Self::Presentation
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSlot {
    pub id: PollId,
    /// Sequence number of the newest response applied so far.
    pub last_applied: u64,
}

/// Polling bookkeeping for one screen: at most one poll per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    pub slots: BTreeMap<PollKind, PollSlot>,
    pub gesture_active: bool,
}

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        // Skip trailing whitespace
        while pos > 0 && self.text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        // Skip word characters
        while pos > 0 && self.text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
        }
        self.text.drain(pos..self.cursor);
        self.cursor = pos;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Password,
    Confirm,
}

/// Shared login/register form. `Confirm` is only used when registering.
#[derive(Debug)]
pub struct AuthForm {
    pub email: InputState,
    pub password: InputState,
    pub confirm: InputState,
    pub focus: FormField,
    pub submitting: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            email: InputState::new(),
            password: InputState::new(),
            confirm: InputState::new(),
            focus: FormField::Email,
            submitting: false,
        }
    }

    pub fn fields(request: AuthRequest) -> &'static [FormField] {
        match request {
            AuthRequest::Login => &[FormField::Email, FormField::Password],
            AuthRequest::Register => &[FormField::Email, FormField::Password, FormField::Confirm],
        }
    }

    pub fn focused_input(&mut self) -> &mut InputState {
        match self.focus {
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::Confirm => &mut self.confirm,
        }
    }

    pub fn cycle_focus(&mut self, request: AuthRequest, forward: bool) {
        let fields = Self::fields(request);
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % fields.len()
        } else {
            (idx + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    /// Check the form before any request is sent. Returns the trimmed email.
    pub fn validate(&self, request: AuthRequest) -> Result<String, &'static str> {
        let email = self.email.text.trim().to_string();
        match request {
            AuthRequest::Login => {
                if email.is_empty() || self.password.text.is_empty() {
                    return Err("Please enter email and password");
                }
            }
            AuthRequest::Register => {
                if email.is_empty() {
                    return Err("Enter email");
                }
                if self.password.text != self.confirm.text {
                    return Err("Passwords do not match");
                }
                if self.password.text.chars().count() < 6 {
                    return Err("Password must be at least 6 characters");
                }
            }
        }
        Ok(email)
    }

    pub fn clear_secrets(&mut self) {
        self.password.clear();
        self.confirm.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Blocking popup; captures input until dismissed.
#[derive(Debug, Clone)]
pub struct Notification {
    pub timestamp: String,
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
}

pub struct AppState {
    pub config: AppConfig,
    pub user: Option<String>,
    pub screen: Screen,
    pub screen_states: BTreeMap<Screen, ScreenState>,
    pub next_poll_id: PollId,
    pub camera: CameraSession,
    pub startup_watch_active: bool,
    pub video_feed_url: String,
    pub gesture_display: BTreeMap<Screen, Gesture>,
    pub whiteboard: Whiteboard,
    pub games: Games,
    pub presentation: Presentation,
    pub settings: Settings,
    pub settings_store: SettingsStore,
    pub theme: ThemeMode,
    pub auth_form: AuthForm,
    pub notification: Option<Notification>,
    pub should_quit: bool,
    pub dirty: bool,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(config: AppConfig, settings_store: SettingsStore) -> Self {
        let pen = Rgb::from_hex(&config.whiteboard.default_color).unwrap_or(PALETTE[0]);
        let whiteboard = Whiteboard::new(
            config.whiteboard.canvas_width,
            config.whiteboard.canvas_height,
            config.whiteboard.cell_size,
            pen,
        );
        let games = Games::new(config.games.court_width, config.games.hoop_threshold);
        let settings = settings_store.load().unwrap_or_else(|e| {
            tracing::warn!("using default settings: {:#}", e);
            Settings::default()
        });
        Self {
            config,
            user: None,
            screen: Screen::Login,
            screen_states: BTreeMap::new(),
            next_poll_id: 0,
            camera: CameraSession::default(),
            startup_watch_active: false,
            video_feed_url: String::new(),
            gesture_display: BTreeMap::new(),
            whiteboard,
            games,
            presentation: Presentation::default(),
            theme: settings.theme,
            settings,
            settings_store,
            auth_form: AuthForm::new(),
            notification: None,
            should_quit: false,
            dirty: true,
            tick_count: 0,
        }
    }

    pub fn allocate_poll_id(&mut self) -> PollId {
        self.next_poll_id += 1;
        self.next_poll_id
    }

    pub fn screen_state(&self, screen: Screen) -> Option<&ScreenState> {
        self.screen_states.get(&screen)
    }

    pub fn poll_slot(&self, screen: Screen, kind: PollKind) -> Option<PollSlot> {
        self.screen_states
            .get(&screen)
            .and_then(|s| s.slots.get(&kind))
            .copied()
    }

    /// Every registered poll as `(screen, kind, id)`.
    pub fn active_polls(&self) -> Vec<(Screen, PollKind, PollId)> {
        self.screen_states
            .iter()
            .flat_map(|(screen, st)| st.slots.iter().map(move |(kind, slot)| (*screen, *kind, slot.id)))
            .collect()
    }

    /// Register a poll for `spec.screen`, replacing any poll of the same kind.
    pub fn register_poll(&mut self, spec: PollSpec) -> Vec<Action> {
        let mut actions = Vec::new();
        let id = self.allocate_poll_id();
        let st = self.screen_states.entry(spec.screen).or_default();
        if let Some(old) = st.slots.insert(spec.kind, PollSlot { id, last_applied: 0 }) {
            actions.push(Action::StopPolls(vec![old.id]));
        }
        actions.push(Action::StartPoll { id, spec });
        actions
    }

    pub fn unregister_poll(&mut self, screen: Screen, kind: PollKind) -> Option<Action> {
        let slot = self.screen_states.get_mut(&screen)?.slots.remove(&kind)?;
        Some(Action::StopPolls(vec![slot.id]))
    }

    /// Forget every poll on every screen and reset gesture displays.
    pub fn teardown_polls(&mut self) -> Action {
        self.screen_states.clear();
        self.gesture_display.clear();
        Action::StopAllPolls
    }

    /// Accept a poll response if its poll is still registered and it is newer
    /// than anything applied before. Returns the owning screen and kind.
    pub fn accept_poll_result(&mut self, poll_id: PollId, seq: u64) -> Option<(Screen, PollKind)> {
        for (screen, st) in self.screen_states.iter_mut() {
            for (kind, slot) in st.slots.iter_mut() {
                if slot.id == poll_id {
                    if seq <= slot.last_applied {
                        tracing::debug!("dropping stale {} response {} <= {}", kind.name(), seq, slot.last_applied);
                        return None;
                    }
                    slot.last_applied = seq;
                    return Some((*screen, *kind));
                }
            }
        }
        None
    }

    pub fn gesture_for(&self, screen: Screen) -> Gesture {
        self.gesture_display.get(&screen).copied().unwrap_or_default()
    }

    pub fn set_gesture_display(&mut self, screen: Screen, gesture: Gesture) {
        self.gesture_display.insert(screen, gesture);
        self.dirty = true;
    }

    pub fn notify(&mut self, title: &str, message: impl Into<String>) {
        self.push_notification(title, message.into(), NotificationLevel::Info);
    }

    pub fn notify_error(&mut self, title: &str, message: impl Into<String>) {
        self.push_notification(title, message.into(), NotificationLevel::Error);
    }

    fn push_notification(&mut self, title: &str, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            title: title.to_string(),
            message,
            level,
        });
        self.dirty = true;
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
        self.dirty = true;
    }

    /// Reload persisted settings and apply the stored theme.
    pub fn reload_settings(&mut self) {
        match self.settings_store.load() {
            Ok(settings) => {
                self.settings = settings;
                self.theme = settings.theme;
            }
            Err(e) => {
                tracing::warn!("failed to load settings: {:#}", e);
                self.notify_error("Settings", format!("Could not load settings: {}", e));
            }
        }
    }

    pub fn apply_theme(&mut self, theme: ThemeMode) {
        self.settings.theme = theme;
        self.theme = theme;
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        let polls = self.active_polls().len();
        let camera = self.camera.status_text();
        match &self.user {
            Some(user) => format!("{} | Camera: {} | Polls: {}", user, camera, polls),
            None => format!("Not logged in | Camera: {}", camera),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_poll_replaces_same_kind() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(AppConfig::default(), SettingsStore::new(dir.path().join("s.toml")));
        let spec = PollSpec::status(Screen::Dashboard, std::time::Duration::from_secs(1));
        let first = state.register_poll(spec);
        assert_eq!(first.len(), 1);
        let second = state.register_poll(spec);
        assert!(matches!(second[0], Action::StopPolls(ref ids) if ids == &vec![1]));
        assert_eq!(state.active_polls(), vec![(Screen::Dashboard, PollKind::Status, 2)]);
    }

    #[test]
    fn test_accept_poll_result_enforces_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(AppConfig::default(), SettingsStore::new(dir.path().join("s.toml")));
        state.register_poll(PollSpec::gesture(Screen::Games, std::time::Duration::from_millis(350)));
        let id = state.poll_slot(Screen::Games, PollKind::Gesture).unwrap().id;

        assert_eq!(state.accept_poll_result(id, 2), Some((Screen::Games, PollKind::Gesture)));
        assert_eq!(state.accept_poll_result(id, 1), None);
        assert_eq!(state.accept_poll_result(id, 2), None);
        assert!(state.accept_poll_result(id, 3).is_some());
        assert_eq!(state.accept_poll_result(id + 100, 9), None);
    }

    #[test]
    fn test_register_validation() {
        let mut form = AuthForm::new();
        "a@b.c".chars().for_each(|c| form.email.insert_char(c));
        "secret".chars().for_each(|c| form.password.insert_char(c));
        "secreT".chars().for_each(|c| form.confirm.insert_char(c));
        assert_eq!(form.validate(AuthRequest::Register), Err("Passwords do not match"));

        form.password.clear();
        form.confirm.clear();
        "abc".chars().for_each(|c| form.password.insert_char(c));
        "abc".chars().for_each(|c| form.confirm.insert_char(c));
        assert_eq!(
            form.validate(AuthRequest::Register),
            Err("Password must be at least 6 characters")
        );
        assert_eq!(form.validate(AuthRequest::Login), Ok("a@b.c".to_string()));
    }

    #[test]
    fn test_focus_cycles_within_form_fields() {
        let mut form = AuthForm::new();
        form.cycle_focus(AuthRequest::Login, true);
        assert_eq!(form.focus, FormField::Password);
        form.cycle_focus(AuthRequest::Login, true);
        assert_eq!(form.focus, FormField::Email);
        form.cycle_focus(AuthRequest::Register, false);
        assert_eq!(form.focus, FormField::Confirm);
    }

    #[test]
    fn test_input_editing_handles_multibyte() {
        let mut input = InputState::new();
        for c in "héllo wörld".chars() {
            input.insert_char(c);
        }
        input.delete_word_back();
        assert_eq!(input.text, "héllo ");
        input.move_left();
        input.move_left();
        input.delete_back();
        assert_eq!(input.text, "hélo ");
        assert_eq!(input.cursor, "hél".len());
        assert_eq!(input.cursor_column(), 3);
    }
}
