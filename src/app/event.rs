use crate::backend::client::CameraCommand;
use crate::backend::types::{AuthStatus, CameraStatus, CommandResponse, Gesture, HandPosition};
use crossterm::event::Event as CrosstermEvent;

pub type PollId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequest {
    Login,
    Register,
}

impl AuthRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

/// One hand position plus, when the hand was visible, the gesture fetched
/// right after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawSample {
    pub position: HandPosition,
    pub gesture: Option<Gesture>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollPayload {
    Status(Result<CameraStatus, String>),
    Gesture(Result<Gesture, String>),
    Position(Result<HandPosition, String>),
    DrawSample(Result<DrawSample, String>),
}

/// Deferred feature work. Ids let the receiver ignore timers that belong to
/// a round, shot or effect that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    RpsReveal { round: u64 },
    ShotLanded { shot: u64 },
    BallReset { shot: u64 },
    SpellFaded { effect: u64 },
}

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Startup `/check_auth` result
    AuthChecked(Result<AuthStatus, String>),
    AuthFinished {
        request: AuthRequest,
        email: String,
        result: Result<CommandResponse, String>,
    },
    LogoutFinished(Result<CommandResponse, String>),

    CameraCommandFinished {
        command: CameraCommand,
        result: Result<CommandResponse, String>,
    },
    /// One tick of the post-start status watch
    StartupStatus {
        attempt: u32,
        result: Result<CameraStatus, String>,
    },

    /// Response to one tick of a recurring poll
    PollResult {
        poll_id: PollId,
        seq: u64,
        payload: PollPayload,
    },

    SettingsSynced(Result<CommandResponse, String>),

    Timer(TimerEvent),

    /// Tick for UI refresh
    Tick,
}
