use crate::app::event::{AuthRequest, PollId, TimerEvent};
use crate::backend::client::CameraCommand;
use crate::backend::poller::PollSpec;
use crate::backend::types::SettingsUpdate;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CheckAuth,
    Authenticate { request: AuthRequest, email: String, password: String },
    Logout,
    Camera(CameraCommand),
    StartPoll { id: PollId, spec: PollSpec },
    StopPolls(Vec<PollId>),
    StopAllPolls,
    WatchCameraStartup,
    StopCameraStartupWatch,
    SyncSettings(SettingsUpdate),
    Schedule { delay: Duration, event: TimerEvent },
    Quit,
}
