use crate::app::event::{AppEvent, AuthRequest, PollId, TimerEvent};
use crate::backend::client::{BackendClient, CameraCommand};
use crate::backend::poller::{spawn_poll, PollSpec, RateLimiter};
use crate::backend::types::SettingsUpdate;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

struct RunningPoll {
    spec: PollSpec,
    handle: JoinHandle<()>,
}

/// Owns every background task that talks to the backend: one-shot requests,
/// recurring polls, the camera startup watch, and feature timers.
///
/// Results always come back through the event channel; nothing here touches
/// `AppState`.
pub struct BackendManager {
    client: BackendClient,
    limiter: RateLimiter,
    polls: HashMap<PollId, RunningPoll>,
    startup_watch: Option<JoinHandle<()>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl BackendManager {
    pub fn new(
        client: BackendClient,
        gesture_interval: Duration,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            client,
            limiter: RateLimiter::new(gesture_interval),
            polls: HashMap::new(),
            startup_watch: None,
            event_tx,
        }
    }

    pub fn video_feed_url(&self) -> String {
        self.client.video_feed_url()
    }

    pub fn check_auth(&self) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.check_auth().await.map_err(|e| {
                tracing::warn!("auth check failed: {}", e);
                e.user_message()
            });
            let _ = tx.send(AppEvent::AuthChecked(result));
        });
    }

    pub fn authenticate(&self, request: AuthRequest, email: String, password: String) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match request {
                AuthRequest::Login => client.login(&email, &password).await,
                AuthRequest::Register => client.register(&email, &password).await,
            };
            let result = result.map_err(|e| {
                tracing::warn!("{} request failed: {}", request.name(), e);
                e.user_message()
            });
            let _ = tx.send(AppEvent::AuthFinished {
                request,
                email,
                result,
            });
        });
    }

    pub fn logout(&self) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.logout().await.map_err(|e| {
                tracing::warn!("logout failed: {}", e);
                e.user_message()
            });
            let _ = tx.send(AppEvent::LogoutFinished(result));
        });
    }

    pub fn camera_command(&self, command: CameraCommand) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.camera_command(command).await.map_err(|e| {
                tracing::warn!("camera {} failed: {}", command.path(), e);
                e.user_message()
            });
            let _ = tx.send(AppEvent::CameraCommandFinished { command, result });
        });
    }

    pub fn sync_settings(&self, update: SettingsUpdate) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.update_settings(&update).await.map_err(|e| {
                tracing::warn!("settings update failed: {}", e);
                e.user_message()
            });
            let _ = tx.send(AppEvent::SettingsSynced(result));
        });
    }

    /// Start a poll. An existing poll with the same id is replaced.
    pub fn start_poll(&mut self, id: PollId, spec: PollSpec) {
        self.stop_polls(&[id]);
        tracing::debug!(
            "starting {} poll {} for {:?} every {:?}",
            spec.kind.name(),
            id,
            spec.screen,
            spec.period
        );
        let handle = spawn_poll(
            id,
            spec,
            self.client.clone(),
            self.limiter.clone(),
            self.event_tx.clone(),
        );
        self.polls.insert(id, RunningPoll { spec, handle });
    }

    pub fn stop_polls(&mut self, ids: &[PollId]) {
        for id in ids {
            if let Some(poll) = self.polls.remove(id) {
                tracing::debug!("stopping {} poll {}", poll.spec.kind.name(), id);
                poll.handle.abort();
            }
        }
    }

    pub fn stop_all_polls(&mut self) {
        for (_id, poll) in self.polls.drain() {
            poll.handle.abort();
        }
    }

    /// Poll `/camera_status` every `period` for at most `max_attempts`
    /// ticks. The handler decides when the outcome is final and stops the
    /// watch; the attempt cap only guarantees termination.
    pub fn watch_startup(&mut self, period: Duration, max_attempts: u32) {
        self.stop_startup_watch();
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        self.startup_watch = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately; the backend needs a moment.
            interval.tick().await;
            for attempt in 1..=max_attempts {
                interval.tick().await;
                let result = client.camera_status().await.map_err(|e| {
                    tracing::warn!("startup status check failed: {}", e);
                    e.to_string()
                });
                if tx.send(AppEvent::StartupStatus { attempt, result }).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop_startup_watch(&mut self) {
        if let Some(handle) = self.startup_watch.take() {
            handle.abort();
        }
    }

    pub fn schedule(&self, delay: Duration, event: TimerEvent) {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::Timer(event));
        });
    }

    pub fn shutdown(&mut self) {
        self.stop_all_polls();
        self.stop_startup_watch();
    }
}
