//! Recurring poll tasks.
//!
//! Every poll is a tokio task driven by an interval. A tick never waits for
//! the previous tick's response: the request runs in its own detached task
//! and reports back with the tick's sequence number, so the receiver can
//! discard responses that arrive out of order.

use crate::app::event::{AppEvent, DrawSample, PollId, PollPayload};
use crate::app::state::Screen;
use crate::backend::client::BackendClient;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// The concern a poll serves. A screen holds at most one poll per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PollKind {
    Status,
    Gesture,
    Position,
}

impl PollKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Gesture => "gesture",
            Self::Position => "position",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollSpec {
    pub screen: Screen,
    pub kind: PollKind,
    pub period: Duration,
    /// Position polls only: fetch the gesture alongside each visible sample.
    pub pair_with_gesture: bool,
}

impl PollSpec {
    pub fn status(screen: Screen, period: Duration) -> Self {
        Self {
            screen,
            kind: PollKind::Status,
            period,
            pair_with_gesture: false,
        }
    }

    pub fn gesture(screen: Screen, period: Duration) -> Self {
        Self {
            screen,
            kind: PollKind::Gesture,
            period,
            pair_with_gesture: false,
        }
    }

    pub fn position(screen: Screen, period: Duration, pair_with_gesture: bool) -> Self {
        Self {
            screen,
            kind: PollKind::Position,
            period,
            pair_with_gesture,
        }
    }
}

/// Process-wide gate keeping gesture requests at least `min_interval` apart,
/// no matter how many gesture polls are running.
///
/// Callers pass the tick's scheduled deadline rather than the wake-up time,
/// so a single poller running at `min_interval` is never throttled by timer
/// jitter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn try_acquire_at(&self, now: Instant) -> bool {
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match *last {
            Some(prev) if now.saturating_duration_since(prev) < self.min_interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

pub fn spawn_poll(
    id: PollId,
    spec: PollSpec,
    client: BackendClient,
    limiter: RateLimiter,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(spec.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut seq: u64 = 0;
        loop {
            let deadline = interval.tick().await;
            if event_tx.is_closed() {
                break;
            }
            if spec.kind == PollKind::Gesture && !limiter.try_acquire_at(deadline) {
                continue;
            }
            seq += 1;
            let client = client.clone();
            let tx = event_tx.clone();
            tokio::spawn(async move {
                let payload = fetch(&client, &spec).await;
                let _ = tx.send(AppEvent::PollResult {
                    poll_id: id,
                    seq,
                    payload,
                });
            });
        }
    })
}

async fn fetch(client: &BackendClient, spec: &PollSpec) -> PollPayload {
    match spec.kind {
        PollKind::Status => PollPayload::Status(client.camera_status().await.map_err(|e| {
            tracing::warn!("camera status check failed: {}", e);
            e.to_string()
        })),
        PollKind::Gesture => PollPayload::Gesture(
            client
                .gesture()
                .await
                .map(|r| r.gesture)
                .map_err(|e| {
                    tracing::debug!("gesture fetch failed: {}", e);
                    e.to_string()
                }),
        ),
        PollKind::Position if spec.pair_with_gesture => {
            PollPayload::DrawSample(fetch_draw_sample(client).await)
        }
        PollKind::Position => PollPayload::Position(client.hand_position().await.map_err(|e| {
            tracing::debug!("hand position fetch failed: {}", e);
            e.to_string()
        })),
    }
}

/// Position first; the gesture is only fetched when the hand is visible.
async fn fetch_draw_sample(client: &BackendClient) -> Result<DrawSample, String> {
    let position = client.hand_position().await.map_err(|e| {
        tracing::debug!("hand position fetch failed: {}", e);
        e.to_string()
    })?;
    if !position.visible {
        return Ok(DrawSample {
            position,
            gesture: None,
        });
    }
    let gesture = client.gesture().await.map_err(|e| {
        tracing::debug!("drawing gesture fetch failed: {}", e);
        e.to_string()
    })?;
    Ok(DrawSample {
        position,
        gesture: Some(gesture.gesture),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(350));
        let t0 = Instant::now();
        assert!(limiter.try_acquire_at(t0));
        assert!(!limiter.try_acquire_at(t0 + Duration::from_millis(100)));
        assert!(!limiter.try_acquire_at(t0 + Duration::from_millis(349)));
        assert!(limiter.try_acquire_at(t0 + Duration::from_millis(350)));
    }

    #[test]
    fn test_rate_limiter_is_shared_between_clones() {
        let limiter = RateLimiter::new(Duration::from_millis(350));
        let other = limiter.clone();
        let t0 = Instant::now();
        assert!(limiter.try_acquire_at(t0));
        assert!(!other.try_acquire_at(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn test_single_poller_at_nominal_period_is_never_skipped() {
        let period = Duration::from_millis(350);
        let limiter = RateLimiter::new(period);
        let t0 = Instant::now();
        for n in 0..20u32 {
            assert!(limiter.try_acquire_at(t0 + period * n), "tick {} skipped", n);
        }
    }

    #[test]
    fn test_second_poller_between_ticks_is_held_back() {
        let period = Duration::from_millis(350);
        let limiter = RateLimiter::new(period);
        let t0 = Instant::now();
        assert!(limiter.try_acquire_at(t0));
        assert!(!limiter.try_acquire_at(t0 + Duration::from_millis(175)));
        assert!(limiter.try_acquire_at(t0 + period));
    }

    #[test]
    fn test_position_poll_carries_pairing() {
        let spec = PollSpec::position(Screen::Whiteboard, Duration::from_millis(50), true);
        assert_eq!(spec.kind, PollKind::Position);
        assert!(spec.pair_with_gesture);
        assert!(!PollSpec::gesture(Screen::Games, Duration::from_millis(350)).pair_with_gesture);
    }
}
