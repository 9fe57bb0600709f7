//! Thin async wrapper around the backend's HTTP endpoints.
//!
//! A single `reqwest::Client` with a cookie store is shared by every request,
//! so the session cookie set by `/login` accompanies all later calls.

use crate::backend::types::{
    AuthStatus, CameraStatus, CommandResponse, GestureResponse, HandPosition, SettingsUpdate,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error! status: {status}{}", .message.as_ref().map(|m| format!(" ({})", m)).unwrap_or_default())]
    Http { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
}

impl BackendError {
    /// Text suitable for showing to the user: the server's own message when
    /// it sent one, otherwise the error description.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Http {
                message: Some(m), ..
            } => m.clone(),
            other => other.to_string(),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCommand {
    Start,
    Stop,
    Restart,
}

impl CameraCommand {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Start => "start_camera",
            Self::Stop => "stop_camera",
            Self::Restart => "restart_camera",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Start => "starting",
            Self::Stop => "stopping",
            Self::Restart => "restarting",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let mut base = Url::parse(base_url)?;
        // Url::join drops the last path segment unless the base ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(concat!("gesturedeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn endpoint(&self, path: &str) -> BackendResult<Url> {
        Ok(self.base.join(path)?)
    }

    /// URL of the MJPEG stream; only displayed, never decoded.
    pub fn video_feed_url(&self) -> String {
        self.endpoint("video_feed")
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}video_feed", self.base))
    }

    pub async fn login(&self, email: &str, password: &str) -> BackendResult<CommandResponse> {
        self.post_credentials("login", email, password).await
    }

    pub async fn register(&self, email: &str, password: &str) -> BackendResult<CommandResponse> {
        self.post_credentials("register", email, password).await
    }

    pub async fn logout(&self) -> BackendResult<CommandResponse> {
        let resp = self.http.post(self.endpoint("logout")?).send().await?;
        decode(resp).await
    }

    pub async fn check_auth(&self) -> BackendResult<AuthStatus> {
        self.get_json("check_auth").await
    }

    pub async fn camera_status(&self) -> BackendResult<CameraStatus> {
        self.get_json("camera_status").await
    }

    pub async fn camera_command(&self, command: CameraCommand) -> BackendResult<CommandResponse> {
        let resp = self.http.post(self.endpoint(command.path())?).send().await?;
        decode(resp).await
    }

    pub async fn gesture(&self) -> BackendResult<GestureResponse> {
        self.get_json("get_gesture").await
    }

    pub async fn hand_position(&self) -> BackendResult<HandPosition> {
        self.get_json("get_hand_position").await
    }

    pub async fn update_settings(&self, update: &SettingsUpdate) -> BackendResult<CommandResponse> {
        let resp = self
            .http
            .post(self.endpoint("update_settings")?)
            .json(update)
            .send()
            .await?;
        decode(resp).await
    }

    async fn post_credentials(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> BackendResult<CommandResponse> {
        let resp = self
            .http
            .post(self.endpoint(path)?)
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;
        decode(resp).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let resp = self.http.get(self.endpoint(path)?).send().await?;
        decode(resp).await
    }
}

/// Decode a JSON body, turning non-2xx statuses into [`BackendError::Http`].
///
/// Error bodies of the form `{message}` or `{error}` keep their text.
async fn decode<T: DeserializeOwned>(resp: Response) -> BackendResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<CommandResponse>()
            .await
            .ok()
            .and_then(|body| body.reason().map(str::to_string));
        return Err(BackendError::Http {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp.json::<T>().await?)
}
