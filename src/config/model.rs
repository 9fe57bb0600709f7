//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub whiteboard: WhiteboardConfig,
    #[serde(default)]
    pub games: GamesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            polling: PollingConfig::default(),
            camera: CameraConfig::default(),
            whiteboard: WhiteboardConfig::default(),
            games: GamesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Where the gesture recognition server lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Poll periods in milliseconds.
///
/// `gesture_ms` is also the minimum spacing enforced between any two gesture
/// requests. It is independent of the user's sensitivity setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_status_ms")]
    pub status_ms: u64,
    #[serde(default = "default_gesture_ms")]
    pub gesture_ms: u64,
    #[serde(default = "default_drawing_ms")]
    pub drawing_ms: u64,
    #[serde(default = "default_aim_ms")]
    pub aim_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            status_ms: default_status_ms(),
            gesture_ms: default_gesture_ms(),
            drawing_ms: default_drawing_ms(),
            aim_ms: default_aim_ms(),
        }
    }
}

impl PollingConfig {
    pub fn status(&self) -> Duration {
        Duration::from_millis(self.status_ms.max(1))
    }

    pub fn gesture(&self) -> Duration {
        Duration::from_millis(self.gesture_ms.max(1))
    }

    pub fn drawing(&self) -> Duration {
        Duration::from_millis(self.drawing_ms.max(1))
    }

    pub fn aim(&self) -> Duration {
        Duration::from_millis(self.aim_ms.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// How many status checks may report "initializing" before the client
    /// gives up and records a timeout.
    #[serde(default = "default_init_timeout_polls")]
    pub init_timeout_polls: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            init_timeout_polls: default_init_timeout_polls(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhiteboardConfig {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    #[serde(default = "default_pen_color")]
    pub default_color: String,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            cell_size: default_cell_size(),
            default_color: default_pen_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamesConfig {
    #[serde(default = "default_court_width")]
    pub court_width: f64,
    /// Maximum ball/hoop horizontal offset (court pixels) that still scores.
    #[serde(default = "default_hoop_threshold")]
    pub hoop_threshold: f64,
    #[serde(default = "default_reveal_delay_ms")]
    pub rps_reveal_delay_ms: u64,
    #[serde(default = "default_shot_duration_ms")]
    pub shot_duration_ms: u64,
    #[serde(default = "default_ball_reset_ms")]
    pub ball_reset_ms: u64,
    #[serde(default = "default_spell_fade_ms")]
    pub spell_fade_ms: u64,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            court_width: default_court_width(),
            hoop_threshold: default_hoop_threshold(),
            rps_reveal_delay_ms: default_reveal_delay_ms(),
            shot_duration_ms: default_shot_duration_ms(),
            ball_reset_ms: default_ball_reset_ms(),
            spell_fade_ms: default_spell_fade_ms(),
        }
    }
}

/// Diagnostic logging. The terminal belongs to the UI, so logs go to a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/".to_string()
}
fn default_request_timeout_ms() -> u64 {
    5000
}
fn default_status_ms() -> u64 {
    1000
}
fn default_gesture_ms() -> u64 {
    350 // medium sensitivity
}
fn default_drawing_ms() -> u64 {
    50
}
fn default_aim_ms() -> u64 {
    100
}
fn default_init_timeout_polls() -> u32 {
    30
}
fn default_canvas_width() -> f64 {
    800.0
}
fn default_canvas_height() -> f64 {
    600.0
}
fn default_cell_size() -> f64 {
    5.0
}
fn default_pen_color() -> String {
    "#ffffff".to_string()
}
fn default_court_width() -> f64 {
    400.0
}
fn default_hoop_threshold() -> f64 {
    50.0
}
fn default_reveal_delay_ms() -> u64 {
    300
}
fn default_shot_duration_ms() -> u64 {
    1000
}
fn default_ball_reset_ms() -> u64 {
    500
}
fn default_spell_fade_ms() -> u64 {
    1100
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/gesturedeck/logs".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.polling.gesture_ms, 350);
        assert_eq!(cfg.polling.status(), Duration::from_secs(1));
        assert_eq!(cfg.games.hoop_threshold, 50.0);
        assert_eq!(cfg.camera.init_timeout_polls, 30);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [backend]
            base_url = "http://gestures.local:8080/"

            [polling]
            drawing_ms = 80
            "#,
        )
        .unwrap();
        assert_eq!(cfg.backend.base_url, "http://gestures.local:8080/");
        assert_eq!(cfg.backend.request_timeout_ms, 5000);
        assert_eq!(cfg.polling.drawing(), Duration::from_millis(80));
        assert_eq!(cfg.polling.aim(), Duration::from_millis(100));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.whiteboard.default_color, cfg.whiteboard.default_color);
        assert_eq!(back.logging.log_dir, cfg.logging.log_dir);
    }
}
