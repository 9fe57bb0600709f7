//! Wire types for the backend's JSON contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gesture labels produced by the backend classifier.
///
/// Labels outside the fixed vocabulary are folded into [`Gesture::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    OneFingerUp,
    TwoFingersUp,
    ThreeFingersUp,
    ThumbsUp,
    Fist,
    OpenPalm,
    #[default]
    #[serde(other)]
    Unknown,
}

/// What a gesture means before a screen gives it a concrete binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRole {
    Draw,
    Erase,
    Recolor,
    Select,
    Back,
    Clear,
    Nothing,
}

impl Gesture {
    pub const ALL: [Gesture; 7] = [
        Gesture::OneFingerUp,
        Gesture::TwoFingersUp,
        Gesture::ThreeFingersUp,
        Gesture::ThumbsUp,
        Gesture::Fist,
        Gesture::OpenPalm,
        Gesture::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneFingerUp => "one_finger_up",
            Self::TwoFingersUp => "two_fingers_up",
            Self::ThreeFingersUp => "three_fingers_up",
            Self::ThumbsUp => "thumbs_up",
            Self::Fist => "fist",
            Self::OpenPalm => "open_palm",
            Self::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OneFingerUp => "One Finger Up",
            Self::TwoFingersUp => "Two Fingers Up",
            Self::ThreeFingersUp => "Three Fingers Up",
            Self::ThumbsUp => "Thumbs Up",
            Self::Fist => "Fist",
            Self::OpenPalm => "Open Palm",
            Self::Unknown => "None",
        }
    }

    pub fn role(&self) -> GestureRole {
        match self {
            Self::OneFingerUp => GestureRole::Draw,
            Self::TwoFingersUp => GestureRole::Erase,
            Self::ThreeFingersUp => GestureRole::Recolor,
            Self::ThumbsUp => GestureRole::Select,
            Self::Fist => GestureRole::Back,
            Self::OpenPalm => GestureRole::Clear,
            Self::Unknown => GestureRole::Nothing,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GestureResponse {
    #[serde(default)]
    pub gesture: Gesture,
}

/// Hand position normalized to [0, 1] on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct HandPosition {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub visible: bool,
}

impl HandPosition {
    /// Scale into a box of the given size, clamping stray values to its edges.
    pub fn scale_to(&self, width: f64, height: f64) -> (f64, f64) {
        (
            self.x.clamp(0.0, 1.0) * width,
            self.y.clamp(0.0, 1.0) * height,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CameraStatus {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub requested: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub initializing: bool,
}

/// Generic `{success, message?, error?}` reply of the command endpoints.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CommandResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CommandResponse {
    /// Server-provided explanation, preferring `error` over `message`.
    pub fn reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsUpdate {
    pub sensitivity: u8,
    pub theme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_labels_deserialize() {
        for g in Gesture::ALL {
            let json = format!("{{\"gesture\":\"{}\"}}", g.label());
            let resp: GestureResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(resp.gesture, g);
        }
    }

    #[test]
    fn test_unrecognized_label_is_unknown() {
        let resp: GestureResponse = serde_json::from_str(r#"{"gesture":"peace_sign"}"#).unwrap();
        assert_eq!(resp.gesture, Gesture::Unknown);
        let resp: GestureResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.gesture, Gesture::Unknown);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let resp: GestureResponse = serde_json::from_str(r#"{"gesture":"Fist"}"#).unwrap();
        assert_eq!(resp.gesture, Gesture::Unknown);
    }

    #[test]
    fn test_camera_status_tolerates_null_error() {
        let status: CameraStatus = serde_json::from_str(
            r#"{"active":true,"requested":true,"error":null,"initializing":false}"#,
        )
        .unwrap();
        assert!(status.active);
        assert_eq!(status.error, None);
    }

    #[test]
    fn test_hand_position_scaling_clamps() {
        let pos = HandPosition { x: 1.2, y: 0.5, visible: true };
        assert_eq!(pos.scale_to(200.0, 100.0), (200.0, 50.0));
    }

    #[test]
    fn test_command_reason_prefers_error() {
        let resp = CommandResponse {
            success: false,
            message: Some("msg".into()),
            error: Some("err".into()),
        };
        assert_eq!(resp.reason(), Some("err"));
    }
}
