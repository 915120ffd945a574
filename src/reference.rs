//! Companion point for the second tone of each monitor tick.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// What the mouse position is compared against, acoustically, on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceMode {
    /// The focused object (or caret) position.
    #[default]
    Focus,
    /// Top-left corner of the application's root window.
    WindowTopLeft,
    /// Center of the application's root window.
    WindowCenter,
    /// Screen origin (0, 0).
    ScreenTopLeft,
    /// Center of the desktop.
    ScreenCenter,
    /// No companion tone.
    None,
}

impl fmt::Display for ReferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceMode::Focus => write!(f, "focus"),
            ReferenceMode::WindowTopLeft => write!(f, "window-top-left"),
            ReferenceMode::WindowCenter => write!(f, "window-center"),
            ReferenceMode::ScreenTopLeft => write!(f, "screen-top-left"),
            ReferenceMode::ScreenCenter => write!(f, "screen-center"),
            ReferenceMode::None => write!(f, "none"),
        }
    }
}

impl FromStr for ReferenceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "focus" | "object" => Ok(ReferenceMode::Focus),
            "window-top-left" | "windowtopleft" | "window_top_left" => Ok(ReferenceMode::WindowTopLeft),
            "window-center" | "windowcenter" | "window_center" => Ok(ReferenceMode::WindowCenter),
            "screen-top-left" | "screentopleft" | "screen_top_left" => Ok(ReferenceMode::ScreenTopLeft),
            "screen-center" | "screencenter" | "screen_center" => Ok(ReferenceMode::ScreenCenter),
            "none" => Ok(ReferenceMode::None),
            _ => Err(format!(
                "Invalid reference mode '{}'. Valid values: focus, window-top-left, window-center, screen-top-left, screen-center, none",
                s
            )),
        }
    }
}
