//! Positional audio feedback for screen locations.
//!
//! Screen points become short stereo tones whose pitch follows the vertical
//! position and whose balance follows the horizontal one. The [`Engine`]
//! ties the tone mapping, playback gate, proximity monitor and outline player
//! to a [`Host`] that supplies geometry and renders output.

pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod generator;
pub mod geometry;
pub mod host;
pub mod monitor;
pub mod notification;
pub mod reference;
pub mod scheduler;
pub mod sequence;
pub mod settings;
pub mod sim;
pub mod tone;

pub use engine::Engine;
pub use error::LocationError;
pub use geometry::{Point, Rect, ScreenBounds};
pub use host::Host;
pub use notification::Notification;
pub use scheduler::{Scheduler, Task, TimerQueue};
pub use settings::Settings;
pub use tone::{map_to_tone, ToneSpec};
