//! Engine settings, as named fields.

use std::time::Duration;

use crate::monitor::MonitorSettings;
use crate::reference::ReferenceMode;
use crate::tone::ToneParameters;

pub const DEFAULT_DURATION_MS: u32 = 40;
pub const DEFAULT_TOLERANCE: i32 = 20;
pub const DEFAULT_TIMEOUT_SECS: f64 = 2.0;
pub const DEFAULT_MIN_PITCH: f64 = 220.0;
pub const DEFAULT_MAX_PITCH: f64 = 880.0;
pub const DEFAULT_MONITOR_PERIOD_MS: u32 = 200;
pub const MAX_DURATION_MS: u32 = 10_000;
pub const MAX_TIMEOUT_SECS: f64 = 3600.0;
const MIN_VOLUME: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Play tones on focus and caret events.
    pub active: bool,
    /// Base tone duration; individual tones add a fixed amount on top.
    pub duration_ms: u32,
    pub left_volume: f64,
    pub right_volume: f64,
    pub stereo_swap: bool,
    /// Mouse arrival tolerance in pixels (Manhattan distance).
    pub tolerance: i32,
    /// Stop monitoring after the mouse has been still this long.
    pub timeout_secs: f64,
    /// Use the caret instead of the object centroid for editable fields.
    pub caret: bool,
    pub min_pitch: f64,
    pub max_pitch: f64,
    pub reference: ReferenceMode,
    pub monitor_period_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            active: true,
            duration_ms: DEFAULT_DURATION_MS,
            left_volume: 1.0,
            right_volume: 1.0,
            stereo_swap: false,
            tolerance: DEFAULT_TOLERANCE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            caret: true,
            min_pitch: DEFAULT_MIN_PITCH,
            max_pitch: DEFAULT_MAX_PITCH,
            reference: ReferenceMode::default(),
            monitor_period_ms: DEFAULT_MONITOR_PERIOD_MS,
        }
    }
}

impl Settings {
    /// Replace out-of-range values with usable ones. Non-positive durations,
    /// tolerances and timeouts fall back to their defaults; oversized
    /// durations and timeouts are capped.
    pub fn sanitized(mut self) -> Self {
        if self.duration_ms == 0 {
            log::warn!("Tone duration must be positive, using {}ms", DEFAULT_DURATION_MS);
            self.duration_ms = DEFAULT_DURATION_MS;
        } else if self.duration_ms > MAX_DURATION_MS {
            log::warn!("Tone duration {}ms is too long, using {}ms", self.duration_ms, MAX_DURATION_MS);
            self.duration_ms = MAX_DURATION_MS;
        }
        if self.tolerance <= 0 {
            log::warn!("Tolerance must be positive, using {}px", DEFAULT_TOLERANCE);
            self.tolerance = DEFAULT_TOLERANCE;
        }
        if !(self.timeout_secs > 0.0) || !self.timeout_secs.is_finite() {
            log::warn!("Monitor timeout must be positive, using {}s", DEFAULT_TIMEOUT_SECS);
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        } else if self.timeout_secs > MAX_TIMEOUT_SECS {
            log::warn!("Monitor timeout {}s is too long, using {}s", self.timeout_secs, MAX_TIMEOUT_SECS);
            self.timeout_secs = MAX_TIMEOUT_SECS;
        }
        if self.monitor_period_ms == 0 {
            self.monitor_period_ms = DEFAULT_MONITOR_PERIOD_MS;
        }
        self.left_volume = clamp_volume(self.left_volume);
        self.right_volume = clamp_volume(self.right_volume);
        if !(self.min_pitch > 0.0 && self.min_pitch < self.max_pitch && self.max_pitch.is_finite()) {
            log::warn!(
                "Pitch range {}..{} is invalid, using {}..{}",
                self.min_pitch,
                self.max_pitch,
                DEFAULT_MIN_PITCH,
                DEFAULT_MAX_PITCH
            );
            self.min_pitch = DEFAULT_MIN_PITCH;
            self.max_pitch = DEFAULT_MAX_PITCH;
        }
        self
    }

    pub fn tone_parameters(&self) -> ToneParameters {
        ToneParameters {
            min_pitch: self.min_pitch,
            max_pitch: self.max_pitch,
            left_volume: self.left_volume,
            right_volume: self.right_volume,
            stereo_swap: self.stereo_swap,
        }
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            period: Duration::from_millis(u64::from(self.monitor_period_ms)),
            timeout: Duration::try_from_secs_f64(self.timeout_secs)
                .unwrap_or(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS)),
            tolerance: self.tolerance,
            duration_ms: self.duration_ms,
        }
    }
}

fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 1.0;
    }
    volume.clamp(MIN_VOLUME, 1.0)
}
