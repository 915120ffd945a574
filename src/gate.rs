//! Repeat suppression for positional tones.
//!
//! Several event sources can ask for the same point at once (a focus change
//! and the caret event that follows it). The gate drops a request for the
//! point that is still sounding from the previous request.

use std::time::{Duration, Instant};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayDecision {
    Play,
    Suppress,
}

#[derive(Debug, Clone, Copy)]
struct LastPlayed {
    point: Point,
    duration: Duration,
    at: Instant,
}

/// Owned per engine, so separate engines never share suppression state.
#[derive(Debug, Default)]
pub struct PlaybackGate {
    last: Option<LastPlayed>,
}

impl PlaybackGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a tone for `point` may play at `now`.
    ///
    /// Only the coordinates are compared: a different duration or volume for
    /// the same point is still suppressed while the earlier tone lasts. On
    /// `Play` the state is updated before the caller emits anything.
    pub fn attempt_play(&mut self, point: Point, duration_ms: u32, now: Instant) -> PlayDecision {
        if let Some(last) = self.last {
            if last.point == point && now.saturating_duration_since(last.at) <= last.duration {
                return PlayDecision::Suppress;
            }
        }

        self.last = Some(LastPlayed {
            point,
            duration: Duration::from_millis(u64::from(duration_ms)),
            at: now,
        });
        PlayDecision::Play
    }

    pub fn last_point(&self) -> Option<Point> {
        self.last.map(|l| l.point)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
