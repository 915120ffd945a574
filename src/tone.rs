//! Coordinate to tone mapping: pitch follows height, stereo balance follows width.

use crate::geometry::{Point, ScreenBounds};

/// Full-scale channel level before the per-channel volume factor is applied.
pub const MAX_LEVEL: f64 = 85.0;

/// Acoustic parameters for one mapping call. Built from settings per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParameters {
    pub min_pitch: f64,
    pub max_pitch: f64,
    /// Left speaker volume factor in [0, 1].
    pub left_volume: f64,
    /// Right speaker volume factor in [0, 1].
    pub right_volume: f64,
    pub stereo_swap: bool,
}

/// A tone ready to hand to the host's synthesizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency: f64,
    pub duration_ms: u32,
    pub left: i32,
    pub right: i32,
}

/// Map a screen point to a tone, or `None` when the point is off screen.
///
/// `bounds` must be the desktop size at call time. Top edge maps to
/// `max_pitch`, bottom edge to `min_pitch`. The left channel level is
/// proportional to `width - x` and the right one to `x`; with `stereo_swap`
/// the two proportions trade physical channels before truncation.
pub fn map_to_tone(point: Point, bounds: ScreenBounds, params: &ToneParameters, duration_ms: u32) -> Option<ToneSpec> {
    if !bounds.contains(point) {
        return None;
    }

    let width = f64::from(bounds.width);
    let height = f64::from(bounds.height);
    let x = f64::from(point.x);
    let y = f64::from(point.y);

    let frequency = params.min_pitch + (params.max_pitch - params.min_pitch) * ((height - y) / height);

    let towards_left = MAX_LEVEL * ((width - x) / width);
    let towards_right = MAX_LEVEL * (x / width);
    let (left, right) = if params.stereo_swap {
        (towards_right * params.left_volume, towards_left * params.right_volume)
    } else {
        (towards_left * params.left_volume, towards_right * params.right_volume)
    };

    Some(ToneSpec {
        frequency,
        duration_ms,
        left: left as i32,
        right: right as i32,
    })
}
