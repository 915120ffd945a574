//! Ordered multi-point playback used for outlines.
//!
//! Point `i` fires at `sum(duration_k + delay for k < i)`; the first one is
//! scheduled with no delay. The returned total includes one trailing
//! `duration + delay` step so callers can chain work after the last tone.

use std::time::Duration;

use crate::geometry::Point;
use crate::scheduler::{Scheduler, Task, TimerHandle};

/// Milliseconds between the end of one outline tone and the start of the next.
pub const OUTLINE_DELAY_MS: u32 = 200;

/// How long a parent outline request waits for repeated requests.
pub const PARENT_OUTLINE_WAIT_MS: u32 = 500;

/// An outline to play: the four corners, then optionally one extra point
/// (the caret) with its own, longer duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRequest {
    pub corners: [Point; 4],
    pub trailing: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    pub corner_duration_ms: u32,
    pub trailing_duration_ms: u32,
    pub delay_ms: u32,
}

/// Fire offsets for each point and the total, without scheduling anything.
pub fn sequence_offsets(count: usize, delay_ms: u32, duration_ms: u32) -> (Vec<u32>, u32) {
    let step = duration_ms + delay_ms;
    let offsets: Vec<u32> = (0..count as u32).map(|i| i * step).collect();
    (offsets, count as u32 * step)
}

/// Outline playback with its busy flag and the timers it still owns.
///
/// While busy, new outline requests are ignored instead of interleaving
/// with the one in flight.
#[derive(Debug, Default)]
pub struct SequencePlayer {
    busy: bool,
    handles: Vec<TimerHandle>,
    /// Extra ancestor levels requested while a parent outline is waiting.
    parent_repeats: Option<u32>,
}

impl SequencePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Schedule `points` and return the total duration in milliseconds.
    pub fn play_sequence<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        points: &[Point],
        delay_ms: u32,
        duration_ms: u32,
    ) -> u32 {
        let (offsets, total) = sequence_offsets(points.len(), delay_ms, duration_ms);
        for (&point, offset) in points.iter().zip(offsets) {
            let handle = scheduler.schedule_once(
                Duration::from_millis(u64::from(offset)),
                Task::PlayPoint { point, duration_ms },
            );
            self.handles.push(handle);
        }
        log::debug!("Scheduled {} points over {}ms", points.len(), total);
        total
    }

    /// Play a full outline and keep the player busy until it has finished.
    /// Returns `None` when another outline is still playing.
    pub fn play_outline<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        request: &OutlineRequest,
        options: OutlineOptions,
    ) -> Option<u32> {
        if self.busy {
            log::debug!("Outline already playing, request ignored");
            return None;
        }
        self.busy = true;
        Some(self.schedule_outline(scheduler, request, options))
    }

    /// Reserve the player for a parent outline and start the repeat window.
    /// Repeated calls during the window only deepen the request.
    pub fn request_parent<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(repeats) = self.parent_repeats.as_mut() {
            *repeats += 1;
            log::debug!("Parent outline depth raised to {}", *repeats + 1);
            return;
        }
        if self.busy {
            log::debug!("Outline already playing, parent request ignored");
            return;
        }
        self.busy = true;
        self.parent_repeats = Some(0);
        let handle = scheduler.schedule_once(
            Duration::from_millis(u64::from(PARENT_OUTLINE_WAIT_MS)),
            Task::ResolveParentOutline,
        );
        self.handles.push(handle);
    }

    /// Close the repeat window, returning how many ancestor levels to climb.
    pub fn take_parent_depth(&mut self) -> Option<u32> {
        self.parent_repeats.take().map(|repeats| repeats + 1)
    }

    /// Play the outline of a resolved parent. The player is already busy.
    pub fn play_parent_outline<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        request: &OutlineRequest,
        options: OutlineOptions,
    ) -> u32 {
        self.busy = true;
        self.schedule_outline(scheduler, request, options)
    }

    /// Mark the current outline as done.
    pub fn finish(&mut self) {
        self.busy = false;
        self.parent_repeats = None;
        self.handles.clear();
    }

    /// Cancel every queued tone and free the player.
    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if !self.handles.is_empty() {
            log::debug!("Cancelling {} queued outline timers", self.handles.len());
        }
        for handle in self.handles.drain(..) {
            scheduler.cancel(handle);
        }
        self.busy = false;
        self.parent_repeats = None;
    }

    fn schedule_outline<S: Scheduler>(
        &mut self,
        scheduler: &mut S,
        request: &OutlineRequest,
        options: OutlineOptions,
    ) -> u32 {
        let mut total = self.play_sequence(scheduler, &request.corners, options.delay_ms, options.corner_duration_ms);
        if let Some(point) = request.trailing {
            let handle = scheduler.schedule_once(
                Duration::from_millis(u64::from(total)),
                Task::PlayPoint { point, duration_ms: options.trailing_duration_ms },
            );
            self.handles.push(handle);
            total += options.trailing_duration_ms;
        }
        let handle = scheduler.schedule_once(Duration::from_millis(u64::from(total)), Task::OutlineFinished);
        self.handles.push(handle);
        total
    }
}
