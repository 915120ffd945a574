//! A scripted host: fixed geometry set by the caller, and a log of every
//! tone, message and speech cancellation the engine produces.

use std::time::{Duration, Instant};

use crate::engine::Engine;
use crate::error::LocationError;
use crate::geometry::{Point, Rect, ScreenBounds};
use crate::host::Host;
use crate::notification::Notification;
use crate::scheduler::{Scheduler, TimerQueue};
use crate::tone::ToneSpec;

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Tone(ToneSpec),
    Notify(Notification),
    SpeechCancelled,
}

#[derive(Debug, Clone)]
pub struct SimulatedHost {
    pub desktop: ScreenBounds,
    pub mouse: Option<Point>,
    /// Bounding box of the focused object; `None` means nothing has geometry.
    pub focus: Option<Rect>,
    pub caret: Option<Point>,
    pub window: Option<Rect>,
    /// Parent first, then grandparent, and so on.
    pub ancestors: Vec<Rect>,
    events: Vec<HostEvent>,
    seen: usize,
}

impl SimulatedHost {
    pub fn new(desktop: ScreenBounds) -> Self {
        Self {
            desktop,
            mouse: None,
            focus: None,
            caret: None,
            window: None,
            ancestors: Vec::new(),
            events: Vec::new(),
            seen: 0,
        }
    }

    pub fn with_mouse(mut self, mouse: Point) -> Self {
        self.mouse = Some(mouse);
        self
    }

    pub fn with_focus(mut self, focus: Rect) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_caret(mut self, caret: Point) -> Self {
        self.caret = Some(caret);
        self
    }

    pub fn with_window(mut self, window: Rect) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_ancestors(mut self, ancestors: Vec<Rect>) -> Self {
        self.ancestors = ancestors;
        self
    }

    /// Everything recorded so far.
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Events recorded since the previous call.
    pub fn take_new_events(&mut self) -> Vec<HostEvent> {
        let new = self.events[self.seen..].to_vec();
        self.seen = self.events.len();
        new
    }

    pub fn tones(&self) -> Vec<ToneSpec> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Tone(tone) => Some(*tone),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Notify(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn speech_cancels(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, HostEvent::SpeechCancelled)).count()
    }
}

impl Host for SimulatedHost {
    fn reference_point(&mut self) -> Result<Point, LocationError> {
        self.mouse.ok_or(LocationError::Unavailable)
    }

    fn target_point(&mut self, use_caret: bool) -> Result<Point, LocationError> {
        let focus = self.focus.ok_or(LocationError::Unavailable)?;
        match self.caret {
            Some(caret) if use_caret => Ok(caret),
            _ => Ok(focus.center()),
        }
    }

    fn target_bounds(&mut self) -> Result<Rect, LocationError> {
        self.focus.ok_or(LocationError::Unavailable)
    }

    fn caret_point(&mut self) -> Result<Point, LocationError> {
        self.focus.ok_or(LocationError::Unavailable)?;
        self.caret.ok_or(LocationError::NotEditable)
    }

    fn ancestor_bounds(&mut self, levels: u32) -> Result<Option<(Rect, u32)>, LocationError> {
        self.focus.ok_or(LocationError::Unavailable)?;
        let climbed = (levels as usize).min(self.ancestors.len());
        if climbed == 0 {
            return Ok(None);
        }
        Ok(Some((self.ancestors[climbed - 1], climbed as u32)))
    }

    fn window_bounds(&mut self) -> Result<Rect, LocationError> {
        self.window.ok_or(LocationError::Unavailable)
    }

    fn desktop_bounds(&mut self) -> ScreenBounds {
        self.desktop
    }

    fn emit_tone(&mut self, tone: &ToneSpec) {
        self.events.push(HostEvent::Tone(*tone));
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push(HostEvent::Notify(notification));
    }

    fn cancel_pending_speech(&mut self) {
        self.events.push(HostEvent::SpeechCancelled);
    }
}

/// Run the engine's timers until none are left or `limit` past `start` is
/// reached, returning new host events tagged with their offset in ms.
pub fn run_until_idle(
    engine: &mut Engine<SimulatedHost, TimerQueue>,
    start: Instant,
    limit: Duration,
) -> Vec<(u64, HostEvent)> {
    let mut timeline = Vec::new();
    collect(engine, start, &mut timeline);

    while let Some(due) = engine.next_due() {
        if due.saturating_duration_since(start) > limit {
            log::warn!("Simulation stopped at {}ms with timers still pending", limit.as_millis());
            break;
        }
        engine.advance_to(due);
        collect(engine, start, &mut timeline);
    }
    timeline
}

/// Fire every timer due up to `until`, returning new host events tagged with
/// their offset from `start` in ms.
pub fn run_until(
    engine: &mut Engine<SimulatedHost, TimerQueue>,
    start: Instant,
    until: Instant,
) -> Vec<(u64, HostEvent)> {
    let mut timeline = Vec::new();
    collect(engine, start, &mut timeline);

    while let Some(due) = engine.next_due() {
        if due > until {
            break;
        }
        engine.advance_to(due);
        collect(engine, start, &mut timeline);
    }
    engine.advance_to(until);
    timeline
}

fn collect(engine: &mut Engine<SimulatedHost, TimerQueue>, start: Instant, timeline: &mut Vec<(u64, HostEvent)>) {
    let at = engine.scheduler().now().saturating_duration_since(start).as_millis() as u64;
    timeline.extend(engine.host_mut().take_new_events().into_iter().map(|e| (at, e)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> SimulatedHost {
        SimulatedHost::new(ScreenBounds::new(800, 600).unwrap()).with_focus(Rect::new(100, 100, 200, 50))
    }

    #[test]
    fn test_target_prefers_caret_when_asked() {
        let mut h = host().with_caret(Point::new(120, 110));
        assert_eq!(h.target_point(true), Ok(Point::new(120, 110)));
        assert_eq!(h.target_point(false), Ok(Point::new(200, 125)));
        assert_eq!(host().target_point(true), Ok(Point::new(200, 125)));
    }

    #[test]
    fn test_caret_requires_editable() {
        assert_eq!(host().caret_point(), Err(LocationError::NotEditable));
        let mut nothing = SimulatedHost::new(ScreenBounds::new(800, 600).unwrap());
        assert_eq!(nothing.caret_point(), Err(LocationError::Unavailable));
    }

    #[test]
    fn test_ancestor_climb_stops_at_root() {
        let parent = Rect::new(50, 50, 400, 300);
        let root = Rect::new(0, 0, 800, 600);
        let mut h = host().with_ancestors(vec![parent, root]);
        assert_eq!(h.ancestor_bounds(1), Ok(Some((parent, 1))));
        assert_eq!(h.ancestor_bounds(5), Ok(Some((root, 2))));
        assert_eq!(host().ancestor_bounds(1), Ok(None));
    }

    #[test]
    fn test_take_new_events_keeps_history() {
        let mut h = host();
        h.notify(Notification::Entering);
        assert_eq!(h.take_new_events().len(), 1);
        h.cancel_pending_speech();
        assert_eq!(h.take_new_events(), vec![HostEvent::SpeechCancelled]);
        assert_eq!(h.events().len(), 2);
    }
}
