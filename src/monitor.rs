//! Real-time mouse to target proximity monitoring.
//!
//! The monitor is a two-state machine (`Stopped`, `Running`) driven by a
//! periodic tick and by raw mouse movement. It owns no timers and talks to no
//! host: every transition returns the list of `MonitorAction`s the engine has
//! to carry out, in order.
//!
//! Per tick: sample mouse and target, stop on failure or when the mouse has
//! been still for `timeout`, play the mouse tone now and the companion tone
//! `duration + 100` ms later, then run the proximity check. Per movement
//! sample only the proximity check runs, so arrival and boundary crossings
//! are not throttled to the tick rate.

use std::time::{Duration, Instant};

use crate::geometry::{Point, Rect};
use crate::notification::Notification;

/// Extra milliseconds added to the base duration, per tone kind.
pub const MOUSE_TONE_EXTRA_MS: u32 = 40;
pub const COMPANION_TONE_EXTRA_MS: u32 = 70;
pub const COMPANION_DELAY_EXTRA_MS: u32 = 100;
pub const ARRIVAL_TONE_EXTRA_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorSettings {
    pub period: Duration,
    /// Stillness timeout.
    pub timeout: Duration,
    /// Manhattan distance counted as arrived.
    pub tolerance: i32,
    /// Base tone duration.
    pub duration_ms: u32,
}

impl MonitorSettings {
    pub fn arrival_duration_ms(&self) -> u32 {
        self.duration_ms.saturating_add(ARRIVAL_TONE_EXTRA_MS)
    }
}

/// Positions sampled from the host for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSample {
    pub mouse: Point,
    pub target: Point,
    pub target_bounds: Rect,
    /// Resolved companion point for the configured reference mode, if any.
    pub companion: Option<Point>,
}

/// Target geometry sampled for one movement event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSample {
    pub target: Point,
    pub target_bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorAction {
    Play { point: Point, duration_ms: u32 },
    PlayLater { point: Point, delay: Duration, duration_ms: u32 },
    Notify(Notification),
    CancelSpeech,
    StartTicking(Duration),
    /// Cancel the tick and every companion tone still queued.
    StopTicking,
}

/// How a running session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// User toggled monitoring off.
    Cancelled,
    /// Another command took over (on-demand tones, feature off, shutdown).
    Silent,
    LocationUnavailable,
    Idle,
    Arrived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub last_mouse: Option<Point>,
    pub last_moved_at: Instant,
    pub entered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorState {
    #[default]
    Stopped,
    Running(Session),
}

#[derive(Debug, Default)]
pub struct ProximityMonitor {
    state: MonitorState,
}

impl ProximityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, MonitorState::Running(_))
    }

    /// Begin monitoring. If the mouse is already within tolerance of the
    /// target the arrival tone plays once and the monitor stays stopped.
    pub fn start(&mut self, now: Instant, mouse: Point, target: Point, settings: &MonitorSettings) -> Vec<MonitorAction> {
        if self.is_running() {
            return Vec::new();
        }

        if within_tolerance(mouse, target, settings) {
            log::debug!("Mouse {} already within {}px of {}", mouse, settings.tolerance, target);
            return vec![
                MonitorAction::Play { point: target, duration_ms: settings.arrival_duration_ms() },
                MonitorAction::Notify(Notification::AlreadyThere),
            ];
        }

        log::info!("Mouse monitoring started (target {}, period {:?})", target, settings.period);
        self.state = MonitorState::Running(Session {
            last_mouse: None,
            last_moved_at: now,
            entered: false,
        });
        vec![MonitorAction::StartTicking(settings.period)]
    }

    /// Leave `Running` for `reason`. Does nothing when already stopped.
    pub fn stop(&mut self, reason: StopReason) -> Vec<MonitorAction> {
        if !self.is_running() {
            return Vec::new();
        }
        self.state = MonitorState::Stopped;
        log::info!("Mouse monitoring stopped ({:?})", reason);

        let mut actions = vec![MonitorAction::StopTicking];
        match reason {
            StopReason::Cancelled => {
                actions.push(MonitorAction::CancelSpeech);
                actions.push(MonitorAction::Notify(Notification::MonitoringCancelled));
            }
            StopReason::LocationUnavailable => {
                actions.push(MonitorAction::Notify(Notification::LocationUnavailable));
            }
            StopReason::Idle => {
                actions.push(MonitorAction::Notify(Notification::MonitoringAutoStopped));
            }
            StopReason::Arrived => {
                actions.push(MonitorAction::CancelSpeech);
                actions.push(MonitorAction::Notify(Notification::LocationReached));
            }
            StopReason::Silent => {}
        }
        actions
    }

    /// One periodic tick. `sample` is `None` when the host could not
    /// resolve the mouse or the target.
    pub fn tick(&mut self, now: Instant, sample: Option<TickSample>, settings: &MonitorSettings) -> Vec<MonitorAction> {
        let MonitorState::Running(session) = &mut self.state else {
            return Vec::new();
        };

        let Some(sample) = sample else {
            log::warn!("Monitored location became unavailable");
            return self.stop(StopReason::LocationUnavailable);
        };

        if session.last_mouse == Some(sample.mouse) {
            if now.saturating_duration_since(session.last_moved_at) >= settings.timeout {
                return self.stop(StopReason::Idle);
            }
        } else {
            session.last_mouse = Some(sample.mouse);
            session.last_moved_at = now;
        }

        let mut actions = vec![MonitorAction::Play {
            point: sample.mouse,
            duration_ms: settings.duration_ms.saturating_add(MOUSE_TONE_EXTRA_MS),
        }];
        if let Some(companion) = sample.companion {
            actions.push(MonitorAction::PlayLater {
                point: companion,
                delay: Duration::from_millis(u64::from(settings.duration_ms) + u64::from(COMPANION_DELAY_EXTRA_MS)),
                duration_ms: settings.duration_ms.saturating_add(COMPANION_TONE_EXTRA_MS),
            });
        }

        actions.extend(self.check_proximity(sample.mouse, sample.target, sample.target_bounds, settings));
        actions
    }

    /// A raw mouse movement. `target` is `None` when the host could not
    /// resolve the target.
    pub fn moved(&mut self, mouse: Point, target: Option<TargetSample>, settings: &MonitorSettings) -> Vec<MonitorAction> {
        if !self.is_running() {
            return Vec::new();
        }
        let Some(target) = target else {
            log::warn!("Target location became unavailable during monitoring");
            return self.stop(StopReason::LocationUnavailable);
        };
        self.check_proximity(mouse, target.target, target.target_bounds, settings)
    }

    /// Edge-triggered enter/exit reporting, then the arrival check.
    fn check_proximity(&mut self, mouse: Point, target: Point, bounds: Rect, settings: &MonitorSettings) -> Vec<MonitorAction> {
        let MonitorState::Running(session) = &mut self.state else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        let inside = bounds.contains(mouse);
        if inside != session.entered {
            session.entered = inside;
            let edge = if inside { Notification::Entering } else { Notification::Exiting };
            log::debug!("{} at {}", edge, mouse);
            actions.push(MonitorAction::CancelSpeech);
            actions.push(MonitorAction::Notify(edge));
        }

        if within_tolerance(mouse, target, settings) {
            actions.push(MonitorAction::Play { point: target, duration_ms: settings.arrival_duration_ms() });
            actions.extend(self.stop(StopReason::Arrived));
        }
        actions
    }
}

fn within_tolerance(mouse: Point, target: Point, settings: &MonitorSettings) -> bool {
    u64::try_from(settings.tolerance).is_ok_and(|tolerance| mouse.manhattan(target) <= tolerance)
}
