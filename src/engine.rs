//! The positional audio engine: one instance per session.
//!
//! Owns the playback gate, the proximity monitor and the outline player, and
//! carries out their decisions against a `Host` and a `Scheduler`. All state
//! changes happen inside public calls or `dispatch`, so a single-threaded
//! event loop is all the synchronisation needed.

use std::time::{Duration, Instant};

use crate::error::LocationError;
use crate::gate::{PlayDecision, PlaybackGate};
use crate::geometry::Point;
use crate::host::Host;
use crate::monitor::{MonitorAction, ProximityMonitor, StopReason, TargetSample, TickSample};
use crate::notification::Notification;
use crate::reference::ReferenceMode;
use crate::scheduler::{Scheduler, Task, TimerHandle, TimerQueue};
use crate::sequence::{OutlineOptions, OutlineRequest, SequencePlayer, OUTLINE_DELAY_MS};
use crate::settings::Settings;
use crate::tone::{map_to_tone, ToneParameters, ToneSpec};

/// Extra milliseconds per on-demand and outline tone kind.
const LOCATE_TARGET_EXTRA_MS: u32 = 30;
const LOCATE_MOUSE_EXTRA_MS: u32 = 50;
const OUTLINE_CORNER_EXTRA_MS: u32 = 20;
const OUTLINE_CARET_EXTRA_MS: u32 = 150;

/// Keys that count as typing and silence caret tones.
const TYPING_KEYS: [&str; 5] = ["space", "tab", "delete", "backspace", "plus"];

pub struct Engine<H: Host, S: Scheduler> {
    host: H,
    scheduler: S,
    settings: Settings,
    gate: PlaybackGate,
    monitor: ProximityMonitor,
    outline: SequencePlayer,
    tick: Option<TimerHandle>,
    /// Delayed companion tones of the current monitor session, with due times.
    companions: Vec<(TimerHandle, Instant)>,
    /// Set by a focus change so the caret event that follows is skipped once.
    focusing: bool,
    typing: bool,
}

impl<H: Host, S: Scheduler> Engine<H, S> {
    pub fn new(host: H, scheduler: S, settings: Settings) -> Self {
        Self {
            host,
            scheduler,
            settings: settings.sanitized(),
            gate: PlaybackGate::new(),
            monitor: ProximityMonitor::new(),
            outline: SequencePlayer::new(),
            tick: None,
            companions: Vec::new(),
            focusing: true,
            typing: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// New settings apply from the next tone on. A running monitor keeps its
    /// tick period until restarted.
    pub fn set_settings(&mut self, settings: Settings) {
        let active = settings.active;
        self.settings = Settings { active: self.settings.active, ..settings.sanitized() };
        self.set_active(active);
    }

    pub fn is_active(&self) -> bool {
        self.settings.active
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitor.is_running()
    }

    pub fn is_outline_busy(&self) -> bool {
        self.outline.is_busy()
    }

    /// Map a point against the current desktop size.
    pub fn map_to_tone(&mut self, point: Point, params: &ToneParameters, duration_ms: u32) -> Option<ToneSpec> {
        let bounds = self.host.desktop_bounds();
        map_to_tone(point, bounds, params, duration_ms)
    }

    /// Play one point now, subject to the on-screen check and the gate.
    /// Returns whether a tone was emitted.
    pub fn play_point_on_demand(&mut self, point: Point, duration_ms: u32) -> bool {
        let params = self.settings.tone_parameters();
        let Some(tone) = self.map_to_tone(point, &params, duration_ms) else {
            log::debug!("Point {} is off screen, no tone", point);
            return false;
        };
        if self.gate.attempt_play(point, duration_ms, self.scheduler.now()) == PlayDecision::Suppress {
            log::debug!("Tone for {} still sounding, repeat suppressed", point);
            return false;
        }
        self.host.emit_tone(&tone);
        true
    }

    /// Run a task handed back by the scheduler.
    pub fn dispatch(&mut self, task: Task) {
        match task {
            Task::PlayPoint { point, duration_ms } => {
                self.play_point_on_demand(point, duration_ms);
            }
            Task::MonitorTick => self.monitor_tick(),
            Task::OutlineFinished => self.outline.finish(),
            Task::ResolveParentOutline => self.resolve_parent_outline(),
        }
    }

    // Host events

    /// The focused object changed.
    pub fn handle_focus(&mut self) {
        if !self.settings.active {
            return;
        }
        self.focusing = true;
        match self.host.target_point(self.settings.caret) {
            Ok(point) => {
                self.play_point_on_demand(point, self.settings.duration_ms);
            }
            Err(e) => log::debug!("No tone for focus change: {}", e),
        }
    }

    /// The caret moved.
    pub fn handle_caret(&mut self) {
        if !self.settings.active {
            return;
        }
        if self.focusing || self.typing {
            self.focusing = false;
            return;
        }
        match self.host.caret_point() {
            Ok(point) => {
                self.play_point_on_demand(point, self.settings.duration_ms);
            }
            Err(e) => log::debug!("No tone for caret movement: {}", e),
        }
    }

    /// A key was pressed. Printable keys and editing keys count as typing.
    pub fn handle_key(&mut self, name: &str) {
        if !self.settings.active {
            return;
        }
        self.typing = name.chars().count() == 1 || TYPING_KEYS.iter().any(|key| *key == name);
    }

    /// A raw mouse movement sample, checked immediately while monitoring.
    pub fn handle_mouse_move(&mut self, mouse: Point) {
        if !self.monitor.is_running() {
            return;
        }
        let target = self.sample_target();
        let actions = self.monitor.moved(mouse, target, &self.settings.monitor_settings());
        self.apply(actions);
    }

    // Commands

    pub fn locate_target(&mut self) {
        self.stop_monitor_silently();
        match self.host.target_point(self.settings.caret) {
            Ok(point) => {
                self.play_point_on_demand(point, self.settings.duration_ms.saturating_add(LOCATE_TARGET_EXTRA_MS));
            }
            Err(e) => self.location_unavailable(e),
        }
    }

    pub fn locate_reference(&mut self) {
        self.stop_monitor_silently();
        match self.host.reference_point() {
            Ok(point) => {
                self.play_point_on_demand(point, self.settings.duration_ms.saturating_add(LOCATE_MOUSE_EXTRA_MS));
            }
            Err(e) => self.location_unavailable(e),
        }
    }

    pub fn toggle_monitor(&mut self) {
        if self.monitor.is_running() {
            self.stop_monitor();
        } else {
            self.start_monitor();
        }
    }

    pub fn start_monitor(&mut self) {
        if self.monitor.is_running() {
            return;
        }
        let sample = self
            .host
            .target_point(self.settings.caret)
            .and_then(|target| Ok((target, self.host.reference_point()?)));
        let (target, mouse) = match sample {
            Ok(sample) => sample,
            Err(e) => return self.location_unavailable(e),
        };
        let now = self.scheduler.now();
        let actions = self.monitor.start(now, mouse, target, &self.settings.monitor_settings());
        self.apply(actions);
    }

    /// Explicit stop by the user.
    pub fn stop_monitor(&mut self) {
        let actions = self.monitor.stop(StopReason::Cancelled);
        self.apply(actions);
    }

    /// Outline the focused object, ending on the caret when there is one.
    /// Returns the outline's total duration, or `None` if nothing was queued.
    pub fn outline_target(&mut self) -> Option<u32> {
        if self.outline.is_busy() {
            log::debug!("Outline already playing, request ignored");
            return None;
        }
        let bounds = match self.host.target_bounds() {
            Ok(bounds) => bounds,
            Err(e) => {
                self.location_unavailable(e);
                return None;
            }
        };
        let request = OutlineRequest {
            corners: bounds.corners(),
            trailing: self.host.caret_point().ok(),
        };
        self.play_outline(&request)
    }

    pub fn play_outline(&mut self, request: &OutlineRequest) -> Option<u32> {
        let options = self.outline_options();
        self.outline.play_outline(&mut self.scheduler, request, options)
    }

    /// Outline an ancestor of the focused object. Requests repeated within
    /// the wait window climb one level further each.
    pub fn request_parent_outline(&mut self) {
        self.outline.request_parent(&mut self.scheduler);
    }

    pub fn toggle_active(&mut self) {
        let active = !self.settings.active;
        self.set_active(active);
    }

    pub fn set_active(&mut self, active: bool) {
        if active == self.settings.active {
            return;
        }
        self.settings.active = active;
        if active {
            log::info!("Positional tones on");
            self.focusing = true;
            self.typing = false;
            self.host.notify(Notification::PositionalTonesOn);
        } else {
            log::info!("Positional tones off");
            self.stop_monitor_silently();
            self.outline.cancel(&mut self.scheduler);
            self.host.notify(Notification::PositionalTonesOff);
        }
    }

    /// Cancel every outstanding timer and go quiet. Only `set_active(true)`
    /// brings the engine back.
    pub fn shutdown(&mut self) {
        log::info!("Shutting down positional tones");
        self.stop_monitor_silently();
        self.outline.cancel(&mut self.scheduler);
        self.gate.reset();
        self.settings.active = false;
    }

    // Internals

    fn outline_options(&self) -> OutlineOptions {
        OutlineOptions {
            corner_duration_ms: self.settings.duration_ms.saturating_add(OUTLINE_CORNER_EXTRA_MS),
            trailing_duration_ms: self.settings.duration_ms.saturating_add(OUTLINE_CARET_EXTRA_MS),
            delay_ms: OUTLINE_DELAY_MS,
        }
    }

    fn resolve_parent_outline(&mut self) {
        let Some(depth) = self.outline.take_parent_depth() else {
            return;
        };
        match self.host.ancestor_bounds(depth) {
            Ok(Some((bounds, level))) if level > 0 => {
                log::debug!("Outlining ancestor {} of requested {}", level, depth);
                self.host.notify(Notification::Ancestor { level });
                let request = OutlineRequest { corners: bounds.corners(), trailing: None };
                let options = self.outline_options();
                self.outline.play_parent_outline(&mut self.scheduler, &request, options);
            }
            Ok(_) => {
                self.host.notify(Notification::ParentNotAvailable);
                self.outline.finish();
            }
            Err(e) => {
                self.location_unavailable(e);
                self.outline.finish();
            }
        }
    }

    fn monitor_tick(&mut self) {
        let sample = self.sample_tick();
        let now = self.scheduler.now();
        let actions = self.monitor.tick(now, sample, &self.settings.monitor_settings());
        self.apply(actions);
    }

    fn sample_tick(&mut self) -> Option<TickSample> {
        let mouse = self.host.reference_point().ok()?;
        let TargetSample { target, target_bounds } = self.sample_target()?;
        let companion = self.companion_point(target);
        Some(TickSample { mouse, target, target_bounds, companion })
    }

    fn sample_target(&mut self) -> Option<TargetSample> {
        let target = self.host.target_point(self.settings.caret).ok()?;
        let target_bounds = self.host.target_bounds().ok()?;
        Some(TargetSample { target, target_bounds })
    }

    fn companion_point(&mut self, target: Point) -> Option<Point> {
        match self.settings.reference {
            ReferenceMode::Focus => Some(target),
            ReferenceMode::WindowTopLeft => self.host.window_bounds().ok().map(|r| r.top_left()),
            ReferenceMode::WindowCenter => self.host.window_bounds().ok().map(|r| r.center()),
            ReferenceMode::ScreenTopLeft => Some(Point::new(0, 0)),
            ReferenceMode::ScreenCenter => Some(self.host.desktop_bounds().center()),
            ReferenceMode::None => None,
        }
    }

    fn stop_monitor_silently(&mut self) {
        let actions = self.monitor.stop(StopReason::Silent);
        self.apply(actions);
    }

    fn location_unavailable(&mut self, error: LocationError) {
        log::warn!("Location unavailable: {}", error);
        self.host.notify(Notification::LocationUnavailable);
    }

    fn apply(&mut self, actions: Vec<MonitorAction>) {
        for action in actions {
            match action {
                MonitorAction::Play { point, duration_ms } => {
                    self.play_point_on_demand(point, duration_ms);
                }
                MonitorAction::PlayLater { point, delay, duration_ms } => {
                    let now = self.scheduler.now();
                    self.companions.retain(|(_, due)| *due >= now);
                    let handle = self.scheduler.schedule_once(delay, Task::PlayPoint { point, duration_ms });
                    self.companions.push((handle, now + delay));
                }
                MonitorAction::Notify(notification) => self.host.notify(notification),
                MonitorAction::CancelSpeech => self.host.cancel_pending_speech(),
                MonitorAction::StartTicking(period) => {
                    if let Some(old) = self.tick.take() {
                        self.scheduler.cancel(old);
                    }
                    self.tick = Some(self.scheduler.schedule_repeating(period, Task::MonitorTick));
                }
                MonitorAction::StopTicking => {
                    if let Some(tick) = self.tick.take() {
                        self.scheduler.cancel(tick);
                    }
                    for (handle, _) in self.companions.drain(..) {
                        self.scheduler.cancel(handle);
                    }
                }
            }
        }
    }
}

impl<H: Host> Engine<H, TimerQueue> {
    /// Fire every task due up to `until`, each at its own due instant.
    pub fn advance_to(&mut self, until: Instant) {
        while let Some(due) = self.scheduler.next_due() {
            if due > until {
                break;
            }
            self.scheduler.set_now(due);
            while let Some(task) = self.scheduler.pop_due() {
                self.dispatch(task);
            }
        }
        self.scheduler.set_now(until);
    }

    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        self.advance_to(until);
    }

    pub fn next_due(&mut self) -> Option<Instant> {
        self.scheduler.next_due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, ScreenBounds};
    use crate::sim::{run_until_idle, HostEvent, SimulatedHost};

    const FOCUS: Rect = Rect::new(400, 450, 200, 100);

    fn host() -> SimulatedHost {
        SimulatedHost::new(ScreenBounds::new(1920, 1080).unwrap())
            .with_focus(FOCUS)
            .with_mouse(Point::new(100, 100))
    }

    fn engine(host: SimulatedHost) -> Engine<SimulatedHost, TimerQueue> {
        Engine::new(host, TimerQueue::new(Instant::now()), Settings::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn tone_offsets(events: &[(u64, HostEvent)]) -> Vec<(u64, u32)> {
        events
            .iter()
            .filter_map(|(at, e)| match e {
                HostEvent::Tone(tone) => Some((*at, tone.duration_ms)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_focus_tone_skips_following_caret_event() {
        let mut engine = engine(host().with_caret(Point::new(420, 470)));
        engine.handle_focus();
        engine.handle_caret();
        assert_eq!(engine.host().tones().len(), 1);

        engine.advance(ms(100));
        engine.handle_caret();
        assert_eq!(engine.host().tones().len(), 2);
    }

    #[test]
    fn test_duplicate_requests_are_gated() {
        let mut engine = engine(host());
        engine.handle_focus();
        engine.locate_target();
        assert_eq!(engine.host().tones().len(), 1);

        engine.advance(ms(41));
        engine.locate_target();
        assert_eq!(engine.host().tones().len(), 2);
        assert_eq!(engine.host().tones()[1].duration_ms, 70);
    }

    #[test]
    fn test_typing_silences_caret() {
        let mut engine = engine(host().with_caret(Point::new(420, 470)));
        engine.handle_caret(); // consumes the initial focusing flag
        engine.handle_key("a");
        engine.handle_caret();
        assert!(engine.host().tones().is_empty());

        engine.handle_key("downArrow");
        engine.handle_caret();
        assert_eq!(engine.host().tones().len(), 1);
    }

    #[test]
    fn test_inactive_engine_ignores_events() {
        let mut engine = engine(host());
        engine.set_active(false);
        engine.handle_focus();
        assert!(engine.host().tones().is_empty());
        assert_eq!(engine.host().notifications(), vec![Notification::PositionalTonesOff]);

        engine.toggle_active();
        engine.handle_focus();
        assert_eq!(engine.host().tones().len(), 1);
    }

    #[test]
    fn test_desktop_resize_is_seen_on_next_tone() {
        let mut engine = engine(SimulatedHost::new(ScreenBounds::new(1000, 1000).unwrap()));
        engine.play_point_on_demand(Point::new(500, 0), 40);
        engine.host_mut().desktop = ScreenBounds::new(1000, 500).unwrap();
        engine.play_point_on_demand(Point::new(500, 250), 40);
        assert!(!engine.play_point_on_demand(Point::new(500, 700), 40));

        let tones = engine.host().tones();
        assert!((tones[0].frequency - 880.0).abs() < 1e-9);
        assert!((tones[1].frequency - 550.0).abs() < 1e-9);
        assert_eq!(tones.len(), 2);
    }

    #[test]
    fn test_outline_timing_with_caret() {
        let mut engine = engine(host().with_caret(Point::new(450, 470)));
        let start = engine.scheduler().now();
        assert_eq!(engine.outline_target(), Some(1040 + 190));
        assert!(engine.is_outline_busy());
        assert_eq!(engine.outline_target(), None);

        let events = run_until_idle(&mut engine, start, ms(10_000));
        assert_eq!(
            tone_offsets(&events),
            vec![(0, 60), (260, 60), (520, 60), (780, 60), (1040, 190)]
        );
        assert!(!engine.is_outline_busy());
        assert!(engine.outline_target().is_some());
    }

    #[test]
    fn test_outline_without_focus_reports_unavailable() {
        let mut engine = engine(SimulatedHost::new(ScreenBounds::new(1920, 1080).unwrap()));
        assert_eq!(engine.outline_target(), None);
        assert_eq!(engine.host().notifications(), vec![Notification::LocationUnavailable]);
        assert!(!engine.is_outline_busy());
    }

    #[test]
    fn test_deactivation_cancels_queued_outline() {
        let mut engine = engine(host());
        let start = engine.scheduler().now();
        engine.outline_target();
        engine.advance(ms(300));
        assert_eq!(engine.host().tones().len(), 2);

        engine.set_active(false);
        assert!(engine.scheduler().is_idle());
        run_until_idle(&mut engine, start, ms(10_000));
        assert_eq!(engine.host().tones().len(), 2);
    }

    #[test]
    fn test_parent_outline_climbs_repeat_count() {
        let parent = Rect::new(300, 400, 400, 200);
        let grandparent = Rect::new(0, 0, 1920, 1040);
        let mut engine = engine(host().with_ancestors(vec![parent, grandparent]));
        let start = engine.scheduler().now();

        engine.request_parent_outline();
        engine.request_parent_outline();
        engine.request_parent_outline();
        let events = run_until_idle(&mut engine, start, ms(10_000));

        assert_eq!(engine.host().notifications(), vec![Notification::Ancestor { level: 2 }]);
        assert_eq!(
            tone_offsets(&events),
            vec![(500, 60), (760, 60), (1020, 60), (1280, 60)]
        );
        assert!(!engine.is_outline_busy());
    }

    #[test]
    fn test_parent_outline_without_parent() {
        let mut engine = engine(host());
        engine.request_parent_outline();
        engine.advance(ms(500));
        assert_eq!(engine.host().notifications(), vec![Notification::ParentNotAvailable]);
        assert!(!engine.is_outline_busy());
    }

    #[test]
    fn test_monitor_already_there() {
        let mut engine = engine(host().with_mouse(Point::new(505, 505)));
        engine.start_monitor();
        assert!(!engine.is_monitoring());
        assert_eq!(engine.host().tones().len(), 1);
        assert_eq!(engine.host().tones()[0].duration_ms, 190);
        assert_eq!(engine.host().notifications(), vec![Notification::AlreadyThere]);
        assert!(engine.scheduler().is_idle());
    }

    #[test]
    fn test_monitor_tick_staggers_tones() {
        let mut engine = engine(host());
        engine.start_monitor();
        assert!(engine.is_monitoring());

        engine.advance(ms(339));
        assert_eq!(engine.host().tones().len(), 1);
        assert_eq!(engine.host().tones()[0].duration_ms, 80);
        engine.advance(ms(1));
        assert_eq!(engine.host().tones().len(), 2);
        assert_eq!(engine.host().tones()[1].duration_ms, 110);
    }

    #[test]
    fn test_monitor_stops_when_mouse_is_idle() {
        let mut engine = engine(host());
        let start = engine.scheduler().now();
        engine.start_monitor();

        let events = run_until_idle(&mut engine, start, ms(60_000));
        assert!(!engine.is_monitoring());
        assert_eq!(engine.host().notifications(), vec![Notification::MonitoringAutoStopped]);
        // Ten ticks (200..=2000ms), each with a mouse and a companion tone.
        assert_eq!(tone_offsets(&events).len(), 20);
        assert!(engine.scheduler().is_idle());
    }

    #[test]
    fn test_arrival_on_movement_cancels_pending_companion() {
        let mut engine = engine(host());
        let start = engine.scheduler().now();
        engine.start_monitor();
        engine.advance(ms(250));

        let arrived = Point::new(495, 495);
        engine.host_mut().mouse = Some(arrived);
        engine.handle_mouse_move(arrived);
        assert!(!engine.is_monitoring());
        assert_eq!(
            engine.host().notifications(),
            vec![Notification::Entering, Notification::LocationReached]
        );

        run_until_idle(&mut engine, start, ms(10_000));
        assert_eq!(engine.host().tones().len(), 2);
        assert_eq!(engine.host().speech_cancels(), 2);
    }

    #[test]
    fn test_lost_target_stops_only_current_session() {
        let mut engine = engine(host());
        engine.start_monitor();
        engine.host_mut().focus = None;
        engine.advance(ms(200));
        assert!(!engine.is_monitoring());
        assert_eq!(engine.host().notifications(), vec![Notification::LocationUnavailable]);

        engine.host_mut().focus = Some(FOCUS);
        engine.start_monitor();
        assert!(engine.is_monitoring());
    }

    #[test]
    fn test_toggle_monitor_cancels_with_message() {
        let mut engine = engine(host());
        engine.toggle_monitor();
        engine.advance(ms(200));
        engine.toggle_monitor();
        assert!(!engine.is_monitoring());
        assert_eq!(engine.host().notifications(), vec![Notification::MonitoringCancelled]);
        assert_eq!(engine.host().speech_cancels(), 1);
        assert!(engine.scheduler().is_idle());
    }

    #[test]
    fn test_locate_reference_stops_monitor_silently() {
        let mut engine = engine(host());
        engine.start_monitor();
        engine.locate_reference();
        assert!(!engine.is_monitoring());
        assert!(engine.host().notifications().is_empty());
        assert_eq!(engine.host().tones()[0].duration_ms, 90);
    }

    #[test]
    fn test_screen_center_reference() {
        let settings = Settings { reference: ReferenceMode::ScreenCenter, ..Settings::default() };
        let mut engine = Engine::new(host(), TimerQueue::new(Instant::now()), settings);
        engine.start_monitor();
        engine.advance(ms(340));

        let expected = map_to_tone(
            Point::new(960, 540),
            ScreenBounds::new(1920, 1080).unwrap(),
            &engine.settings().tone_parameters(),
            110,
        );
        assert_eq!(engine.host().tones().get(1).copied(), expected);
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let mut engine = engine(host());
        engine.start_monitor();
        engine.outline_target();
        engine.shutdown();
        assert!(engine.scheduler().is_idle());
        assert!(!engine.is_monitoring());
        assert!(!engine.is_outline_busy());
    }

    #[test]
    fn test_engine_is_silent_after_shutdown() {
        let mut engine = engine(host().with_caret(Point::new(420, 470)));
        engine.shutdown();
        engine.handle_focus();
        engine.advance(ms(100));
        engine.handle_caret();
        assert!(engine.host().tones().is_empty());
        assert!(engine.host().notifications().is_empty());

        engine.set_active(true);
        engine.handle_focus();
        assert_eq!(engine.host().tones().len(), 1);
    }

    #[test]
    fn test_oversized_settings_are_capped() {
        let settings = Settings { duration_ms: u32::MAX, timeout_secs: 1e20, ..Settings::default() };
        let mut engine = Engine::new(host(), TimerQueue::new(Instant::now()), settings);
        engine.locate_target();
        assert_eq!(engine.host().tones()[0].duration_ms, 10_030);

        engine.start_monitor();
        assert!(engine.is_monitoring());
    }

    #[test]
    fn test_extreme_mouse_position_is_silent() {
        let mut engine = engine(host().with_mouse(Point::new(i32::MIN, 0)));
        engine.start_monitor();
        assert!(engine.is_monitoring());

        engine.handle_mouse_move(Point::new(i32::MIN, i32::MIN));
        engine.advance(ms(200));
        assert!(engine.is_monitoring());
        assert!(engine.host().tones().is_empty());
    }

    /// Start monitoring far from the target and return the tones heard up to
    /// the first companion tone.
    fn first_tick_tones(reference: ReferenceMode, host: SimulatedHost) -> (Engine<SimulatedHost, TimerQueue>, Vec<ToneSpec>) {
        let settings = Settings { reference, ..Settings::default() };
        let mut engine = Engine::new(host, TimerQueue::new(Instant::now()), settings);
        engine.start_monitor();
        engine.advance(ms(340));
        let tones = engine.host().tones();
        (engine, tones)
    }

    fn companion_tone(point: Point) -> Option<ToneSpec> {
        map_to_tone(point, ScreenBounds::new(1920, 1080).unwrap(), &Settings::default().tone_parameters(), 110)
    }

    #[test]
    fn test_window_references() {
        let window = Rect::new(100, 200, 800, 600);

        let (_, tones) = first_tick_tones(ReferenceMode::WindowTopLeft, host().with_window(window));
        assert_eq!(tones.len(), 2);
        assert_eq!(tones.get(1).copied(), companion_tone(Point::new(100, 200)));

        let (_, tones) = first_tick_tones(ReferenceMode::WindowCenter, host().with_window(window));
        assert_eq!(tones.get(1).copied(), companion_tone(Point::new(500, 500)));
    }

    #[test]
    fn test_screen_top_left_reference() {
        let (_, tones) = first_tick_tones(ReferenceMode::ScreenTopLeft, host());
        assert_eq!(tones.get(1).copied(), companion_tone(Point::new(0, 0)));
    }

    #[test]
    fn test_no_reference_plays_mouse_only() {
        let (engine, tones) = first_tick_tones(ReferenceMode::None, host());
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].duration_ms, 80);
        assert!(engine.is_monitoring());
    }

    #[test]
    fn test_missing_window_skips_companion_only() {
        let (mut engine, tones) = first_tick_tones(ReferenceMode::WindowCenter, host());
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].duration_ms, 80);
        assert!(engine.is_monitoring());
        assert!(engine.host().notifications().is_empty());

        engine.host_mut().mouse = Some(Point::new(150, 150));
        engine.advance(ms(200));
        assert_eq!(engine.host().tones().len(), 2);
        assert!(engine.is_monitoring());
    }
}
