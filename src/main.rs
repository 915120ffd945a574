use std::time::{Duration, Instant};

use clap::Parser;

use loctones::config::{Cli, Command, Config};
use loctones::generator::{Generator, MidiNote};
use loctones::sim::{self, HostEvent, SimulatedHost};
use loctones::{Engine, Point, Rect, TimerQueue};

/// Upper bound on simulated time for a single command.
const SIMULATION_LIMIT: Duration = Duration::from_secs(60);

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load(&cli);
    config.validate()?;

    log::debug!(
        "screen={}x{}, generator={}, reference={}",
        config.screen.width,
        config.screen.height,
        config.generator,
        config.settings.reference
    );

    match cli.command {
        Command::Tone { x, y, duration } => run_tone(&config, Point::new(x, y), duration),
        Command::Outline { rect, caret } => {
            run_outline(&config, rect, caret);
            Ok(())
        }
        Command::Monitor { rect, caret, window, step_ms, path } => {
            run_monitor(&config, rect, caret, window, Duration::from_millis(step_ms), &path);
            Ok(())
        }
    }
}

fn run_tone(config: &Config, point: Point, duration: Option<u32>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();
    let host = SimulatedHost::new(config.screen);
    let mut engine = Engine::new(host, TimerQueue::new(start), config.settings.clone());

    let duration = duration.unwrap_or(engine.settings().duration_ms);
    if !engine.play_point_on_demand(point, duration) {
        return Err(format!("{} is outside the {}x{} screen", point, config.screen.width, config.screen.height).into());
    }
    print_timeline(config, &sim::run_until_idle(&mut engine, start, SIMULATION_LIMIT));
    Ok(())
}

fn run_outline(config: &Config, rect: Rect, caret: Option<Point>) {
    let start = Instant::now();
    let mut host = SimulatedHost::new(config.screen).with_focus(rect);
    host.caret = caret;
    let mut engine = Engine::new(host, TimerQueue::new(start), config.settings.clone());

    if let Some(total) = engine.outline_target() {
        log::info!("Outline of {} tones over {}ms", if caret.is_some() { 5 } else { 4 }, total);
    }
    print_timeline(config, &sim::run_until_idle(&mut engine, start, SIMULATION_LIMIT));
}

fn run_monitor(config: &Config, rect: Rect, caret: Option<Point>, window: Option<Rect>, step: Duration, path: &[Point]) {
    let Some((&first, rest)) = path.split_first() else {
        return;
    };

    let start = Instant::now();
    let mut host = SimulatedHost::new(config.screen).with_focus(rect).with_mouse(first);
    host.caret = caret;
    host.window = window;
    let mut engine = Engine::new(host, TimerQueue::new(start), config.settings.clone());

    engine.start_monitor();
    let mut timeline = Vec::new();
    let mut now = start;
    for &mouse in rest {
        if !engine.is_monitoring() {
            log::info!("Monitoring ended before the path did");
            break;
        }
        now += step;
        timeline.extend(sim::run_until(&mut engine, start, now));
        engine.host_mut().mouse = Some(mouse);
        engine.handle_mouse_move(mouse);
    }
    timeline.extend(sim::run_until_idle(&mut engine, start, SIMULATION_LIMIT));
    print_timeline(config, &timeline);
}

fn print_timeline(config: &Config, timeline: &[(u64, HostEvent)]) {
    for (at, event) in timeline {
        if let Some(line) = render(config, event) {
            println!("[{:>6}ms] {}", at, line);
        }
    }
}

fn render(config: &Config, event: &HostEvent) -> Option<String> {
    match event {
        HostEvent::Tone(tone) => match config.generator {
            Generator::Beep => Some(format!(
                "beep {:.1} Hz {}ms L={} R={}",
                tone.frequency, tone.duration_ms, tone.left, tone.right
            )),
            Generator::Midi => {
                let note = MidiNote::from_tone(tone, config.settings.min_pitch, config.settings.max_pitch);
                Some(format!(
                    "midi note={} pan={} expression={} {}ms",
                    note.note, note.pan, note.expression, note.duration_ms
                ))
            }
            Generator::Silent => None,
        },
        HostEvent::Notify(notification) => Some(format!("say \"{}\"", notification)),
        HostEvent::SpeechCancelled => Some("speech cancelled".to_string()),
    }
}
