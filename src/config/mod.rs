mod cli;
mod file;

pub use cli::{Cli, Command};

use crate::generator::Generator;
use crate::geometry::ScreenBounds;
use crate::settings::Settings;

const DEFAULT_SCREEN: ScreenBounds = ScreenBounds { width: 1920, height: 1080 };

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub generator: Generator,
    pub screen: ScreenBounds,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();

        let defaults = Settings::default();
        let settings = Settings {
            active: file_config.active.unwrap_or(defaults.active),
            duration_ms: cli.duration_ms.or(file_config.duration_ms).unwrap_or(defaults.duration_ms),
            left_volume: cli.left_volume.or(file_config.left_volume).unwrap_or(defaults.left_volume),
            right_volume: cli.right_volume.or(file_config.right_volume).unwrap_or(defaults.right_volume),
            stereo_swap: if cli.no_stereo_swap {
                false
            } else {
                cli.stereo_swap || file_config.stereo_swap
            },
            tolerance: cli.tolerance.or(file_config.tolerance).unwrap_or(defaults.tolerance),
            timeout_secs: cli.timeout.or(file_config.timeout).unwrap_or(defaults.timeout_secs),
            caret: !cli.no_caret && file_config.caret.unwrap_or(defaults.caret),
            min_pitch: cli.min_pitch.or(file_config.min_pitch).unwrap_or(defaults.min_pitch),
            max_pitch: cli.max_pitch.or(file_config.max_pitch).unwrap_or(defaults.max_pitch),
            reference: cli.reference.or(file_config.reference).unwrap_or(defaults.reference),
            monitor_period_ms: file_config.monitor_period_ms.unwrap_or(defaults.monitor_period_ms),
        };

        let file_screen = file_config.screen.as_deref().and_then(|s| match s.parse::<ScreenBounds>() {
            Ok(screen) => Some(screen),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        });

        Self {
            settings,
            generator: cli.generator.unwrap_or(file_config.generator),
            screen: cli.screen.or(file_screen).unwrap_or(DEFAULT_SCREEN),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let s = &self.settings;
        if s.min_pitch <= 0.0 || s.min_pitch >= s.max_pitch {
            return Err("--min-pitch must be positive and below --max-pitch");
        }
        if !(0.0..=1.0).contains(&s.left_volume) || !(0.0..=1.0).contains(&s.right_volume) {
            return Err("Volumes must be between 0.0 and 1.0");
        }
        if s.timeout_secs.is_nan() || s.timeout_secs < 0.0 {
            return Err("--timeout must not be negative");
        }
        Ok(())
    }
}
