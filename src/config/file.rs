use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::generator::Generator;
use crate::reference::ReferenceMode;

const CONFIG_FILE_NAME: &str = "loctones.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub active: Option<bool>,
    pub duration_ms: Option<u32>,
    pub left_volume: Option<f64>,
    pub right_volume: Option<f64>,
    #[serde(default)]
    pub stereo_swap: bool,
    pub tolerance: Option<i32>,
    pub timeout: Option<f64>,
    pub caret: Option<bool>,
    pub min_pitch: Option<f64>,
    pub max_pitch: Option<f64>,
    pub reference: Option<ReferenceMode>,
    pub monitor_period_ms: Option<u32>,
    #[serde(default)]
    pub generator: Generator,
    /// Desktop size as "WIDTHxHEIGHT".
    pub screen: Option<String>,
}

/// Read and parse one config file. Missing files are `None` without a
/// warning; unreadable or malformed ones are logged.
pub fn load_from_path(path: &Path) -> Option<FileConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };
    toml::from_str(&content)
        .inspect(|_| log::debug!("Settings loaded from {}", path.display()))
        .inspect_err(|e| log::warn!("Ignoring {}: {}", path.display(), e))
        .ok()
}

/// First parseable file among `./loctones.toml` and
/// `$HOME/.config/loctones.toml`.
pub fn load_from_default_paths() -> Option<FileConfig> {
    search_paths().iter().find_map(|path| load_from_path(path))
}

fn search_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"));
    std::iter::once(PathBuf::from("."))
        .chain(home)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            duration_ms = 60
            left_volume = 0.5
            stereo_swap = true
            tolerance = 10
            timeout = 3.5
            caret = false
            reference = "screen-center"
            generator = "midi"
            screen = "1280x720"
            "#,
        )
        .unwrap();

        assert_eq!(config.duration_ms, Some(60));
        assert_eq!(config.left_volume, Some(0.5));
        assert!(config.stereo_swap);
        assert_eq!(config.caret, Some(false));
        assert_eq!(config.reference, Some(ReferenceMode::ScreenCenter));
        assert_eq!(config.generator, Generator::Midi);
        assert_eq!(config.screen.as_deref(), Some("1280x720"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("volume = 1.0").is_err());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.generator, Generator::Beep);
        assert!(!config.stereo_swap);
        assert!(config.duration_ms.is_none());
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(load_from_path(Path::new("/nonexistent/loctones.toml")).is_none());
    }

    #[test]
    fn test_search_paths_end_in_file_name() {
        let paths = search_paths();
        assert_eq!(paths[0], Path::new(".").join(CONFIG_FILE_NAME));
        assert!(paths.iter().all(|p| p.ends_with(CONFIG_FILE_NAME)));
    }
}
