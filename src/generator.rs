//! How a `ToneSpec` is rendered by the host: a plain stereo beep, a MIDI
//! note, or nothing.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::tone::{ToneSpec, MAX_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Generator {
    #[default]
    Beep,
    Midi,
    Silent,
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Beep => write!(f, "beep"),
            Generator::Midi => write!(f, "midi"),
            Generator::Silent => write!(f, "silent"),
        }
    }
}

impl FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beep" => Ok(Generator::Beep),
            "midi" => Ok(Generator::Midi),
            "silent" | "none" => Ok(Generator::Silent),
            _ => Err(format!("Invalid generator '{}'. Valid values: beep, midi, silent", s)),
        }
    }
}

/// Controller values for playing a tone as a MIDI note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiNote {
    pub note: u8,
    /// Controller 10, 0 (left) ..= 127 (right).
    pub pan: u8,
    /// Controller 11.
    pub expression: u8,
    pub duration_ms: u32,
}

impl MidiNote {
    pub fn from_tone(tone: &ToneSpec, min_pitch: f64, max_pitch: f64) -> Self {
        let note = ((tone.frequency - min_pitch) / max_pitch * 127.0).round().clamp(0.0, 127.0) as u8;

        let left = f64::from(tone.left);
        let right = f64::from(tone.right);
        let pan = if left + right == 0.0 {
            64
        } else {
            (right / (left + right) * 127.0).round().clamp(0.0, 127.0) as u8
        };

        let level = (left / MAX_LEVEL + right / MAX_LEVEL) * 0.8;
        let expression = (level * 127.0).round().clamp(0.0, 127.0) as u8;

        Self {
            note,
            pan,
            expression,
            duration_ms: tone.duration_ms,
        }
    }
}
