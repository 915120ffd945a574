use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::generator::Generator;
use crate::geometry::{Point, Rect, ScreenBounds};
use crate::reference::ReferenceMode;

#[derive(Parser)]
#[command(name = "loctones")]
#[command(about = "Hear screen locations as positional tones")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Desktop size as WIDTHxHEIGHT
    #[arg(long, global = true, value_parser = clap::value_parser!(ScreenBounds))]
    pub screen: Option<ScreenBounds>,

    /// How tones are rendered (beep, midi, silent)
    #[arg(long, global = true, value_parser = clap::value_parser!(Generator))]
    pub generator: Option<Generator>,

    /// Base tone duration in milliseconds
    #[arg(long, global = true)]
    pub duration_ms: Option<u32>,

    /// Left speaker volume (0.01 to 1.0)
    #[arg(long, global = true)]
    pub left_volume: Option<f64>,

    /// Right speaker volume (0.01 to 1.0)
    #[arg(long, global = true)]
    pub right_volume: Option<f64>,

    /// Swap stereo channels
    #[arg(long, global = true, conflicts_with = "no_stereo_swap")]
    pub stereo_swap: bool,

    /// Keep stereo channels unswapped (overrides config file)
    #[arg(long, global = true)]
    pub no_stereo_swap: bool,

    /// Mouse arrival tolerance in pixels
    #[arg(long, global = true)]
    pub tolerance: Option<i32>,

    /// Stop monitoring after the mouse is still this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<f64>,

    /// Use the object center instead of the caret for editable fields
    #[arg(long, global = true)]
    pub no_caret: bool,

    /// Pitch for the bottom of the screen (Hz)
    #[arg(long, global = true)]
    pub min_pitch: Option<f64>,

    /// Pitch for the top of the screen (Hz)
    #[arg(long, global = true)]
    pub max_pitch: Option<f64>,

    /// Companion tone while monitoring (focus, window-top-left, window-center,
    /// screen-top-left, screen-center, none)
    #[arg(long, global = true, value_parser = clap::value_parser!(ReferenceMode))]
    pub reference: Option<ReferenceMode>,

    /// Path to config file
    #[arg(long, global = true, env = "LOCTONES_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the tone for one screen point
    Tone {
        x: i32,
        y: i32,
        /// Tone duration in milliseconds (defaults to the base duration)
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Play the outline of an object: four corners, then the caret
    Outline {
        /// Object bounds as LEFT,TOP,WIDTH,HEIGHT
        #[arg(long)]
        rect: Rect,
        /// Caret position as X,Y
        #[arg(long)]
        caret: Option<Point>,
    },

    /// Monitor a mouse path against an object until arrival or timeout
    Monitor {
        /// Object bounds as LEFT,TOP,WIDTH,HEIGHT
        #[arg(long)]
        rect: Rect,
        /// Caret position as X,Y
        #[arg(long)]
        caret: Option<Point>,
        /// Application window bounds as LEFT,TOP,WIDTH,HEIGHT
        #[arg(long)]
        window: Option<Rect>,
        /// Milliseconds between mouse path samples
        #[arg(long, default_value_t = 100)]
        step_ms: u64,
        /// Mouse positions as X,Y; the first one is where monitoring starts
        #[arg(required = true)]
        path: Vec<Point>,
    },
}
