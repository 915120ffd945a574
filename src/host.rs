//! Everything the engine needs from the surrounding screen reader.
//!
//! Location queries are made fresh on every request or tick; the desktop can
//! be resized and the target can move between calls.

use crate::error::LocationError;
use crate::geometry::{Point, Rect, ScreenBounds};
use crate::notification::Notification;
use crate::tone::ToneSpec;

pub trait Host {
    /// Current mouse position.
    fn reference_point(&mut self) -> Result<Point, LocationError>;

    /// Focused object centroid, or its caret position when `use_caret` is set
    /// and the object is editable.
    fn target_point(&mut self, use_caret: bool) -> Result<Point, LocationError>;

    /// Bounding box of the focused object.
    fn target_bounds(&mut self) -> Result<Rect, LocationError>;

    /// Caret position of the focused object.
    fn caret_point(&mut self) -> Result<Point, LocationError>;

    /// Walk up to `levels` parents from the focused object. Returns the
    /// bounding box of the ancestor reached and how many levels were climbed,
    /// or `None` when the focused object has no parent.
    fn ancestor_bounds(&mut self, levels: u32) -> Result<Option<(Rect, u32)>, LocationError>;

    /// Bounding box of the focused application's root window.
    fn window_bounds(&mut self) -> Result<Rect, LocationError>;

    fn desktop_bounds(&mut self) -> ScreenBounds;

    /// Fire and forget.
    fn emit_tone(&mut self, tone: &ToneSpec);

    fn notify(&mut self, notification: Notification);

    fn cancel_pending_speech(&mut self);
}
