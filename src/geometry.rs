//! Screen coordinates: points, rectangles and the desktop size.
//!
//! Origin is the top-left corner of the desktop, y grows downward.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, the metric used for arrival tolerance.
    pub fn manhattan(&self, other: Point) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_ints(s, 2).map_err(|e| format!("Invalid point '{}': {}", s, e))?;
        Ok(Point::new(values[0], values[1]))
    }
}

/// Current desktop size. Always read fresh from the host, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    /// Returns `None` unless both dimensions are positive.
    pub fn new(width: i32, height: i32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Closed-range containment: the right and bottom edges are on screen.
    pub fn contains(&self, point: Point) -> bool {
        (0..=self.width).contains(&point.x) && (0..=self.height).contains(&point.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

impl FromStr for ScreenBounds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("Invalid screen size '{}': expected WIDTHxHEIGHT", s))?;
        let width = w.trim().parse().map_err(|_| format!("Invalid screen width '{}'", w))?;
        let height = h.trim().parse().map_err(|_| format!("Invalid screen height '{}'", h))?;
        ScreenBounds::new(width, height)
            .ok_or_else(|| format!("Invalid screen size '{}': dimensions must be positive", s))
    }
}

/// Bounding box of an on-screen object (left, top, width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// Saturates at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left.saturating_add(self.width / 2), self.top.saturating_add(self.height / 2))
    }

    /// Corners in outline order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left, self.bottom()),
        ]
    }

    /// Edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        (self.left..=self.right()).contains(&point.x) && (self.top..=self.bottom()).contains(&point.y)
    }
}

impl FromStr for Rect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = parse_ints(s, 4).map_err(|e| format!("Invalid rectangle '{}': {}", s, e))?;
        if v[2] < 0 || v[3] < 0 {
            return Err(format!("Invalid rectangle '{}': negative size", s));
        }
        Ok(Rect::new(v[0], v[1], v[2], v[3]))
    }
}

fn parse_ints(s: &str, count: usize) -> Result<Vec<i32>, String> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<i32>().map_err(|_| format!("'{}' is not an integer", part.trim())))
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != count {
        return Err(format!("expected {} comma-separated integers", count));
    }
    Ok(values)
}
